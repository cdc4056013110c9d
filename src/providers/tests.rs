//! Provider tests with HTTP mocking.

mod digitalocean_tests {
    use crate::error::DdnsError;
    use crate::providers::{DigitalOceanClient, DnsProvider, DnsRecord};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(mock_server: &MockServer) -> DigitalOceanClient {
        DigitalOceanClient::with_base_url(
            reqwest::Client::new(),
            "test-token".to_string(),
            format!("{}/v2/domains", mock_server.uri()),
        )
    }

    fn home_record(data: &str) -> DnsRecord {
        DnsRecord {
            id: 1,
            record_type: "A".to_string(),
            name: "home".to_string(),
            data: data.to_string(),
            ttl: 300,
        }
    }

    #[tokio::test]
    async fn test_get_records_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/domains/example.com/records"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "domain_records": [
                    {"id": 1, "type": "A", "name": "home", "data": "203.0.113.4", "ttl": 300},
                    {"id": 2, "type": "TXT", "name": "home", "data": "v=spf1", "ttl": 300,
                     "priority": null, "port": null, "weight": null, "flags": null, "tag": null}
                ],
                "links": {},
                "meta": {"total": 2}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let records = client(&mock_server).get_records("example.com").await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], home_record("203.0.113.4"));
        assert!(records[0].is_address());
        assert_eq!(records[1].record_type, "TXT");
        assert!(!records[1].is_address());
    }

    #[tokio::test]
    async fn test_get_records_empty_zone() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/domains/example.com/records"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"domain_records": []})),
            )
            .mount(&mock_server)
            .await;

        let records = client(&mock_server).get_records("example.com").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_get_records_auth_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/domains/example.com/records"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "id": "Unauthorized",
                "message": "Unable to authenticate you"
            })))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server).get_records("example.com").await;

        match result {
            Err(DdnsError::HttpStatus { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Unable to authenticate you");
            }
            other => panic!("expected HttpStatus error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_records_malformed_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/domains/example.com/records"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"domain_records": ["#))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server).get_records("example.com").await;
        assert!(matches!(result, Err(DdnsError::Decode(_))));
    }

    #[tokio::test]
    async fn test_update_record_sends_full_record() {
        let mock_server = MockServer::start().await;
        let record = home_record("203.0.113.5");

        Mock::given(method("PATCH"))
            .and(path("/v2/domains/example.com/records/1"))
            .and(header("Authorization", "Bearer test-token"))
            .and(body_json(serde_json::json!({
                "id": 1,
                "type": "A",
                "name": "home",
                "data": "203.0.113.5",
                "ttl": 300
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "domain_record": {"id": 1, "type": "A", "name": "home", "data": "203.0.113.5", "ttl": 300}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        client(&mock_server)
            .update_record("example.com", &record)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_record_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/v2/domains/example.com/records/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server)
            .update_record("example.com", &home_record("203.0.113.5"))
            .await;

        assert!(matches!(
            result,
            Err(DdnsError::HttpStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_update_record_requires_200() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server)
            .update_record("example.com", &home_record("203.0.113.5"))
            .await;

        assert!(matches!(
            result,
            Err(DdnsError::HttpStatus { status: 202, .. })
        ));
    }

    #[test]
    fn test_record_serializes_type_field() {
        let json = serde_json::to_value(home_record("203.0.113.5")).unwrap();
        assert_eq!(json["type"], "A");
        assert!(json.get("record_type").is_none());
    }
}
