//! End-to-end tests of the transport over real HTTP.
//!
//! Each host is a `wiremock` server; delayed responses stand in for hosts
//! that time out.

use std::io::Write;
use std::time::Duration;

use algolia_transport::transport::{
    HttpMethod, HttpRequest, HttpRequester, RequestOptions, Requester, StatefulHost, Transport,
    TransportError,
};
use algolia_transport::{ApiKey, ApplicationId, CompressionType, SearchConfig};
use flate2::write::GzEncoder;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_config(hosts: Vec<StatefulHost>) -> SearchConfig {
    SearchConfig::builder()
        .application_id(ApplicationId::new("APP").unwrap())
        .api_key(ApiKey::new("test-key").unwrap())
        .hosts(hosts)
        .read_timeout(Duration::from_millis(300))
        .write_timeout(Duration::from_millis(300))
        .connect_timeout(Duration::from_millis(300))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_requester_reports_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/indexes"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let request = HttpRequest {
        method: HttpMethod::Get,
        path: "/1/indexes".to_string(),
        body: None,
        headers: std::collections::HashMap::new(),
        timeout: Duration::from_secs(1),
        connect_timeout: Duration::from_secs(1),
    };
    let response = HttpRequester::new()
        .send_request(&StatefulHost::new(server.uri()), &request)
        .await;

    assert_eq!(response.status, Some(503));
    assert_eq!(response.body, "unavailable");
    assert!(!response.timed_out);
    assert!(!response.network_failure);
}

#[tokio::test]
async fn test_server_error_fails_over_to_second_host() {
    let failing = MockServer::start().await;
    let healthy = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1/indexes/products/query"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&failing)
        .await;
    Mock::given(method("POST"))
        .and(path("/1/indexes/products/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": [], "nbHits": 0})))
        .expect(1)
        .mount(&healthy)
        .await;

    let transport = Transport::new(create_test_config(vec![
        StatefulHost::new(failing.uri()),
        StatefulHost::new(healthy.uri()),
    ]));

    let body = transport
        .read(
            HttpMethod::Post,
            "/1/indexes/products/query",
            Some(json!({"query": "shoes"})),
            &RequestOptions::new(),
        )
        .await
        .unwrap();

    assert_eq!(body, json!({"hits": [], "nbHits": 0}));
    let hosts = transport.retry_strategy().hosts();
    assert_eq!(hosts[0].retry_count, 1);
    assert_eq!(hosts[1].retry_count, 0);
}

#[tokio::test]
async fn test_slow_host_times_out_and_next_host_answers() {
    let slow = MockServer::start().await;
    let fast = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"from": "slow"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&slow)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"from": "fast"})))
        .mount(&fast)
        .await;

    let transport = Transport::new(create_test_config(vec![
        StatefulHost::new(slow.uri()),
        StatefulHost::new(fast.uri()),
    ]));

    let body = transport
        .read(HttpMethod::Get, "/1/indexes", None, &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(body, json!({"from": "fast"}));
    let slow_state = &transport.retry_strategy().hosts()[0];
    assert_eq!(slow_state.retry_count, 1);
    assert!(slow_state.up);
}

#[tokio::test]
async fn test_client_error_surfaces_without_trying_other_hosts() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1/indexes/missing/settings"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Index does not exist",
            "status": 404
        })))
        .expect(1)
        .mount(&first)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&second)
        .await;

    let transport = Transport::new(create_test_config(vec![
        StatefulHost::new(first.uri()),
        StatefulHost::new(second.uri()),
    ]));

    let result = transport
        .read(
            HttpMethod::Get,
            "/1/indexes/missing/settings",
            None,
            &RequestOptions::new(),
        )
        .await;

    match result {
        Err(TransportError::Http(error)) => {
            assert_eq!(error.code, 404);
            assert_eq!(error.message, "Index does not exist");
        }
        other => panic!("Expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_headers_query_and_body_reach_the_host() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1/indexes/products/batch"))
        .and(header("X-Algolia-Application-Id", "APP"))
        .and(header("X-Algolia-API-Key", "test-key"))
        .and(header("X-Algolia-UserToken", "user-42"))
        .and(query_param("forwardToReplicas", "true"))
        .and(body_json(json!({
            "requests": [{"action": "addObject", "body": {"name": "shoe"}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"taskID": 42})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = Transport::new(create_test_config(vec![StatefulHost::new(server.uri())]));
    let options = RequestOptions::new()
        .header("X-Algolia-UserToken", "user-42")
        .query_param("forwardToReplicas", "true");

    let body = transport
        .write(
            HttpMethod::Post,
            "/1/indexes/products/batch",
            Some(json!({"requests": [{"action": "addObject", "body": {"name": "shoe"}}]})),
            &options,
        )
        .await
        .unwrap();

    assert_eq!(body, json!({"taskID": 42}));
}

#[tokio::test]
async fn test_unreachable_host_is_skipped() {
    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&healthy)
        .await;

    // Nothing listens on port 1.
    let transport = Transport::new(create_test_config(vec![
        StatefulHost::new("http://127.0.0.1:1"),
        StatefulHost::new(healthy.uri()),
    ]));

    let body = transport
        .read(HttpMethod::Get, "/1/indexes", None, &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(body, json!({"items": []}));
    assert_eq!(transport.retry_strategy().hosts()[0].retry_count, 1);
}

#[tokio::test]
async fn test_every_host_failing_is_unreachable() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    for server in [&first, &second] {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(server)
            .await;
    }

    let transport = Transport::new(create_test_config(vec![
        StatefulHost::new(first.uri()),
        StatefulHost::new(second.uri()),
    ]));

    let result = transport
        .read(HttpMethod::Get, "/1/indexes", None, &RequestOptions::new())
        .await;

    assert!(matches!(
        result,
        Err(TransportError::Unreachable(ref error)) if error.tried == 2
    ));
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[tokio::test]
async fn test_gzip_response_is_decoded() {
    let server = MockServer::start().await;
    let payload = json!({"hits": [{"objectID": "1", "name": "shoe"}], "nbHits": 1});

    Mock::given(method("GET"))
        .and(path("/1/indexes/products"))
        .and(header("Accept-Encoding", "gzip"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Encoding", "gzip")
                .insert_header("Content-Type", "application/json")
                .set_body_bytes(gzip(payload.to_string().as_bytes())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let transport = Transport::new(create_test_config(vec![StatefulHost::new(server.uri())]));
    let options = RequestOptions::new().compression(CompressionType::Gzip);

    let body = transport
        .read(HttpMethod::Get, "/1/indexes/products", None, &options)
        .await
        .unwrap();

    assert_eq!(body, payload);
}

#[tokio::test]
async fn test_option_header_replaces_default_of_different_case() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1/indexes/products/batch"))
        .and(header("content-type", "application/x-ndjson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"taskID": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = Transport::new(create_test_config(vec![StatefulHost::new(server.uri())]));
    let options = RequestOptions::new().header("content-type", "application/x-ndjson");

    let body = transport
        .write(
            HttpMethod::Post,
            "/1/indexes/products/batch",
            Some(json!({"requests": []})),
            &options,
        )
        .await
        .unwrap();

    assert_eq!(body, json!({"taskID": 7}));
}
