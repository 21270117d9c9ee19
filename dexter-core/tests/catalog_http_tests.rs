use dexter_core::{CatalogClient, HttpCatalogClient};
use dexter_test_utils::assertions::{assert_malformed, assert_not_found, assert_transport};
use dexter_test_utils::fixtures::{id, record, record_json};
use dexter_test_utils::http::{serve_never, serve_once};
use std::time::Duration;

fn client(base_url: &str) -> HttpCatalogClient {
    HttpCatalogClient::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetches_and_parses_a_record() {
    let (base_url, server) = serve_once(200, record_json(25)).await;
    let record_25 = client(&base_url).fetch_record(id(25)).await.unwrap();
    assert_eq!(record_25, record(25));

    let request_line = server.await.unwrap();
    assert_eq!(request_line, "GET /api/v2/pokemon/25 HTTP/1.1");
}

#[tokio::test]
async fn not_found_maps_to_not_found() {
    let (base_url, _server) = serve_once(404, "Not Found".to_string()).await;
    assert_not_found(&client(&base_url).fetch_record(id(99_999)).await);
}

#[tokio::test]
async fn server_error_is_transport() {
    let (base_url, _server) = serve_once(503, String::new()).await;
    assert_transport(&client(&base_url).fetch_record(id(1)).await);
}

#[tokio::test]
async fn unexpected_shape_is_malformed() {
    let (base_url, _server) = serve_once(200, r#"{"id": 1, "name": "bulbasaur"}"#.to_string()).await;
    assert_malformed(&client(&base_url).fetch_record(id(1)).await);
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let (base_url, _server) = serve_once(200, "<html>oops</html>".to_string()).await;
    assert_malformed(&client(&base_url).fetch_record(id(1)).await);
}

#[tokio::test]
async fn unreachable_host_is_transport() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let base_url = format!("http://{addr}/api/v2/pokemon");
    assert_transport(&client(&base_url).fetch_record(id(1)).await);
}

#[tokio::test]
async fn timeout_is_transport() {
    let (base_url, server) = serve_never().await;
    let slow = HttpCatalogClient::new(&base_url, Duration::from_millis(100)).unwrap();
    let result = slow.fetch_record(id(1)).await;
    assert_transport(&result);
    assert!(result.unwrap_err().to_string().contains("timed out"));
    server.abort();
}

#[tokio::test]
async fn record_for_another_id_is_malformed() {
    let (base_url, _server) = serve_once(200, record_json(132)).await;
    assert_malformed(&client(&base_url).fetch_record(id(25)).await);
}
