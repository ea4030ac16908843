//! Authentication header selection.
//!
//! Each request carries exactly one of `Authorization: Bearer` or
//! `X-MAL-CLIENT-ID`, chosen from the credentials at the time of the call.

use malapi::{DetailQuery, MalClient, CLIENT_ID_HEADER};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn detail_body() -> serde_json::Value {
    serde_json::json!({"id": 1, "title": "Cowboy Bebop"})
}

async fn mount_detail(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/anime/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body()))
        .mount(server)
        .await;
}

async fn last_request(server: &MockServer) -> Request {
    server
        .received_requests()
        .await
        .unwrap()
        .pop()
        .expect("no request received")
}

fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

async fn fetch(client: &MalClient) {
    client
        .get_anime_detail(&DetailQuery::new(1).with_fields([]))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_bearer_when_token_set() {
    let server = MockServer::start().await;
    mount_detail(&server).await;

    let client = MalClient::with_base_url("my-client", Some("tok123"), &server.uri()).unwrap();
    fetch(&client).await;

    let request = last_request(&server).await;
    assert_eq!(header(&request, "authorization"), Some("Bearer tok123"));
    assert!(header(&request, CLIENT_ID_HEADER).is_none());
}

#[tokio::test]
async fn test_client_id_without_token() {
    let server = MockServer::start().await;
    mount_detail(&server).await;

    let client = MalClient::with_base_url("my-client", None, &server.uri()).unwrap();
    fetch(&client).await;

    let request = last_request(&server).await;
    assert_eq!(header(&request, CLIENT_ID_HEADER), Some("my-client"));
    assert!(header(&request, "authorization").is_none());
}

#[tokio::test]
async fn test_empty_token_falls_back_to_client_id() {
    let server = MockServer::start().await;
    mount_detail(&server).await;

    let client = MalClient::with_base_url("my-client", Some(""), &server.uri()).unwrap();
    fetch(&client).await;

    let request = last_request(&server).await;
    assert_eq!(header(&request, CLIENT_ID_HEADER), Some("my-client"));
    assert!(header(&request, "authorization").is_none());
}

#[tokio::test]
async fn test_setters_apply_to_later_calls_and_clones() {
    let server = MockServer::start().await;
    mount_detail(&server).await;

    let client = MalClient::with_base_url("my-client", None, &server.uri()).unwrap();
    let clone = client.clone();

    client.set_access_token("fresh");
    fetch(&clone).await;
    let request = last_request(&server).await;
    assert_eq!(header(&request, "authorization"), Some("Bearer fresh"));

    clone.clear_access_token();
    client.set_client_id("other-client");
    fetch(&client).await;
    let request = last_request(&server).await;
    assert_eq!(header(&request, CLIENT_ID_HEADER), Some("other-client"));
    assert!(header(&request, "authorization").is_none());
}
