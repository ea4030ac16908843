//! Tests for the MCP server against a stubbed API.

use malapi::mcp::{DetailParams, MalServer, RankingParams, SearchParams, SuggestionParams};
use malapi::MalClient;
use rmcp::handler::server::ServerHandler;
use rmcp::model::{CallToolResult, ErrorCode, RawContent};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn text_of(result: &CallToolResult) -> serde_json::Value {
    match &result.content[0].raw {
        RawContent::Text(t) => serde_json::from_str(&t.text).unwrap(),
        _ => panic!("Expected text content"),
    }
}

fn server_for(mock: &MockServer, token: Option<&str>) -> MalServer {
    MalServer::new(MalClient::with_base_url("test-client", token, &mock.uri()).unwrap())
}

#[test]
fn mal_server_is_clone_and_handler() {
    fn assert_handler<T: ServerHandler + Clone>() {}
    assert_handler::<MalServer>();
}

#[test]
fn get_info_advertises_tools() {
    let server = MalServer::new(MalClient::new("test-client", None).unwrap());
    let info = server.get_info();

    assert_eq!(info.server_info.name, "malapi");
    assert!(info.capabilities.tools.is_some());
    assert!(info.instructions.unwrap().contains("anime"));
}

#[tokio::test]
async fn detail_without_fields_returns_full_record() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1,
            "title": "Cowboy Bebop",
            "num_list_users": 1800000,
            "num_scoring_users": 1000000,
            "created_at": "2008-01-01T00:00:00+00:00",
            "updated_at": "2024-01-01T00:00:00+00:00",
            "media_type": "tv",
            "status": "finished_airing",
            "num_episodes": 26,
            "genres": [{"id": 1, "name": "Action"}],
            "statistics": {
                "num_list_users": 1800000,
                "status": {"watching": "50000", "completed": "1200000"}
            }
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server_for(&mock, None)
        .handle_detail(DetailParams {
            anime_id: 1,
            fields: None,
        })
        .await
        .unwrap();

    let record = text_of(&result);
    assert_eq!(record["title"], "Cowboy Bebop");
    assert_eq!(record["num_episodes"], 26);
    assert_eq!(record["statistics"]["status"]["completed"], 1_200_000);
    assert_eq!(record["genres"][0]["name"], "Action");
}

#[tokio::test]
async fn search_passes_paging_through() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime"))
        .and(query_param("q", "frieren"))
        .and(query_param("limit", "1"))
        .and(query_param("offset", "2"))
        .and(query_param("fields", "rank"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"node": {"id": 52991, "title": "Sousou no Frieren", "rank": 1}}]
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let params: SearchParams = serde_json::from_value(serde_json::json!({
        "q": "frieren",
        "limit": 1,
        "offset": 2,
        "fields": ["rank"]
    }))
    .unwrap();
    let result = server_for(&mock, None).handle_search(params).await.unwrap();

    let records = text_of(&result);
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["rank"], 1);
}

#[tokio::test]
async fn ranking_includes_positions() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime/ranking"))
        .and(query_param("ranking_type", "airing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {"node": {"id": 21, "title": "One Piece"}, "ranking": {"rank": 1, "previous_rank": 3}}
            ]
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let params: RankingParams = serde_json::from_value(serde_json::json!({
        "ranking_type": "airing",
        "fields": ["id"]
    }))
    .unwrap();
    let result = server_for(&mock, None).handle_ranking(params).await.unwrap();

    let records = text_of(&result);
    assert_eq!(records[0]["anime"]["title"], "One Piece");
    assert_eq!(records[0]["ranking"]["rank"], 1);
    assert_eq!(records[0]["ranking"]["previous_rank"], 3);
}

#[tokio::test]
async fn suggestions_use_bearer_token() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime/suggestions"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"node": {"id": 9253, "title": "Steins;Gate"}}]
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let params = SuggestionParams {
        fields: Some(vec![]),
        ..Default::default()
    };
    let result = server_for(&mock, Some("user-token"))
        .handle_suggestions(params)
        .await
        .unwrap();

    assert_eq!(text_of(&result)[0]["id"], 9253);
}

#[tokio::test]
async fn unauthorized_maps_to_internal_error_with_status() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock)
        .await;

    let err = server_for(&mock, Some("expired"))
        .handle_suggestions(SuggestionParams::default())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    assert!(err.message.contains("401"));
}

#[tokio::test]
async fn bad_request_maps_to_invalid_params() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&mock)
        .await;

    let params: SearchParams = serde_json::from_value(serde_json::json!({"q": "x"})).unwrap();
    let err = server_for(&mock, None).handle_search(params).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(err.message.contains("Invalid parameter"));
}
