//! MCP Server handler for the MyAnimeList API.

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpError, Implementation,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
        ToolsCapability,
    },
    service::RequestContext,
    RoleServer,
};
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    mcp::{DetailParams, RankingParams, SearchParams, SeasonalParams, SuggestionParams},
    MalClient, MalError,
};

/// MyAnimeList MCP Server.
///
/// Implements the MCP ServerHandler trait, providing tools to query
/// the MyAnimeList API through the Model Context Protocol.
///
/// # Tools
///
/// - `search_anime` - Search anime by title
/// - `get_anime_detail` - Fetch one anime by id
/// - `get_anime_ranking` - List ranked anime
/// - `get_seasonal_anime` - List anime from a broadcast season
/// - `get_suggested_anime` - List suggestions (needs an access token)
#[derive(Clone)]
pub struct MalServer {
    client: Arc<MalClient>,
}

impl MalServer {
    /// Create a new MalServer from environment variables.
    ///
    /// Uses `MAL_CLIENT_ID`, optionally `MAL_ACCESS_TOKEN`, and optionally
    /// `MAL_API_URL` for the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `MAL_CLIENT_ID` is not set.
    pub fn from_env() -> crate::Result<Self> {
        let client = MalClient::from_env()?;
        Ok(Self::new(client))
    }

    /// Create a new MalServer with an existing client.
    pub fn new(client: MalClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Generate JSON Schema for a type.
    fn schema<T: JsonSchema>() -> Arc<serde_json::Map<String, serde_json::Value>> {
        let schema = schemars::schema_for!(T);
        let value = serde_json::to_value(&schema).unwrap_or(serde_json::json!({}));
        match value {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        }
    }

    /// Convert MalError to McpError.
    fn to_mcp_error(err: MalError) -> McpError {
        let message = format!("{} (status {})", err, err.status());
        match err {
            MalError::NotFound => McpError::resource_not_found(message, None),
            MalError::InvalidParameter | MalError::MissingCredential => {
                McpError::invalid_params(message, None)
            }
            _ => McpError::internal_error(message, None),
        }
    }

    fn to_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Handle the `search_anime` tool.
    pub async fn handle_search(&self, params: SearchParams) -> Result<CallToolResult, McpError> {
        let results = self
            .client
            .search_anime(&params.into())
            .await
            .map_err(Self::to_mcp_error)?;
        Self::to_result(&results)
    }

    /// Handle the `get_anime_detail` tool.
    ///
    /// # Errors
    ///
    /// Returns `resource_not_found` for an unknown id.
    pub async fn handle_detail(&self, params: DetailParams) -> Result<CallToolResult, McpError> {
        let detail = self
            .client
            .get_anime_detail(&params.into())
            .await
            .map_err(Self::to_mcp_error)?;
        Self::to_result(&detail)
    }

    /// Handle the `get_anime_ranking` tool.
    pub async fn handle_ranking(&self, params: RankingParams) -> Result<CallToolResult, McpError> {
        let ranking = self
            .client
            .get_anime_ranking(&params.into())
            .await
            .map_err(Self::to_mcp_error)?;
        Self::to_result(&ranking)
    }

    /// Handle the `get_seasonal_anime` tool.
    pub async fn handle_seasonal(
        &self,
        params: SeasonalParams,
    ) -> Result<CallToolResult, McpError> {
        let results = self
            .client
            .get_seasonal_anime(&params.into())
            .await
            .map_err(Self::to_mcp_error)?;
        Self::to_result(&results)
    }

    /// Handle the `get_suggested_anime` tool.
    ///
    /// # Errors
    ///
    /// Returns `invalid_params` when the client has no access token.
    pub async fn handle_suggestions(
        &self,
        params: SuggestionParams,
    ) -> Result<CallToolResult, McpError> {
        let results = self
            .client
            .get_suggested_anime(&params.into())
            .await
            .map_err(Self::to_mcp_error)?;
        Self::to_result(&results)
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(args: serde_json::Value) -> Result<T, McpError> {
    serde_json::from_value(args).map_err(|e| McpError::invalid_params(e.to_string(), None))
}

impl ServerHandler for MalServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "malapi".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "MyAnimeList API MCP Server - Search anime, look up details, rankings, \
                 seasonal listings and suggestions."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![
            Tool::new(
                "search_anime",
                "Search MyAnimeList anime by title. \
                 Omit fields for full records; pass fields to get only those (id and title always included).",
                Self::schema::<SearchParams>(),
            ),
            Tool::new(
                "get_anime_detail",
                "Fetch one anime by MyAnimeList id, including pictures, related entries, \
                 recommendations and statistics unless fields narrows the selection.",
                Self::schema::<DetailParams>(),
            ),
            Tool::new(
                "get_anime_ranking",
                "List top anime for a ranking type: all, airing, upcoming, tv, ova, movie, \
                 special, bypopularity, favorite.",
                Self::schema::<RankingParams>(),
            ),
            Tool::new(
                "get_seasonal_anime",
                "List anime that started airing in a year and season (winter, spring, summer, fall).",
                Self::schema::<SeasonalParams>(),
            ),
            Tool::new(
                "get_suggested_anime",
                "List anime suggested for the authenticated user. Requires an access token.",
                Self::schema::<SuggestionParams>(),
            ),
        ];

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::json!({}));

        match request.name.as_ref() {
            "search_anime" => self.handle_search(parse_args(args)?).await,
            "get_anime_detail" => self.handle_detail(parse_args(args)?).await,
            "get_anime_ranking" => self.handle_ranking(parse_args(args)?).await,
            "get_seasonal_anime" => self.handle_seasonal(parse_args(args)?).await,
            "get_suggested_anime" => self.handle_suggestions(parse_args(args)?).await,
            other => Err(McpError::invalid_params(
                format!("Unknown tool: {other}"),
                None,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(t) => &t.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn schema_generates_for_all_params() {
        assert!(!MalServer::schema::<SearchParams>().is_empty());
        assert!(!MalServer::schema::<DetailParams>().is_empty());
        assert!(!MalServer::schema::<RankingParams>().is_empty());
        assert!(!MalServer::schema::<SeasonalParams>().is_empty());
        assert!(!MalServer::schema::<SuggestionParams>().is_empty());
    }

    #[test]
    fn server_implements_handler() {
        fn assert_server_handler<T: ServerHandler>() {}
        assert_server_handler::<MalServer>();
    }

    #[test]
    fn server_info_has_correct_name() {
        let client = MalClient::new("test-client", None).unwrap();
        let info = MalServer::new(client).get_info();
        assert_eq!(info.server_info.name, "malapi");
    }

    #[tokio::test]
    async fn handle_search_returns_partial_records() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/anime"))
            .and(query_param("q", "bebop"))
            .and(query_param("fields", "mean"))
            .and(header("x-mal-client-id", "test-client"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"node": {"id": 1, "title": "Cowboy Bebop", "mean": 8.75}}],
                "paging": {}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = MalClient::with_base_url("test-client", None, &mock_server.uri()).unwrap();
        let server = MalServer::new(client);

        let params: SearchParams =
            serde_json::from_value(serde_json::json!({"q": "bebop", "fields": ["mean"]})).unwrap();
        let result = server.handle_search(params).await.unwrap();
        assert!(!result.is_error.unwrap_or(false));

        let records: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(records[0]["id"], 1);
        assert_eq!(records[0]["mean"], 8.75);
        assert!(records[0].get("genres").is_none());
    }

    #[tokio::test]
    async fn handle_detail_not_found_maps_to_resource_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/anime/999999"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": "not_found"
            })))
            .mount(&mock_server)
            .await;

        let client = MalClient::with_base_url("test-client", None, &mock_server.uri()).unwrap();
        let server = MalServer::new(client);

        let err = server
            .handle_detail(DetailParams {
                anime_id: 999_999,
                fields: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::RESOURCE_NOT_FOUND);
        assert!(err.message.contains("Not found"));
        assert!(err.message.contains("404"));
    }

    #[tokio::test]
    async fn handle_suggestions_without_token_is_invalid_params() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = MalClient::with_base_url("test-client", None, &mock_server.uri()).unwrap();
        let server = MalServer::new(client);

        let err = server
            .handle_suggestions(SuggestionParams::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("Access token required"));
    }

    #[tokio::test]
    async fn handle_ranking_defaults() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/anime/ranking"))
            .and(query_param("ranking_type", "all"))
            .and(query_param("limit", "100"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [],
                "paging": {}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = MalClient::with_base_url("test-client", None, &mock_server.uri()).unwrap();
        let server = MalServer::new(client);

        let params: RankingParams = serde_json::from_value(serde_json::json!({})).unwrap();
        let result = server.handle_ranking(params).await.unwrap();
        assert_eq!(text_of(&result), "[]");
    }

    #[tokio::test]
    async fn server_error_maps_to_internal_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = MalClient::with_base_url("test-client", None, &mock_server.uri()).unwrap();
        let server = MalServer::new(client);

        let params: SeasonalParams =
            serde_json::from_value(serde_json::json!({"year": 2023, "season": "fall"})).unwrap();
        let err = server.handle_seasonal(params).await.unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("Generic error occurred"));
        assert!(err.message.contains("503"));
    }
}
