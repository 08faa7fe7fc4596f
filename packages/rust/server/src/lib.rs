//! HTTP shell around the campaign agents.
//!
//! Serves health and agent metadata, and exposes the file review tool over
//! JSON so it can be exercised without an agent runtime.

pub mod routes;
pub mod state;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use campaign_shared::{AppConfig, CampaignError, PORT_ENV, Result};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Campaign HTTP server.
pub struct Server {
    host: String,
    port: u16,
    allow_origins: Vec<String>,
    state: AppState,
}

impl Server {
    /// Build from config. `PORT` in the environment overrides the configured port.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let env_port = std::env::var(PORT_ENV).ok();
        Ok(Self {
            host: config.server.host.clone(),
            port: config.server.resolve_port(env_port.as_deref()),
            allow_origins: config.server.allow_origins.clone(),
            state: AppState::new(config)?,
        })
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> Result<()> {
        let addr = self.address();
        let router = build_router(self.state, &self.allow_origins)?;

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| CampaignError::Server(format!("failed to bind {addr}: {e}")))?;

        tracing::info!("campaign API listening on http://{addr}");

        axum::serve(listener, router)
            .await
            .map_err(|e| CampaignError::Server(e.to_string()))
    }
}

/// Assemble routes and middleware.
pub fn build_router(state: AppState, allow_origins: &[String]) -> Result<Router> {
    let cors = cors_layer(allow_origins)?;

    Ok(Router::new()
        .route("/health", get(routes::health_check))
        .route("/agent-info", get(routes::agent_info))
        .route("/tools/file-review", post(routes::file_review))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// `*` anywhere in the list allows every origin.
fn cors_layer(allow_origins: &[String]) -> Result<CorsLayer> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allow_origins.is_empty() || allow_origins.iter().any(|o| o == "*") {
        return Ok(cors.allow_origin(Any));
    }

    let origins = allow_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o)
                .map_err(|e| CampaignError::config(format!("invalid CORS origin '{o}': {e}")))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(cors.allow_origin(origins))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use campaign_shared::IngestConfig;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn app() -> Router {
        let state = AppState::new(&AppConfig::default()).unwrap();
        build_router(state, &["*".to_string()]).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"status": "Api is running"}));
    }

    #[tokio::test]
    async fn agent_info_describes_root() {
        let response = app()
            .oneshot(Request::get("/agent-info").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["name"], "campaign_agent");
        assert_eq!(body["model"], AppConfig::default().agents.model.as_str());
        assert_eq!(body["tools"], json!([]));
    }

    #[tokio::test]
    async fn agent_info_fallback() {
        let state = AppState::without_agents(IngestConfig::default()).unwrap();
        let router = build_router(state, &[]).unwrap();
        let response = router
            .oneshot(Request::get("/agent-info").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            json_body(response).await,
            json!({
                "name": "Agent",
                "description": "Default agent description",
                "model": "Unknown",
                "tools": [],
            })
        );
    }

    #[tokio::test]
    async fn file_review_returns_blob_and_summaries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notes.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("tone: bold"))
            .mount(&server)
            .await;

        let payload = json!({
            "file_urls": [
                format!("{}/notes.txt", server.uri()),
                format!("{}/gone.pdf", server.uri()),
            ]
        });
        let request = Request::post("/tools/file-review")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let text = body["text"].as_str().unwrap();
        assert!(text.starts_with("\n--- notes.txt [RAW TEXT] ---\ntone: bold\n"));
        assert!(text.contains("\n[Error reading gone.pdf]: "));
        assert_eq!(body["files"][0]["format"], "raw");
        assert_eq!(body["files"][1]["format"], "pdf");
        assert!(body["files"][1]["error"].is_string());
    }

    #[tokio::test]
    async fn file_review_rejects_malformed_body() {
        let request = Request::post("/tools/file-review")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"urls": "nope"}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let request = Request::get("/health")
            .header(header::ORIGIN, "https://studio.example")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn cors_with_explicit_origins() {
        let state = AppState::new(&AppConfig::default()).unwrap();
        let router = build_router(state, &["https://studio.example".to_string()]).unwrap();
        let request = Request::get("/health")
            .header(header::ORIGIN, "https://studio.example")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://studio.example"
        );
    }

    #[test]
    fn invalid_origin_is_config_error() {
        let err = cors_layer(&["bad\norigin".to_string()]).unwrap_err();
        assert!(matches!(err, CampaignError::Config { .. }));
    }

    #[test]
    fn address_uses_overrides() {
        let server = Server::new(&AppConfig::default())
            .unwrap()
            .with_host("127.0.0.1")
            .with_port(9999);
        assert_eq!(server.address(), "127.0.0.1:9999");
    }
}
