use axum::{
    body::Body,
    http::Request,
    routing::{get, post},
    Router,
};
use configuration::ServerSettings;
use dashboard::Dashboard;
use dataset::DatasetStore;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
}

impl AppState {
    pub fn new(store: Arc<DatasetStore>) -> Self {
        Self {
            dashboard: Dashboard::new(store),
        }
    }
}

/// Builds the router with every API route and middleware attached.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "request",
            id = %Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/tickers", get(handlers::get_tickers))
        .route("/api/benchmark-options", get(handlers::get_benchmark_options))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/charts/:kind", get(handlers::get_chart))
        .route("/api/date-range", post(handlers::post_date_range))
        .with_state(state)
        .layer(cors)
        .layer(trace)
}

/// Serves the dashboard API over the given store until the process exits.
pub async fn run_server(settings: &ServerSettings, store: Arc<DatasetStore>) -> anyhow::Result<()> {
    let addr = settings.socket_addr()?;
    let state = Arc::new(AppState::new(store));
    let app = router(state);

    tracing::info!(%addr, "Web server started and listening.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
