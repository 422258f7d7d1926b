use anyhow::{Context as _, Result, anyhow};
use axum::{
    Router,
    extract::Request,
    http::{self, HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
};
use log::{error, info};
use tokio::signal;
use tower_http::{
    LatencyUnit,
    cors::CorsLayer,
    trace::{DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info_span};

use crate::{app_state::AppState, errors::not_found_error};

mod audit_rule;
mod fetch_history;
mod fetch_redline;
mod fetch_version;
mod list_rules;
mod ping;
pub mod responses;

/// Builds the JSON API around an already initialised state.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping::ping))
        .route("/rules", get(list_rules::list_rules))
        .route(
            "/rules/:rule_id/versions",
            get(fetch_history::fetch_history),
        )
        .route("/rules/:rule_id/audit", post(audit_rule::audit_rule))
        .route(
            "/rules/:rule_id/redline",
            get(fetch_redline::fetch_redline),
        )
        .route(
            "/versions/:version_id",
            get(fetch_version::fetch_version),
        )
        .fallback(handler_404)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    info_span!(
                        "http_request",
                        method = ?request.method(),
                        uri = ?request.uri(),
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(HeaderValue::from_static("*"))
                .allow_headers([http::header::CONTENT_TYPE])
                .allow_methods([Method::GET, Method::POST]),
        )
        .with_state(app_state)
}

pub async fn create_server(app_state: AppState) -> Result<()> {
    let address = format!(
        "{}:{}",
        &app_state.config.server.host, &app_state.config.server.port
    );

    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(address.clone())
        .await
        .with_context(|| format!("Failed to bind to address: {address}"))?;

    info!(
        "Listening on http://{}",
        listener
            .local_addr()
            .context("Failed to get local address")?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .tcp_nodelay(true)
        .await
        .context("Failed to start server")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                error!("Failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down");
}

async fn handler_404() -> impl IntoResponse { not_found_error(anyhow!("Page not found")) }
