//! Server Implementation
//!
//! Router assembly, the middleware stack and the HTTP serve loop.

use std::net::SocketAddr;
use std::time::Instant;

use anyhow::Context;
use axum::error_handling::HandleErrorLayer;
use axum::{Router, middleware};
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::core::{Config, ServerState};
use crate::error::AppError;

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;
    tracing::info!(target: "http_access", latency_ms, "{} {} {}", method, uri, status);

    response
}

/// Convert middleware failures into the standard envelope
async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::internal("Request timed out")
    } else {
        AppError::internal(format!("Service failure: {}", err))
    }
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        // Operational
        .merge(crate::api::health::router())
        .merge(crate::api::portaria::router())
        // Data model APIs
        .merge(crate::api::users::router())
        .merge(crate::api::items::router())
        .merge(crate::api::reservas::router())
}

/// Attach state and the middleware stack
pub fn build_service(config: &Config, state: ServerState) -> Router {
    build_app()
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(ConcurrencyLimitLayer::new(config.max_connections))
                .layer(TimeoutLayer::new(config.request_timeout())),
        )
        // Tower HTTP middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // HTTP request log middleware
        .layer(middleware::from_fn(log_request))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (tests, embedded setups)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        // Create application state if not provided
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config),
        };

        let app = build_service(&self.config, state);

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.http_port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid bind address {}:{}",
                    self.config.host, self.config.http_port
                )
            })?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        tracing::info!("Portaria server listening on {}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .context("Server error")?;

        Ok(())
    }
}
