//! Web chat surface: a single page plus a streaming chat endpoint.
//!
//! Routes:
//! - `GET  /`             page with the chat log, sliders and example prompts
//! - `GET  /api/settings` slider ranges, examples and model info
//! - `POST /api/chat`     one turn as Server-Sent Events (`status`, `partial`, `error`)
//! - `GET  /healthz`      liveness

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::Request;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use renshu_observability::http_request_span;
use renshu_runtime::{Responder, SamplingParams};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, Span};


/// Shared by every request; turns themselves keep no state here.
#[derive(Clone)]
pub struct AppState {
    responder: Arc<Responder>,
    defaults: SamplingParams,
}

impl AppState {
    pub fn new(responder: Arc<Responder>, defaults: SamplingParams) -> Self {
        Self {
            responder,
            defaults: defaults.clamped(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request| {
            http_request_span!(request.method(), request.uri().path())
        })
        .on_response(|response: &Response, latency: Duration, span: &Span| {
            span.record("http.status_code", response.status().as_u16());
            tracing::debug!(parent: span, latency_ms = latency.as_millis() as u64, "Response sent");
        });

    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(handlers::health))
        .route("/api/settings", get(handlers::settings))
        .route("/api/chat", post(handlers::chat))
        .layer(trace)
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, "Renshu web UI listening");
    println!("Renshu is ready: http://{local}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
