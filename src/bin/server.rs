//! Combi Engine HTTP Server

use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use combi_engine::request::{handle, GenerationRequest};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn generate(Json(request): Json<GenerationRequest>) -> impl IntoResponse {
    // Generation is CPU bound and exponential in the OR group sizes
    let response = match tokio::task::spawn_blocking(move || handle(request)).await {
        Ok(response) => response,
        Err(e) => {
            log::error!("Generation task failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "success": false, "error": e.to_string() })),
            );
        }
    };

    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    let body = serde_json::to_value(&response).unwrap_or_else(|e| {
        serde_json::json!({ "success": false, "error": e.to_string() })
    });
    (status, Json(body))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/generate", post(generate))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8087));
    log::info!("Combi Engine Server listening on http://{}", addr);
    println!("Combi Engine Server listening on http://{}", addr);
    println!("  Health check: GET  /health");
    println!("  Generation:   POST /api/v1/generate");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
