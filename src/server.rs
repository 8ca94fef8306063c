use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{error, info};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "car-scout" }))
}

/// Liveness endpoint, spawned next to the scrape loop. Bind or serve
/// errors are logged rather than taking the scraper down with them.
pub async fn serve(port: u16) {
    let app = Router::new().route("/health", get(health));
    let addr = format!("0.0.0.0:{port}");

    match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => {
            info!("Health endpoint listening on {}", addr);
            if let Err(error) = axum::serve(listener, app).await {
                error!("Health endpoint failed: {}", error);
            }
        }
        Err(error) => error!("Could not bind health endpoint on {}: {}", addr, error),
    }
}
