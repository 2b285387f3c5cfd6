//! Liveness probe

use actix_web::{HttpResponse, Responder, get};

/// GET /v1/health
#[get("")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "UP"}))
}
