use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::core::traits::PersistenceStore;
use crate::modules::bills::repositories::SETTINGS;

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

/// Readiness probe response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub store: bool,
}

/// GET /health - Liveness probe
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: env!("CARGO_PKG_NAME").to_string(),
    })
}

/// GET /ready - Readiness probe, checks the document store answers reads
pub async fn readiness_check(store: web::Data<Arc<dyn PersistenceStore>>) -> impl Responder {
    let store_ok = match store.get(SETTINGS, "payment").await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!("Store readiness check failed: {}", e);
            false
        }
    };

    let response = ReadinessResponse {
        ready: store_ok,
        store: store_ok,
    };

    if store_ok {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
