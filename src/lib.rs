pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::config::Config;
use crate::services::{offer_service::OfferService, offer_store::OfferStore};

#[derive(Clone)]
pub struct AppState {
    pub offer_service: OfferService,
}

impl AppState {
    pub fn new(store: Arc<dyn OfferStore>, config: &Config) -> Self {
        let offer_service =
            OfferService::new(store, config.positions_cache_ttl, config.offers_cache_ttl);
        Self { offer_service }
    }

    pub fn with_service(offer_service: OfferService) -> Self {
        Self { offer_service }
    }
}

/// Every route the service exposes, without transport layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/offers", get(routes::offers::list_offers))
        .route("/api/offers/positions", get(routes::offers::list_positions))
        .route("/api/offers/metrics", get(routes::offers::get_metrics))
        .route("/api/offers/export/xlsx", get(routes::export::export_xlsx))
        .route("/api/offers/export/pdf", get(routes::export::export_pdf))
        .with_state(state)
}
