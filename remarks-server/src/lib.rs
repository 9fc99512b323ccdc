use actix_web::web;
use common::{reasons::ReasonSet, utils::SaveVariant};
use sqlx::AnyPool;

pub mod config;
pub mod error;
pub mod handlers;

use error::ApiError;

pub struct AppState {
    pub pool: AnyPool,
    pub save_variant: SaveVariant,
    pub reasons: ReasonSet,
}

/// Registers every route; shared by the binary and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into());

    cfg.app_data(json_config)
        .service(handlers::health_check)
        .service(handlers::list_customers)
        .service(handlers::list_reasons)
        .service(handlers::save_remarks);
}
