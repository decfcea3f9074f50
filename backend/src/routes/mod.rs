//! Route definitions for the Stocktag API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/products", product_routes())
        .nest("/print", print_routes())
}

/// Product record routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route("/validate", post(handlers::validate_product_record))
        .route("/import", post(handlers::import_products))
        .route("/export", get(handlers::export_products))
        .route(
            "/:sku_no",
            get(handlers::get_product).patch(handlers::update_product),
        )
}

/// Print request routes
fn print_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::submit_print_request))
        .route("/validate", post(handlers::validate_print))
}
