//! HTTP handlers for product records

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{validate_product, PaginatedResponse, Pagination, ProductRecord, Violation};

use crate::error::AppResult;
use crate::services::import_export::ImportReport;
use crate::services::inventory::{ProductFilter, UpdateProductInput};
use crate::services::{ImportExportService, InventoryService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub sold: Option<bool>,
    pub on_website: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// List products
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Json<PaginatedResponse<ProductRecord>> {
    let defaults = Pagination::default();
    let pagination = Pagination {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page),
    };
    let filter = ProductFilter {
        sold: query.sold,
        on_website: query.on_website,
    };

    let service = InventoryService::new(state.store);
    Json(service.list(&filter, &pagination).await)
}

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    Json(record): Json<ProductRecord>,
) -> AppResult<Json<ProductRecord>> {
    let service = InventoryService::new(state.store);
    let record = service.create(record).await?;
    Ok(Json(record))
}

/// Get a product by SKU
pub async fn get_product(
    State(state): State<AppState>,
    Path(sku_no): Path<String>,
) -> AppResult<Json<ProductRecord>> {
    let service = InventoryService::new(state.store);
    let record = service.get(&sku_no).await?;
    Ok(Json(record))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(sku_no): Path<String>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<ProductRecord>> {
    let service = InventoryService::new(state.store);
    let record = service.update(&sku_no, input).await?;
    Ok(Json(record))
}

/// Check a product record without storing it
pub async fn validate_product_record(Json(record): Json<ProductRecord>) -> Json<Vec<Violation>> {
    Json(validate_product(&record))
}

/// Import products from a CSV body
pub async fn import_products(
    State(state): State<AppState>,
    body: String,
) -> AppResult<Json<ImportReport>> {
    let service = ImportExportService::new(InventoryService::new(state.store));
    let report = service.import_csv(&body).await?;
    Ok(Json(report))
}

/// Export all products as CSV
pub async fn export_products(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = ImportExportService::new(InventoryService::new(state.store));
    let csv = service.export_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"products.csv\""),
        ],
        csv,
    ))
}
