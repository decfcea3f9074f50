//! HTTP handlers for print requests

use axum::{extract::State, Json};
use chrono::Utc;
use shared::{validate_print_request, PrintRequest, Violation};

use crate::error::AppResult;
use crate::services::{printing::PrintJob, InventoryService, PrintService};
use crate::AppState;

/// Submit a print request
pub async fn submit_print_request(
    State(state): State<AppState>,
    Json(request): Json<PrintRequest>,
) -> AppResult<Json<PrintJob>> {
    let service = PrintService::new(
        InventoryService::new(state.store),
        state.config.print.clone(),
    );
    let job = service.submit(request, Utc::now().date_naive()).await?;
    Ok(Json(job))
}

/// Check a print request without printing it
pub async fn validate_print(Json(request): Json<PrintRequest>) -> Json<Vec<Violation>> {
    Json(validate_print_request(&request))
}
