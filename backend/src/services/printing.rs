//! Print service turning print requests into label jobs
//!
//! Laying out and sending the labels to a device is the printer driver's job.
//! This service validates the request, fixes the label order, and hands the
//! mark-as-sold instruction back to the inventory.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{validate_print_request, PrintRequest, ShortDate};
use uuid::Uuid;

use crate::config::PrintConfig;
use crate::error::{AppError, AppResult};
use crate::services::inventory::InventoryService;

/// One physical label in a print job
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PrintLabel {
    /// 1-based position in the job
    pub sequence: u32,
    /// 1-based copy number for this product
    pub copy: u32,
    pub sku_no: String,
    pub im_sku: String,
    pub item_description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_price: Decimal,
    pub location: String,
    pub photograph: String,
}

/// A validated print request ready for the printer driver
#[derive(Debug, Clone, Serialize)]
pub struct PrintJob {
    pub id: Uuid,
    pub customer_name: String,
    pub email_address: String,
    pub copies: i32,
    pub labels: Vec<PrintLabel>,
    /// SKUs flagged as sold in the inventory
    pub marked_sold: Vec<String>,
    /// SKUs in the request the inventory does not hold
    pub not_found_skus: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Print service
#[derive(Clone)]
pub struct PrintService {
    inventory: InventoryService,
    config: PrintConfig,
}

impl PrintService {
    pub fn new(inventory: InventoryService, config: PrintConfig) -> Self {
        Self { inventory, config }
    }

    /// Validate a request and build its print job. When `mark_as_sold` is set
    /// every product in the batch is flagged sold on `today`.
    pub async fn submit(&self, request: PrintRequest, today: NaiveDate) -> AppResult<PrintJob> {
        let violations = validate_print_request(&request);
        if !violations.is_empty() {
            return Err(AppError::ValidationFailed(violations));
        }

        if request.copies > self.config.max_copies {
            return Err(AppError::Validation {
                field: "copies".to_string(),
                message: format!("At most {} copies per request", self.config.max_copies),
            });
        }

        let labels: Vec<PrintLabel> = request
            .label_sequence()
            .zip(1u32..)
            .map(|((product, copy), sequence)| PrintLabel {
                sequence,
                copy,
                sku_no: product.sku_no.clone(),
                im_sku: product.im_sku.clone(),
                item_description: product.item_description.clone(),
                selling_price: product.selling_price,
                location: product.location.clone(),
                photograph: product.photograph.clone(),
            })
            .collect();

        let (marked_sold, not_found_skus) = if request.mark_as_sold {
            let outcome = self
                .inventory
                .mark_sold(&request.sku_numbers(), ShortDate::from(today))
                .await;
            if !outcome.not_found.is_empty() {
                tracing::warn!(
                    skus = ?outcome.not_found,
                    "Print request lists products the inventory does not hold"
                );
            }
            (outcome.marked, outcome.not_found)
        } else {
            (Vec::new(), Vec::new())
        };

        let job = PrintJob {
            id: Uuid::new_v4(),
            customer_name: request.customer_name,
            email_address: request.email_address,
            copies: request.copies,
            labels,
            marked_sold,
            not_found_skus,
            created_at: Utc::now(),
        };

        tracing::info!(
            job_id = %job.id,
            labels = job.labels.len(),
            marked_sold = job.marked_sold.len(),
            "Print job created"
        );

        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::inventory::ProductStore;
    use shared::{ProductRecord, ViolationKind};

    fn lamp() -> ProductRecord {
        ProductRecord {
            row_number: None,
            sku_no: "A1".to_string(),
            im_sku: "A1".to_string(),
            item_description: "Lamp".to_string(),
            quantity: Decimal::from(2),
            selling_price: Decimal::from(40),
            purchase_price: Decimal::from(15),
            commission: Decimal::from(5),
            date_bought: "01.01.24".to_string(),
            date_sold: String::new(),
            seller_name_address: "Jane, 1 Main St".to_string(),
            invoice_no_xero: "INV-1".to_string(),
            sold: false,
            on_website: true,
            location: "Shelf A".to_string(),
            photograph: "lamp.jpg".to_string(),
        }
    }

    fn request(products: Vec<ProductRecord>, mark_as_sold: bool, copies: i32) -> PrintRequest {
        PrintRequest {
            products,
            customer_name: "Jane Doe".to_string(),
            email_address: "jane@example.com".to_string(),
            mark_as_sold,
            copies,
        }
    }

    async fn service_with(records: Vec<ProductRecord>) -> (PrintService, InventoryService) {
        let inventory = InventoryService::new(ProductStore::new());
        for record in records {
            inventory.create(record).await.unwrap();
        }
        (
            PrintService::new(inventory.clone(), PrintConfig { max_copies: 10 }),
            inventory,
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[tokio::test]
    async fn test_mark_as_sold_updates_inventory() {
        let (printer, inventory) = service_with(vec![lamp()]).await;

        let job = printer
            .submit(request(vec![lamp()], true, 2), today())
            .await
            .unwrap();

        assert_eq!(job.labels.len(), 2);
        assert_eq!(job.marked_sold, vec!["A1".to_string()]);
        assert!(job.not_found_skus.is_empty());

        let stored = inventory.get("A1").await.unwrap();
        assert!(stored.sold);
        assert_eq!(stored.date_sold, "15.06.24");
        assert!(shared::validate_product(&stored).is_empty());
    }

    #[tokio::test]
    async fn test_without_mark_as_sold_inventory_is_untouched() {
        let (printer, inventory) = service_with(vec![lamp()]).await;

        let job = printer
            .submit(request(vec![lamp()], false, 1), today())
            .await
            .unwrap();

        assert!(job.marked_sold.is_empty());
        assert!(!inventory.get("A1").await.unwrap().sold);
    }

    #[tokio::test]
    async fn test_labels_follow_product_order() {
        let mut chair = lamp();
        chair.sku_no = "B2".to_string();
        chair.item_description = "Chair".to_string();
        let (printer, _) = service_with(vec![]).await;

        let job = printer
            .submit(request(vec![chair, lamp()], false, 3), today())
            .await
            .unwrap();

        let order: Vec<(u32, &str, u32)> = job
            .labels
            .iter()
            .map(|l| (l.sequence, l.sku_no.as_str(), l.copy))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, "B2", 1),
                (2, "B2", 2),
                (3, "B2", 3),
                (4, "A1", 1),
                (5, "A1", 2),
                (6, "A1", 3),
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_products_are_reported() {
        let (printer, _) = service_with(vec![]).await;

        let job = printer
            .submit(request(vec![lamp()], true, 1), today())
            .await
            .unwrap();

        assert!(job.marked_sold.is_empty());
        assert_eq!(job.not_found_skus, vec!["A1".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected() {
        let (printer, inventory) = service_with(vec![lamp()]).await;

        match printer.submit(request(vec![], true, 0), today()).await {
            Err(AppError::ValidationFailed(violations)) => {
                let kinds: Vec<ViolationKind> = violations.iter().map(|v| v.kind).collect();
                assert_eq!(kinds, vec![ViolationKind::EmptyBatch, ViolationKind::InvalidCopies]);
            }
            other => panic!("expected validation failure, got {:?}", other.map(|j| j.id)),
        }
        assert!(!inventory.get("A1").await.unwrap().sold);
    }

    #[tokio::test]
    async fn test_copies_above_limit() {
        let (printer, _) = service_with(vec![lamp()]).await;

        let result = printer.submit(request(vec![lamp()], false, 11), today()).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
