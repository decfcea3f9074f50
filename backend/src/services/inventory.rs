//! Inventory service holding the product records the storefront reads and writes
//!
//! Records live in memory, keyed by `sku_no` and kept in insertion order.
//! Durable storage belongs to the external store this service stands in for.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    validate_product, PaginatedResponse, Pagination, PaginationMeta, ProductRecord, ShortDate,
};
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};

/// Shared handle to the in-memory product records
#[derive(Clone, Default)]
pub struct ProductStore {
    records: Arc<RwLock<Vec<ProductRecord>>>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Inventory service for reading and updating product records
#[derive(Clone)]
pub struct InventoryService {
    store: ProductStore,
}

/// Optional filters for listing products
#[derive(Debug, Default)]
pub struct ProductFilter {
    pub sold: Option<bool>,
    pub on_website: Option<bool>,
}

impl ProductFilter {
    fn matches(&self, record: &ProductRecord) -> bool {
        self.sold.map_or(true, |sold| record.sold == sold)
            && self
                .on_website
                .map_or(true, |listed| record.on_website == listed)
    }
}

/// Input for updating a product; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductInput {
    pub im_sku: Option<String>,
    pub item_description: Option<String>,
    pub quantity: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub purchase_price: Option<Decimal>,
    pub commission: Option<Decimal>,
    pub date_bought: Option<String>,
    pub date_sold: Option<String>,
    pub seller_name_address: Option<String>,
    pub invoice_no_xero: Option<String>,
    pub sold: Option<bool>,
    pub on_website: Option<bool>,
    pub location: Option<String>,
    pub photograph: Option<String>,
}

impl UpdateProductInput {
    fn apply(self, record: &mut ProductRecord) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(&mut record.im_sku, self.im_sku);
        set(&mut record.item_description, self.item_description);
        set(&mut record.quantity, self.quantity);
        set(&mut record.selling_price, self.selling_price);
        set(&mut record.purchase_price, self.purchase_price);
        set(&mut record.commission, self.commission);
        set(&mut record.date_bought, self.date_bought);
        set(&mut record.date_sold, self.date_sold);
        set(&mut record.seller_name_address, self.seller_name_address);
        set(&mut record.invoice_no_xero, self.invoice_no_xero);
        set(&mut record.sold, self.sold);
        set(&mut record.on_website, self.on_website);
        set(&mut record.location, self.location);
        set(&mut record.photograph, self.photograph);
    }
}

/// Result of flagging a batch of SKUs as sold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkSoldOutcome {
    pub marked: Vec<String>,
    pub not_found: Vec<String>,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(store: ProductStore) -> Self {
        Self { store }
    }

    /// List products, optionally filtered by the sold/listed flags
    pub async fn list(
        &self,
        filter: &ProductFilter,
        pagination: &Pagination,
    ) -> PaginatedResponse<ProductRecord> {
        let records = self.store.records.read().await;
        let matching: Vec<&ProductRecord> = records.iter().filter(|r| filter.matches(r)).collect();

        let meta = PaginationMeta::new(pagination, matching.len() as u64);
        let data = matching
            .into_iter()
            .skip(pagination.offset())
            .take(meta.per_page as usize)
            .cloned()
            .collect();

        PaginatedResponse {
            data,
            pagination: meta,
        }
    }

    pub async fn count(&self) -> usize {
        self.store.records.read().await.len()
    }

    /// Every record in insertion order
    pub async fn all(&self) -> Vec<ProductRecord> {
        self.store.records.read().await.clone()
    }

    /// Get a product by SKU
    pub async fn get(&self, sku_no: &str) -> AppResult<ProductRecord> {
        self.store
            .records
            .read()
            .await
            .iter()
            .find(|r| r.sku_no == sku_no)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Product {}", sku_no)))
    }

    /// Add a new product. The SKU must be unused and the record valid.
    pub async fn create(&self, record: ProductRecord) -> AppResult<ProductRecord> {
        ensure_sku(&record)?;
        let violations = validate_product(&record);
        if !violations.is_empty() {
            return Err(AppError::ValidationFailed(violations));
        }

        let mut records = self.store.records.write().await;
        if records.iter().any(|r| r.sku_no == record.sku_no) {
            return Err(AppError::DuplicateEntry(record.sku_no));
        }

        tracing::info!(sku_no = %record.sku_no, "Product created");
        records.push(record.clone());
        Ok(record)
    }

    /// Insert or replace a product by SKU. Returns true when it was new.
    ///
    /// Callers are expected to have validated the record.
    pub async fn upsert(&self, record: ProductRecord) -> AppResult<bool> {
        ensure_sku(&record)?;
        let mut records = self.store.records.write().await;
        match records.iter_mut().find(|r| r.sku_no == record.sku_no) {
            Some(existing) => {
                *existing = record;
                Ok(false)
            }
            None => {
                records.push(record);
                Ok(true)
            }
        }
    }

    /// Apply a partial update; the result must still validate
    pub async fn update(
        &self,
        sku_no: &str,
        input: UpdateProductInput,
    ) -> AppResult<ProductRecord> {
        let mut records = self.store.records.write().await;
        let existing = records
            .iter_mut()
            .find(|r| r.sku_no == sku_no)
            .ok_or_else(|| AppError::NotFound(format!("Product {}", sku_no)))?;

        let mut updated = existing.clone();
        input.apply(&mut updated);

        let violations = validate_product(&updated);
        if !violations.is_empty() {
            return Err(AppError::ValidationFailed(violations));
        }

        *existing = updated.clone();
        tracing::info!(sku_no = %sku_no, "Product updated");
        Ok(updated)
    }

    /// Flag every listed SKU as sold on `date`, all under one write lock
    pub async fn mark_sold(&self, sku_nos: &[&str], date: ShortDate) -> MarkSoldOutcome {
        let mut records = self.store.records.write().await;
        let mut outcome = MarkSoldOutcome::default();

        for sku_no in sku_nos {
            match records.iter_mut().find(|r| r.sku_no == *sku_no) {
                Some(record) => {
                    record.mark_sold(date);
                    outcome.marked.push(sku_no.to_string());
                }
                None => outcome.not_found.push(sku_no.to_string()),
            }
        }

        outcome
    }

    /// Load an array of product records from a JSON file. Invalid records are skipped.
    pub async fn load_seed(&self, path: &str) -> anyhow::Result<usize> {
        let raw = tokio::fs::read_to_string(path).await?;
        let records: Vec<ProductRecord> = serde_json::from_str(&raw)?;

        let mut loaded = 0;
        for record in records {
            let violations = validate_product(&record);
            if record.sku_no.is_empty() || !violations.is_empty() {
                tracing::warn!(
                    sku_no = %record.sku_no,
                    violations = violations.len(),
                    "Skipping invalid seed record"
                );
                continue;
            }
            self.upsert(record).await?;
            loaded += 1;
        }

        Ok(loaded)
    }
}

fn ensure_sku(record: &ProductRecord) -> AppResult<()> {
    if record.sku_no.trim().is_empty() {
        return Err(AppError::Validation {
            field: "sku_no".to_string(),
            message: "sku_no must not be empty".to_string(),
        });
    }
    Ok(())
}
