//! Label/tag print requests

use serde::{Deserialize, Serialize};

use super::ProductRecord;

/// A single request to print labels for a batch of products.
///
/// Built per print action and consumed once by the printer; never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrintRequest {
    /// Print order is list order
    pub products: Vec<ProductRecord>,
    pub customer_name: String,
    pub email_address: String,
    /// Flip `sold` on every listed product once printing succeeds
    pub mark_as_sold: bool,
    /// Copies per product
    pub copies: i32,
}

impl PrintRequest {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Products in print order, each repeated `copies` times with a
    /// 1-based copy number. Empty when `copies` is not positive.
    pub fn label_sequence(&self) -> impl Iterator<Item = (&ProductRecord, u32)> + '_ {
        let copies = u32::try_from(self.copies).unwrap_or(0);
        self.products
            .iter()
            .flat_map(move |product| (1..=copies).map(move |copy| (product, copy)))
    }

    pub fn label_count(&self) -> usize {
        self.products.len() * usize::try_from(self.copies).unwrap_or(0)
    }

    pub fn sku_numbers(&self) -> Vec<&str> {
        self.products.iter().map(|p| p.sku_no.as_str()).collect()
    }
}
