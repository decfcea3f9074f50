//! Inventory product records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{DateFormatError, ShortDate};

/// One inventory item with its commerce and provenance fields.
///
/// Field names are the wire names used by the storefront and the
/// spreadsheet import, so they must not be renamed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    /// Spreadsheet row the record was imported from. Positional only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_number: Option<u32>,

    pub sku_no: String,
    pub im_sku: String,

    pub item_description: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub purchase_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub commission: Decimal,

    /// Empty or `DD.MM.YY`
    pub date_bought: String,
    /// Empty or `DD.MM.YY`; only meaningful once `sold` is set
    pub date_sold: String,

    pub seller_name_address: String,
    pub invoice_no_xero: String,

    pub sold: bool,
    pub on_website: bool,

    pub location: String,
    pub photograph: String,
}

impl ProductRecord {
    /// A blank, unsold record for the given SKU
    pub fn new(sku_no: impl Into<String>) -> Self {
        Self {
            row_number: None,
            sku_no: sku_no.into(),
            im_sku: String::new(),
            item_description: String::new(),
            quantity: Decimal::ZERO,
            selling_price: Decimal::ZERO,
            purchase_price: Decimal::ZERO,
            commission: Decimal::ZERO,
            date_bought: String::new(),
            date_sold: String::new(),
            seller_name_address: String::new(),
            invoice_no_xero: String::new(),
            sold: false,
            on_website: false,
            location: String::new(),
            photograph: String::new(),
        }
    }

    pub fn date_bought(&self) -> Result<Option<ShortDate>, DateFormatError> {
        ShortDate::parse(&self.date_bought)
    }

    pub fn date_sold(&self) -> Result<Option<ShortDate>, DateFormatError> {
        ShortDate::parse(&self.date_sold)
    }

    /// Flag the item as sold on the given day
    pub fn mark_sold(&mut self, on: ShortDate) {
        self.sold = true;
        self.date_sold = on.to_string();
    }

    pub fn is_in_stock(&self) -> bool {
        !self.sold && self.quantity > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lamp_json() -> serde_json::Value {
        json!({
            "sku_no": "A1",
            "im_sku": "A1",
            "item_description": "Lamp",
            "quantity": 2,
            "selling_price": 40,
            "purchase_price": 15,
            "commission": 5,
            "date_bought": "01.01.24",
            "date_sold": "",
            "seller_name_address": "Jane, 1 Main St",
            "invoice_no_xero": "INV-1",
            "sold": false,
            "on_website": true,
            "location": "Shelf A",
            "photograph": "lamp.jpg"
        })
    }

    #[test]
    fn test_deserialize_without_row_number() {
        let record: ProductRecord = serde_json::from_value(lamp_json()).unwrap();
        assert_eq!(record.row_number, None);
        assert_eq!(record.quantity, Decimal::from(2));
        assert_eq!(record.selling_price, Decimal::from(40));
        assert!(record.on_website);
    }

    #[test]
    fn test_row_number_only_serialized_when_present() {
        let mut record: ProductRecord = serde_json::from_value(lamp_json()).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("row_number").is_none());
        assert_eq!(value["sku_no"], "A1");
        assert_eq!(value["selling_price"], 40.0);

        record.row_number = Some(7);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["row_number"], 7);
    }

    #[test]
    fn test_fractional_prices() {
        let mut value = lamp_json();
        value["selling_price"] = json!(12.5);
        let record: ProductRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.selling_price, Decimal::new(125, 1));
    }

    #[test]
    fn test_mark_sold() {
        let mut record = ProductRecord::new("B7");
        record.quantity = Decimal::ONE;
        assert!(record.is_in_stock());

        record.mark_sold(ShortDate { day: 9, month: 11, year: 24 });
        assert!(record.sold);
        assert_eq!(record.date_sold, "09.11.24");
        assert!(!record.is_in_stock());
        assert_eq!(record.date_sold().unwrap().map(|d| d.month), Some(11));
    }
}
