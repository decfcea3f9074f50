//! Spreadsheet import and export of product records
//!
//! The CSV layout uses the record field names as column headers. Imported rows
//! carry their spreadsheet row number (header is row 1).

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{validate_product, ProductRecord, Violation};

use crate::error::{AppError, AppResult};
use crate::services::inventory::InventoryService;

/// First spreadsheet row holding data; row 1 is the header
const FIRST_DATA_ROW: u32 = 2;

/// One spreadsheet row, every cell kept as text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductCsvRow {
    pub sku_no: String,
    pub im_sku: String,
    pub item_description: String,
    pub quantity: String,
    pub selling_price: String,
    pub purchase_price: String,
    pub commission: String,
    pub date_bought: String,
    pub date_sold: String,
    pub seller_name_address: String,
    pub invoice_no_xero: String,
    pub sold: String,
    pub on_website: String,
    pub location: String,
    pub photograph: String,
}

impl From<&ProductRecord> for ProductCsvRow {
    fn from(record: &ProductRecord) -> Self {
        Self {
            sku_no: record.sku_no.clone(),
            im_sku: record.im_sku.clone(),
            item_description: record.item_description.clone(),
            quantity: record.quantity.normalize().to_string(),
            selling_price: record.selling_price.normalize().to_string(),
            purchase_price: record.purchase_price.normalize().to_string(),
            commission: record.commission.normalize().to_string(),
            date_bought: record.date_bought.clone(),
            date_sold: record.date_sold.clone(),
            seller_name_address: record.seller_name_address.clone(),
            invoice_no_xero: record.invoice_no_xero.clone(),
            sold: record.sold.to_string(),
            on_website: record.on_website.to_string(),
            location: record.location.clone(),
            photograph: record.photograph.clone(),
        }
    }
}

impl ProductCsvRow {
    /// Convert to a record tagged with its spreadsheet row
    pub fn into_record(self, row_number: u32) -> Result<ProductRecord, String> {
        Ok(ProductRecord {
            row_number: Some(row_number),
            sku_no: self.sku_no.trim().to_string(),
            im_sku: self.im_sku.trim().to_string(),
            item_description: self.item_description.trim().to_string(),
            quantity: parse_number("quantity", &self.quantity)?,
            selling_price: parse_number("selling_price", &self.selling_price)?,
            purchase_price: parse_number("purchase_price", &self.purchase_price)?,
            commission: parse_number("commission", &self.commission)?,
            date_bought: self.date_bought.trim().to_string(),
            date_sold: self.date_sold.trim().to_string(),
            seller_name_address: self.seller_name_address.trim().to_string(),
            invoice_no_xero: self.invoice_no_xero.trim().to_string(),
            sold: parse_flag("sold", &self.sold)?,
            on_website: parse_flag("on_website", &self.on_website)?,
            location: self.location.trim().to_string(),
            photograph: self.photograph.trim().to_string(),
        })
    }
}

fn parse_number(field: &str, cell: &str) -> Result<Decimal, String> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(cell).map_err(|_| format!("{}: '{}' is not a number", field, cell))
}

fn parse_flag(field: &str, cell: &str) -> Result<bool, String> {
    match cell.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Ok(false),
        "true" | "yes" | "y" | "1" => Ok(true),
        other => Err(format!("{}: '{}' is not a yes/no value", field, other)),
    }
}

/// A row that was not imported
#[derive(Debug, Clone, Serialize)]
pub struct ImportRowError {
    pub row_number: u32,
    pub sku_no: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

/// Outcome of a spreadsheet import
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub created: usize,
    pub updated: usize,
    pub rejected: Vec<ImportRowError>,
}

/// Import/export service over the inventory
#[derive(Clone)]
pub struct ImportExportService {
    inventory: InventoryService,
}

impl ImportExportService {
    pub fn new(inventory: InventoryService) -> Self {
        Self { inventory }
    }

    /// Parse CSV rows and upsert every valid one by SKU
    pub async fn import_csv(&self, text: &str) -> AppResult<ImportReport> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::Import(format!("unreadable header row: {}", e)))?
            .clone();
        if !headers.iter().any(|h| h == "sku_no") {
            return Err(AppError::Import("missing sku_no column".to_string()));
        }

        let mut report = ImportReport::default();
        let mut last_row = FIRST_DATA_ROW - 1;
        for result in reader.records() {
            // Row number is the line the record starts on
            let position = match &result {
                Ok(record) => record.position(),
                Err(e) => e.position(),
            };
            let row_number = position.map_or(last_row + 1, |p| p.line() as u32);
            last_row = row_number;

            let row: csv::Result<ProductCsvRow> =
                result.and_then(|record| record.deserialize(Some(&headers)));
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    report.rejected.push(ImportRowError {
                        row_number,
                        sku_no: String::new(),
                        message: format!("unreadable row: {}", e),
                        violations: Vec::new(),
                    });
                    continue;
                }
            };

            let sku_no = row.sku_no.trim().to_string();
            let record = match row.into_record(row_number) {
                Ok(record) => record,
                Err(message) => {
                    report.rejected.push(ImportRowError {
                        row_number,
                        sku_no,
                        message,
                        violations: Vec::new(),
                    });
                    continue;
                }
            };

            if record.sku_no.is_empty() {
                report.rejected.push(ImportRowError {
                    row_number,
                    sku_no,
                    message: "sku_no is empty".to_string(),
                    violations: Vec::new(),
                });
                continue;
            }

            let violations = validate_product(&record);
            if !violations.is_empty() {
                report.rejected.push(ImportRowError {
                    row_number,
                    sku_no,
                    message: "record failed validation".to_string(),
                    violations,
                });
                continue;
            }

            if self.inventory.upsert(record).await? {
                report.created += 1;
            } else {
                report.updated += 1;
            }
        }

        tracing::info!(
            created = report.created,
            updated = report.updated,
            rejected = report.rejected.len(),
            "Spreadsheet import finished"
        );

        Ok(report)
    }

    /// Export every record as CSV, in inventory order
    pub async fn export_csv(&self) -> AppResult<String> {
        let records = self.inventory.all().await;
        let rows: Vec<ProductCsvRow> = records.iter().map(ProductCsvRow::from).collect();
        Self::export_to_csv(&rows)
    }

    /// Serialize rows as CSV text with a header line
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::inventory::ProductStore;

    const HEADER: &str = "sku_no,im_sku,item_description,quantity,selling_price,purchase_price,commission,date_bought,date_sold,seller_name_address,invoice_no_xero,sold,on_website,location,photograph";

    fn service() -> ImportExportService {
        ImportExportService::new(InventoryService::new(ProductStore::new()))
    }

    #[tokio::test]
    async fn test_import_assigns_row_numbers() {
        let text = format!(
            "{}\nA1,A1,Lamp,2,40,15,5,01.01.24,,\"Jane, 1 Main St\",INV-1,false,true,Shelf A,lamp.jpg\nB2,B2,Chair,1,120.50,60,10,,,Bob,INV-2,no,yes,Shelf B,chair.jpg\n",
            HEADER
        );
        let svc = service();
        let report = svc.import_csv(&text).await.unwrap();

        assert_eq!(report.created, 2);
        assert!(report.rejected.is_empty());

        let lamp = svc.inventory.get("A1").await.unwrap();
        assert_eq!(lamp.row_number, Some(2));
        assert_eq!(lamp.seller_name_address, "Jane, 1 Main St");
        assert!(lamp.on_website);

        let chair = svc.inventory.get("B2").await.unwrap();
        assert_eq!(chair.row_number, Some(3));
        assert_eq!(chair.selling_price, Decimal::new(12050, 2));
        assert!(!chair.sold);
    }

    #[tokio::test]
    async fn test_import_rejects_bad_rows_and_keeps_good_ones() {
        let text = format!(
            "{}\nA1,,Lamp,-1,40,15,5,,,,,false,false,,\n,,No sku,1,1,1,1,,,,,false,false,,\nC3,,Clock,one,1,1,1,,,,,false,false,,\nD4,,Desk,1,1,1,1,2024-01-01,,,,false,false,,\nE5,,Vase,1,1,1,1,,,,,maybe,false,,\nF6,,Mirror,1,1,1,1,,,,,true,false,,\nG7,,Rug,3,1,1,1,,,,,false,false,,\n",
            HEADER
        );
        let svc = service();
        let report = svc.import_csv(&text).await.unwrap();

        assert_eq!(report.created, 1);
        let rejected: Vec<u32> = report.rejected.iter().map(|r| r.row_number).collect();
        assert_eq!(rejected, vec![2, 3, 4, 5, 6, 7]);
        assert_eq!(report.rejected[0].violations.len(), 1);
        assert!(svc.inventory.get("G7").await.is_ok());
    }

    #[tokio::test]
    async fn test_import_requires_sku_column() {
        let svc = service();
        assert!(matches!(
            svc.import_csv("name,price\nLamp,4\n").await,
            Err(AppError::Import(_))
        ));
    }

    #[tokio::test]
    async fn test_import_updates_existing_sku() {
        let svc = service();
        let first = format!("{}\nA1,,Lamp,1,40,15,5,,,,,false,false,Shelf A,\n", HEADER);
        let second = format!("{}\nA1,,Lamp,1,45,15,5,,,,,false,false,Shelf C,\n", HEADER);
        svc.import_csv(&first).await.unwrap();
        let report = svc.import_csv(&second).await.unwrap();

        assert_eq!(report.updated, 1);
        let lamp = svc.inventory.get("A1").await.unwrap();
        assert_eq!(lamp.location, "Shelf C");
        assert_eq!(lamp.selling_price, Decimal::from(45));
    }

    #[tokio::test]
    async fn test_export_then_reimport() {
        let svc = service();
        let mut record = ProductRecord::new("A1");
        record.item_description = "Lamp, brass".to_string();
        record.selling_price = Decimal::new(4050, 2);
        record.quantity = Decimal::from(2);
        record.sold = true;
        record.date_sold = "02.03.24".to_string();
        svc.inventory.create(record).await.unwrap();

        let exported = svc.export_csv().await.unwrap();
        assert!(exported.starts_with(HEADER));
        assert!(exported.contains("\"Lamp, brass\""));
        assert!(exported.contains("40.5"));

        let other = service();
        let report = other.import_csv(&exported).await.unwrap();
        assert_eq!(report.created, 1);
        let lamp = other.inventory.get("A1").await.unwrap();
        assert_eq!(lamp.selling_price, Decimal::new(405, 1));
        assert!(lamp.sold);
        assert_eq!(lamp.date_sold, "02.03.24");
    }

    #[tokio::test]
    async fn test_row_numbers_follow_spreadsheet_lines() {
        let text = "sku_no,item_description\nA1,Lamp\n\nB2,\"two\nlines\"\nC3,Clock\n";
        let svc = service();
        let report = svc.import_csv(text).await.unwrap();
        assert_eq!(report.created, 3);

        let rows: Vec<(String, Option<u32>)> = svc
            .inventory
            .all()
            .await
            .into_iter()
            .map(|r| (r.sku_no, r.row_number))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("A1".to_string(), Some(2)),
                ("B2".to_string(), Some(4)),
                ("C3".to_string(), Some(6)),
            ]
        );
        assert_eq!(svc.inventory.get("B2").await.unwrap().item_description, "two\nlines");
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("sold", " TRUE "), Ok(true));
        assert_eq!(parse_flag("sold", "Y"), Ok(true));
        assert_eq!(parse_flag("sold", ""), Ok(false));
        assert!(parse_flag("sold", "perhaps").is_err());
    }
}
