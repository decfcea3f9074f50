//! Business logic services for the Stocktag server

pub mod import_export;
pub mod inventory;
pub mod printing;

pub use import_export::ImportExportService;
pub use inventory::InventoryService;
pub use printing::PrintService;
