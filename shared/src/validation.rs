//! Validation utilities for inventory records and print requests
//!
//! Record validators never fail: they collect every problem they find and leave
//! the decision to block an operation to the caller.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PrintRequest, ProductRecord};
use crate::types::{DateFormatError, ShortDate};

/// Category of a validation problem
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    NegativeQuantity,
    InvalidDate,
    MissingSoldDate,
    EmptyBatch,
    InvalidCopies,
    InvalidEmail,
}

/// One validation problem, tied to the field that caused it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    fn nested(mut self, prefix: &str) -> Self {
        self.field = format!("{}.{}", prefix, self.field);
        self
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// ============================================================================
// Product Validations
// ============================================================================

/// Parse a record date field (`DD.MM.YY` or empty)
pub fn parse_date(s: &str) -> Result<Option<ShortDate>, DateFormatError> {
    ShortDate::parse(s)
}

/// Validate a product record
pub fn validate_product(record: &ProductRecord) -> Vec<Violation> {
    let mut violations = Vec::new();

    if record.quantity < Decimal::ZERO {
        violations.push(Violation::new(
            "quantity",
            ViolationKind::NegativeQuantity,
            "Quantity cannot be negative",
        ));
    }

    for (field, value) in [
        ("date_bought", &record.date_bought),
        ("date_sold", &record.date_sold),
    ] {
        if let Err(e) = parse_date(value) {
            violations.push(Violation::new(field, ViolationKind::InvalidDate, e.to_string()));
        }
    }

    // Assumed policy: a sold item records when it sold
    if record.sold && record.date_sold.is_empty() {
        violations.push(Violation::new(
            "date_sold",
            ViolationKind::MissingSoldDate,
            "Sold items must have a date_sold",
        ));
    }

    violations
}

// ============================================================================
// Print Request Validations
// ============================================================================

/// Validate email shape: exactly one `@` with text on both sides.
///
/// Stricter than a bare single-separator check: `a@` and `@b` are rejected.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err("Email address must contain a single '@' separator"),
    }
}

/// Validate copy count (must be at least 1)
pub fn validate_copies(copies: i32) -> Result<(), &'static str> {
    if copies < 1 {
        return Err("Copies must be at least 1");
    }
    Ok(())
}

/// Validate a print request, including every product in the batch
pub fn validate_print_request(request: &PrintRequest) -> Vec<Violation> {
    let mut violations = Vec::new();

    if request.products.is_empty() {
        violations.push(Violation::new(
            "products",
            ViolationKind::EmptyBatch,
            "A print request needs at least one product",
        ));
    }

    if let Err(msg) = validate_copies(request.copies) {
        violations.push(Violation::new("copies", ViolationKind::InvalidCopies, msg));
    }

    if let Err(msg) = validate_email(&request.email_address) {
        violations.push(Violation::new("email_address", ViolationKind::InvalidEmail, msg));
    }

    for (i, product) in request.products.iter().enumerate() {
        let prefix = format!("products[{}]", i);
        violations.extend(
            validate_product(product)
                .into_iter()
                .map(|v| v.nested(&prefix)),
        );
    }

    violations
}
