//! Common types used across the platform

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading a `DD.MM.YY` date string
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateFormatError {
    #[error("date '{0}' is not in DD.MM.YY format")]
    Format(String),

    #[error("date '{0}' is not a calendar date")]
    Calendar(String),
}

/// A day/month/two-digit-year date as written on inventory records.
///
/// The string form `DD.MM.YY` carries no century. Two-digit years are read as
/// `2000 + YY` whenever a full calendar date is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShortDate {
    pub day: u8,
    pub month: u8,
    pub year: u8,
}

impl ShortDate {
    pub const CENTURY: i32 = 2000;

    /// Parse a record date field.
    ///
    /// Returns `Ok(None)` for the empty string (date unknown or unset),
    /// `Ok(Some(..))` for a well-formed `DD.MM.YY` value.
    pub fn parse(s: &str) -> Result<Option<Self>, DateFormatError> {
        if s.is_empty() {
            return Ok(None);
        }

        let bytes = s.as_bytes();
        if bytes.len() != 8 || bytes[2] != b'.' || bytes[5] != b'.' {
            return Err(DateFormatError::Format(s.to_string()));
        }

        let day = two_digits(&bytes[0..2]).ok_or_else(|| DateFormatError::Format(s.to_string()))?;
        let month =
            two_digits(&bytes[3..5]).ok_or_else(|| DateFormatError::Format(s.to_string()))?;
        let year = two_digits(&bytes[6..8]).ok_or_else(|| DateFormatError::Format(s.to_string()))?;

        let date = Self { day, month, year };
        if date.to_naive_date().is_none() {
            return Err(DateFormatError::Calendar(s.to_string()));
        }
        Ok(Some(date))
    }

    /// Full calendar date, reading the year as `20YY`
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            Self::CENTURY + i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
    }
}

fn two_digits(pair: &[u8]) -> Option<u8> {
    match pair {
        [tens @ b'0'..=b'9', ones @ b'0'..=b'9'] => Some((tens - b'0') * 10 + (ones - b'0')),
        _ => None,
    }
}

impl From<NaiveDate> for ShortDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            day: date.day() as u8,
            month: date.month() as u8,
            year: date.year().rem_euclid(100) as u8,
        }
    }
}

impl fmt::Display for ShortDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:02}", self.day, self.month, self.year)
    }
}

/// Pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

impl Pagination {
    /// Zero-based offset of the first item on this page
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.per_page.max(1) as usize
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(pagination: &Pagination, total_items: u64) -> Self {
        let per_page = pagination.per_page.max(1);
        Self {
            page: pagination.page.max(1),
            per_page,
            total_items,
            total_pages: total_items.div_ceil(u64::from(per_page)) as u32,
        }
    }
}
