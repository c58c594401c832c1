//! FDIC BankFind data fetching and parsing.
//!
//! This module provides access to the public FDIC BankFind API:
//! - Institution lookup by certificate number or name
//! - Quarterly financial reports as raw regulatory field codes
//!
//! # Example
//!
//! ```no_run
//! use hobart_data::fdic::FdicClient;
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FdicClient::new()?;
//!
//!     let institution = client.institution_by_cert("32541").await?;
//!     println!("Found: {}", institution.name);
//!
//!     let start = NaiveDate::from_ymd_opt(2020, 3, 31).unwrap();
//!     let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
//!     let periods = client.fetch_financials(&institution.cert, start, end).await?;
//!     println!("Fetched {} reporting periods", periods.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod financials;
pub mod institutions;

// Re-export main types
pub use client::FdicClient;
pub use financials::{FINANCIAL_FIELDS, RawPeriodRecord};
pub use institutions::Institution;
