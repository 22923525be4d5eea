//! Core library for ride-receipt extraction.
//!
//! This crate provides:
//! - Input normalization (JSON arrays, single objects, `Value #N:`
//!   segmented exports, embedded JSON fragments)
//! - Rule-based field extraction (cost/currency, Swedish and English
//!   long-form dates, passenger attribution against a fixed roster)
//! - Batch aggregation into four index-aligned output columns

pub mod batch;
pub mod error;
pub mod input;
pub mod models;
pub mod receipt;

pub use batch::BatchExtractor;
pub use error::{ExtractionError, InputError, KvittoError, Result};
pub use input::parse_emails;
pub use models::{EmailRecord, KvittoConfig, Passenger, Receipt, ReceiptColumns};
pub use receipt::{ReceiptParser, RuleReceiptParser};
