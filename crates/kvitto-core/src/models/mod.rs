//! Data models for emails, receipts, and configuration.

pub mod config;
pub mod email;
pub mod receipt;

pub use config::{ExtractionConfig, KvittoConfig, RosterConfig};
pub use email::EmailRecord;
pub use receipt::{Passenger, Receipt, ReceiptColumns};
