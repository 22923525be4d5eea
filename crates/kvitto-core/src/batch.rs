//! Batch aggregation over a sequence of email records.

use tracing::{info, warn};

use crate::error::ExtractionError;
use crate::models::{EmailRecord, ReceiptColumns};
use crate::receipt::{ReceiptParser, RuleReceiptParser};

/// Runs a receipt parser over a batch of emails and collects the four
/// aligned output columns.
///
/// Processing is sequential and order-preserving. A record that yields no
/// cost/currency pair is reported in the diagnostics and skipped; a record
/// missing only its date or passenger keeps its slot with the field set to
/// `None`. No record ever aborts the batch.
pub struct BatchExtractor<P = RuleReceiptParser> {
    parser: P,
}

impl BatchExtractor<RuleReceiptParser> {
    /// Create an extractor with the default rule parser.
    pub fn new() -> Self {
        Self {
            parser: RuleReceiptParser::new(),
        }
    }
}

impl Default for BatchExtractor<RuleReceiptParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ReceiptParser> BatchExtractor<P> {
    /// Create an extractor around a specific parser.
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// Extract all records into aligned columns.
    pub fn extract(&self, emails: &[EmailRecord]) -> Result<ReceiptColumns, ExtractionError> {
        let mut columns = ReceiptColumns::default();

        for (index, email) in emails.iter().enumerate() {
            let receipt = self.parser.parse(email);
            let label = email.label(index);

            if !receipt.has_cost() {
                let note = format!("{label}: no cost/currency found, record skipped");
                warn!("{note}");
                columns.diagnostics.push(note);
                continue;
            }

            if receipt.date.is_none() && !receipt.is_cancellation {
                let note = format!("{label}: no ride date found");
                warn!("{note}");
                columns.diagnostics.push(note);
            }
            if receipt.passenger.is_none() {
                let note = format!("{label}: unattributed ride");
                warn!("{note}");
                columns.diagnostics.push(note);
            }

            let pushed = columns.push(receipt);
            debug_assert!(pushed, "costed receipt rejected by push");
        }

        columns.validate()?;
        info!(
            "extracted {} receipts from {} emails ({} diagnostics)",
            columns.len(),
            emails.len(),
            columns.diagnostics.len()
        );

        Ok(columns)
    }
}
