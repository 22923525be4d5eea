//! Rule-based receipt parser.

use tracing::debug;

use crate::models::{EmailRecord, KvittoConfig, Receipt};

use super::rules::{
    amounts::AmountExtractor,
    dates::extract_receipt_date,
    passengers::{PassengerExtractor, Roster},
    patterns::CANCELLATION_KEYWORD,
    FieldExtractor,
};

/// Trait for receipt parsing.
pub trait ReceiptParser {
    /// Parse a receipt from body text.
    fn parse_body(&self, body: &str) -> Receipt;

    /// Parse a receipt from an email record.
    fn parse(&self, email: &EmailRecord) -> Receipt {
        let mut receipt = self.parse_body(&email.body);
        receipt.email_id = email.id.clone();
        receipt
    }
}

/// Rule-based parser over the pattern extractors.
///
/// Field extractions are independent: a body with no recognizable amount
/// still gets its date and passenger fields probed, and nothing here ever
/// fails the record.
pub struct RuleReceiptParser {
    amounts: AmountExtractor,
    passengers: PassengerExtractor,
    english_dates: bool,
}

impl RuleReceiptParser {
    /// Create a parser with the default roster and settings.
    pub fn new() -> Self {
        Self {
            amounts: AmountExtractor::new(),
            passengers: PassengerExtractor::new(),
            english_dates: true,
        }
    }

    /// Create a parser from a configuration.
    pub fn from_config(config: &KvittoConfig) -> Self {
        Self::new()
            .with_roster(Roster::new(config.roster.passengers.iter().cloned()))
            .with_english_dates(config.extraction.english_dates)
            .with_relaxed_amounts(config.extraction.relaxed_amounts)
    }

    /// Set the known passenger roster.
    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.passengers = PassengerExtractor::new().with_roster(roster);
        self
    }

    /// Enable or disable English long-form dates.
    pub fn with_english_dates(mut self, english: bool) -> Self {
        self.english_dates = english;
        self
    }

    /// Enable or disable relaxed amount fallback patterns.
    pub fn with_relaxed_amounts(mut self, relaxed: bool) -> Self {
        self.amounts = AmountExtractor::new().with_relaxed(relaxed);
        self
    }
}

impl Default for RuleReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptParser for RuleReceiptParser {
    fn parse_body(&self, body: &str) -> Receipt {
        let total = self.amounts.extract(body).map(|m| m.value);
        let (cost, currency) = match total {
            Some((cost, currency)) => (Some(cost), Some(currency)),
            None => (None, None),
        };

        let date = extract_receipt_date(body, self.english_dates).map(|m| m.value);
        let passenger = self.passengers.extract(body).map(|m| m.value);
        let is_cancellation = body.contains(CANCELLATION_KEYWORD);

        debug!(
            cost = ?cost,
            currency = ?currency,
            date = ?date,
            cancellation = is_cancellation,
            "parsed receipt body"
        );

        Receipt {
            email_id: None,
            date,
            passenger,
            cost,
            currency,
            is_cancellation,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    use crate::models::Passenger;

    use super::*;

    #[test]
    fn test_parse_swedish_receipt() {
        let body = "Totalt 150,50 kr 5 juli 2025 Tack för att du reser, Fredrik";
        let receipt = RuleReceiptParser::new().parse_body(body);

        assert_eq!(receipt.cost, Some(Decimal::from_str("150.5").unwrap()));
        assert_eq!(receipt.currency.as_deref(), Some("kr"));
        assert_eq!(receipt.date, NaiveDate::from_ymd_opt(2025, 7, 5));
        assert_eq!(receipt.passenger, Some(Passenger::Known("Fredrik".to_string())));
        assert!(!receipt.is_cancellation);
    }

    #[test]
    fn test_parse_english_receipt() {
        let body = "Total $25.75 4 July 2025 Thanks for riding, John";
        let receipt = RuleReceiptParser::new().parse_body(body);

        assert_eq!(receipt.cost, Some(Decimal::from_str("25.75").unwrap()));
        assert_eq!(receipt.currency.as_deref(), Some("US$"));
        assert_eq!(receipt.date, NaiveDate::from_ymd_opt(2025, 7, 4));
        assert_eq!(receipt.passenger, Some(Passenger::Unknown("John".to_string())));
    }

    #[test]
    fn test_parse_cancellation_fee() {
        let body = "Avbokningsavgift 25 kr Vi ses en annan gång, Leona";
        let receipt = RuleReceiptParser::new().parse_body(body);

        assert_eq!(receipt.cost, Some(Decimal::from_str("25").unwrap()));
        assert_eq!(receipt.currency.as_deref(), Some("kr"));
        assert!(receipt.date.is_none());
        assert!(receipt.is_cancellation);
        assert_eq!(receipt.passenger, Some(Passenger::Known("Leona".to_string())));
    }

    #[test]
    fn test_fields_independent() {
        // No amount, but date and passenger still come through.
        let body = "Din resa den 7 februari 2025. Tack för att du reser, Viggo";
        let receipt = RuleReceiptParser::new().parse_body(body);

        assert!(receipt.cost.is_none());
        assert!(receipt.currency.is_none());
        assert_eq!(receipt.date, NaiveDate::from_ymd_opt(2025, 2, 7));
        assert_eq!(receipt.passenger, Some(Passenger::Known("Viggo".to_string())));
    }

    #[test]
    fn test_from_config_custom_roster() {
        let mut config = KvittoConfig::default();
        config.roster.passengers = vec!["Astrid".to_string()];

        let parser = RuleReceiptParser::from_config(&config);
        let receipt = parser.parse_body("Tack för att du reser, Astrid");
        assert_eq!(receipt.passenger, Some(Passenger::Known("Astrid".to_string())));

        // Default roster names are now unknown.
        let receipt = parser.parse_body("Tack för att du reser, Fredrik");
        assert_eq!(receipt.passenger, Some(Passenger::Unknown("Fredrik".to_string())));
    }

    #[test]
    fn test_parse_email_carries_id() {
        let email = EmailRecord {
            id: Some("m-1".to_string()),
            body: "Totalt 10 kr".to_string(),
            ..EmailRecord::default()
        };
        let receipt = RuleReceiptParser::new().parse(&email);
        assert_eq!(receipt.email_id.as_deref(), Some("m-1"));
    }

    #[test]
    fn test_empty_body() {
        let receipt = RuleReceiptParser::new().parse_body("");
        assert!(receipt.cost.is_none());
        assert!(receipt.date.is_none());
        assert!(receipt.passenger.is_none());
    }
}
