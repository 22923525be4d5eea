//! Receipt data models and the four-column batch output.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Passenger attribution for a ride.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Passenger {
    /// A name from the configured roster, in canonical spelling.
    Known(String),
    /// A name scraped from a closing phrase that is not on the roster.
    Unknown(String),
}

impl Passenger {
    /// The passenger name regardless of attribution.
    pub fn name(&self) -> &str {
        match self {
            Passenger::Known(name) | Passenger::Unknown(name) => name,
        }
    }

    /// Whether the name was matched against the roster.
    pub fn is_known(&self) -> bool {
        matches!(self, Passenger::Known(_))
    }
}

/// Fields extracted from a single receipt email.
///
/// Every field is independent: a receipt with no recognizable date still
/// carries its cost, and vice versa.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Receipt {
    /// Id of the source email, when the export provided one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,

    /// Ride date in ISO form.
    pub date: Option<NaiveDate>,

    /// Attributed passenger.
    pub passenger: Option<Passenger>,

    /// Total cost. Comma decimal separators are already normalized.
    pub cost: Option<Decimal>,

    /// Canonical currency code (`kr`, `US$`, ...).
    pub currency: Option<String>,

    /// The receipt is a cancellation-fee notice. These often carry no
    /// ride date.
    pub is_cancellation: bool,
}

impl Receipt {
    /// A receipt counts as costed when both the amount and its currency
    /// were recognized.
    pub fn has_cost(&self) -> bool {
        self.cost.is_some() && self.currency.is_some()
    }
}

/// The four index-aligned output sequences for a batch, plus per-record
/// diagnostics.
///
/// Position `i` in every sequence describes the same receipt. The length
/// invariant is structural (a receipt is pushed to all four columns at
/// once) and re-checked by [`ReceiptColumns::validate`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReceiptColumns {
    /// Ride dates; `null` where no date was recognized.
    pub dates: Vec<Option<NaiveDate>>,

    /// Passenger attributions; `null` where unattributed.
    pub passengers: Vec<Option<Passenger>>,

    /// Total costs.
    pub costs: Vec<Decimal>,

    /// Currency codes, aligned with `costs`.
    pub currencies: Vec<String>,

    /// Human-readable notes about records with missing or skipped fields.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
}

impl ReceiptColumns {
    /// Number of receipts in the batch output.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// True when no receipt produced a costed entry.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Append a costed receipt to all four columns.
    ///
    /// Returns `false` (and records nothing) when the receipt has no
    /// cost/currency pair, so a caller cannot desynchronize the columns.
    pub fn push(&mut self, receipt: Receipt) -> bool {
        let (Some(cost), Some(currency)) = (receipt.cost, receipt.currency) else {
            return false;
        };
        self.dates.push(receipt.date);
        self.passengers.push(receipt.passenger);
        self.costs.push(cost);
        self.currencies.push(currency);
        true
    }

    /// Re-check the length invariant.
    pub fn validate(&self) -> Result<(), ExtractionError> {
        let n = self.costs.len();
        if self.dates.len() != n || self.passengers.len() != n || self.currencies.len() != n {
            return Err(ExtractionError::MisalignedColumns {
                dates: self.dates.len(),
                passengers: self.passengers.len(),
                costs: self.costs.len(),
                currencies: self.currencies.len(),
            });
        }
        Ok(())
    }

    /// Sum of costs per currency code.
    pub fn total_by_currency(&self) -> BTreeMap<String, Decimal> {
        let mut totals = BTreeMap::new();
        for (cost, currency) in self.costs.iter().zip(&self.currencies) {
            *totals.entry(currency.clone()).or_insert(Decimal::ZERO) += *cost;
        }
        totals
    }

    /// Ride count per attributed passenger name.
    pub fn rides_by_passenger(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for passenger in self.passengers.iter().flatten() {
            *counts.entry(passenger.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Names seen in closing phrases that are not on the roster.
    pub fn unknown_names(&self) -> BTreeSet<String> {
        self.passengers
            .iter()
            .flatten()
            .filter(|p| !p.is_known())
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Receipts with no passenger attribution at all.
    pub fn unattributed_count(&self) -> usize {
        self.passengers.iter().filter(|p| p.is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    fn costed(cost: &str, currency: &str, passenger: Option<Passenger>) -> Receipt {
        Receipt {
            cost: Some(Decimal::from_str(cost).unwrap()),
            currency: Some(currency.to_string()),
            passenger,
            ..Receipt::default()
        }
    }

    #[test]
    fn test_push_keeps_columns_aligned() {
        let mut columns = ReceiptColumns::default();
        assert!(columns.push(costed("150.5", "kr", Some(Passenger::Known("Fredrik".into())))));
        assert!(columns.push(costed("25.75", "US$", None)));

        assert_eq!(columns.len(), 2);
        columns.validate().unwrap();
    }

    #[test]
    fn test_push_rejects_uncosted_receipt() {
        let mut columns = ReceiptColumns::default();
        assert!(!columns.push(Receipt::default()));
        assert!(columns.is_empty());
        columns.validate().unwrap();
    }

    #[test]
    fn test_validate_detects_misalignment() {
        let mut columns = ReceiptColumns::default();
        columns.push(costed("10", "kr", None));
        columns.dates.push(None); // corrupt on purpose
        assert!(matches!(
            columns.validate(),
            Err(ExtractionError::MisalignedColumns { dates: 2, costs: 1, .. })
        ));
    }

    #[test]
    fn test_total_by_currency() {
        let mut columns = ReceiptColumns::default();
        columns.push(costed("150.5", "kr", None));
        columns.push(costed("49.5", "kr", None));
        columns.push(costed("25.75", "US$", None));

        let totals = columns.total_by_currency();
        assert_eq!(totals["kr"], Decimal::from_str("200.0").unwrap());
        assert_eq!(totals["US$"], Decimal::from_str("25.75").unwrap());
    }

    #[test]
    fn test_passenger_breakdown() {
        let mut columns = ReceiptColumns::default();
        columns.push(costed("10", "kr", Some(Passenger::Known("Viggo".into()))));
        columns.push(costed("20", "kr", Some(Passenger::Known("Viggo".into()))));
        columns.push(costed("30", "kr", Some(Passenger::Unknown("John".into()))));
        columns.push(costed("40", "kr", None));

        assert_eq!(columns.rides_by_passenger()["Viggo"], 2);
        assert!(columns.unknown_names().contains("John"));
        assert_eq!(columns.unattributed_count(), 1);
    }
}
