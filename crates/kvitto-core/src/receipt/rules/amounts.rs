//! Cost and currency extraction.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{AMOUNT_WITH_CURRENCY, CURRENCY_PREFIX_AMOUNT, TOTAL_WITH_CURRENCY};
use super::{ExtractionMatch, FieldExtractor};

/// Cost/currency pair extractor.
///
/// Looks for a labeled total first ("Totalt 150,50 kr",
/// "Avbokningsavgift 25 kr"), then optionally falls back to the first
/// amount-plus-token pair anywhere in the body, and finally to the English
/// prefix layout ("$25.75").
pub struct AmountExtractor {
    relaxed: bool,
}

impl AmountExtractor {
    pub fn new() -> Self {
        Self { relaxed: true }
    }

    /// Enable or disable the unlabeled fallback patterns.
    pub fn with_relaxed(mut self, relaxed: bool) -> Self {
        self.relaxed = relaxed;
        self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<(Decimal, String)>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in TOTAL_WITH_CURRENCY.captures_iter(text) {
            if let Some(amount) = normalize_amount(&caps[1]) {
                let full_match = caps.get(0).unwrap();
                results.push(
                    ExtractionMatch::new((amount, canonical_currency(&caps[2])), 0.95, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        if !self.relaxed {
            return results;
        }

        for caps in AMOUNT_WITH_CURRENCY.captures_iter(text) {
            if let Some(amount) = normalize_amount(&caps[1]) {
                let currency = canonical_currency(&caps[2]);
                // Skip pairs already matched by the labeled pattern.
                if results.iter().any(|r: &Self::Output| r.value == (amount, currency.clone())) {
                    continue;
                }

                let full_match = caps.get(0).unwrap();
                results.push(
                    ExtractionMatch::new((amount, currency), 0.7, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        for caps in CURRENCY_PREFIX_AMOUNT.captures_iter(text) {
            if let Some(amount) = normalize_amount(&caps[2]) {
                let currency = canonical_currency(&caps[1]);
                if results.iter().any(|r: &Self::Output| r.value == (amount, currency.clone())) {
                    continue;
                }

                let full_match = caps.get(0).unwrap();
                results.push(
                    ExtractionMatch::new((amount, currency), 0.7, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        results
    }
}

/// Extract the receipt total from body text.
pub fn extract_total(text: &str, relaxed: bool) -> Option<(Decimal, String)> {
    AmountExtractor::new()
        .with_relaxed(relaxed)
        .extract(text)
        .map(|m| m.value)
}

/// Parse an amount string, accepting the Swedish comma decimal separator
/// ("150,50") as well as the dot form ("25.75").
pub fn normalize_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.trim().replace(',', ".")).ok()
}

/// Map a matched currency token to its canonical code.
fn canonical_currency(token: &str) -> String {
    match token {
        "$" | "USD" => "US$".to_string(),
        "SEK" => "kr".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_labeled_total_swedish() {
        let (cost, currency) = extract_total("Totalt 150,50 kr", true).unwrap();
        assert_eq!(cost, dec("150.50"));
        assert_eq!(currency, "kr");
    }

    #[test]
    fn test_cancellation_fee_total() {
        let (cost, currency) = extract_total("Avbokningsavgift 25 kr", true).unwrap();
        assert_eq!(cost, dec("25"));
        assert_eq!(currency, "kr");
    }

    #[test]
    fn test_labeled_total_usd_suffix() {
        let (cost, currency) = extract_total("Totalt 25.75 US$", true).unwrap();
        assert_eq!(cost, dec("25.75"));
        assert_eq!(currency, "US$");
    }

    #[test]
    fn test_prefix_dollar_normalized() {
        let (cost, currency) = extract_total("Total $25.75 for your trip", true).unwrap();
        assert_eq!(cost, dec("25.75"));
        assert_eq!(currency, "US$");
    }

    #[test]
    fn test_relaxed_fallback() {
        let (cost, currency) = extract_total("din resa: 99,00 kr, betald med kort", true).unwrap();
        assert_eq!(cost, dec("99.00"));
        assert_eq!(currency, "kr");
    }

    #[test]
    fn test_strict_mode_ignores_unlabeled() {
        assert!(extract_total("din resa: 99,00 kr", false).is_none());
        assert!(extract_total("Totalt 99,00 kr", false).is_some());
    }

    #[test]
    fn test_no_amount() {
        assert!(extract_total("Tack för att du reser med oss!", true).is_none());
    }

    #[test]
    fn test_month_word_not_taken_as_currency() {
        // Only listed tokens count as currencies; "juli" must not.
        assert!(extract_total("5 juli 2025", true).is_none());
    }

    #[test]
    fn test_normalize_amount() {
        assert_eq!(normalize_amount("150,50"), Some(dec("150.50")));
        assert_eq!(normalize_amount("25.75"), Some(dec("25.75")));
        assert_eq!(normalize_amount("100"), Some(dec("100")));
        assert_eq!(normalize_amount("abc"), None);
    }

    #[test]
    fn test_extract_all_single_amount_before_date() {
        // "kr" directly followed by the day of the month must not spawn a
        // second prefix-layout match ("kr 5").
        let matches = AmountExtractor::new().extract_all("Totalt 150,50 kr 5 juli 2025");
        let values: Vec<_> = matches.into_iter().map(|m| m.value).collect();
        assert_eq!(values, vec![(dec("150.50"), "kr".to_string())]);
    }

    #[test]
    fn test_sek_canonicalized() {
        let (_, currency) = extract_total("Totalt 80 SEK", true).unwrap();
        assert_eq!(currency, "kr");
    }
}
