//! Ride date extraction.

use chrono::NaiveDate;

use super::patterns::{DATE_AFTER_TOTAL, DATE_ENGLISH_LONG, DATE_SWEDISH_LONG};
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor.
///
/// Swedish long-form dates ("5 juli 2025") are the primary format; English
/// long-form dates ("4 July 2025") are recognized when enabled.
pub struct DateExtractor {
    english: bool,
}

impl DateExtractor {
    pub fn new() -> Self {
        Self { english: true }
    }

    /// Enable or disable English month names.
    pub fn with_english(mut self, english: bool) -> Self {
        self.english = english;
        self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in DATE_SWEDISH_LONG.captures_iter(text) {
            let day: u32 = caps[1].parse().unwrap_or(0);
            let month = swedish_month_to_number(&caps[2]);
            let year: i32 = caps[3].parse().unwrap_or(0);

            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                let full_match = caps.get(0).unwrap();
                results.push(
                    ExtractionMatch::new(date, 0.95, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        if !self.english {
            return results;
        }

        for caps in DATE_ENGLISH_LONG.captures_iter(text) {
            let day: u32 = caps[1].parse().unwrap_or(0);
            let month = english_month_to_number(&caps[2]);
            let year: i32 = caps[3].parse().unwrap_or(0);

            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                // Skip if already found
                if results.iter().any(|r| r.value == date) {
                    continue;
                }

                let full_match = caps.get(0).unwrap();
                results.push(
                    ExtractionMatch::new(date, 0.85, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        results
    }
}

/// Extract the ride date from body text.
///
/// The phrase anchored right after the labeled total is preferred; any
/// long-form date elsewhere in the body is the fallback. Cancellation
/// notices often carry no date at all, which yields `None`.
pub fn extract_receipt_date(text: &str, english: bool) -> Option<ExtractionMatch<NaiveDate>> {
    let extractor = DateExtractor::new().with_english(english);

    if let Some(caps) = DATE_AFTER_TOTAL.captures(text) {
        if let Some(date) = extractor.extract(&caps[1]) {
            return Some(ExtractionMatch::new(date.value, 0.95, caps[1].trim()));
        }
    }

    extractor.extract(text)
}

fn swedish_month_to_number(month: &str) -> u32 {
    match month.to_lowercase().as_str() {
        "januari" => 1,
        "februari" => 2,
        "mars" => 3,
        "april" => 4,
        "maj" => 5,
        "juni" => 6,
        "juli" => 7,
        "augusti" => 8,
        "september" => 9,
        "oktober" => 10,
        "november" => 11,
        "december" => 12,
        _ => 0,
    }
}

fn english_month_to_number(month: &str) -> u32 {
    match month.to_lowercase().as_str() {
        "january" => 1,
        "february" => 2,
        "march" => 3,
        "april" => 4,
        "may" => 5,
        "june" => 6,
        "july" => 7,
        "august" => 8,
        "september" => 9,
        "october" => 10,
        "november" => 11,
        "december" => 12,
        _ => 0,
    }
}
