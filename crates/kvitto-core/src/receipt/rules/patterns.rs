//! Common regex patterns for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Currency tokens seen in receipts, as a regex alternation. Order matters:
/// `US$` must come before `$` and `SEK` before any bare letters.
pub const CURRENCY_TOKENS: &str = r"kr|SEK|US\$|USD|\$|€|£";

/// Subset of tokens that are written before the number. Suffix-only codes
/// like `kr` and `SEK` must not appear here or a trailing "kr" followed by
/// an unrelated digit would read as a second amount.
pub const PREFIX_CURRENCY_TOKENS: &str = r"US\$|USD|\$|€|£";

lazy_static! {
    // Labeled totals: "Totalt 150,50 kr" or "Avbokningsavgift 25 kr"
    pub static ref TOTAL_WITH_CURRENCY: Regex = Regex::new(
        &format!(r"(?:Totalt|Total|Avbokningsavgift)\s+(\d+(?:[.,]\d+)?)\s*({CURRENCY_TOKENS})")
    ).unwrap();

    // Relaxed amount anywhere in the body, token after the number
    pub static ref AMOUNT_WITH_CURRENCY: Regex = Regex::new(
        &format!(r"(\d+(?:[.,]\d+)?)\s*({CURRENCY_TOKENS})")
    ).unwrap();

    // English receipt layout, symbol before the number: "$25.75"
    pub static ref CURRENCY_PREFIX_AMOUNT: Regex = Regex::new(
        &format!(r"({PREFIX_CURRENCY_TOKENS})\s*(\d+(?:[.,]\d+)?)")
    ).unwrap();

    // Date phrase anchored right after the labeled total
    pub static ref DATE_AFTER_TOTAL: Regex = Regex::new(
        &format!(r"(?:Totalt|Total|Avbokningsavgift)\s+[\d.,]+\s*(?:{CURRENCY_TOKENS})\s+(\d{{1,2}}\s+[A-Za-zåäöÅÄÖ]+\s+\d{{4}})")
    ).unwrap();

    // Swedish long format: "5 juli 2025"
    pub static ref DATE_SWEDISH_LONG: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s+(januari|februari|mars|april|maj|juni|juli|augusti|september|oktober|november|december)\s+(\d{4})\b"
    ).unwrap();

    // English long format: "4 July 2025"
    pub static ref DATE_ENGLISH_LONG: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s+(january|february|march|april|may|june|july|august|september|october|november|december)\s+(\d{4})\b"
    ).unwrap();

    // Closing phrases that end with the passenger name
    pub static ref CLOSING_PHRASE: Regex = Regex::new(
        r"(?:Tack för att du reser,|Vi ses en annan gång,|Thanks for riding,)\s+([A-Za-zåäöÅÄÖ]+)"
    ).unwrap();

    // Auxiliary passenger patterns: "Tack Fredrik!", "Viggos resa",
    // "... du reser idag, Nadine"
    pub static ref THANKS_NAME: Regex = Regex::new(
        r"Tack\s+([A-ZÅÄÖ][a-zåäö]+)!"
    ).unwrap();

    pub static ref POSSESSIVE_RIDE: Regex = Regex::new(
        r"([A-ZÅÄÖ][a-zåäö]+)s\s+(?:resa|tur)"
    ).unwrap();

    pub static ref RIDE_VERB_NAME: Regex = Regex::new(
        r"(?:reser|åker|färd|resa)[^,\n]*,\s+([A-ZÅÄÖ][a-zåäö]+)"
    ).unwrap();
}

/// Marker for cancellation-fee notices.
pub const CANCELLATION_KEYWORD: &str = "Avbokningsavgift";
