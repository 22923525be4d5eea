//! Passenger attribution.

use regex::Regex;

use crate::models::Passenger;

use super::patterns::{CLOSING_PHRASE, POSSESSIVE_RIDE, RIDE_VERB_NAME, THANKS_NAME};
use super::{ExtractionMatch, FieldExtractor};

/// The fixed set of recognized passenger names.
///
/// Matching is case-insensitive; a hit reports the canonical spelling the
/// roster was built with. Each name gets a precompiled word-boundary regex
/// for the body scan.
#[derive(Debug, Clone)]
pub struct Roster {
    names: Vec<String>,
    scanners: Vec<Regex>,
}

impl Roster {
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let scanners = names
            .iter()
            .map(|name| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(name)))
                    .expect("escaped name is a valid regex")
            })
            .collect();
        Self { names, scanners }
    }

    /// Canonical spelling for a candidate name, if it is on the roster.
    pub fn canonicalize(&self, candidate: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|name| name.eq_ignore_ascii_case(candidate))
            .map(String::as_str)
    }

    /// First roster name that appears anywhere in the text.
    fn scan(&self, text: &str) -> Option<ExtractionMatch<&str>> {
        let mut best: Option<(usize, usize, &str)> = None;
        for (name, scanner) in self.names.iter().zip(&self.scanners) {
            if let Some(m) = scanner.find(text) {
                if best.is_none_or(|(start, _, _)| m.start() < start) {
                    best = Some((m.start(), m.end(), name));
                }
            }
        }
        best.map(|(start, end, name)| {
            ExtractionMatch::new(name, 0.8, &text[start..end]).with_position(start, end)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(crate::models::RosterConfig::default().passengers)
    }
}

/// Passenger field extractor.
///
/// Order of precedence:
/// 1. closing phrase ("Tack för att du reser, X" / "Thanks for riding, X"),
///    which attributes to the roster or reports an unknown name;
/// 2. any roster name appearing in the body;
/// 3. auxiliary phrasings ("Tack X!", "Xs resa"), accepted only for roster
///    names.
pub struct PassengerExtractor {
    roster: Roster,
}

impl PassengerExtractor {
    pub fn new() -> Self {
        Self {
            roster: Roster::default(),
        }
    }

    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }
}

impl Default for PassengerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PassengerExtractor {
    type Output = ExtractionMatch<Passenger>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        // Closing phrase carries the name even for passengers outside the
        // roster.
        for caps in CLOSING_PHRASE.captures_iter(text) {
            let candidate = caps[1].trim();
            let passenger = match self.roster.canonicalize(candidate) {
                Some(canonical) => Passenger::Known(canonical.to_string()),
                None => Passenger::Unknown(candidate.to_string()),
            };

            let full_match = caps.get(0).unwrap();
            results.push(
                ExtractionMatch::new(passenger, 0.95, full_match.as_str())
                    .with_position(full_match.start(), full_match.end()),
            );
        }

        if !results.is_empty() {
            return results;
        }

        // Roster name anywhere in the body.
        if let Some(hit) = self.roster.scan(text) {
            let (start, end) = hit.position.unwrap_or((0, 0));
            results.push(
                ExtractionMatch::new(Passenger::Known(hit.value.to_string()), hit.confidence, hit.source)
                    .with_position(start, end),
            );
            return results;
        }

        // Auxiliary phrasings, only trusted for roster names.
        for pattern in [&*THANKS_NAME, &*POSSESSIVE_RIDE, &*RIDE_VERB_NAME] {
            if let Some(caps) = pattern.captures(text) {
                if let Some(canonical) = self.roster.canonicalize(caps[1].trim()) {
                    let full_match = caps.get(0).unwrap();
                    results.push(
                        ExtractionMatch::new(
                            Passenger::Known(canonical.to_string()),
                            0.7,
                            full_match.as_str(),
                        )
                        .with_position(full_match.start(), full_match.end()),
                    );
                    return results;
                }
            }
        }

        results
    }
}

/// Extract the passenger from body text against a roster.
pub fn extract_passenger(text: &str, roster: &Roster) -> Option<Passenger> {
    PassengerExtractor::new()
        .with_roster(roster.clone())
        .extract(text)
        .map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_closing_phrase_known() {
        let roster = Roster::default();
        let passenger = extract_passenger("Tack för att du reser, Fredrik", &roster).unwrap();
        assert_eq!(passenger, Passenger::Known("Fredrik".to_string()));
    }

    #[test]
    fn test_closing_phrase_unknown() {
        let roster = Roster::default();
        let passenger = extract_passenger("Thanks for riding, John", &roster).unwrap();
        assert_eq!(passenger, Passenger::Unknown("John".to_string()));
    }

    #[test]
    fn test_cancellation_phrase() {
        let roster = Roster::default();
        let passenger = extract_passenger("Vi ses en annan gång, Leona", &roster).unwrap();
        assert_eq!(passenger, Passenger::Known("Leona".to_string()));
    }

    #[test]
    fn test_case_insensitive_canonical_spelling() {
        let roster = Roster::default();
        let passenger = extract_passenger("Tack för att du reser, FREDRIK", &roster).unwrap();
        assert_eq!(passenger, Passenger::Known("Fredrik".to_string()));
    }

    #[test]
    fn test_roster_scan_without_phrase() {
        let roster = Roster::default();
        let passenger = extract_passenger("Kvitto för Viggo, resa till skolan", &roster).unwrap();
        assert_eq!(passenger, Passenger::Known("Viggo".to_string()));
    }

    #[test]
    fn test_auxiliary_thanks_pattern() {
        let roster = Roster::new(["Nadine"]);
        let passenger = extract_passenger("Tack Nadine! Din resa är klar.", &roster).unwrap();
        assert_eq!(passenger, Passenger::Known("Nadine".to_string()));
    }

    #[test]
    fn test_auxiliary_pattern_rejects_non_roster() {
        // "Tack X!" is only trusted for roster names.
        let roster = Roster::new(["Fredrik"]);
        assert!(extract_passenger("Tack Support! Din resa är klar.", &roster).is_none());
    }

    #[test]
    fn test_no_passenger() {
        let roster = Roster::default();
        assert!(extract_passenger("Totalt 150,50 kr", &roster).is_none());
    }
}
