//! Entity extractors: pincode, landmark, city and state
//!
//! Each extractor scans the untouched input on its own; none of them depends
//! on another's output.

use crate::data::ReferenceData;
use once_cell::sync::Lazy;
use regex::Regex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Landmark keywords, tried in this order
pub const LANDMARK_KEYWORDS: [&str; 8] = [
    "near", "nr", "next to", "opp", "opposite", "behind", "adj", "beside",
];

/// Characters that separate address fragments
pub const DELIMITERS: [char; 4] = [',', ';', '|', '-'];

/// A standalone 6-digit pincode; Indian pincodes never start with 0
static PINCODE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[1-9][0-9]{5}\b").unwrap());

/// One pattern per landmark keyword: the whole-word keyword followed by
/// everything up to the next delimiter.
static LANDMARK_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    LANDMARK_KEYWORDS
        .iter()
        .map(|kw| {
            let pattern = format!(r"\b{}\b[^{}]*", regex::escape(kw), escaped_delimiters());
            (*kw, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// [`DELIMITERS`] escaped for use inside a regex character class
pub(crate) fn escaped_delimiters() -> String {
    DELIMITERS
        .iter()
        .map(|c| regex::escape(&c.to_string()))
        .collect()
}

/// Everything the extractors found in one address.
///
/// This is the hand-off between extraction and line reconstruction. `state`
/// already includes the pincode-table fallback when [`AddressParser::extract`]
/// produced it.
///
/// [`AddressParser::extract`]: crate::AddressParser::extract
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entities {
    pub pincode: String,
    pub landmark: String,
    pub city: String,
    pub state: String,
}

impl Entities {
    /// The entities in the order they are stripped from the address text
    pub fn removal_order(&self) -> [&str; 4] {
        [
            self.pincode.as_str(),
            self.landmark.as_str(),
            self.city.as_str(),
            self.state.as_str(),
        ]
    }
}

/// First standalone 6-digit pincode, or an empty string.
///
/// ```rust
/// use inaddr::extract::extract_pincode;
///
/// assert_eq!(extract_pincode("MG Road, Bengaluru 560001"), "560001");
/// assert_eq!(extract_pincode("Flat 012345"), "");
/// ```
pub fn extract_pincode(address: &str) -> String {
    PINCODE_PATTERN
        .find(address)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Landmark phrase introduced by one of [`LANDMARK_KEYWORDS`], title-cased.
///
/// Keywords are tried in list order and the first one whose phrase is more
/// than two characters longer than the keyword wins, even if another keyword
/// appears earlier in the text.
pub fn extract_landmark(address: &str) -> String {
    let lower = address.to_lowercase();
    for (kw, pattern) in LANDMARK_PATTERNS.iter() {
        if let Some(m) = pattern.find(&lower) {
            let landmark = m.as_str().trim();
            if landmark.chars().count() > kw.chars().count() + 2 {
                return title_case(landmark);
            }
        }
    }
    String::new()
}

/// City and state named in the address, title-cased; empty when absent.
///
/// Candidates are every whitespace token, then every adjacent pair, then
/// every adjacent triple. The first candidate found in the city set is the
/// city, and independently the first found in the state set is the state.
pub fn extract_city_state(address: &str, reference: &ReferenceData) -> (String, String) {
    let lower = address.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let candidates = candidate_phrases(&words);

    let city = candidates
        .iter()
        .find(|phrase| reference.is_city(phrase))
        .map(|phrase| title_case(phrase))
        .unwrap_or_default();
    let state = candidates
        .iter()
        .find(|phrase| reference.is_state(phrase))
        .map(|phrase| title_case(phrase))
        .unwrap_or_default();

    (city, state)
}

/// Single words, then 2-word phrases, then 3-word phrases.
fn candidate_phrases(words: &[&str]) -> Vec<String> {
    let mut phrases: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    for size in 2..=3 {
        phrases.extend(words.windows(size).map(|w| w.join(" ")));
    }
    phrases
}

/// Capitalise every cased letter that follows an uncased character and
/// lowercase the rest. Letters without case (e.g. Devanagari) count as uncased.
///
/// ```rust
/// use inaddr::extract::title_case;
///
/// assert_eq!(title_case("near METRO stn"), "Near Metro Stn");
/// assert_eq!(title_case("b/h hospital"), "B/H Hospital");
/// ```
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;
    for ch in text.chars() {
        if ch.is_lowercase() || ch.is_uppercase() {
            if prev_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(ch);
            prev_cased = false;
        }
    }
    out
}
