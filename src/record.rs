//! Parsed address record

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output column names, in the order they are appended to a CSV row
pub const FIELD_NAMES: [&str; 7] = [
    "address_line_1",
    "address_line_2",
    "address_line_3",
    "landmark",
    "city",
    "state",
    "pincode",
];

/// Structured form of one free-text address.
///
/// Every field is always present. A field that could not be extracted is an
/// empty string, never a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AddressRecord {
    /// Unit identifier (e.g. `B-98`) or the first residual fragment
    pub address_line_1: String,
    pub address_line_2: String,
    /// Remaining fragments joined with spaces
    pub address_line_3: String,
    /// Landmark phrase, e.g. `Near Metro Stn`
    pub landmark: String,
    pub city: String,
    pub state: String,
    /// 6-digit pincode
    pub pincode: String,
}

impl AddressRecord {
    /// Record with all seven fields empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// The three address lines in order
    pub fn address_lines(&self) -> [&str; 3] {
        [
            self.address_line_1.as_str(),
            self.address_line_2.as_str(),
            self.address_line_3.as_str(),
        ]
    }

    /// `(column name, value)` pairs in [`FIELD_NAMES`] order
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            (FIELD_NAMES[0], self.address_line_1.as_str()),
            (FIELD_NAMES[1], self.address_line_2.as_str()),
            (FIELD_NAMES[2], self.address_line_3.as_str()),
            (FIELD_NAMES[3], self.landmark.as_str()),
            (FIELD_NAMES[4], self.city.as_str()),
            (FIELD_NAMES[5], self.state.as_str()),
            (FIELD_NAMES[6], self.pincode.as_str()),
        ]
    }

    pub fn has_city(&self) -> bool {
        !self.city.is_empty()
    }

    pub fn has_state(&self) -> bool {
        !self.state.is_empty()
    }

    pub fn has_pincode(&self) -> bool {
        !self.pincode.is_empty()
    }

    /// Whether nothing at all was extracted
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_empty())
    }

    /// Whether city, state and pincode were all found
    pub fn is_complete(&self) -> bool {
        self.has_city() && self.has_state() && self.has_pincode()
    }

    /// Single-line mailing form: the non-empty fields joined by `, `,
    /// with the pincode after the state separated by ` - `.
    pub fn full_address(&self) -> String {
        let parts: Vec<&str> = [
            &self.address_line_1,
            &self.address_line_2,
            &self.address_line_3,
            &self.landmark,
            &self.city,
            &self.state,
        ]
        .into_iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();

        let mut result = parts.join(", ");
        if self.has_pincode() {
            if !result.is_empty() {
                result.push_str(" - ");
            }
            result.push_str(&self.pincode);
        }
        result
    }
}
