//! Address parser: runs the extractors, applies the pincode fallback and
//! assembles the final record

use crate::data::ReferenceData;
use crate::extract::{extract_city_state, extract_landmark, extract_pincode, title_case, Entities};
use crate::reconstruct::reconstruct_lines;
use crate::record::AddressRecord;
use once_cell::sync::Lazy;

/// Global parser over the built-in reference data
static GLOBAL_PARSER: Lazy<AddressParser> = Lazy::new(AddressParser::new);

/// Indian address parser
///
/// Holds read-only reference data; parsing never mutates it, so one parser
/// can be shared across threads.
#[derive(Debug, Clone)]
pub struct AddressParser {
    reference: ReferenceData,
}

impl AddressParser {
    /// Create a parser over the built-in city and state sets
    pub fn new() -> Self {
        Self::with_reference(ReferenceData::builtin())
    }

    /// Create a parser over caller-built reference data
    ///
    /// ```rust
    /// use inaddr::{AddressParser, ReferenceDataBuilder};
    ///
    /// let reference = ReferenceDataBuilder::with_defaults()
    ///     .pincode("834086", "JHARKHAND")
    ///     .build();
    /// let parser = AddressParser::with_reference(reference);
    ///
    /// let r = parser.parse("8/4 ; Silver CHS ; Enclave 92 ; Ranchi ; 834086");
    /// assert_eq!(r.state, "Jharkhand");
    /// ```
    pub fn with_reference(reference: ReferenceData) -> Self {
        Self { reference }
    }

    /// Get the global parser instance
    pub fn global() -> &'static AddressParser {
        &GLOBAL_PARSER
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Run the extractors on the untouched address.
    ///
    /// When no state is named in the text but the pincode is in the
    /// reference table, the table's state fills the gap. A state found in
    /// the text is never replaced.
    pub fn extract(&self, address: &str) -> Entities {
        let address = address.trim();

        let pincode = extract_pincode(address);
        let landmark = extract_landmark(address);
        let (city, mut state) = extract_city_state(address, &self.reference);

        if state.is_empty() {
            if let Some(pin_state) = self.reference.state_for_pincode(&pincode) {
                log::debug!("state {:?} taken from pincode {}", pin_state, pincode);
                state = title_case(pin_state);
            }
        }

        Entities {
            pincode,
            landmark,
            city,
            state,
        }
    }

    /// Parse an address into its structured record
    ///
    /// # Arguments
    /// * `address` - free-text address
    ///
    /// # Returns
    /// A record with all seven fields; anything not found is an empty string
    ///
    /// # Example
    /// ```rust
    /// use inaddr::AddressParser;
    ///
    /// let parser = AddressParser::new();
    /// let r = parser.parse("B-177 ; Green Heights ; MG Extn ; Mangaluru ; Karnataka ; 575073");
    /// assert_eq!(r.address_line_1, "B-177");
    /// assert_eq!(r.city, "Mangaluru");
    /// assert_eq!(r.state, "Karnataka");
    /// assert_eq!(r.pincode, "575073");
    /// ```
    pub fn parse(&self, address: &str) -> AddressRecord {
        let entities = self.extract(address);
        let [address_line_1, address_line_2, address_line_3] =
            reconstruct_lines(address, &entities);

        if entities.city.is_empty() && entities.pincode.is_empty() {
            log::debug!("no city or pincode found in {:?}", address);
        }

        AddressRecord {
            address_line_1,
            address_line_2,
            address_line_3,
            landmark: entities.landmark,
            city: entities.city,
            state: entities.state,
            pincode: entities.pincode,
        }
    }

    /// Parse many addresses; the output has one record per input, in order
    pub fn parse_batch(&self, addresses: &[&str]) -> Vec<AddressRecord> {
        addresses.iter().map(|a| self.parse(a)).collect()
    }
}

impl Default for AddressParser {
    fn default() -> Self {
        Self::new()
    }
}
