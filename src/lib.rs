//! # inaddr - Indian Address Normalizer
//!
//! Split free-text Indian mailing addresses into structured fields and
//! standardize Indian mobile numbers.
//!
//! ## Features
//!
//! - Pincode, landmark, city and state extraction from messy text
//! - Up to three address lines rebuilt from the remaining fragments, with
//!   unit identifiers such as `B-98` kept on the first line
//! - State fallback from a pincode table when the text names no state
//! - Built-in city and state sets, extendable from CSV before parsing
//! - CSV batch mode that appends the parsed fields to every row
//! - Mobile numbers normalized to `+91XXXXXXXXXX`
//!
//! ## Quick start
//!
//! ```rust
//! use inaddr::AddressParser;
//!
//! let parser = AddressParser::new();
//!
//! let r = parser.parse(
//!     "Flat 754 - Orchid Plaza - College Road - Near Metro Stn - Ahmedabad - Gujarat - 380012",
//! );
//! assert_eq!(r.address_line_1, "Flat 754");
//! assert_eq!(r.landmark, "Near Metro Stn");
//! assert_eq!(r.city, "Ahmedabad");
//! assert_eq!(r.state, "Gujarat");
//! assert_eq!(r.pincode, "380012");
//!
//! assert_eq!(inaddr::clean_phone("+91 98765 43210").as_deref(), Some("+919876543210"));
//! ```

pub mod batch;
mod data;
mod error;
pub mod extract;
mod parser;
pub mod phone;
pub mod reconstruct;
mod record;

pub use batch::BatchSummary;
pub use data::{ReferenceData, ReferenceDataBuilder};
pub use error::{Error, Result};
pub use extract::Entities;
pub use parser::AddressParser;
pub use record::{AddressRecord, FIELD_NAMES};

/// Parse an address with the global parser
///
/// ```rust
/// let r = inaddr::parse("8/4 ; Silver CHS ; Enclave 92 ; Ranchi ; 834086");
/// assert_eq!(r.city, "Ranchi");
/// assert_eq!(r.pincode, "834086");
/// ```
pub fn parse(address: &str) -> AddressRecord {
    AddressParser::global().parse(address)
}

/// Normalize an Indian mobile number, see [`phone::clean_indian_phone`]
pub fn clean_phone(input: impl std::fmt::Display) -> Option<String> {
    phone::clean_indian_phone(input)
}
