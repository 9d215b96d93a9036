//! Reference data: known city names, state names and the pincode -> state table

use crate::error::{Error, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Built-in city names (embedded at compile time, one per line)
const CITY_DATA: &str = include_str!("../data/cities.txt");

/// Built-in state and union territory names
const STATE_DATA: &str = include_str!("../data/states.txt");

/// Iterate over the non-empty lines of an embedded name list.
fn embedded_names(data: &'static str) -> impl Iterator<Item = &'static str> {
    data.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Read-only lookup tables consulted while parsing.
///
/// All city and state names are stored lowercase, and every query lowercases
/// its argument first, so membership tests are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// Known city names
    cities: HashSet<String>,
    /// Known state names
    states: HashSet<String>,
    /// 6-digit pincode -> state name as supplied by the loader
    pincode_states: HashMap<String, String>,
}

impl ReferenceData {
    /// Reference data with no entries at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in city and state sets, with an empty pincode table.
    pub fn builtin() -> Self {
        ReferenceDataBuilder::with_defaults().build()
    }

    pub fn builder() -> ReferenceDataBuilder {
        ReferenceDataBuilder::new()
    }

    /// Whether `name` is a known city
    pub fn is_city(&self, name: &str) -> bool {
        self.cities.contains(&name.to_lowercase())
    }

    /// Whether `name` is a known state
    pub fn is_state(&self, name: &str) -> bool {
        self.states.contains(&name.to_lowercase())
    }

    /// State name recorded for a pincode, exactly as it was loaded.
    pub fn state_for_pincode(&self, pincode: &str) -> Option<&str> {
        self.pincode_states.get(pincode).map(String::as_str)
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn pincode_count(&self) -> usize {
        self.pincode_states.len()
    }
}

/// Builds a [`ReferenceData`] before any parsing starts.
///
/// Every step is a union: loading more rows only ever adds names, and a later
/// pincode row replaces the state of an earlier row with the same pincode.
///
/// ```rust
/// use inaddr::ReferenceData;
///
/// let data = ReferenceData::builder()
///     .city("Navi Mumbai")
///     .state("Maharashtra")
///     .pincode("400703", "MAHARASHTRA")
///     .build();
///
/// assert!(data.is_city("navi mumbai"));
/// assert_eq!(data.state_for_pincode("400703"), Some("MAHARASHTRA"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataBuilder {
    data: ReferenceData,
}

impl ReferenceDataBuilder {
    /// Start from empty tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the built-in city and state sets
    pub fn with_defaults() -> Self {
        Self::new()
            .cities(embedded_names(CITY_DATA))
            .states(embedded_names(STATE_DATA))
    }

    pub fn city(mut self, name: impl AsRef<str>) -> Self {
        insert_name(&mut self.data.cities, name.as_ref());
        self
    }

    pub fn state(mut self, name: impl AsRef<str>) -> Self {
        insert_name(&mut self.data.states, name.as_ref());
        self
    }

    pub fn cities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            insert_name(&mut self.data.cities, name.as_ref());
        }
        self
    }

    pub fn states<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            insert_name(&mut self.data.states, name.as_ref());
        }
        self
    }

    /// Map a pincode to a state name. Empty pincodes are ignored.
    pub fn pincode(mut self, pincode: impl AsRef<str>, state: impl AsRef<str>) -> Self {
        let pincode = pincode.as_ref().trim();
        if !pincode.is_empty() {
            self.data
                .pincode_states
                .insert(pincode.to_string(), state.as_ref().trim().to_string());
        }
        self
    }

    /// Load pincode metadata rows.
    ///
    /// The CSV must have a `pincode` column; the state is read from
    /// `statename`, or from `state` when `statename` is absent.
    pub fn pincode_csv<R: Read>(mut self, reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let pincode_col = column_index(&headers, "pincode")
            .ok_or_else(|| Error::MissingColumn("pincode".to_string()))?;
        let state_col = column_index(&headers, "statename")
            .or_else(|| column_index(&headers, "state"))
            .ok_or_else(|| Error::MissingColumn("statename".to_string()))?;

        let before = self.data.pincode_states.len();
        for result in csv_reader.records() {
            let record = result?;
            let pincode = record.get(pincode_col).unwrap_or("");
            let state = record.get(state_col).unwrap_or("");
            self = self.pincode(pincode, state);
        }

        log::info!(
            "loaded {} new pincodes ({} total)",
            self.data.pincode_states.len() - before,
            self.data.pincode_states.len()
        );
        Ok(self)
    }

    /// Load city/state rows. Either column may be absent, but not both.
    pub fn city_state_csv<R: Read>(mut self, reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let city_col = column_index(&headers, "city");
        let state_col = column_index(&headers, "state");
        if city_col.is_none() && state_col.is_none() {
            return Err(Error::MissingColumn("city or state".to_string()));
        }

        for result in csv_reader.records() {
            let record = result?;
            if let Some(city) = city_col.and_then(|i| record.get(i)) {
                insert_name(&mut self.data.cities, city);
            }
            if let Some(state) = state_col.and_then(|i| record.get(i)) {
                insert_name(&mut self.data.states, state);
            }
        }

        log::info!(
            "reference data now has {} cities and {} states",
            self.data.cities.len(),
            self.data.states.len()
        );
        Ok(self)
    }

    /// Load pincode metadata from a file. A missing file leaves the tables untouched.
    pub fn pincode_csv_file(self, path: impl AsRef<Path>) -> Result<Self> {
        match open_optional(path.as_ref())? {
            Some(reader) => self.pincode_csv(reader),
            None => Ok(self),
        }
    }

    /// Load city/state rows from a file. A missing file leaves the tables untouched.
    pub fn city_state_csv_file(self, path: impl AsRef<Path>) -> Result<Self> {
        match open_optional(path.as_ref())? {
            Some(reader) => self.city_state_csv(reader),
            None => Ok(self),
        }
    }

    pub fn build(self) -> ReferenceData {
        self.data
    }
}

fn insert_name(set: &mut HashSet<String>, name: &str) {
    let name = name.trim();
    if !name.is_empty() {
        set.insert(name.to_lowercase());
    }
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn open_optional(path: &Path) -> Result<Option<BufReader<File>>> {
    match File::open(path) {
        Ok(file) => Ok(Some(BufReader::new(file))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!(
                "reference file {} not found, continuing without it",
                path.display()
            );
            Ok(None)
        }
        Err(e) => Err(Error::DataLoadError(format!("{}: {}", path.display(), e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_sets() {
        let data = ReferenceData::builtin();
        assert_eq!(data.city_count(), 52);
        assert_eq!(data.state_count(), 29);
        assert_eq!(data.pincode_count(), 0);

        assert!(data.is_city("mangaluru"));
        assert!(data.is_city("Bengaluru"));
        assert!(data.is_state("tamil nadu"));
        assert!(data.is_state("West Bengal"));
        // delhi is listed as both a city and a state
        assert!(data.is_city("delhi"));
        assert!(data.is_state("delhi"));
        assert!(!data.is_city("karnataka"));
    }

    #[test]
    fn test_empty() {
        let data = ReferenceData::empty();
        assert!(!data.is_city("mumbai"));
        assert!(!data.is_state("goa"));
        assert_eq!(data.state_for_pincode("400001"), None);
    }

    #[test]
    fn test_builder_lowercases_and_unions() {
        let data = ReferenceDataBuilder::with_defaults()
            .city("  Navi Mumbai ")
            .cities(["Mumbai", "Udupi", ""])
            .states(["Ladakh"])
            .build();

        assert!(data.is_city("NAVI MUMBAI"));
        assert!(data.is_city("udupi"));
        assert!(data.is_state("ladakh"));
        // mumbai was already present
        assert_eq!(data.city_count(), 54);
        assert_eq!(data.state_count(), 30);
    }

    #[test]
    fn test_pincode_insert() {
        let data = ReferenceData::builder()
            .pincode(" 560001 ", "KARNATAKA")
            .pincode("", "NOWHERE")
            .pincode("560001", "Karnataka")
            .build();

        assert_eq!(data.pincode_count(), 1);
        assert_eq!(data.state_for_pincode("560001"), Some("Karnataka"));
    }

    #[test]
    fn test_pincode_csv() {
        let csv = "officename,pincode,districtname,statename\n\
                   Ranchi GPO,834001,RANCHI,JHARKHAND\n\
                   Hatia,834003 , RANCHI , JHARKHAND \n\
                   Blank,,X,Y\n";
        let data = ReferenceData::builder()
            .pincode_csv(csv.as_bytes())
            .unwrap()
            .build();

        assert_eq!(data.pincode_count(), 2);
        assert_eq!(data.state_for_pincode("834003"), Some("JHARKHAND"));
    }

    #[test]
    fn test_pincode_csv_state_fallback_column() {
        let csv = "pincode,state\n380012,Gujarat\n";
        let data = ReferenceData::builder()
            .pincode_csv(csv.as_bytes())
            .unwrap()
            .build();
        assert_eq!(data.state_for_pincode("380012"), Some("Gujarat"));
    }

    #[test]
    fn test_pincode_csv_missing_column() {
        let csv = "pin,statename\n380012,Gujarat\n";
        let err = ReferenceData::builder()
            .pincode_csv(csv.as_bytes())
            .unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "pincode"));
    }

    #[test]
    fn test_city_state_csv() {
        let csv = "city,state\nNavi Mumbai,Maharashtra\nLeh,Ladakh\n,Lakshadweep\n";
        let data = ReferenceData::builder()
            .city_state_csv(csv.as_bytes())
            .unwrap()
            .build();

        assert_eq!(data.city_count(), 2);
        assert_eq!(data.state_count(), 3);
        assert!(data.is_city("navi mumbai"));
        assert!(data.is_state("lakshadweep"));
    }

    #[test]
    fn test_city_state_csv_without_known_columns() {
        let csv = "town,region\nLeh,Ladakh\n";
        let err = ReferenceData::builder()
            .city_state_csv(csv.as_bytes())
            .unwrap_err();
        assert!(matches!(err, Error::MissingColumn(_)));
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let data = ReferenceDataBuilder::with_defaults()
            .pincode_csv_file(dir.path().join("no_pincodes.csv"))
            .unwrap()
            .city_state_csv_file(dir.path().join("no_cities.csv"))
            .unwrap()
            .build();

        assert_eq!(data.city_count(), 52);
        assert_eq!(data.pincode_count(), 0);
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let pin_path = dir.path().join("pincodes.csv");
        let city_path = dir.path().join("cities.csv");

        let mut f = File::create(&pin_path).unwrap();
        writeln!(f, "pincode,statename").unwrap();
        writeln!(f, "575073,KARNATAKA").unwrap();
        let mut f = File::create(&city_path).unwrap();
        writeln!(f, "city,state").unwrap();
        writeln!(f, "Udupi,Karnataka").unwrap();

        let data = ReferenceData::builder()
            .pincode_csv_file(&pin_path)
            .unwrap()
            .city_state_csv_file(&city_path)
            .unwrap()
            .build();

        assert_eq!(data.state_for_pincode("575073"), Some("KARNATAKA"));
        assert!(data.is_city("udupi"));
        assert!(data.is_state("karnataka"));
    }
}
