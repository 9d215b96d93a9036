//! Bulk parsing of CSV exports
//!
//! The input must have an `address` column. Every input row is written back
//! unchanged, followed by the seven parsed fields.

use crate::error::{Error, Result};
use crate::parser::AddressParser;
use crate::record::FIELD_NAMES;
use csv::{ByteRecord, ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Name of the required input column
pub const ADDRESS_COLUMN: &str = "address";

/// Counts reported after a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Rows read and written
    pub rows: usize,
    pub with_city: usize,
    pub with_state: usize,
    pub with_pincode: usize,
}

/// Parse the `address` column of every row and append the parsed fields.
///
/// The whole input is read before anything is written, so a read error
/// leaves `writer` untouched. Cells that are not valid UTF-8 are decoded
/// lossily and the row is still parsed and written.
/// Rows are fitted to the header: short rows are padded with empty cells and
/// cells beyond the header are dropped.
pub fn parse_csv<R: Read, W: Write>(
    parser: &AddressParser,
    reader: R,
    writer: W,
) -> Result<BatchSummary> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = decode_lossy(csv_reader.byte_headers()?);
    let address_col = headers
        .iter()
        .position(|h| h.trim() == ADDRESS_COLUMN)
        .ok_or_else(|| Error::MissingColumn(ADDRESS_COLUMN.to_string()))?;

    let mut records = Vec::new();
    for result in csv_reader.byte_records() {
        records.push(decode_lossy(&result?));
    }

    let mut csv_writer = WriterBuilder::new().flexible(true).from_writer(writer);

    let mut out_headers = headers.clone();
    out_headers.extend(FIELD_NAMES);
    csv_writer.write_record(&out_headers)?;

    let mut summary = BatchSummary::default();
    for record in &records {
        let parsed = parser.parse(record.get(address_col).unwrap_or(""));

        let mut row = StringRecord::with_capacity(256, headers.len() + FIELD_NAMES.len());
        for i in 0..headers.len() {
            row.push_field(record.get(i).unwrap_or(""));
        }
        for (_, value) in parsed.fields() {
            row.push_field(value);
        }
        csv_writer.write_record(&row)?;

        summary.rows += 1;
        summary.with_city += usize::from(parsed.has_city());
        summary.with_state += usize::from(parsed.has_state());
        summary.with_pincode += usize::from(parsed.has_pincode());
    }

    csv_writer.flush()?;

    log::info!(
        "parsed {} rows ({} with city, {} with state, {} with pincode)",
        summary.rows,
        summary.with_city,
        summary.with_state,
        summary.with_pincode
    );
    Ok(summary)
}

/// [`parse_csv`] between two files. A missing input file is an error.
///
/// The output file is only created once the whole batch has succeeded.
pub fn parse_csv_file(
    parser: &AddressParser,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<BatchSummary> {
    let input = input.as_ref();
    let reader = File::open(input)
        .map_err(|e| Error::DataLoadError(format!("{}: {}", input.display(), e)))?;

    let mut buffer = Vec::new();
    let summary = parse_csv(parser, BufReader::new(reader), &mut buffer)?;

    std::fs::write(output.as_ref(), &buffer)?;
    log::info!("output saved to {}", output.as_ref().display());
    Ok(summary)
}

fn decode_lossy(record: &ByteRecord) -> StringRecord {
    record.iter().map(String::from_utf8_lossy).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ReferenceDataBuilder;
    use std::io;

    fn run(input: &str) -> Result<(BatchSummary, String)> {
        let mut out = Vec::new();
        let summary = parse_csv(&AddressParser::new(), input.as_bytes(), &mut out)?;
        Ok((summary, String::from_utf8(out).unwrap()))
    }

    #[test]
    fn test_appends_fields() {
        let input = "id,address\n\
                     1,\"B-177 ; Green Heights ; Mangaluru ; Karnataka ; 575073\"\n";
        let (summary, output) = run(input).unwrap();

        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("id,address,address_line_1,address_line_2,address_line_3,landmark,city,state,pincode")
        );
        assert_eq!(
            lines.next(),
            Some("1,B-177 ; Green Heights ; Mangaluru ; Karnataka ; 575073,B-177,Green Heights,,,Mangaluru,Karnataka,575073")
        );
        assert_eq!(lines.next(), None);

        assert_eq!(
            summary,
            BatchSummary {
                rows: 1,
                with_city: 1,
                with_state: 1,
                with_pincode: 1,
            }
        );
    }

    #[test]
    fn test_every_row_written() {
        let input = "address,phone\n\
                     ,9876543210\n\
                     some random text,\n\
                     \"Near Clock Tower, Meerut\",123\n";
        let (summary, output) = run(input).unwrap();

        assert_eq!(summary.rows, 3);
        assert_eq!(summary.with_city, 1);
        assert_eq!(output.lines().count(), 4);
        assert!(output.lines().nth(1).unwrap().starts_with(",9876543210,,,,,,,"));
        assert!(output.lines().nth(2).unwrap().contains("Some Random Text"));
    }

    #[test]
    fn test_short_rows_padded() {
        let input = "address,notes\nRanchi ; 834086\n";
        let (_, output) = run(input).unwrap();
        assert_eq!(
            output.lines().nth(1),
            Some("Ranchi ; 834086,,,,,,Ranchi,,834086")
        );
    }

    #[test]
    fn test_missing_address_column() {
        let mut out = Vec::new();
        let err = parse_csv(&AddressParser::new(), "name,phone\nA,1\n".as_bytes(), &mut out)
            .unwrap_err();

        assert!(matches!(err, Error::MissingColumn(ref c) if c == "address"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_parse_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "address\n8/4 ; Silver CHS ; Enclave 92 ; Ranchi ; 834086\n").unwrap();

        let parser = AddressParser::with_reference(
            ReferenceDataBuilder::with_defaults()
                .pincode("834086", "JHARKHAND")
                .build(),
        );
        let summary = parse_csv_file(&parser, &input, &output).unwrap();
        assert_eq!(summary.with_state, 1);

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            written.lines().nth(1),
            Some("8/4 ; Silver CHS ; Enclave 92 ; Ranchi ; 834086,8/4,Silver Chs,Enclave 92,,Ranchi,Jharkhand,834086")
        );
    }

    #[test]
    fn test_parse_csv_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let err = parse_csv_file(&AddressParser::new(), dir.path().join("nope.csv"), &output)
            .unwrap_err();

        assert!(matches!(err, Error::DataLoadError(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_parse_csv_file_bad_header_creates_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "name\nA\n").unwrap();

        let err = parse_csv_file(&AddressParser::new(), &input, &output).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_utf8_row_is_degraded_not_dropped() {
        let input: &[u8] = b"address\nRanchi ; 834086\nPune \xff\xfe ; 411001\nSurat ; Gujarat\n";
        let mut out = Vec::new();
        let summary = parse_csv(&AddressParser::new(), input, &mut out).unwrap();

        assert_eq!(
            summary,
            BatchSummary {
                rows: 3,
                with_city: 3,
                with_state: 1,
                with_pincode: 2,
            }
        );
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.lines().count(), 4);
        assert!(output
            .lines()
            .nth(2)
            .unwrap()
            .ends_with("\u{FFFD}\u{FFFD},,,,Pune,,411001"));
    }

    #[test]
    fn test_parse_csv_file_invalid_utf8_row() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(
            &input,
            b"address\nRanchi ; 834086\nPune \xff\xfe ; 411001\nSurat ; Gujarat\n",
        )
        .unwrap();

        let summary = parse_csv_file(&AddressParser::new(), &input, &output).unwrap();
        assert_eq!(summary.rows, 3);

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 4);
        assert!(written.lines().nth(3).unwrap().starts_with("Surat ; Gujarat,"));
    }

    /// Yields `data`, then fails on the next read.
    struct FailingReader {
        data: &'static [u8],
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(io::ErrorKind::Other, "connection reset"));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_read_error_writes_nothing() {
        let reader = FailingReader {
            data: b"address\nRanchi ; 834086\nSurat ; Gujarat\n",
        };
        let mut out = Vec::new();
        let err = parse_csv(&AddressParser::new(), reader, &mut out).unwrap_err();

        assert!(matches!(err, Error::Csv(_)));
        assert!(out.is_empty());
    }
}
