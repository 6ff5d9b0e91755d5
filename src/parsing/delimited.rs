use std::path::Path;

use csv::{ReaderBuilder, Trim};
use thiserror::Error;

use crate::core::region::{canonical_code, ReferenceRow};
use crate::utils::validation::check_row_limit;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid region data: {0}")]
    InvalidFormat(String),

    #[error("Too many rows: {0} exceeds maximum allowed")]
    TooManyRows(usize),
}

/// Parse a delimited region file with columns: code, name, [...]
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_region_file(path: &Path, delimiter: char) -> Result<Vec<ReferenceRow>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_region_text(&content, delimiter)
}

/// Parse delimited text with columns: code, name, [...]
///
/// Fields follow RFC 4180 quoting, so a quoted name may contain the
/// delimiter. Codes are canonicalized to the zero-padded convention and
/// names are uppercased. Row order is preserved and duplicates are kept.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the delimiter is not ASCII or no
/// rows are found, `ParseError::Csv` on malformed records, or
/// `ParseError::TooManyRows` if the limit is exceeded.
pub fn parse_region_text(text: &str, delimiter: char) -> Result<Vec<ReferenceRow>, ParseError> {
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| ParseError::InvalidFormat(format!("delimiter {delimiter:?} is not ASCII")))?;

    // A byte-order mark would otherwise make the first row look like a header
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    let mut first_data_line = true;
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let code = record.get(0).unwrap_or_default();

        // A first line whose leading field is not a code is a header
        if first_data_line {
            first_data_line = false;
            if !looks_like_code(code) {
                continue;
            }
        }

        if code.is_empty() {
            skipped += 1;
            continue;
        }

        if check_row_limit(rows.len()).is_some() {
            return Err(ParseError::TooManyRows(rows.len()));
        }

        let name = record.get(1).unwrap_or_default();
        rows.push(ReferenceRow::new(canonical_code(code), name));
    }

    if skipped > 0 {
        tracing::debug!("Skipped {skipped} region rows without a code");
    }

    if rows.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No region rows found".to_string(),
        ));
    }

    Ok(rows)
}

fn looks_like_code(field: &str) -> bool {
    !field.is_empty() && field.chars().all(|c| c.is_ascii_digit() || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted_dataset() {
        let csv = "31,DKI JAKARTA\n31.71,KOTA ADM. JAKARTA SELATAN\n31.71.06,Kebayoran Baru\n31.71.06.1001,Gunung\n";

        let rows = parse_region_text(csv, ',').unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].code, "31000000");
        assert_eq!(rows[1].code, "31710000");
        assert_eq!(rows[2].code, "31710600");
        assert_eq!(rows[2].name, "KEBAYORAN BARU");
        assert_eq!(rows[3].code, "3171061001");
        assert_eq!(rows[3].name, "GUNUNG");
    }

    #[test]
    fn test_parse_with_header_and_extra_columns() {
        let csv = "kode,nama,keterangan\n31000000,DKI Jakarta,x\n31710000,Jakarta Selatan,y\n";

        let rows = parse_region_text(csv, ',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "DKI JAKARTA");
    }

    #[test]
    fn test_parse_quoted_fields() {
        let csv = "\"31000000\",\"DKI Jakarta\"\n";
        let rows = parse_region_text(csv, ',').unwrap();
        assert_eq!(rows[0].code, "31000000");
        assert_eq!(rows[0].name, "DKI JAKARTA");
    }

    #[test]
    fn test_parse_quoted_name_with_delimiter() {
        let csv = "\"3171061001\",\"GUNUNG, BARAT\"\n\"3171061002\",\"KAMPUNG \"\"LAMA\"\"\"\n";
        let rows = parse_region_text(csv, ',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, "3171061001");
        assert_eq!(rows[0].name, "GUNUNG, BARAT");
        assert_eq!(rows[1].name, "KAMPUNG \"LAMA\"");
    }

    #[test]
    fn test_parse_strips_byte_order_mark() {
        let csv = "\u{feff}11,ACEH\n11.01,KAB. ACEH SELATAN\n";
        let rows = parse_region_text(csv, ',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, "11000000");
        assert_eq!(rows[0].name, "ACEH");
    }

    #[test]
    fn test_parse_rejects_non_ascii_delimiter() {
        assert!(matches!(
            parse_region_text("31000000\u{2022}DKI\n", '\u{2022}'),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_keeps_duplicates_in_order() {
        let csv = "3171061001,GUNUNG\n3273011001,GUNUNG\n";
        let rows = parse_region_text(csv, ',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, "3171061001");
        assert_eq!(rows[1].code, "3273011001");
    }

    #[test]
    fn test_parse_missing_name_is_empty() {
        let rows = parse_region_text("31000000\n", ',').unwrap();
        assert_eq!(rows[0].name, "");
    }

    #[test]
    fn test_parse_tab_delimited_with_comments() {
        let tsv = "# region export\n\n31000000\tDKI JAKARTA\n";
        let rows = parse_region_text(tsv, '\t').unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_parse_empty_input_fails() {
        assert!(matches!(
            parse_region_text("", ','),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_region_text("code,name\n", ','),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
