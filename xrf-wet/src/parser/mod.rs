//! Reference table loader with encoding and delimiter auto-detection.
//!
//! Reads a CSV file with a header row and turns one key column and one
//! numeric value column into a [`Composition`]. No chemistry here.

use std::path::Path;

use crate::error::{CsvError, CsvErrorKind, CsvResult};
use crate::logs::{log_info_indent, log_success_indent, log_warning_indent};
use crate::models::{Composition, RatioTable};

/// A loaded table with the metadata detected while reading it
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// Key column -> value column, in file order
    pub values: Composition,
    /// Detected encoding
    pub encoding: String,
    /// Detected delimiter
    pub delimiter: char,
    /// Column headers
    pub headers: Vec<String>,
    /// Names that appeared on more than one row (last row wins)
    pub duplicates: Vec<String>,
}

/// Which two columns of a table to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableColumns<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> TableColumns<'a> {
    pub const fn new(key: &'a str, value: &'a str) -> Self {
        Self { key, value }
    }
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "utf-8-sig" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.into_owned(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };

    decoded.trim_start_matches('\u{feff}').to_string()
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Falls back to `,` when the header has no separator at all.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse a table from decoded text with an explicit delimiter.
///
/// # Example
/// ```
/// use xrfwet::parser::{parse_table, TableColumns};
///
/// let csv = "Element,XRF_wt_percent_dry\nFe,60.0\nSi,40.0";
/// let table = parse_table(csv, ',', TableColumns::new("Element", "XRF_wt_percent_dry")).unwrap();
///
/// assert_eq!(table.values.get("Fe"), Some(60.0));
/// assert_eq!(table.values.len(), 2);
/// ```
pub fn parse_table(content: &str, delimiter: char, columns: TableColumns<'_>) -> CsvResult<LoadedTable> {
    parse_table_with_encoding(content, delimiter, columns, "utf-8".to_string())
}

fn parse_table_with_encoding(
    content: &str,
    delimiter: char,
    columns: TableColumns<'_>,
    encoding: String,
) -> CsvResult<LoadedTable> {
    if content.trim().is_empty() {
        return Err(CsvError::new(CsvErrorKind::Empty, 1, "CSV file is empty"));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CsvError::new(CsvErrorKind::Malformed, 1, format!("Cannot read header: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let key_idx = column_index(&headers, columns.key)?;
    let value_idx = column_index(&headers, columns.value)?;

    let mut values = Composition::new();
    let mut duplicates = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let fallback_line = row_idx + 2; // +1 for 0-index, +1 for header
        let record = result.map_err(|e| {
            let line = e
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(fallback_line);
            CsvError::new(CsvErrorKind::Malformed, line, e.to_string())
        })?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let key = record.get(key_idx).unwrap_or("");
        if key.is_empty() {
            return Err(CsvError::new(CsvErrorKind::Malformed, line, "Missing key")
                .with_column(columns.key));
        }

        let raw_value = record.get(value_idx).unwrap_or("");
        let value = raw_value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                CsvError::new(CsvErrorKind::InvalidValue, line, "Not a finite number")
                    .with_column(columns.value)
                    .with_value(raw_value)
            })?;

        if values.insert(key, value).is_some() {
            duplicates.push(key.to_string());
        }
    }

    Ok(LoadedTable {
        values,
        encoding,
        delimiter,
        headers,
        duplicates,
    })
}

fn column_index(headers: &[String], name: &str) -> CsvResult<usize> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        CsvError::new(
            CsvErrorKind::MissingColumn,
            1,
            format!("Missing column (found: {})", headers.join(", ")),
        )
        .with_column(name)
    })
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8], columns: TableColumns<'_>) -> CsvResult<LoadedTable> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);

    parse_table_with_encoding(&content, delimiter, columns, encoding)
}

/// Load a table file with auto-detection, logging what was found.
pub fn load_table<P: AsRef<Path>>(path: P, columns: TableColumns<'_>) -> CsvResult<LoadedTable> {
    let path = path.as_ref();
    log_info_indent(format!("Reading {}", path.display()), 0);

    let bytes = std::fs::read(path).map_err(|e| CsvError::io(path, &e))?;
    let table = parse_bytes_auto(&bytes, columns)?;

    log_success_indent(
        format!(
            "{} rows ({}, delimiter '{}')",
            table.values.len(),
            table.encoding,
            format_delimiter(table.delimiter)
        ),
        1,
    );
    for name in &table.duplicates {
        log_warning_indent(format!("'{}' appears more than once, last row kept", name), 1);
    }

    Ok(table)
}

/// Load a dry-basis composition table.
pub fn load_composition<P: AsRef<Path>>(path: P, columns: TableColumns<'_>) -> CsvResult<Composition> {
    load_table(path, columns).map(|t| t.values)
}

/// Load a conversion ratio table.
pub fn load_ratios<P: AsRef<Path>>(path: P, columns: TableColumns<'_>) -> CsvResult<RatioTable> {
    load_table(path, columns).map(|t| t.values.into())
}

pub fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DRY: TableColumns<'static> = TableColumns::new("Element", "XRF_wt_percent_dry");

    #[test]
    fn test_simple_table() {
        let csv = "Element,XRF_wt_percent_dry\nFe,60.0\nSi,40.0";
        let table = parse_table(csv, ',', DRY).unwrap();

        assert_eq!(table.values.get("Fe"), Some(60.0));
        assert_eq!(table.values.get("Si"), Some(40.0));
        assert_eq!(table.headers, vec!["Element", "XRF_wt_percent_dry"]);
    }

    #[test]
    fn test_semicolon_and_extra_columns() {
        let csv = "Sample;Element;XRF_wt_percent_dry;Note\nA;Fe;55.5;ok\nA;Ca;3.25;";
        let table = parse_bytes_auto(csv.as_bytes(), DRY).unwrap();

        assert_eq!(table.delimiter, ';');
        assert_eq!(table.values.get("Fe"), Some(55.5));
        assert_eq!(table.values.get("Ca"), Some(3.25));
    }

    #[test]
    fn test_quoted_and_padded_values() {
        let csv = "\"Element\",\"XRF_wt_percent_dry\"\n\"Fe\",\"60.0\"\n Si , 1e1 ";
        let table = parse_table(csv, ',', DRY).unwrap();

        assert_eq!(table.values.get("Fe"), Some(60.0));
        assert_eq!(table.values.get("Si"), Some(10.0));
    }

    #[test]
    fn test_empty_lines_skipped() {
        let csv = "Element,XRF_wt_percent_dry\nFe,60\n\n,\nSi,40\n";
        let table = parse_table(csv, ',', DRY).unwrap();
        assert_eq!(table.values.len(), 2);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let csv = "Element,XRF_wt_percent_dry\nFe,60\nSi,40\nFe,61";
        let table = parse_table(csv, ',', DRY).unwrap();

        assert_eq!(table.values.get("Fe"), Some(61.0));
        assert_eq!(table.duplicates, vec!["Fe"]);
        assert_eq!(table.values.iter().next().unwrap().name, "Fe");
    }

    #[test]
    fn test_missing_column() {
        let csv = "Element,Percent\nFe,60";
        let err = parse_table(csv, ',', DRY).unwrap_err();

        assert_eq!(err.kind, CsvErrorKind::MissingColumn);
        assert!(err.to_string().contains("XRF_wt_percent_dry"));
    }

    #[test]
    fn test_invalid_value() {
        let csv = "Element,XRF_wt_percent_dry\nFe,60\nSi,abc";
        let err = parse_table(csv, ',', DRY).unwrap_err();

        assert_eq!(err.kind, CsvErrorKind::InvalidValue);
        assert_eq!(err.line, 3);
        assert_eq!(err.value.as_deref(), Some("abc"));
    }

    #[test]
    fn test_non_finite_values_are_invalid() {
        for raw in ["nan", "NaN", "inf", "-infinity"] {
            let csv = format!("Element,XRF_wt_percent_dry\nFe,60\nSi,{}", raw);
            let err = parse_table(&csv, ',', DRY).unwrap_err();

            assert_eq!(err.kind, CsvErrorKind::InvalidValue);
            assert_eq!(err.line, 3);
            assert_eq!(err.value.as_deref(), Some(raw));
        }
    }

    #[test]
    fn test_empty_value_is_invalid() {
        let csv = "Element,XRF_wt_percent_dry\nFe,";
        let err = parse_table(csv, ',', DRY).unwrap_err();
        assert_eq!(err.kind, CsvErrorKind::InvalidValue);
    }

    #[test]
    fn test_empty_csv_error() {
        let err = parse_table("", ',', DRY).unwrap_err();
        assert_eq!(err.kind, CsvErrorKind::Empty);
        assert!(err.message.contains("empty"));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), '|');
        assert_eq!(detect_delimiter("single"), ',');
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert!(decoded.contains("Soci"));
        assert!(decoded.contains('é'));
    }

    #[test]
    fn test_bom_stripped() {
        let bytes = b"\xEF\xBB\xBFElement,XRF_wt_percent_dry\nFe,60";
        let table = parse_bytes_auto(bytes, DRY).unwrap();
        assert_eq!(table.values.get("Fe"), Some(60.0));
    }

    #[test]
    fn test_load_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Element,ElementToOxideRatio").unwrap();
        writeln!(file, "Fe,1.43").unwrap();
        writeln!(file, "Si,2.14").unwrap();

        let ratios =
            load_ratios(file.path(), TableColumns::new("Element", "ElementToOxideRatio")).unwrap();
        assert_eq!(ratios.factor("Fe"), 1.43);
        assert_eq!(ratios.factor("Al"), 1.0);
        assert_eq!(ratios.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_composition(dir.path().join("nope.csv"), DRY).unwrap_err();
        assert_eq!(err.kind, CsvErrorKind::Io);
        assert!(err.to_string().contains("nope.csv"));
    }
}
