//! Delimited-table loader with encoding trial and delimiter detection.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use encoding_rs::{EUC_KR, UTF_8, WINDOWS_1252};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::source::{DataTable, SourceMetadata};
use crate::error::{Result, TidyError};

/// Separators considered by [`detect_delimiter`], in tie-break order.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Non-blank lines sampled for delimiter detection.
const SNIFF_LINES: usize = 10;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Text encodings tried, in order, when loading a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEncoding {
    /// Plain UTF-8 without a signature.
    Utf8,
    /// UTF-8 prefixed with a byte-order mark.
    Utf8Sig,
    /// Korean code page 949 (EUC-KR superset).
    Cp949,
    /// Latin-1, decoded as windows-1252. Never fails.
    Latin1,
}

impl InputEncoding {
    /// Trial order used by [`Parser::parse_file`].
    pub const TRIAL_ORDER: [InputEncoding; 4] = [
        InputEncoding::Utf8,
        InputEncoding::Utf8Sig,
        InputEncoding::Cp949,
        InputEncoding::Latin1,
    ];

    /// Short label used in logs and metadata.
    pub fn label(&self) -> &'static str {
        match self {
            InputEncoding::Utf8 => "utf-8",
            InputEncoding::Utf8Sig => "utf-8-sig",
            InputEncoding::Cp949 => "cp949",
            InputEncoding::Latin1 => "latin-1",
        }
    }

    /// Strictly decode `bytes`, returning `None` on any malformed sequence.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            // Signature-bearing input is left to `Utf8Sig` so the BOM never
            // leaks into the first header.
            InputEncoding::Utf8 if bytes.starts_with(UTF8_BOM) => None,
            InputEncoding::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
            InputEncoding::Utf8Sig => {
                let stripped = bytes.strip_prefix(UTF8_BOM)?;
                UTF_8.decode_without_bom_handling_and_without_replacement(stripped)
            }
            InputEncoding::Cp949 => EUC_KR.decode_without_bom_handling_and_without_replacement(bytes),
            InputEncoding::Latin1 => {
                let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
                (!had_errors).then_some(text)
            }
        }
    }
}

/// Loader settings. The default sniffs the separator.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Fixed separator; `None` sniffs one from the text.
    pub delimiter: Option<u8>,
}

/// Loads delimited table files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Load a file, trying each encoding in [`InputEncoding::TRIAL_ORDER`].
    ///
    /// The first encoding that both decodes strictly and parses as a table
    /// wins. A missing file is reported as [`TidyError::InputNotFound`].
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(TidyError::InputNotFound(path.to_path_buf()));
        }

        let contents = fs::read(path).map_err(|e| TidyError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let hash = format!("sha256:{:x}", Sha256::digest(&contents));

        let mut last_error = String::from("no encodings tried");
        for encoding in InputEncoding::TRIAL_ORDER {
            let Some(text) = encoding.decode(&contents) else {
                debug!(encoding = encoding.label(), "decode failed");
                last_error = format!("invalid byte sequence for {}", encoding.label());
                continue;
            };

            let delimiter = match self.config.delimiter {
                Some(d) => d,
                None => detect_delimiter(&text)?,
            };

            match self.parse_str(&text, delimiter) {
                Ok(table) => {
                    let metadata = SourceMetadata::new(
                        path.to_path_buf(),
                        hash,
                        contents.len() as u64,
                        format_name(delimiter),
                        encoding.label().to_string(),
                        table.row_count(),
                        table.column_count(),
                    );
                    info!(
                        file = %metadata.file,
                        encoding = encoding.label(),
                        rows = table.row_count(),
                        columns = table.column_count(),
                        "loaded table"
                    );
                    return Ok((table, metadata));
                }
                Err(TidyError::Csv(e)) => {
                    debug!(encoding = encoding.label(), error = %e, "parse failed");
                    last_error = e.to_string();
                }
                Err(other) => return Err(other),
            }
        }

        Err(TidyError::Encoding {
            path: path.to_path_buf(),
            tried: InputEncoding::TRIAL_ORDER.iter().map(|e| e.label()).collect(),
            last_error,
        })
    }

    /// Parse already-decoded text.
    pub fn parse_str(&self, text: &str, delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(TidyError::EmptyData("No columns found".to_string()));
        }

        let width = headers.len();
        let mut rows = Vec::new();
        for record in reader.records() {
            let mut row: Vec<String> = record?.iter().map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        Ok(DataTable::new(headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn format_name(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
    .to_string()
}

/// Pick a separator from the first non-blank lines.
///
/// Candidates must occur on the header line. A separator whose count is the
/// same on every sampled line beats one whose count varies; after that the
/// higher header count wins, and earlier entries of [`DELIMITERS`] win ties.
/// Text with no candidate at all is read as comma-separated.
fn detect_delimiter(text: &str) -> Result<u8> {
    let sample: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();
    let Some(header) = sample.first() else {
        return Err(TidyError::EmptyData("No lines to detect a delimiter from".to_string()));
    };

    let mut best: Option<((bool, usize), u8)> = None;
    for &delimiter in DELIMITERS {
        let in_header = count_unquoted(header, delimiter);
        if in_header == 0 {
            continue;
        }
        let consistent = sample.iter().all(|line| count_unquoted(line, delimiter) == in_header);
        let score = (consistent, in_header);
        if best.is_none_or(|(top, _)| score > top) {
            best = Some((score, delimiter));
        }
    }

    Ok(best.map_or(b',', |(_, delimiter)| delimiter))
}

/// Occurrences of `delimiter` outside double-quoted spans.
fn count_unquoted(line: &str, delimiter: u8) -> usize {
    line.split('"')
        .step_by(2)
        .map(|outside| outside.bytes().filter(|&b| b == delimiter).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_bytes(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn test_detect_delimiter_csv() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3\n4,5,6").unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3\n4\t5\t6").unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted_commas() {
        let text = "country;value\n\"Korea, Rep.\";1\n\"Bahamas, The\";2";
        assert_eq!(detect_delimiter(text).unwrap(), b';');
    }

    #[test]
    fn test_fixed_delimiter_skips_detection() {
        let file = write_bytes(b"a;b;c,d\n1;2;3,4\n");
        let parser = Parser::with_config(ParserConfig { delimiter: Some(b',') });
        let (table, meta) = parser.parse_file(file.path()).unwrap();
        assert_eq!(table.headers, vec!["a;b;c", "d"]);
        assert_eq!(meta.format, "csv");

        let (sniffed, meta) = Parser::new().parse_file(file.path()).unwrap();
        assert_eq!(sniffed.column_count(), 3);
        assert_eq!(meta.format, "csv-semicolon");
    }

    #[test]
    fn test_parse_trims_headers_and_pads_rows() {
        let table = Parser::new()
            .parse_str(" country , 2020\nKOR\nUSA,5", b',')
            .unwrap();
        assert_eq!(table.headers, vec!["country", "2020"]);
        assert_eq!(table.rows[0], vec!["KOR", ""]);
        assert_eq!(table.get(1, 1), Some("5"));
    }

    #[test]
    fn test_header_only_table_has_no_rows() {
        let table = Parser::new().parse_str("ISO3,count,region\n", b',').unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_utf8_wins_for_plain_input() {
        let file = write_bytes("country,2020\nKOR,1\n".as_bytes());
        let (_, meta) = Parser::new().parse_file(file.path()).unwrap();
        assert_eq!(meta.encoding, "utf-8");
        assert_eq!(meta.format, "csv");
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"country,2020\nKOR,1\n");
        let file = write_bytes(&bytes);
        let (table, meta) = Parser::new().parse_file(file.path()).unwrap();
        assert_eq!(meta.encoding, "utf-8-sig");
        assert_eq!(table.headers[0], "country");
    }

    #[test]
    fn test_cp949_fallback() {
        let (encoded, _, _) = EUC_KR.encode("국가,2020\n한국,1\n");
        let file = write_bytes(&encoded);
        let (table, meta) = Parser::new().parse_file(file.path()).unwrap();
        assert_eq!(meta.encoding, "cp949");
        assert_eq!(table.headers[0], "국가");
        assert_eq!(table.get(0, 0), Some("한국"));
    }

    #[test]
    fn test_latin1_fallback() {
        // 0xE9 followed by ',' is invalid in both UTF-8 and EUC-KR
        let file = write_bytes(b"country,2020\nCura\xE7ao\xE9,1\n");
        let (table, meta) = Parser::new().parse_file(file.path()).unwrap();
        assert_eq!(meta.encoding, "latin-1");
        assert_eq!(table.get(0, 0), Some("Curaçaoé"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = Parser::new().parse_file("/nonexistent/Data.csv").unwrap_err();
        assert!(matches!(err, TidyError::InputNotFound(_)));
    }

    #[test]
    fn test_is_null_value() {
        assert!(DataTable::is_null_value(""));
        assert!(DataTable::is_null_value("NA"));
        assert!(DataTable::is_null_value("NaN"));
        assert!(DataTable::is_null_value("null"));
        assert!(!DataTable::is_null_value("-"));
        assert!(!DataTable::is_null_value("0"));
        assert!(!DataTable::is_null_value("USA"));
    }
}
