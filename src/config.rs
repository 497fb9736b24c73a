//! Conversion settings shared by the interactive and command line front ends.

use crate::date_format::DateFormat;
use crate::error::{Error, Result};

/// Default delimiter of bank exports.
pub const DEFAULT_INPUT_DELIMITER: &str = ",";

/// Default separator HomeBank expects.
pub const DEFAULT_OUTPUT_SEPARATOR: &str = ";";

/// Default declared date format.
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Dialect settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    /// Field delimiter of the input file.
    pub input_delimiter: u8,

    /// Field separator of the output file.
    pub output_separator: u8,

    /// Format of the values in the mapped date column.
    pub date_format: DateFormat,
}

impl ConversionConfig {
    /// Build a config from user-supplied strings.
    pub fn new(input_delimiter: &str, output_separator: &str, date_format: &str) -> Result<Self> {
        Ok(Self {
            input_delimiter: parse_delimiter(input_delimiter)?,
            output_separator: parse_delimiter(output_separator)?,
            date_format: DateFormat::new(date_format),
        })
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input_delimiter: b',',
            output_separator: b';',
            date_format: DateFormat::default(),
        }
    }
}

/// Parse a delimiter given as a single ASCII character. `\t` means tab.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    if s == "\\t" {
        return Ok(b'\t');
    }
    match s.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(Error::InvalidDelimiter(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_constants() {
        let config = ConversionConfig::new(
            DEFAULT_INPUT_DELIMITER,
            DEFAULT_OUTPUT_SEPARATOR,
            DEFAULT_DATE_FORMAT,
        )
        .unwrap();
        assert_eq!(config, ConversionConfig::default());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter("|").unwrap(), b'|');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert!(matches!(parse_delimiter(""), Err(Error::InvalidDelimiter(_))));
        assert!(matches!(parse_delimiter(";;"), Err(Error::InvalidDelimiter(_))));
        assert!(matches!(parse_delimiter("§"), Err(Error::InvalidDelimiter(_))));
    }
}
