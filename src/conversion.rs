//! Conversion driver.
//!
//! A conversion resolves the column mapping once and then streams every input
//! row through the [`RowTransformer`], in order, one output row per input row.

use crate::config::ConversionConfig;
use crate::error::{Error, Result};
use crate::mapping::{FieldMapping, MappingSpec};
use crate::schema::{self, InputSchema, Source};
use crate::transform::RowTransformer;
use crate::types::{HomeBankRecord, TargetField};
use csv::{Reader, ReaderBuilder, StringRecord, StringRecordsIntoIter, WriterBuilder};
use log::{debug, info};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// A conversion whose mapping is resolved and whose rows are still unread.
pub struct Conversion<R: Read> {
    reader: Reader<Source<R>>,
    schema: InputSchema,
    preview: Option<StringRecord>,
    transformer: RowTransformer,
}

impl<R: Read> Conversion<R> {
    /// Discover the input columns and resolve the mapping.
    ///
    /// Nothing is written here, so a missing header row or an invalid
    /// configuration fails before any output exists.
    pub fn prepare(source: R, config: &ConversionConfig, spec: &mut MappingSpec<'_>) -> Result<Self> {
        let source = schema::check_header_line(source)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(config.input_delimiter)
            .flexible(true)
            .from_reader(source);

        let (schema, preview) = InputSchema::discover(&mut reader)?;
        debug!("Input columns: {:?}", schema.columns());

        let mapping = spec.resolve(&schema)?;
        let transformer = RowTransformer::new(mapping, config.date_format.clone());

        Ok(Self {
            reader,
            schema,
            preview,
            transformer,
        })
    }

    pub fn schema(&self) -> &InputSchema {
        &self.schema
    }

    pub fn mapping(&self) -> &FieldMapping {
        self.transformer.mapping()
    }

    /// Lazily transformed output rows, in input order.
    ///
    /// The row shown as preview during mapping comes first, exactly once.
    pub fn rows(self) -> ConvertedRows<R> {
        ConvertedRows {
            pending: self.preview,
            records: self.reader.into_records(),
            transformer: self.transformer,
        }
    }

    /// Write the header and all rows to `writer`, returning the row count.
    pub fn write_to<W: Write>(self, writer: W, separator: u8) -> Result<usize> {
        let mut csv_writer = WriterBuilder::new()
            .delimiter(separator)
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(TargetField::HEADERS)?;

        let mut count = 0;
        for record in self.rows() {
            csv_writer.serialize(record?)?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }
}

/// Iterator over converted rows. Not restartable.
pub struct ConvertedRows<R: Read> {
    pending: Option<StringRecord>,
    records: StringRecordsIntoIter<Source<R>>,
    transformer: RowTransformer,
}

impl<R: Read> Iterator for ConvertedRows<R> {
    type Item = Result<HomeBankRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(row) = self.pending.take() {
            return Some(Ok(self.transformer.transform(&row)));
        }
        let row = self.records.next()?;
        Some(
            row.map(|row| self.transformer.transform(&row))
                .map_err(Error::from),
        )
    }
}

/// Convert the file at `input` into a HomeBank CSV at `output`.
///
/// The output file is only created once the mapping is resolved.
pub fn convert_file(
    input: &Path,
    output: &Path,
    config: &ConversionConfig,
    spec: &mut MappingSpec<'_>,
) -> Result<usize> {
    let source = File::open(input).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::SourceNotFound(input.to_path_buf()),
        _ => Error::Io(err),
    })?;

    let conversion = Conversion::prepare(source, config, spec)?;

    let sink = File::create(output)?;
    let count = conversion.write_to(sink, config.output_separator)?;
    info!("Wrote {} rows to {}", count, output.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_format::DateFormat;
    use crate::mapping::Selections;
    use crate::prompt::testutils::ScriptedPrompter;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn scenario_selections() -> Selections {
        Selections::new()
            .with_column(TargetField::Date, "1")
            .with_column(TargetField::Payee, "2")
            .with_column(TargetField::Amount, "3")
            .with_default_payment_type("3")
    }

    fn convert_str(input: &str, config: &ConversionConfig, selections: Selections) -> Result<String> {
        let mut spec = MappingSpec::declarative(selections);
        let conversion = Conversion::prepare(input.as_bytes(), config, &mut spec)?;
        let mut output = Vec::new();
        conversion.write_to(&mut output, config.output_separator)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_convert_basic_row() {
        let output = convert_str(
            "txn_date,desc,amt\n2024-03-05,Coffee,-3.50\n",
            &ConversionConfig::default(),
            scenario_selections(),
        )
        .unwrap();
        assert_eq!(
            output,
            "Date;Payment Type;Number;Payee;Memo;Amount;Category;Tags\n\
             2024-03-05;3;;Coffee;;-3.50;;\n"
        );
    }

    #[test]
    fn test_convert_day_first_dates() {
        let config = ConversionConfig {
            date_format: DateFormat::new("DD/MM/YYYY"),
            ..Default::default()
        };
        let output = convert_str(
            "txn_date,desc,amt\n05/03/2024,Coffee,-3.50\n",
            &config,
            scenario_selections(),
        )
        .unwrap();
        assert!(output.ends_with("2024-03-05;3;;Coffee;;-3.50;;\n"));
    }

    #[test]
    fn test_bad_date_does_not_abort() {
        let output = convert_str(
            "txn_date,desc,amt\nnot-a-date,Coffee,-3.50\n2024-03-06,Tea,-2.00\n",
            &ConversionConfig::default(),
            scenario_selections(),
        )
        .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "not-a-date;3;;Coffee;;-3.50;;");
        assert_eq!(lines[2], "2024-03-06;3;;Tea;;-2.00;;");
    }

    #[test]
    fn test_rows_preserve_order_and_count() {
        let mut input = String::from("n,desc\n");
        for i in 0..50 {
            input.push_str(&format!("{i},row {i}\n"));
        }
        let mut spec = MappingSpec::declarative(
            Selections::new()
                .with_column(TargetField::Number, "1")
                .with_column(TargetField::Memo, "2"),
        );
        let conversion =
            Conversion::prepare(input.as_bytes(), &ConversionConfig::default(), &mut spec).unwrap();

        let numbers: Vec<String> = conversion.rows().map(|row| row.unwrap().number).collect();
        let expected: Vec<String> = (0..50).map(|i| i.to_string()).collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn test_interactive_preview_row_is_converted_once() {
        let input = "txn_date,desc,amt\n2024-03-05,Coffee,-3.50\n2024-03-06,Tea,-2.00\n";
        let mut prompter = ScriptedPrompter::new(&["1", "", "", "2", "", "3", "", "", "9"]);
        let mut spec = MappingSpec::interactive(&mut prompter);

        let conversion =
            Conversion::prepare(input.as_bytes(), &ConversionConfig::default(), &mut spec).unwrap();
        let payees: Vec<String> = conversion.rows().map(|row| row.unwrap().payee).collect();
        drop(spec);

        assert_eq!(payees, vec!["Coffee".to_string(), "Tea".to_string()]);
        assert!(prompter.output.contains("1: txn_date (Example: 2024-03-05)"));
    }

    #[test]
    fn test_header_written_without_rows() {
        let output = convert_str(
            "txn_date,desc,amt\n",
            &ConversionConfig::default(),
            scenario_selections(),
        )
        .unwrap();
        assert_eq!(output, "Date;Payment Type;Number;Payee;Memo;Amount;Category;Tags\n");
    }

    #[test]
    fn test_custom_delimiters() {
        let config = ConversionConfig::new(";", ",", "DD.MM.YYYY").unwrap();
        let output = convert_str(
            "Buchungstag;Empfänger;Betrag\n05.03.2024;Bäcker, Müller;-3,50\n",
            &config,
            scenario_selections(),
        )
        .unwrap();
        assert!(output.starts_with("Date,Payment Type,Number,"));
        assert!(output.ends_with("2024-03-05,3,,\"Bäcker, Müller\",,\"-3,50\",,\n"));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let result = convert_str("", &ConversionConfig::default(), scenario_selections());
        assert!(matches!(result, Err(Error::EmptySchema)));
    }

    #[test]
    fn test_blank_header_line_is_rejected() {
        let result = convert_str(
            "\n2024-03-05,Coffee,-3.50\n2024-03-06,Tea,-2.00\n",
            &ConversionConfig::default(),
            scenario_selections(),
        );
        assert!(matches!(result, Err(Error::EmptySchema)));
    }

    #[test]
    fn test_convert_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bank.csv");
        let output = dir.path().join("homebank.csv");
        fs::write(&input, "txn_date,desc,amt\n2024-03-05,Coffee,-3.50\n").unwrap();

        let mut spec = MappingSpec::declarative(scenario_selections());
        let count = convert_file(&input, &output, &ConversionConfig::default(), &mut spec).unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Date;Payment Type;Number;Payee;Memo;Amount;Category;Tags\n\
             2024-03-05;3;;Coffee;;-3.50;;\n"
        );
    }

    #[test]
    fn test_convert_file_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.csv");
        let output = dir.path().join("homebank.csv");

        let mut spec = MappingSpec::declarative(scenario_selections());
        let result = convert_file(&input, &output, &ConversionConfig::default(), &mut spec);

        assert!(matches!(result, Err(Error::SourceNotFound(path)) if path == input));
        assert!(!output.exists());
    }

    #[test]
    fn test_convert_file_empty_header_creates_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bank.csv");
        let output = dir.path().join("homebank.csv");
        fs::write(&input, "").unwrap();

        let mut spec = MappingSpec::declarative(scenario_selections());
        let result = convert_file(&input, &output, &ConversionConfig::default(), &mut spec);

        assert!(matches!(result, Err(Error::EmptySchema)));
        assert!(!output.exists());
    }

    #[test]
    fn test_convert_file_blank_header_line_creates_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bank.csv");
        let output = dir.path().join("homebank.csv");
        fs::write(&input, "\n2024-03-05,Coffee,-3.50\n").unwrap();

        let mut spec = MappingSpec::declarative(scenario_selections());
        let result = convert_file(&input, &output, &ConversionConfig::default(), &mut spec);

        assert!(matches!(result, Err(Error::EmptySchema)));
        assert!(!output.exists());
    }

    #[test]
    fn test_convert_file_invalid_default_creates_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bank.csv");
        let output = dir.path().join("homebank.csv");
        fs::write(&input, "txn_date,desc,amt\n2024-03-05,Coffee,-3.50\n").unwrap();

        let mut spec = MappingSpec::declarative(
            Selections::new()
                .with_column(TargetField::Date, "1")
                .with_default_payment_type("5"),
        );
        let result = convert_file(&input, &output, &ConversionConfig::default(), &mut spec);

        assert!(matches!(result, Err(Error::InvalidPaymentType(_))));
        assert!(!output.exists());
    }
}
