//! HomeBank Converter - CLI tool for converting bank CSV exports to HomeBank CSV.
//!
//! Runs interactively when the input or output path is missing.

use clap::Parser;
use homebank_converter::{
    config::{DEFAULT_DATE_FORMAT, DEFAULT_INPUT_DELIMITER, DEFAULT_OUTPUT_SEPARATOR},
    convert_file, payment_type,
    prompt::{Prompter, TerminalPrompter},
    ConversionConfig, Error, MappingSpec, Result, Selections, TargetField, HOMEBANK_CSV_SPEC_URL,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "homebank_converter")]
#[command(
    about = "Convert bank CSV to HomeBank format. Run without arguments for interactive mode.",
    long_about = None
)]
struct Cli {
    /// Path to the input CSV file
    input: Option<PathBuf>,

    /// Path to save the output CSV file
    output: Option<PathBuf>,

    /// Delimiter used in the input file
    #[arg(long = "input-delimiter", alias = "input_delimiter", default_value = DEFAULT_INPUT_DELIMITER)]
    input_delimiter: String,

    /// Separator for the output file
    #[arg(
        long = "output-separator",
        visible_alias = "input-separator",
        alias = "input_separator",
        default_value = DEFAULT_OUTPUT_SEPARATOR
    )]
    output_separator: String,

    /// Date format in the input file, using the tokens YYYY, MM and DD
    #[arg(long = "date-format", alias = "date_format", default_value = DEFAULT_DATE_FORMAT)]
    date_format: String,

    /// Number of the column containing the date
    #[arg(long)]
    date: Option<String>,

    /// Number of the column containing the payment type
    #[arg(long = "payment-type", alias = "payment_type")]
    payment_type: Option<String>,

    /// Payment type for all transactions, used if no payment type column is given
    #[arg(long = "default-payment-type", alias = "default_payment_type", default_value = "0")]
    default_payment_type: String,

    /// Number of the column containing the cheque number, value date, card ID, transaction ID, or other details
    #[arg(long)]
    number: Option<String>,

    /// Number of the column containing the payee
    #[arg(long)]
    payee: Option<String>,

    /// Number of the column containing the memo
    #[arg(long)]
    memo: Option<String>,

    /// Number of the column containing the amount
    #[arg(long)]
    amount: Option<String>,

    /// Number of the column containing the category
    #[arg(long)]
    category: Option<String>,

    /// Number of the column containing the tags
    #[arg(long)]
    tags: Option<String>,

    /// Print debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn selections(&self) -> Selections {
        [
            (TargetField::Date, &self.date),
            (TargetField::PaymentType, &self.payment_type),
            (TargetField::Number, &self.number),
            (TargetField::Payee, &self.payee),
            (TargetField::Memo, &self.memo),
            (TargetField::Amount, &self.amount),
            (TargetField::Category, &self.category),
            (TargetField::Tags, &self.tags),
        ]
        .into_iter()
        .fold(Selections::new(), |selections, (field, selector)| {
            selections.with_optional_column(field, selector.clone())
        })
        .with_default_payment_type(self.default_payment_type.clone())
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprint!("{}", report_error(&e));
        std::process::exit(1);
    }
}

/// Error message for the user, with the payment type vocabulary when it helps.
fn report_error(e: &Error) -> String {
    let mut report = format!("Error: {}\n", e);
    if let Error::InvalidPaymentType(_) = e {
        report.push_str("\nTry with an integer from the list below:\n\n");
        report.push_str(&payment_type::options_listing());
    }
    report
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match (&cli.input, &cli.output) {
        (Some(input), Some(output)) => run_with_arguments(&cli, input, output),
        _ => run_interactive(&cli),
    }
}

fn run_with_arguments(cli: &Cli, input: &Path, output: &Path) -> Result<()> {
    // Reject bad settings before any file is touched
    let selections = cli.selections();
    selections.validate()?;
    let config = ConversionConfig::new(&cli.input_delimiter, &cli.output_separator, &cli.date_format)?;

    let mut spec = MappingSpec::declarative(selections);
    let count = convert_file(input, output, &config, &mut spec)?;
    report_success(output, count);
    Ok(())
}

fn run_interactive(cli: &Cli) -> Result<()> {
    let mut prompter = TerminalPrompter::new();
    prompter.show(&format!(
        "This tool converts a bank-exported CSV to a format compatible with HomeBank.\n\
         Specification details can be found at: {}\n",
        HOMEBANK_CSV_SPEC_URL
    ));

    let input = match &cli.input {
        Some(input) => input.clone(),
        None => PathBuf::from(prompter.ask("Enter the path to the input CSV file")?),
    };
    let output = match &cli.output {
        Some(output) => output.clone(),
        None => PathBuf::from(prompter.ask("Enter the path to save the output CSV file")?),
    };

    let input_delimiter = prompter.ask_or(
        &format!(
            "Enter the delimiter used in the input file (default is '{}')",
            cli.input_delimiter
        ),
        &cli.input_delimiter,
    )?;
    let output_separator = prompter.ask_or(
        &format!(
            "Enter the separator for the output file (default is '{}')",
            cli.output_separator
        ),
        &cli.output_separator,
    )?;
    let date_format = prompter.ask_or(
        &format!(
            "Enter the date format in the input file (default is '{}')",
            cli.date_format
        ),
        &cli.date_format,
    )?;
    let config = ConversionConfig::new(&input_delimiter, &output_separator, &date_format)?;

    let mut spec = MappingSpec::interactive(prompter);
    let count = convert_file(&input, &output, &config, &mut spec)?;
    report_success(&output, count);
    Ok(())
}

fn report_success(output: &Path, count: usize) {
    println!(
        "\nHomeBank CSV file successfully created at {} ({} rows)",
        output.display(),
        count
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    const BANK_CSV: &str = "txn_date,desc,amt\n05/03/2024,Coffee,-3.50\n";

    fn cli(input: &Path, output: &Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "homebank_converter".to_string(),
            input.display().to_string(),
            output.display().to_string(),
        ];
        args.extend(extra.iter().map(|arg| arg.to_string()));
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_invalid_default_payment_type_touches_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bank.csv");
        let output = dir.path().join("homebank.csv");
        fs::write(&input, BANK_CSV).unwrap();

        let cli = cli(&input, &output, &["--date", "1", "--default-payment-type", "5"]);
        let result = run(cli);

        assert!(matches!(result, Err(Error::InvalidPaymentType(ref value)) if value == "5"));
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_default_payment_type_checked_before_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.csv");
        let output = dir.path().join("homebank.csv");

        let cli = cli(&input, &output, &["--default-payment-type", "card"]);
        assert!(matches!(run(cli), Err(Error::InvalidPaymentType(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_report_lists_payment_types() {
        let report = report_error(&Error::InvalidPaymentType("5".into()));
        assert!(report.starts_with("Error: "));
        assert!(report.contains("Try with an integer from the list below:"));
        assert!(report.contains("Payment Type Options:"));
        assert!(report.contains("0 = none\n"));
        assert!(report.contains("11 = direct debit\n"));
        assert!(!report.contains("\n5 = "));
    }

    #[test]
    fn test_report_other_errors_without_listing() {
        let report = report_error(&Error::EmptySchema);
        assert!(!report.contains("Payment Type Options:"));
        assert_eq!(report, format!("Error: {}\n", Error::EmptySchema));
    }

    #[test]
    fn test_declarative_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bank.csv");
        let output = dir.path().join("homebank.csv");
        fs::write(&input, BANK_CSV).unwrap();

        let cli = cli(
            &input,
            &output,
            &[
                "--date-format",
                "DD/MM/YYYY",
                "--date",
                "1",
                "--payee",
                "2",
                "--amount",
                "3",
                "--default-payment-type",
                "3",
            ],
        );
        run(cli).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Date;Payment Type;Number;Payee;Memo;Amount;Category;Tags\n\
             2024-03-05;3;;Coffee;;-3.50;;\n"
        );
    }

    #[test]
    fn test_legacy_option_names() {
        let cli = Cli::try_parse_from([
            "homebank_converter",
            "in.csv",
            "out.csv",
            "--input_delimiter",
            "|",
            "--input-separator",
            ",",
            "--default_payment_type",
            "4",
        ])
        .unwrap();
        assert_eq!(cli.input_delimiter, "|");
        assert_eq!(cli.output_separator, ",");
        assert_eq!(cli.selections().validate().unwrap().code(), 4);
    }
}
