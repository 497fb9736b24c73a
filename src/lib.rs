//! HomeBank CSV Converter Library
//!
//! Converts bank-exported transaction CSV files into the CSV dialect imported
//! by [HomeBank](https://www.gethomebank.org/help/misc-csvformat.html).
//!
//! # Overview
//!
//! - Discover the input columns from the header row ([`schema`])
//! - Map HomeBank fields onto input columns, interactively or from
//!   selections given up front ([`mapping`])
//! - Transform each row, reformatting dates to `YYYY-MM-DD` and filling in
//!   the payment type ([`transform`])
//! - Stream the result into the HomeBank dialect ([`conversion`])
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use homebank_converter::{convert_file, ConversionConfig, MappingSpec, Selections, TargetField};
//!
//! let selections = Selections::new()
//!     .with_column(TargetField::Date, "1")
//!     .with_column(TargetField::Payee, "2")
//!     .with_column(TargetField::Amount, "3")
//!     .with_default_payment_type("3");
//! let config = ConversionConfig::new(",", ";", "DD/MM/YYYY")?;
//!
//! let mut spec = MappingSpec::declarative(selections);
//! let rows = convert_file(Path::new("bank.csv"), Path::new("homebank.csv"), &config, &mut spec)?;
//! println!("Converted {} rows", rows);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod conversion;
pub mod date_format;
pub mod error;
pub mod mapping;
pub mod payment_type;
pub mod prompt;
pub mod schema;
pub mod transform;
pub mod types;

// Re-export commonly used types
pub use config::ConversionConfig;
pub use conversion::{convert_file, Conversion};
pub use date_format::DateFormat;
pub use error::{Error, Result};
pub use mapping::{FieldMapping, MappingSpec, PaymentTypePolicy, Selections};
pub use payment_type::PaymentType;
pub use types::{HomeBankRecord, TargetField};

/// Link to HomeBank's description of its CSV import format.
pub const HOMEBANK_CSV_SPEC_URL: &str = "https://www.gethomebank.org/help/misc-csvformat.html";
