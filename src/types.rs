//! Common types shared by the mapping, transformation and output stages.

use serde::Serialize;
use std::fmt;

/// Column of the HomeBank CSV import format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetField {
    Date,
    PaymentType,
    Number,
    Payee,
    Memo,
    Amount,
    Category,
    Tags,
}

impl TargetField {
    /// All target fields in output column order.
    pub const ALL: [TargetField; 8] = [
        TargetField::Date,
        TargetField::PaymentType,
        TargetField::Number,
        TargetField::Payee,
        TargetField::Memo,
        TargetField::Amount,
        TargetField::Category,
        TargetField::Tags,
    ];

    /// Output header row, in column order.
    pub const HEADERS: [&'static str; 8] = [
        "Date",
        "Payment Type",
        "Number",
        "Payee",
        "Memo",
        "Amount",
        "Category",
        "Tags",
    ];

    /// Position of this field in the output row.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Header name in the output file.
    pub fn header(&self) -> &'static str {
        Self::HEADERS[self.index()]
    }

    /// Name of the command line option selecting this field's column.
    pub fn option_key(&self) -> &'static str {
        match self {
            TargetField::Date => "date",
            TargetField::PaymentType => "payment_type",
            TargetField::Number => "number",
            TargetField::Payee => "payee",
            TargetField::Memo => "memo",
            TargetField::Amount => "amount",
            TargetField::Category => "category",
            TargetField::Tags => "tags",
        }
    }

    /// Explanation shown while mapping columns interactively.
    pub fn description(&self) -> &'static str {
        match self {
            TargetField::Date => {
                "Date of the transaction (YYYY-MM-DD). Can be changed in preferences of HomeBank."
            }
            TargetField::PaymentType => {
                "Type of the transaction (e.g., bank transfer, cash) with an ID used by HomeBank."
            }
            TargetField::Number => {
                "A string for cheque number, value date, card ID, transaction ID, or other details."
            }
            TargetField::Payee => "The recipient or originator of the transaction.",
            TargetField::Memo => "A string with notes for the transaction (e.g., reference, purpose).",
            TargetField::Amount => {
                "The amount of the transaction (negative for expenses, positive for income)."
            }
            TargetField::Category => "The category of the transaction.",
            TargetField::Tags => "Tags for further grouping or details about the transaction.",
        }
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One row of the HomeBank output file.
///
/// Every field starts out empty; the transformer fills in mapped values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HomeBankRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Payment Type")]
    pub payment_type: String,
    #[serde(rename = "Number")]
    pub number: String,
    #[serde(rename = "Payee")]
    pub payee: String,
    #[serde(rename = "Memo")]
    pub memo: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Tags")]
    pub tags: String,
}

impl HomeBankRecord {
    /// Value of a single field.
    pub fn get(&self, field: TargetField) -> &str {
        match field {
            TargetField::Date => &self.date,
            TargetField::PaymentType => &self.payment_type,
            TargetField::Number => &self.number,
            TargetField::Payee => &self.payee,
            TargetField::Memo => &self.memo,
            TargetField::Amount => &self.amount,
            TargetField::Category => &self.category,
            TargetField::Tags => &self.tags,
        }
    }

    /// Overwrite a single field.
    pub fn set(&mut self, field: TargetField, value: String) {
        let slot = match field {
            TargetField::Date => &mut self.date,
            TargetField::PaymentType => &mut self.payment_type,
            TargetField::Number => &mut self.number,
            TargetField::Payee => &mut self.payee,
            TargetField::Memo => &mut self.memo,
            TargetField::Amount => &mut self.amount,
            TargetField::Category => &mut self.category,
            TargetField::Tags => &mut self.tags,
        };
        *slot = value;
    }
}
