//! HomeBank payment type vocabulary.
//!
//! HomeBank classifies every transaction with a small integer code. Code 5 is
//! not part of the import format and is rejected.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Payment type understood by HomeBank's CSV import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentType {
    /// No payment type.
    #[default]
    None,
    CreditCard,
    Check,
    Cash,
    BankTransfer,
    DebitCard,
    StandingOrder,
    ElectronicPayment,
    Deposit,
    FinancialInstitutionFee,
    DirectDebit,
}

impl PaymentType {
    /// All payment types, ordered by code.
    pub const ALL: [PaymentType; 11] = [
        PaymentType::None,
        PaymentType::CreditCard,
        PaymentType::Check,
        PaymentType::Cash,
        PaymentType::BankTransfer,
        PaymentType::DebitCard,
        PaymentType::StandingOrder,
        PaymentType::ElectronicPayment,
        PaymentType::Deposit,
        PaymentType::FinancialInstitutionFee,
        PaymentType::DirectDebit,
    ];

    /// Numeric code written to the output file.
    pub fn code(&self) -> u8 {
        match self {
            PaymentType::None => 0,
            PaymentType::CreditCard => 1,
            PaymentType::Check => 2,
            PaymentType::Cash => 3,
            PaymentType::BankTransfer => 4,
            PaymentType::DebitCard => 6,
            PaymentType::StandingOrder => 7,
            PaymentType::ElectronicPayment => 8,
            PaymentType::Deposit => 9,
            PaymentType::FinancialInstitutionFee => 10,
            PaymentType::DirectDebit => 11,
        }
    }

    /// Human-readable label, as shown by HomeBank.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::None => "none",
            PaymentType::CreditCard => "credit card",
            PaymentType::Check => "check",
            PaymentType::Cash => "cash",
            PaymentType::BankTransfer => "bank transfer",
            PaymentType::DebitCard => "debit card",
            PaymentType::StandingOrder => "standing order",
            PaymentType::ElectronicPayment => "electronic payment",
            PaymentType::Deposit => "deposit",
            PaymentType::FinancialInstitutionFee => "financial institution fee",
            PaymentType::DirectDebit => "direct debit",
        }
    }

    /// Look up a payment type by its numeric code.
    pub fn from_code(code: u8) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|payment_type| payment_type.code() == code)
            .ok_or_else(|| Error::InvalidPaymentType(code.to_string()))
    }
}

impl FromStr for PaymentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let code = trimmed
            .parse::<u8>()
            .map_err(|_| Error::InvalidPaymentType(trimmed.to_string()))?;
        Self::from_code(code)
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Label for a numeric payment type code.
pub fn label_for(code: u8) -> Result<&'static str> {
    PaymentType::from_code(code).map(|payment_type| payment_type.label())
}

/// Whether `code` is part of the vocabulary.
pub fn is_valid(code: u8) -> bool {
    PaymentType::from_code(code).is_ok()
}

/// Help listing of every payment type, one `code = label` per line.
pub fn options_listing() -> String {
    let mut listing = String::from("Payment Type Options:\n");
    for payment_type in PaymentType::ALL {
        listing.push_str(&format!("{} = {}\n", payment_type.code(), payment_type.label()));
    }
    listing
}
