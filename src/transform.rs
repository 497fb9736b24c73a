//! Row transformation.

use crate::date_format::DateFormat;
use crate::mapping::{FieldMapping, PaymentTypePolicy};
use crate::payment_type;
use crate::types::{HomeBankRecord, TargetField};
use csv::StringRecord;
use log::warn;

/// Turns input rows into HomeBank records under a fixed mapping.
#[derive(Debug, Clone)]
pub struct RowTransformer {
    mapping: FieldMapping,
    date_format: DateFormat,
}

impl RowTransformer {
    pub fn new(mapping: FieldMapping, date_format: DateFormat) -> Self {
        Self {
            mapping,
            date_format,
        }
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Transform one input row.
    ///
    /// Mapped fields are copied, dates are reformatted on a best-effort basis,
    /// and an unmapped Payment Type receives the default code. Everything else
    /// stays empty. Cells missing from a short row read as empty.
    pub fn transform(&self, row: &StringRecord) -> HomeBankRecord {
        let mut record = HomeBankRecord::default();

        for (field, column) in self.mapping.mapped() {
            let value = row.get(column.index).unwrap_or_default();
            let value = match field {
                TargetField::Date if !value.trim().is_empty() => self.date_format.reformat(value),
                TargetField::PaymentType => {
                    check_payment_code(value);
                    value.to_string()
                }
                _ => value.to_string(),
            };
            record.set(field, value);
        }

        if let PaymentTypePolicy::Default(payment_type) = self.mapping.payment_type_policy() {
            record.set(TargetField::PaymentType, payment_type.to_string());
        }

        record
    }
}

fn check_payment_code(value: &str) {
    let known = value.trim().parse::<u8>().map_or(false, payment_type::is_valid);
    if !value.trim().is_empty() && !known {
        warn!("Payment type '{}' is not a HomeBank code, copying it as is.", value);
    }
}
