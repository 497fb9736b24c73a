//! Column mapping resolution.
//!
//! A [`FieldMapping`] ties every HomeBank [`TargetField`] to an input column,
//! or leaves it unmapped. Choices come from a [`SelectionProvider`]: either
//! a human answering prompts or selections given up front on the command line.
//! Both go through the same validity rule, see [`parse_column_choice`].

use crate::error::Result;
use crate::payment_type::{self, PaymentType};
use crate::prompt::Prompter;
use crate::schema::InputSchema;
use crate::types::TargetField;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;

/// An input column, addressed by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// 0-based position in the input row.
    pub index: usize,

    /// Header name, for display.
    pub name: String,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (column {})", self.name, self.index + 1)
    }
}

/// Where the Payment Type output column gets its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentTypePolicy<'a> {
    /// Copied from this input column, row by row.
    PerRow(&'a Column),

    /// Same value for every row.
    Default(PaymentType),
}

/// Resolved mapping from target fields to input columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    columns: [Option<Column>; 8],
    default_payment_type: PaymentType,
}

impl FieldMapping {
    /// Input column mapped to `field`, if any.
    pub fn column(&self, field: TargetField) -> Option<&Column> {
        self.columns[field.index()].as_ref()
    }

    /// Mapped fields with their columns, in output order.
    pub fn mapped(&self) -> impl Iterator<Item = (TargetField, &Column)> + '_ {
        TargetField::ALL
            .into_iter()
            .filter_map(|field| self.column(field).map(|column| (field, column)))
    }

    /// How the Payment Type field is filled. A mapped column always wins.
    pub fn payment_type_policy(&self) -> PaymentTypePolicy<'_> {
        match self.column(TargetField::PaymentType) {
            Some(column) => PaymentTypePolicy::PerRow(column),
            None => PaymentTypePolicy::Default(self.default_payment_type),
        }
    }
}

/// Source of column choices for the resolver.
pub trait SelectionProvider {
    /// Raw selector for `field`: a 1-based column number, or `None` to leave it unmapped.
    fn select_column(&mut self, field: TargetField, schema: &InputSchema) -> Result<Option<String>>;

    /// Payment type applied to every row when no Payment Type column is mapped.
    fn default_payment_type(&mut self) -> Result<PaymentType>;
}

/// Column selectors and default payment type given up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    columns: BTreeMap<TargetField, String>,
    default_payment_type: Option<String>,
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the column for `field` by its 1-based number.
    pub fn with_column(mut self, field: TargetField, selector: impl Into<String>) -> Self {
        self.columns.insert(field, selector.into());
        self
    }

    /// Set the selector for `field` if one was given.
    pub fn with_optional_column(self, field: TargetField, selector: Option<String>) -> Self {
        match selector {
            Some(selector) => self.with_column(field, selector),
            None => self,
        }
    }

    pub fn with_default_payment_type(mut self, code: impl Into<String>) -> Self {
        self.default_payment_type = Some(code.into());
        self
    }

    /// Validate the default payment type. Absent means `0` (none).
    pub fn validate(&self) -> Result<PaymentType> {
        match &self.default_payment_type {
            Some(code) => code.parse(),
            None => Ok(PaymentType::default()),
        }
    }
}

impl SelectionProvider for Selections {
    fn select_column(&mut self, field: TargetField, _schema: &InputSchema) -> Result<Option<String>> {
        Ok(self.columns.get(&field).cloned())
    }

    fn default_payment_type(&mut self) -> Result<PaymentType> {
        self.validate()
    }
}

/// Selections made by answering prompts.
pub struct PromptedSelections<'a, P: Prompter + ?Sized> {
    prompter: &'a mut P,
}

impl<'a, P: Prompter + ?Sized> PromptedSelections<'a, P> {
    pub fn new(prompter: &'a mut P) -> Self {
        Self { prompter }
    }
}

impl<P: Prompter + ?Sized> SelectionProvider for PromptedSelections<'_, P> {
    fn select_column(&mut self, field: TargetField, schema: &InputSchema) -> Result<Option<String>> {
        self.prompter.show(&format!("\nHomeBank Field: {}", field.header()));
        self.prompter.show(&format!("Description: {}", field.description()));
        self.prompter.show("Available columns in input file:");
        self.prompter.show(schema.listing().trim_end());

        let answer = self.prompter.ask(&format!(
            "Enter the column number to map to '{}' or press Enter to leave it empty",
            field.header()
        ))?;
        if answer.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer))
        }
    }

    fn default_payment_type(&mut self) -> Result<PaymentType> {
        self.prompter.show(
            "\nThe Payment Type field is required by HomeBank. Set a default type to apply to all lines:",
        );
        self.prompter.show(payment_type::options_listing().trim_end());

        let mut answer = self.prompter.ask_or(
            "Enter Payment Type for all transactions (default is '0 = none')",
            "0",
        )?;
        loop {
            match answer.parse::<PaymentType>() {
                Ok(payment_type) => return Ok(payment_type),
                Err(err) => {
                    debug!("{}", err);
                    answer = self.prompter.ask("Invalid input. Enter a valid Payment Type")?;
                }
            }
        }
    }
}

/// How column choices are obtained for a run.
pub enum MappingSpec<'a> {
    /// Ask a human for every field.
    Interactive { prompter: Box<dyn Prompter + 'a> },

    /// Use selections given up front.
    Declarative { selections: Selections },
}

impl<'a> MappingSpec<'a> {
    pub fn interactive(prompter: impl Prompter + 'a) -> Self {
        MappingSpec::Interactive {
            prompter: Box::new(prompter),
        }
    }

    pub fn declarative(selections: Selections) -> Self {
        MappingSpec::Declarative { selections }
    }

    /// Resolve the mapping for `schema`.
    pub fn resolve(&mut self, schema: &InputSchema) -> Result<FieldMapping> {
        match self {
            MappingSpec::Interactive { prompter } => {
                resolve(schema, &mut PromptedSelections::new(prompter.as_mut()))
            }
            MappingSpec::Declarative { selections } => resolve(schema, selections),
        }
    }
}

/// Interpret a column selector against `column_count` columns.
///
/// Only a plain 1-based number within range selects a column. Anything else,
/// including out of range numbers, leaves the field unmapped.
pub fn parse_column_choice(choice: &str, column_count: usize) -> Option<usize> {
    let choice = choice.trim();
    if choice.is_empty() || !choice.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number: usize = choice.parse().ok()?;
    if (1..=column_count).contains(&number) {
        Some(number - 1)
    } else {
        None
    }
}

/// Build a [`FieldMapping`] for `schema` from the choices of `provider`.
///
/// The default payment type is only requested when no Payment Type column was
/// selected.
pub fn resolve<P>(schema: &InputSchema, provider: &mut P) -> Result<FieldMapping>
where
    P: SelectionProvider + ?Sized,
{
    let mut columns: [Option<Column>; 8] = std::array::from_fn(|_| None);
    for field in TargetField::ALL {
        let Some(choice) = provider.select_column(field, schema)? else {
            continue;
        };
        match parse_column_choice(&choice, schema.len()) {
            Some(index) => {
                let name = schema.column(index).unwrap_or_default().to_string();
                columns[field.index()] = Some(Column { index, name });
            }
            None => debug!("'{}' does not select a column for {}, leaving it empty", choice, field),
        }
    }

    let default_payment_type = if columns[TargetField::PaymentType.index()].is_none() {
        provider.default_payment_type()?
    } else {
        PaymentType::default()
    };

    let mapping = FieldMapping {
        columns,
        default_payment_type,
    };
    for (field, column) in mapping.mapped() {
        debug!("{} <- {}", field, column);
    }
    Ok(mapping)
}
