//! Date reformatting.
//!
//! Input formats are declared with the placeholder tokens `YYYY`, `MM` and
//! `DD`, e.g. `DD/MM/YYYY`. Dates are always written as `YYYY-MM-DD`.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use log::warn;
use std::fmt;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

/// Canonical output format.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// One element of a declared date format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `YYYY`: exactly four digits.
    Year,
    /// `MM`: one or two digits.
    Month,
    /// `DD`: one or two digits.
    Day,
    /// Any other character, matched as is.
    Literal(char),
}

/// Declared input date format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    spec: String,
    tokens: Vec<Token>,
}

impl DateFormat {
    /// Build a format from a token spec such as `DD.MM.YYYY`.
    pub fn new(spec: &str) -> Self {
        let mut tokens = Vec::new();
        let mut rest = spec;
        while let Some(c) = rest.chars().next() {
            let (token, len) = if rest.starts_with("YYYY") {
                (Token::Year, 4)
            } else if rest.starts_with("MM") {
                (Token::Month, 2)
            } else if rest.starts_with("DD") {
                (Token::Day, 2)
            } else {
                (Token::Literal(c), c.len_utf8())
            };
            tokens.push(token);
            rest = &rest[len..];
        }
        Self {
            spec: spec.to_string(),
            tokens,
        }
    }

    /// The spec as declared by the user.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Parse `value` and render it as `YYYY-MM-DD`.
    ///
    /// The whole value must follow the declared layout. Fields missing from
    /// the layout default to year 1900, month 1 and day 1.
    pub fn try_reformat(&self, value: &str) -> Result<String> {
        let invalid = |reason: &str| Error::InvalidDate {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let (mut year, mut month, mut day) = (1900, 1, 1);
        let mut chars = value.chars().peekable();
        for token in &self.tokens {
            match token {
                Token::Year => {
                    year = take_digits(&mut chars, 4, 4)
                        .ok_or_else(|| invalid("expected a four-digit year"))?
                        as i32;
                }
                Token::Month => {
                    month = take_digits(&mut chars, 1, 2)
                        .ok_or_else(|| invalid("expected a month"))?;
                }
                Token::Day => {
                    day = take_digits(&mut chars, 1, 2).ok_or_else(|| invalid("expected a day"))?;
                }
                Token::Literal(expected) => {
                    if chars.next() != Some(*expected) {
                        return Err(invalid(&format!("expected '{}'", expected)));
                    }
                }
            }
        }
        if chars.next().is_some() {
            return Err(invalid("unexpected trailing characters"));
        }

        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| date.format(CANONICAL_FORMAT).to_string())
            .ok_or_else(|| invalid("input is out of range"))
    }

    /// Best-effort reformat.
    ///
    /// Blank values are passed through. Values that don't match the format are
    /// logged and returned unchanged so one bad row never aborts a conversion.
    pub fn reformat(&self, value: &str) -> String {
        if value.trim().is_empty() {
            return value.to_string();
        }
        match self.try_reformat(value) {
            Ok(reformatted) => reformatted,
            Err(err) => {
                warn!("{} (expected format {}). Skipping conversion.", err, self.spec);
                value.to_string()
            }
        }
    }
}

/// Consume between `min` and `max` ASCII digits, greedily.
fn take_digits(chars: &mut Peekable<Chars<'_>>, min: usize, max: usize) -> Option<u32> {
    let mut number = 0;
    let mut count = 0;
    while count < max {
        match chars.peek().and_then(|c| c.to_digit(10)) {
            Some(digit) => {
                number = number * 10 + digit;
                count += 1;
                chars.next();
            }
            None => break,
        }
    }
    (count >= min).then_some(number)
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::new("YYYY-MM-DD")
    }
}

impl FromStr for DateFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec)
    }
}
