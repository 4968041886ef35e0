//! Declared per-field constraints for the registration record.
//!
//! Each field carries an ordered list of constraints. Evaluation of a field
//! stops at its first failing constraint; other fields are still checked.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::ViolationKind;

pub static LETTERS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").expect("Invalid regex"));

/// Constraint applied to a text field after its type check passed
pub enum StrRule {
    MinLength(usize),
    Pattern(&'static Lazy<Regex>),
}

impl StrRule {
    pub fn check(&self, value: &str) -> Result<(), (ViolationKind, String)> {
        match self {
            Self::MinLength(min) => {
                if value.chars().count() < *min {
                    let noun = if *min == 1 { "character" } else { "characters" };
                    return Err((
                        ViolationKind::StringTooShort,
                        format!("String should have at least {min} {noun}"),
                    ));
                }
            }
            Self::Pattern(pattern) => {
                if !pattern.is_match(value) {
                    return Err((
                        ViolationKind::StringPatternMismatch,
                        format!("String should match pattern '{}'", pattern.as_str()),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Constraint applied to an integer field after coercion succeeded
pub enum IntRule {
    GreaterThan(i64),
    GreaterThanEqual(i64),
    LessThanEqual(i64),
}

impl IntRule {
    pub fn check(&self, value: i64) -> Result<(), (ViolationKind, String)> {
        match *self {
            Self::GreaterThan(bound) if value <= bound => Err((
                ViolationKind::GreaterThan,
                format!("Input should be greater than {bound}"),
            )),
            Self::GreaterThanEqual(bound) if value < bound => Err((
                ViolationKind::GreaterThanEqual,
                format!("Input should be greater than or equal to {bound}"),
            )),
            Self::LessThanEqual(bound) if value > bound => Err((
                ViolationKind::LessThanEqual,
                format!("Input should be less than or equal to {bound}"),
            )),
            _ => Ok(()),
        }
    }
}

pub static NAME_RULES: &[StrRule] = &[StrRule::MinLength(2), StrRule::Pattern(&LETTERS_ONLY)];
pub static AGE_RULES: &[IntRule] = &[IntRule::GreaterThanEqual(0), IntRule::LessThanEqual(120)];
pub static CITY_RULES: &[StrRule] = &[StrRule::MinLength(2)];
pub static STREET_RULES: &[StrRule] = &[StrRule::MinLength(3)];
pub static HOUSE_NUMBER_RULES: &[IntRule] = &[IntRule::GreaterThan(0)];

pub const USER_FIELDS: &[&str] = &["name", "age", "email", "is_employed", "address"];
pub const ADDRESS_FIELDS: &[&str] = &["city", "street", "house_number"];

/// Run `rules` in order and report the first failure
pub fn first_str_failure(rules: &[StrRule], value: &str) -> Result<(), (ViolationKind, String)> {
    rules.iter().try_for_each(|rule| rule.check(value))
}

pub fn first_int_failure(rules: &[IntRule], value: i64) -> Result<(), (ViolationKind, String)> {
    rules.iter().try_for_each(|rule| rule.check(value))
}
