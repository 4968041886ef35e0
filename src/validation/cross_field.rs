//! Rules that depend on more than one field.

use serde_json::Value;
use std::ops::RangeInclusive;

use super::error::{FieldPath, Violation, ViolationKind};

/// Ages an employed user may have
pub const EMPLOYED_AGE_RANGE: RangeInclusive<i64> = 18..=65;

pub const EMPLOYED_AGE_MESSAGE: &str = "if employed, age must be between 18 and 65";

/// Employed users must fall within [`EMPLOYED_AGE_RANGE`]. Reported against `age`.
///
/// Callers only invoke this once both `is_employed` and `age` passed their own checks.
/// `input` is the `age` value as it appeared in the record, before coercion.
pub fn check_employment_age(
    is_employed: bool,
    age: i64,
    age_path: FieldPath,
    input: Value,
) -> Result<i64, Violation> {
    if is_employed && !EMPLOYED_AGE_RANGE.contains(&age) {
        return Err(
            Violation::new(ViolationKind::ValueError, age_path, EMPLOYED_AGE_MESSAGE)
                .with_input(input),
        );
    }
    Ok(age)
}
