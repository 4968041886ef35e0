//! Registration record validation
//!
//! Every field is checked independently and all violations are collected in
//! one pass; the employment/age rule runs only when both fields it depends on
//! passed their own checks.

mod cross_field;
mod email;
mod error;
mod fields;
mod options;
mod rules;
mod validator;


pub use cross_field::{EMPLOYED_AGE_MESSAGE, EMPLOYED_AGE_RANGE};
pub use email::EmailError;
pub use error::{
    FieldPath, MalformedInputError, ValidationFailure, Violation, ViolationKind, Violations,
};
pub use options::{ExtraFields, ValidatorOptions};
pub use validator::{INPUT_SOURCE_NAME, Validator, validate};
