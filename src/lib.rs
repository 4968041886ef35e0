pub mod error_utils;
pub mod models;
pub mod report;
pub mod schema;
pub mod validation;

pub use report::process_registration;
pub use validation::{ExtraFields, Validator, ValidatorOptions, validate};
