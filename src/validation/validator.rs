use serde_json::Value;
use tracing::{debug, info};

use super::cross_field::check_employment_age;
use super::error::{
    FieldPath, MalformedInputError, ValidationFailure, Violation, ViolationKind, Violations,
};
use super::fields::FieldReader;
use super::options::{ExtraFields, ValidatorOptions};
use super::rules::{
    ADDRESS_FIELDS, AGE_RULES, CITY_RULES, HOUSE_NUMBER_RULES, NAME_RULES, STREET_RULES,
    USER_FIELDS,
};
use crate::error_utils::{char_span, create_named_source, line_col_to_offset};
use crate::models::{Address, User};

/// Source name used in diagnostics when the caller does not supply one
pub const INPUT_SOURCE_NAME: &str = "<input>";

/// Validate a registration record with default options (lax coercion, unknown keys forbidden)
pub fn validate(raw: &str) -> Result<User, ValidationFailure> {
    Validator::default().validate(raw)
}

/// Stateless registration validator. Safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidatorOptions,
}

impl Validator {
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    pub fn validate(&self, raw: &str) -> Result<User, ValidationFailure> {
        self.validate_named(INPUT_SOURCE_NAME, raw)
    }

    /// Like [`Validator::validate`], naming the input (e.g. a file path) in diagnostics
    pub fn validate_named(&self, source_name: &str, raw: &str) -> Result<User, ValidationFailure> {
        let value = parse_record(source_name, raw)?;
        let user = self.validate_value(&value)?;
        Ok(user)
    }

    /// Validate an already decoded JSON value
    pub fn validate_value(&self, value: &Value) -> Result<User, Violations> {
        let root = FieldPath::root();
        let Value::Object(record) = value else {
            return Err(Violations::from(vec![
                Violation::new(
                    ViolationKind::ModelType,
                    root,
                    "Input should be a valid object",
                )
                .with_input(value.clone()),
            ]));
        };

        debug!(strict = self.options.strict, "Validating registration record...");
        let reader = FieldReader::new(record, root.clone(), self.options.strict);

        // The age rule depends on is_employed, so it is read first
        let is_employed = reader.boolean("is_employed");
        let employed = is_employed.as_ref().ok().copied();

        let name = reader.string("name", NAME_RULES);
        let age = reader.integer("age", AGE_RULES).and_then(|age| match employed {
            Some(employed) => {
                let input = record.get("age").cloned().unwrap_or_else(|| Value::from(age));
                check_employment_age(employed, age, root.child("age"), input)
            }
            None => {
                debug!("Skipping employment age rule: is_employed is invalid");
                Ok(age)
            }
        });
        let email = reader.email("email");
        let address = self.validate_address(&reader);

        let mut violations = Vec::new();
        let name = take(name, &mut violations);
        let age = take(age, &mut violations);
        let email = take(email, &mut violations);
        let is_employed = take(is_employed, &mut violations);
        let address = match address {
            Ok(address) => Some(address),
            Err(nested) => {
                violations.extend(nested);
                None
            }
        };
        if self.options.extra == ExtraFields::Forbid {
            violations.extend(reader.unknown_keys(USER_FIELDS));
        }

        match (name, age, email, is_employed, address) {
            (Some(name), Some(age), Some(email), Some(is_employed), Some(address))
                if violations.is_empty() =>
            {
                info!("✓ Registration record accepted");
                Ok(User {
                    name,
                    age,
                    email,
                    is_employed,
                    address,
                })
            }
            _ => {
                info!(count = violations.len(), "Registration record rejected");
                Err(Violations::from(violations))
            }
        }
    }

    fn validate_address(&self, parent: &FieldReader<'_>) -> Result<Address, Vec<Violation>> {
        let reader = parent.object("address").map_err(|violation| vec![violation])?;

        debug!("Validating address...");
        let mut violations = Vec::new();
        let city = take(reader.string("city", CITY_RULES), &mut violations);
        let street = take(reader.string("street", STREET_RULES), &mut violations);
        let house_number = take(
            reader.integer("house_number", HOUSE_NUMBER_RULES),
            &mut violations,
        );
        if self.options.extra == ExtraFields::Forbid {
            violations.extend(reader.unknown_keys(ADDRESS_FIELDS));
        }

        match (city, street, house_number) {
            (Some(city), Some(street), Some(house_number)) if violations.is_empty() => {
                Ok(Address {
                    city,
                    street,
                    house_number,
                })
            }
            _ => Err(violations),
        }
    }
}

fn take<T>(result: Result<T, Violation>, violations: &mut Vec<Violation>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(violation) => {
            debug!(field = %violation.loc, kind = %violation.kind, "Field rejected");
            violations.push(violation);
            None
        }
    }
}

fn parse_record(source_name: &str, raw: &str) -> Result<Value, MalformedInputError> {
    serde_json::from_str(raw).map_err(|error| {
        let offset = line_col_to_offset(raw, error.line(), error.column());
        MalformedInputError {
            src: create_named_source(source_name, raw.to_string()),
            span: char_span(raw, offset),
            message: error.to_string(),
            line: error.line(),
            column: error.column(),
        }
    })
}
