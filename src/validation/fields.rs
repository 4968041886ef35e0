use serde_json::{Map, Value};

use super::email;
use super::error::{FieldPath, Violation, ViolationKind};
use super::rules::{IntRule, StrRule, first_int_failure, first_str_failure};

/// Reads typed fields out of one JSON object, producing at most one violation per field.
pub struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    path: FieldPath,
    strict: bool,
}

impl<'a> FieldReader<'a> {
    pub fn new(object: &'a Map<String, Value>, path: FieldPath, strict: bool) -> Self {
        Self {
            object,
            path,
            strict,
        }
    }

    fn lookup(&self, key: &str) -> Result<&'a Value, Violation> {
        self.object.get(key).ok_or_else(|| {
            Violation::new(ViolationKind::Missing, self.path.child(key), "Field required")
                .with_input(Value::Object(self.object.clone()))
        })
    }

    fn violation(
        &self,
        key: &str,
        kind: ViolationKind,
        msg: impl Into<String>,
        input: &Value,
    ) -> Violation {
        Violation::new(kind, self.path.child(key), msg).with_input(input.clone())
    }

    pub fn string(&self, key: &str, rules: &[StrRule]) -> Result<String, Violation> {
        let input = self.lookup(key)?;
        let Value::String(value) = input else {
            return Err(self.violation(
                key,
                ViolationKind::StringType,
                "Input should be a valid string",
                input,
            ));
        };

        first_str_failure(rules, value)
            .map_err(|(kind, msg)| self.violation(key, kind, msg, input))?;
        Ok(value.clone())
    }

    pub fn email(&self, key: &str) -> Result<String, Violation> {
        let raw = self.string(key, &[])?;
        email::normalize(&raw).map_err(|reason| {
            self.violation(
                key,
                ViolationKind::ValueError,
                format!("value is not a valid email address: {reason}"),
                &Value::String(raw.clone()),
            )
        })
    }

    pub fn integer(&self, key: &str, rules: &[IntRule]) -> Result<i64, Violation> {
        let input = self.lookup(key)?;
        let value = self
            .coerce_integer(input)
            .map_err(|(kind, msg)| self.violation(key, kind, msg, input))?;

        first_int_failure(rules, value)
            .map_err(|(kind, msg)| self.violation(key, kind, msg, input))?;
        Ok(value)
    }

    pub fn boolean(&self, key: &str) -> Result<bool, Violation> {
        let input = self.lookup(key)?;
        self.coerce_bool(input)
            .map_err(|(kind, msg)| self.violation(key, kind, msg, input))
    }

    /// Reader for a nested object field, e.g. `address`
    pub fn object(&self, key: &str) -> Result<FieldReader<'a>, Violation> {
        let input = self.lookup(key)?;
        match input {
            Value::Object(object) => Ok(FieldReader::new(
                object,
                self.path.child(key),
                self.strict,
            )),
            other => Err(self.violation(
                key,
                ViolationKind::ModelType,
                "Input should be a valid object",
                other,
            )),
        }
    }

    /// One `extra_forbidden` violation per key not listed in `known`, in input order
    pub fn unknown_keys(&self, known: &[&str]) -> Vec<Violation> {
        self.object
            .iter()
            .filter(|(key, _)| !known.contains(&key.as_str()))
            .map(|(key, value)| {
                self.violation(
                    key,
                    ViolationKind::ExtraForbidden,
                    "Extra inputs are not permitted",
                    value,
                )
            })
            .collect()
    }

    fn coerce_integer(&self, input: &Value) -> Result<i64, (ViolationKind, String)> {
        let int_type = || {
            (
                ViolationKind::IntType,
                "Input should be a valid integer".to_string(),
            )
        };
        let too_large = || {
            (
                ViolationKind::IntParsingSize,
                "Unable to parse input as an integer, exceeded maximum size".to_string(),
            )
        };

        match input {
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    return Ok(value);
                }
                if number.is_u64() {
                    return Err(too_large());
                }
                let float = number.as_f64().ok_or_else(int_type)?;
                let integral = float.fract() == 0.0;
                if integral && (float < i64::MIN as f64 || float >= i64::MAX as f64) {
                    return Err(too_large());
                }
                if self.strict {
                    return Err(int_type());
                }
                if !integral {
                    return Err((
                        ViolationKind::IntFromFloat,
                        "Input should be a valid integer, got a number with a fractional part"
                            .to_string(),
                    ));
                }
                Ok(float as i64)
            }
            Value::String(text) if !self.strict => {
                text.trim().parse::<i64>().map_err(|e| match e.kind() {
                    std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow => {
                        too_large()
                    }
                    _ => (
                        ViolationKind::IntParsing,
                        "Input should be a valid integer, unable to parse string as an integer"
                            .to_string(),
                    ),
                })
            }
            _ => Err(int_type()),
        }
    }

    fn coerce_bool(&self, input: &Value) -> Result<bool, (ViolationKind, String)> {
        let bool_type = || {
            (
                ViolationKind::BoolType,
                "Input should be a valid boolean".to_string(),
            )
        };

        match input {
            Value::Bool(value) => Ok(*value),
            _ if self.strict => Err(bool_type()),
            Value::Number(number) => match number.as_f64() {
                Some(value) if value == 0.0 => Ok(false),
                Some(value) if value == 1.0 => Ok(true),
                _ => Err((
                    ViolationKind::BoolParsing,
                    "Input should be a valid boolean, unable to interpret input".to_string(),
                )),
            },
            Value::String(text) => match text.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" | "t" | "y" => Ok(true),
                "false" | "no" | "off" | "0" | "f" | "n" => Ok(false),
                _ => Err((
                    ViolationKind::BoolParsing,
                    "Input should be a valid boolean, unable to interpret input".to_string(),
                )),
            },
            _ => Err(bool_type()),
        }
    }
}
