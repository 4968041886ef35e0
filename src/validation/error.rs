use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Machine-readable violation kinds, serialized in snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    JsonInvalid,
    Missing,
    ExtraForbidden,
    ModelType,
    StringType,
    StringTooShort,
    StringPatternMismatch,
    IntType,
    IntParsing,
    IntParsingSize,
    IntFromFloat,
    GreaterThan,
    GreaterThanEqual,
    LessThanEqual,
    BoolType,
    BoolParsing,
    ValueError,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JsonInvalid => "json_invalid",
            Self::Missing => "missing",
            Self::ExtraForbidden => "extra_forbidden",
            Self::ModelType => "model_type",
            Self::StringType => "string_type",
            Self::StringTooShort => "string_too_short",
            Self::StringPatternMismatch => "string_pattern_mismatch",
            Self::IntType => "int_type",
            Self::IntParsing => "int_parsing",
            Self::IntParsingSize => "int_parsing_size",
            Self::IntFromFloat => "int_from_float",
            Self::GreaterThan => "greater_than",
            Self::GreaterThanEqual => "greater_than_equal",
            Self::LessThanEqual => "less_than_equal",
            Self::BoolType => "bool_type",
            Self::BoolParsing => "bool_parsing",
            Self::ValueError => "value_error",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location of a field inside the record, e.g. `address.city`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0.join("."))
        }
    }
}

/// A single failed constraint, tied to one field path.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Serialize)]
#[error("{loc}: {msg}")]
pub struct Violation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    pub loc: FieldPath,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

impl Violation {
    pub fn new(kind: ViolationKind, loc: FieldPath, msg: impl Into<String>) -> Self {
        Self {
            kind,
            loc,
            msg: msg.into(),
            input: None,
        }
    }

    pub fn with_input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }
}

/// Every violation found in one validation pass, in schema field order.
#[derive(Debug, Clone, Default, PartialEq, Diagnostic, Serialize)]
#[serde(transparent)]
#[diagnostic(code(regcheck::invalid_record))]
pub struct Violations {
    #[related]
    items: Vec<Violation>,
}

impl Violations {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.items.iter()
    }

    /// Violations reported at a dotted path such as `"address.city"`
    pub fn at(&self, path: &str) -> Vec<&Violation> {
        self.items
            .iter()
            .filter(|v| v.loc.to_string() == path)
            .collect()
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(items: Vec<Violation>) -> Self {
        Self { items }
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.items.len();
        let noun = if count == 1 { "error" } else { "errors" };
        write!(f, "{count} validation {noun} for User")
    }
}

impl std::error::Error for Violations {}

/// The input text could not be decoded as JSON at all.
#[derive(Error, Debug, Diagnostic, Clone)]
#[error("Invalid JSON: {message}")]
#[diagnostic(
    code(regcheck::malformed_input),
    help("a registration record must be a single JSON object")
)]
pub struct MalformedInputError {
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl MalformedInputError {
    /// Malformed input expressed as a single `json_invalid` violation at the root
    pub fn to_violation(&self) -> Violation {
        Violation::new(
            ViolationKind::JsonInvalid,
            FieldPath::root(),
            format!("Invalid JSON: {}", self.message),
        )
    }
}

/// Why a record was not accepted.
#[derive(Error, Debug, Diagnostic)]
pub enum ValidationFailure {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Malformed(#[from] MalformedInputError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Invalid(#[from] Violations),
}

impl ValidationFailure {
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Invalid(violations) => Some(violations),
            Self::Malformed(_) => None,
        }
    }

    /// Flatten into a violation list, turning malformed input into a `json_invalid` entry
    pub fn to_violations(&self) -> Violations {
        match self {
            Self::Invalid(violations) => violations.clone(),
            Self::Malformed(error) => Violations::from(vec![error.to_violation()]),
        }
    }
}
