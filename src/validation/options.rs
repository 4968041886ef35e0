/// What to do with keys the registration schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtraFields {
    /// Report each unknown key as an `extra_forbidden` violation
    #[default]
    Forbid,
    /// Drop unknown keys from the normalized record
    Ignore,
}

/// Knobs for a [`Validator`](super::Validator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Accept only exact JSON types, no string or float coercion
    pub strict: bool,
    pub extra: ExtraFields,
}

impl ValidatorOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn with_extra(mut self, extra: ExtraFields) -> Self {
        self.extra = extra;
        self
    }
}
