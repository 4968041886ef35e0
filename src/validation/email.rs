//! Email address checks and normalization

use ::validator::ValidateEmail;
use thiserror::Error;

/// RFC 5321 limit on a whole address
const MAX_ADDRESS_LEN: usize = 254;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("An email address must have an @-sign.")]
    MissingAtSign,
    #[error("There must be something before the @-sign.")]
    EmptyLocalPart,
    #[error("There must be something after the @-sign.")]
    EmptyDomain,
    #[error("The email address is too long ({0} characters, at most 254 allowed).")]
    TooLong(usize),
    #[error("The email address is not valid.")]
    Invalid,
}

/// Check an address and return its canonical form (domain lower-cased).
pub fn normalize(address: &str) -> Result<String, EmailError> {
    let (local, domain) = address.rsplit_once('@').ok_or(EmailError::MissingAtSign)?;
    if local.is_empty() {
        return Err(EmailError::EmptyLocalPart);
    }
    if domain.is_empty() {
        return Err(EmailError::EmptyDomain);
    }

    let len = address.chars().count();
    if len > MAX_ADDRESS_LEN {
        return Err(EmailError::TooLong(len));
    }
    if !address.validate_email() {
        return Err(EmailError::Invalid);
    }

    Ok(format!("{local}@{}", domain.to_ascii_lowercase()))
}
