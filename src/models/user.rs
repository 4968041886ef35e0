use serde::{Deserialize, Serialize};

/// Postal address embedded in a [`User`]. It has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub house_number: i64,
}

/// A registration record that passed every field and cross-field check.
///
/// Field order here is the key order of the normalized JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub age: i64,
    pub email: String,
    pub is_employed: bool,
    pub address: Address,
}
