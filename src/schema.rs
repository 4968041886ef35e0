//! JSON Schema (draft-07) describing the normalized registration record

use serde_json::Value;

// Embed schema at compile time
pub const USER_SCHEMA: &str = include_str!("../schemas/v1/user-schema.json");

pub fn user_schema() -> Result<Value, serde_json::Error> {
    serde_json::from_str(USER_SCHEMA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_schema_parses() {
        let schema = user_schema().unwrap();
        assert_eq!(schema["title"], "User");
        assert_eq!(
            schema["required"],
            serde_json::json!(["name", "age", "email", "is_employed", "address"])
        );
    }
}
