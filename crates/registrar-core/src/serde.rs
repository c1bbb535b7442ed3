use serde::{Deserialize, Deserializer};

/// Trims surrounding whitespace from a string field.
pub fn trim_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Trims an optional string field, mapping blank input to `None`.
pub fn trim_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
