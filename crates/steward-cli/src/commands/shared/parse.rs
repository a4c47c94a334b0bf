use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use steward_core::errors::CoreError;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| {
        CoreError::Validation(format!("invalid {field} '{raw}': {error}")).into()
    })
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str, field: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|error| {
        CoreError::Validation(format!("invalid {field} '{raw}', expected YYYY-MM-DD: {error}"))
            .into()
    })
}
