use serde::de::DeserializeOwned;
use serde::de::IntoDeserializer;
use serde::de::value::{Error as ValueError, StrDeserializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid value '{value}': {reason}")]
    InvalidKeyword { value: String, reason: String },

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidAssignment(String),

    #[error("Component '{component}' cannot be empty in '{text}'.")]
    EmptyComponent {
        component: &'static str,
        text: String,
    },
}

/// Parses a kebab-case keyword (e.g. `naive-greedy`) into any unit-variant enum that
/// deserializes from its name.
pub fn parse_keyword<T: DeserializeOwned>(value: &str) -> Result<T, ParseError> {
    let deserializer: StrDeserializer<'_, ValueError> = value.trim().into_deserializer();
    T::deserialize(deserializer).map_err(|e| ParseError::InvalidKeyword {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Splits a `KEY=VALUE` assignment at the first `=`.
pub fn parse_assignment(text: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidAssignment(text.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            text: text.to_string(),
        });
    }
    Ok((key, value.trim()))
}
