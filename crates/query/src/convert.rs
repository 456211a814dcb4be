//! Converters from raw parameter text to typed values.
//!
//! Converters are pure functions over the raw values of a single
//! parameter. They either produce a typed value or a [`ConvertError`]
//! carrying the offending text; the binder adds the parameter name.

use thiserror::Error;

/// A raw value failed to convert to its declared type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The value is not a valid boolean token.
    #[error("expected \"true\" or \"false\", got \"{0}\"")]
    InvalidBoolean(String),

    /// The value is not a valid sort order token.
    #[error("expected \"asc\" or \"desc\", got \"{0}\"")]
    InvalidSortOrder(String),

    /// The value is not a non-negative decimal integer.
    #[error("expected a non-negative integer, got \"{0}\"")]
    InvalidUnsigned(String),

    /// The value is not a positive decimal integer.
    #[error("expected a positive integer, got \"{0}\"")]
    InvalidPositive(String),

    /// The parameter was present without any value.
    #[error("a value is required")]
    MissingValue,
}

/// Returns the first raw value, or [`ConvertError::MissingValue`].
pub fn first_value(values: &[String]) -> Result<&str, ConvertError> {
    values
        .first()
        .map(String::as_str)
        .ok_or(ConvertError::MissingValue)
}

/// Converts the first raw value to an owned string.
pub fn string(values: &[String]) -> Result<String, ConvertError> {
    first_value(values).map(str::to_string)
}

/// Converts the first raw value to a boolean.
///
/// Only the exact tokens `true` and `false` are accepted; case variants
/// are conversion errors rather than guesses.
pub fn boolean(values: &[String]) -> Result<bool, ConvertError> {
    match first_value(values)? {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ConvertError::InvalidBoolean(other.to_string())),
    }
}

/// Splits every raw occurrence on `,` into trimmed, non-empty elements.
///
/// Order is preserved across occurrences, so `?ids=a,b&ids=c` yields
/// `["a", "b", "c"]`. An input without usable elements yields an empty
/// list, which filter application treats like an unset parameter.
pub fn string_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|element| !element.is_empty())
        .map(str::to_string)
        .collect()
}

/// Converts the first raw value to a non-negative integer.
pub fn unsigned(values: &[String]) -> Result<u32, ConvertError> {
    let raw = first_value(values)?;
    raw.parse::<u32>()
        .map_err(|_| ConvertError::InvalidUnsigned(raw.to_string()))
}

/// Converts the first raw value to a positive integer.
pub fn positive(values: &[String]) -> Result<u32, ConvertError> {
    let raw = first_value(values)?;
    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConvertError::InvalidPositive(raw.to_string())),
    }
}
