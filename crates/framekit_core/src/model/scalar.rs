//! Caller-supplied numeric input before validation.

use std::fmt::{Display, Formatter};

/// A numeric field as received from a caller.
///
/// Keeps absent and malformed input distinguishable so validation can
/// report the precise rule a field breaks.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
    /// No value was supplied (or it was blank).
    #[default]
    Missing,
    /// A parsed number. May still be non-finite when built in code.
    Number(f64),
    /// Raw input that does not parse as a number.
    Invalid(String),
}

impl Scalar {
    /// Parses query-string style input.
    ///
    /// Surrounding whitespace is ignored and blank input is `Missing`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Number(value),
            _ => Self::Invalid(trimmed.to_string()),
        }
    }

    /// Parses optional query-string style input.
    pub fn parse_opt(raw: Option<&str>) -> Self {
        raw.map_or(Self::Missing, Self::parse)
    }

    /// Returns the numeric value only when it is present and finite.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "<missing>"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Invalid(raw) => write!(f, "{raw}"),
        }
    }
}
