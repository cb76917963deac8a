use std::fmt;

use serde::{Deserialize, Serialize};

/// Parses user-entered text as a number, falling back to `0.0`.
///
/// Empty text, text that does not parse and non-finite values all coerce to
/// zero so that nothing downstream ever sees `NaN` or an infinity. The whole
/// trimmed text must parse: `"12abc"` and `"1,000"` are zero, not `12` and `1`.
pub fn coerce(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Returns true if `text` is an acceptable in-progress numeric entry.
///
/// Accepts digits with at most one decimal point, including partial entries
/// such as `""`, `"."` and `"12."`. Signs, exponents and whitespace are rejected.
pub fn is_numeric_text(text: &str) -> bool {
    let mut seen_dot = false;
    for c in text.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    true
}

/// A numeric field as supplied by a client: either a JSON number or raw text.
///
/// The raw text is kept as-is; [`NumericInput::value`] applies [`coerce`] only
/// when a number is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    pub fn value(&self) -> f64 {
        match self {
            NumericInput::Number(value) if value.is_finite() => *value,
            NumericInput::Number(_) => 0.0,
            NumericInput::Text(text) => coerce(text),
        }
    }

    /// The form representation of this input.
    pub fn to_text(&self) -> String {
        match self {
            NumericInput::Number(value) => value.to_string(),
            NumericInput::Text(text) => text.clone(),
        }
    }
}

impl Default for NumericInput {
    fn default() -> Self {
        NumericInput::Text(String::new())
    }
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericInput::Number(value) => write!(f, "{value}"),
            NumericInput::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(text: &str) -> Self {
        NumericInput::Text(text.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(text: String) -> Self {
        NumericInput::Text(text)
    }
}

impl From<&String> for NumericInput {
    fn from(text: &String) -> Self {
        NumericInput::Text(text.clone())
    }
}

impl From<&NumericInput> for NumericInput {
    fn from(input: &NumericInput) -> Self {
        input.clone()
    }
}
