//! Loosely typed numeric fields (volume, alcohol) as they arrive from users.
//!
//! Records may carry either a number or free text such as `"330 ml"` or `"5%"`.
//! Everything that is not a digit or a decimal point is stripped, then the longest
//! leading number is read, so `"4.5% vol."` is 4.5 and `"1.2.3"` is 1.2.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\d.]").expect("static numeric cleanup pattern is valid"));

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+\.?\d*|\.\d+)").expect("static leading number pattern is valid"));

/// Strip every character that is neither a digit nor a decimal point.
pub fn clean_numeric(raw: &str) -> String {
    NON_NUMERIC.replace_all(raw, "").into_owned()
}

/// Longest numeric prefix of already cleaned text; `None` when it starts with no number.
fn leading_number(cleaned: &str) -> Option<f64> {
    LEADING_NUMBER.find(cleaned)?.as_str().parse::<f64>().ok()
}

/// A numeric field that may have been stored as a number or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Number(f64),
    Text(String),
}

impl Measure {
    /// Parsed, non-negative, finite value. `None` means "contributes nothing".
    pub fn value(&self) -> Option<f64> {
        let parsed = match self {
            Self::Number(n) => *n,
            Self::Text(s) => leading_number(&clean_numeric(s))?,
        };
        (parsed.is_finite() && parsed >= 0.0).then_some(parsed)
    }

    /// Treat empty or whitespace-only text as an absent field.
    pub fn from_input(raw: Option<&str>) -> Option<Self> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::Text(trimmed.to_string()))
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Measure {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Measure {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
