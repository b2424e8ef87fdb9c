//! Beer style tags

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display names of the built-in styles, in menu order
pub const KNOWN_STYLES: [&str; 11] = [
    "Blonde", "Dark", "IPA", "Craft", "Lager", "Pilsner", "Stout", "Porter", "Wheat", "Sour",
    "Other",
];

/// Style of a logged beer. Unknown names are kept verbatim in `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BeerStyle {
    Blonde,
    Dark,
    Ipa,
    Craft,
    Lager,
    Pilsner,
    Stout,
    Porter,
    Wheat,
    Sour,
    Other,
    Custom(String),
}

impl BeerStyle {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Blonde => "Blonde",
            Self::Dark => "Dark",
            Self::Ipa => "IPA",
            Self::Craft => "Craft",
            Self::Lager => "Lager",
            Self::Pilsner => "Pilsner",
            Self::Stout => "Stout",
            Self::Porter => "Porter",
            Self::Wheat => "Wheat",
            Self::Sour => "Sour",
            Self::Other => "Other",
            Self::Custom(name) => name,
        }
    }

    /// Case-insensitive match against the built-in styles
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "blonde" => Self::Blonde,
            "dark" => Self::Dark,
            "ipa" => Self::Ipa,
            "craft" => Self::Craft,
            "lager" => Self::Lager,
            "pilsner" => Self::Pilsner,
            "stout" => Self::Stout,
            "porter" => Self::Porter,
            "wheat" => Self::Wheat,
            "sour" => Self::Sour,
            "other" => Self::Other,
            _ => Self::Custom(trimmed.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for BeerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for BeerStyle {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<BeerStyle> for String {
    fn from(value: BeerStyle) -> Self {
        value.as_str().to_string()
    }
}
