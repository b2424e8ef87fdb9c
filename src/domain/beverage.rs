//! Logged beverages and the add-beverage validation rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::measure::Measure;
use super::style::BeerStyle;

/// Opaque identifier assigned by the record store
pub type RecordId = String;

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MIN_VOLUME_ML: f64 = 1.0;
pub const MAX_VOLUME_ML: f64 = 10_000.0;
pub const MIN_ABV: f64 = 0.0;
pub const MAX_ABV: f64 = 100.0;

/// One logged drink, as read back from the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeverageRecord {
    pub id: RecordId,
    pub user_id: String,
    pub name: String,
    pub style: BeerStyle,
    /// Volume in milliliters
    pub volume_ml: Option<Measure>,
    /// Alcohol by volume, in percent
    pub abv: Option<Measure>,
    pub created_at: DateTime<Utc>,
}

/// Raw form input for a new beverage
#[derive(Debug, Clone, Default)]
pub struct NewBeverage {
    pub name: String,
    pub style: String,
    pub volume_ml: Option<String>,
    pub abv: Option<String>,
}

/// A new beverage that passed validation and may be appended
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBeverage {
    pub name: String,
    pub style: BeerStyle,
    pub volume_ml: Option<Measure>,
    pub abv: Option<Measure>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Beer name must be at least 2 characters")]
    NameTooShort,

    #[error("Beer name must be at most 100 characters")]
    NameTooLong,

    #[error("Beer style is required")]
    MissingStyle,

    #[error("Volume is not a number: {0}")]
    InvalidVolume(String),

    #[error("Volume must be between 1 and 10000 ml, got {0}")]
    VolumeOutOfRange(f64),

    #[error("Alcohol is not a number: {0}")]
    InvalidAbv(String),

    #[error("Alcohol must be between 0 and 100 %, got {0}")]
    AbvOutOfRange(f64),
}

impl NewBeverage {
    pub fn new(name: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            style: style.into(),
            ..Self::default()
        }
    }

    pub fn volume(mut self, volume_ml: impl Into<String>) -> Self {
        self.volume_ml = Some(volume_ml.into());
        self
    }

    pub fn abv(mut self, abv: impl Into<String>) -> Self {
        self.abv = Some(abv.into());
        self
    }

    /// Apply the add-beverage form rules. Blank optional fields count as absent.
    pub fn validate(&self) -> Result<ValidBeverage, ValidationError> {
        let name = self.name.trim();
        let name_len = name.chars().count();
        if name_len < MIN_NAME_LENGTH {
            return Err(ValidationError::NameTooShort);
        }
        if name_len > MAX_NAME_LENGTH {
            return Err(ValidationError::NameTooLong);
        }

        if self.style.trim().is_empty() {
            return Err(ValidationError::MissingStyle);
        }

        let volume_ml = Measure::from_input(self.volume_ml.as_deref());
        if let Some(measure) = &volume_ml {
            let value = measure
                .value()
                .ok_or_else(|| ValidationError::InvalidVolume(measure.to_string()))?;
            if !(MIN_VOLUME_ML..=MAX_VOLUME_ML).contains(&value) {
                return Err(ValidationError::VolumeOutOfRange(value));
            }
        }

        let abv = Measure::from_input(self.abv.as_deref());
        if let Some(measure) = &abv {
            let value = measure
                .value()
                .ok_or_else(|| ValidationError::InvalidAbv(measure.to_string()))?;
            if !(MIN_ABV..=MAX_ABV).contains(&value) {
                return Err(ValidationError::AbvOutOfRange(value));
            }
        }

        Ok(ValidBeverage {
            name: name.to_string(),
            style: BeerStyle::parse(&self.style),
            volume_ml,
            abv,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_beverage_passes() {
        let valid = NewBeverage::new("  Ursus Premium ", "lager")
            .volume("500 ml")
            .abv("5")
            .validate()
            .unwrap();
        assert_eq!(valid.name, "Ursus Premium");
        assert_eq!(valid.style, BeerStyle::Lager);
        assert_eq!(valid.volume_ml.unwrap().value(), Some(500.0));
    }

    #[test]
    fn test_name_length_bounds() {
        assert_eq!(
            NewBeverage::new("A", "IPA").validate(),
            Err(ValidationError::NameTooShort)
        );
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            NewBeverage::new(long, "IPA").validate(),
            Err(ValidationError::NameTooLong)
        );
    }

    #[test]
    fn test_style_required() {
        assert_eq!(
            NewBeverage::new("Ciuc", "  ").validate(),
            Err(ValidationError::MissingStyle)
        );
    }

    #[test]
    fn test_volume_range() {
        assert_eq!(
            NewBeverage::new("Ciuc", "Lager").volume("0").validate(),
            Err(ValidationError::VolumeOutOfRange(0.0))
        );
        assert_eq!(
            NewBeverage::new("Ciuc", "Lager").volume("20000").validate(),
            Err(ValidationError::VolumeOutOfRange(20000.0))
        );
        assert!(matches!(
            NewBeverage::new("Ciuc", "Lager").volume("lots").validate(),
            Err(ValidationError::InvalidVolume(_))
        ));
    }

    #[test]
    fn test_abv_range_and_blank_fields() {
        assert_eq!(
            NewBeverage::new("Ciuc", "Lager").abv("150").validate(),
            Err(ValidationError::AbvOutOfRange(150.0))
        );
        let valid = NewBeverage::new("Ciuc", "Lager")
            .volume("")
            .abv(" ")
            .validate()
            .unwrap();
        assert!(valid.volume_ml.is_none());
        assert!(valid.abv.is_none());
    }

    #[test]
    fn test_dotted_units_are_accepted() {
        let valid = NewBeverage::new("Ciuc", "Lager")
            .volume("500 ml.")
            .abv("4.5% vol.")
            .validate()
            .unwrap();
        assert_eq!(valid.abv.as_ref().and_then(Measure::value), Some(4.5));
        assert_eq!(valid.volume_ml.as_ref().and_then(Measure::value), Some(500.0));
    }
}
