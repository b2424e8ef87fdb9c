//! Core domain types for the tavern

mod beverage;
mod measure;
mod style;
mod user;

pub use beverage::{BeverageRecord, NewBeverage, RecordId, ValidBeverage, ValidationError};
pub use measure::{Measure, clean_numeric};
pub use style::{BeerStyle, KNOWN_STYLES};
pub use user::{User, UserRole};
