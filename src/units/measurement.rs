//! Unit types and conversion constants
//!
//! Every supported unit carries a fixed abbreviation and a fixed factor to
//! milliliters, the common base unit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Milliliters per US fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;

/// Unit parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("Unknown unit of measurement: '{0}' (expected one of: oz, ml)")]
    Unknown(String),
}

/// A unit a feeding can be recorded or displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitOfMeasurement {
    #[default]
    Ounce,
    Milliliter,
}

impl UnitOfMeasurement {
    /// All supported units, in selector order
    pub const ALL: [UnitOfMeasurement; 2] = [UnitOfMeasurement::Ounce, UnitOfMeasurement::Milliliter];

    /// Short label shown next to quantities
    pub fn abbreviation(&self) -> &'static str {
        match self {
            UnitOfMeasurement::Ounce => "oz",
            UnitOfMeasurement::Milliliter => "ml",
        }
    }

    /// Milliliters in one of this unit
    pub fn ml_per_unit(&self) -> f64 {
        match self {
            UnitOfMeasurement::Ounce => ML_PER_FL_OZ,
            UnitOfMeasurement::Milliliter => 1.0,
        }
    }

    /// Maximum decimal places shown when formatting
    pub fn decimal_places(&self) -> usize {
        match self {
            UnitOfMeasurement::Ounce => 2,
            UnitOfMeasurement::Milliliter => 0,
        }
    }

    /// Convert to database string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            UnitOfMeasurement::Ounce => "ounce",
            UnitOfMeasurement::Milliliter => "milliliter",
        }
    }
}

impl fmt::Display for UnitOfMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for UnitOfMeasurement {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "oz" | "ounce" | "ounces" | "fl oz" | "floz" => Ok(UnitOfMeasurement::Ounce),
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Ok(UnitOfMeasurement::Milliliter)
            }
            _ => Err(UnitError::Unknown(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_abbreviations() {
        assert_eq!("oz".parse(), Ok(UnitOfMeasurement::Ounce));
        assert_eq!("ml".parse(), Ok(UnitOfMeasurement::Milliliter));
    }

    #[test]
    fn test_parse_names_case_insensitive() {
        assert_eq!(" Ounces ".parse(), Ok(UnitOfMeasurement::Ounce));
        assert_eq!("MILLILITRE".parse(), Ok(UnitOfMeasurement::Milliliter));
    }

    #[test]
    fn test_parse_unknown_unit_is_an_error() {
        let err = "cup".parse::<UnitOfMeasurement>().unwrap_err();
        assert_eq!(err, UnitError::Unknown("cup".to_string()));
        assert!("".parse::<UnitOfMeasurement>().is_err());
    }

    #[test]
    fn test_db_str_parses_back() {
        for unit in UnitOfMeasurement::ALL {
            assert_eq!(unit.to_db_str().parse(), Ok(unit));
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&UnitOfMeasurement::Milliliter).unwrap();
        assert_eq!(json, "\"milliliter\"");
    }
}
