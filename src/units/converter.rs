//! Unit conversion and display formatting
//!
//! Conversions always go through milliliters. Rounding happens only when a
//! value is formatted, so totals summed from converted quantities carry no
//! per-item rounding error.

use super::measurement::UnitOfMeasurement;

/// Convert a quantity between units
///
/// Same-unit conversion returns the input untouched.
pub fn convert(quantity: f64, from: UnitOfMeasurement, to: UnitOfMeasurement) -> f64 {
    if from == to {
        return quantity;
    }
    quantity * from.ml_per_unit() / to.ml_per_unit()
}

/// Format a quantity for display in the given unit
///
/// Rounds to the unit's decimal places and trims trailing zeros, so ounces
/// render as "4" or "4.06" and milliliters as whole numbers. A value that
/// rounds to zero is always "0", never "-0".
pub fn format(quantity: f64, unit: UnitOfMeasurement) -> String {
    let places = unit.decimal_places();
    let scale = 10f64.powi(places as i32);
    let mut rounded = (quantity * scale).round() / scale;
    if rounded == 0.0 {
        rounded = 0.0;
    }

    let text = format!("{:.*}", places, rounded);
    if places == 0 {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Format a quantity followed by the unit abbreviation, e.g. "4.06 oz"
pub fn format_with_abbreviation(quantity: f64, unit: UnitOfMeasurement) -> String {
    format!("{} {}", format(quantity, unit), unit.abbreviation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::ML_PER_FL_OZ;

    const QUANTITIES: [f64; 8] = [0.0, 0.5, 1.0, 2.25, 4.0, 29.5735, 120.0, 1234.5678];

    #[test]
    fn test_same_unit_is_exact() {
        for unit in UnitOfMeasurement::ALL {
            for q in QUANTITIES {
                assert_eq!(convert(q, unit, unit).to_bits(), q.to_bits());
            }
        }
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        for from in UnitOfMeasurement::ALL {
            for to in UnitOfMeasurement::ALL {
                for q in QUANTITIES {
                    let back = convert(convert(q, from, to), to, from);
                    assert!((back - q).abs() <= 1e-9 * q.max(1.0), "{q} {from} -> {to}");
                }
            }
        }
    }

    #[test]
    fn test_ounce_to_milliliter() {
        assert!((convert(1.0, UnitOfMeasurement::Ounce, UnitOfMeasurement::Milliliter) - ML_PER_FL_OZ).abs() < 1e-12);
        let oz = convert(120.0, UnitOfMeasurement::Milliliter, UnitOfMeasurement::Ounce);
        assert!((oz - 4.0577).abs() < 0.001);
    }

    #[test]
    fn test_format_ounces() {
        assert_eq!(format(4.0, UnitOfMeasurement::Ounce), "4");
        assert_eq!(format(4.0577, UnitOfMeasurement::Ounce), "4.06");
        assert_eq!(format(2.5, UnitOfMeasurement::Ounce), "2.5");
        assert_eq!(format(10.0577, UnitOfMeasurement::Ounce), "10.06");
    }

    #[test]
    fn test_format_milliliters_whole() {
        assert_eq!(format(118.294, UnitOfMeasurement::Milliliter), "118");
        assert_eq!(format(120.0, UnitOfMeasurement::Milliliter), "120");
        assert_eq!(format(0.6, UnitOfMeasurement::Milliliter), "1");
    }

    #[test]
    fn test_format_never_negative_zero() {
        assert_eq!(format(-0.0, UnitOfMeasurement::Ounce), "0");
        assert_eq!(format(-0.001, UnitOfMeasurement::Ounce), "0");
        assert_eq!(format(-0.2, UnitOfMeasurement::Milliliter), "0");
        assert_eq!(format(0.0, UnitOfMeasurement::Milliliter), "0");
    }

    #[test]
    fn test_format_with_abbreviation() {
        assert_eq!(format_with_abbreviation(4.0577, UnitOfMeasurement::Ounce), "4.06 oz");
        assert_eq!(format_with_abbreviation(0.0, UnitOfMeasurement::Milliliter), "0 ml");
    }
}
