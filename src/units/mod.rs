//! Measurement units
//!
//! Feeding quantities and the conversions between the units they are recorded in.

pub mod converter;
pub mod measurement;

pub use converter::{convert, format, format_with_abbreviation};
pub use measurement::{UnitError, UnitOfMeasurement, ML_PER_FL_OZ};
