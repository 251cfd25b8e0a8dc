//! Preference MCP Tools

use serde::Serialize;

use crate::live::PreferenceStore;
use crate::models::Preferences;
use crate::units::UnitOfMeasurement;

use super::feedings::parse_unit;

/// Response for get_preferences / set_display_unit
#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub display_unit: UnitOfMeasurement,
    pub abbreviation: &'static str,
}

impl From<Preferences> for PreferencesResponse {
    fn from(p: Preferences) -> Self {
        Self {
            display_unit: p.display_unit,
            abbreviation: p.display_unit.abbreviation(),
        }
    }
}

pub fn get_preferences(store: &PreferenceStore) -> PreferencesResponse {
    store.get().into()
}

pub async fn set_display_unit(store: &PreferenceStore, unit: &str) -> Result<PreferencesResponse, String> {
    let unit = parse_unit(unit)?;
    let prefs = store
        .set_display_unit(unit)
        .await
        .map_err(|e| format!("Failed to save preferences: {}", e))?;
    Ok(prefs.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::test_support::temp_database;

    #[tokio::test]
    async fn test_set_and_get() {
        let (_dir, db) = temp_database();
        let store = PreferenceStore::new(db).unwrap();
        assert_eq!(get_preferences(&store).abbreviation, "oz");

        let response = set_display_unit(&store, "milliliters").await.unwrap();
        assert_eq!(response.display_unit, UnitOfMeasurement::Milliliter);
        assert_eq!(get_preferences(&store).abbreviation, "ml");

        assert!(set_display_unit(&store, "pints").await.is_err());
        assert_eq!(get_preferences(&store).display_unit, UnitOfMeasurement::Milliliter);
    }
}
