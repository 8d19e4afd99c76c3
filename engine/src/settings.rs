//! Engine configuration loaded via OrthoConfig.
//!
//! Settings layer CLI arguments over environment variables over file
//! configuration. Only two things are configurable: where the depot sits
//! (the origin of every Km column) and where the preference document
//! lives.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::distance::GeoPoint;

/// Default depot latitude (Tel Aviv logistics yard).
const DEFAULT_DEPOT_LATITUDE: f64 = 32.0853;

/// Default depot longitude.
const DEFAULT_DEPOT_LONGITUDE: f64 = 34.7818;

fn default_preferences_path() -> PathBuf {
    PathBuf::from("board-preferences.json")
}

/// Configuration values for the delivery board engine.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOARD")]
pub struct BoardSettings {
    /// Depot latitude override in degrees.
    pub depot_latitude: Option<f64>,
    /// Depot longitude override in degrees.
    pub depot_longitude: Option<f64>,
    /// Optional preference document path override.
    pub preferences_path: Option<PathBuf>,
}

impl BoardSettings {
    /// Return the depot origin, falling back to the default yard.
    pub fn depot(&self) -> GeoPoint {
        GeoPoint::new(
            self.depot_latitude.unwrap_or(DEFAULT_DEPOT_LATITUDE),
            self.depot_longitude.unwrap_or(DEFAULT_DEPOT_LONGITUDE),
        )
    }

    /// Return the preference document path, falling back to the default.
    pub fn preferences_path(&self) -> PathBuf {
        self.preferences_path
            .clone()
            .unwrap_or_else(default_preferences_path)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for engine configuration parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    fn load_from_empty_args() -> BoardSettings {
        BoardSettings::load_from_iter([OsString::from("engine")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("BOARD_DEPOT_LATITUDE", None::<String>),
            ("BOARD_DEPOT_LONGITUDE", None::<String>),
            ("BOARD_PREFERENCES_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.depot().latitude(), DEFAULT_DEPOT_LATITUDE);
        assert_eq!(settings.depot().longitude(), DEFAULT_DEPOT_LONGITUDE);
        assert_eq!(settings.preferences_path(), default_preferences_path());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BOARD_DEPOT_LATITUDE", Some("31.25".to_owned())),
            ("BOARD_DEPOT_LONGITUDE", Some("34.79".to_owned())),
            (
                "BOARD_PREFERENCES_PATH",
                Some("/tmp/board-preferences.json".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.depot().latitude(), 31.25);
        assert_eq!(settings.depot().longitude(), 34.79);
        assert_eq!(
            settings.preferences_path(),
            PathBuf::from("/tmp/board-preferences.json")
        );
    }
}
