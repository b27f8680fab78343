//! Configuration for the map view, camera behavior and data source
//!
//! Camera behavior comes in presets (profiles) in the same way rendering
//! quality does in a map engine; everything else has plain defaults and can
//! be overridden from a JSON file.

use crate::animation::easing::EasingType;
use crate::core::constants::{
    DEFAULT_CENTER, DEFAULT_ZOOM, FLY_DURATION_MS, MAX_ZOOM, MIN_ZOOM, POPUP_OPEN_DELAY_MS,
    SELECTION_ZOOM,
};
use crate::core::geo::LatLng;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum CameraProfile {
    /// Animated fly-to, popup opens when the flight completes
    Smooth,
    /// Jump cut, popup opens after the fixed fallback delay
    Instant,
    Custom(CameraConfig),
}

impl CameraProfile {
    pub fn resolve(&self) -> CameraConfig {
        match self {
            Self::Smooth => CameraConfig {
                enable_transitions: true,
                easing: EasingType::EaseInOut,
                fly_duration_ms: FLY_DURATION_MS,
                selection_zoom: SELECTION_ZOOM,
                popup_delay_ms: POPUP_OPEN_DELAY_MS,
            },
            Self::Instant => CameraConfig {
                enable_transitions: false,
                easing: EasingType::Linear,
                fly_duration_ms: 0,
                selection_zoom: SELECTION_ZOOM,
                popup_delay_ms: POPUP_OPEN_DELAY_MS,
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for CameraProfile {
    fn default() -> Self {
        Self::Smooth
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub enable_transitions: bool,
    pub easing: EasingType,
    pub fly_duration_ms: u64,
    /// Zoom level used when centering on a selected location
    pub selection_zoom: f64,
    /// Fallback delay before the popup opens when there is no completion signal
    pub popup_delay_ms: u64,
}

impl CameraConfig {
    pub fn fly_duration(&self) -> Duration {
        if self.enable_transitions {
            Duration::from_millis(self.fly_duration_ms)
        } else {
            Duration::ZERO
        }
    }

    pub fn popup_delay(&self) -> Duration {
        Duration::from_millis(self.popup_delay_ms)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraProfile::default().resolve()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// `[latitude, longitude]`
    pub center: [f64; 2],
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl ViewConfig {
    pub fn center(&self) -> LatLng {
        LatLng::from(self.center)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

/// Where categories and locations come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSourceConfig {
    /// REST endpoints under `base_url` (`/categories`, `/locations`)
    Http { base_url: String },
    /// `categories.json` and `locations.json` in a directory
    Files { dir: PathBuf },
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self::Http {
            base_url: "http://127.0.0.1:3000/api".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub view: ViewConfig,
    pub camera: CameraConfig,
    pub data: DataSourceConfig,
}

impl AppConfig {
    pub fn with_camera_profile(mut self, profile: CameraProfile) -> Self {
        self.camera = profile.resolve();
        self
    }

    pub fn with_data_source(mut self, data: DataSourceConfig) -> Self {
        self.data = data;
        self
    }

    /// Parses a JSON config; missing sections fall back to defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.view.center().is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "view center {:?} is not a [latitude, longitude] pair",
                self.view.center
            )));
        }
        if self.view.min_zoom > self.view.max_zoom {
            return Err(MapError::ParseError(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.view.min_zoom, self.view.max_zoom
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_profile_presets() {
        let smooth = CameraProfile::Smooth.resolve();
        let instant = CameraProfile::Instant.resolve();

        assert!(smooth.enable_transitions);
        assert_eq!(smooth.fly_duration(), Duration::from_millis(FLY_DURATION_MS));

        assert!(!instant.enable_transitions);
        assert_eq!(instant.fly_duration(), Duration::ZERO);
        assert_eq!(instant.popup_delay(), Duration::from_millis(POPUP_OPEN_DELAY_MS));
    }

    #[test]
    fn test_default_view_is_qingpu() {
        let config = AppConfig::default();
        assert_eq!(config.view.center(), LatLng::new(25.011905, 121.216255));
        assert_eq!(config.view.zoom, 16.0);
    }

    #[test]
    fn test_partial_json_config() {
        let config = AppConfig::from_json_str(
            r#"{
                "camera": { "enable_transitions": false },
                "data": { "kind": "files", "dir": "data" }
            }"#,
        )
        .unwrap();

        assert!(!config.camera.enable_transitions);
        assert_eq!(config.camera.popup_delay_ms, POPUP_OPEN_DELAY_MS);
        assert_eq!(config.view, ViewConfig::default());
        assert_eq!(
            config.data,
            DataSourceConfig::Files {
                dir: PathBuf::from("data")
            }
        );
    }

    #[test]
    fn test_swapped_center_is_rejected() {
        let result = AppConfig::from_json_str(r#"{ "view": { "center": [121.2, 25.0] } }"#);
        assert!(matches!(result, Err(MapError::InvalidCoordinates(_))));
    }
}
