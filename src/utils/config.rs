use crate::core::{CoordinateSpan, DepthUnit};
use crate::core::constants::{HEATMAP_GLOW_ALPHA, RING_COUNT};
use crate::input::validation::ValidationPolicy;
use crate::visual::color::DepthRamp;
use crate::visual::depth::RadiusScale;
use crate::visual::rings::RingStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

/// Mapper-wide configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Unit depths are typed and displayed in
    pub depth_unit: DepthUnit,
    /// Heatmap glow settings
    pub heatmap: HeatmapConfig,
    /// Concentric ring settings
    pub rings: RingConfig,
    /// Depth colour ramp
    pub ramp: DepthRamp,
    /// Input validation policy
    pub validation: ValidationPolicy,
    /// Span of the initial map region
    pub default_span: CoordinateSpan,
    /// Default tracing level when RUST_LOG is unset
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    pub radius: RadiusScale,
    /// Alpha at the centre of each glow
    pub glow_alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    pub radius: RadiusScale,
    pub count: u8,
    pub style: RingStyle,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            depth_unit: DepthUnit::Meters,
            heatmap: HeatmapConfig::default(),
            rings: RingConfig::default(),
            ramp: DepthRamp::default(),
            validation: ValidationPolicy::default(),
            default_span: CoordinateSpan {
                latitude_delta: 0.05,
                longitude_delta: 0.05,
            },
            log_level: "info".to_string(),
        }
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            radius: RadiusScale::heatmap(),
            glow_alpha: HEATMAP_GLOW_ALPHA,
        }
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            radius: RadiusScale::rings(),
            count: RING_COUNT,
            style: RingStyle::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    #[error("I/O error: {message}")]
    Io { message: String },
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

/// Outcome of validating a configuration
#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn into_result(self) -> Result<Vec<String>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.warnings),
        }
    }
}

/// Owns the active configuration and its backing file
pub struct ConfigurationManager {
    config: MapperConfig,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl ConfigurationManager {
    /// Create a manager with default settings
    pub fn new() -> Self {
        Self {
            config: MapperConfig::default(),
            config_file_path: None,
            is_modified: false,
        }
    }

    /// Create a manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn get_config(&self) -> &MapperConfig {
        &self.config
    }

    /// Replace the configuration after validation
    pub fn update_config(&mut self, config: MapperConfig) -> Result<(), ConfigError> {
        for warning in Self::validate_config(&config).into_result()? {
            warn!(%warning, "configuration warning");
        }
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Switch display units, returning the previous unit
    pub fn set_depth_unit(&mut self, unit: DepthUnit) -> DepthUnit {
        let old = self.config.depth_unit;
        if old != unit {
            self.config.depth_unit = unit;
            self.is_modified = true;
        }
        old
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            message: format!("failed to read config file '{}': {}", path_str, e),
        })?;

        let config: MapperConfig = serde_json::from_str(&content).map_err(|e| ConfigError::Serialization {
            message: format!("failed to parse config file '{}': {}", path_str, e),
        })?;

        for warning in Self::validate_config(&config).into_result()? {
            warn!(%warning, path = %path_str, "configuration warning");
        }

        info!(path = %path_str, "configuration loaded");
        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::Serialization {
            message: format!("failed to serialize config: {}", e),
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::Io {
            message: format!("failed to write config file '{}': {}", path_str, e),
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the path last loaded from or saved to
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::Io {
                message: "no file path set for saving configuration".to_string(),
            }),
        }
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Check every parameter, collecting all errors and warnings
    pub fn validate_config(config: &MapperConfig) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        check_scale(&mut errors, "heatmap.radius", &config.heatmap.radius);
        check_scale(&mut errors, "rings.radius", &config.rings.radius);
        check_unit_interval(&mut errors, "heatmap.glow_alpha", config.heatmap.glow_alpha);
        if config.heatmap.glow_alpha == 0.0 {
            warnings.push("Heatmap glow alpha of 0 makes the overlay invisible".to_string());
        }

        if config.rings.count == 0 {
            errors.push(ConfigError::InvalidParameter {
                parameter: "rings.count".to_string(),
                value: config.rings.count.to_string(),
                reason: "At least one ring is required".to_string(),
            });
        } else if config.rings.count > 10 {
            warnings.push("Many rings per waypoint may clutter the map".to_string());
        }
        check_unit_interval(&mut errors, "rings.style.fill.alpha", config.rings.style.fill.alpha);
        check_unit_interval(&mut errors, "rings.style.stroke.alpha", config.rings.style.stroke.alpha);
        if !(config.rings.style.line_width.is_finite() && config.rings.style.line_width >= 0.0) {
            errors.push(ConfigError::InvalidParameter {
                parameter: "rings.style.line_width".to_string(),
                value: config.rings.style.line_width.to_string(),
                reason: "Line width must be a non-negative number".to_string(),
            });
        }

        check_unit_interval(&mut errors, "ramp.hue", config.ramp.hue);
        check_unit_interval(&mut errors, "ramp.saturation", config.ramp.saturation);
        check_unit_interval(&mut errors, "ramp.max_brightness", config.ramp.max_brightness);
        check_unit_interval(&mut errors, "ramp.min_brightness", config.ramp.min_brightness);
        if config.ramp.min_brightness > config.ramp.max_brightness {
            errors.push(ConfigError::InvalidParameter {
                parameter: "ramp.min_brightness".to_string(),
                value: config.ramp.min_brightness.to_string(),
                reason: "Deep brightness must not exceed shallow brightness".to_string(),
            });
        } else if config.ramp.min_brightness == config.ramp.max_brightness {
            warnings.push("Flat colour ramp hides depth differences".to_string());
        }

        for (parameter, delta) in [
            ("default_span.latitude_delta", config.default_span.latitude_delta),
            ("default_span.longitude_delta", config.default_span.longitude_delta),
        ] {
            if !(delta.is_finite() && delta > 0.0) {
                errors.push(ConfigError::InvalidParameter {
                    parameter: parameter.to_string(),
                    value: delta.to_string(),
                    reason: "Region span must be positive".to_string(),
                });
            }
        }

        if tracing::Level::from_str(&config.log_level).is_err() {
            errors.push(ConfigError::InvalidParameter {
                parameter: "log_level".to_string(),
                value: config.log_level.clone(),
                reason: "Expected one of trace, debug, info, warn, error".to_string(),
            });
        }

        if !config.validation.enforce_coordinate_ranges {
            warnings.push("Coordinate range checks are disabled".to_string());
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new()
    }
}

fn check_scale(errors: &mut Vec<ConfigError>, parameter: &str, scale: &RadiusScale) {
    if !(scale.floor.is_finite() && scale.floor > 0.0) {
        errors.push(ConfigError::InvalidParameter {
            parameter: format!("{}.floor", parameter),
            value: scale.floor.to_string(),
            reason: "Radius floor must be positive".to_string(),
        });
    }
    if !(scale.scale.is_finite() && scale.scale > 0.0) {
        errors.push(ConfigError::InvalidParameter {
            parameter: format!("{}.scale", parameter),
            value: scale.scale.to_string(),
            reason: "Radius scale must be positive".to_string(),
        });
    }
}

fn check_unit_interval(errors: &mut Vec<ConfigError>, parameter: &str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(ConfigError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: "Value must be between 0 and 1".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lake_mapper_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_default_config() {
        let config = MapperConfig::default();
        assert_eq!(config.heatmap.radius, RadiusScale::new(30.0, 5.0));
        assert_eq!(config.rings.radius, RadiusScale::new(10.0, 3.0));
        assert_eq!(config.rings.count, 3);
        assert_eq!(config.depth_unit, DepthUnit::Meters);
        assert!(ConfigurationManager::validate_config(&config).is_valid);
    }

    #[test]
    fn test_manager_creation() {
        let manager = ConfigurationManager::new();
        assert_eq!(manager.get_config(), &MapperConfig::default());
        assert!(!manager.is_modified());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = MapperConfig::default();
        config.heatmap.radius.scale = -1.0;
        config.rings.count = 0;
        config.ramp.min_brightness = 0.9;
        config.ramp.max_brightness = 0.5;
        config.log_level = "loud".to_string();

        let result = ConfigurationManager::validate_config(&config);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 4);

        let mut manager = ConfigurationManager::new();
        assert!(matches!(
            manager.update_config(config),
            Err(ConfigError::InvalidParameter { .. })
        ));
        assert!(!manager.is_modified());
    }

    #[test]
    fn test_warnings_do_not_block() {
        let mut config = MapperConfig::default();
        config.validation = ValidationPolicy::permissive();
        config.heatmap.glow_alpha = 0.0;
        let result = ConfigurationManager::validate_config(&config);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 2);

        let mut manager = ConfigurationManager::new();
        manager.update_config(config).unwrap();
        assert!(manager.is_modified());
    }

    #[test]
    fn test_depth_unit_switch() {
        let mut manager = ConfigurationManager::new();
        assert_eq!(manager.set_depth_unit(DepthUnit::Meters), DepthUnit::Meters);
        assert!(!manager.is_modified());
        assert_eq!(manager.set_depth_unit(DepthUnit::Feet), DepthUnit::Meters);
        assert!(manager.is_modified());
        assert_eq!(manager.get_config().depth_unit, DepthUnit::Feet);
    }

    #[test]
    fn test_config_save_and_load() {
        let path = temp_path("roundtrip");
        let mut manager = ConfigurationManager::new();
        manager.set_depth_unit(DepthUnit::Feet);
        manager.save_to_file(&path).unwrap();
        assert!(!manager.is_modified());

        let loaded = ConfigurationManager::from_file(&path).unwrap();
        assert_eq!(loaded.get_config().depth_unit, DepthUnit::Feet);
        assert_eq!(loaded.get_config(), manager.get_config());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path("partial");
        fs::write(&path, r#"{ "depth_unit": "feet", "log_level": "debug" }"#).unwrap();

        let manager = ConfigurationManager::from_file(&path).unwrap();
        assert_eq!(manager.get_config().depth_unit, DepthUnit::Feet);
        assert_eq!(manager.get_config().log_level, "debug");
        assert_eq!(manager.get_config().rings.count, 3);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_errors() {
        let missing = temp_path("missing");
        assert!(matches!(
            ConfigurationManager::from_file(&missing),
            Err(ConfigError::Io { .. })
        ));

        let path = temp_path("garbage");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            ConfigurationManager::from_file(&path),
            Err(ConfigError::Serialization { .. })
        ));
        let _ = fs::remove_file(path);

        let mut manager = ConfigurationManager::new();
        assert!(matches!(manager.save(), Err(ConfigError::Io { .. })));
    }
}
