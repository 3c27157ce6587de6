//! Configuration for the overlay-pad front-end

use crate::error::{ConfigError, Result};
use crate::pad::PadButtons;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OverlayConfig {
    pub input: InputConfig,
    pub dpad: DpadBindings,
}

/// Input settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Allow two simultaneous touches on the d-pad
    pub multitouch: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { multitouch: true }
    }
}

/// Emulated button bits driven by the d-pad widget
///
/// Each overlay widget owns a statically assigned bit range inside one
/// digital word. Ranges of concurrently active widgets must be disjoint;
/// `validate` checks the four bits of this widget against each other,
/// disjointness across widgets is by assignment of these constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DpadBindings {
    /// Index of the digital word this widget writes into
    pub digital_index: usize,
    pub up_bit: u32,
    pub right_bit: u32,
    pub down_bit: u32,
    pub left_bit: u32,
}

impl Default for DpadBindings {
    fn default() -> Self {
        Self {
            digital_index: 0,
            up_bit: PadButtons::DPAD_UP.bits(),
            right_bit: PadButtons::DPAD_RIGHT.bits(),
            down_bit: PadButtons::DPAD_DOWN.bits(),
            left_bit: PadButtons::DPAD_LEFT.bits(),
        }
    }
}

impl DpadBindings {
    /// Combined mask of every bit owned by this widget
    pub fn mask(&self) -> u32 {
        self.up_bit | self.right_bit | self.down_bit | self.left_bit
    }

    /// Check that the four direction bits do not overlap
    pub fn validate(&self) -> Result<()> {
        let sum = self.up_bit.count_ones()
            + self.right_bit.count_ones()
            + self.down_bit.count_ones()
            + self.left_bit.count_ones();
        if sum != self.mask().count_ones() {
            return Err(ConfigError::OverlappingBits(self.mask()));
        }
        Ok(())
    }
}

impl OverlayConfig {
    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(crate::StoreError::from)?;
            Ok(toml::from_str(&content).map_err(crate::StoreError::from)?)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(crate::StoreError::from)?;
        }

        let content = toml::to_string_pretty(self).map_err(crate::StoreError::from)?;
        std::fs::write(&path, content).map_err(crate::StoreError::from)?;
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("overlay-pad")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OverlayConfig::default();
        assert!(config.input.multitouch);
        assert_eq!(config.dpad.digital_index, 0);
        assert_eq!(config.dpad.up_bit, 0x0010);
        assert_eq!(config.dpad.left_bit, 0x0080);
    }

    #[test]
    fn test_config_serialization() {
        let config = OverlayConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: OverlayConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.dpad.mask(), config.dpad.mask());
        assert_eq!(parsed.input.multitouch, config.input.multitouch);
    }

    #[test]
    fn test_bindings_mask() {
        let bindings = DpadBindings::default();
        assert_eq!(bindings.mask(), 0x00f0);
        assert!(bindings.validate().is_ok());
    }

    #[test]
    fn test_bindings_overlap_rejected() {
        let bindings = DpadBindings {
            right_bit: 0x0010, // collides with up_bit
            ..DpadBindings::default()
        };
        assert!(matches!(
            bindings.validate(),
            Err(ConfigError::OverlappingBits(_))
        ));
    }
}
