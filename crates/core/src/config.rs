//! Calculator configuration
//!
//! Settings are read from TOML. Every key is optional; anything left out
//! takes its value from the `Default` impls below. The embedded
//! `defaults.toml` spells out those same values for reference, and a test
//! keeps the two in step.
//!
//! ```toml
//! base = 16
//! angle_mode = "degrees"
//!
//! [random]
//! normal = [100.0, 15.0]
//! ```

use crate::error::{CalcError, CalcResult};
use crate::radix;
use crate::stack::{DEFAULT_STACK_CAPACITY, MAX_STACK_CAPACITY};
use serde::Deserialize;
use std::path::Path;

/// Embedded default configuration
pub static DEFAULT_CONFIG: &str = include_str!("defaults.toml");

/// Unit used by trigonometric inputs and inverse-trigonometric outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

/// Values pushed by `pi`, `e` and `vc`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Constants {
    pub pi: f64,
    pub e: f64,
    /// Metres per second
    pub speed_of_light: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Constants {
            pi: std::f64::consts::PI,
            e: std::f64::consts::E,
            speed_of_light: 299_792_458.0,
        }
    }
}

/// Factors pushed by `mi2m`, `ft2m` and `in2mm`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Conversions {
    pub mile_to_meter: f64,
    pub foot_to_meter: f64,
    pub inch_to_millimeter: f64,
}

impl Default for Conversions {
    fn default() -> Self {
        Conversions {
            mile_to_meter: 5280.0 * 12.0 * 0.0254,
            foot_to_meter: 12.0 * 0.0254,
            inch_to_millimeter: 25.4,
        }
    }
}

/// Initial parameters of the random generators
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RandomDefaults {
    /// Bounds, in either order
    pub uniform: [f64; 2],
    /// Mean and standard deviation
    pub normal: [f64; 2],
    pub exponential_sd: f64,
}

impl Default for RandomDefaults {
    fn default() -> Self {
        RandomDefaults {
            uniform: [0.0, 1.0],
            normal: [0.0, 1.0],
            exponential_sd: 1.0,
        }
    }
}

/// Complete calculator configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    pub stack_capacity: usize,
    pub base: i64,
    /// Requested precision; `None` means the base's significant digits
    pub precision: Option<i64>,
    pub angle_mode: AngleMode,
    pub constants: Constants,
    pub conversions: Conversions,
    pub random: RandomDefaults,
}

impl Default for CalcConfig {
    fn default() -> Self {
        CalcConfig {
            stack_capacity: DEFAULT_STACK_CAPACITY,
            base: 10,
            precision: None,
            angle_mode: AngleMode::Radians,
            constants: Constants::default(),
            conversions: Conversions::default(),
            random: RandomDefaults::default(),
        }
    }
}

impl CalcConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(toml_str: &str) -> CalcResult<Self> {
        let config: CalcConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the embedded defaults
    pub fn default_config() -> CalcResult<Self> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Read and parse a configuration file
    pub fn from_file(path: &Path) -> CalcResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CalcError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.stack_capacity == 0 || self.stack_capacity > MAX_STACK_CAPACITY {
            return Err(CalcError::InvalidCapacity(self.stack_capacity));
        }
        if !radix::is_valid_base(self.base) {
            return Err(CalcError::InvalidBase(self.base));
        }
        Ok(())
    }
}
