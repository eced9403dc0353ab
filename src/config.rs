//! Run parameters, loadable from a TOML file.
//!
//! Every section and field has a default, so a file only needs the values it
//! changes:
//!
//! ```toml
//! [controller]
//! kp = 0.2
//! reset = "carry"
//!
//! [disturbance]
//! variance = 0.1
//! seed = 42
//! ```

use std::fs::read_to_string;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dynamics::{Submarine, SubmarineParams};
use crate::gnc::{PdController, PdGains};
use crate::io::csv::read_mission_file;
use crate::mission::{Mission, MissionError};
use crate::sim::{ClosedLoop, ControllerReset, DEFAULT_VARIANCE};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot load the config file: {0}")]
    FileLoadError(#[from] std::io::Error),

    #[error("Cannot read the config file: {0}")]
    DeserialiseError(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub kp: f64,
    pub kd: f64,
    pub reset: ControllerReset,
}

impl ControllerConfig {
    pub fn gains(&self) -> PdGains {
        PdGains { kp: self.kp, kd: self.kd }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        let gains = PdGains::default();
        Self { kp: gains.kp, kd: gains.kd, reset: ControllerReset::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisturbanceConfig {
    pub variance: f64,
    /// Fixed RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for DisturbanceConfig {
    fn default() -> Self {
        Self { variance: DEFAULT_VARIANCE, seed: None }
    }
}

/// Parameters for procedurally generated missions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub duration: usize,
    pub scale: f64,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self { duration: 100, scale: 1.0 }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub vehicle: SubmarineParams,
    pub controller: ControllerConfig,
    pub disturbance: DisturbanceConfig,
    pub mission: MissionConfig,
}

impl SimConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load `path` when given, otherwise fall back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// RNG for mission generation and disturbances, seeded from the
    /// disturbance section when a seed is set.
    pub fn rng(&self) -> StdRng {
        match self.disturbance.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Mission read from a CSV file, or generated from the mission section.
    pub fn mission<R: Rng + ?Sized>(
        &self,
        path: Option<&Path>,
        rng: &mut R,
    ) -> Result<Mission, MissionError> {
        match path {
            Some(path) => read_mission_file(path),
            None => Ok(Mission::random(self.mission.duration, self.mission.scale, rng)),
        }
    }

    /// Closed loop built from the vehicle and controller sections.
    pub fn closed_loop(&self) -> ClosedLoop<PdController> {
        ClosedLoop::new(
            Submarine::new(self.vehicle),
            PdController::from_gains(self.controller.gains()),
        )
        .with_controller_reset(self.controller.reset)
    }
}
