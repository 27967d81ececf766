use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::ConfigError;
use crate::report::VALUE_DECIMALS;
use crate::{ControllerType, FoptdModel, TuningInputs};

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CalculatorConfig {
    pub defaults: FormDefaults,
    pub display: DisplayConfig,
}

/// Initial values of the input form.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FormDefaults {
    pub process_gain: f64,
    pub time_constant: f64,
    pub dead_time: f64,
    pub closed_loop_time_constant: f64,
    pub controller_type: ControllerType,
}

impl Default for FormDefaults {
    fn default() -> Self {
        let inputs = TuningInputs::default();
        Self {
            process_gain: inputs.model.gain,
            time_constant: inputs.model.time_constant,
            dead_time: inputs.model.dead_time,
            closed_loop_time_constant: inputs.closed_loop_time_constant,
            controller_type: inputs.controller_type,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimals for Kc, τI and τD in the results table.
    pub value_decimals: usize,
    /// Decimals for θ and τc in the input form.
    pub input_decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            value_decimals: VALUE_DECIMALS,
            input_decimals: 3,
        }
    }
}

impl CalculatorConfig {
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: CalculatorConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.initial_inputs().validate()?;
        Ok(config)
    }

    pub fn initial_inputs(&self) -> TuningInputs {
        let d = &self.defaults;
        TuningInputs {
            model: FoptdModel::new(d.process_gain, d.time_constant, d.dead_time),
            closed_loop_time_constant: d.closed_loop_time_constant,
            controller_type: d.controller_type,
        }
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<CalculatorConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = CalculatorConfig::from_toml_str(&content, path)?;
    info!(path = %path.display(), "loaded calculator config");
    Ok(config)
}
