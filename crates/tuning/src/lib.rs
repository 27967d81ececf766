use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
pub mod imc;
pub mod report;

pub use config::{load_config, CalculatorConfig};
pub use error::{ConfigError, InputError, ParseControllerTypeError};
pub use imc::{calculate_pi, calculate_pid, tune};
pub use report::{build_report, render_table, ReportRow};

/// First-Order-Plus-Time-Delay process model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoptdModel {
    /// Process gain K.
    pub gain: f64,
    /// Time constant τ.
    pub time_constant: f64,
    /// Time delay θ.
    pub dead_time: f64,
}

impl FoptdModel {
    pub fn new(gain: f64, time_constant: f64, dead_time: f64) -> Self {
        Self {
            gain,
            time_constant,
            dead_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ControllerType {
    #[default]
    #[serde(rename = "PI", alias = "pi")]
    Pi,
    #[serde(rename = "PID", alias = "pid")]
    Pid,
}

impl ControllerType {
    pub const ALL: [ControllerType; 2] = [ControllerType::Pi, ControllerType::Pid];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerType::Pi => "PI",
            ControllerType::Pid => "PID",
        }
    }
}

impl fmt::Display for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControllerType {
    type Err = ParseControllerTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PI" => Ok(ControllerType::Pi),
            "PID" => Ok(ControllerType::Pid),
            _ => Err(ParseControllerTypeError(s.to_string())),
        }
    }
}

/// The five values a host form collects before a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TuningInputs {
    pub model: FoptdModel,
    /// Desired closed-loop time constant τc.
    pub closed_loop_time_constant: f64,
    pub controller_type: ControllerType,
}

impl Default for TuningInputs {
    fn default() -> Self {
        Self {
            model: FoptdModel::new(1.0, 1.0, 0.100),
            closed_loop_time_constant: 1.000,
            controller_type: ControllerType::Pi,
        }
    }
}

impl TuningInputs {
    /// Rejects negative and non-finite parameters, the same policy a form with
    /// `min_value = 0.0` enforces. Zero is accepted.
    pub fn validate(&self) -> Result<(), InputError> {
        for (parameter, value) in self.named_values() {
            error::check_non_negative(parameter, value)?;
        }
        Ok(())
    }

    pub fn named_values(&self) -> [(&'static str, f64); 4] {
        [
            ("process gain (K)", self.model.gain),
            ("time constant (τ)", self.model.time_constant),
            ("time delay (θ)", self.model.dead_time),
            ("controller time constant (τ_c)", self.closed_loop_time_constant),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PiSettings {
    pub kc: f64,
    pub tau_i: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidSettings {
    pub kc: f64,
    pub tau_i: f64,
    pub tau_d: f64,
}

/// Result of a single tuning calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ControllerSettings {
    Pi(PiSettings),
    Pid(PidSettings),
}

impl ControllerSettings {
    pub fn controller_type(&self) -> ControllerType {
        match self {
            ControllerSettings::Pi(_) => ControllerType::Pi,
            ControllerSettings::Pid(_) => ControllerType::Pid,
        }
    }

    pub fn kc(&self) -> f64 {
        match self {
            ControllerSettings::Pi(s) => s.kc,
            ControllerSettings::Pid(s) => s.kc,
        }
    }

    pub fn tau_i(&self) -> f64 {
        match self {
            ControllerSettings::Pi(s) => s.tau_i,
            ControllerSettings::Pid(s) => s.tau_i,
        }
    }

    /// `None` for PI controllers.
    pub fn tau_d(&self) -> Option<f64> {
        match self {
            ControllerSettings::Pi(_) => None,
            ControllerSettings::Pid(s) => Some(s.tau_d),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.kc().is_finite() && self.tau_i().is_finite() && self.tau_d().map_or(true, f64::is_finite)
    }
}
