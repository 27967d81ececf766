//! IMC tuning rules for FOPTD process models.
//!
//! Division by zero is not guarded: a zero gain or a zero denominator yields
//! an IEEE-754 infinity or NaN in the affected output only.

use tracing::debug;

use crate::{ControllerSettings, ControllerType, FoptdModel, PiSettings, PidSettings, TuningInputs};

/// Kc = τ / (K·(τc + θ)), τI = τ
pub fn calculate_pi(model: &FoptdModel, tau_c: f64) -> PiSettings {
    let FoptdModel {
        gain: k,
        time_constant: tau,
        dead_time: theta,
    } = *model;

    let kc = tau / (k * (tau_c + theta));
    let tau_i = tau;

    PiSettings { kc, tau_i }
}

/// Kc = (τ + θ/2) / (K·(τc + θ/2)), τI = τ + θ/2, τD = τθ / (2τ + θ)
pub fn calculate_pid(model: &FoptdModel, tau_c: f64) -> PidSettings {
    let FoptdModel {
        gain: k,
        time_constant: tau,
        dead_time: theta,
    } = *model;

    let half_theta = theta / 2.0;
    let kc = (tau + half_theta) / (k * (tau_c + half_theta));
    let tau_i = tau + half_theta;
    let tau_d = (tau * theta) / (2.0 * tau + theta);

    PidSettings { kc, tau_i, tau_d }
}

/// Runs the tuning rule selected by `inputs.controller_type`.
pub fn tune(inputs: &TuningInputs) -> ControllerSettings {
    let tau_c = inputs.closed_loop_time_constant;
    let settings = match inputs.controller_type {
        ControllerType::Pi => ControllerSettings::Pi(calculate_pi(&inputs.model, tau_c)),
        ControllerType::Pid => ControllerSettings::Pid(calculate_pid(&inputs.model, tau_c)),
    };

    debug!(
        controller = %inputs.controller_type,
        k = inputs.model.gain,
        tau = inputs.model.time_constant,
        theta = inputs.model.dead_time,
        tau_c,
        kc = settings.kc(),
        tau_i = settings.tau_i(),
        tau_d = ?settings.tau_d(),
        "computed IMC settings"
    );

    settings
}
