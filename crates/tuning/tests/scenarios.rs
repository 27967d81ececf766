//! End-to-end checks of the tuning core: inputs in, display rows out.

use tuning::report::VALUE_DECIMALS;
use tuning::{build_report, tune, ControllerType, FoptdModel, TuningInputs};

fn rows_for(k: f64, tau: f64, theta: f64, tau_c: f64, controller_type: ControllerType) -> Vec<String> {
    let inputs = TuningInputs {
        model: FoptdModel::new(k, tau, theta),
        closed_loop_time_constant: tau_c,
        controller_type,
    };
    build_report(&tune(&inputs), VALUE_DECIMALS)
        .into_iter()
        .map(|row| row.value)
        .collect()
}

#[test]
fn default_form_pi() {
    let rows = rows_for(1.0, 1.0, 0.1, 1.0, ControllerType::Pi);
    assert_eq!(rows, ["PI", "0.9091", "1.0000", "Not applicable"]);
}

#[test]
fn default_form_pid() {
    let rows = rows_for(1.0, 1.0, 0.1, 1.0, ControllerType::Pid);
    assert_eq!(rows, ["PID", "1.0000", "1.0500", "0.0476"]);
}

#[test]
fn larger_process_pi() {
    let rows = rows_for(2.0, 5.0, 0.5, 2.0, ControllerType::Pi);
    assert_eq!(rows, ["PI", "1.0000", "5.0000", "Not applicable"]);
}

#[test]
fn zero_gain_does_not_panic() {
    let inputs = TuningInputs {
        model: FoptdModel::new(0.0, 1.0, 0.1),
        ..TuningInputs::default()
    };
    let settings = tune(&inputs);
    assert!(!settings.kc().is_finite());
    assert!(!settings.is_finite());

    let rows = build_report(&settings, VALUE_DECIMALS);
    assert_eq!(rows[1].value, "inf");
    assert_eq!(rows[2].value, "1.0000");
}

#[test]
fn row_labels_are_stable() {
    let settings = tune(&TuningInputs::default());
    let labels: Vec<String> = build_report(&settings, VALUE_DECIMALS)
        .into_iter()
        .map(|row| row.parameter)
        .collect();
    assert_eq!(
        labels,
        [
            "Controller Type",
            "Controller Gain (Kc)",
            "Integral Time (τ_I)",
            "Derivative Time (τ_D)",
        ]
    );
}
