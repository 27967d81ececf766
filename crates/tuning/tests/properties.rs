//! Algebraic properties of the IMC rules, checked with proptest.

use proptest::prelude::*;
use tuning::{calculate_pi, calculate_pid, tune, ControllerType, FoptdModel, TuningInputs};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn pi_matches_closed_form(
        k in 0.01..100.0f64,
        tau in 0.0..100.0f64,
        theta in 0.0..50.0f64,
        tau_c in 0.01..50.0f64,
    ) {
        let s = calculate_pi(&FoptdModel::new(k, tau, theta), tau_c);
        prop_assert!(close(s.kc, tau / (k * (tau_c + theta))));
        prop_assert_eq!(s.tau_i, tau);
    }

    #[test]
    fn pid_matches_closed_form(
        k in 0.01..100.0f64,
        tau in 0.01..100.0f64,
        theta in 0.0..50.0f64,
        tau_c in 0.01..50.0f64,
    ) {
        let s = calculate_pid(&FoptdModel::new(k, tau, theta), tau_c);
        prop_assert!(close(s.kc, (tau + theta / 2.0) / (k * (tau_c + theta / 2.0))));
        prop_assert!(close(s.tau_i, tau + theta / 2.0));
        prop_assert!(close(s.tau_d, tau * theta / (2.0 * tau + theta)));
    }

    #[test]
    fn pid_without_dead_time(k in 0.01..100.0f64, tau in 0.01..100.0f64, tau_c in 0.01..50.0f64) {
        let s = calculate_pid(&FoptdModel::new(k, tau, 0.0), tau_c);
        prop_assert!(close(s.kc, tau / (k * tau_c)));
        prop_assert_eq!(s.tau_i, tau);
        prop_assert_eq!(s.tau_d, 0.0);
    }

    #[test]
    fn tuning_is_bit_identical_on_repeat(
        k in 0.0..100.0f64,
        tau in 0.0..100.0f64,
        theta in 0.0..50.0f64,
        tau_c in 0.0..50.0f64,
        pid in any::<bool>(),
    ) {
        let inputs = TuningInputs {
            model: FoptdModel::new(k, tau, theta),
            closed_loop_time_constant: tau_c,
            controller_type: if pid { ControllerType::Pid } else { ControllerType::Pi },
        };
        let first = tune(&inputs);
        let second = tune(&inputs);
        prop_assert_eq!(first.kc().to_bits(), second.kc().to_bits());
        prop_assert_eq!(first.tau_i().to_bits(), second.tau_i().to_bits());
        prop_assert_eq!(first.tau_d().map(f64::to_bits), second.tau_d().map(f64::to_bits));
    }
}
