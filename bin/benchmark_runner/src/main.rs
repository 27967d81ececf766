use anyhow::{bail, Context, Result};
use criterion::{black_box, Criterion};
use std::env;
use std::time::Instant;
use tuning::report::format_value;
use tuning::{
    calculate_pi, calculate_pid, load_config, tune, CalculatorConfig, ControllerSettings,
    ControllerType, TuningInputs,
};

const SWEEP_STEPS: usize = 10_000;

/// Evenly spaced τc values from `tau_c / 10` to `tau_c * 10`.
fn tau_c_sweep(tau_c: f64, steps: usize) -> Vec<f64> {
    let lo = tau_c / 10.0;
    let hi = tau_c * 10.0;
    if steps < 2 {
        return vec![lo];
    }
    (0..steps)
        .map(|i| lo + (hi - lo) * i as f64 / (steps - 1) as f64)
        .collect()
}

fn run_sweep(inputs: &TuningInputs, controller_type: ControllerType) -> Vec<(f64, ControllerSettings)> {
    let mut inputs = *inputs;
    inputs.controller_type = controller_type;
    tau_c_sweep(inputs.closed_loop_time_constant, SWEEP_STEPS)
        .into_iter()
        .map(|tau_c| {
            inputs.closed_loop_time_constant = tau_c;
            (tau_c, tune(&inputs))
        })
        .collect()
}

fn analyze_sweep(results: &[(f64, ControllerSettings)], name: &str, decimals: usize) {
    if results.is_empty() {
        println!("{}: No results to analyze", name);
        return;
    }

    let gains: Vec<f64> = results.iter().map(|(_, s)| s.kc()).collect();
    let non_finite = gains.iter().filter(|g| !g.is_finite()).count();
    let min_kc = gains.iter().copied().filter(|g| g.is_finite()).fold(f64::INFINITY, f64::min);
    let max_kc = gains.iter().copied().filter(|g| g.is_finite()).fold(f64::NEG_INFINITY, f64::max);

    println!("\n=== {} τc Sweep ===", name);
    println!("Points: {}", results.len());
    println!("Kc range: {} .. {}", format_value(min_kc, decimals), format_value(max_kc, decimals));
    println!("Non-finite Kc: {}", non_finite);

    let (_, first) = results[0];
    println!("τI: {}", format_value(first.tau_i(), decimals));
    match first.tau_d() {
        Some(tau_d) => println!("τD: {}", format_value(tau_d, decimals)),
        None => println!("τD: {}", tuning::report::NOT_APPLICABLE),
    }
}

fn benchmark_pi(c: &mut Criterion, inputs: &TuningInputs) {
    let model = inputs.model;
    let tau_c = inputs.closed_loop_time_constant;
    c.bench_function("calculate_pi", |b| {
        b.iter(|| black_box(calculate_pi(black_box(&model), black_box(tau_c))));
    });
}

fn benchmark_pid(c: &mut Criterion, inputs: &TuningInputs) {
    let model = inputs.model;
    let tau_c = inputs.closed_loop_time_constant;
    c.bench_function("calculate_pid", |b| {
        b.iter(|| black_box(calculate_pid(black_box(&model), black_box(tau_c))));
    });
}

fn benchmark_tune(c: &mut Criterion, inputs: &TuningInputs) {
    let inputs = *inputs;
    c.bench_function("tune", |b| {
        b.iter(|| black_box(tune(black_box(&inputs))));
    });
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let positional: Vec<&str> = args
        .iter()
        .skip(1)
        .map(String::as_str)
        .filter(|a| !a.starts_with("--"))
        .collect();
    let use_criterion = args.iter().any(|a| a == "--criterion");

    let config_path = positional.first().copied();
    let mode = positional.get(1).copied().unwrap_or("both");
    if !matches!(mode, "pi" | "pid" | "both") {
        eprintln!("Usage: benchmark_runner [config_file] [pi|pid|both] [--criterion]");
        eprintln!("Example: benchmark_runner configs/defaults.toml both --criterion");
        bail!("unknown mode '{}'", mode);
    }

    let config = match config_path {
        Some(path) => load_config(path).with_context(|| format!("failed to load {}", path))?,
        None => CalculatorConfig::default(),
    };
    let inputs = config.initial_inputs();
    let decimals = config.display.value_decimals;

    println!("========================================");
    println!("IMC Tuning Benchmark");
    println!("========================================");
    println!("Config: {}", config_path.unwrap_or("<built-in defaults>"));
    println!(
        "K = {}, τ = {}, θ = {}, τc = {}",
        inputs.model.gain,
        inputs.model.time_constant,
        inputs.model.dead_time,
        inputs.closed_loop_time_constant
    );
    println!("Mode: {}", mode);
    println!("========================================\n");

    if use_criterion {
        let mut criterion = Criterion::default().sample_size(100);

        if mode == "pi" || mode == "both" {
            benchmark_pi(&mut criterion, &inputs);
        }
        if mode == "pid" || mode == "both" {
            benchmark_pid(&mut criterion, &inputs);
        }
        benchmark_tune(&mut criterion, &inputs);

        criterion.final_summary();
        println!("\nCheck the target/criterion directory for detailed HTML reports.");
    } else {
        if mode == "pi" || mode == "both" {
            let start = Instant::now();
            let results = run_sweep(&inputs, ControllerType::Pi);
            println!("PI sweep completed in {:.3} ms", start.elapsed().as_secs_f64() * 1000.0);
            analyze_sweep(&results, "PI", decimals);
        }

        if mode == "pid" || mode == "both" {
            let start = Instant::now();
            let results = run_sweep(&inputs, ControllerType::Pid);
            println!("\nPID sweep completed in {:.3} ms", start.elapsed().as_secs_f64() * 1000.0);
            analyze_sweep(&results, "PID", decimals);
        }
    }

    println!("\n========================================");
    println!("Benchmark complete!");
    println!("========================================");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_spans_a_decade_each_way() {
        let values = tau_c_sweep(1.0, 5);
        assert_eq!(values.len(), 5);
        assert!((values[0] - 0.1).abs() < 1e-12);
        assert!((values[4] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn pi_gain_falls_as_tau_c_grows() {
        let results = run_sweep(&TuningInputs::default(), ControllerType::Pi);
        let first = results.first().unwrap().1.kc();
        let last = results.last().unwrap().1.kc();
        assert!(first > last);
    }
}
