mod menu;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tuning::error::parse_non_negative;
use tuning::{build_report, load_config, render_table, tune, CalculatorConfig, ControllerType, TuningInputs};

/// FOPTD controller parameter calculator (IMC tuning rules)
#[derive(Parser, Debug)]
#[command(name = "imc-tuner")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML file with form defaults and display precision
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute PI/PID parameters once and print the table
    Calc(CalcArgs),
    /// Interactive menu (default)
    Menu,
}

#[derive(Args, Debug)]
struct CalcArgs {
    /// Process gain K
    #[arg(short = 'k', long, value_parser = gain_arg)]
    gain: Option<f64>,

    /// Time constant τ
    #[arg(long, alias = "tau", value_parser = time_constant_arg)]
    time_constant: Option<f64>,

    /// Time delay θ
    #[arg(long, alias = "theta", value_parser = dead_time_arg)]
    dead_time: Option<f64>,

    /// Controller (closed-loop) time constant τ_c
    #[arg(long = "tau-c", value_parser = tau_c_arg)]
    tau_c: Option<f64>,

    /// PI or PID
    #[arg(short, long)]
    controller: Option<ControllerType>,
}

fn gain_arg(s: &str) -> Result<f64, String> {
    parse_non_negative("process gain (K)", s).map_err(|e| e.to_string())
}

fn time_constant_arg(s: &str) -> Result<f64, String> {
    parse_non_negative("time constant (τ)", s).map_err(|e| e.to_string())
}

fn dead_time_arg(s: &str) -> Result<f64, String> {
    parse_non_negative("time delay (θ)", s).map_err(|e| e.to_string())
}

fn tau_c_arg(s: &str) -> Result<f64, String> {
    parse_non_negative("controller time constant (τ_c)", s).map_err(|e| e.to_string())
}

impl CalcArgs {
    fn apply(&self, mut inputs: TuningInputs) -> TuningInputs {
        if let Some(k) = self.gain {
            inputs.model.gain = k;
        }
        if let Some(tau) = self.time_constant {
            inputs.model.time_constant = tau;
        }
        if let Some(theta) = self.dead_time {
            inputs.model.dead_time = theta;
        }
        if let Some(tau_c) = self.tau_c {
            inputs.closed_loop_time_constant = tau_c;
        }
        if let Some(controller_type) = self.controller {
            inputs.controller_type = controller_type;
        }
        inputs
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("imc_tuner=info,tuning=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => CalculatorConfig::default(),
    };

    match cli.command {
        Some(Command::Calc(args)) => {
            let inputs = args.apply(config.initial_inputs());
            print_results(&inputs, &config);
            Ok(())
        }
        Some(Command::Menu) | None => run_menu(&config),
    }
}

fn run_menu(config: &CalculatorConfig) -> Result<()> {
    println!("===========================================");
    println!("Welcome to the FOPTD Controller Parameter Calculator");
    println!("===========================================");
    info!("starting interactive session");

    let mut inputs = config.initial_inputs();

    loop {
        menu::show_menu(&inputs);

        let Some(choice) = menu::get_user_choice().context("failed to read menu choice")? else {
            break;
        };
        match choice {
            Ok(1) => {
                if !set_process_parameters(&mut inputs)? {
                    break;
                }
            }
            Ok(2) => match menu::prompt_controller_type(inputs.controller_type)? {
                Some(controller_type) => inputs.controller_type = controller_type,
                None => break,
            },
            Ok(3) => {
                print_results(&inputs, config);
                menu::wait_for_enter()?;
            }
            Ok(4) => {
                inputs = config.initial_inputs();
                println!("Inputs reset to defaults.");
            }
            Ok(5) => {
                println!("Goodbye!");
                return Ok(());
            }
            _ => println!("Invalid choice. Please select 1-5."),
        }
    }

    info!("input closed, leaving interactive session");
    Ok(())
}

/// Returns `false` when stdin closes mid-form.
fn set_process_parameters(inputs: &mut TuningInputs) -> Result<bool> {
    println!("\n=== Input Parameters ===");
    println!("(press Enter to keep the current value)");

    let fields: [(&str, &'static str, &mut f64); 4] = [
        ("Process Gain (K)", "process gain (K)", &mut inputs.model.gain),
        ("Time Constant (τ)", "time constant (τ)", &mut inputs.model.time_constant),
        ("Time Delay (θ)", "time delay (θ)", &mut inputs.model.dead_time),
        (
            "Controller Time Constant (τ_c)",
            "controller time constant (τ_c)",
            &mut inputs.closed_loop_time_constant,
        ),
    ];

    for (label, parameter, slot) in fields {
        match menu::prompt_value(label, parameter, *slot)? {
            Some(value) => *slot = value,
            None => return Ok(false),
        }
    }
    Ok(true)
}

fn print_results(inputs: &TuningInputs, config: &CalculatorConfig) {
    let settings = tune(inputs);
    if !settings.is_finite() {
        warn!(
            controller = %inputs.controller_type,
            "tuning produced a non-finite value; check for zero gain or zero time constants"
        );
    }

    let rows = build_report(&settings, config.display.value_decimals);
    println!("\n=== Calculated Parameters ===");
    print!("{}", render_table(&rows));
}
