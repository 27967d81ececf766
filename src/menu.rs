use std::io::{self, BufRead, Write};

use tuning::error::parse_non_negative;
use tuning::{ControllerType, InputError, TuningInputs};

pub fn show_menu(inputs: &TuningInputs) {
    println!("\n===========================================");
    println!("FOPTD Controller Parameter Calculator");
    println!("===========================================");
    println!(
        "K = {}, τ = {}, θ = {:.3}, τ_c = {:.3}, type = {}",
        inputs.model.gain,
        inputs.model.time_constant,
        inputs.model.dead_time,
        inputs.closed_loop_time_constant,
        inputs.controller_type
    );
    println!("Select an option:");
    println!("1. Set Process Parameters");
    println!("2. Select Controller Type");
    println!("3. Calculate Parameters");
    println!("4. Reset to Defaults");
    println!("5. Exit");
    println!("===========================================");
    print!("Choice (1-5): ");
    let _ = io::stdout().flush();
}

/// Reads one line from stdin. `None` on end of input.
pub fn read_line() -> io::Result<Option<String>> {
    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

pub fn get_user_choice() -> io::Result<Option<Result<u32, std::num::ParseIntError>>> {
    Ok(read_line()?.map(|line| line.parse::<u32>()))
}

/// Prompts until the user enters a non-negative number. A blank line keeps
/// `current`.
pub fn prompt_value(
    label: &str,
    parameter: &'static str,
    current: f64,
) -> io::Result<Option<f64>> {
    loop {
        print!("{label} [{current}]: ");
        io::stdout().flush()?;

        let Some(line) = read_line()? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(Some(current));
        }
        match parse_non_negative(parameter, &line) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => report_rejected(&e),
        }
    }
}

pub fn prompt_controller_type(current: ControllerType) -> io::Result<Option<ControllerType>> {
    loop {
        print!("Controller Type (PI/PID) [{current}]: ");
        io::stdout().flush()?;

        let Some(line) = read_line()? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(Some(current));
        }
        match line.parse::<ControllerType>() {
            Ok(controller_type) => return Ok(Some(controller_type)),
            Err(e) => {
                tracing::warn!(input = %line, "rejected controller type");
                println!("{e}");
            }
        }
    }
}

fn report_rejected(error: &InputError) {
    tracing::warn!(%error, "rejected form input");
    println!("{error}");
}

pub fn wait_for_enter() -> io::Result<()> {
    println!("\nPress Enter to return to menu...");
    read_line().map(|_| ())
}
