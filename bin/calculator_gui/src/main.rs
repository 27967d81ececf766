use eframe::egui;
use std::env;
use tracing::{info, warn};
use tuning::report::{self, ReportRow};
use tuning::{build_report, load_config, tune, CalculatorConfig, ControllerType, TuningInputs};

const TITLE: &str = "FOPTD Controller Parameter Calculator";

struct CalculatorApp {
    inputs: TuningInputs,
    config: CalculatorConfig,
    last_inputs: Option<TuningInputs>,
    rows: Vec<ReportRow>,
}

impl CalculatorApp {
    fn new(config: CalculatorConfig) -> Self {
        let mut app = Self {
            inputs: config.initial_inputs(),
            config,
            last_inputs: None,
            rows: Vec::new(),
        };
        app.recalculate();
        app
    }

    /// Runs the tuning rule when the form changed since the last frame.
    fn recalculate(&mut self) {
        if self.last_inputs == Some(self.inputs) {
            return;
        }

        let settings = tune(&self.inputs);
        if !settings.is_finite() {
            warn!(
                controller = %self.inputs.controller_type,
                k = self.inputs.model.gain,
                "tuning produced a non-finite value"
            );
        }
        self.rows = build_report(&settings, self.config.display.value_decimals);
        self.last_inputs = Some(self.inputs);
    }

    fn input_panel(&mut self, ui: &mut egui::Ui) {
        let decimals = self.config.display.input_decimals;

        ui.heading("Input Parameters");
        ui.separator();

        egui::Grid::new("input_grid")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                ui.label("Process Gain (K):");
                ui.add(non_negative(&mut self.inputs.model.gain));
                ui.end_row();

                ui.label("Time Constant (τ):");
                ui.add(non_negative(&mut self.inputs.model.time_constant));
                ui.end_row();

                ui.label("Time Delay (θ):");
                ui.add(non_negative(&mut self.inputs.model.dead_time).fixed_decimals(decimals));
                ui.end_row();

                ui.label("Controller Time Constant (τ_c):");
                ui.add(
                    non_negative(&mut self.inputs.closed_loop_time_constant)
                        .fixed_decimals(decimals),
                );
                ui.end_row();

                ui.label("Controller Type:");
                egui::ComboBox::from_id_source("controller_type")
                    .selected_text(self.inputs.controller_type.as_str())
                    .show_ui(ui, |ui| {
                        for controller_type in ControllerType::ALL {
                            ui.selectable_value(
                                &mut self.inputs.controller_type,
                                controller_type,
                                controller_type.as_str(),
                            );
                        }
                    });
                ui.end_row();
            });

        ui.add_space(10.0);
        if ui.button("Reset to Defaults").clicked() {
            self.inputs = self.config.initial_inputs();
        }
    }

    fn results_panel(&self, ui: &mut egui::Ui) {
        ui.heading("Calculated Parameters");
        ui.add_space(5.0);

        egui::Frame::group(ui.style())
            .inner_margin(10.0)
            .show(ui, |ui| {
                egui::Grid::new("results_grid")
                    .num_columns(2)
                    .spacing([40.0, 6.0])
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("Parameter");
                        ui.strong("Value");
                        ui.end_row();

                        for row in &self.rows {
                            ui.label(row.parameter.as_str());
                            if row.value == report::NOT_APPLICABLE {
                                ui.weak(row.value.as_str());
                            } else {
                                ui.monospace(row.value.as_str());
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

fn non_negative(value: &mut f64) -> egui::DragValue<'_> {
    egui::DragValue::new(value)
        .clamp_range(0.0..=f64::MAX)
        .speed(0.01)
}

impl eframe::App for CalculatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("input_panel")
            .resizable(false)
            .min_width(320.0)
            .show(ctx, |ui| {
                self.input_panel(ui);
            });

        self.recalculate();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(TITLE);
            ui.add_space(10.0);
            self.results_panel(ui);
        });
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("calculator_gui=info,tuning=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let config = match args.get(1) {
        Some(path) => load_config(path)?,
        None => CalculatorConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 360.0])
            .with_title(TITLE),
        ..Default::default()
    };

    info!("opening calculator window");
    eframe::run_native(
        TITLE,
        options,
        Box::new(move |_cc| Box::new(CalculatorApp::new(config))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run calculator window: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(app: &CalculatorApp) -> Vec<&str> {
        app.rows.iter().map(|r| r.value.as_str()).collect()
    }

    #[test]
    fn starts_with_default_results() {
        let app = CalculatorApp::new(CalculatorConfig::default());
        assert_eq!(values(&app), ["PI", "0.9091", "1.0000", "Not applicable"]);
    }

    #[test]
    fn recalculates_after_form_change() {
        let mut app = CalculatorApp::new(CalculatorConfig::default());
        app.inputs.controller_type = ControllerType::Pid;
        app.recalculate();
        assert_eq!(values(&app), ["PID", "1.0000", "1.0500", "0.0476"]);
    }

    #[test]
    fn zero_gain_keeps_rendering() {
        let mut app = CalculatorApp::new(CalculatorConfig::default());
        app.inputs.model.gain = 0.0;
        app.recalculate();
        assert_eq!(app.rows[1].value, "inf");
    }
}
