use serde::{Deserialize, Serialize};

use crate::{ControllerSettings, ControllerType};

pub const VALUE_DECIMALS: usize = 4;
pub const NOT_APPLICABLE: &str = "Not applicable";

pub const LABEL_CONTROLLER_TYPE: &str = "Controller Type";
pub const LABEL_GAIN: &str = "Controller Gain (Kc)";
pub const LABEL_INTEGRAL_TIME: &str = "Integral Time (τ_I)";
pub const LABEL_DERIVATIVE_TIME: &str = "Derivative Time (τ_D)";

/// One labeled line of the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub parameter: String,
    pub value: String,
}

impl ReportRow {
    fn new(parameter: &str, value: String) -> Self {
        Self {
            parameter: parameter.to_string(),
            value,
        }
    }
}

/// Formats a value the way the results table shows it. Non-finite values are
/// printed as-is (`inf`, `-inf`, `NaN`).
pub fn format_value(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Builds the four result rows in display order.
pub fn build_report(settings: &ControllerSettings, decimals: usize) -> Vec<ReportRow> {
    let controller_type: ControllerType = settings.controller_type();
    let tau_d = match settings.tau_d() {
        Some(tau_d) => format_value(tau_d, decimals),
        None => NOT_APPLICABLE.to_string(),
    };

    vec![
        ReportRow::new(LABEL_CONTROLLER_TYPE, controller_type.to_string()),
        ReportRow::new(LABEL_GAIN, format_value(settings.kc(), decimals)),
        ReportRow::new(LABEL_INTEGRAL_TIME, format_value(settings.tau_i(), decimals)),
        ReportRow::new(LABEL_DERIVATIVE_TIME, tau_d),
    ]
}

/// Renders rows as a plain-text two-column table with a header.
pub fn render_table(rows: &[ReportRow]) -> String {
    let param_width = rows
        .iter()
        .map(|r| r.parameter.chars().count())
        .chain(std::iter::once("Parameter".len()))
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|r| r.value.chars().count())
        .chain(std::iter::once("Value".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("{:<param_width$}  {:<value_width$}\n", "Parameter", "Value"));
    out.push_str(&format!("{}  {}\n", "-".repeat(param_width), "-".repeat(value_width)));
    for row in rows {
        out.push_str(&format!(
            "{:<param_width$}  {:<value_width$}\n",
            row.parameter, row.value
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PiSettings, PidSettings};

    fn values(rows: &[ReportRow]) -> Vec<&str> {
        rows.iter().map(|r| r.value.as_str()).collect()
    }

    #[test]
    fn pi_report_marks_derivative_not_applicable() {
        let settings = ControllerSettings::Pi(PiSettings {
            kc: 1.0 / 1.1,
            tau_i: 1.0,
        });
        let rows = build_report(&settings, VALUE_DECIMALS);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].parameter, "Controller Type");
        assert_eq!(rows[3].parameter, "Derivative Time (τ_D)");
        assert_eq!(values(&rows), ["PI", "0.9091", "1.0000", "Not applicable"]);
    }

    #[test]
    fn pid_report_has_all_values() {
        let settings = ControllerSettings::Pid(PidSettings {
            kc: 1.0,
            tau_i: 1.05,
            tau_d: 0.1 / 2.1,
        });
        let rows = build_report(&settings, VALUE_DECIMALS);
        assert_eq!(values(&rows), ["PID", "1.0000", "1.0500", "0.0476"]);
    }

    #[test]
    fn non_finite_values_are_shown_as_is() {
        assert_eq!(format_value(f64::INFINITY, 4), "inf");
        assert_eq!(format_value(f64::NEG_INFINITY, 4), "-inf");
        assert_eq!(format_value(f64::NAN, 4), "NaN");
    }

    #[test]
    fn precision_follows_argument() {
        assert_eq!(format_value(0.123456, 2), "0.12");
        assert_eq!(format_value(2.0, 0), "2");
    }

    #[test]
    fn table_aligns_columns_by_char_width() {
        let rows = vec![
            ReportRow::new(LABEL_CONTROLLER_TYPE, "PI".to_string()),
            ReportRow::new(LABEL_INTEGRAL_TIME, "1.0000".to_string()),
        ];
        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Parameter "));
        // "Integral Time (τ_I)" is 19 chars, so values start at column 21
        assert_eq!(lines[2].chars().nth(21), Some('P'));
        assert_eq!(lines[3].chars().nth(21), Some('1'));
        assert_eq!(lines[1].chars().filter(|c| *c == '-').count(), 19 + 6);
    }
}
