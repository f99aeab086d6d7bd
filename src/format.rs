//! Text rendering of a [`Report`] for the terminal.
//!
//! Purpose
//! -------
//! Turn the structured report into the banner-framed, optionally colored
//! text block the command-line tool prints. This is presentation only; no
//! number is computed here beyond rounding for display.
//!
//! Conventions
//! -----------
//! - Two decimals for rates and percentages, `,` as the thousands
//!   separator, dates as "18 January, 2021".
//! - The "Vaccination rate increased/decreased" headline reports the mean
//!   acceleration, not the latest point.
//! - Growth is green, decline red, headline numbers yellow, unreachable
//!   milestones magenta. Colors are dropped when `color` is false.
use crate::pipeline::{AccelerationDefinition, DaysRemaining, PipelineError, Report};
use crossterm::style::{Color, Stylize};
use std::time::Duration;

const BANNER: &str =
    "*******************************************************************************";
const INDENT: &str = "\t\t\t";

/// Presentation switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStyle {
    pub color: bool,
}

impl Default for ReportStyle {
    fn default() -> Self {
        ReportStyle { color: true }
    }
}

/// Render the full report block.
pub fn render_report(report: &Report, style: ReportStyle) -> String {
    let paint = |text: String, color: Color| -> String {
        if style.color {
            text.with(color).to_string()
        } else {
            text
        }
    };

    let mut lines = Vec::new();
    lines.push(format!("\n\n\n{BANNER}\n\n"));

    let pct = report.mean_acceleration;
    let change = if pct >= 0.0 {
        paint(format!("increased by {}%", group_decimal(pct)), Color::Green)
    } else {
        paint(format!("decreased by {}%", group_decimal(pct.abs())), Color::Red)
    };
    lines.push(format!("{INDENT}Vaccination rate {change}"));

    let rate = report
        .latest_rate
        .map(|r| paint(group_decimal(r), Color::Yellow))
        .unwrap_or_else(|| "no data".to_string());
    lines.push(format!("{INDENT}Vaccinations per day : {rate}"));

    lines.push(format!(
        "{INDENT}People vaccinated on {} : {}",
        report.last_date.format("%d %B, %Y"),
        group_integer(report.latest_administered as i128)
    ));
    lines.push(format!(
        "{INDENT}Total vaccinated : {}",
        group_integer(report.total_vaccinated as i128)
    ));
    lines.push(format!(
        "{INDENT}Acceleration mean : {}",
        paint(format!("{}%", group_decimal(report.mean_acceleration)), Color::Yellow)
    ));
    if report.acceleration_definition == AccelerationDefinition::DeltaOfMeans {
        lines.push(format!(
            "{INDENT}Acceleration (delta of means) : {}",
            paint(format!("{}%", group_decimal(report.selected_acceleration)), Color::Yellow)
        ));
    }

    for projection in &report.projections {
        let target = &projection.target;
        let threshold = group_integer(target.population_threshold as i128);
        let outcome = match &projection.outcome {
            Ok(DaysRemaining::Days(days)) if *days == 0.0 => {
                paint("already reached".to_string(), Color::Green)
            }
            Ok(DaysRemaining::Days(days)) => {
                format!("reached in {} days", paint(group_decimal(*days), Color::Cyan))
            }
            Ok(DaysRemaining::Unreachable) => {
                paint("unreachable under current deceleration".to_string(), Color::Magenta)
            }
            Err(PipelineError::DivisionByZero { .. }) => {
                paint("no progress: rate and acceleration are zero".to_string(), Color::Red)
            }
            Err(err) => paint(format!("error: {err}"), Color::Red),
        };
        lines.push(format!("{INDENT}{} ({threshold}) : {outcome}", target.label));
    }

    lines.push(format!("\n\n\n{BANNER}\n\n"));
    lines.join("\n")
}

/// "Time taken : 0.123 seconds".
pub fn render_timing(elapsed: Duration) -> String {
    format!("\n\nTime taken : {:.3} seconds", elapsed.as_secs_f64())
}

/// Integer with `,` thousands separators.
pub fn group_integer(value: i128) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Two-decimal number with `,` thousands separators.
pub fn group_decimal(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let whole: i128 = whole.parse().unwrap_or(0);
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{}.{frac}", group_integer(whole))
}
