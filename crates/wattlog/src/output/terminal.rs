//! Terminal output formatting with colors.
//!
//! Long series are summarized rather than printed row by row; use the JSON
//! output for the full data.

use colored::Colorize;
use wattlog_core::statistics::mean;

use crate::analysis::{
    ComparisonReport, DistributionGroup, MeasurementReport, NormalityRow, TestVerdict,
};

fn separator() -> String {
    "\u{2500}".repeat(62)
}

/// Format a single-batch report for human-readable terminal output.
pub fn format_measurement_report(report: &MeasurementReport) -> String {
    let mut out = String::new();
    let title = if report.single {
        "Power consumption over time"
    } else {
        "Power consumption average over time"
    };
    out.push_str(&format!("\n  {}\n\n", title.bold()));
    push_measurement_body(&mut out, report);
    out
}

fn push_measurement_body(out: &mut String, report: &MeasurementReport) {
    // Series summary
    let powers = report.mean_series.powers();
    let times = report.mean_series.times();
    out.push_str(&format!(
        "    Time points:  {} ({:.1}s)\n",
        report.mean_series.len(),
        times.last().copied().unwrap_or(0.0)
    ));
    if let Some(avg) = mean(&powers) {
        let peak = powers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        out.push_str(&format!(
            "    Mean power:   {:.2} W (peak {:.2} W)\n",
            avg, peak
        ));
    }

    // Energy
    let label = if report.single {
        "Total energy usage"
    } else {
        "Average total energy usage"
    };
    out.push_str(&format!(
        "    {}: {}\n",
        label,
        format!("{:.2}J", report.mean_total_energy).cyan()
    ));
    if !report.single {
        out.push_str(&format!("\n    {:<28} {:>14}\n", "NAME", "TOTAL ENERGY"));
        for energy in &report.total_energies {
            out.push_str(&format!(
                "    {:<28} {:>14}\n",
                energy.name,
                format!("{:.2}J", energy.joules)
            ));
        }
    }

    // Spread across files
    if let Some(bands) = &report.error_bands {
        let stds: Vec<f64> = bands.iter().filter_map(|b| b.std).collect();
        if let Some(avg_std) = mean(&stds) {
            let max_std = stds.iter().copied().fold(0.0, f64::max);
            out.push_str(&format!(
                "\n    Spread:       mean STD {:.2} W, max STD {:.2} W over {} points\n",
                avg_std,
                max_std,
                stds.len()
            ));
        }
    }

    // Distributions
    out.push_str(&format!(
        "\n  {} (outlier threshold {})\n\n",
        "Power distribution".bold(),
        report.outlier_threshold
    ));
    out.push_str(&format!(
        "    {:<28} {:>6} {:>8} {:>10} {:>10} {:>10}\n",
        "FILE", "N", "REMOVED", "MIN", "MEAN", "MAX"
    ));
    for group in report.distribution_groups() {
        out.push_str(&format_group(group));
    }

    // Normality
    out.push_str(&format!("\n  {}\n\n", "Normality (Shapiro-Wilk)".bold()));
    out.push_str(&format!(
        "    {:<28} {:>8} {:>10}\n",
        "FILE", "NORMAL", "P-VALUE"
    ));
    for row in &report.normality {
        out.push_str(&format_normality_row(row));
    }
}

fn format_group(group: &DistributionGroup) -> String {
    let min = group.values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = group.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    match mean(&group.values) {
        Some(avg) => format!(
            "    {:<28} {:>6} {:>8} {:>10.2} {:>10.2} {:>10.2}\n",
            group.name,
            group.values.len(),
            group.removed,
            min,
            avg,
            max
        ),
        None => format!(
            "    {:<28} {:>6} {:>8} {:>10} {:>10} {:>10}\n",
            group.name, 0, group.removed, "-", "-", "-"
        ),
    }
}

fn format_normality_row(row: &NormalityRow) -> String {
    match (row.normal, row.p_value, &row.error) {
        (Some(normal), Some(p), _) => {
            let verdict = if normal {
                format!("{:>8}", "True").green()
            } else {
                format!("{:>8}", "False").red()
            };
            format!("    {:<28} {} {:>10.4}\n", row.file, verdict, p)
        }
        (_, _, Some(error)) => format!(
            "    {:<28} {}\n",
            row.file,
            format!("skipped: {}", error).yellow()
        ),
        _ => format!("    {:<28} {:>8} {:>10}\n", row.file, "-", "-"),
    }
}

fn format_verdict(verdict: &TestVerdict) -> String {
    let line = match verdict.significant {
        Some(true) => verdict.verdict.red(),
        Some(false) => verdict.verdict.green(),
        None => verdict.verdict.yellow(),
    };
    format!("    {}\n", line)
}

/// Format a two-batch comparison for human-readable terminal output.
pub fn format_comparison_report(report: &ComparisonReport) -> String {
    let mut out = String::new();
    let sep = separator();

    out.push_str(&format!("\n  {}\n\n", "Dataset comparison".bold()));
    for (c, name) in report.means.names.iter().enumerate() {
        let present: Vec<f64> = report.means.columns[c].iter().flatten().copied().collect();
        out.push_str(&format!(
            "    {:<8} mean power {} over {} time points\n",
            name,
            mean(&present)
                .map(|m| format!("{:.2} W", m))
                .unwrap_or_else(|| "-".to_string()),
            present.len()
        ));
    }

    for (label, set) in [("First dataset", &report.first), ("Second dataset", &report.second)] {
        out.push('\n');
        out.push_str(&sep);
        out.push_str(&format!("\n\n  {}\n\n", label.bold()));
        push_measurement_body(&mut out, set);
    }

    out.push('\n');
    out.push_str(&sep);
    out.push_str(&format!(
        "\n\n  {} (alpha = {})\n\n",
        "Significance".bold(),
        report.significance_level
    ));
    out.push_str(&format_verdict(&report.welch));
    out.push_str(&format_verdict(&report.mann_whitney));
    out.push_str(&format!(
        "    Pairwise dominance: first set higher in {:.2}% of pairs\n",
        report.dominance_percent
    ));

    out
}
