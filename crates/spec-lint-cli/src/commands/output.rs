//! Shared output formatting for lint reports.

use anyhow::Result;
use spec_lint_core::LintReport;

use crate::OutputFormat;

/// Print a lint report in the specified format.
pub fn print(report: &LintReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &LintReport) {
    let (_, warnings, errors) = report.count_by_status();

    for finding in report.errors.iter().chain(&report.warnings) {
        println!("{}", finding.format());
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!("{summary_color}{}\x1b[0m", report.summary());
}

fn print_json(report: &LintReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &LintReport) {
    for finding in report.findings() {
        let nodes = finding
            .affected_nodes
            .iter()
            .map(|n| n.id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        if nodes.is_empty() {
            println!("{}: [{}] {}", finding.status, finding.rule_id, finding.message);
        } else {
            println!(
                "{}: [{}] {} ({nodes})",
                finding.status, finding.rule_id, finding.message
            );
        }
    }
}
