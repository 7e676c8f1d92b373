//! Shared output formatting for validation results.

use anyhow::Result;
use plan_check_core::{Severity, ValidationResult};

use crate::OutputFormat;

/// Print a validation result in the specified format.
pub fn print(result: &ValidationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn print_text(result: &ValidationResult) {
    for finding in result.findings() {
        let mut header = finding.code.clone();
        if let Some(handle) = &finding.entity_handle {
            header.push_str(&format!(" entity {handle}"));
        }
        if let Some(layer) = &finding.layer {
            header.push_str(&format!(" layer {layer}"));
        }
        if let Some(loc) = &finding.location {
            header.push_str(&format!(" at ({:.0}, {:.0})", loc.x, loc.y));
        }
        println!("{header}");
        println!(
            "  {}: {}",
            severity_indicator(finding.severity),
            finding.message
        );
        println!();
    }

    let summary_color = if !result.valid {
        "\x1b[31m"
    } else if result.warning_count() > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    let verdict = if result.valid { "gültig" } else { "ungültig" };
    println!(
        "{}{}: {}, {} error(s), {} warning(s)\x1b[0m",
        summary_color,
        result.file_path,
        verdict,
        result.error_count(),
        result.warning_count()
    );

    if !result.stats.is_empty() {
        let stats = result
            .stats
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {stats}");
    }
}

fn print_json(result: &ValidationResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &ValidationResult) {
    for finding in result.findings() {
        println!(
            "{}: {} [{}] {}",
            result.file_path, finding.severity, finding.code, finding.message,
        );
    }
}
