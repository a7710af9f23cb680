// Output formatting and display for CLI

use crate::bootstrap::{ToolContext, ToolPaths};
use crate::cleanup::{CleanupReport, CleanupStatus};
use colored::*;
use std::path::Path;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl SummaryRow {
    fn new(item: &str, value: impl Into<String>) -> Self {
        Self {
            item: item.to_string(),
            value: value.into(),
        }
    }
}

/// Print the outcome of a plugin run
pub fn print_run_summary(context: &ToolContext) {
    println!("{}", "✓ Tool initialized successfully".green().bold());

    let mut rows = path_rows(&context.paths);
    rows.push(SummaryRow::new(
        "Log file",
        display_path(context.logger.log_file_path()),
    ));
    rows.push(SummaryRow::new(
        "Output cleanup",
        match &context.cleanup {
            Some(report) => format_cleanup(report),
            None => "created".to_string(),
        },
    ));

    print_table(rows);
}

/// Print resolved tool paths
pub fn print_paths(paths: &ToolPaths) {
    print_table(path_rows(paths));
}

/// Print a cleanup report, listing every skipped entry
pub fn print_cleanup_report(report: &CleanupReport) {
    match report.status() {
        CleanupStatus::Clean => print_success_msg(&format!(
            "Cleaned {}: {}",
            report.directory.display(),
            format_cleanup(report)
        )),
        CleanupStatus::Partial => {
            println!(
                "{} Partially cleaned {}: {}",
                "⚠".yellow().bold(),
                report.directory.display(),
                format_cleanup(report)
            );
            for skipped in &report.skipped {
                println!(
                    "  {} {}",
                    display_path(&skipped.path).yellow(),
                    format!("({})", skipped.reason).dimmed()
                );
            }
        }
    }
}

/// Print an error message to stderr
pub fn print_error(error: &str) {
    eprintln!("{} {}", "✗ Error:".red().bold(), error);
}

/// Print a success message
pub fn print_success_msg(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

fn path_rows(paths: &ToolPaths) -> Vec<SummaryRow> {
    vec![
        SummaryRow::new("Base directory", display_path(&paths.base)),
        SummaryRow::new("Input directory", display_path(&paths.input)),
        SummaryRow::new("Output directory", display_path(&paths.output)),
    ]
}

fn print_table(rows: Vec<SummaryRow>) {
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    println!("\n{}\n", table);
}

fn format_cleanup(report: &CleanupReport) -> String {
    format!(
        "{} removed, {} skipped",
        report.removed.len(),
        report.skipped.len()
    )
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
