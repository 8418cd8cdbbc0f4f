use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;
use crate::types::StaleResult;

static FORMAT: AtomicU8 = AtomicU8::new(0);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_format(format: OutputFormat) {
    let raw = match format {
        OutputFormat::Table => 0,
        OutputFormat::Json => 1,
        OutputFormat::Compact => 2,
    };
    FORMAT.store(raw, Ordering::Relaxed);
}

pub fn format() -> OutputFormat {
    match FORMAT.load(Ordering::Relaxed) {
        1 => OutputFormat::Json,
        2 => OutputFormat::Compact,
        _ => OutputFormat::Table,
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

#[derive(Tabled)]
struct StaleRow {
    #[tabled(rename = "PR")]
    number: String,
    #[tabled(rename = "Days Dormant")]
    days: String,
}

/// Print stale pull requests in the selected format
pub fn print_stale(results: &[StaleResult], threshold_days: u32) {
    match format() {
        OutputFormat::Json => print_json(results),
        OutputFormat::Compact => {
            for result in results {
                println!("{}", compact_line(result));
            }
        }
        OutputFormat::Table => {
            if results.is_empty() {
                print_message("No stale pull requests");
                return;
            }
            let rows: Vec<StaleRow> = results
                .iter()
                .map(|r| StaleRow {
                    number: format!("#{}", r.number),
                    days: days_colored(r.days_dormant, threshold_days),
                })
                .collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Print a message (skipped in quiet mode, JSON object in JSON mode)
pub fn print_message(message: &str) {
    if is_quiet() {
        return;
    }
    match format() {
        OutputFormat::Json => print_json(&serde_json::json!({ "message": message })),
        _ => println!("{message}"),
    }
}

fn compact_line(result: &StaleResult) -> String {
    format!("#{}\t{}", result.number, result.days_dormant)
}

/// Color days dormant relative to the threshold
fn days_colored(days: u64, threshold_days: u32) -> String {
    let threshold = u64::from(threshold_days);
    let label = days.to_string();
    if days >= threshold * 4 {
        label.red().bold().to_string()
    } else if days >= threshold * 2 {
        label.yellow().to_string()
    } else {
        label
    }
}
