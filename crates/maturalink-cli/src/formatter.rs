//! Output formatters for command results.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use serde::Serialize;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Tabular result of a command, with its structured form kept for JSON output.
#[derive(Debug, Clone)]
pub struct Records {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    pub json: serde_json::Value,
}

impl Records {
    pub fn new(
        columns: Vec<&'static str>,
        value: &impl Serialize,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            columns,
            rows: Vec::new(),
            json: serde_json::to_value(value)?,
        })
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Trait for formatting output.
pub trait Formatter: Send + Sync {
    /// Format a set of records.
    fn format_records(&self, records: &Records) -> String;

    /// Format a completed change.
    fn format_change(&self, affected: usize, message: &str) -> String;

    /// Format an error message.
    fn format_error(&self, error: &str) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_records(&self, records: &Records) -> String {
        if records.is_empty() {
            return "No results".to_string();
        }

        let mut table = Table::new();
        table.set_header(records.columns.iter().map(Cell::new).collect::<Vec<_>>());
        for row in &records.rows {
            table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
        }

        format!("{}\n{} row(s)", table, records.len())
    }

    fn format_change(&self, affected: usize, message: &str) -> String {
        if message.is_empty() {
            format!("{} row(s) affected", affected)
        } else {
            format!("{} row(s) affected: {}", affected, message)
        }
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_records(&self, records: &Records) -> String {
        serde_json::to_string_pretty(&records.json).unwrap_or_else(|_| "null".to_string())
    }

    fn format_change(&self, affected: usize, message: &str) -> String {
        serde_json::json!({
            "affected": affected,
            "message": message
        })
        .to_string()
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({
            "error": error
        })
        .to_string()
    }
}

/// CSV formatter.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_records(&self, records: &Records) -> String {
        let mut output = records.columns.join(",");
        output.push('\n');
        for row in &records.rows {
            let cells: Vec<String> = row.iter().map(|cell| csv_cell(cell)).collect();
            output.push_str(&cells.join(","));
            output.push('\n');
        }
        output
    }

    fn format_change(&self, affected: usize, message: &str) -> String {
        format!("affected,message\n{},\"{}\"", affected, escape_csv(message))
    }

    fn format_error(&self, error: &str) -> String {
        format!("error\n\"{}\"", escape_csv(error))
    }
}

/// Quote a cell when it contains separators, quotes or newlines.
fn csv_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", escape_csv(value))
    } else {
        value.to_string()
    }
}

/// Escape a string for CSV.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"")
}
