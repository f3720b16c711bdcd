//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use clap::ValueEnum;
use paddleflow_api_models::{ResourcePage, RunLogResponse};
use serde::Serialize;
use serde_json::Value;

use crate::client::{CliError, CliResult};

const MISSING_FIELD: &str = "-";

/// Presentation style for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// A table column: the printed header and the JSON field it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Column {
    pub(crate) header: &'static str,
    pub(crate) field: &'static str,
}

impl Column {
    pub(crate) const fn new(header: &'static str, field: &'static str) -> Self {
        Self { header, field }
    }
}

pub(crate) fn render_page(
    page: &ResourcePage,
    raw: &Value,
    columns: &[Column],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(raw),
        OutputFormat::Table => {
            print!("{}", format_table(columns, &page.items));
            if page.truncated
                && let Some(next) = &page.next_marker
            {
                println!("next marker: {next}");
            }
            Ok(())
        }
    }
}

pub(crate) fn render_detail(detail: &Value, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(detail),
        OutputFormat::Table => {
            print!("{}", format_detail(detail));
            Ok(())
        }
    }
}

pub(crate) fn render_run_log(log: &RunLogResponse, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(log),
        OutputFormat::Table => {
            print!("{}", format_run_log(log));
            Ok(())
        }
    }
}

/// Print a one-line acknowledgement for mutating commands.
pub(crate) fn render_ack(message: &str) {
    println!("{message}");
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

/// Lay out `items` as a left-aligned table sized to the widest cell per column.
pub(crate) fn format_table(columns: &[Column], items: &[Value]) -> String {
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|column| field_text(item, column.field))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .map(|row| row[index].chars().count())
                .fold(column.header.len(), usize::max)
        })
        .collect();

    let mut out = String::new();
    let headers: Vec<String> = columns
        .iter()
        .map(|column| column.header.to_string())
        .collect();
    push_row(&mut out, &headers, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let last = cells.len().saturating_sub(1);
    let mut line = String::new();
    for (index, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if index == last {
            line.push_str(cell);
        } else {
            let pad = width.saturating_sub(cell.chars().count());
            line.push_str(cell);
            line.push_str(&" ".repeat(pad + 2));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// `key: value` lines for a JSON object; other values print as-is.
pub(crate) fn format_detail(detail: &Value) -> String {
    match detail {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{key}: {}\n", scalar_text(value)))
            .collect(),
        Value::Null => String::new(),
        other => format!("{}\n", scalar_text(other)),
    }
}

pub(crate) fn format_run_log(log: &RunLogResponse) -> String {
    let mut out = format!(
        "run: {}\nstatus: {}\n",
        or_missing(&log.run_id),
        or_missing(&log.status)
    );
    for job in &log.run_log {
        out.push('\n');
        out.push_str(&format!(
            "job: {} (task {})\npage: {}/{} truncated: {} more: {}\n",
            or_missing(&job.job_id),
            or_missing(&job.task_id),
            job.page_no,
            job.page_size,
            job.truncated,
            job.has_next_page
        ));
        if !job.info.is_empty() {
            out.push_str(&format!("info: {}\n", job.info));
        }
        out.push_str(&job.log_info);
        if !job.log_info.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Text for `field` of `item`, `-` when absent, null, or empty.
pub(crate) fn field_text(item: &Value, field: &str) -> String {
    match item.get(field) {
        None | Some(Value::Null) => MISSING_FIELD.to_string(),
        Some(value) => {
            let text = scalar_text(value);
            if text.is_empty() {
                MISSING_FIELD.to_string()
            } else {
                text
            }
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => MISSING_FIELD.to_string(),
        other => other.to_string(),
    }
}

fn or_missing(text: &str) -> &str {
    if text.is_empty() { MISSING_FIELD } else { text }
}
