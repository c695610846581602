//! Text rendering of report results

use serde_json::Value;

use crate::config::OutputFormat;
use crate::error::Result;

/// Render a serialized report result in the requested format
pub fn render(value: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(value)?)),
        OutputFormat::Table => Ok(render_table(value)),
    }
}

/// Render a result as a boxed table.
///
/// Arrays of objects get one column per field, arrays of scalars a single
/// `value` column, objects a `key`/`value` pair per entry. Scalars print as
/// a one-cell table.
pub fn render_table(value: &Value) -> String {
    let (columns, rows) = tabulate(value);
    format_results(&columns, &rows)
}

fn tabulate(value: &Value) -> (Vec<String>, Vec<Vec<String>>) {
    match value {
        Value::Array(items) => match items.first() {
            Some(Value::Object(first)) => {
                let columns: Vec<String> = first.keys().cloned().collect();
                let rows = items
                    .iter()
                    .map(|item| {
                        columns
                            .iter()
                            .map(|c| item.get(c).map(cell).unwrap_or_default())
                            .collect()
                    })
                    .collect();
                (columns, rows)
            }
            _ => (
                vec!["value".to_string()],
                items.iter().map(|item| vec![cell(item)]).collect(),
            ),
        },
        Value::Object(map) => (
            vec!["key".to_string(), "value".to_string()],
            map.iter().map(|(k, v)| vec![k.clone(), cell(v)]).collect(),
        ),
        scalar => (vec!["value".to_string()], vec![vec![cell(scalar)]]),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Lay out a header and rows as a boxed table with a row-count footer
fn format_results(columns: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .fold(column.chars().count(), usize::max)
        })
        .collect();

    let rule = format!(
        "+{}+\n",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let line = |cells: &[String], centred: bool| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| {
                if centred {
                    format!(" {:^width$} ", cell)
                } else {
                    format!(" {:>width$} ", cell)
                }
            })
            .collect();
        format!("|{}|\n", padded.join("|"))
    };

    let mut output = rule.clone();
    output.push_str(&line(columns, true));
    output.push_str(&rule);
    for row in rows {
        output.push_str(&line(row, false));
    }
    if !rows.is_empty() {
        output.push_str(&rule);
    }
    output.push_str(&format!("{} row(s) returned\n", rows.len()));
    output
}
