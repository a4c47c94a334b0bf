use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{Table, TableOptions};

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Objects render as a key/value table. Fields holding lists of records
/// (compliance breakdowns, expiry notices, move history) follow as their own
/// tables so reports stay readable.
fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => render_array_table(&items),
        Value::Object(map) => {
            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            let (sections, fields): (Vec<_>, Vec<_>) =
                entries.into_iter().partition(|(_, value)| is_record_list(value));

            let rows = fields
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            let mut out = Table::new(["key", "value"])
                .with_rows(rows)
                .render(table_options());

            for (key, value) in sections {
                if let Value::Array(items) = value {
                    out.push_str(&format!("\n\n{key}:\n"));
                    out.push_str(&render_array_table(&items)?);
                }
            }
            Ok(out)
        }
        scalar => {
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(Table::new(["value"]).with_rows(rows).render(table_options()))
        }
    }
}

fn is_record_list(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| !items.is_empty() && items.iter().all(Value::is_object))
}

fn render_array_table(items: &[Value]) -> anyhow::Result<String> {
    if items.is_empty() {
        return Ok(String::from("(no rows)"));
    }

    let all_objects = items.iter().all(Value::is_object);
    if !all_objects {
        let rows = items.iter().map(|item| vec![value_to_cell(item)]);
        return Ok(Table::new(["value"]).with_rows(rows).render(table_options()));
    }

    let mut headers = Vec::<String>::new();
    for item in items {
        if let Some(map) = item.as_object() {
            for key in map.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    if headers.is_empty() {
        return Ok(String::from("(no columns)"));
    }

    headers.sort();

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    Ok(Table::new(headers).with_rows(rows).render(table_options()))
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
