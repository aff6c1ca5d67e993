use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(output_format: &OutputFormat, collection_name: &str, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ collection_name: [] }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Print a list of API entities, as JSON or as a fixed-width table.
/// `columns` pairs a header with the entity field it shows.
pub fn output_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    items: &Value,
    columns: &[(&str, &str, usize)],
) -> anyhow::Result<()> {
    let rows = items.as_array().map(Vec::as_slice).unwrap_or_default();
    if rows.is_empty() {
        return output_empty_collection(output_format, collection_name, &format!("No {} found", collection_name));
    }

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ collection_name: rows }))?);
        }
        OutputFormat::Text => {
            let header: Vec<String> = columns.iter().map(|(title, _, width)| pad(title, *width)).collect();
            println!("{}", header.join(" "));
            println!("{}", "-".repeat(columns.iter().map(|(_, _, w)| w + 1).sum()));

            for row in rows {
                let cells: Vec<String> = columns
                    .iter()
                    .map(|(_, field, width)| pad(&field_text(&row[*field]), *width))
                    .collect();
                println!("{}", cells.join(" "));
            }
        }
    }
    Ok(())
}

/// Output current item information in the appropriate format
pub fn output_current_item(output_format: &OutputFormat, item_type: &str, name: &str, details: Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    format!("current_{}", item_type): details
                }))?
            );
        }
        OutputFormat::Text => {
            println!("Current {}: {}", item_type, name);
            for key in ["url", "name", "contact_email", "status", "tenant_header"] {
                if let Some(value) = details.get(key).and_then(Value::as_str) {
                    if !value.is_empty() {
                        println!("{}: {}", key, value);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Output "no current item" message in the appropriate format
pub fn output_no_current_item(output_format: &OutputFormat, item_type: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    format!("current_{}", item_type): null
                }))?
            );
        }
        OutputFormat::Text => {
            println!("No current {} set", item_type);
        }
    }
    Ok(())
}

fn field_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.len().to_string(),
        other => other.to_string(),
    }
}

fn pad(text: &str, width: usize) -> String {
    let mut cell: String = text.chars().take(width).collect();
    let len = cell.chars().count();
    cell.extend(std::iter::repeat(' ').take(width - len));
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_truncates_and_fills() {
        assert_eq!(pad("Website Redesign", 7), "Website");
        assert_eq!(pad("ok", 4), "ok  ");
    }

    #[test]
    fn field_text_renders_nulls_and_lists() {
        assert_eq!(field_text(&Value::Null), "-");
        assert_eq!(field_text(&json!([1, 2, 3])), "3");
        assert_eq!(field_text(&json!(42)), "42");
        assert_eq!(field_text(&json!("TODO")), "TODO");
    }
}
