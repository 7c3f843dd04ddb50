//! Model and data source listings.

use crate::error::ScaffoldError;
use crate::workspace::{DataSourceDefinition, ModelDefinition};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::json;

fn to_pretty_json(value: &serde_json::Value) -> Result<String, ScaffoldError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ScaffoldError::ConfigError(format!("Failed to render JSON: {}", e)))
}

pub fn format_model_list(models: &[ModelDefinition], format: &str) -> Result<String, ScaffoldError> {
    if format == "json" {
        let list: Vec<_> = models
            .iter()
            .map(|m| {
                json!({
                    "name": m.name,
                    "base": m.base,
                    "properties": m.properties.keys().collect::<Vec<_>>(),
                })
            })
            .collect();
        return to_pretty_json(&json!({ "models": list, "total": models.len() }));
    }

    if models.is_empty() {
        return Ok("No models found.".to_string());
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Model", "Base", "Properties"]);
    for model in models {
        let properties = if model.properties.is_empty() {
            "-".to_string()
        } else {
            model.properties.keys().cloned().collect::<Vec<_>>().join(", ")
        };
        table.add_row(vec![
            model.name.as_str(),
            model.base.as_deref().unwrap_or("-"),
            properties.as_str(),
        ]);
    }
    Ok(format!("{}\n\nTotal: {} model(s)", table, models.len()))
}

pub fn format_data_source_list(
    data_sources: &[DataSourceDefinition],
    format: &str,
) -> Result<String, ScaffoldError> {
    if format == "json" {
        let list: Vec<_> = data_sources
            .iter()
            .map(|ds| json!({ "name": ds.name, "connector": ds.connector }))
            .collect();
        return to_pretty_json(&json!({ "datasources": list, "total": data_sources.len() }));
    }

    if data_sources.is_empty() {
        return Ok("No data sources found.".to_string());
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Data source", "Connector"]);
    for ds in data_sources {
        table.add_row(vec![ds.name.as_str(), ds.connector.as_str()]);
    }
    Ok(format!("{}\n\nTotal: {} data source(s)", table, data_sources.len()))
}
