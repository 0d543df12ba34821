//! Show command - Print the current telemetry IDs

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use serde::Serialize;
use std::path::Path;

use super::utils;
use cursor_id_reset::config::Settings;
use cursor_id_reset::cursor::{classify, ConfigStore, FormatDescriptor, TelemetryIds};

/// One telemetry field as printed by `show --json`
#[derive(Debug, Serialize)]
pub struct FieldEntry {
    pub key: &'static str,
    pub value: String,
    pub format: FormatDescriptor,
}

#[derive(Debug, Serialize)]
struct ShowOutput<'a> {
    path: &'a Path,
    fields: Vec<FieldEntry>,
}

/// Pair every field with its detected format
pub fn field_entries(ids: &TelemetryIds) -> Vec<FieldEntry> {
    ids.iter()
        .map(|(field, value)| FieldEntry {
            key: field.key(),
            value: value.to_string(),
            format: classify(value),
        })
        .collect()
}

/// Execute the show command
pub fn execute(settings: &Settings, json: bool) -> Result<()> {
    let store = ConfigStore::open(&settings.storage_path).context("Cannot read telemetry IDs")?;
    let ids = store.ids();

    if json {
        let output = ShowOutput {
            path: store.path(),
            fields: field_entries(&ids),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Field"), Cell::new("Value"), Cell::new("Format")]);

    for (field, value) in ids.iter() {
        table.add_row(vec![
            Cell::new(field.label()),
            Cell::new(value),
            Cell::new(utils::describe_format(&classify(value))),
        ]);
    }

    println!("Config: {}", store.path().display());
    println!("{table}");

    Ok(())
}
