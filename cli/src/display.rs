//! Registry rendering for the terminal

use chrono::{DateTime, Utc};
use colored::Colorize;
use comet_core::PluginRecord;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};

/// Render the registry as a table
pub fn registry_table(records: &[PluginRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Name",
            "Origin",
            "Folder",
            "Revision",
            "Description",
            "Status",
        ]);

    for record in records {
        table.add_row(vec![
            record.name.clone(),
            record.origin.to_string(),
            record.local_folder.clone(),
            record
                .revision
                .as_deref()
                .map(short_revision)
                .unwrap_or_else(|| "-".to_string()),
            record.description().unwrap_or("-").to_string(),
            status_label(record).to_string(),
        ]);
    }

    table
}

fn status_label(record: &PluginRecord) -> &'static str {
    if record.is_partial() {
        return "partial";
    }
    match record.needs_update {
        Some(true) => "update available",
        Some(false) => "up to date",
        None => "not checked",
    }
}

fn short_revision(revision: &str) -> String {
    revision.chars().take(7).collect()
}

/// Print the drift summary under the table
pub fn print_summary(records: &[PluginRecord], last_checked: Option<DateTime<Utc>>) {
    let drifted: Vec<&str> = records
        .iter()
        .filter(|record| record.needs_update == Some(true))
        .map(|record| record.name.as_str())
        .collect();

    if drifted.is_empty() {
        println!("{}", "No plugin updates available".bright_green());
    } else {
        println!(
            "{} {}",
            "Updates available:".bright_yellow(),
            drifted.join(", ")
        );
    }

    if let Some(checked) = last_checked {
        println!(
            "{}",
            format!("Last checked: {}", checked.format("%Y-%m-%d %H:%M:%S UTC")).dimmed()
        );
    }
}
