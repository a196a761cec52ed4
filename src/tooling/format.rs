//! Format search results, node types and dimensions as text or JSON.

use crate::content::NodeTypeSummary;
use crate::error::FinderError;
use crate::finder::{OccurrenceReport, ResolvedNode};
use crate::types::DimensionCombination;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Output format of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Result<Self, FinderError> {
        match raw {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(FinderError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, FinderError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Occurrence table, followed by failed dimensions and skipped nodes if any.
pub fn format_occurrences_text(report: &OccurrenceReport) -> String {
    let mut out = String::new();
    if report.occurrences.is_empty() {
        out.push_str(&format!("No occurrences of {} found.\n", report.node_type));
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Occurrence on page"]);
        for occurrence in &report.occurrences {
            table.add_row(vec![occurrence.url.clone()]);
        }
        out.push_str(&format!("{}\n", table));
    }

    if !report.failed_dimensions.is_empty() {
        out.push_str(&format!(
            "\n{}\n\n",
            format_section_heading("Failed dimensions")
        ));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Dimensions", "Reason"]);
        for failure in &report.failed_dimensions {
            table.add_row(vec![failure.dimensions.to_string(), failure.reason.clone()]);
        }
        out.push_str(&format!("{}\n", table));
    }

    if report.skipped_nodes > 0 {
        out.push_str(&format!(
            "\nSkipped {} node(s) that could not be resolved.\n",
            report.skipped_nodes
        ));
    }
    out
}

pub fn format_resolved_text(resolved: &ResolvedNode) -> String {
    resolved.url.clone()
}

pub fn format_node_types_text(types: &[NodeTypeSummary]) -> String {
    if types.is_empty() {
        return "No document or content node types declared.\n".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Node type", "Label"]);
    for summary in types {
        table.add_row(vec![summary.name.clone(), summary.label.clone()]);
    }
    format!("{}\n", table)
}

pub fn format_dimensions_text(combinations: &[DimensionCombination]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Dimension combination"]);
    for combination in combinations {
        table.add_row(vec![combination.to_string()]);
    }
    format!(
        "{}\n\nTotal: {} combination(s).\n",
        table,
        combinations.len()
    )
}
