//! Text shown in the result and status areas.

use std::fmt::Display;

use serde_json::Value;
use web_sys::{File, HtmlInputElement};

/// Placeholder while a summary or answer is pending.
pub const WORKING: &str = "Working...";
/// Placeholder while a knowledge graph is pending.
pub const BUILDING_GRAPH: &str = "Building graph...";

/// JSON with two-space indentation.
pub fn pretty_json(value: &Value) -> String {
	serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// The `summary` field when it is present and truthy, the whole response otherwise.
pub fn summary_text(value: &Value) -> String {
	match value.get("summary") {
		Some(Value::String(summary)) if !summary.is_empty() => summary.clone(),
		Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f != 0.0) => n.to_string(),
		Some(Value::Bool(true)) => "true".to_string(),
		Some(summary @ (Value::Array(_) | Value::Object(_))) => pretty_json(summary),
		_ => pretty_json(value),
	}
}

pub fn error_text(err: &impl Display) -> String {
	format!("Error: {err}")
}

pub fn graph_status(nodes: usize, edges: usize) -> String {
	format!("Nodes: {nodes}, Edges: {edges}")
}

/// Files currently selected in a file input, in selection order.
pub fn selected_files(input: &HtmlInputElement) -> Vec<File> {
	let Some(list) = input.files() else {
		return Vec::new();
	};
	(0..list.length()).filter_map(|i| list.get(i)).collect()
}
