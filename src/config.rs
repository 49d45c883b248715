//! Client configuration, read once from the hosting page.

use log::{debug, warn};
use serde::Deserialize;

/// Id of the optional inline JSON element carrying a [`ClientConfig`].
pub const CONFIG_ELEMENT_ID: &str = "doc-insight-config";

/// Settings for the whole client.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
	/// Prefix for every backend endpoint. Empty means same origin.
	pub api_base: String,
	/// Padding kept around the graph when the viewport is fitted.
	pub fit_padding: f64,
	/// Force-directed layout tuning.
	pub layout: LayoutConfig,
}

/// Parameters for the animated force-directed layout.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
	/// Node repulsion.
	pub charge: f32,
	/// Edge attraction.
	pub spring: f32,
	/// Cap on the force applied to a single node per step.
	pub max_force: f32,
	/// Maximum node speed in graph units per second.
	pub node_speed: f32,
	/// Velocity kept between steps, in `0..1`.
	pub damping: f32,
	/// Upper bound on simulated time before the layout is stopped.
	pub max_seconds: f64,
	/// Mean per-tick node displacement under which the layout counts as settled.
	pub settle_threshold: f64,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			api_base: String::new(),
			fit_padding: 30.0,
			layout: LayoutConfig::default(),
		}
	}
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			charge: 400.0,
			spring: 0.04,
			max_force: 100.0,
			node_speed: 3000.0,
			damping: 0.9,
			max_seconds: 6.0,
			settle_threshold: 0.05,
		}
	}
}

impl ClientConfig {
	/// Parse a config document, falling back to defaults on malformed input.
	pub fn from_json(raw: &str) -> Self {
		match serde_json::from_str(raw) {
			Ok(config) => config,
			Err(err) => {
				warn!("Ignoring malformed client config: {err}");
				Self::default()
			}
		}
	}

	/// Load the config embedded in the page, if any.
	pub fn load() -> Self {
		let raw = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|el| el.text_content());
		match raw {
			Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
			_ => {
				debug!("No inline client config, using defaults");
				Self::default()
			}
		}
	}

	/// Absolute or origin-relative URL for an endpoint path.
	pub fn endpoint(&self, path: &str) -> String {
		format!("{}{}", self.api_base.trim_end_matches('/'), path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_config_keeps_defaults() {
		let config = ClientConfig::from_json(r#"{"api_base": "http://localhost:8000/"}"#);
		assert_eq!(config.api_base, "http://localhost:8000/");
		assert_eq!(config.fit_padding, 30.0);
		assert_eq!(config.layout, LayoutConfig::default());
	}

	#[test]
	fn malformed_config_falls_back() {
		assert_eq!(ClientConfig::from_json("{not json"), ClientConfig::default());
	}

	#[test]
	fn endpoint_joins_without_double_slash() {
		let mut config = ClientConfig::default();
		assert_eq!(config.endpoint("/qa/"), "/qa/");
		config.api_base = "http://api.local/".into();
		assert_eq!(config.endpoint("/qa/"), "http://api.local/qa/");
	}
}
