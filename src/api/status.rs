use serde::Deserialize;

use super::error::ApiError;
use super::upload::get_json;

/// Which summarization/answering engine the backend is using.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackendStatus {
	/// State of the Gemini integration.
	pub gemini: GeminiStatus,
}

/// Whether Gemini is configured and what it currently serves.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeminiStatus {
	/// An API key is present in the backend's environment.
	pub key_set: bool,
	/// The client library loaded and accepted the key.
	pub active: bool,
	/// Engine name per feature.
	pub used_for: EngineUsage,
}

/// Engine name (`gemini` or `local_stub`) per feature.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineUsage {
	/// Engine behind `/summarize/`.
	pub summarize: String,
	/// Engine behind `/qa/`.
	pub qa: String,
}

impl BackendStatus {
	/// One-line description for the header badge.
	pub fn describe(&self) -> String {
		let usage = &self.gemini.used_for;
		let mut line = format!(
			"Summaries: {} · Answers: {}",
			engine_or_unknown(&usage.summarize),
			engine_or_unknown(&usage.qa)
		);
		if self.gemini.key_set && !self.gemini.active {
			line.push_str(" (Gemini key set but inactive)");
		}
		line
	}
}

fn engine_or_unknown(engine: &str) -> &str {
	if engine.is_empty() { "unknown" } else { engine }
}

/// Request and decode the backend's `/status` document.
pub async fn fetch_status(url: &str) -> Result<BackendStatus, ApiError> {
	let value = get_json(url).await?;
	Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn describes_backend_engines() {
		let status: BackendStatus = serde_json::from_str(
			r#"{"gemini":{"key_set":true,"active":false,
			"used_for":{"summarize":"local_stub","qa":"local_stub"}}}"#,
		)
		.unwrap();
		assert_eq!(
			status.describe(),
			"Summaries: local_stub · Answers: local_stub (Gemini key set but inactive)"
		);
	}

	#[test]
	fn missing_fields_are_unknown() {
		let status: BackendStatus = serde_json::from_str("{}").unwrap();
		assert_eq!(status.describe(), "Summaries: unknown · Answers: unknown");
	}
}
