use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Failure of a backend call. The display text is what users see after `Error: `.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
	/// The request could not be sent or the response could not be read.
	#[error("{0}")]
	Network(String),

	/// The server answered with a non-success status; carries the response body verbatim.
	#[error("{0}")]
	Upload(String),

	/// The server answered successfully but the body was not the expected JSON.
	#[error("{0}")]
	Parse(String),
}

impl From<JsValue> for ApiError {
	fn from(value: JsValue) -> Self {
		let message = match value.dyn_ref::<js_sys::Error>() {
			Some(err) => String::from(err.message()),
			None => value.as_string().unwrap_or_else(|| format!("{value:?}")),
		};
		ApiError::Network(message)
	}
}

impl From<serde_json::Error> for ApiError {
	fn from(err: serde_json::Error) -> Self {
		ApiError::Parse(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_is_the_bare_message() {
		let err = ApiError::Upload("file type not supported".into());
		assert_eq!(err.to_string(), "file type not supported");
	}

	#[test]
	fn json_errors_become_parse_errors() {
		let err: ApiError = serde_json::from_str::<serde_json::Value>("<html>")
			.unwrap_err()
			.into();
		assert!(matches!(err, ApiError::Parse(_)));
	}
}
