use log::{debug, warn};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response};

use super::error::ApiError;

/// Multipart field every uploaded file is appended under.
pub const FILES_FIELD: &str = "files";

/// One entry of a multipart body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Part<'a, F> {
	/// A file blob, sent with its own file name.
	File(&'a F),
	/// A plain string value.
	Text(&'a str),
}

/// A single multipart POST, built fresh per submission.
#[derive(Clone, Debug)]
pub struct UploadRequest<F = web_sys::File> {
	/// Target endpoint.
	pub url: String,
	/// Files in selection order.
	pub files: Vec<F>,
	/// Extra `name -> value` fields, sent after the files.
	pub fields: Vec<(String, String)>,
}

impl<F> UploadRequest<F> {
	/// A request carrying only files.
	pub fn new(url: impl Into<String>, files: Vec<F>) -> Self {
		Self {
			url: url.into(),
			files,
			fields: Vec::new(),
		}
	}

	/// Append an extra string field after the files.
	pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.fields.push((name.into(), value.into()));
		self
	}

	/// Multipart entries in body order: files first, in selection order, then extra fields.
	pub fn parts(&self) -> Vec<(&str, Part<'_, F>)> {
		self.files
			.iter()
			.map(|f| (FILES_FIELD, Part::File(f)))
			.chain(
				self.fields
					.iter()
					.map(|(k, v)| (k.as_str(), Part::Text(v.as_str()))),
			)
			.collect()
	}
}

impl UploadRequest<web_sys::File> {
	/// Realize [`UploadRequest::parts`] as a browser `FormData`.
	pub fn to_form_data(&self) -> Result<FormData, ApiError> {
		let form = FormData::new()?;
		for (name, part) in self.parts() {
			match part {
				Part::File(file) => form.append_with_blob(name, file)?,
				Part::Text(value) => form.append_with_str(name, value)?,
			}
		}
		Ok(form)
	}
}

/// Decide the outcome of a completed HTTP exchange.
pub fn interpret_response(ok: bool, body: &str) -> Result<Value, ApiError> {
	if !ok {
		return Err(ApiError::Upload(body.to_string()));
	}
	Ok(serde_json::from_str(body)?)
}

/// POST the request as `multipart/form-data` and decode the JSON answer.
pub async fn post_files(request: &UploadRequest) -> Result<Value, ApiError> {
	debug!(
		"POST {} ({} files, {} fields)",
		request.url,
		request.files.len(),
		request.fields.len()
	);
	let opts = RequestInit::new();
	opts.set_method("POST");
	let body: JsValue = request.to_form_data()?.into();
	opts.set_body(&body);
	let response = send(&request.url, &opts).await?;
	let body = response_text(&response).await?;
	interpret_response(response.ok(), &body).inspect_err(|err| {
		warn!("POST {} failed: {err:?}", request.url);
	})
}

/// GET a JSON document.
pub async fn get_json(url: &str) -> Result<Value, ApiError> {
	let opts = RequestInit::new();
	opts.set_method("GET");
	let response = send(url, &opts).await?;
	let body = response_text(&response).await?;
	interpret_response(response.ok(), &body)
}

async fn send(url: &str, opts: &RequestInit) -> Result<Response, ApiError> {
	let window = web_sys::window().ok_or_else(|| ApiError::Network("No window object".into()))?;
	let request = Request::new_with_str_and_init(url, opts)?;
	let value = JsFuture::from(window.fetch_with_request(&request)).await?;
	Ok(value.dyn_into()?)
}

async fn response_text(response: &Response) -> Result<String, ApiError> {
	let value = JsFuture::from(response.text()?).await?;
	value
		.as_string()
		.ok_or_else(|| ApiError::Network("Response body is not text".into()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn files_come_first_in_selection_order() {
		let request = UploadRequest::new("/qa/", vec!["a.pdf", "b.txt", "c.docx"])
			.field("question", "Who wrote it?");
		let parts = request.parts();
		assert_eq!(
			parts,
			vec![
				("files", Part::File(&"a.pdf")),
				("files", Part::File(&"b.txt")),
				("files", Part::File(&"c.docx")),
				("question", Part::Text("Who wrote it?")),
			]
		);
	}

	#[test]
	fn no_files_and_no_fields_is_an_empty_body() {
		let request: UploadRequest<&str> = UploadRequest::new("/summarize/", Vec::new());
		assert!(request.parts().is_empty());
	}

	#[test]
	fn every_extra_field_gets_its_own_entry() {
		let request = UploadRequest::new("/qa/", vec![1u8])
			.field("question", "q")
			.field("lang", "en");
		let names: Vec<&str> = request.parts().iter().map(|(n, _)| *n).collect();
		assert_eq!(names, ["files", "question", "lang"]);
	}

	#[test]
	fn non_success_carries_the_exact_body() {
		let body = "{\"detail\":\"Unsupported file type\"}";
		assert_eq!(
			interpret_response(false, body),
			Err(ApiError::Upload(body.to_string()))
		);
	}

	#[test]
	fn non_json_success_is_a_parse_error() {
		assert!(matches!(
			interpret_response(true, "Internal Server Error"),
			Err(ApiError::Parse(_))
		));
	}

	#[test]
	fn json_success_is_returned() {
		let value = interpret_response(true, r#"{"summary":"hi"}"#).unwrap();
		assert_eq!(value["summary"], "hi");
	}
}
