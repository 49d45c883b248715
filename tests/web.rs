//! Browser tests for multipart assembly.
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use doc_insight::api::{ApiError, UploadRequest, interpret_response, post_files};
use js_sys::Array;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::File;

wasm_bindgen_test_configure!(run_in_browser);

fn file(name: &str, contents: &str) -> File {
	let parts = Array::of1(&JsValue::from_str(contents));
	File::new_with_str_sequence(&parts, name).unwrap()
}

#[wasm_bindgen_test]
fn form_data_repeats_files_field_in_order() {
	let request = UploadRequest::new("/qa/", vec![file("a.txt", "alpha"), file("b.txt", "beta")])
		.field("question", "What is alpha?");
	let form = request.to_form_data().unwrap();

	let files = form.get_all("files");
	assert_eq!(files.length(), 2);
	let names: Vec<String> = files
		.iter()
		.map(|f| File::from(f).name())
		.collect();
	assert_eq!(names, ["a.txt", "b.txt"]);
	assert_eq!(form.get("question").as_string().as_deref(), Some("What is alpha?"));
}

#[wasm_bindgen_test]
fn form_data_without_extra_fields() {
	let request = UploadRequest::new("/summarize/", vec![file("notes.md", "# Notes")]);
	let form = request.to_form_data().unwrap();
	assert_eq!(form.get_all("files").length(), 1);
	assert!(!form.has("question"));
}

#[wasm_bindgen_test]
fn failed_status_surfaces_body() {
	let err = interpret_response(false, "Only PDF, DOCX and TXT are supported").unwrap_err();
	assert_eq!(err, ApiError::Upload("Only PDF, DOCX and TXT are supported".into()));
	assert_eq!(err.to_string(), "Only PDF, DOCX and TXT are supported");
}

#[wasm_bindgen_test]
async fn unreachable_backend_is_a_network_error() {
	let request = UploadRequest::new("http://127.0.0.1:1/summarize/", vec![file("a.txt", "alpha")]);
	let err = post_files(&request).await.unwrap_err();
	assert!(matches!(err, ApiError::Network(_)), "unexpected error: {err:?}");
}
