use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use super::display::{WORKING, error_text, pretty_json, selected_files};
use crate::api::{Endpoint, UploadRequest, post_files};
use crate::config::ClientConfig;

/// Ask a question about uploaded documents and show the raw answer.
#[component]
pub fn QaForm() -> impl IntoView {
	let config = use_context::<ClientConfig>().unwrap_or_default();
	let url = config.endpoint(Endpoint::Qa.path());
	let files_ref = NodeRef::<leptos::html::Input>::new();
	let question_ref = NodeRef::<leptos::html::Input>::new();
	let (result, set_result) = signal(String::new());

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let files = files_ref
			.get()
			.map(|input| selected_files(&input))
			.unwrap_or_default();
		let question = question_ref
			.get()
			.map(|input| input.value())
			.unwrap_or_default();
		set_result.set(WORKING.to_string());
		let request = UploadRequest::new(url.clone(), files).field("question", question);
		spawn_local(async move {
			let text = match post_files(&request).await {
				Ok(data) => pretty_json(&data),
				Err(err) => {
					warn!("Question answering failed: {err}");
					error_text(&err)
				}
			};
			set_result.set(text);
		});
	};

	view! {
		<section class="panel">
			<h2>"Ask a question"</h2>
			<form id="qa-form" on:submit=on_submit>
				<input id="qa-files" type="file" multiple=true node_ref=files_ref />
				<input id="qa-question" type="text" placeholder="Question" node_ref=question_ref />
				<button type="submit">"Ask"</button>
			</form>
			<pre id="qa-result" class="result">{move || result.get()}</pre>
		</section>
	}
}
