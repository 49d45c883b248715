use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use super::display::{WORKING, error_text, selected_files, summary_text};
use crate::api::{Endpoint, UploadRequest, post_files};
use crate::config::ClientConfig;

/// Upload documents and show their summary.
#[component]
pub fn SummarizeForm() -> impl IntoView {
	let config = use_context::<ClientConfig>().unwrap_or_default();
	let url = config.endpoint(Endpoint::Summarize.path());
	let files_ref = NodeRef::<leptos::html::Input>::new();
	let (result, set_result) = signal(String::new());

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let files = files_ref
			.get()
			.map(|input| selected_files(&input))
			.unwrap_or_default();
		set_result.set(WORKING.to_string());
		let request = UploadRequest::new(url.clone(), files);
		spawn_local(async move {
			let text = match post_files(&request).await {
				Ok(data) => summary_text(&data),
				Err(err) => {
					warn!("Summarize failed: {err}");
					error_text(&err)
				}
			};
			set_result.set(text);
		});
	};

	view! {
		<section class="panel">
			<h2>"Summarize"</h2>
			<form id="summarize-form" on:submit=on_submit>
				<input id="summarize-files" type="file" multiple=true node_ref=files_ref />
				<button type="submit">"Summarize"</button>
			</form>
			<pre id="summarize-result" class="result">{move || result.get()}</pre>
		</section>
	}
}
