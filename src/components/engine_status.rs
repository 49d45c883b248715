use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};

use crate::api::{Endpoint, fetch_status};
use crate::config::ClientConfig;

/// Shows which engine the backend uses for summaries and answers.
#[component]
pub fn EngineStatus() -> impl IntoView {
	let config = use_context::<ClientConfig>().unwrap_or_default();
	let url = config.endpoint(Endpoint::Status.path());
	let (line, set_line) = signal(String::new());

	spawn_local(async move {
		let text = match fetch_status(&url).await {
			Ok(status) => {
				debug!("Backend status: {status:?}");
				status.describe()
			}
			Err(err) => {
				warn!("Backend status unavailable: {err}");
				"Engine status unavailable".to_string()
			}
		};
		set_line.set(text);
	});

	view! { <p class="engine-status">{move || line.get()}</p> }
}
