use leptos::prelude::*;

use crate::components::engine_status::EngineStatus;
use crate::components::forms::{KnowledgeGraphForm, QaForm, SummarizeForm};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<header class="page-header">
			<h1>"Document Insight"</h1>
			<p class="subtitle">"Summarize documents, map their concepts and ask questions about them."</p>
			<EngineStatus />
		</header>
		<main class="panels">
			<SummarizeForm />
			<KnowledgeGraphForm />
			<QaForm />
		</main>
	}
}
