use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use thiserror::Error;

use super::display::{BUILDING_GRAPH, error_text, graph_status, selected_files};
use crate::api::{ApiError, Endpoint, UploadRequest, post_files};
use crate::components::force_graph::{GraphCanvas, GraphElements, GraphError, GraphHandle};
use crate::config::ClientConfig;

#[derive(Error, Debug)]
enum SubmitError {
	#[error(transparent)]
	Api(#[from] ApiError),

	#[error(transparent)]
	Graph(#[from] GraphError),
}

/// Upload, convert and draw. Returns the node and edge counts of the response.
async fn build_graph(
	request: &UploadRequest,
	graph: &GraphHandle,
	config: &ClientConfig,
) -> Result<(usize, usize), SubmitError> {
	let data = post_files(request).await?;
	let elements = GraphElements::from_value(data).map_err(ApiError::from)?;
	graph.show(&elements, config)?;
	Ok((elements.nodes.len(), elements.edges.len()))
}

/// Upload documents and draw the knowledge graph built from them.
#[component]
pub fn KnowledgeGraphForm() -> impl IntoView {
	let config = use_context::<ClientConfig>().unwrap_or_default();
	let url = config.endpoint(Endpoint::KnowledgeGraph.path());
	let files_ref = NodeRef::<leptos::html::Input>::new();
	let (status, set_status) = signal(String::new());
	let graph = GraphHandle::new();

	let graph_submit = graph.clone();
	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let files = files_ref
			.get()
			.map(|input| selected_files(&input))
			.unwrap_or_default();
		set_status.set(BUILDING_GRAPH.to_string());
		let request = UploadRequest::new(url.clone(), files);
		let (graph, config) = (graph_submit.clone(), config.clone());
		spawn_local(async move {
			let text = match build_graph(&request, &graph, &config).await {
				Ok((nodes, edges)) => {
					info!("Knowledge graph rendered: {nodes} nodes, {edges} edges");
					graph_status(nodes, edges)
				}
				Err(err) => {
					warn!("Knowledge graph failed: {err}");
					error_text(&err)
				}
			};
			set_status.set(text);
		});
	};

	view! {
		<section class="panel panel-wide">
			<h2>"Knowledge graph"</h2>
			<form id="kg-form" on:submit=on_submit>
				<input id="kg-files" type="file" multiple=true node_ref=files_ref />
				<button type="submit">"Build graph"</button>
			</form>
			<p id="kg-status" class="status">{move || status.get()}</p>
			<GraphCanvas handle=graph />
		</section>
	}
}
