use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::render;
use super::state::GraphInstance;
use super::types::GraphElements;
use crate::config::ClientConfig;

const DEFAULT_WIDTH: f64 = 800.0;
const DEFAULT_HEIGHT: f64 = 600.0;

#[derive(Error, Debug)]
pub enum GraphError {
	#[error("graph container is not mounted")]
	NoCanvas,

	#[error("{0}")]
	Canvas(String),
}

impl From<JsValue> for GraphError {
	fn from(value: JsValue) -> Self {
		GraphError::Canvas(
			value
				.as_string()
				.unwrap_or_else(|| "canvas rendering unavailable".into()),
		)
	}
}

/// Owned handle to the page's single graph instance.
///
/// Clones share the same instance. The instance is created on the first
/// [`GraphHandle::show`] and reused for every later one.
#[derive(Clone, Default)]
pub struct GraphHandle {
	instance: Rc<RefCell<Option<GraphInstance>>>,
	canvas: Rc<RefCell<Option<HtmlCanvasElement>>>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl GraphHandle {
	pub fn new() -> Self {
		Self::default()
	}

	/// Bind the canvas the instance will draw into.
	pub fn attach(&self, canvas: HtmlCanvasElement) {
		*self.canvas.borrow_mut() = Some(canvas);
	}

	pub fn is_created(&self) -> bool {
		self.instance.borrow().is_some()
	}

	/// Run `f` against the instance if it exists.
	pub fn with_instance<R>(&self, f: impl FnOnce(&mut GraphInstance) -> R) -> Option<R> {
		self.instance.borrow_mut().as_mut().map(f)
	}

	/// Replace the instance's elements, creating it with `init` on first use.
	/// Returns true when this call created the instance.
	pub fn load(
		&self,
		elements: &GraphElements,
		padding: f64,
		init: impl FnOnce() -> GraphInstance,
	) -> bool {
		let mut slot = self.instance.borrow_mut();
		let created = slot.is_none();
		let instance = slot.get_or_insert_with(init);
		instance.replace_elements(elements);
		instance.run_layout();
		instance.fit(padding);
		created
	}

	/// Draw `elements` on the attached canvas with an animated layout.
	pub fn show(&self, elements: &GraphElements, config: &ClientConfig) -> Result<(), GraphError> {
		let canvas = self.canvas.borrow().clone().ok_or(GraphError::NoCanvas)?;
		let created = self.load(elements, config.fit_padding, || {
			let (w, h) = fit_canvas_to_container(&canvas);
			GraphInstance::new(config, w, h)
		});
		if created {
			info!("Graph instance created");
		}
		if !self.is_animating() {
			self.start_animation(&canvas)?;
		}
		Ok(())
	}

	/// Whether the frame loop has been started.
	pub fn is_animating(&self) -> bool {
		self.animate.borrow().is_some()
	}

	/// Track the container's size after a window resize.
	pub fn resize(&self) {
		let Some(canvas) = self.canvas.borrow().clone() else {
			return;
		};
		if !self.is_created() {
			return;
		}
		let (w, h) = fit_canvas_to_container(&canvas);
		self.with_instance(|s| s.resize(w, h));
	}

	fn start_animation(&self, canvas: &HtmlCanvasElement) -> Result<(), GraphError> {
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.and_then(|ctx| ctx.dyn_into().ok())
			.ok_or_else(|| GraphError::Canvas("2d context unavailable".into()))?;
		let window =
			web_sys::window().ok_or_else(|| GraphError::Canvas("No window object".into()))?;

		let (state_anim, animate_inner) = (self.instance.clone(), self.animate.clone());
		let frame = Closure::<dyn FnMut()>::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		});
		window.request_animation_frame(frame.as_ref().unchecked_ref())?;
		// Kept only once scheduled, so a failed start is retried on the next show.
		*self.animate.borrow_mut() = Some(frame);
		Ok(())
	}
}

/// Size the canvas to its parent element and return the new size.
fn fit_canvas_to_container(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let (w, h) = canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	(w, h)
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use serde_json::json;

	use super::*;
	use crate::components::force_graph::types::{GraphEdge, GraphNode};
	use crate::components::forms::display::graph_status;

	fn elements(ids: &[&str]) -> GraphElements {
		GraphElements {
			nodes: ids
				.iter()
				.map(|id| GraphNode {
					id: id.to_string(),
					label: id.to_string(),
				})
				.collect(),
			edges: vec![GraphEdge {
				id: "x->y-0".into(),
				source: "x".into(),
				target: "y".into(),
				weight: 5.0,
			}],
		}
	}

	#[test]
	fn instance_is_created_once() {
		let handle = GraphHandle::new();
		let inits = Cell::new(0);
		let init = || {
			inits.set(inits.get() + 1);
			GraphInstance::new(&ClientConfig::default(), 800.0, 600.0)
		};
		assert!(handle.load(&elements(&["x", "y"]), 30.0, init));
		assert!(!handle.load(&elements(&["x", "y", "z"]), 30.0, init));
		assert_eq!(inits.get(), 1);
		assert_eq!(handle.with_instance(|s| s.node_count()), Some(3));
	}

	#[test]
	fn clones_share_the_instance() {
		let handle = GraphHandle::new();
		let other = handle.clone();
		assert!(!other.is_created());
		handle.load(&elements(&["x", "y"]), 30.0, || {
			GraphInstance::new(&ClientConfig::default(), 800.0, 600.0)
		});
		assert!(other.is_created());
		assert_eq!(other.with_instance(|s| s.edge_count()), Some(1));
	}

	#[test]
	fn frame_loop_is_not_marked_started_by_loading() {
		let handle = GraphHandle::new();
		handle.load(&elements(&["x", "y"]), 30.0, || {
			GraphInstance::new(&ClientConfig::default(), 800.0, 600.0)
		});
		// A created instance without a running loop still gets one on the next show.
		assert!(handle.is_created());
		assert!(!handle.is_animating());
	}

	#[test]
	fn payload_drives_the_status_line() {
		let elements = GraphElements::from_value(json!({
			"nodes": [{ "id": "x" }, { "id": "y" }],
			"edges": [{ "source": "x", "target": "y", "weight": 5 }]
		}))
		.unwrap();
		let handle = GraphHandle::new();
		handle.load(&elements, 30.0, || {
			GraphInstance::new(&ClientConfig::default(), 800.0, 600.0)
		});
		let (nodes, edges) = handle
			.with_instance(|s| (s.node_count(), s.edge_count()))
			.unwrap();
		assert_eq!((nodes, edges), (elements.nodes.len(), elements.edges.len()));
		assert_eq!(graph_status(nodes, edges), "Nodes: 2, Edges: 1");
	}

	#[test]
	fn resubmitting_same_graph_keeps_counts() {
		let handle = GraphHandle::new();
		let init = || GraphInstance::new(&ClientConfig::default(), 800.0, 600.0);
		handle.load(&elements(&["x", "y"]), 30.0, init);
		handle.load(&elements(&["x", "y"]), 30.0, init);
		assert_eq!(
			handle.with_instance(|s| (s.node_count(), s.edge_count())),
			Some((2, 1))
		);
	}
}
