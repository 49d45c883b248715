use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use super::handle::GraphHandle;
use super::scale::{MAX_ZOOM, MIN_ZOOM};

/// Id of the element hosting the graph canvas.
pub const GRAPH_CONTAINER_ID: &str = "cy";

/// Canvas the knowledge graph is drawn into. Nothing is drawn until the
/// handle's instance is created by the first graph submission.
#[component]
pub fn GraphCanvas(handle: GraphHandle) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	let handle_mount = handle.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		handle_mount.attach(canvas.into());

		let handle_resize = handle_mount.clone();
		let on_resize = Closure::<dyn FnMut()>::new(move || handle_resize.resize());
		if let Some(window) = web_sys::window() {
			let _ =
				window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
		}
		// The listener lives as long as the page.
		on_resize.forget();
	});

	let local_point = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let handle_md = handle.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(&ev) else {
			return;
		};
		handle_md.with_instance(|s| {
			let hit = s.node_at_position(x, y);
			s.select(hit);
			if let Some(idx) = hit {
				let Some((nx, ny)) = s.node_position(idx) else {
					return;
				};
				s.drag.active = true;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.drag.node_start_x = nx as f32;
				s.drag.node_start_y = ny as f32;
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		});
	};

	let handle_mm = handle.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(&ev) else {
			return;
		};
		handle_mm.with_instance(|s| {
			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		});
	};

	let handle_mu = handle.clone();
	let on_mouseup = move |_: MouseEvent| {
		handle_mu.with_instance(|s| {
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
		});
	};

	let handle_ml = handle.clone();
	let on_mouseleave = move |_: MouseEvent| {
		handle_ml.with_instance(|s| {
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
		});
	};

	let handle_wh = handle;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let mouse: &MouseEvent = &ev;
		let Some((x, y)) = local_point(mouse) else {
			return;
		};
		handle_wh.with_instance(|s| {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		});
	};

	view! {
		<div id=GRAPH_CONTAINER_ID class="graph-container">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
		</div>
	}
}
