use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::scale::edge_width;
use super::state::{GraphInstance, NODE_RADIUS};

const BACKGROUND: &str = "#ffffff";
const NODE_FILL: &str = "#4f46e5";
const LABEL_COLOR: &str = "#fff";
const LABEL_FONT_PX: f64 = 10.0;
const LABEL_MAX_WIDTH: f64 = 120.0;
const EDGE_COLOR: &str = "#94a3b8";
const SELECTED_BORDER: &str = "#22d3ee";
const SELECTED_BORDER_WIDTH: f64 = 2.0;

pub fn render(state: &GraphInstance, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &GraphInstance, ctx: &CanvasRenderingContext2d) {
	let mut positions: HashMap<DefaultNodeIdx, (f64, f64)> = HashMap::new();
	state.graph.visit_nodes(|node| {
		positions.insert(node.index(), (node.x() as f64, node.y() as f64));
	});

	ctx.set_stroke_style_str(EDGE_COLOR);
	for edge in &state.edges {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		ctx.set_line_width(edge_width(edge.weight));
		ctx.begin_path();
		if edge.source == edge.target {
			// Self-loop sits on top of the node.
			let _ = ctx.arc(x1, y1 - NODE_RADIUS, NODE_RADIUS * 0.8, 0.0, 2.0 * PI);
		} else {
			let (dx, dy) = (x2 - x1, y2 - y1);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist < 0.001 {
				continue;
			}
			let (nx, ny) = (-dy / dist, dx / dist);
			let (cx, cy) = (
				(x1 + x2) / 2.0 + nx * edge.curve,
				(y1 + y2) / 2.0 + ny * edge.curve,
			);
			ctx.move_to(x1, y1);
			ctx.quadratic_curve_to(cx, cy, x2, y2);
		}
		ctx.stroke();
	}
}

fn draw_nodes(state: &GraphInstance, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(&format!("{LABEL_FONT_PX}px sans-serif"));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);

		ctx.begin_path();
		let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(NODE_FILL);
		ctx.fill();

		if state.is_selected(node.index()) {
			ctx.set_stroke_style_str(SELECTED_BORDER);
			ctx.set_line_width(SELECTED_BORDER_WIDTH);
			ctx.stroke();
		}

		let lines = wrap_label(&node.data.user_data.label, LABEL_MAX_WIDTH, |s| {
			ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0)
		});
		let line_height = LABEL_FONT_PX * 1.2;
		let top = y - line_height * (lines.len() as f64 - 1.0) / 2.0;
		ctx.set_fill_style_str(LABEL_COLOR);
		for (i, line) in lines.iter().enumerate() {
			let _ = ctx.fill_text(line, x, top + i as f64 * line_height);
		}
	});
}

/// Break a label at whitespace so each line fits `max_width`. Over-long words keep their own line.
pub fn wrap_label(label: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
	let mut lines = Vec::new();
	let mut current = String::new();
	for word in label.split_whitespace() {
		if current.is_empty() {
			current.push_str(word);
			continue;
		}
		let candidate = format!("{current} {word}");
		if measure(&candidate) <= max_width {
			current = candidate;
		} else {
			lines.push(std::mem::replace(&mut current, word.to_string()));
		}
	}
	if !current.is_empty() {
		lines.push(current);
	}
	lines
}
