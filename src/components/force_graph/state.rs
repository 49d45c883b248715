use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, warn};

use super::scale::{Bounds, ViewTransform, fit_transform};
use super::types::GraphElements;
use crate::config::{ClientConfig, LayoutConfig};

pub const NODE_RADIUS: f64 = 15.0;
/// Spacing between parallel edges joining the same pair of nodes.
pub const CURVE_STEP: f64 = 40.0;
/// Layout never counts as settled before this much simulated time.
const LAYOUT_WARMUP: f64 = 0.5;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
}

#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub weight: f64,
	/// Signed offset of the curve's control point from the straight line.
	pub curve: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// The rendering surface for knowledge graphs. Created once and reloaded for every response.
pub struct GraphInstance {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub selected: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	layout: LayoutConfig,
	fit_padding: f64,
	layout_elapsed: f64,
}

fn simulation(layout: &LayoutConfig) -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: layout.charge,
		force_spring: layout.spring,
		force_max: layout.max_force,
		node_speed: layout.node_speed,
		damping_factor: layout.damping,
	})
}

impl GraphInstance {
	pub fn new(config: &ClientConfig, width: f64, height: f64) -> Self {
		Self {
			graph: simulation(&config.layout),
			edges: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			selected: None,
			width,
			height,
			animation_running: false,
			layout: config.layout.clone(),
			fit_padding: config.fit_padding,
			layout_elapsed: 0.0,
		}
	}

	/// Drop every element and load `elements` in their place.
	pub fn replace_elements(&mut self, elements: &GraphElements) {
		self.graph = simulation(&self.layout);
		self.edges.clear();
		self.selected = None;
		self.drag = DragState::default();
		self.pan = PanState::default();

		let mut id_to_idx = HashMap::new();
		for node in &elements.nodes {
			if id_to_idx.contains_key(&node.id) {
				warn!("Duplicate node id {:?}, keeping the first", node.id);
				continue;
			}
			let idx = self.graph.add_node(NodeData {
				x: 0.0,
				y: 0.0,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		// Parallel edges fan out symmetrically around the straight line.
		let mut pair_sizes: HashMap<(&str, &str), usize> = HashMap::new();
		for edge in &elements.edges {
			*pair_sizes.entry(pair_key(&edge.source, &edge.target)).or_default() += 1;
		}
		let mut pair_seen: HashMap<(&str, &str), usize> = HashMap::new();

		for edge in &elements.edges {
			let (Some(&src), Some(&tgt)) = (id_to_idx.get(&edge.source), id_to_idx.get(&edge.target))
			else {
				warn!(
					"Edge {:?} references a missing node ({} -> {})",
					edge.id, edge.source, edge.target
				);
				continue;
			};
			let key = pair_key(&edge.source, &edge.target);
			let n = pair_sizes[&key];
			let seen = pair_seen.entry(key).or_default();
			let i = *seen;
			*seen += 1;
			let mut curve = (i as f64 - (n as f64 - 1.0) / 2.0) * CURVE_STEP;
			if edge.source > edge.target {
				curve = -curve;
			}
			if src != tgt {
				self.graph.add_edge(src, tgt, EdgeData::default());
			}
			self.edges.push(EdgeInfo {
				source: src,
				target: tgt,
				weight: edge.weight,
				curve,
			});
		}
		debug!(
			"Loaded {} nodes and {} edges into the graph",
			self.node_count(),
			self.edge_count()
		);
	}

	/// Seed nodes on a circle and restart the animated force-directed layout.
	pub fn run_layout(&mut self) {
		let n = self.node_count().max(1) as f64;
		let radius = (n * NODE_RADIUS * 3.0 / (2.0 * PI)).max(100.0);
		let mut i = 0.0;
		self.graph.visit_nodes_mut(|node| {
			let angle = i * 2.0 * PI / n;
			node.data.x = (radius * angle.cos()) as f32;
			node.data.y = (radius * angle.sin()) as f32;
			node.data.is_anchor = false;
			i += 1.0;
		});
		self.layout_elapsed = 0.0;
		self.animation_running = true;
	}

	/// Center and scale the viewport onto the nodes. No-op on an empty graph.
	pub fn fit(&mut self, padding: f64) {
		let mut points = Vec::new();
		self.graph
			.visit_nodes(|node| points.push((node.x() as f64, node.y() as f64)));
		if let Some(bounds) = Bounds::around(points, NODE_RADIUS) {
			self.transform = fit_transform(bounds, self.width, self.height, padding);
		}
	}

	/// Advance the layout by `dt` seconds. Returns true on the tick the layout finishes.
	pub fn tick(&mut self, dt: f32) -> bool {
		if !self.animation_running {
			return false;
		}
		let before = self.positions();
		self.graph.update(dt);
		self.layout_elapsed += dt as f64;

		let after = self.positions();
		let moved = if after.is_empty() {
			0.0
		} else {
			before
				.iter()
				.zip(&after)
				.map(|(a, b)| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt())
				.sum::<f64>() / after.len() as f64
		};

		let settled = self.layout_elapsed >= LAYOUT_WARMUP && moved < self.layout.settle_threshold;
		if settled || self.layout_elapsed >= self.layout.max_seconds {
			self.animation_running = false;
			self.fit(self.fit_padding);
			debug!("Layout finished after {:.2}s", self.layout_elapsed);
			return true;
		}
		false
	}

	fn positions(&self) -> Vec<(f64, f64)> {
		let mut out = Vec::with_capacity(self.node_count());
		self.graph
			.visit_nodes(|node| out.push((node.x() as f64, node.y() as f64)));
		out
	}

	pub fn node_count(&self) -> usize {
		let mut count = 0;
		self.graph.visit_nodes(|_| count += 1);
		count
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < NODE_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn select(&mut self, node: Option<DefaultNodeIdx>) {
		if let Some(idx) = node {
			self.graph.visit_nodes(|n| {
				if n.index() == idx {
					debug!("Selected node {:?}", n.data.user_data.id);
				}
			});
		}
		self.selected = node;
	}

	pub fn is_selected(&self, idx: DefaultNodeIdx) -> bool {
		self.selected == Some(idx)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

fn pair_key<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
	if a <= b { (a, b) } else { (b, a) }
}
