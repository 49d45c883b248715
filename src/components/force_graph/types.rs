use serde::Deserialize;
use serde_json::Value;

/// Knowledge-graph response as sent by the backend.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphPayload {
	/// Missing and `null` both mean empty.
	#[serde(default)]
	pub nodes: Option<Vec<PayloadNode>>,
	#[serde(default)]
	pub edges: Option<Vec<PayloadEdge>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PayloadNode {
	pub id: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PayloadEdge {
	#[serde(default)]
	pub id: Option<String>,
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub weight: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub weight: f64,
}

/// Nodes and edges ready to be loaded into a graph instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphElements {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

impl From<GraphPayload> for GraphElements {
	fn from(payload: GraphPayload) -> Self {
		let nodes = payload
			.nodes
			.unwrap_or_default()
			.into_iter()
			.map(|n| GraphNode {
				label: n.id.clone(),
				id: n.id,
			})
			.collect();

		// An empty id or a zero weight counts as missing.
		let edges = payload
			.edges
			.unwrap_or_default()
			.into_iter()
			.enumerate()
			.map(|(idx, e)| GraphEdge {
				id: e
					.id
					.filter(|id| !id.is_empty())
					.unwrap_or_else(|| format!("{}->{}-{}", e.source, e.target, idx)),
				weight: e.weight.filter(|w| *w != 0.0 && !w.is_nan()).unwrap_or(1.0),
				source: e.source,
				target: e.target,
			})
			.collect();

		Self { nodes, edges }
	}
}

impl GraphElements {
	pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
		let payload: GraphPayload = serde_json::from_value(value)?;
		Ok(payload.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn edge_defaults_id_and_weight() {
		let elements =
			GraphElements::from_value(json!({ "edges": [{ "source": "a", "target": "b" }] }))
				.unwrap();
		assert!(elements.nodes.is_empty());
		assert_eq!(
			elements.edges,
			vec![GraphEdge {
				id: "a->b-0".into(),
				source: "a".into(),
				target: "b".into(),
				weight: 1.0,
			}]
		);
	}

	#[test]
	fn default_id_uses_position_in_array() {
		let elements = GraphElements::from_value(json!({
			"edges": [
				{ "id": "keep", "source": "a", "target": "b", "weight": 3 },
				{ "source": "b", "target": "c", "weight": 0 },
				{ "id": "", "source": "c", "target": "a" },
			]
		}))
		.unwrap();
		let ids: Vec<&str> = elements.edges.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(ids, ["keep", "b->c-1", "c->a-2"]);
		let weights: Vec<f64> = elements.edges.iter().map(|e| e.weight).collect();
		assert_eq!(weights, [3.0, 1.0, 1.0]);
	}

	#[test]
	fn node_label_is_its_id() {
		let elements =
			GraphElements::from_value(json!({ "nodes": [{ "id": "Plato" }, { "id": "Athens" }] }))
				.unwrap();
		assert_eq!(
			elements.nodes[1],
			GraphNode {
				id: "Athens".into(),
				label: "Athens".into()
			}
		);
	}

	#[test]
	fn missing_arrays_are_empty() {
		let elements = GraphElements::from_value(json!({ "status": "ok" })).unwrap();
		assert_eq!(elements, GraphElements::default());
	}

	#[test]
	fn null_arrays_are_empty() {
		let elements = GraphElements::from_value(json!({ "nodes": null, "edges": null })).unwrap();
		assert_eq!(elements, GraphElements::default());
	}

	#[test]
	fn malformed_edges_are_rejected() {
		assert!(GraphElements::from_value(json!({ "edges": [{ "source": "a" }] })).is_err());
	}
}
