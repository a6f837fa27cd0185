use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::graph::{NodeKind, Topology};

/// Color used for kinds outside the table.
pub const FALLBACK_COLOR: &str = "#00A896";

/// Fixed kind → color lookup.
pub fn kind_color(kind: &NodeKind) -> &'static str {
	match kind {
		NodeKind::Cluster => "#114B5F",
		NodeKind::Node => "#028090",
		NodeKind::Pod => "#00A896",
		NodeKind::Service => "#02C39A",
		NodeKind::Other(_) => FALLBACK_COLOR,
	}
}

/// Knobs for the spring embedding.
#[derive(Clone, Debug)]
pub struct LayoutSettings {
	/// Seeds the initial positions; same seed, same layout.
	pub seed: u64,
	/// Simulation steps to run.
	pub iterations: usize,
	/// Time step per iteration.
	pub dt: f32,
	/// Half-width of the square the initial positions are drawn from.
	pub spread: f32,
}

impl Default for LayoutSettings {
	fn default() -> Self {
		Self {
			seed: 42,
			iterations: 400,
			dt: 0.016,
			spread: 100.0,
		}
	}
}

/// Layout-space coordinate; both axes within `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downward on the canvas.
	pub y: f64,
}

/// A positioned, colored node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
	/// Node id.
	pub id: String,
	/// `"{id} ({kind})"`.
	pub label: String,
	/// Node kind.
	pub kind: NodeKind,
	/// Layout-space position.
	pub position: Point,
	/// Fill color from [`kind_color`].
	pub color: &'static str,
}

/// An edge as a segment between its endpoints' positions.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeView {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Source position.
	pub from: Point,
	/// Target position.
	pub to: Point,
}

/// Positioned nodes and edge segments, ready to draw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TopologyView {
	/// One entry per topology node, same order.
	pub nodes: Vec<NodeView>,
	/// One entry per topology edge, same order.
	pub edges: Vec<EdgeView>,
}

impl TopologyView {
	/// Indices of the nodes sharing an edge with `idx`.
	pub fn neighbors(&self, idx: usize) -> Vec<usize> {
		let id = &self.nodes[idx].id;
		self.edges
			.iter()
			.filter_map(|edge| {
				if &edge.source == id {
					self.position_of(&edge.target)
				} else if &edge.target == id {
					self.position_of(&edge.source)
				} else {
					None
				}
			})
			.collect()
	}

	fn position_of(&self, id: &str) -> Option<usize> {
		self.nodes.iter().position(|node| node.id == id)
	}
}

/// Force-directed layout of `topology`.
///
/// Pure in `(topology, settings)`: the only randomness is the seeded
/// initial placement.
pub fn layout_topology(topology: &Topology, settings: &LayoutSettings) -> TopologyView {
	let positions = spring_positions(topology, settings);

	let nodes = topology
		.nodes()
		.iter()
		.zip(&positions)
		.map(|(node, &position)| NodeView {
			id: node.id.clone(),
			label: format!("{} ({})", node.id, node.kind),
			kind: node.kind.clone(),
			position,
			color: kind_color(&node.kind),
		})
		.collect();

	let edges = topology
		.edges()
		.iter()
		.zip(topology.links())
		.map(|(edge, &(s, t))| EdgeView {
			source: edge.source.clone(),
			target: edge.target.clone(),
			from: positions[s],
			to: positions[t],
		})
		.collect();

	TopologyView { nodes, edges }
}

fn spring_positions(topology: &Topology, settings: &LayoutSettings) -> Vec<Point> {
	let mut rng = StdRng::seed_from_u64(settings.seed);
	let mut graph: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	});

	let spread = settings.spread.max(f32::EPSILON);
	let indices: Vec<_> = (0..topology.nodes().len())
		.map(|i| {
			graph.add_node(NodeData {
				x: rng.random_range(-spread..spread),
				y: rng.random_range(-spread..spread),
				mass: 10.0,
				is_anchor: false,
				user_data: i,
			})
		})
		.collect();

	for &(s, t) in topology.links() {
		graph.add_edge(indices[s], indices[t], EdgeData::default());
	}

	for _ in 0..settings.iterations {
		graph.update(settings.dt);
	}

	let mut raw = vec![(0.0f64, 0.0f64); indices.len()];
	graph.visit_nodes(|node| {
		raw[node.data.user_data] = (node.x() as f64, node.y() as f64);
	});
	rescale(&raw)
}

/// Centers on the mean and scales the largest coordinate to 1.
fn rescale(raw: &[(f64, f64)]) -> Vec<Point> {
	if raw.is_empty() {
		return Vec::new();
	}
	let n = raw.len() as f64;
	let (cx, cy) = raw
		.iter()
		.fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
	let (cx, cy) = (cx / n, cy / n);

	let extent = raw
		.iter()
		.map(|(x, y)| (x - cx).abs().max((y - cy).abs()))
		.fold(0.0, f64::max);
	let scale = if extent > f64::EPSILON { 1.0 / extent } else { 0.0 };

	raw.iter()
		.map(|(x, y)| Point {
			x: (x - cx) * scale,
			y: (y - cy) * scale,
		})
		.collect()
}
