//! Simulated cluster topology and its force-directed layout.

mod graph;
mod layout;

pub use graph::{NodeKind, Topology, TopologyEdge, TopologyNode};
pub use layout::{
	EdgeView, FALLBACK_COLOR, LayoutSettings, NodeView, Point, TopologyView, kind_color,
	layout_topology,
};
