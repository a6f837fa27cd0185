use std::collections::HashMap;
use std::fmt;

use crate::error::TopologyError;

/// What a topology node stands for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// The cluster root.
	Cluster,
	/// A worker machine.
	Node,
	/// A scheduled workload.
	Pod,
	/// A stable network endpoint in front of pods.
	Service,
	/// Anything the color table does not model.
	Other(String),
}

impl NodeKind {
	/// Lower-case kind name, as shown in labels.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Cluster => "cluster",
			Self::Node => "node",
			Self::Pod => "pod",
			Self::Service => "service",
			Self::Other(kind) => kind,
		}
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A node, identified by a unique id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopologyNode {
	/// Unique within a topology.
	pub id: String,
	/// Picks the node color.
	pub kind: NodeKind,
}

/// A directed edge between two node ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopologyEdge {
	/// Id of the node the edge starts at.
	pub source: String,
	/// Id of the node the edge points to.
	pub target: String,
}

impl TopologyNode {
	/// Node `id` of the given kind.
	pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
		Self { id: id.into(), kind }
	}
}

impl TopologyEdge {
	/// Edge `source -> target`.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}
}

/// A directed node/edge set whose edges are known to resolve.
///
/// Edges are kept both by id and as indices into `nodes`.
#[derive(Clone, Debug)]
pub struct Topology {
	nodes: Vec<TopologyNode>,
	edges: Vec<TopologyEdge>,
	links: Vec<(usize, usize)>,
}

impl Topology {
	/// Validates ids and edge endpoints.
	pub fn new(nodes: Vec<TopologyNode>, edges: Vec<TopologyEdge>) -> Result<Self, TopologyError> {
		let mut index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			if index.insert(node.id.as_str(), i).is_some() {
				return Err(TopologyError::DuplicateNode(node.id.clone()));
			}
		}

		let resolve = |edge: &TopologyEdge, id: &str| {
			index.get(id).copied().ok_or_else(|| TopologyError::UnknownEndpoint {
				from: edge.source.clone(),
				to: edge.target.clone(),
				missing: id.to_string(),
			})
		};
		let links = edges
			.iter()
			.map(|edge| Ok((resolve(edge, &edge.source)?, resolve(edge, &edge.target)?)))
			.collect::<Result<Vec<_>, TopologyError>>()?;

		Ok(Self { nodes, edges, links })
	}

	/// The simulated cluster: one cluster, two nodes, three pods, one
	/// service, six edges.
	pub fn demo_cluster() -> Self {
		let nodes = vec![
			TopologyNode::new("cluster", NodeKind::Cluster),
			TopologyNode::new("node-1", NodeKind::Node),
			TopologyNode::new("node-2", NodeKind::Node),
			TopologyNode::new("pod-frontend", NodeKind::Pod),
			TopologyNode::new("pod-backend", NodeKind::Pod),
			TopologyNode::new("pod-db", NodeKind::Pod),
			TopologyNode::new("svc-frontend", NodeKind::Service),
		];
		let links = vec![(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (6, 3)];
		let edges = links
			.iter()
			.map(|&(s, t)| TopologyEdge::new(nodes[s].id.clone(), nodes[t].id.clone()))
			.collect();
		Self { nodes, edges, links }
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> &[TopologyNode] {
		&self.nodes
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> &[TopologyEdge] {
		&self.edges
	}

	/// Edges as `(source, target)` indices into [`nodes`](Self::nodes).
	pub fn links(&self) -> &[(usize, usize)] {
		&self.links
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn demo_cluster_is_consistent() {
		let demo = Topology::demo_cluster();
		let rebuilt = Topology::new(demo.nodes().to_vec(), demo.edges().to_vec())
			.expect("demo cluster validates");

		assert_eq!(rebuilt.nodes().len(), 7);
		assert_eq!(rebuilt.edges().len(), 6);
		assert_eq!(rebuilt.links(), demo.links());
		assert_eq!(
			demo.edges()[5],
			TopologyEdge::new("svc-frontend", "pod-frontend")
		);
	}

	#[test]
	fn rejects_unknown_endpoint() {
		let err = Topology::new(
			vec![TopologyNode::new("cluster", NodeKind::Cluster)],
			vec![TopologyEdge::new("cluster", "node-9")],
		)
		.unwrap_err();

		assert_eq!(
			err,
			TopologyError::UnknownEndpoint {
				from: "cluster".into(),
				to: "node-9".into(),
				missing: "node-9".into(),
			}
		);
		assert_eq!(
			err.to_string(),
			"edge cluster -> node-9 references unknown node `node-9`"
		);
	}

	#[test]
	fn rejects_duplicate_ids() {
		let err = Topology::new(
			vec![
				TopologyNode::new("pod-a", NodeKind::Pod),
				TopologyNode::new("pod-a", NodeKind::Pod),
			],
			vec![],
		)
		.unwrap_err();
		assert_eq!(err, TopologyError::DuplicateNode("pod-a".into()));
	}

	#[test]
	fn other_kind_keeps_its_name() {
		assert_eq!(NodeKind::Other("ingress".into()).to_string(), "ingress");
		assert_eq!(NodeKind::Service.to_string(), "service");
	}
}
