use std::cell::Cell;
use std::time::Duration;

use pipeline_visualizer::config::DashboardConfig;
use pipeline_visualizer::error::FetchError;
use pipeline_visualizer::runs::{Conclusion, RunFetcher, RunSimulator, RunStatus, Transport};
use pipeline_visualizer::topology::{
	FALLBACK_COLOR, NodeKind, Topology, TopologyEdge, TopologyNode, kind_color, layout_topology,
};

struct CountingTransport {
	body: &'static str,
	calls: Cell<usize>,
}

impl Transport for CountingTransport {
	async fn get(&self, _url: &str, _timeout: Duration) -> Result<String, FetchError> {
		self.calls.set(self.calls.get() + 1);
		Ok(self.body.to_string())
	}
}

#[tokio::test]
async fn fetcher_with_default_config_caches_per_repo() {
	let config = DashboardConfig::default();
	let transport = CountingTransport {
		body: r#"{"workflow_runs":[{"id":5,"status":"queued"},{"id":4,"status":"completed","conclusion":"failure"}]}"#,
		calls: Cell::new(0),
	};
	let fetcher = RunFetcher::new(transport, config.fetch);

	let first = fetcher.fetch_runs("octo/demo").await;
	let second = fetcher.fetch_runs("octo/demo").await;

	assert_eq!(first.len(), 2);
	assert_eq!(first, second);
	assert_eq!(first[1].conclusion.as_deref(), Some("failure"));
	assert_eq!(fetcher.transport().calls.get(), 1);
}

#[test]
fn simulated_history_is_reproducible_and_consistent() {
	let config = DashboardConfig::default();
	let sim = RunSimulator::new(config.simulator_seed);
	let a = sim.simulate_runs(config.simulated_runs);
	let b = sim.simulate_runs(config.simulated_runs);

	let outcome = |runs: &[pipeline_visualizer::runs::SimulatedRun]| {
		runs.iter().map(|r| (r.status, r.conclusion)).collect::<Vec<_>>()
	};
	assert_eq!(outcome(&a), outcome(&b));

	for run in &a {
		match (run.status, run.conclusion) {
			(RunStatus::Completed, Some(Conclusion::Success | Conclusion::Failure | Conclusion::Neutral)) => {}
			(RunStatus::Queued | RunStatus::InProgress, None) => {}
			other => panic!("inconsistent run {other:?}"),
		}
	}
}

#[test]
fn demo_topology_renders_seven_nodes_six_edges() {
	let config = DashboardConfig::default();
	let view = layout_topology(&Topology::demo_cluster(), &config.layout);

	assert_eq!(view.nodes.len(), 7);
	assert_eq!(view.edges.len(), 6);
	for node in &view.nodes {
		assert_eq!(node.color, kind_color(&node.kind));
	}
	assert_eq!(view, layout_topology(&Topology::demo_cluster(), &config.layout));
}

#[test]
fn custom_topology_validates_and_colors_unknown_kinds() {
	let topology = Topology::new(
		vec![
			TopologyNode::new("cluster", NodeKind::Cluster),
			TopologyNode::new("cm-app", NodeKind::Other("configmap".into())),
		],
		vec![TopologyEdge::new("cluster", "cm-app")],
	)
	.expect("valid topology");
	let view = layout_topology(&topology, &DashboardConfig::default().layout);
	assert_eq!(view.nodes[1].color, FALLBACK_COLOR);

	let broken = Topology::new(
		vec![TopologyNode::new("cluster", NodeKind::Cluster)],
		vec![TopologyEdge::new("ghost", "cluster")],
	);
	assert!(broken.is_err());
}
