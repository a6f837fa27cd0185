use leptos::prelude::*;

use crate::components::{
	BuildLog, Controls, Drills, KpiTiles, RepoNotes, RunsPanel, StageTimeline, TopologyGraphCanvas,
};
use crate::config::DashboardConfig;
use crate::topology::{Topology, layout_topology};

/// The dashboard.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<DashboardConfig>().unwrap_or_default();

	let repo = RwSignal::new(String::new());
	let force_simulator = RwSignal::new(true);
	let refresh = RwSignal::new(0u32);

	// Laid out once per page render
	let topology = layout_topology(&Topology::demo_cluster(), &config.layout);
	let topology = Signal::derive(move || topology.clone());

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="dashboard">
				<Controls repo=repo force_simulator=force_simulator refresh=refresh />
				<main>
					<h1>"DevOps Pipeline Visualizer"</h1>
					<p class="subtitle">
						"Visualizes CI/CD, Docker build logs, and a Kubernetes cluster map. Enter a public GitHub repo (owner/repo) to fetch recent GitHub Actions runs, or use the simulator."
					</p>

					<h2>"CI/CD Overview"</h2>
					<div class="row">
						<RunsPanel repo=repo force_simulator=force_simulator refresh=refresh />
						<KpiTiles />
					</div>

					<h2>"Build Log (Simulated Streaming)"</h2>
					<BuildLog />

					<h2>"Pipeline Timeline (Simulated)"</h2>
					<StageTimeline />

					<h2>"Kubernetes Cluster Map (Simulated)"</h2>
					<div class="panel topology">
						<TopologyGraphCanvas topology=topology height=config.topology_height />
					</div>

					<h2>"Interactive Drills"</h2>
					<Drills />
					<RepoNotes />

					<footer>
						"DevOps Pipeline Visualizer. Not a production CI/CD system; a portfolio demo."
					</footer>
				</main>
			</div>
		</ErrorBoundary>
	}
}
