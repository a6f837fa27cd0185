use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;

use crate::config::DashboardConfig;
use crate::runs::{HttpTransport, RunFetcher, RunRow, RunSimulator};

/// Which code path the current controls select.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunsPlan {
	Simulate,
	Fetch(String),
}

/// Remote fetch only when a repo is given and the simulator is not forced.
pub fn plan_runs(repo: &str, force_simulator: bool) -> RunsPlan {
	let repo = repo.trim();
	if repo.is_empty() || force_simulator {
		RunsPlan::Simulate
	} else {
		RunsPlan::Fetch(repo.to_string())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Notice {
	SimulatedOnly,
	Loading,
	NothingFetched,
	Fetched,
}

impl Notice {
	fn text(self) -> &'static str {
		match self {
			Self::SimulatedOnly => "Showing simulated CI history (no GitHub fetch).",
			Self::Loading => "Fetching workflow runs...",
			Self::NothingFetched => {
				"No runs fetched (API rate-limit or repo not found). Use simulator or try again later."
			}
			Self::Fetched => "",
		}
	}

	fn class(self) -> &'static str {
		match self {
			Self::NothingFetched => "notice warning",
			_ => "notice info",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
struct PanelState {
	notice: Notice,
	rows: Vec<RunRow>,
}

/// Recent workflow runs, remote or simulated.
#[component]
pub fn RunsPanel(
	#[prop(into)] repo: Signal<String>,
	#[prop(into)] force_simulator: Signal<bool>,
	#[prop(into)] refresh: Signal<u32>,
) -> impl IntoView {
	let config = use_context::<DashboardConfig>().unwrap_or_default();
	let fetcher = Rc::new(RunFetcher::new(HttpTransport::new(), config.fetch.clone()));
	let simulator = RunSimulator::new(config.simulator_seed);
	let sim_count = config.simulated_runs;
	let simulated_rows = move || {
		simulator
			.simulate_runs(sim_count)
			.iter()
			.map(RunRow::from)
			.collect::<Vec<_>>()
	};

	let panel = RwSignal::new(PanelState {
		notice: Notice::SimulatedOnly,
		rows: Vec::new(),
	});
	// Results of superseded fetches are dropped.
	let generation = Rc::new(Cell::new(0u64));

	Effect::new(move |_| {
		refresh.track();
		let current = generation.get() + 1;
		generation.set(current);

		match plan_runs(&repo.get(), force_simulator.get()) {
			RunsPlan::Simulate => panel.set(PanelState {
				notice: Notice::SimulatedOnly,
				rows: simulated_rows(),
			}),
			RunsPlan::Fetch(repo) => {
				panel.update(|p| p.notice = Notice::Loading);
				let (fetcher, generation) = (fetcher.clone(), generation.clone());
				spawn_local(async move {
					let runs = fetcher.fetch_runs(&repo).await;
					if generation.get() != current {
						return;
					}
					let state = if runs.is_empty() {
						info!("falling back to simulated history for {repo}");
						PanelState {
							notice: Notice::NothingFetched,
							rows: simulated_rows(),
						}
					} else {
						PanelState {
							notice: Notice::Fetched,
							rows: runs.iter().map(RunRow::from).collect(),
						}
					};
					panel.set(state);
				});
			}
		}
	});

	view! {
		<section class="panel runs-panel">
			<h3>"Recent Workflow Runs"</h3>
			{move || {
				let notice = panel.with(|p| p.notice);
				(notice != Notice::Fetched)
					.then(|| view! { <p class=notice.class()>{notice.text()}</p> })
			}}
			<table class="runs-table">
				<thead>
					<tr>
						<th>"created_at"</th>
						<th>"name"</th>
						<th>"status"</th>
						<th>"conclusion"</th>
						<th>"run"</th>
						<th></th>
					</tr>
				</thead>
				<tbody>
					{move || {
						panel
							.get()
							.rows
							.into_iter()
							.map(|row| {
								let created = row.created_label();
								let conclusion = row.conclusion_label().to_string();
								let status_class = format!("status {}", row.status);
								view! {
									<tr>
										<td>{created}</td>
										<td>{row.name.unwrap_or_default()}</td>
										<td class=status_class>{row.status}</td>
										<td>{conclusion}</td>
										<td>{row.run_number.map(|n| n.to_string()).unwrap_or_default()}</td>
										<td>
											{row.html_url.map(|url| view! {
												<a href=url target="_blank" rel="noopener">"open"</a>
											})}
										</td>
									</tr>
								}
							})
							.collect_view()
					}}
				</tbody>
			</table>
		</section>
	}
}
