use std::time::Duration;

use gloo_timers::future::sleep;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;

use crate::config::DashboardConfig;
use crate::pipeline::{ARTIFACTS, BUILD_LOG_STEPS, format_log_line};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
	Idle,
	Streaming,
	Done,
}

/// Streams the simulated container build log one step at a time.
#[component]
pub fn BuildLog() -> impl IntoView {
	let interval: Duration = use_context::<DashboardConfig>()
		.map(|c| c.log_step_interval)
		.unwrap_or(Duration::from_millis(600));
	let lines = RwSignal::new(Vec::<String>::new());
	let phase = RwSignal::new(Phase::Idle);

	let start = move |_: leptos::ev::MouseEvent| {
		if phase.get_untracked() == Phase::Streaming {
			return;
		}
		lines.set(Vec::new());
		phase.set(Phase::Streaming);
		spawn_local(async move {
			for step in BUILD_LOG_STEPS {
				let line = format_log_line(chrono::Local::now().time(), step);
				debug!("{line}");
				lines.update(|l| l.push(line));
				sleep(interval).await;
			}
			phase.set(Phase::Done);
		});
	};

	view! {
		<section class="panel build-log">
			<div class="build-log-main">
				<button on:click=start disabled=move || phase.get() == Phase::Streaming>
					"Simulate Build Log"
				</button>
				{move || match phase.get() {
					Phase::Idle => view! {
						<p class="notice info">
							"Click 'Simulate Build Log' to stream a sample container build log."
						</p>
					}
						.into_any(),
					Phase::Streaming | Phase::Done => view! {
						<pre class="log"><code>{move || lines.get().join("\n")}</code></pre>
					}
						.into_any(),
				}}
				{move || (phase.get() == Phase::Done).then(|| view! {
					<p class="notice success">"Build simulation complete (logs streamed above)."</p>
				})}
			</div>
			<div class="artifacts">
				<h4>"Artifacts"</h4>
				<ul>{ARTIFACTS.iter().map(|a| view! { <li>{*a}</li> }).collect_view()}</ul>
			</div>
		</section>
	}
}
