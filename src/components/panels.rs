use leptos::prelude::*;

use crate::pipeline::{DRILLS, Drill, KPIS, REPO_FILES, SKILLS};

/// Static pipeline KPIs.
#[component]
pub fn KpiTiles() -> impl IntoView {
	view! {
		<section class="panel kpis">
			<h3>"Pipeline KPIs (simulated)"</h3>
			<div class="kpi-row">
				{KPIS
					.iter()
					.map(|(label, value)| {
						view! {
							<div class="kpi">
								<span class="kpi-label">{*label}</span>
								<span class="kpi-value">{*value}</span>
							</div>
						}
					})
					.collect_view()}
			</div>
		</section>
	}
}

#[component]
fn DrillToggle(drill: Drill) -> impl IntoView {
	let open = RwSignal::new(false);
	view! {
		<div class="drill">
			<button on:click=move |_| open.update(|o| *o = !*o)>{drill.title}</button>
			{move || open.get().then(|| view! { <pre class="log"><code>{drill.commands}</code></pre> })}
		</div>
	}
}

/// Command snippets a candidate would run in a real pipeline.
#[component]
pub fn Drills() -> impl IntoView {
	view! {
		<section class="panel drills">
			<p>"Click a drill to show sample commands a candidate would run in a real pipeline."</p>
			{DRILLS.iter().map(|drill| view! { <DrillToggle drill=*drill /> }).collect_view()}
		</section>
	}
}

/// Files shipped next to the demo and the skills each panel shows off.
#[component]
pub fn RepoNotes() -> impl IntoView {
	view! {
		<section class="panel repo-notes">
			<h3>"Included repo artifacts"</h3>
			<ul>
				{REPO_FILES
					.iter()
					.map(|(path, about)| view! { <li><code>{*path}</code>": "{*about}</li> })
					.collect_view()}
			</ul>
			<h3>"How this demo maps to real-world skills"</h3>
			<ul>
				{SKILLS
					.iter()
					.map(|(skill, how)| view! { <li><strong>{*skill}</strong>": "{*how}</li> })
					.collect_view()}
			</ul>
		</section>
	}
}
