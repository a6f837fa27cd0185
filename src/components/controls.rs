use leptos::prelude::*;

/// Sidebar inputs that gate the runs panel.
#[component]
pub fn Controls(
	repo: RwSignal<String>,
	force_simulator: RwSignal<bool>,
	refresh: RwSignal<u32>,
) -> impl IntoView {
	view! {
		<aside class="sidebar">
			<h2>"Controls"</h2>
			<p>"Enter a public GitHub repository to fetch Actions runs (optional)."</p>
			<label>
				"Public repo (owner/repo)"
				// Committed on change so typing does not fire a request per key
				<input
					type="text"
					placeholder="owner/repo"
					prop:value=move || repo.get()
					on:change=move |ev| repo.set(event_target_value(&ev))
				/>
			</label>
			<label class="checkbox">
				<input
					type="checkbox"
					prop:checked=move || force_simulator.get()
					on:change=move |ev| force_simulator.set(event_target_checked(&ev))
				/>
				"Force simulator (don't call GitHub API)"
			</label>
			<button on:click=move |_| refresh.update(|n| *n += 1)>"Refresh / Fetch"</button>

			<hr />
			<h2>"Artifacts & Examples"</h2>
			<ul>
				<li><code>"Dockerfile"</code>" and "<code>"k8s/deployment.yaml"</code>" included in repo"</li>
				<li><code>".github/workflows/ci.yml"</code>" sample is included"</li>
			</ul>
		</aside>
	}
}
