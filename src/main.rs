use leptos::prelude::*;
use pipeline_visualizer::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(|| {
		view! { <App /> }
	})
}
