use leptos::prelude::*;

use crate::pipeline::{STAGES, stage_bars};

const PLOT_WIDTH: f64 = 700.0;
const PLOT_HEIGHT: f64 = 220.0;
const AXIS_PAD: f64 = 24.0;

/// Bar chart of simulated stage durations.
#[component]
pub fn StageTimeline() -> impl IntoView {
	let bars = stage_bars(STAGES, PLOT_WIDTH, PLOT_HEIGHT);
	let view_box = format!("0 0 {} {}", PLOT_WIDTH, PLOT_HEIGHT + AXIS_PAD);
	let axis_y = (PLOT_HEIGHT + 16.0).to_string();

	view! {
		<section class="panel stage-timeline">
			<h4>"Stage durations (minutes)"</h4>
			<svg viewBox=view_box width="100%" role="img">
				{bars
					.into_iter()
					.map(|bar| {
						let label_x = (bar.x + bar.width / 2.0).to_string();
						let value_y = (bar.y - 4.0).to_string();
						view! {
							<g>
								<rect
									x=bar.x.to_string()
									y=bar.y.to_string()
									width=bar.width.to_string()
									height=bar.height.to_string()
									fill="#636EFA"
								/>
								<text x=label_x.clone() y=value_y text-anchor="middle" font-size="11">
									{bar.value.to_string()}
								</text>
								<text x=label_x y=axis_y.clone() text-anchor="middle" font-size="12">
									{bar.label}
								</text>
							</g>
						}
					})
					.collect_view()}
			</svg>
		</section>
	}
}
