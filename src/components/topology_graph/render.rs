use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{NODE_RADIUS, TopologyGraphState};

const BACKGROUND: &str = "#ffffff";
const EDGE_RGB: &str = "136, 136, 136";
const OUTLINE: &str = "#222222";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &TopologyGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &TopologyGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, arrow_size) = (1.0 / k, 7.0 / k);
	let t = ease_out_cubic(state.hover.highlight_t);
	let index_of = |id: &str| state.view.nodes.iter().position(|n| n.id == id);

	for edge in &state.view.edges {
		let ((x1, y1), (x2, y2)) = (state.to_graph(edge.from), state.to_graph(edge.to));
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let is_highlighted = match (index_of(&edge.source), index_of(&edge.target)) {
			(Some(s), Some(d)) => state.is_highlighted(s) && state.is_highlighted(d),
			_ => false,
		};
		let alpha = if is_highlighted { 0.7 + 0.3 * t } else { 0.7 - 0.5 * t };
		let width = if is_highlighted {
			line_width * (1.0 + t)
		} else {
			line_width
		};

		let color = format!("rgba({EDGE_RGB}, {alpha})");
		ctx.set_stroke_style_str(&color);
		ctx.set_line_width(width);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(
			x2 - ux * (NODE_RADIUS + arrow_size),
			y2 - uy * (NODE_RADIUS + arrow_size),
		);
		ctx.stroke();

		ctx.set_fill_style_str(&color);
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(state: &TopologyGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let font = format!("{}px sans-serif", 11.0 / k.max(0.5));

	for (idx, node) in state.view.nodes.iter().enumerate() {
		let (x, y) = state.to_graph(node.position);
		let highlighted = state.is_highlighted(idx);
		let alpha = if has_highlight && !highlighted {
			1.0 - 0.6 * t
		} else {
			1.0
		};
		let radius = if state.is_hovered(idx) {
			NODE_RADIUS * (1.0 + 0.25 * t)
		} else {
			NODE_RADIUS
		};

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.color);
		ctx.fill();
		ctx.set_stroke_style_str(OUTLINE);
		ctx.set_line_width(2.0 / k);
		ctx.stroke();

		// Hovered nodes show "id (kind)", the rest just the id
		let text = if state.is_hovered(idx) && t > 0.01 {
			node.label.as_str()
		} else {
			node.id.as_str()
		};
		ctx.set_fill_style_str(OUTLINE);
		ctx.set_font(&font);
		ctx.set_text_align("center");
		let _ = ctx.fill_text(text, x, y + radius + 14.0 / k.max(0.5));
		ctx.set_global_alpha(1.0);
	}
}
