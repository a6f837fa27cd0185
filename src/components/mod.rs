mod build_log;
mod controls;
mod panels;
mod runs_panel;
mod stage_timeline;
mod topology_graph;

pub use build_log::BuildLog;
pub use controls::Controls;
pub use panels::{Drills, KpiTiles, RepoNotes};
pub use runs_panel::RunsPanel;
pub use stage_timeline::StageTimeline;
pub use topology_graph::TopologyGraphCanvas;
