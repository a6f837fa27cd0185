use chrono::{DateTime, Utc};

use super::model::WorkflowRun;
use super::simulate::SimulatedRun;

/// Row of the runs table, shared by remote and simulated history.
#[derive(Clone, Debug, PartialEq)]
pub struct RunRow {
	/// Stable key for list rendering.
	pub key: String,
	/// When the run was created.
	pub created_at: Option<DateTime<Utc>>,
	/// Workflow name.
	pub name: Option<String>,
	/// Status string.
	pub status: String,
	/// Conclusion string, when there is one.
	pub conclusion: Option<String>,
	/// Run number.
	pub run_number: Option<u64>,
	/// Link to the run.
	pub html_url: Option<String>,
}

impl RunRow {
	/// Creation time as `YYYY-MM-DD HH:MM`, or an em placeholder.
	pub fn created_label(&self) -> String {
		self.created_at
			.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
			.unwrap_or_else(|| "—".to_string())
	}

	/// Conclusion or an empty cell.
	pub fn conclusion_label(&self) -> &str {
		self.conclusion.as_deref().unwrap_or("")
	}
}

impl From<&WorkflowRun> for RunRow {
	fn from(run: &WorkflowRun) -> Self {
		Self {
			key: run.id.to_string(),
			created_at: run.created_at,
			name: run.name.clone(),
			status: run.status.clone(),
			conclusion: run.conclusion.clone(),
			run_number: run.run_number,
			html_url: run.html_url.clone(),
		}
	}
}

impl From<&SimulatedRun> for RunRow {
	fn from(run: &SimulatedRun) -> Self {
		Self {
			key: run.time.timestamp().to_string(),
			created_at: Some(run.time),
			name: None,
			status: run.status.to_string(),
			conclusion: run.conclusion.map(|c| c.to_string()),
			run_number: None,
			html_url: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use chrono::TimeZone;

	use super::*;
	use crate::runs::{Conclusion, RunStatus};

	#[test]
	fn simulated_row_labels() {
		let time = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
		let row = RunRow::from(&SimulatedRun {
			time,
			status: RunStatus::Completed,
			conclusion: Some(Conclusion::Failure),
		});
		assert_eq!(row.created_label(), "2024-05-02 09:00");
		assert_eq!(row.status, "completed");
		assert_eq!(row.conclusion_label(), "failure");
	}

	#[test]
	fn pending_row_has_blank_conclusion() {
		let row = RunRow::from(&SimulatedRun {
			time: Utc::now(),
			status: RunStatus::Queued,
			conclusion: None,
		});
		assert_eq!(row.conclusion_label(), "");
	}
}
