use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Identifier of an upstream workflow run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RunId {
	/// Numeric id, as GitHub returns it.
	Number(u64),
	/// Any other non-empty textual id.
	Text(String),
}

impl fmt::Display for RunId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(n) => write!(f, "{n}"),
			Self::Text(s) => f.write_str(s),
		}
	}
}

/// One recorded workflow run, normalized from the upstream listing.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkflowRun {
	/// Upstream identifier.
	pub id: RunId,
	/// Workflow name, or the workflow id when the name is missing.
	pub name: Option<String>,
	/// `queued`, `in_progress`, `completed`, ... (`unknown` when omitted).
	pub status: String,
	/// Terminal outcome; only meaningful for completed runs.
	pub conclusion: Option<String>,
	/// Creation time.
	pub created_at: Option<DateTime<Utc>>,
	/// Last update time.
	pub updated_at: Option<DateTime<Utc>>,
	/// Sequential run number within the workflow.
	pub run_number: Option<u64>,
	/// Canonical web URL.
	pub html_url: Option<String>,
}

/// Top-level body of `GET /repos/{owner}/{name}/actions/runs`.
#[derive(Debug, Deserialize)]
pub(crate) struct RunsEnvelope {
	#[serde(default)]
	pub workflow_runs: Vec<Value>,
}

impl WorkflowRun {
	/// Status used when upstream leaves it out.
	pub const UNKNOWN_STATUS: &'static str = "unknown";

	/// Project one upstream run record.
	///
	/// Missing or mistyped optional fields become `None`. Returns `None`
	/// only when the record has no usable identifier.
	pub fn from_api(entry: &Value) -> Option<Self> {
		let id = match entry.get("id")? {
			Value::Number(n) => RunId::Number(n.as_u64()?),
			Value::String(s) if !s.is_empty() => RunId::Text(s.clone()),
			_ => return None,
		};

		let name = string_field(entry, "name").or_else(|| match entry.get("workflow_id") {
			Some(Value::Number(n)) => Some(n.to_string()),
			Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
			_ => None,
		});

		Some(Self {
			id,
			name,
			status: string_field(entry, "status")
				.unwrap_or_else(|| Self::UNKNOWN_STATUS.to_string()),
			conclusion: string_field(entry, "conclusion"),
			created_at: time_field(entry, "created_at"),
			updated_at: time_field(entry, "updated_at"),
			run_number: entry.get("run_number").and_then(Value::as_u64),
			html_url: string_field(entry, "html_url"),
		})
	}
}

fn string_field(entry: &Value, key: &str) -> Option<String> {
	entry
		.get(key)
		.and_then(Value::as_str)
		.filter(|s| !s.is_empty())
		.map(str::to_string)
}

fn time_field(entry: &Value, key: &str) -> Option<DateTime<Utc>> {
	let raw = entry.get(key)?.as_str()?;
	DateTime::parse_from_rfc3339(raw)
		.ok()
		.map(|t| t.with_timezone(&Utc))
}
