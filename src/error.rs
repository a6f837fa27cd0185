//! Error types for the run fetcher and the topology model.

use thiserror::Error;

/// Why a remote workflow-run fetch produced no data.
///
/// [`RunFetcher::fetch_runs`](crate::runs::RunFetcher::fetch_runs) collapses
/// all of these into an empty result; the variants only surface in logs and
/// through `try_fetch_runs`.
#[derive(Debug, Error)]
pub enum FetchError {
	/// Connection, DNS, TLS or body-read failure.
	#[error("request failed: {0}")]
	Request(#[from] reqwest::Error),

	/// The request did not finish within the configured timeout.
	#[error("request timed out")]
	Timeout,

	/// The server answered with a non-2xx status.
	#[error("unexpected HTTP status {0}")]
	Status(u16),

	/// The body was not the expected JSON document.
	#[error("malformed response body: {0}")]
	Decode(#[from] serde_json::Error),
}

/// A topology whose edges or nodes are inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
	/// Two nodes share an identifier.
	#[error("duplicate node id `{0}`")]
	DuplicateNode(String),

	/// An edge names a node that is not in the node set.
	#[error("edge {from} -> {to} references unknown node `{missing}`")]
	UnknownEndpoint {
		/// Edge source id.
		from: String,
		/// Edge target id.
		to: String,
		/// The endpoint that could not be resolved.
		missing: String,
	},
}
