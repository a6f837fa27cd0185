//! Dashboard configuration.
//!
//! All tunables live in one explicit value that the page hands to the
//! components, instead of process-wide globals.

use std::time::Duration;

use crate::runs::FetchSettings;
use crate::topology::LayoutSettings;

/// Public GitHub REST API origin.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Seed shared by the run simulator and the topology layout.
pub const DEFAULT_SEED: u64 = 42;

/// Every constant the dashboard needs, passed explicitly.
#[derive(Clone, Debug)]
pub struct DashboardConfig {
	/// Settings for the remote workflow-run fetcher.
	pub fetch: FetchSettings,
	/// Seed for the simulated CI history.
	pub simulator_seed: u64,
	/// How many simulated runs to show.
	pub simulated_runs: usize,
	/// Delay between streamed build-log lines.
	pub log_step_interval: Duration,
	/// Settings for the topology layout.
	pub layout: LayoutSettings,
	/// Height of the topology canvas in pixels.
	pub topology_height: f64,
}

impl Default for DashboardConfig {
	fn default() -> Self {
		Self {
			fetch: FetchSettings {
				api_base: GITHUB_API_BASE.to_string(),
				per_page: 10,
				timeout: Duration::from_secs(8),
				cache_ttl: Duration::from_secs(60),
			},
			simulator_seed: DEFAULT_SEED,
			simulated_runs: 12,
			log_step_interval: Duration::from_millis(600),
			layout: LayoutSettings {
				seed: DEFAULT_SEED,
				..LayoutSettings::default()
			},
			topology_height: 450.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_dashboard_constants() {
		let config = DashboardConfig::default();
		assert_eq!(config.fetch.per_page, 10);
		assert_eq!(config.fetch.timeout, Duration::from_secs(8));
		assert_eq!(config.fetch.cache_ttl, Duration::from_secs(60));
		assert_eq!(config.simulated_runs, 12);
		assert_eq!(config.layout.seed, config.simulator_seed);
	}
}
