use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// Lifecycle state of a simulated run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunStatus {
	/// Waiting for a runner.
	Queued,
	/// Currently executing.
	InProgress,
	/// Finished; carries a [`Conclusion`].
	Completed,
}

impl RunStatus {
	/// Wire name, as GitHub spells it.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Queued => "queued",
			Self::InProgress => "in_progress",
			Self::Completed => "completed",
		}
	}
}

impl fmt::Display for RunStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Outcome of a completed simulated run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Conclusion {
	/// All jobs passed.
	Success,
	/// At least one job failed.
	Failure,
	/// Finished without a verdict.
	Neutral,
}

impl Conclusion {
	/// Wire name, as GitHub spells it.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Success => "success",
			Self::Failure => "failure",
			Self::Neutral => "neutral",
		}
	}
}

impl fmt::Display for Conclusion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Weighted status table; weights sum to 1.
pub const STATUS_WEIGHTS: &[(RunStatus, f64)] = &[
	(RunStatus::Completed, 0.8),
	(RunStatus::InProgress, 0.1),
	(RunStatus::Queued, 0.1),
];

/// Weighted conclusion table for completed runs; weights sum to 1.
pub const CONCLUSION_WEIGHTS: &[(Conclusion, f64)] = &[
	(Conclusion::Success, 0.75),
	(Conclusion::Failure, 0.2),
	(Conclusion::Neutral, 0.05),
];

/// One synthetic CI history entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulatedRun {
	/// When the run happened: `end` minus a whole number of hours.
	pub time: DateTime<Utc>,
	/// Run status.
	pub status: RunStatus,
	/// Present only when `status` is `Completed`.
	pub conclusion: Option<Conclusion>,
}

/// Reproducible generator of synthetic CI history.
#[derive(Clone, Copy, Debug)]
pub struct RunSimulator {
	seed: u64,
}

impl RunSimulator {
	/// Simulator whose output is fixed by `seed`.
	pub fn new(seed: u64) -> Self {
		Self { seed }
	}

	/// `count` hourly runs ending now.
	pub fn simulate_runs(&self, count: usize) -> Vec<SimulatedRun> {
		self.simulate_runs_at(count, Utc::now())
	}

	/// `count` runs one hour apart, oldest first, the last one at `end`.
	pub fn simulate_runs_at(&self, count: usize, end: DateTime<Utc>) -> Vec<SimulatedRun> {
		let mut rng = StdRng::seed_from_u64(self.seed);
		let statuses: Vec<RunStatus> = (0..count).map(|_| pick(&mut rng, STATUS_WEIGHTS)).collect();

		statuses
			.into_iter()
			.enumerate()
			.map(|(i, status)| {
				let hours_back = (count - 1 - i) as i64;
				let conclusion =
					(status == RunStatus::Completed).then(|| pick(&mut rng, CONCLUSION_WEIGHTS));
				SimulatedRun {
					time: end - TimeDelta::hours(hours_back),
					status,
					conclusion,
				}
			})
			.collect()
	}
}

fn pick<T: Copy>(rng: &mut StdRng, table: &[(T, f64)]) -> T {
	let fallback = table[0].0;
	table
		.choose_weighted(rng, |(_, weight)| *weight)
		.map_or(fallback, |(value, _)| *value)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_seed_same_history() {
		let end = Utc::now();
		let sim = RunSimulator::new(42);
		let a = sim.simulate_runs_at(12, end);
		let b = sim.simulate_runs_at(12, end);
		assert_eq!(a, b);

		let statuses = |runs: &[SimulatedRun]| runs.iter().map(|r| r.status).collect::<Vec<_>>();
		let fresh = RunSimulator::new(42).simulate_runs(12);
		assert_eq!(statuses(&fresh), statuses(&a));
	}

	#[test]
	fn conclusion_only_on_completed() {
		for seed in 0..20 {
			for run in RunSimulator::new(seed).simulate_runs(40) {
				match run.status {
					RunStatus::Completed => assert!(run.conclusion.is_some()),
					_ => assert_eq!(run.conclusion, None),
				}
			}
		}
	}

	#[test]
	fn runs_are_hourly_and_end_at_end() {
		let end = Utc::now();
		let runs = RunSimulator::new(7).simulate_runs_at(12, end);

		assert_eq!(runs.len(), 12);
		assert_eq!(runs.last().map(|r| r.time), Some(end));
		for pair in runs.windows(2) {
			assert_eq!(pair[1].time - pair[0].time, TimeDelta::hours(1));
		}
	}

	#[test]
	fn zero_runs() {
		assert!(RunSimulator::new(42).simulate_runs(0).is_empty());
	}

	#[test]
	fn weights_sum_to_one() {
		let total: f64 = STATUS_WEIGHTS.iter().map(|(_, w)| w).sum();
		assert!((total - 1.0).abs() < 1e-9);
		let total: f64 = CONCLUSION_WEIGHTS.iter().map(|(_, w)| w).sum();
		assert!((total - 1.0).abs() < 1e-9);
	}

	#[test]
	fn mostly_completed_over_a_long_history() {
		let runs = RunSimulator::new(3).simulate_runs(2000);
		let completed = runs.iter().filter(|r| r.status == RunStatus::Completed).count();
		assert!(completed > 1400 && completed < 1800, "completed = {completed}");
	}
}
