//! Static demo content for the simulated pipeline panels.

use chrono::NaiveTime;

/// Steps streamed by the build-log simulator, in order.
pub const BUILD_LOG_STEPS: &[&str] = &[
	"Cloning repository...",
	"Checking out branch main...",
	"Installing dependencies (pip install -r requirements.txt)...",
	"Running unit tests (pytest)...",
	"Building Docker image (python:3.10-slim)...",
	"Pushing image to registry (simulated)...",
	"Deploying to Kubernetes (simulated kubectl apply)...",
	"Verifying deployment...",
	"Pipeline complete.",
];

/// One streamed log line: `> HH:MM:SS - step`.
pub fn format_log_line(at: NaiveTime, step: &str) -> String {
	format!("> {} - {step}", at.format("%H:%M:%S"))
}

/// A pipeline stage and how long it takes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stage {
	/// Stage name, used as the bar label.
	pub name: &'static str,
	/// Duration in minutes.
	pub duration_min: f64,
}

/// Simulated stage durations, in pipeline order.
pub const STAGES: &[Stage] = &[
	Stage { name: "checkout", duration_min: 1.0 },
	Stage { name: "install", duration_min: 2.5 },
	Stage { name: "test", duration_min: 3.0 },
	Stage { name: "build", duration_min: 4.2 },
	Stage { name: "push", duration_min: 1.0 },
	Stage { name: "deploy", duration_min: 2.0 },
	Stage { name: "verify", duration_min: 0.6 },
];

/// Bar rectangle in chart coordinates (y grows downward).
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
	/// Stage name.
	pub label: &'static str,
	/// Stage duration in minutes.
	pub value: f64,
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Bar width.
	pub width: f64,
	/// Bar height, proportional to `value`.
	pub height: f64,
}

/// Lays `stages` out as vertical bars filling a `width` × `height` plot,
/// the longest stage reaching the top.
pub fn stage_bars(stages: &[Stage], width: f64, height: f64) -> Vec<Bar> {
	let max = stages.iter().map(|s| s.duration_min).fold(0.0, f64::max);
	if stages.is_empty() || max <= 0.0 {
		return Vec::new();
	}
	let slot = width / stages.len() as f64;
	let bar_width = slot * 0.7;

	stages
		.iter()
		.enumerate()
		.map(|(i, stage)| {
			let h = height * stage.duration_min / max;
			Bar {
				label: stage.name,
				value: stage.duration_min,
				x: i as f64 * slot + (slot - bar_width) / 2.0,
				y: height - h,
				width: bar_width,
				height: h,
			}
		})
		.collect()
}

/// Headline numbers shown next to the runs table.
pub const KPIS: &[(&str, &str)] = &[
	("Avg Build Time", "6m 24s"),
	("Success Rate", "87%"),
	("Deploy Frequency", "daily"),
];

/// Artifacts the simulated pipeline produces.
pub const ARTIFACTS: &[&str] = &[
	"docker-image: myorg/sample:latest",
	"helm-chart: sample-chart v0.1.0",
	"artifact size: 24 MB",
];

/// A titled shell snippet revealed on demand.
#[derive(Clone, Copy, Debug)]
pub struct Drill {
	/// Toggle caption.
	pub title: &'static str,
	/// Commands shown as a code block.
	pub commands: &'static str,
}

/// Docker and kubectl walkthroughs.
pub const DRILLS: &[Drill] = &[
	Drill {
		title: "Show Docker build + push commands",
		commands: "# Build
docker build -t myorg/sample:latest .
# Tag & push (example)
docker tag myorg/sample:latest registry.example.com/myorg/sample:latest
docker push registry.example.com/myorg/sample:latest",
	},
	Drill {
		title: "Show kubectl deploy + rollout",
		commands: "kubectl apply -f k8s/deployment.yaml
kubectl rollout status deployment/my-app -n production
kubectl get pods -o wide",
	},
];

/// Repository files that accompany the demo, with what each one is.
pub const REPO_FILES: &[(&str, &str)] = &[
	("Dockerfile", "Example container image build instructions."),
	("k8s/deployment.yaml", "Example Kubernetes deployment manifest."),
	(".github/workflows/ci.yml", "Sample GitHub Actions workflow."),
];

/// Which panel demonstrates which skill.
pub const SKILLS: &[(&str, &str)] = &[
	("CI/CD understanding", "shown via workflow runs, KPIs and build logs."),
	("Docker practice", "sample build commands & Dockerfile included."),
	(
		"Kubernetes architecture",
		"topology visualization mimics node/pod/service relationships.",
	),
	(
		"Monitoring & telemetry",
		"timeline & pipeline KPIs demonstrate observability.",
	),
	(
		"Resume-ready",
		"link this app in your CV and explain the repo artifacts to interviewers.",
	),
];
