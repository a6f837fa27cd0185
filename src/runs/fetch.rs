use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use futures_util::lock::Mutex;
use log::{debug, info, warn};
use reqwest::RequestBuilder;
use reqwest::header::ACCEPT;

use super::cache::TtlCache;
use super::model::{RunsEnvelope, WorkflowRun};
use crate::error::FetchError;

const GITHUB_JSON: &str = "application/vnd.github+json";

/// Where and how the fetcher talks to the remote API.
#[derive(Clone, Debug)]
pub struct FetchSettings {
	/// API origin without a trailing slash, e.g. `https://api.github.com`.
	pub api_base: String,
	/// Upper bound on runs requested and returned.
	pub per_page: usize,
	/// Bound on a single request, connect through body.
	pub timeout: Duration,
	/// How long a result is served from the cache.
	pub cache_ttl: Duration,
}

/// A single read-only GET returning the response body.
///
/// Implementations must turn non-2xx statuses into [`FetchError::Status`]
/// and must not outlive `timeout`.
pub trait Transport {
	/// Fetch `url` and return its body as text.
	fn get(&self, url: &str, timeout: Duration) -> impl Future<Output = Result<String, FetchError>>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
	client: reqwest::Client,
}

impl HttpTransport {
	/// Transport with a default client.
	pub fn new() -> Self {
		Self::default()
	}
}

impl Transport for HttpTransport {
	async fn get(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
		let request = self.client.get(url).header(ACCEPT, GITHUB_JSON);
		execute(request, timeout).await
	}
}

async fn read_body(request: RequestBuilder) -> Result<String, FetchError> {
	let response = request.send().await?;
	let status = response.status();
	if !status.is_success() {
		return Err(FetchError::Status(status.as_u16()));
	}
	Ok(response.text().await?)
}

#[cfg(not(target_arch = "wasm32"))]
async fn execute(request: RequestBuilder, timeout: Duration) -> Result<String, FetchError> {
	// GitHub rejects requests without a User-Agent; browsers set their own.
	let request = request
		.header(reqwest::header::USER_AGENT, concat!("pipeline-visualizer/", env!("CARGO_PKG_VERSION")))
		.timeout(timeout);
	read_body(request).await.map_err(|err| match err {
		FetchError::Request(e) if e.is_timeout() => FetchError::Timeout,
		other => other,
	})
}

#[cfg(target_arch = "wasm32")]
async fn execute(request: RequestBuilder, timeout: Duration) -> Result<String, FetchError> {
	use futures_util::future::{Either, select};

	let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
	let body = std::pin::pin!(read_body(request));
	let timer = std::pin::pin!(gloo_timers::future::TimeoutFuture::new(millis));
	match select(body, timer).await {
		Either::Left((result, _)) => result,
		Either::Right(_) => Err(FetchError::Timeout),
	}
}

/// Fetches recent workflow runs for a repository, with a TTL cache.
///
/// The fetcher is `!Sync` but may be shared between tasks on one thread.
/// Overlapping calls for the same repository are single-flight: the first
/// caller holds that key's lock across the request and later callers wait,
/// then read what it cached.
pub struct RunFetcher<T> {
	transport: T,
	settings: FetchSettings,
	cache: RefCell<TtlCache<String, Vec<WorkflowRun>>>,
	in_flight: RefCell<HashMap<String, Rc<Mutex<()>>>>,
	clock: Box<dyn Fn() -> DateTime<Utc>>,
}

impl<T: Transport> RunFetcher<T> {
	/// Fetcher using the wall clock.
	pub fn new(transport: T, settings: FetchSettings) -> Self {
		Self {
			transport,
			settings,
			cache: RefCell::new(TtlCache::new()),
			in_flight: RefCell::new(HashMap::new()),
			clock: Box::new(Utc::now),
		}
	}

	/// Replace the clock used for cache expiry.
	pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
		self.clock = Box::new(clock);
		self
	}

	/// The underlying transport.
	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Listing URL for `repo`; the identifier is not validated.
	pub fn runs_url(&self, repo: &str) -> String {
		format!(
			"{}/repos/{}/actions/runs?per_page={}",
			self.settings.api_base.trim_end_matches('/'),
			repo.trim(),
			self.settings.per_page
		)
	}

	/// Recent runs for `repo`, most recent first, or an empty list on any
	/// failure.
	///
	/// Results (including empty ones) are cached for the configured TTL.
	pub async fn fetch_runs(&self, repo: &str) -> Vec<WorkflowRun> {
		let key = repo.trim();
		if let Some(runs) = self.cached(key) {
			return runs;
		}

		let lock = self.key_lock(key);
		let runs = {
			let _guard = lock.lock().await;
			// Whoever held the lock before us may have filled the entry
			match self.cached(key) {
				Some(runs) => runs,
				None => self.fetch_and_store(key).await,
			}
		};
		self.release_key_lock(key, lock);
		runs
	}

	fn cached(&self, key: &str) -> Option<Vec<WorkflowRun>> {
		let runs = self.cache.borrow_mut().get(key, (self.clock)())?;
		debug!("serving {} cached runs for {key}", runs.len());
		Some(runs)
	}

	fn key_lock(&self, key: &str) -> Rc<Mutex<()>> {
		self.in_flight
			.borrow_mut()
			.entry(key.to_string())
			.or_insert_with(|| Rc::new(Mutex::new(())))
			.clone()
	}

	fn release_key_lock(&self, key: &str, lock: Rc<Mutex<()>>) {
		// Two references left: the map's and ours, so nobody is waiting
		if Rc::strong_count(&lock) == 2 {
			self.in_flight.borrow_mut().remove(key);
		}
	}

	async fn fetch_and_store(&self, key: &str) -> Vec<WorkflowRun> {
		let runs = match self.try_fetch_runs(key).await {
			Ok(runs) => {
				info!("fetched {} workflow runs for {key}", runs.len());
				runs
			}
			Err(err) => {
				warn!("no workflow runs for {key}: {err}");
				Vec::new()
			}
		};

		let now = (self.clock)();
		let ttl = TimeDelta::from_std(self.settings.cache_ttl).unwrap_or(TimeDelta::zero());
		if let Some(expires_at) = now.checked_add_signed(ttl) {
			let mut cache = self.cache.borrow_mut();
			cache.purge_expired(now);
			cache.insert(key.to_string(), runs.clone(), expires_at);
		}
		runs
	}

	/// One uncached attempt, keeping the failure cause.
	pub async fn try_fetch_runs(&self, repo: &str) -> Result<Vec<WorkflowRun>, FetchError> {
		let url = self.runs_url(repo);
		debug!("GET {url}");
		let body = self.transport.get(&url, self.settings.timeout).await?;
		let envelope: RunsEnvelope = serde_json::from_str(&body)?;

		Ok(envelope
			.workflow_runs
			.iter()
			.filter_map(|entry| {
				let run = WorkflowRun::from_api(entry);
				if run.is_none() {
					debug!("skipping run record without an id");
				}
				run
			})
			.take(self.settings.per_page)
			.collect())
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use serde_json::json;

	use super::*;
	use crate::runs::RunId;

	enum Reply {
		Body(String),
		Status(u16),
		Timeout,
	}

	struct StubTransport {
		reply: Reply,
		calls: Cell<usize>,
		urls: RefCell<Vec<String>>,
	}

	impl StubTransport {
		fn new(reply: Reply) -> Self {
			Self {
				reply,
				calls: Cell::new(0),
				urls: RefCell::new(Vec::new()),
			}
		}
	}

	impl Transport for StubTransport {
		async fn get(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
			self.calls.set(self.calls.get() + 1);
			self.urls.borrow_mut().push(url.to_string());
			match &self.reply {
				Reply::Body(body) => Ok(body.clone()),
				Reply::Status(code) => Err(FetchError::Status(*code)),
				Reply::Timeout => Err(FetchError::Timeout),
			}
		}
	}

	fn settings(api_base: &str) -> FetchSettings {
		FetchSettings {
			api_base: api_base.to_string(),
			per_page: 10,
			timeout: Duration::from_secs(8),
			cache_ttl: Duration::from_secs(60),
		}
	}

	fn listing(count: u64) -> String {
		let runs: Vec<_> = (0..count)
			.map(|i| {
				json!({
					"id": 1000 + i,
					"name": "CI",
					"status": "completed",
					"conclusion": "success",
					"run_number": count - i,
				})
			})
			.collect();
		json!({ "total_count": count, "workflow_runs": runs }).to_string()
	}

	#[test]
	fn url_follows_listing_template() {
		let fetcher = RunFetcher::new(StubTransport::new(Reply::Timeout), settings("https://api.github.com/"));
		assert_eq!(
			fetcher.runs_url(" octo/demo "),
			"https://api.github.com/repos/octo/demo/actions/runs?per_page=10"
		);
	}

	#[tokio::test]
	async fn maps_listing_in_upstream_order() {
		let fetcher = RunFetcher::new(StubTransport::new(Reply::Body(listing(3))), settings("http://stub"));
		let runs = fetcher.fetch_runs("octo/demo").await;

		let ids: Vec<_> = runs.iter().map(|r| r.id.clone()).collect();
		assert_eq!(ids, vec![RunId::Number(1000), RunId::Number(1001), RunId::Number(1002)]);
		assert_eq!(
			fetcher.transport().urls.borrow()[0],
			"http://stub/repos/octo/demo/actions/runs?per_page=10"
		);
	}

	#[tokio::test]
	async fn caps_result_at_page_size() {
		let fetcher = RunFetcher::new(StubTransport::new(Reply::Body(listing(25))), settings("http://stub"));
		let runs = fetcher.fetch_runs("octo/demo").await;
		assert_eq!(runs.len(), 10);
	}

	#[tokio::test]
	async fn failures_become_empty() {
		for reply in [
			Reply::Status(404),
			Reply::Status(403),
			Reply::Timeout,
			Reply::Body("<html>rate limited</html>".into()),
			Reply::Body("[1, 2, 3]".into()),
		] {
			let fetcher = RunFetcher::new(StubTransport::new(reply), settings("http://stub"));
			assert!(fetcher.fetch_runs("octo/demo").await.is_empty());
		}
	}

	#[tokio::test]
	async fn try_fetch_keeps_the_cause() {
		let fetcher = RunFetcher::new(StubTransport::new(Reply::Status(403)), settings("http://stub"));
		let err = fetcher.try_fetch_runs("octo/demo").await.unwrap_err();
		assert!(matches!(err, FetchError::Status(403)));
	}

	#[tokio::test]
	async fn records_without_id_are_dropped() {
		let body = json!({ "workflow_runs": [{ "id": 1 }, { "name": "no id" }, { "id": 2 }] });
		let fetcher = RunFetcher::new(StubTransport::new(Reply::Body(body.to_string())), settings("http://stub"));
		let runs = fetcher.fetch_runs("octo/demo").await;
		assert_eq!(runs.len(), 2);
	}

	#[tokio::test]
	async fn repeated_call_within_ttl_hits_cache() {
		let fetcher = RunFetcher::new(StubTransport::new(Reply::Body(listing(2))), settings("http://stub"));

		let first = fetcher.fetch_runs("octo/demo").await;
		let second = fetcher.fetch_runs("octo/demo").await;

		assert_eq!(first, second);
		assert_eq!(fetcher.transport().calls.get(), 1);
	}

	#[tokio::test]
	async fn failed_result_is_cached_too() {
		let fetcher = RunFetcher::new(StubTransport::new(Reply::Status(500)), settings("http://stub"));
		fetcher.fetch_runs("octo/demo").await;
		fetcher.fetch_runs("octo/demo").await;
		assert_eq!(fetcher.transport().calls.get(), 1);
	}

	#[tokio::test]
	async fn expired_entry_is_refetched() {
		let start = Utc::now();
		let elapsed = Rc::new(Cell::new(0i64));
		let clock = {
			let elapsed = elapsed.clone();
			move || start + TimeDelta::seconds(elapsed.get())
		};
		let fetcher =
			RunFetcher::new(StubTransport::new(Reply::Body(listing(1))), settings("http://stub")).with_clock(clock);

		fetcher.fetch_runs("octo/demo").await;
		elapsed.set(59);
		fetcher.fetch_runs("octo/demo").await;
		assert_eq!(fetcher.transport().calls.get(), 1);

		elapsed.set(61);
		fetcher.fetch_runs("octo/demo").await;
		assert_eq!(fetcher.transport().calls.get(), 2);
	}

	#[tokio::test]
	async fn distinct_repos_are_cached_separately() {
		let fetcher = RunFetcher::new(StubTransport::new(Reply::Body(listing(1))), settings("http://stub"));
		fetcher.fetch_runs("octo/demo").await;
		fetcher.fetch_runs("octo/other").await;
		fetcher.fetch_runs(" octo/demo").await;
		assert_eq!(fetcher.transport().calls.get(), 2);
	}

	/// Hands control back to the runtime mid-request so overlapping
	/// callers interleave.
	struct YieldingTransport {
		body: String,
		calls: Cell<usize>,
	}

	impl Transport for YieldingTransport {
		async fn get(&self, _url: &str, _timeout: Duration) -> Result<String, FetchError> {
			self.calls.set(self.calls.get() + 1);
			tokio::task::yield_now().await;
			tokio::task::yield_now().await;
			Ok(self.body.clone())
		}
	}

	fn yielding(body: String) -> YieldingTransport {
		YieldingTransport {
			body,
			calls: Cell::new(0),
		}
	}

	#[tokio::test]
	async fn overlapping_calls_for_one_repo_share_a_request() {
		let fetcher = RunFetcher::new(yielding(listing(3)), settings("http://stub"));

		let (a, b) = tokio::join!(fetcher.fetch_runs("octo/demo"), fetcher.fetch_runs(" octo/demo"));

		assert_eq!(fetcher.transport().calls.get(), 1);
		assert_eq!(a.len(), 3);
		assert_eq!(a, b);
		assert!(fetcher.in_flight.borrow().is_empty());
	}

	#[tokio::test]
	async fn overlapping_calls_for_different_repos_each_fetch() {
		let fetcher = RunFetcher::new(yielding(listing(1)), settings("http://stub"));

		let (a, b, c) = tokio::join!(
			fetcher.fetch_runs("octo/demo"),
			fetcher.fetch_runs("octo/other"),
			fetcher.fetch_runs("octo/demo"),
		);

		assert_eq!(fetcher.transport().calls.get(), 2);
		assert_eq!((a.len(), b.len()), (1, 1));
		assert_eq!(a, c);
	}

	#[tokio::test]
	async fn overlapping_failure_is_shared_as_empty() {
		let fetcher = RunFetcher::new(yielding("not json".into()), settings("http://stub"));

		let (a, b) = tokio::join!(fetcher.fetch_runs("octo/demo"), fetcher.fetch_runs("octo/demo"));

		assert!(a.is_empty() && b.is_empty());
		assert_eq!(fetcher.transport().calls.get(), 1);
	}

	#[tokio::test]
	async fn unreachable_host_yields_empty() {
		let mut unreachable = settings("http://127.0.0.1:9");
		unreachable.timeout = Duration::from_secs(2);
		let fetcher = RunFetcher::new(HttpTransport::new(), unreachable);
		assert!(fetcher.fetch_runs("not a repo").await.is_empty());
	}
}
