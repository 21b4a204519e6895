//! The feed loader.

use crate::state::{InFlight, LoaderState};
use crate::{Deliveries, Delivery, Phase, RequestId};
use quakewatch_fetch::{Fetcher, Url, parse_records, url::query_url};
use quakewatch_types::{Failure, FailureKind, FetchResult, FilterOptions, ParseErrorKind, Record};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Configuration for a [`Loader`].
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Timeout passed to the fetcher for every request.
    pub timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
        }
    }
}

struct Shared<F> {
    fetcher: F,
    config: LoaderConfig,
    state: Mutex<LoaderState>,
}

impl<F> Shared<F> {
    fn state(&self) -> MutexGuard<'_, LoaderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Loads the feed in the background and caches the last good result.
///
/// The loader runs fetch and parse on a Tokio task and hands each terminal
/// outcome to the observer registered with [`attach`](Self::attach). At most
/// one request is in flight: [`start`](Self::start) cancels whatever was
/// running, and results of canceled requests are never delivered.
///
/// `start`, `refresh`, `cancel` and `reset` return immediately and must be
/// called from within a Tokio runtime. Dropping the loader cancels any
/// running request.
///
/// # Example
///
/// ```no_run
/// use quakewatch_fetch::{FetchClient, url::usgs_endpoint};
/// use quakewatch_loader::Loader;
/// use quakewatch_types::FilterOptions;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let loader = Loader::new(FetchClient::with_defaults()?);
/// let mut deliveries = loader.attach();
///
/// loader.start(&usgs_endpoint(), &FilterOptions::default());
/// if let Some(delivery) = deliveries.recv().await {
///     println!("{:?}", delivery.result.records().map(<[_]>::len));
/// }
/// # Ok(())
/// # }
/// ```
pub struct Loader<F: Fetcher> {
    shared: Arc<Shared<F>>,
}

impl<F: Fetcher> Loader<F> {
    /// Creates a loader with default configuration.
    #[must_use]
    pub fn new(fetcher: F) -> Self {
        Self::with_config(fetcher, LoaderConfig::default())
    }

    /// Creates a loader with the given configuration.
    #[must_use]
    pub fn with_config(fetcher: F, config: LoaderConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                fetcher,
                config,
                state: Mutex::new(LoaderState::default()),
            }),
        }
    }

    /// Returns the loader configuration.
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.shared.config
    }

    /// Registers the observer and returns its delivery stream.
    ///
    /// Replaces any previously attached observer, whose stream then ends.
    /// Nothing is replayed on attach; call [`start`](Self::start) to get the
    /// cached result delivered.
    pub fn attach(&self) -> Deliveries {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.shared.state();
        if state.observer.replace(tx).is_some() {
            debug!("replacing attached observer");
        }
        Deliveries::new(rx)
    }

    /// Unregisters the observer.
    ///
    /// Cached results and any running request are kept; a request that
    /// finishes while detached updates the cache but delivers nothing.
    pub fn detach(&self) {
        self.shared.state().observer = None;
    }

    /// Starts loading the feed for `options`.
    ///
    /// Cancels the running request first. If the query URL equals the one of
    /// the cached successful result, that result is delivered immediately
    /// and no fetch is made.
    pub fn start(&self, base: &Url, options: &FilterOptions) -> RequestId {
        self.begin(base, options, false)
    }

    /// Like [`start`](Self::start), but always fetches.
    ///
    /// A failed refresh is delivered but does not evict the cached records.
    pub fn refresh(&self, base: &Url, options: &FilterOptions) -> RequestId {
        self.begin(base, options, true)
    }

    /// Cancels the running request without delivering anything.
    ///
    /// Returns false if nothing was running.
    pub fn cancel(&self) -> bool {
        let canceled = self.shared.state().cancel_in_flight();
        if let Some(id) = canceled {
            debug!(request = %id, "request canceled");
        }
        canceled.is_some()
    }

    /// Cancels the running request and forgets the cached result.
    ///
    /// The next [`start`](Self::start) always fetches.
    pub fn reset(&self) {
        let mut state = self.shared.state();
        state.cancel_in_flight();
        state.last_result = None;
        state.last_url = None;
        state.phase = Phase::Idle;
        debug!("loader reset");
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.shared.state().phase
    }

    /// Returns true while a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.shared.state().in_flight.is_some()
    }

    /// Returns a copy of the cached records of the last successful fetch.
    #[must_use]
    pub fn cached(&self) -> Option<Vec<Record>> {
        self.shared.state().cached().map(<[Record]>::to_vec)
    }

    /// Returns the query URL of the most recent request.
    #[must_use]
    pub fn last_url(&self) -> Option<Url> {
        self.shared.state().last_url.clone()
    }

    fn begin(&self, base: &Url, options: &FilterOptions, force: bool) -> RequestId {
        let url = query_url(base, options);
        let mut state = self.shared.state();

        if let Some(superseded) = state.cancel_in_flight() {
            debug!(request = %superseded, "request superseded");
        }
        let id = state.next_request_id();

        if !force && let Some(records) = state.cached_for(&url) {
            let result = FetchResult::Success(records.to_vec());
            debug!(request = %id, %url, "replaying cached result");
            state.phase = Phase::Delivered;
            state.deliver(Delivery {
                request: id,
                url,
                from_cache: true,
                result,
            });
            return id;
        }

        if state.last_url.as_ref() != Some(&url) {
            state.last_result = None;
            state.last_url = Some(url.clone());
        }

        let cancel = CancellationToken::new();
        state.in_flight = Some(InFlight {
            id,
            url: url.clone(),
            cancel: cancel.clone(),
        });
        state.phase = Phase::Loading;
        drop(state);

        info!(request = %id, %url, "loading feed");
        tokio::spawn(run(Arc::clone(&self.shared), id, url, cancel));
        id
    }
}

impl<F: Fetcher> Drop for Loader<F> {
    fn drop(&mut self) {
        self.shared.state().cancel_in_flight();
    }
}

impl<F: Fetcher> std::fmt::Debug for Loader<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state();
        f.debug_struct("Loader")
            .field("config", &self.shared.config)
            .field("phase", &state.phase)
            .field("last_url", &state.last_url)
            .finish_non_exhaustive()
    }
}

/// Worker body for one request.
async fn run<F: Fetcher>(
    shared: Arc<Shared<F>>,
    id: RequestId,
    url: Url,
    cancel: CancellationToken,
) {
    if cancel.is_cancelled() {
        debug!(request = %id, "canceled before fetch");
        return;
    }

    let outcome = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            debug!(request = %id, "fetch aborted");
            return;
        }
        outcome = fetch_and_parse(&shared.fetcher, &url, shared.config.timeout) => outcome,
    };

    shared.state().complete(id, outcome);
}

/// Fetches `url` and parses the body on the blocking pool.
async fn fetch_and_parse<F: Fetcher>(
    fetcher: &F,
    url: &Url,
    timeout: Duration,
) -> Result<Vec<Record>, Failure> {
    let body = fetcher.fetch(url, timeout).await?;

    tokio::task::spawn_blocking(move || parse_records(&body))
        .await
        .map_err(|e| Failure {
            kind: FailureKind::Parse(ParseErrorKind::Malformed),
            message: format!("parser task failed: {e}"),
        })?
        .map_err(Failure::from)
}
