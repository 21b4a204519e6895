//! Loader state and its transitions.

use crate::Delivery;
use quakewatch_fetch::Url;
use quakewatch_types::{Failure, FetchResult, Record};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Sequence number of a load request, unique per loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Returns the raw sequence number.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the loader is in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing started since creation or the last reset.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last request delivered records.
    Delivered,
    /// The last request was canceled before it finished.
    Canceled,
    /// The last request delivered a failure.
    Failed,
}

impl Phase {
    /// Returns the phase as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handle on the one request currently running.
#[derive(Debug)]
pub(crate) struct InFlight {
    pub(crate) id: RequestId,
    pub(crate) url: Url,
    pub(crate) cancel: CancellationToken,
}

/// Everything a loader owns, guarded by a single lock.
#[derive(Debug, Default)]
pub(crate) struct LoaderState {
    pub(crate) phase: Phase,
    pub(crate) last_result: Option<FetchResult>,
    pub(crate) last_url: Option<Url>,
    pub(crate) in_flight: Option<InFlight>,
    pub(crate) observer: Option<UnboundedSender<Delivery>>,
    last_request: u64,
}

impl LoaderState {
    pub(crate) const fn next_request_id(&mut self) -> RequestId {
        self.last_request += 1;
        RequestId(self.last_request)
    }

    /// Cancels the running request, if any, without delivering anything.
    pub(crate) fn cancel_in_flight(&mut self) -> Option<RequestId> {
        let flight = self.in_flight.take()?;
        flight.cancel.cancel();
        self.phase = Phase::Canceled;
        Some(flight.id)
    }

    /// Returns the cached records if they were produced for `url`.
    pub(crate) fn cached_for(&self, url: &Url) -> Option<&[Record]> {
        if self.last_url.as_ref() != Some(url) {
            return None;
        }
        self.cached()
    }

    /// Returns the cached records of the last successful fetch.
    pub(crate) fn cached(&self) -> Option<&[Record]> {
        self.last_result.as_ref().and_then(FetchResult::records)
    }

    /// Records the outcome of request `id` and delivers it.
    ///
    /// Returns false, changing nothing, when `id` is no longer the request
    /// in flight (it was canceled, superseded or reset).
    pub(crate) fn complete(
        &mut self,
        id: RequestId,
        outcome: Result<Vec<Record>, Failure>,
    ) -> bool {
        let is_current = self
            .in_flight
            .as_ref()
            .is_some_and(|flight| flight.id == id && !flight.cancel.is_cancelled());
        if !is_current {
            debug!(request = %id, "discarding result of canceled request");
            return false;
        }
        let Some(flight) = self.in_flight.take() else {
            return false;
        };

        let result = FetchResult::from(outcome);
        match &result {
            FetchResult::Success(records) => {
                debug!(request = %id, records = records.len(), "request delivered");
                self.phase = Phase::Delivered;
                self.last_result = Some(result.clone());
            }
            FetchResult::Failure(failure) => {
                warn!(request = %id, url = %flight.url, %failure, "request failed");
                self.phase = Phase::Failed;
                if self.cached().is_none() {
                    self.last_result = Some(result.clone());
                }
            }
        }

        self.deliver(Delivery {
            request: id,
            url: flight.url,
            from_cache: false,
            result,
        });
        true
    }

    /// Hands a delivery to the observer, dropping the observer if it is gone.
    pub(crate) fn deliver(&mut self, delivery: Delivery) {
        let request = delivery.request;
        match &self.observer {
            Some(observer) => {
                if observer.send(delivery).is_err() {
                    debug!(request = %request, "observer dropped; detaching");
                    self.observer = None;
                }
            }
            None => debug!(request = %request, "no observer attached"),
        }
    }
}
