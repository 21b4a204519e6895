//! Results handed to the attached observer.

use crate::RequestId;
use futures::Stream;
use quakewatch_fetch::Url;
use quakewatch_types::FetchResult;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::error::TryRecvError;

/// One terminal outcome delivered to the observer.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// The request this outcome belongs to.
    pub request: RequestId,
    /// The query URL the request was built for.
    pub url: Url,
    /// True when the records were replayed from the cache without a fetch.
    pub from_cache: bool,
    /// The outcome itself.
    pub result: FetchResult,
}

/// Receiving end of a loader's deliveries.
///
/// Returned by [`Loader::attach`](crate::Loader::attach). The stream ends
/// once the observer is detached or replaced, or the loader is dropped.
#[derive(Debug)]
pub struct Deliveries {
    rx: UnboundedReceiver<Delivery>,
}

impl Deliveries {
    pub(crate) const fn new(rx: UnboundedReceiver<Delivery>) -> Self {
        Self { rx }
    }

    /// Waits for the next delivery.
    ///
    /// Returns `None` once this observer has been detached and every
    /// pending delivery has been received.
    pub async fn recv(&mut self) -> Option<Delivery> {
        self.rx.recv().await
    }

    /// Returns a delivery if one is ready, without waiting.
    pub fn try_recv(&mut self) -> Option<Delivery> {
        match self.rx.try_recv() {
            Ok(delivery) => Some(delivery),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

impl Stream for Deliveries {
    type Item = Delivery;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
