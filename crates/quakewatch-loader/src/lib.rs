//! Single-flight, cancellable feed loader for quakewatch.
//!
//! This crate coordinates background loading with a consumer that may
//! attach, detach and reattach over time:
//!
//! - [`Loader`] - Owns the request lifecycle and the result cache
//! - [`LoaderConfig`] - Loader tunables
//! - [`Phase`] - Current lifecycle phase
//! - [`RequestId`] - Per-loader request sequence number
//! - [`Delivery`] / [`Deliveries`] - Outcomes handed to the observer

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quakewatch/quakewatch/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod delivery;
mod loader;
mod state;

pub use delivery::{Deliveries, Delivery};
pub use loader::{Loader, LoaderConfig};
pub use state::{Phase, RequestId};
