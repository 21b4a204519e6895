//! Core types for the quakewatch seismic event feed.
//!
//! This crate provides the fundamental data structures used throughout quakewatch:
//!
//! - [`Record`] - A single parsed seismic event
//! - [`Coordinates`] - Epicenter location hint attached to a record
//! - [`FilterOptions`] - Filter and sort options for one feed request
//! - [`OrderBy`] - Sort order understood by the event service
//! - [`FetchResult`] - Terminal outcome of a fetch, delivered to observers
//! - [`NetworkError`] / [`ParseError`] - Classified fetch and parse failures

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quakewatch/quakewatch/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod filter;
mod outcome;
mod record;

pub use error::{NetworkError, NetworkErrorKind, ParseError, ParseErrorKind};
pub use filter::{FilterOptions, OrderBy, OrderByParseError};
pub use outcome::{Failure, FailureKind, FetchResult};
pub use record::{Coordinates, Record};
