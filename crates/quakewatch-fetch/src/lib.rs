//! HTTP client, query building and feed parsing for quakewatch.
//!
//! This crate provides the data acquisition pipeline:
//!
//! - [`url::query_url`] - Constructs event service query URLs
//! - [`Fetcher`] - Single-shot fetch abstraction used by the loader
//! - [`FetchClient`] - reqwest-backed [`Fetcher`] with bounded body reads
//! - [`parse_records`] - GeoJSON feature collection parsing

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quakewatch/quakewatch/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod parse;
pub mod url;

pub use ::url::Url;
pub use client::{ClientConfig, FetchClient, Fetcher};
pub use parse::{EVENT_PAGE_BASE, parse_records};
