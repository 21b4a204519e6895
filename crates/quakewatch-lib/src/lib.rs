//! Fetch, parse and cache recent seismic events from the USGS feed.
//!
//! This is a facade crate that re-exports functionality from the quakewatch
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use quakewatch_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = Loader::new(FetchClient::with_defaults()?);
//!     let mut deliveries = loader.attach();
//!
//!     let options = FilterOptions::default().with_min_magnitude("5");
//!     loader.start(&usgs_endpoint(), &options);
//!
//!     if let Some(delivery) = deliveries.recv().await {
//!         match delivery.result {
//!             FetchResult::Success(records) => {
//!                 for record in records {
//!                     println!("M{:.1} {}", record.magnitude(), record.place());
//!                 }
//!             }
//!             FetchResult::Failure(failure) => eprintln!("{failure}"),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quakewatch/quakewatch/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use quakewatch_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use quakewatch_fetch::{
    ClientConfig, EVENT_PAGE_BASE, FetchClient, Fetcher, Url, parse_records,
    url::{USGS_QUERY_ENDPOINT, query_url, usgs_endpoint},
};

// Re-export the loader
#[cfg(feature = "loader")]
pub use quakewatch_loader::{Deliveries, Delivery, Loader, LoaderConfig, Phase, RequestId};

/// Prelude module for convenient imports.
///
/// ```
/// use quakewatch_lib::prelude::*;
/// ```
pub mod prelude {
    pub use quakewatch_types::{
        Failure, FailureKind, FetchResult, FilterOptions, NetworkErrorKind, OrderBy,
        ParseErrorKind, Record,
    };

    #[cfg(feature = "fetch")]
    pub use quakewatch_fetch::{
        ClientConfig, FetchClient, Fetcher, Url,
        url::{query_url, usgs_endpoint},
    };

    #[cfg(feature = "loader")]
    pub use quakewatch_loader::{Deliveries, Delivery, Loader, LoaderConfig, Phase};
}
