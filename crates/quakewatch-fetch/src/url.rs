//! Event service query URL construction.

use quakewatch_types::FilterOptions;
use url::Url;

/// Query endpoint of the USGS FDSN event service.
pub const USGS_QUERY_ENDPOINT: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Builds the query URL for the given filter options.
///
/// Appends `format`, `limit`, `minmag` and `orderby` to whatever query the
/// base already carries. Values are not validated; an empty minimum
/// magnitude is sent as `minmag=`.
///
/// # Example
///
/// ```
/// use quakewatch_fetch::{Url, url::query_url};
/// use quakewatch_types::FilterOptions;
///
/// let base = Url::parse("https://example.org/query").unwrap();
/// let url = query_url(&base, &FilterOptions::default());
/// assert_eq!(
///     url.as_str(),
///     "https://example.org/query?format=geojson&limit=10&minmag=6&orderby=time"
/// );
/// ```
#[must_use]
pub fn query_url(base: &Url, options: &FilterOptions) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("format", &options.format)
        .append_pair("limit", &options.limit.to_string())
        .append_pair("minmag", &options.min_magnitude)
        .append_pair("orderby", options.order_by.as_str());
    url
}

/// Returns the default query endpoint as a parsed URL.
///
/// # Panics
///
/// Never; the endpoint constant is a valid absolute URL.
#[must_use]
pub fn usgs_endpoint() -> Url {
    Url::parse(USGS_QUERY_ENDPOINT).expect("USGS endpoint constant is a valid URL")
}
