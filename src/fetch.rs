// SPDX-License-Identifier: PMPL-1.0-or-later

//! Remote shared-catalog fetch.
//!
//! The shared vocabulary lives in the media-center application's own
//! repository; one blocking GET at session start pulls the canonical
//! strings file. A bounded timeout keeps a dead mirror from hanging
//! activation forever.

use crate::catalog::Catalog;
use crate::error::LocalizeError;
use std::time::Duration;

/// Canonical URL of the shared application strings file.
pub const SHARED_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/xbmc/xbmc/master/addons/resource.language.en_gb/resources/strings.po";

/// Upper bound on the whole fetch, connect included.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch and parse the shared catalog from `url`.
///
/// # Errors
/// `CatalogLoadFailed` on connection failure, a non-200 status, or
/// unparseable body text. The caller surfaces this to the user and
/// aborts initialization.
pub fn fetch_shared_catalog(url: &str) -> Result<Catalog, LocalizeError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| LocalizeError::load_failed(url, e))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| LocalizeError::load_failed(url, e))?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(LocalizeError::load_failed(
            url,
            format!("unexpected HTTP status {status}"),
        ));
    }

    let body = response
        .text()
        .map_err(|e| LocalizeError::load_failed(url, e))?;
    Catalog::parse(url, &body)
}
