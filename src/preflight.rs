//! Service checks run before any git operation.
//!
//! The submission service publishes two plain-text endpoints: an
//! announcement feed and the minimum required client version. Either can
//! abort the run before the student's directory is touched.

use anyhow::Result;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::errors::Error;

/// Default submission service origin; `SUBMIT50_URL` overrides it.
pub const SUBMIT_URL: &str = "https://submit.cs50.io";

pub fn http_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("submit50/", env!("CARGO_PKG_VERSION"))),
    );
    let client = Client::builder().default_headers(headers).build()?;
    Ok(client)
}

/// Check for announcements; a non-empty 200 body aborts the run with its
/// text shown verbatim.
///
/// Network failures propagate untyped and are rendered with the generic
/// "something's wrong" message.
pub fn check_announcements(client: &Client, base_url: &str) -> Result<()> {
    let url = format!("{base_url}/status/submit50");
    debug!("GET {url}");
    let res = client.get(&url).send()?;
    if res.status().is_success() {
        let text = res.text()?;
        let text = text.trim();
        if !text.is_empty() {
            return Err(Error::Announcement(text.to_string()).into());
        }
    }
    Ok(())
}

/// Check that this client is at least the version the service requires.
///
/// # Errors
/// [`Error::UnknownVersion`] when the endpoint does not answer 200;
/// [`Error::OutdatedVersion`] when the required version is newer than
/// `local_version`.
pub fn check_version(client: &Client, base_url: &str, local_version: &str) -> Result<()> {
    let url = format!("{base_url}/versions/submit50");
    debug!("GET {url}");
    let res = client.get(&url).send()?;
    if !res.status().is_success() {
        return Err(Error::UnknownVersion.into());
    }

    let required = res.text()?;
    if version_key(&required) > version_key(local_version) {
        return Err(Error::OutdatedVersion.into());
    }
    Ok(())
}

/// Comparison key for a dotted version string: numeric components with
/// trailing zeros dropped, so "1.2" and "1.2.0" compare equal. Non-numeric
/// tails ("1.3.0-rc1") are ignored.
fn version_key(version: &str) -> Vec<u64> {
    let mut key: Vec<u64> = version
        .trim()
        .trim_start_matches('v')
        .split('.')
        .map(|part| {
            part.chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
                .parse()
                .unwrap_or(0)
        })
        .collect();
    while key.last() == Some(&0) {
        key.pop();
    }
    key
}
