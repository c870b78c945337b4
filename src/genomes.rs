//! Enumerate FungiDB genomes from the downloads directory listing.
//!
//! FungiDB publishes no machine-readable genome index, so the Apache-style
//! HTML listing is scraped for `href="Name/"` anchors. A layout change on
//! their side breaks this; that is an accepted dependency.

use std::collections::BTreeSet;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;

use crate::error::OrthologError;

static LISTING_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="([A-Za-z0-9_.-]+)/""#).unwrap());

const IGNORED_ENTRIES: &[&str] = &["Parent Directory", "Build_number"];

/// Sorted, deduplicated organism keys found in a listing page.
pub fn parse_genome_listing(html: &str) -> Vec<String> {
    LISTING_ENTRY
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !IGNORED_ENTRIES.contains(name))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn fetch_genome_listing(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<Vec<String>, OrthologError> {
    tracing::debug!("GET {url}");
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .map_err(|err| OrthologError::ListingHttp(err.to_string()))?;
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| "genome listing request failed".to_string());
        return Err(OrthologError::ListingStatus { status, message });
    }
    let body = response
        .text()
        .map_err(|err| OrthologError::ListingHttp(err.to_string()))?;
    let genomes = parse_genome_listing(&body);
    tracing::info!("found {} genomes in listing", genomes.len());
    Ok(genomes)
}
