//! Newznab / Torznab indexer.
//!
//! Implements [`Indexer`] by querying the `t=movie` endpoint of a Newznab
//! compatible API with JSON output (`o=json`). Torznab endpoints are served by
//! the same client and must therefore support JSON output as well; XML-only
//! endpoints fail with a parse error.
//!
//! Features:
//! - Token-bucket rate limiting via [`governor`].
//! - Per-request timeout from configuration.
//! - One `imdbid` query when the movie has an IMDb id, otherwise one `q`
//!   query per scene title, results merged in query order and deduplicated by
//!   guid.

use std::collections::HashSet;
use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use governor::{Quota, RateLimiter};
use serde::Deserialize;
use tracing::debug;

use sceneseek_common::Error;

use super::indexer::{Indexer, ReleaseInfo};
use crate::config::IndexerConfig;
use crate::search::SearchCriteria;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const PAGE_LIMIT: &str = "100";

// ---------------------------------------------------------------------------
// API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct NewznabResponse {
    channel: Option<NewznabChannel>,
    error: Option<NewznabError>,
}

#[derive(Debug, Deserialize)]
struct NewznabError {
    #[serde(rename = "@attributes")]
    attributes: NewznabErrorAttributes,
}

#[derive(Debug, Deserialize)]
struct NewznabErrorAttributes {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct NewznabChannel {
    item: Option<OneOrMany<NewznabItem>>,
}

/// Newznab JSON collapses single-element arrays into a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewznabItem {
    title: String,
    guid: Option<serde_json::Value>,
    link: Option<String>,
    comments: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    enclosure: Option<NewznabEnclosure>,
    attr: Option<OneOrMany<NewznabAttr>>,
}

#[derive(Debug, Deserialize)]
struct NewznabEnclosure {
    #[serde(rename = "@attributes")]
    attributes: NewznabEnclosureAttributes,
}

#[derive(Debug, Deserialize)]
struct NewznabEnclosureAttributes {
    url: String,
    length: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewznabAttr {
    #[serde(rename = "@attributes")]
    attributes: NewznabAttrAttributes,
}

#[derive(Debug, Deserialize)]
struct NewznabAttrAttributes {
    name: String,
    value: String,
}

// ---------------------------------------------------------------------------
// Indexer implementation
// ---------------------------------------------------------------------------

/// HTTP indexer for Newznab and Torznab APIs.
pub struct NewznabIndexer {
    client: reqwest::Client,
    name: String,
    base_url: String,
    api_key: String,
    categories: String,
    rate_limiter: governor::RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl NewznabIndexer {
    /// Create an indexer from its configuration entry.
    pub fn new(config: &IndexerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        let categories = config
            .categories
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");

        Ok(Self {
            client,
            name: config.name.clone(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            categories,
            rate_limiter,
        })
    }

    /// Build the query parameter sets for a search, one per request.
    fn queries(&self, criteria: &SearchCriteria) -> Vec<Vec<(&'static str, String)>> {
        let movie = criteria.movie();

        if let Some(imdb_id) = movie.imdb_id.as_deref() {
            let digits = imdb_id.trim_start_matches("tt");
            return vec![vec![("imdbid", digits.to_string())]];
        }

        criteria
            .scene_titles()
            .iter()
            .map(|title| {
                let q = match movie.year {
                    Some(year) => format!("{title} {year}"),
                    None => title.clone(),
                };
                vec![("q", q)]
            })
            .collect()
    }

    async fn request(&self, params: &[(&'static str, String)]) -> Result<Vec<ReleaseInfo>> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}/api", self.base_url);
        let mut query: Vec<(&str, &str)> = vec![
            ("t", "movie"),
            ("apikey", self.api_key.as_str()),
            ("extended", "1"),
            ("o", "json"),
            ("limit", PAGE_LIMIT),
        ];
        if !self.categories.is_empty() {
            query.push(("cat", self.categories.as_str()));
        }
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        debug!(indexer = %self.name, url = %url, params = ?params, "Newznab request");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .with_context(|| format!("Request to indexer '{}' failed", self.name))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::indexer(&self.name, format!("HTTP {status}: {body}")).into());
        }

        let body: NewznabResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from indexer '{}'", self.name))?;

        if let Some(error) = body.error {
            return Err(Error::indexer(
                &self.name,
                format!(
                    "API error {}: {}",
                    error.attributes.code, error.attributes.description
                ),
            )
            .into());
        }

        let items = body
            .channel
            .and_then(|c| c.item)
            .map(OneOrMany::into_vec)
            .unwrap_or_default();

        Ok(items
            .into_iter()
            .filter_map(|item| to_release(item, &self.name))
            .collect())
    }
}

/// Convert a raw item, dropping entries without a download link.
fn to_release(item: NewznabItem, indexer: &str) -> Option<ReleaseInfo> {
    let attrs: Vec<NewznabAttrAttributes> = item
        .attr
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .map(|a| a.attributes)
        .collect();

    let attr = |name: &str| {
        attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    };

    let (enclosure_url, enclosure_length) = match item.enclosure {
        Some(e) => (Some(e.attributes.url), e.attributes.length),
        None => (None, None),
    };

    let download_url = enclosure_url.or(item.link)?;

    let size = attr("size")
        .or(enclosure_length.as_deref())
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    let categories = attrs
        .iter()
        .filter(|a| a.name == "category")
        .filter_map(|a| a.value.parse::<u32>().ok())
        .collect();

    let guid = item
        .guid
        .as_ref()
        .and_then(guid_text)
        .unwrap_or_else(|| download_url.clone());

    Some(ReleaseInfo {
        guid,
        title: item.title,
        size,
        download_url,
        info_url: item.comments,
        indexer: indexer.to_string(),
        publish_date: item.pub_date.as_deref().and_then(parse_pub_date),
        categories,
    })
}

/// Guids arrive either as a string or as an object with a `text` member.
fn guid_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(map) => map
            .get("text")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        _ => None,
    }
}

fn parse_pub_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

#[async_trait]
impl Indexer for NewznabIndexer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<ReleaseInfo>> {
        let mut seen = HashSet::new();
        let mut releases = Vec::new();

        for params in self.queries(criteria) {
            for release in self.request(&params).await? {
                if seen.insert(release.guid.clone()) {
                    releases.push(release);
                }
            }
        }

        debug!(
            indexer = %self.name,
            criteria = %criteria,
            count = releases.len(),
            "Indexer returned releases"
        );

        Ok(releases)
    }
}
