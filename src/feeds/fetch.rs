//! Feed downloading with exponential backoff retry logic.
//!
//! Feeds are fetched over HTTPS with a shared `reqwest` client. Transient
//! failures (timeouts, 5xx responses) are retried a few times with
//! exponential backoff and jitter before the source is given up on for the
//! run.
//!
//! # Architecture
//!
//! The module uses a trait-based design:
//! - [`FetchAsync`]: core trait for downloading one URL to a string
//! - [`HttpFetcher`]: the `reqwest`-backed implementation
//! - [`RetryFetch`]: decorator adding retry logic to any [`FetchAsync`]
//!
//! # Retry Strategy
//!
//! - Maximum 3 retry attempts per feed
//! - Exponential backoff starting at 1 second, capped at 15 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd

use crate::feeds::{FeedSource, rss};
use crate::models::Article;
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use rand::{Rng, rng};
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, instrument, warn};

/// Retry attempts per feed before the source is skipped for the run.
const MAX_RETRIES: usize = 3;
/// Initial backoff delay; doubles per attempt.
const BASE_DELAY: StdDuration = StdDuration::from_secs(1);

static CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("tech_digest/", env!("CARGO_PKG_VERSION")))
        .timeout(StdDuration::from_secs(20))
        .build()
        .expect("reqwest client builds")
});

/// Trait for async URL downloading.
///
/// Implementors download one URL to its response body. The abstraction
/// exists so decorators (like retry logic) can wrap any fetch backend.
pub trait FetchAsync {
    /// Download `url` and return the response body.
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// The `reqwest`-backed fetcher used in production.
#[derive(Debug)]
pub struct HttpFetcher;

impl FetchAsync for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = CLIENT.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        tracing::debug!(
            elapsed_ms = t0.elapsed().as_millis() as u128,
            bytes = body.len(),
            "Downloaded feed"
        );
        Ok(body)
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`FetchAsync`]
/// implementation.
///
/// The delay between retries follows:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryFetch<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: FetchAsync,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(15),
        }
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> FetchAsync for RetryFetch<T>
where
    T: FetchAsync + fmt::Debug,
{
    #[instrument(level = "info", skip_all)]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_t0.elapsed().as_millis() as u128,
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(e);
                    }

                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Download and parse one feed, with retries.
///
/// # Errors
///
/// Returns an error when the download exhausts its retries or the response
/// body is not parseable as RSS.
#[instrument(level = "info", skip_all, fields(source = source.name))]
pub async fn fetch_feed(source: &FeedSource) -> Result<Vec<Article>, Box<dyn Error>> {
    let fetcher = RetryFetch::new(HttpFetcher, MAX_RETRIES, BASE_DELAY);
    let body = fetcher.fetch(source.url).await?;

    match rss::parse_feed(&body, source) {
        Ok(articles) => Ok(articles),
        Err(e) => {
            warn!(
                source = source.name,
                error = %e,
                body_preview = %truncate_for_log(&body, 200),
                "Feed body did not parse as RSS"
            );
            Err(e)
        }
    }
}
