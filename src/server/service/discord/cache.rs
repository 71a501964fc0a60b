//! Cache for Discord REST responses fetched with a user's bearer token.
//!
//! Entries live until Discord's rate-limit bucket resets, taken from the
//! `x-ratelimit-reset-after` header of the cached response. Repeated page loads within
//! that window are served from memory instead of spending the user's rate limit.

use reqwest::header::HeaderMap;
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;

/// Rate-limit state Discord reported alongside a response.
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimit {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    /// Epoch seconds at which the bucket resets.
    pub reset: Option<f64>,
    /// Seconds until the bucket resets.
    pub reset_after: f64,
    pub bucket: Option<String>,
    pub global: bool,
    pub scope: Option<String>,
}

impl RateLimit {
    /// Parses Discord's `x-ratelimit-*` headers.
    ///
    /// # Arguments
    /// - `headers` - Response headers
    ///
    /// # Returns
    /// - `Some(RateLimit)` - `x-ratelimit-reset-after` is a non-negative number of seconds
    ///   that fits a `Duration`
    /// - `None` - The response carries no usable reset window and must not be cached
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let reset_after = header::<f64>(headers, "x-ratelimit-reset-after")
            .filter(|secs| Duration::try_from_secs_f64(*secs).is_ok())?;

        Some(Self {
            limit: header(headers, "x-ratelimit-limit"),
            remaining: header(headers, "x-ratelimit-remaining"),
            reset: header(headers, "x-ratelimit-reset"),
            reset_after,
            bucket: header(headers, "x-ratelimit-bucket"),
            global: header::<String>(headers, "x-ratelimit-global").as_deref() == Some("true"),
            scope: header(headers, "x-ratelimit-scope"),
        })
    }

    /// Instant at which the bucket resets, `None` when it cannot be represented.
    fn expires_at(&self, now: Instant) -> Option<Instant> {
        let window = Duration::try_from_secs_f64(self.reset_after).ok()?;

        now.checked_add(window)
    }
}

fn header<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

#[derive(Clone)]
struct CacheEntry {
    body: Value,
    rate_limit: RateLimit,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Cache key: the request URL plus the bearer token it was made with.
type CacheKey = (String, String);

/// In-memory cache of Discord responses, shared across requests.
///
/// Clones share the same entries. Expired entries are dropped when they are next looked up
/// and, for every key, whenever a new response is inserted.
#[derive(Clone, Default)]
pub struct DiscordCache {
    entries: Arc<RwLock<HashMap<CacheKey, CacheEntry>>>,
}

impl DiscordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached body for `url` and `token` if it has not expired.
    ///
    /// # Arguments
    /// - `url` - Full request URL
    /// - `token` - Bearer token the request is made with
    ///
    /// # Returns
    /// - `Some(Value)` - Cached response body
    /// - `None` - Nothing cached, or the entry expired (and was removed)
    pub async fn get(&self, url: &str, token: &str) -> Option<Value> {
        let key = (url.to_string(), token.to_string());
        let now = Instant::now();

        {
            let entries = self.entries.read().await;
            match entries.get(&key) {
                Some(entry) if !entry.is_expired(now) => return Some(entry.body.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(&key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(&key);
        }

        None
    }

    /// Stores a response body until its rate-limit bucket resets.
    ///
    /// Expired entries of every key are evicted first, so entries for tokens that are
    /// never used again do not accumulate. A reset window too large to represent is
    /// treated like a missing one and nothing is stored.
    ///
    /// # Arguments
    /// - `url` - Full request URL
    /// - `token` - Bearer token the request was made with
    /// - `body` - Parsed JSON body
    /// - `rate_limit` - Rate-limit headers of the response
    pub async fn insert(&self, url: &str, token: &str, body: Value, rate_limit: RateLimit) {
        let now = Instant::now();

        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| !entry.is_expired(now));

        let Some(expires_at) = rate_limit.expires_at(now) else {
            tracing::debug!(
                "Not caching {}: reset window of {}s out of range",
                url,
                rate_limit.reset_after
            );
            return;
        };

        entries.insert(
            (url.to_string(), token.to_string()),
            CacheEntry {
                body,
                rate_limit,
                expires_at,
            },
        );
    }

    /// Rate-limit state recorded with a live entry.
    pub async fn rate_limit(&self, url: &str, token: &str) -> Option<RateLimit> {
        let entries = self.entries.read().await;

        entries
            .get(&(url.to_string(), token.to_string()))
            .filter(|entry| !entry.is_expired(Instant::now()))
            .map(|entry| entry.rate_limit.clone())
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use serde_json::json;

    const URL: &str = "https://discord.com/api/v10/users/@me/guilds";

    fn rate_limit(reset_after: f64) -> RateLimit {
        RateLimit {
            limit: Some(1),
            remaining: Some(0),
            reset: None,
            reset_after,
            bucket: None,
            global: false,
            scope: None,
        }
    }

    /// Tests header parsing picks up every Discord rate-limit header.
    ///
    /// Expected: all fields populated from their headers
    #[test]
    fn parses_rate_limit_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("5"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("4"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1470173023.123"));
        headers.insert("x-ratelimit-reset-after", HeaderValue::from_static("1.5"));
        headers.insert("x-ratelimit-bucket", HeaderValue::from_static("abcd1234"));
        headers.insert("x-ratelimit-global", HeaderValue::from_static("true"));
        headers.insert("x-ratelimit-scope", HeaderValue::from_static("user"));

        let parsed = RateLimit::from_headers(&headers);

        assert_eq!(
            parsed,
            Some(RateLimit {
                limit: Some(5),
                remaining: Some(4),
                reset: Some(1470173023.123),
                reset_after: 1.5,
                bucket: Some("abcd1234".to_string()),
                global: true,
                scope: Some("user".to_string()),
            })
        );
    }

    /// Tests responses without a usable reset window are not cacheable.
    ///
    /// Expected: None when the header is missing, malformed or negative
    #[test]
    fn requires_reset_after() {
        let mut headers = HeaderMap::new();
        assert_eq!(RateLimit::from_headers(&headers), None);

        headers.insert("x-ratelimit-reset-after", HeaderValue::from_static("soon"));
        assert_eq!(RateLimit::from_headers(&headers), None);

        headers.insert("x-ratelimit-reset-after", HeaderValue::from_static("-1"));
        assert_eq!(RateLimit::from_headers(&headers), None);
    }

    /// Tests a live entry is served from the cache.
    ///
    /// Expected: stored body returned for the same url and token
    #[tokio::test]
    async fn returns_live_entry() {
        let cache = DiscordCache::new();
        cache.insert(URL, "token", json!([1]), rate_limit(60.0)).await;

        assert_eq!(cache.get(URL, "token").await, Some(json!([1])));
        assert!(cache.rate_limit(URL, "token").await.is_some());
    }

    /// Tests entries are never shared between tokens.
    ///
    /// Expected: miss for another user's token on the same url
    #[tokio::test]
    async fn isolates_tokens() {
        let cache = DiscordCache::new();
        cache.insert(URL, "alice", json!([1]), rate_limit(60.0)).await;

        assert_eq!(cache.get(URL, "bob").await, None);
    }

    /// Tests expired entries are dropped on lookup.
    ///
    /// Expected: miss and the entry removed
    #[tokio::test]
    async fn drops_expired_entry() {
        let cache = DiscordCache::new();
        cache.insert(URL, "token", json!([1]), rate_limit(0.0)).await;

        assert_eq!(cache.get(URL, "token").await, None);
        assert_eq!(cache.len().await, 0);
    }

    /// Tests a fresh response replaces the previous entry.
    ///
    /// Expected: latest body returned
    #[tokio::test]
    async fn insert_replaces_entry() {
        let cache = DiscordCache::new();
        cache.insert(URL, "token", json!([1]), rate_limit(60.0)).await;
        cache.insert(URL, "token", json!([2]), rate_limit(60.0)).await;

        assert_eq!(cache.get(URL, "token").await, Some(json!([2])));
        assert_eq!(cache.len().await, 1);
    }

    /// Tests reset windows too large for a `Duration` are not cacheable.
    ///
    /// Expected: None from the headers, and a direct insert stores nothing
    #[tokio::test]
    async fn ignores_unrepresentable_reset_window() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-reset-after", HeaderValue::from_static("1e20"));
        assert_eq!(RateLimit::from_headers(&headers), None);

        let cache = DiscordCache::new();
        cache.insert(URL, "token", json!([1]), rate_limit(1e20)).await;
        cache.insert(URL, "other", json!([1]), rate_limit(f64::INFINITY)).await;

        assert_eq!(cache.get(URL, "token").await, None);
        assert_eq!(cache.len().await, 0);
    }

    /// Tests expired entries of rotated tokens are evicted on insert.
    ///
    /// Tokens change on every login and refresh, so old keys are never looked up again.
    ///
    /// Expected: only the live entry remains after the last insert
    #[tokio::test]
    async fn evicts_expired_entries_on_insert() {
        let cache = DiscordCache::new();
        for i in 0..100 {
            cache
                .insert(URL, &format!("token-{}", i), json!([i]), rate_limit(0.0))
                .await;
        }
        assert!(cache.len().await <= 1);

        cache.insert(URL, "current", json!([1]), rate_limit(60.0)).await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get(URL, "current").await, Some(json!([1])));
    }
}
