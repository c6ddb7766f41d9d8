use std::collections::HashMap;
use std::future::Future;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::trading::utils::format_ticker;

/// 单只股票实时价格默认缓存时间
pub const DEFAULT_LIVE_PRICE_TTL_SECS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LivePrice {
    pub price: f64,
    pub fetched_at: DateTime<Utc>,
}

/// 抽象：实时价格缓存提供者
///
/// Keys are normalised with [`format_ticker`], so `infy` and `INFY.NS` share
/// an entry. Entries older than the TTL are treated as missing.
pub trait LivePriceCacheProvider: Send + Sync {
    fn get(&self, ticker: &str, now: DateTime<Utc>) -> Option<LivePrice>;
    fn set(&self, ticker: &str, price: f64, fetched_at: DateTime<Utc>);
    fn remove(&self, ticker: &str);
    /// Drops every expired entry and returns how many were removed.
    fn evict_expired(&self, now: DateTime<Utc>) -> usize;
}

pub struct InMemoryLivePriceCache {
    ttl: Duration,
    map: RwLock<HashMap<String, LivePrice>>,
}

impl InMemoryLivePriceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            map: RwLock::new(HashMap::new()),
        }
    }

    fn is_fresh(&self, entry: &LivePrice, now: DateTime<Utc>) -> bool {
        now - entry.fetched_at < self.ttl
    }

    /// Returns the cached price, or awaits `fetch` and caches its result.
    /// A `None` from `fetch` is not cached.
    pub async fn get_or_fetch<F, Fut>(&self, ticker: &str, fetch: F) -> Option<f64>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Option<f64>>,
    {
        let now = Utc::now();
        if let Some(hit) = self.get(ticker, now) {
            return Some(hit.price);
        }
        let symbol = format_ticker(ticker);
        debug!("live price cache miss: {}", symbol);
        let price = fetch(symbol).await?;
        self.set(ticker, price, Utc::now());
        Some(price)
    }
}

impl Default for InMemoryLivePriceCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_LIVE_PRICE_TTL_SECS))
    }
}

impl LivePriceCacheProvider for InMemoryLivePriceCache {
    fn get(&self, ticker: &str, now: DateTime<Utc>) -> Option<LivePrice> {
        let key = format_ticker(ticker);
        let entry = {
            let map = self.map.read().unwrap_or_else(|e| e.into_inner());
            map.get(&key).copied()
        }?;
        if self.is_fresh(&entry, now) {
            return Some(entry);
        }
        // 过期即删除
        self.remove(ticker);
        None
    }

    fn set(&self, ticker: &str, price: f64, fetched_at: DateTime<Utc>) {
        let mut map = self.map.write().unwrap_or_else(|e| e.into_inner());
        map.insert(format_ticker(ticker), LivePrice { price, fetched_at });
    }

    fn remove(&self, ticker: &str) {
        let mut map = self.map.write().unwrap_or_else(|e| e.into_inner());
        map.remove(&format_ticker(ticker));
    }

    fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let mut map = self.map.write().unwrap_or_else(|e| e.into_inner());
        let before = map.len();
        map.retain(|_, entry| now - entry.fetched_at < self.ttl);
        before - map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_formatted_ticker() {
        let cache = InMemoryLivePriceCache::default();
        let now = Utc::now();
        cache.set("infy", 1500.0, now);
        assert_eq!(cache.get("INFY.NS", now).map(|p| p.price), Some(1500.0));
    }

    #[test]
    fn expired_entries_are_missing() {
        let cache = InMemoryLivePriceCache::new(Duration::seconds(60));
        let t0 = Utc::now();
        cache.set("TCS", 3800.0, t0);
        assert!(cache.get("TCS", t0 + Duration::seconds(59)).is_some());
        assert!(cache.get("TCS", t0 + Duration::seconds(60)).is_none());
        // 已被删除，即使时间回退也不再命中
        assert!(cache.get("TCS", t0).is_none());
    }

    #[test]
    fn evict_expired_counts_removed() {
        let cache = InMemoryLivePriceCache::new(Duration::seconds(60));
        let t0 = Utc::now();
        cache.set("TCS", 1.0, t0);
        cache.set("INFY", 2.0, t0 + Duration::seconds(30));
        assert_eq!(cache.evict_expired(t0 + Duration::seconds(61)), 1);
        assert!(cache.get("INFY", t0 + Duration::seconds(61)).is_some());
    }

    #[tokio::test]
    async fn get_or_fetch_caches_result() {
        let cache = InMemoryLivePriceCache::default();
        let first = cache
            .get_or_fetch("itc", |symbol| async move {
                assert_eq!(symbol, "ITC.NS");
                Some(450.0)
            })
            .await;
        assert_eq!(first, Some(450.0));
        let second = cache.get_or_fetch("ITC", |_| async { None }).await;
        assert_eq!(second, Some(450.0));
    }
}
