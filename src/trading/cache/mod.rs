pub mod live_price_cache;

pub use live_price_cache::{InMemoryLivePriceCache, LivePrice, LivePriceCacheProvider};
