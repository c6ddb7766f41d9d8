use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use async_trait::async_trait;

use crate::trading::model::Bar;

/// 历史K线来源
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Daily bars for `symbol` in ascending date order. An unknown symbol may
    /// return either an error or an empty vector.
    async fn load(&self, symbol: &str) -> anyhow::Result<Vec<Bar>>;
}

/// Reads `<dir>/<symbol>.json`, a JSON array of bars.
pub struct JsonFileHistorySource {
    dir: PathBuf,
}

impl JsonFileHistorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.json", symbol))
    }
}

#[async_trait]
impl HistorySource for JsonFileHistorySource {
    async fn load(&self, symbol: &str) -> anyhow::Result<Vec<Bar>> {
        let path = self.path_for(symbol);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("读取历史数据失败: {}", path.display()))?;
        let bars: Vec<Bar> = serde_json::from_str(&raw)
            .with_context(|| format!("解析历史数据失败: {}", path.display()))?;
        Ok(bars)
    }
}

/// Fixed in-memory histories, mostly for tests and replays.
#[derive(Default)]
pub struct InMemoryHistorySource {
    histories: HashMap<String, Vec<Bar>>,
}

impl InMemoryHistorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.histories.insert(symbol.to_string(), bars);
        self
    }
}

#[async_trait]
impl HistorySource for InMemoryHistorySource {
    async fn load(&self, symbol: &str) -> anyhow::Result<Vec<Bar>> {
        self.histories
            .get(symbol)
            .cloned()
            .ok_or_else(|| anyhow!("no history for {}", symbol))
    }
}
