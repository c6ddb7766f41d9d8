use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::trading::model::HistoricalRow;

/// 历史数据存储，按 (ticker, date) upsert
#[async_trait]
pub trait HistoricalStore: Send + Sync {
    /// Inserts or replaces rows keyed on `(ticker, date)`. Returns the number
    /// of rows written.
    async fn upsert(&self, ticker: &str, rows: Vec<HistoricalRow>) -> anyhow::Result<usize>;

    /// Rows of `ticker` in ascending date order.
    async fn rows(&self, ticker: &str) -> anyhow::Result<Vec<HistoricalRow>>;
}

#[derive(Default)]
pub struct InMemoryHistoricalStore {
    rows: RwLock<BTreeMap<(String, NaiveDate), HistoricalRow>>,
}

impl InMemoryHistoricalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl HistoricalStore for InMemoryHistoricalStore {
    async fn upsert(&self, ticker: &str, rows: Vec<HistoricalRow>) -> anyhow::Result<usize> {
        let mut table = self.rows.write().await;
        let count = rows.len();
        for mut row in rows {
            row.ticker = ticker.to_string();
            table.insert((ticker.to_string(), row.date), row);
        }
        Ok(count)
    }

    async fn rows(&self, ticker: &str) -> anyhow::Result<Vec<HistoricalRow>> {
        let table = self.rows.read().await;
        Ok(table
            .iter()
            .filter(|((t, _), _)| t == ticker)
            .map(|(_, row)| row.clone())
            .collect())
    }
}

/// One `<dir>/<ticker>.json` file per ticker, merged on write.
pub struct JsonFileHistoricalStore {
    dir: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileHistoricalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: RwLock::new(()),
        }
    }

    fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("{}.json", ticker))
    }

    async fn read_rows(&self, ticker: &str) -> anyhow::Result<BTreeMap<NaiveDate, HistoricalRow>> {
        let path = self.path_for(ticker);
        if !tokio::fs::try_exists(&path).await? {
            return Ok(BTreeMap::new());
        }
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("读取存储文件失败: {}", path.display()))?;
        let rows: Vec<HistoricalRow> = serde_json::from_str(&raw)
            .with_context(|| format!("解析存储文件失败: {}", path.display()))?;
        Ok(rows.into_iter().map(|r| (r.date, r)).collect())
    }
}

#[async_trait]
impl HistoricalStore for JsonFileHistoricalStore {
    async fn upsert(&self, ticker: &str, rows: Vec<HistoricalRow>) -> anyhow::Result<usize> {
        let _guard = self.lock.write().await;
        let mut table = self.read_rows(ticker).await?;
        let count = rows.len();
        for mut row in rows {
            row.ticker = ticker.to_string();
            table.insert(row.date, row);
        }
        tokio::fs::create_dir_all(&self.dir).await?;
        let merged: Vec<&HistoricalRow> = table.values().collect();
        let payload = serde_json::to_string_pretty(&merged)?;
        let path = self.path_for(ticker);
        // 先写临时文件，再 rename 覆盖原文件
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, payload)
            .await
            .with_context(|| format!("写入临时文件失败: {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("替换存储文件失败: {}", path.display()))?;
        Ok(count)
    }

    async fn rows(&self, ticker: &str) -> anyhow::Result<Vec<HistoricalRow>> {
        let _guard = self.lock.read().await;
        Ok(self.read_rows(ticker).await?.into_values().collect())
    }
}
