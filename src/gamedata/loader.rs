//! 游戏数据加载器
//! 负责按语言区从本地目录或远程仓库读取数据表

use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use indexmap::IndexMap;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use url::Url;

use super::model::{BuildingData, CharacterTable, GamedataConst, LocaleGameData};
use super::source::{local_location, remote_location, GameTable, Locale, TableLocation, LOCALES};
use crate::config::{GameDataSource, GlobalConfig};
use crate::error::{ArkResult, RsArkError};

/// 已加载的全部数据表（语言区 -> 数据表 -> 原始 JSON）
#[derive(Debug, Clone, Default)]
pub struct GameDataSet {
    tables: IndexMap<String, HashMap<GameTable, Value>>,
}

impl GameDataSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, locale: &str, table: GameTable, value: Value) {
        self.tables
            .entry(locale.to_string())
            .or_default()
            .insert(table, value);
    }

    pub fn get(&self, locale: &str, table: GameTable) -> Option<&Value> {
        self.tables.get(locale)?.get(&table)
    }

    pub fn contains(&self, locale: &str, table: GameTable) -> bool {
        self.get(locale, table).is_some()
    }

    /// 解析单个语言区的全部数据表，任一缺失即报错
    pub fn parse_locale(&self, locale: &str) -> ArkResult<LocaleGameData> {
        let table = |table: GameTable| {
            self.get(locale, table)
                .ok_or_else(|| RsArkError::GameDataMissing(format!("{}/{}", locale, table)))
        };
        let building_data = BuildingData::deserialize(table(GameTable::BuildingData)?)?;
        let character_table = CharacterTable::deserialize(table(GameTable::CharacterTable)?)?;
        let gamedata_const = GamedataConst::deserialize(table(GameTable::GamedataConst)?)?;

        Ok(LocaleGameData {
            building_data,
            character_table,
            gamedata_const,
        })
    }
}

/// 游戏数据加载器
pub struct GameDataLoader {
    client: Client,
    config: GlobalConfig,
}

impl GameDataLoader {
    pub fn new(config: &GlobalConfig) -> ArkResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// 数据表位置
    pub fn table_location(&self, locale: &Locale, table: GameTable) -> ArkResult<TableLocation> {
        match &self.config.source {
            GameDataSource::Remote => remote_location(&self.config.remote_base_url, locale, table),
            GameDataSource::Local(dir) => Ok(local_location(dir, locale, table)),
        }
    }

    /// 代理地址：代理前缀 + 去掉协议头的原始地址
    pub fn proxy_url(&self, url: &Url) -> Option<String> {
        if self.config.gh_proxy_url.is_empty() {
            return None;
        }
        let stripped = url
            .as_str()
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        Some(format!("{}{}", self.config.gh_proxy_url, stripped))
    }

    /// 加载全部语言区的数据表，失败的数据表按配置使用其他语言区替代
    pub async fn load_all(&self) -> ArkResult<GameDataSet> {
        let mut data_set = GameDataSet::new();
        let mut failures: Vec<(Locale, GameTable, String)> = Vec::new();

        for locale in LOCALES {
            for table in GameTable::ALL {
                match self.load_table(&locale, table).await {
                    Ok(Some(value)) => data_set.insert(locale.short, table, value),
                    Ok(None) => failures.push((locale, table, "数据表不存在".to_string())),
                    Err(e) => {
                        warn!("加载数据表失败 {}/{}：{}", locale, table, e);
                        failures.push((locale, table, e.to_string()));
                    }
                }
            }
        }

        for (locale, table, reason) in failures {
            let replacement = self
                .config
                .table_fallbacks
                .get(&table)
                .into_iter()
                .flatten()
                .filter(|l| l.as_str() != locale.short)
                .find(|l| data_set.contains(l, table))
                .cloned();

            match replacement {
                Some(useable) => {
                    if let Some(value) = data_set.get(&useable, table).cloned() {
                        data_set.insert(locale.short, table, value);
                        warn!("Use {}/{} instead of {}/{}", useable, table, locale, table);
                    }
                }
                None => error!("无法替代数据表 {} {}，原始错误：{}", locale, table, reason),
            }
        }

        Ok(data_set)
    }

    /// 加载单个数据表，不存在时返回 None
    pub async fn load_table(&self, locale: &Locale, table: GameTable) -> ArkResult<Option<Value>> {
        let location = self.table_location(locale, table)?;
        let value = match &location {
            TableLocation::Local(path) => read_local_json(path).await?,
            TableLocation::Remote(url) => self.fetch_remote(url).await?,
        };

        match value {
            Some(value) if !value.is_object() => Err(RsArkError::GameDataLoadError(format!(
                "{} 不是 JSON 对象",
                location
            ))),
            other => Ok(other),
        }
    }

    /// 先请求原始地址，失败后请求代理地址
    async fn fetch_remote(&self, url: &Url) -> ArkResult<Option<Value>> {
        match self.fetch_with_retry(url.as_str()).await {
            Ok(value) => Ok(value),
            Err(e) => {
                let Some(proxy_url) = self.proxy_url(url) else {
                    return Err(e);
                };
                warn!("拉取 {} 失败：{}，尝试代理URL：{}", url, e, proxy_url);
                self.fetch_with_retry(&proxy_url).await
            }
        }
    }

    async fn fetch_with_retry(&self, url: &str) -> ArkResult<Option<Value>> {
        let max_retries = self.config.max_retries as usize;
        simple_retry(max_retries, || {
            let client = self.client.clone();
            let url = url.to_string();
            async move { fetch_json(&client, &url).await }
        })
        .await
    }
}

/// GET 请求并解析 JSON，404 视为不存在且不重试
async fn fetch_json(client: &Client, url: &str) -> ArkResult<Option<Value>> {
    let response = client
        .get(url)
        .header("User-Agent", "rsarkdata/0.1.0")
        .header("Accept-Encoding", "gzip, deflate")
        .send()
        .await?;

    if response.status() == StatusCode::NOT_FOUND {
        info!("NOT FOUND {}", url);
        return Ok(None);
    }
    if !response.status().is_success() {
        return Err(RsArkError::GameDataLoadError(format!(
            "URL {} 返回状态码 {}",
            url,
            response.status()
        )));
    }

    let value: Value = response.json().await?;
    info!("GET {}", url);
    Ok(Some(value))
}

/// 读取本地 JSON 文件，文件不存在时返回 None
async fn read_local_json(path: &Path) -> ArkResult<Option<Value>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            debug!("读取本地数据表：{}", path.display());
            Ok(Some(serde_json::from_str(&content)?))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("NOT FOUND {}", path.display());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// 通用异步重试：失败后间隔 1 秒重试，最多重试 max_retries 次，返回最后一次错误
async fn simple_retry<F, Fut, T>(max_retries: usize, mut func: F) -> ArkResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ArkResult<T>>,
{
    let mut last_err: Option<RsArkError> = None;

    for attempt in 0..=max_retries {
        match func().await {
            Ok(res) => return Ok(res),
            Err(e) => {
                last_err = Some(e);
                if attempt < max_retries {
                    warn!("请求失败，正在重试 ({}/{})", attempt + 1, max_retries);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }

    Err(last_err.unwrap_or_else(|| RsArkError::GameDataLoadError("重试次数已耗尽".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use serde_json::json;
    use crate::config::CustomConfigBuilder;

    fn write_table(root: &Path, lang: &str, table: GameTable, value: &Value) {
        let dir = root.join(lang).join("gamedata").join("excel");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(table.file_name()), value.to_string()).unwrap();
    }

    fn local_config(root: &Path) -> GlobalConfig {
        CustomConfigBuilder::new()
            .source(GameDataSource::Local(root.to_path_buf()))
            .build()
    }

    #[tokio::test]
    async fn test_load_local_table_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        write_table(dir.path(), "zh_CN", GameTable::CharacterTable, &json!({"char_001": {"name": "A"}}));

        let loader = GameDataLoader::new(&local_config(dir.path())).unwrap();
        let cn = Locale::find("cn").unwrap();
        let loaded = loader.load_table(&cn, GameTable::CharacterTable).await.unwrap();
        assert_eq!(loaded, Some(json!({"char_001": {"name": "A"}})));
        assert!(loader.load_table(&cn, GameTable::BuildingData).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_object_table_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_table(dir.path(), "zh_CN", GameTable::GamedataConst, &json!("oops"));

        let loader = GameDataLoader::new(&local_config(dir.path())).unwrap();
        let cn = Locale::find("cn").unwrap();
        assert!(matches!(
            loader.load_table(&cn, GameTable::GamedataConst).await,
            Err(RsArkError::GameDataLoadError(_))
        ));
    }

    #[tokio::test]
    async fn test_load_all_uses_configured_replacement() {
        let dir = tempfile::tempdir().unwrap();
        write_table(dir.path(), "ja_JP", GameTable::GamedataConst, &json!({"richTextStyles": {}}));

        let config = CustomConfigBuilder::new()
            .source(GameDataSource::Local(dir.path().to_path_buf()))
            .table_fallback(GameTable::GamedataConst, vec!["kr".to_string(), "jp".to_string()])
            .build();
        let loader = GameDataLoader::new(&config).unwrap();
        let data_set = loader.load_all().await.unwrap();

        assert!(data_set.contains("us", GameTable::GamedataConst));
        assert!(data_set.contains("jp", GameTable::GamedataConst));
        assert!(!data_set.contains("us", GameTable::BuildingData));
        assert!(matches!(
            data_set.parse_locale("us"),
            Err(RsArkError::GameDataMissing(_))
        ));
    }

    #[test]
    fn test_proxy_url() {
        let dir = tempfile::tempdir().unwrap();
        let loader = GameDataLoader::new(&local_config(dir.path())).unwrap();
        let url = Url::parse("https://raw.githubusercontent.com/a/b/master/zh_CN/x.json").unwrap();
        assert_eq!(
            loader.proxy_url(&url).as_deref(),
            Some("https://ghfast.top/raw.githubusercontent.com/a/b/master/zh_CN/x.json")
        );

        let no_proxy = CustomConfigBuilder::new().gh_proxy_url(String::new()).build();
        let loader = GameDataLoader::new(&no_proxy).unwrap();
        assert!(loader.proxy_url(&url).is_none());
    }

    #[tokio::test]
    async fn test_simple_retry_returns_last_error() {
        let calls = AtomicUsize::new(0);
        let result: ArkResult<()> = simple_retry(0, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(RsArkError::InvalidInput("boom".to_string())) }
        })
        .await;
        assert!(matches!(result, Err(RsArkError::InvalidInput(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
