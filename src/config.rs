//! 全局配置管理,存储所有可配置项

use std::collections::HashMap;
use std::path::PathBuf;

use crate::gamedata::GameTable;
use crate::utils::hash_prefix::DEFAULT_PREFIX_FLOOR;

/// 游戏数据来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameDataSource {
    /// 从远程仓库拉取
    Remote,
    /// 从本地目录读取（目录结构同远程仓库：{lang}/gamedata/excel/{file}）
    Local(PathBuf),
}

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 游戏数据来源
    pub source: GameDataSource,
    // 远程仓库根地址
    pub remote_base_url: String,
    // GitHub代理URL（为空则不使用代理）
    pub gh_proxy_url: String,
    // 超时配置（单位：秒）
    pub http_timeout: u64,
    // 请求失败后的最大重试次数
    pub max_retries: u32,
    // 输出根目录（其下为 data/ 与 locales/）
    pub out_dir: PathBuf,
    // 哈希前缀搜索下限（首个候选长度为下限+1）
    pub hash_prefix_floor: usize,
    // 数据表加载失败时的备用语言（按顺序尝试）
    pub table_fallbacks: HashMap<GameTable, Vec<String>>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            source: GameDataSource::Remote,
            remote_base_url: "https://raw.githubusercontent.com/Kengxxiao/ArknightsGameData/master/".to_string(),
            gh_proxy_url: "https://ghfast.top/".to_string(),
            http_timeout: 30,
            max_retries: 10,
            out_dir: PathBuf::from("assets"),
            hash_prefix_floor: DEFAULT_PREFIX_FLOOR,
            table_fallbacks: HashMap::new(),
        }
    }
}

/// 配置管理器（单例）
pub struct ConfigManager;

impl ConfigManager {
    /// 从进程环境变量读取配置
    pub fn from_env() -> GlobalConfig {
        CustomConfigBuilder::new()
            .apply_env(|key| std::env::var(key).ok())
            .build()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl Default for CustomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    /// 在已有配置基础上继续构建
    pub fn from_config(config: GlobalConfig) -> Self {
        Self { config }
    }

    pub fn source(mut self, source: GameDataSource) -> Self {
        self.config.source = source;
        self
    }

    pub fn remote_base_url(mut self, url: String) -> Self {
        self.config.remote_base_url = url;
        self
    }

    pub fn gh_proxy_url(mut self, url: String) -> Self {
        self.config.gh_proxy_url = url;
        self
    }

    pub fn http_timeout(mut self, timeout: u64) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    pub fn out_dir(mut self, dir: PathBuf) -> Self {
        self.config.out_dir = dir;
        self
    }

    pub fn hash_prefix_floor(mut self, floor: usize) -> Self {
        self.config.hash_prefix_floor = floor;
        self
    }

    pub fn table_fallback(mut self, table: GameTable, locales: Vec<String>) -> Self {
        self.config.table_fallbacks.insert(table, locales);
        self
    }

    /// 叠加环境变量配置
    ///
    /// - `UPDATE_SOURCE=local` 时从 `GAME_DATA_DIR` 读取本地数据
    /// - `GH_PROXY_URL` / `HTTP_TIMEOUT` / `HTTP_RETRIES` / `DATA_OUT_DIR` 覆盖对应默认值
    ///
    /// 无法解析的数值保持原值
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup("UPDATE_SOURCE").as_deref() == Some("local") {
            let dir = lookup("GAME_DATA_DIR").unwrap_or_else(|| "ArknightsGameData".to_string());
            self.config.source = GameDataSource::Local(PathBuf::from(dir));
        }
        if let Some(url) = lookup("GH_PROXY_URL") {
            self.config.gh_proxy_url = url;
        }
        if let Some(timeout) = lookup("HTTP_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.config.http_timeout = timeout;
        }
        if let Some(retries) = lookup("HTTP_RETRIES").and_then(|v| v.parse().ok()) {
            self.config.max_retries = retries;
        }
        if let Some(dir) = lookup("DATA_OUT_DIR") {
            self.config.out_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_env_local_source() {
        let env: HashMap<&str, &str> = [
            ("UPDATE_SOURCE", "local"),
            ("GAME_DATA_DIR", "/tmp/gamedata"),
            ("HTTP_RETRIES", "3"),
            ("HTTP_TIMEOUT", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = CustomConfigBuilder::new()
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .build();

        assert_eq!(config.source, GameDataSource::Local(PathBuf::from("/tmp/gamedata")));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.http_timeout, 30);
    }

    #[test]
    fn test_apply_env_defaults_to_remote() {
        let config = CustomConfigBuilder::new().apply_env(|_| None).build();
        assert_eq!(config.source, GameDataSource::Remote);
        assert_eq!(config.hash_prefix_floor, DEFAULT_PREFIX_FLOOR);
    }
}
