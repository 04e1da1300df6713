//! 全局错误类型定义

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum RsArkError {
    // 规则相关错误
    #[error("规则编译失败：{0}")]
    RuleCompileError(String),
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),

    // 分类相关错误
    #[error("分类器未初始化")]
    ClassifierNotInitialized,
    #[error("哈希前缀无法收敛：{0} 个哈希在最大长度 {1} 内仍存在冲突")]
    HashPrefixUnresolved(usize, usize),

    // 游戏数据相关错误
    #[error("游戏数据加载失败：{0}")]
    GameDataLoadError(String),
    #[error("游戏数据缺失：{0}")]
    GameDataMissing(String),
    #[error("输出数据为空：{0}")]
    EmptyOutput(String),

    // 网络相关错误
    #[error("网络请求失败：{0}")]
    HttpError(#[from] reqwest::Error),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type ArkResult<T> = Result<T, RsArkError>;
