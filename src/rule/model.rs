//! 规则数据模型定义
//! 仅存储规则与分类结果数据，支持序列化/反序列化

use std::fmt;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde::ser::SerializeMap;

/// 通用兜底规则表的键名
pub const FALLBACK_TABLE_KEY: &str = "BUILDING";

/// 基建房间类型
///
/// 游戏数据新增的房间类型落入 `Other`，分类结果为空而不是整体解析失败。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomType {
    Control,
    Power,
    Manufacture,
    Trading,
    Dormitory,
    Workshop,
    Hire,
    Training,
    Meeting,
    Elevator,
    Corridor,
    Other(String),
}

impl RoomType {
    pub const ALL: [RoomType; 11] = [
        RoomType::Control,
        RoomType::Power,
        RoomType::Manufacture,
        RoomType::Trading,
        RoomType::Dormitory,
        RoomType::Workshop,
        RoomType::Hire,
        RoomType::Training,
        RoomType::Meeting,
        RoomType::Elevator,
        RoomType::Corridor,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            RoomType::Control => "CONTROL",
            RoomType::Power => "POWER",
            RoomType::Manufacture => "MANUFACTURE",
            RoomType::Trading => "TRADING",
            RoomType::Dormitory => "DORMITORY",
            RoomType::Workshop => "WORKSHOP",
            RoomType::Hire => "HIRE",
            RoomType::Training => "TRAINING",
            RoomType::Meeting => "MEETING",
            RoomType::Elevator => "ELEVATOR",
            RoomType::Corridor => "CORRIDOR",
            RoomType::Other(name) => name,
        }
    }
}

impl From<String> for RoomType {
    fn from(name: String) -> Self {
        RoomType::ALL
            .into_iter()
            .find(|room| room.as_str() == name)
            .unwrap_or(RoomType::Other(name))
    }
}

impl From<RoomType> for String {
    fn from(room: RoomType) -> Self {
        match room {
            RoomType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个分类的提取规则：按顺序尝试的正则源码列表（非空）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRule {
    pub category: String,
    pub patterns: Vec<String>,
}

impl PatternRule {
    pub fn new<S: AsRef<str>>(category: &str, patterns: &[S]) -> Self {
        Self {
            category: category.to_string(),
            patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
        }
    }
}

/// 分类对应的数值捕获组名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumKey {
    One(String),
    Many(Vec<String>),
}

impl NumKey {
    /// 纯布尔分类（无数值）
    pub fn none() -> Self {
        NumKey::Many(Vec::new())
    }
}

impl From<&str> for NumKey {
    fn from(name: &str) -> Self {
        NumKey::One(name.to_string())
    }
}

impl From<&[&str]> for NumKey {
    fn from(names: &[&str]) -> Self {
        NumKey::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

/// 表键（房间类型名或 BUILDING） -> 分类 -> 数值捕获组名
pub type NumKeySchema = IndexMap<String, IndexMap<String, NumKey>>;

/// 完整规则库
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleLibrary {
    /// 房间专属规则表，分类按声明顺序排列
    pub room_rules: IndexMap<RoomType, Vec<PatternRule>>,
    /// 通用兜底规则表（BUILDING），每个房间类型一条规则，只提取数值
    pub fallback_rules: IndexMap<RoomType, PatternRule>,
    pub num_key: NumKeySchema,
}

/// 单个技能描述的分类结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffInfo {
    pub building: RoomType,
    #[serde(serialize_with = "serialize_num_map")]
    pub num: IndexMap<String, f64>,
    pub is: IndexMap<String, u8>,
}

impl BuffInfo {
    pub fn empty(building: RoomType) -> Self {
        Self {
            building,
            num: IndexMap::new(),
            is: IndexMap::new(),
        }
    }
}

/// 整数值按整数输出（10 而非 10.0）
fn serialize_num_map<S>(num: &IndexMap<String, f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(num.len()))?;
    for (key, value) in num {
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            map.serialize_entry(key, &(*value as i64))?;
        } else {
            map.serialize_entry(key, value)?;
        }
    }
    map.end()
}
