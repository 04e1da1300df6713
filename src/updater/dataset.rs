//! 输出数据集模型

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::rule::{BuffInfo, NumKeySchema};

/// data/building.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingDataset {
    /// 干员短 ID -> 基建技能列表
    pub char: IndexMap<String, Vec<CharBuildingSkill>>,
    pub buff: BuildingBuffDataset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharBuildingSkill {
    pub id: String,
    /// `{精英化阶段}_{等级}`
    pub unlock: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingBuffDataset {
    pub data: IndexMap<String, BuffData>,
    pub info: IndexMap<String, BuffInfo>,
    #[serde(rename = "numKey")]
    pub num_key: NumKeySchema,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffData {
    pub icon: String,
    /// 描述的短哈希
    pub desc: String,
}

/// locales/{locale}/building.json
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildingLocale {
    /// 房间类型 -> 房间名
    pub name: IndexMap<String, String>,
    pub buff: BuildingLocaleBuff,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildingLocaleBuff {
    /// 技能 ID -> 技能名
    pub name: IndexMap<String, String>,
    /// 短哈希 -> 描述
    pub description: IndexMap<String, String>,
}

/// locales/{locale}/term.json 的单个词条
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    pub name: String,
    pub desc: String,
}
