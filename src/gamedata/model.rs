//! 游戏数据表模型（只声明用到的字段，其余字段忽略）

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ArkResult, RsArkError};
use crate::rule::RoomType;

/// building_data.json
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingData {
    #[serde(default)]
    pub rooms: IndexMap<RoomType, Room>,
    #[serde(default)]
    pub chars: IndexMap<String, BuildingChar>,
    #[serde(default)]
    pub buffs: IndexMap<String, BuildingBuff>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomType,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingChar {
    pub char_id: String,
    #[serde(default)]
    pub buff_char: Vec<BuffCharSlot>,
}

impl BuildingChar {
    /// 第 slot 个技能槽的第 index 个技能
    pub fn buff_id_at(&self, slot: usize, index: usize) -> Option<&str> {
        self.buff_char
            .get(slot)?
            .buff_data
            .get(index)
            .map(|d| d.buff_id.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuffCharSlot {
    #[serde(default)]
    pub buff_data: Vec<BuildingCharBuffData>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingCharBuffData {
    pub buff_id: String,
    pub cond: UnlockCondition,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnlockCondition {
    pub phase: Phase,
    pub level: i64,
}

/// 精英化阶段：新版数据为 `PHASE_n`，旧版为数字
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Phase {
    Num(i64),
    Name(String),
}

impl Phase {
    pub fn number(&self) -> ArkResult<i64> {
        match self {
            Phase::Num(n) => Ok(*n),
            Phase::Name(name) => name
                .split('_')
                .nth(1)
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| RsArkError::InvalidInput(format!("无法识别的精英化阶段：{}", name))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingBuff {
    pub buff_id: String,
    pub buff_name: String,
    #[serde(default)]
    pub skill_icon: String,
    pub room_type: RoomType,
    #[serde(default)]
    pub description: String,
}

/// character_table.json 中的单个角色
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_not_obtainable: bool,
}

pub type CharacterTable = IndexMap<String, Character>;

/// gamedata_const.json
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamedataConst {
    #[serde(default)]
    pub rich_text_styles: IndexMap<String, String>,
    #[serde(default)]
    pub term_description_dict: IndexMap<String, TermDescription>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermDescription {
    #[serde(default)]
    pub term_id: String,
    pub term_name: String,
    pub description: String,
}

/// 单个语言区解析后的全部数据表
#[derive(Debug, Clone, Default)]
pub struct LocaleGameData {
    pub building_data: BuildingData,
    pub character_table: CharacterTable,
    pub gamedata_const: GamedataConst,
}
