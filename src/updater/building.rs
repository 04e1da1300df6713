//! 基建数据更新
//! 按语言区生成 data/building.json 与 locales/{locale}/building.json 的内容

use std::collections::HashMap;
use indexmap::IndexMap;
use tracing::{debug, error};

use super::dataset::{
    BuffData, BuildingBuffDataset, BuildingDataset, BuildingLocale, BuildingLocaleBuff, CharBuildingSkill,
};
use crate::classifier::{BuffClassifier, Classification};
use crate::error::{ArkResult, RsArkError};
use crate::gamedata::{BuildingChar, BuildingData, CharacterTable, Locale, LocaleGameData};
use crate::rule::RoomType;
use crate::utils::{content_hash, is_operator, short_char_id, standardize_id, HashPrefixCompressor};

/// 单个语言区的基建输出
#[derive(Debug, Clone)]
pub struct BuildingOutput {
    /// 仅基准语言区生成
    pub dataset: Option<BuildingDataset>,
    pub locale: BuildingLocale,
}

/// 基建数据更新器
///
/// 跨语言区保存状态：基准语言区先处理，记录技能 ID -> 描述哈希与前缀长度，
/// 其他语言区据此把各自的描述挂到同一个哈希下。
#[derive(Debug, Clone)]
pub struct BuildingUpdater {
    prefix_floor: usize,
    canonical_chars: Option<IndexMap<String, BuildingChar>>,
    buff_id_to_hash: IndexMap<String, String>,
    prefix_len: Option<usize>,
}

impl BuildingUpdater {
    pub fn new(prefix_floor: usize) -> Self {
        Self {
            prefix_floor,
            canonical_chars: None,
            buff_id_to_hash: IndexMap::new(),
            prefix_len: None,
        }
    }

    /// 基准语言区处理后确定的哈希前缀长度
    pub fn prefix_len(&self) -> Option<usize> {
        self.prefix_len
    }

    /// 技能 ID 迁移表：同一干员同一位置的技能 ID 与基准语言区不同时，映射到基准 ID
    pub fn buff_migration(
        canonical: &IndexMap<String, BuildingChar>,
        chars: &IndexMap<String, BuildingChar>,
    ) -> HashMap<String, String> {
        let mut migration = HashMap::new();
        for (char_id, building_char) in chars {
            let Some(canonical_char) = canonical.get(char_id) else {
                continue;
            };
            for (slot, buff_slot) in building_char.buff_char.iter().enumerate() {
                for (index, buff_data) in buff_slot.buff_data.iter().enumerate() {
                    if let Some(canonical_id) = canonical_char.buff_id_at(slot, index) {
                        if canonical_id != buff_data.buff_id {
                            migration.insert(buff_data.buff_id.clone(), canonical_id.to_string());
                        }
                    }
                }
            }
        }
        migration
    }

    /// 处理单个语言区
    pub fn update(
        &mut self,
        locale: &Locale,
        data: &LocaleGameData,
        classifier: &BuffClassifier,
    ) -> ArkResult<BuildingOutput> {
        let is_canonical = locale.is_canonical();
        if !is_canonical && self.prefix_len.is_none() {
            return Err(RsArkError::InvalidInput(format!(
                "语言区 {} 的基建数据必须在基准语言区之后处理",
                locale
            )));
        }
        let building = &data.building_data;

        let migration = match (&self.canonical_chars, is_canonical) {
            (Some(canonical), false) => Self::buff_migration(canonical, &building.chars),
            _ => HashMap::new(),
        };
        if !migration.is_empty() {
            debug!("语言区 {} 迁移技能 ID {} 个", locale, migration.len());
        }
        if is_canonical {
            self.buff_id_to_hash.clear();
        }

        let room_names: IndexMap<String, String> = building
            .rooms
            .iter()
            .map(|(room, info)| (room.to_string(), info.name.clone()))
            .collect();
        let mut buff_names = IndexMap::new();
        let mut hash_to_description: IndexMap<String, String> = IndexMap::new();
        let mut hash_to_room: IndexMap<String, RoomType> = IndexMap::new();
        let mut buff_data: IndexMap<String, BuffData> = IndexMap::new();

        for buff in building.buffs.values() {
            let raw_id = migration.get(&buff.buff_id).unwrap_or(&buff.buff_id);
            let std_id = standardize_id(raw_id);
            buff_names.insert(std_id.clone(), buff.buff_name.clone());

            let hash = if is_canonical {
                let hash = content_hash(&buff.description);
                self.buff_id_to_hash.insert(std_id.clone(), hash.clone());
                hash
            } else if let Some(hash) = self.buff_id_to_hash.get(&std_id) {
                hash.clone()
            } else {
                error!(
                    "Building buff \"{}\" from {} is not in CN",
                    buff.buff_id,
                    locale.short.to_uppercase()
                );
                continue;
            };

            hash_to_description.insert(hash.clone(), buff.description.clone());
            if is_canonical {
                buff_data.insert(
                    std_id,
                    BuffData {
                        icon: buff.skill_icon.clone(),
                        desc: hash.clone(),
                    },
                );
                hash_to_room.insert(hash, buff.room_type.clone());
            }
        }

        let dataset = if is_canonical {
            let chars = Self::derive_chars(building, &data.character_table)?;

            // 压缩哈希到最短唯一前缀
            let prefix_len = HashPrefixCompressor::minimal_unique_prefix_length(
                hash_to_description.keys().map(String::as_str),
                self.prefix_floor,
            )?;
            debug!("基建描述哈希 {} 个，前缀长度 {}", hash_to_description.len(), prefix_len);
            self.prefix_len = Some(prefix_len);
            self.canonical_chars = Some(building.chars.clone());
            HashPrefixCompressor::truncate_values(&mut self.buff_id_to_hash, prefix_len);
            for entry in buff_data.values_mut() {
                entry.desc = HashPrefixCompressor::truncate(&entry.desc, prefix_len).to_string();
            }

            let hash_to_room = HashPrefixCompressor::rekey(hash_to_room, prefix_len);
            let descriptions = HashPrefixCompressor::rekey(hash_to_description.clone(), prefix_len);
            let Classification { info, num_key } = classifier.classify(&hash_to_room, &descriptions);

            ensure_not_empty("building char", chars.is_empty())?;
            ensure_not_empty("building buff data", buff_data.is_empty())?;
            ensure_not_empty("building buff info", info.is_empty())?;
            ensure_not_empty("building buff numKey", num_key.is_empty())?;

            Some(BuildingDataset {
                char: chars,
                buff: BuildingBuffDataset {
                    data: buff_data,
                    info,
                    num_key,
                },
            })
        } else {
            None
        };

        let prefix_len = self
            .prefix_len
            .ok_or_else(|| RsArkError::InvalidInput("哈希前缀长度未确定".to_string()))?;
        let description = HashPrefixCompressor::rekey(hash_to_description, prefix_len);

        ensure_not_empty(&format!("{} room name", locale), room_names.is_empty())?;
        ensure_not_empty(&format!("{} buff name", locale), buff_names.is_empty())?;
        ensure_not_empty(&format!("{} buff description", locale), description.is_empty())?;

        Ok(BuildingOutput {
            dataset,
            locale: BuildingLocale {
                name: room_names,
                buff: BuildingLocaleBuff {
                    name: buff_names,
                    description,
                },
            },
        })
    }

    /// 可获得干员的基建技能列表，没有技能的干员不输出
    fn derive_chars(
        building: &BuildingData,
        characters: &CharacterTable,
    ) -> ArkResult<IndexMap<String, Vec<CharBuildingSkill>>> {
        let mut chars = IndexMap::new();
        for (id, building_char) in &building.chars {
            match characters.get(id) {
                Some(character) if is_operator(id, character.is_not_obtainable) => {}
                _ => continue,
            }

            let skills = building_char
                .buff_char
                .iter()
                .flat_map(|slot| slot.buff_data.iter())
                .map(|buff| {
                    Ok(CharBuildingSkill {
                        id: standardize_id(&buff.buff_id),
                        unlock: format!("{}_{}", buff.cond.phase.number()?, buff.cond.level),
                    })
                })
                .collect::<ArkResult<Vec<_>>>()?;

            if !skills.is_empty() {
                chars.insert(short_char_id(&building_char.char_id).to_string(), skills);
            }
        }
        Ok(chars)
    }
}

fn ensure_not_empty(name: &str, is_empty: bool) -> ArkResult<()> {
    if is_empty {
        return Err(RsArkError::EmptyOutput(name.to_string()));
    }
    Ok(())
}
