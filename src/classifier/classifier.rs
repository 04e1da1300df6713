//! 分类器核心：按房间规则表对技能描述分类并提取数值
use std::sync::Arc;
use indexmap::IndexMap;
use tracing::debug;

use super::stripper::RichTextStripper;
use crate::compiler::{CompiledRuleLibrary, RuleCompiler, TableLookup};
use crate::error::ArkResult;
use crate::rule::{BuffInfo, NumKeySchema, RoomType, RuleLibrary, BUILTIN_RULES};
use crate::utils::NumExtractor;

/// 一次分类的完整输出
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// 内容哈希 -> 分类结果
    pub info: IndexMap<String, BuffInfo>,
    pub num_key: NumKeySchema,
}

/// 基建技能分类器
#[derive(Debug, Clone)]
pub struct BuffClassifier {
    compiled_lib: Arc<CompiledRuleLibrary>,
}

impl BuffClassifier {
    /// 编译规则库并创建分类器，非法规则在此处报错
    pub fn new(rule_lib: &RuleLibrary) -> ArkResult<Self> {
        let compiled_lib = RuleCompiler::compile(rule_lib)?;
        Ok(Self {
            compiled_lib: Arc::new(compiled_lib),
        })
    }

    /// 使用内置规则表
    pub fn builtin() -> ArkResult<Self> {
        Self::new(&BUILTIN_RULES)
    }

    /// 批量分类
    ///
    /// 没有对应描述的哈希按空字符串处理。
    pub fn classify(
        &self,
        hash_to_room: &IndexMap<String, RoomType>,
        hash_to_description: &IndexMap<String, String>,
    ) -> Classification {
        let info = hash_to_room
            .iter()
            .map(|(hash, room)| {
                let description = hash_to_description.get(hash).map(String::as_str).unwrap_or("");
                (hash.clone(), self.classify_one(room.clone(), description))
            })
            .collect();

        Classification {
            info,
            num_key: self.compiled_lib.num_key.clone(),
        }
    }

    /// 对单条描述分类
    pub fn classify_one(&self, room: RoomType, description: &str) -> BuffInfo {
        let description = RichTextStripper::strip(description);
        let lookup = self.compiled_lib.resolve(&room);
        let mut result = BuffInfo::empty(room);

        match lookup {
            TableLookup::Specific(rules) => {
                // 每个分类独立判断，只取首个命中的正则
                for rule in rules {
                    if let Some((pattern, captures)) = rule.first_match(&description) {
                        result.is.insert(rule.category.clone(), 1);
                        NumExtractor::merge(&mut result.num, pattern, &captures);
                    }
                }
            }
            TableLookup::Fallback(rule) => {
                if let Some((pattern, captures)) = rule.first_match(&description) {
                    NumExtractor::merge(&mut result.num, pattern, &captures);
                }
            }
            TableLookup::None => {
                debug!("房间 {} 无分类规则，结果为空", result.building);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::PatternRule;

    fn classifier() -> BuffClassifier {
        BuffClassifier::builtin().unwrap()
    }

    fn classify(room: RoomType, description: &str) -> BuffInfo {
        classifier().classify_one(room, description)
    }

    #[test]
    fn test_manufacture_general_production() {
        let info = classify(
            RoomType::Manufacture,
            "当前房间内干员（不限职业）进驻时，工作站内其他<@cc.vup>制造站</>(没有任何特殊加成的普通制造站)最多可以提供<@cc.vup>10%</>生产力",
        );
        assert_eq!(info.building, RoomType::Manufacture);
        assert_eq!(info.is.len(), 1);
        assert_eq!(info.is["通用生产"], 1);
        assert_eq!(info.num.len(), 1);
        assert_eq!(info.num["product"], 10.0);
    }

    #[test]
    fn test_later_category_overwrites_same_num_key() {
        let info = classify(RoomType::Manufacture, "进驻制造站时，生产力+15%，且贵金属类配方的生产力+30%");
        assert_eq!(info.is.keys().collect::<Vec<_>>(), vec!["通用生产", "贵金属"]);
        assert_eq!(info.num["product"], 30.0);
    }

    #[test]
    fn test_look_behind_excludes_recipe_specific_bonus() {
        let info = classify(RoomType::Manufacture, "进驻制造站时，作战记录类配方的生产力+35%");
        assert!(!info.is.contains_key("通用生产"));
        assert_eq!(info.is["作战记录"], 1);
        assert_eq!(info.num["product"], 35.0);
    }

    #[test]
    fn test_trading_multiple_categories() {
        let info = classify(RoomType::Trading, "进驻贸易站时，订单获取效率+20%，且订单上限+4");
        assert_eq!(info.is.keys().collect::<Vec<_>>(), vec!["订单效率", "订单上限"]);
        assert_eq!(info.num["order"], 20.0);
        assert_eq!(info.num["orderLimit"], 4.0);
    }

    #[test]
    fn test_trading_all_stations_not_counted_as_own_order() {
        let info = classify(RoomType::Trading, "进驻贸易站时，所有贸易站订单效率+5%");
        assert!(info.is.is_empty());
        assert!(info.num.is_empty());
    }

    #[test]
    fn test_boolean_only_category() {
        let info = classify(RoomType::Trading, "进驻贸易站时，更容易获得高品质贵金属订单");
        assert_eq!(info.is["高品质"], 1);
        assert!(info.num.is_empty());
    }

    #[test]
    fn test_meeting_faction_clue() {
        let info = classify(RoomType::Meeting, "进驻会客室时，线索搜集速度提升10%，且更容易获得莱茵生命线索");
        assert_eq!(info.is["无特别加成"], 1);
        assert_eq!(info.is["线索1"], 1);
        assert!(!info.is.contains_key("线索2"));
        assert_eq!(info.num["collect"], 10.0);
    }

    #[test]
    fn test_training_profession() {
        let info = classify(RoomType::Training, "协助位时，近卫专精技能训练速度+30%");
        assert_eq!(info.is.keys().collect::<Vec<_>>(), vec!["近卫"]);
        assert_eq!(info.num["train"], 30.0);
    }

    #[test]
    fn test_fallback_room_only_merges_numbers() {
        let power = classify(RoomType::Power, "进驻发电站时，无人机充能速度+20%");
        assert!(power.is.is_empty());
        assert_eq!(power.num["power"], 20.0);

        let hire = classify(RoomType::Hire, "进驻办公室时，人脉资源的联络速度+45%");
        assert!(hire.is.is_empty());
        assert_eq!(hire.num["connect"], 45.0);
    }

    #[test]
    fn test_unmatched_and_uncovered_rooms_are_empty() {
        let unmatched = classify(RoomType::Manufacture, "进驻时心情每小时恢复+1");
        assert!(unmatched.is.is_empty() && unmatched.num.is_empty());

        let uncovered = classify(RoomType::Elevator, "生产力+100%");
        assert!(uncovered.is.is_empty() && uncovered.num.is_empty());
    }

    #[test]
    fn test_full_width_digits_are_not_numbers() {
        let info = classify(RoomType::Training, "协助位时，近卫专精技能训练速度提升３０%");
        assert!(info.is.is_empty());
        assert!(info.num.is_empty());

        let info = classify(RoomType::Training, "协助位时，近卫专精技能训练速度提升３０%，额外5");
        assert_eq!(info.is.keys().collect::<Vec<_>>(), vec!["近卫"]);
        assert_eq!(info.num["train"], 5.0);
    }

    #[test]
    fn test_unknown_room_type_is_empty() {
        let room = RoomType::Other("PRIVATE".to_string());
        let info = classify(room.clone(), "进驻时生产力+10%");
        assert_eq!(info.building, room);
        assert!(info.is.is_empty() && info.num.is_empty());
        assert_eq!(
            serde_json::to_string(&info).unwrap(),
            r#"{"building":"PRIVATE","num":{},"is":{}}"#
        );
    }

    #[test]
    fn test_first_pattern_wins_within_category() {
        let mut lib = crate::rule::builtin_rule_library();
        lib.room_rules.insert(
            RoomType::Manufacture,
            vec![PatternRule::new(
                "测试",
                &[r"生产力\+(?<first>[\d.]+)", r"生产力\+(?<second>[\d.]+)"],
            )],
        );
        let classifier = BuffClassifier::new(&lib).unwrap();
        let info = classifier.classify_one(RoomType::Manufacture, "生产力+5%");
        assert_eq!(info.num.keys().collect::<Vec<_>>(), vec!["first"]);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let mut rooms = IndexMap::new();
        let mut descriptions = IndexMap::new();
        rooms.insert("a1".to_string(), RoomType::Manufacture);
        descriptions.insert("a1".to_string(), "生产力<@cc.vup>+25%</>".to_string());
        rooms.insert("b2".to_string(), RoomType::Power);
        descriptions.insert("b2".to_string(), "无人机充能速度+10%".to_string());
        rooms.insert("c3".to_string(), RoomType::Corridor);

        let classifier = classifier();
        let first = classifier.classify(&rooms, &descriptions);
        let second = classifier.classify(&rooms, &descriptions);
        assert_eq!(first, second);
        assert_eq!(first.info["a1"].num["product"], 25.0);
        assert!(first.info["c3"].num.is_empty());
        assert_eq!(
            serde_json::to_string(&first.info).unwrap(),
            serde_json::to_string(&second.info).unwrap()
        );
    }
}
