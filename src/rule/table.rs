//! 内置基建技能规则表
//!
//! 分类与正则均按声明顺序生效：同一分类内先匹配者优先，
//! 更具体的写法必须排在更宽泛的写法之前。
//! 负向后顾 `(?<!字面量)` 由编译器改写为匹配后校验。

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::model::{NumKey, NumKeySchema, PatternRule, RoomType, RuleLibrary, FALLBACK_TABLE_KEY};

/// 会客室线索分类 -> 对应势力名
const MEETING_CLUES: [(&str, &str); 7] = [
    ("线索1", "莱茵生命"),
    ("线索2", "企鹅物流"),
    ("线索3", "黑钢国际"),
    ("线索4", "乌萨斯学生自治团"),
    ("线索5", "格拉斯哥帮"),
    ("线索6", "喀兰贸易"),
    ("线索7", "罗德岛制药"),
];

const TRAINING_PROFESSIONS: [&str; 8] = ["先锋", "狙击", "医疗", "术师", "近卫", "重装", "辅助", "特种"];

/// 全局内置规则库
pub static BUILTIN_RULES: Lazy<RuleLibrary> = Lazy::new(builtin_rule_library);

fn rule(category: &str, patterns: &[&str]) -> PatternRule {
    PatternRule::new(category, patterns)
}

/// 构建内置规则库
pub fn builtin_rule_library() -> RuleLibrary {
    let mut room_rules = IndexMap::new();

    room_rules.insert(
        RoomType::Manufacture,
        vec![
            rule(
                "通用生产",
                &[
                    r"(?<!配方的)生产力.*?最终达到\+(?<product>[\d.]+)",
                    r"(?<!配方的)生产力\+(?<product>[\d.]+)",
                    r"制造站.+最多(?:可以)?提供(?<product>[\d.]+)%生产力",
                    r"制造站.+每.+\+(?<product>[\d.]+)%生产力",
                    r"为当前制造站\+(?<product>[\d.]+)%的?生产力",
                    r"每格仓库容量.+(?<product>[\d.]+)%的?生产力",
                ],
            ),
            rule("贵金属", &[r"贵金属.*?生产力\+(?<product>[\d.]+)%"]),
            rule("作战记录", &[r"作战记录.*?生产力\+(?<product>[\d.]+)%"]),
            rule("源石", &[r"源石.*?生产力\+(?<product>[\d.]+)%"]),
            rule("仓库容量", &[r"仓库容量上限\+(?<capacity>[\d.]+)"]),
        ],
    );

    room_rules.insert(
        RoomType::Trading,
        vec![
            rule(
                "订单效率",
                &[
                    r"(?<!所有贸易站)订单(?:获取)?效率\+(?<order>[\d.]+)",
                    r"(?<!所有)贸易站.+最多提供(?<order>[\d.]+)%效率",
                    r"(?<!所有)贸易站.+自身\+(?<order>[\d.]+)%订单获取效率",
                    r"(?<!所有)贸易站.+每.+\+(?<order>[\d.]+)%(?:订单)?获取效率",
                    r"每\d+点.+\+(?<order>[\d.]+)%订单效率",
                ],
            ),
            rule("订单上限", &[r"订单上限\+(?<orderLimit>[\d.]+)"]),
            rule("高品质", &[r"高品质贵金属订单"]),
        ],
    );

    room_rules.insert(
        RoomType::Control,
        vec![
            rule("订单效率", &[r"控制中枢.*订单(?:获取)?效率\+(?<orderAll>[\d.]+)"]),
            rule("生产力", &[r"控制中枢.*生产力\+(?<productAll>[\d.]+)"]),
            rule(
                "心情消耗",
                &[r"控制中枢.*心情(?:每小时)?(?:消耗-|恢复\+)(?<moraleConsume>[\d.]+)"],
            ),
            rule("线索倾向", &[r"线索倾向", r"尚未拥有的线索"]),
            rule("线索搜集", &[r"线索搜集速度\+(?<collect>[\d.]+)"]),
        ],
    );

    room_rules.insert(
        RoomType::Dormitory,
        vec![
            rule("群体恢复", &[r"宿舍.*?所有干员.*?(?<moraleRecoveryAll>[\d.]+)"]),
            rule("单体恢复", &[r"宿舍.*?某个干员.*?(?<moraleRecoverySingle>[\d.]+)"]),
        ],
    );

    let mut meeting = vec![rule(
        "无特别加成",
        &[r"线索.*?速度.*?(?<collect>[\d.]+)", r"提升(?<collect>[\d.]+)%线索.*?速度"],
    )];
    for (category, faction) in MEETING_CLUES {
        let with_speed = format!(r"线索.*?速度.*?(?<collect>[\d.]+).*更容易获得{}", regex::escape(faction));
        let plain = regex::escape(faction);
        meeting.push(PatternRule::new(category, &[with_speed, plain]));
    }
    room_rules.insert(RoomType::Meeting, meeting);

    room_rules.insert(
        RoomType::Workshop,
        vec![
            rule("任意材料", &[r"任意类?材料.*?概率提升(?<byproduct>[\d.]+)%"]),
            rule("基建材料", &[r"基建材料.*?概率提升(?<byproduct>[\d.]+)%"]),
            rule("精英材料", &[r"(?:精英|(?<!任意)类)材料.*?概率提升(?<byproduct>[\d.]+)%"]),
            rule("技巧概要", &[r"技巧概要.*?概率提升(?<byproduct>[\d.]+)%"]),
            rule("芯片", &[r"芯片.*?概率提升(?<byproduct>[\d.]+)%"]),
        ],
    );

    let mut training = vec![rule(
        "全能",
        &[r"，干员.*?(?<train>[\d.]+)", r"干员为当前干员.*?(?<train>[\d.]+)"],
    )];
    for profession in TRAINING_PROFESSIONS {
        let pattern = format!(r"{}.*?(?<train>[\d.]+)", profession);
        training.push(PatternRule::new(profession, &[pattern]));
    }
    room_rules.insert(RoomType::Training, training);

    let mut fallback_rules = IndexMap::new();
    fallback_rules.insert(
        RoomType::Power,
        rule("POWER", &[r"(?:无人机|充能速度).*?(?<power>[\d.]+)"]),
    );
    fallback_rules.insert(
        RoomType::Hire,
        rule("HIRE", &[r"人脉资源.*?(?<connect>[\d.]+)", r"\+(?<connect>[\d.]+)%人脉资源"]),
    );

    RuleLibrary {
        room_rules,
        fallback_rules,
        num_key: builtin_num_key(),
    }
}

/// 构建内置数值键索引
pub fn builtin_num_key() -> NumKeySchema {
    fn section(entries: Vec<(&str, NumKey)>) -> IndexMap<String, NumKey> {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
    fn many(names: &[&str]) -> NumKey {
        NumKey::from(names)
    }

    let mut schema = NumKeySchema::new();
    schema.insert(
        FALLBACK_TABLE_KEY.to_string(),
        section(vec![
            ("MANUFACTURE", many(&["product", "capacity"])),
            ("TRADING", many(&["order", "orderLimit"])),
            ("POWER", "power".into()),
            ("CONTROL", many(&["orderAll", "productAll", "moraleConsume"])),
            ("DORMITORY", many(&["moraleRecoveryAll", "moraleRecoverySingle"])),
            ("MEETING", "collect".into()),
            ("WORKSHOP", "byproduct".into()),
            ("TRAINING", "train".into()),
            ("HIRE", "connect".into()),
        ]),
    );
    schema.insert(
        RoomType::Manufacture.to_string(),
        section(vec![
            ("通用生产", "product".into()),
            ("贵金属", "product".into()),
            ("作战记录", "product".into()),
            ("源石", "product".into()),
            ("仓库容量", "capacity".into()),
        ]),
    );
    schema.insert(
        RoomType::Trading.to_string(),
        section(vec![
            ("订单效率", "order".into()),
            ("订单上限", "orderLimit".into()),
            ("高品质", NumKey::none()),
        ]),
    );
    schema.insert(
        RoomType::Control.to_string(),
        section(vec![
            ("订单效率", "orderAll".into()),
            ("生产力", "productAll".into()),
            ("心情消耗", "moraleConsume".into()),
            ("线索倾向", NumKey::none()),
            ("线索搜集", "collect".into()),
        ]),
    );
    schema.insert(
        RoomType::Dormitory.to_string(),
        section(vec![
            ("群体恢复", "moraleRecoveryAll".into()),
            ("单体恢复", "moraleRecoverySingle".into()),
        ]),
    );

    let mut meeting = vec![("无特别加成", NumKey::from("collect"))];
    meeting.extend(MEETING_CLUES.iter().map(|(category, _)| (*category, NumKey::from("collect"))));
    schema.insert(RoomType::Meeting.to_string(), section(meeting));

    schema.insert(
        RoomType::Workshop.to_string(),
        section(vec![
            ("任意材料", "byproduct".into()),
            ("基建材料", "byproduct".into()),
            ("精英材料", "byproduct".into()),
            ("技巧概要", "byproduct".into()),
            ("芯片", "byproduct".into()),
        ]),
    );

    let mut training = vec![("全能", NumKey::from("train"))];
    training.extend(TRAINING_PROFESSIONS.iter().map(|p| (*p, NumKey::from("train"))));
    schema.insert(RoomType::Training.to_string(), section(training));

    schema
}
