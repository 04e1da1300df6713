//! 规则模块：负责规则表与分类结果的数据模型定义
pub mod model;
pub mod table;

// 导出核心接口
pub use self::model::{
    BuffInfo, NumKey, NumKeySchema, PatternRule, RoomType, RuleLibrary, FALLBACK_TABLE_KEY,
};
pub use self::table::{builtin_num_key, builtin_rule_library, BUILTIN_RULES};
