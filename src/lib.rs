//! rsarkdata - 明日方舟游戏数据更新工具（基建技能分类与数据集生成）

// 导出全局错误类型
pub use self::error::{RsArkError, ArkResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder, GameDataSource};

// 导出规则模块核心接口
pub use self::rule::{
    BuffInfo, NumKey, NumKeySchema, PatternRule, RoomType, RuleLibrary,
    builtin_rule_library, BUILTIN_RULES, FALLBACK_TABLE_KEY,
};

// 导出编译模块核心接口
pub use self::compiler::{
    CompiledCategoryRule, CompiledPattern, CompiledRuleLibrary, RuleCompiler, TableLookup,
};

// 导出分类模块核心接口
pub use self::classifier::{
    BuffClassifier,
    Classification,
    RichTextStripper,
    init_classifier,
    init_classifier_with_rules,
    get_global_classifier,
    process_building_skills,
};

// 导出工具模块核心接口
pub use self::utils::{content_hash, HashPrefixCompressor, NumExtractor, OutputWriter};

// 导出游戏数据与更新模块核心接口
pub use self::gamedata::{GameDataLoader, GameDataSet, GameTable, Locale, LOCALES};
pub use self::updater::{
    BuildingDataset, BuildingLocale, BuildingUpdater, CoverageChecker, DataUpdater, UpdateSummary,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod compiler;
pub mod classifier;
pub mod gamedata;
pub mod updater;
pub mod utils;
