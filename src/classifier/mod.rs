//! 分类模块：富文本清理、技能描述分类与全局单例
pub mod stripper;
pub mod classifier;
pub mod global;

pub use self::stripper::RichTextStripper;
pub use self::classifier::{BuffClassifier, Classification};
pub use self::global::{
    get_global_classifier, init_classifier, init_classifier_with_rules, process_building_skills,
};
