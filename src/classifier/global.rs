//! 全局分类器单例管理
use indexmap::IndexMap;
use once_cell::sync::OnceCell;

use super::classifier::{BuffClassifier, Classification};
use crate::error::{ArkResult, RsArkError};
use crate::rule::{RoomType, RuleLibrary};

/// 全局分类器实例
static GLOBAL_CLASSIFIER: OnceCell<BuffClassifier> = OnceCell::new();

/// 初始化全局分类器（内置规则表）
pub fn init_classifier() -> ArkResult<()> {
    GLOBAL_CLASSIFIER.get_or_try_init(BuffClassifier::builtin)?;
    Ok(())
}

/// 使用自定义规则库初始化全局分类器，已初始化时保持原实例
pub fn init_classifier_with_rules(rule_lib: &RuleLibrary) -> ArkResult<()> {
    GLOBAL_CLASSIFIER.get_or_try_init(|| BuffClassifier::new(rule_lib))?;
    Ok(())
}

/// 获取全局分类器
pub fn get_global_classifier() -> ArkResult<&'static BuffClassifier> {
    GLOBAL_CLASSIFIER.get().ok_or(RsArkError::ClassifierNotInitialized)
}

/// 使用全局分类器批量分类
pub fn process_building_skills(
    hash_to_room: &IndexMap<String, RoomType>,
    hash_to_description: &IndexMap<String, String>,
) -> ArkResult<Classification> {
    let classifier = get_global_classifier()?;
    Ok(classifier.classify(hash_to_room, hash_to_description))
}
