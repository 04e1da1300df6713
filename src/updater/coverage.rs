//! 分类覆盖率检查
//! 列出没有提取到任何数值、且不在忽略列表中的技能描述

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dataset::{BuildingDataset, BuildingLocale};
use crate::error::{ArkResult, RsArkError};
use crate::gamedata::CANONICAL_LOCALE;

/// 未覆盖的单条描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncoveredBuff {
    pub hash: String,
    /// 基准语言区描述（缺失时为空）
    pub description: String,
}

/// 覆盖率检查器
pub struct CoverageChecker;

impl CoverageChecker {
    /// 读取输出目录下的 building.json 并检查
    pub fn check_dir(out_dir: &Path, ignore: &HashSet<String>) -> ArkResult<Vec<UncoveredBuff>> {
        let dataset: BuildingDataset = read_json(&out_dir.join("data").join("building.json"))?;
        let locale: BuildingLocale =
            read_json(&out_dir.join("locales").join(CANONICAL_LOCALE).join("building.json"))?;
        Ok(Self::check(&dataset, &locale, ignore))
    }

    pub fn check(
        dataset: &BuildingDataset,
        locale: &BuildingLocale,
        ignore: &HashSet<String>,
    ) -> Vec<UncoveredBuff> {
        let uncovered: Vec<UncoveredBuff> = dataset
            .buff
            .info
            .iter()
            .filter(|(hash, info)| info.num.is_empty() && !ignore.contains(hash.as_str()))
            .map(|(hash, _)| UncoveredBuff {
                hash: hash.clone(),
                description: locale.buff.description.get(hash).cloned().unwrap_or_default(),
            })
            .collect();
        debug!("覆盖率检查：共 {} 条，未覆盖 {} 条", dataset.buff.info.len(), uncovered.len());
        uncovered
    }

    /// 读取忽略列表（短哈希 JSON 数组）
    pub fn load_ignore_list(path: &Path) -> ArkResult<HashSet<String>> {
        let list: Vec<String> = read_json(path)?;
        Ok(list.into_iter().collect())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> ArkResult<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        RsArkError::GameDataLoadError(format!("读取 {} 失败：{}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> (BuildingDataset, BuildingLocale) {
        let dataset = serde_json::from_value(json!({
            "char": {"001_a": [{"id": "x", "unlock": "0_1"}]},
            "buff": {
                "data": {"x": {"icon": "i", "desc": "aaaa"}},
                "info": {
                    "aaaa": {"building": "MANUFACTURE", "num": {"product": 10}, "is": {"通用生产": 1}},
                    "bbbb": {"building": "TRADING", "num": {}, "is": {"高品质": 1}},
                    "cccc": {"building": "ELEVATOR", "num": {}, "is": {}}
                },
                "numKey": {}
            }
        }))
        .unwrap();
        let locale = serde_json::from_value(json!({
            "name": {},
            "buff": {"name": {}, "description": {"aaaa": "A", "bbbb": "B"}}
        }))
        .unwrap();
        (dataset, locale)
    }

    #[test]
    fn test_check_reports_numberless_entries() {
        let (dataset, locale) = fixture();
        let uncovered = CoverageChecker::check(&dataset, &locale, &HashSet::new());
        assert_eq!(
            uncovered,
            vec![
                UncoveredBuff { hash: "bbbb".to_string(), description: "B".to_string() },
                UncoveredBuff { hash: "cccc".to_string(), description: String::new() },
            ]
        );
    }

    #[test]
    fn test_check_respects_ignore_list() {
        let dir = tempfile::tempdir().unwrap();
        let ignore_path = dir.path().join("ignore.json");
        fs::write(&ignore_path, r#"["bbbb", "cccc"]"#).unwrap();

        let ignore = CoverageChecker::load_ignore_list(&ignore_path).unwrap();
        let (dataset, locale) = fixture();
        assert!(CoverageChecker::check(&dataset, &locale, &ignore).is_empty());
    }

    #[test]
    fn test_check_dir_missing_output() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CoverageChecker::check_dir(dir.path(), &HashSet::new()).is_err());
    }
}
