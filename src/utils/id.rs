//! 游戏数据 ID 规范化工具

use once_cell::sync::Lazy;
use regex::Regex;

static BRACKET_INDEX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([0-9]+?)\]").expect("ID 规范化正则非法"));

/// `name[12]` -> `name_12`
pub fn standardize_id(id: &str) -> String {
    BRACKET_INDEX_REGEX.replace_all(id, "_$1").into_owned()
}

/// 可获得的干员：ID 以 `char_` 段开头且未标记为不可获得
pub fn is_operator(id: &str, is_not_obtainable: bool) -> bool {
    id.split('_').next() == Some("char") && !is_not_obtainable
}

/// 去掉干员 ID 的 `char_` 前缀
pub fn short_char_id(id: &str) -> &str {
    id.strip_prefix("char_").unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardize_id() {
        assert_eq!(standardize_id("control_tra_spd[010]"), "control_tra_spd_010");
        assert_eq!(standardize_id("manu_prod_spd[1][2]"), "manu_prod_spd_1_2");
        assert_eq!(standardize_id("manu_prod_spd"), "manu_prod_spd");
    }

    #[test]
    fn test_is_operator() {
        assert!(is_operator("char_002_amiya", false));
        assert!(!is_operator("char_002_amiya", true));
        assert!(!is_operator("token_10001_deepcl_tentac", false));
        assert!(!is_operator("trap_001_crate", false));
    }

    #[test]
    fn test_short_char_id() {
        assert_eq!(short_char_id("char_002_amiya"), "002_amiya");
        assert_eq!(short_char_id("npc_001"), "npc_001");
    }
}
