//! 数值提取工具
//! 负责将正则具名捕获合并进分类结果的数值表

use indexmap::IndexMap;
use regex::Captures;
use tracing::warn;

use crate::compiler::CompiledPattern;

/// 数值提取工具
pub struct NumExtractor;

impl NumExtractor {
    /// 合并一次匹配的全部具名捕获，同名键后写覆盖先写
    pub fn merge(num: &mut IndexMap<String, f64>, pattern: &CompiledPattern, captures: &Captures<'_>) {
        for (name, raw) in pattern.named_groups(captures) {
            match Self::parse_leading_float(raw) {
                Some(value) => {
                    num.insert(name.to_string(), value);
                }
                None => warn!("捕获组 {} 的值 {:?} 不是数值，已忽略（规则={}）", name, raw, pattern.describe()),
            }
        }
    }

    /// 解析字符串开头最长的合法浮点数（"1.5.2" -> 1.5，"." -> None）
    pub fn parse_leading_float(raw: &str) -> Option<f64> {
        let trimmed = raw.trim_start();
        let mut seen_dot = false;
        // 最后一个数字之后的位置
        let mut digits_end = None;

        for (idx, c) in trimmed.char_indices() {
            match c {
                '0'..='9' => digits_end = Some(idx + 1),
                '.' if !seen_dot => seen_dot = true,
                '+' | '-' if idx == 0 => {}
                _ => break,
            }
        }

        digits_end.and_then(|len| trimmed[..len].parse::<f64>().ok())
    }
}
