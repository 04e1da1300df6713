//! 规则编译器核心
//! 仅负责将规则表编译为可执行的正则模式

use std::collections::HashMap;
use std::time::Instant;
use regex::Regex;
use once_cell::sync::Lazy;
use tracing::debug;

use super::pattern::{CompiledCategoryRule, CompiledPattern, CompiledRuleLibrary, LookbehindGuard};
use crate::rule::{PatternRule, RuleLibrary};
use crate::error::{ArkResult, RsArkError};

/// 负向后顾 `(?<!...)`
static LOOK_BEHIND_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\?<!([^()]*)\)").expect("后顾语法正则非法")
});
/// 不支持的环视：前瞻 `(?=` `(?!` 与正向后顾 `(?<=`
static UNSUPPORTED_LOOK_AROUND_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\?(?:=|!|<=)").expect("环视语法正则非法")
});

/// 后顾标记组名前缀
const GUARD_GROUP_PREFIX: &str = "__lb";

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则库
    pub fn compile(rule_lib: &RuleLibrary) -> ArkResult<CompiledRuleLibrary> {
        let start = Instant::now();
        let mut stats = CompileStats::default();

        // 1. 编译房间专属规则表
        let mut room_rules = HashMap::new();
        for (room, rules) in &rule_lib.room_rules {
            let compiled = rules
                .iter()
                .map(|rule| Self::compile_category_rule(rule, &mut stats))
                .collect::<ArkResult<Vec<_>>>()?;
            stats.room_count += 1;
            room_rules.insert(room.clone(), compiled);
        }

        // 2. 编译通用兜底规则
        let mut fallback_rules = HashMap::new();
        for (room, rule) in &rule_lib.fallback_rules {
            let compiled = Self::compile_category_rule(rule, &mut stats)?;
            stats.fallback_count += 1;
            fallback_rules.insert(room.clone(), compiled);
        }

        // 3. 输出编译统计
        debug!("✅ 规则编译完成，总耗时{:?}", start.elapsed());
        debug!(
            "📊 编译统计：房间表{}个、兜底规则{}条、分类{}个、正则{}条、后顾校验{}处",
            stats.room_count,
            stats.fallback_count,
            stats.category_count,
            stats.pattern_count,
            stats.guard_count
        );

        Ok(CompiledRuleLibrary {
            room_rules,
            fallback_rules,
            num_key: rule_lib.num_key.clone(),
        })
    }

    /// 编译单个分类规则
    fn compile_category_rule(
        rule: &PatternRule,
        stats: &mut CompileStats,
    ) -> ArkResult<CompiledCategoryRule> {
        if rule.patterns.is_empty() {
            return Err(RsArkError::RuleCompileError(format!(
                "分类 {} 没有任何正则",
                rule.category
            )));
        }

        let patterns = rule
            .patterns
            .iter()
            .map(|raw| {
                Self::compile_single_pattern(raw).map_err(|e| {
                    RsArkError::RuleCompileError(format!("分类 {} 的正则 {} 无效：{}", rule.category, raw, e))
                })
            })
            .collect::<ArkResult<Vec<_>>>()?;

        stats.category_count += 1;
        stats.pattern_count += patterns.len();
        stats.guard_count += patterns.iter().map(|p| p.guards.len()).sum::<usize>();

        Ok(CompiledCategoryRule {
            category: rule.category.clone(),
            patterns,
        })
    }

    /// 编译单个正则模式（改写 regex crate 不支持的负向后顾）
    pub fn compile_single_pattern(raw_pattern: &str) -> ArkResult<CompiledPattern> {
        if UNSUPPORTED_LOOK_AROUND_REGEX.is_match(raw_pattern) {
            return Err(RsArkError::RuleCompileError(format!(
                "不支持的环视语法：{}",
                raw_pattern
            )));
        }

        let (cleaned_pattern, guards) = Self::rewrite_look_behind(raw_pattern)?;
        let regex = Regex::new(&Self::ascii_digit_classes(&cleaned_pattern))?;

        Ok(CompiledPattern { regex, guards })
    }

    /// 将每个 `(?<!literal)` 替换为空的具名标记组，并记录对应的校验
    fn rewrite_look_behind(raw_pattern: &str) -> ArkResult<(String, Vec<LookbehindGuard>)> {
        let mut cleaned = String::with_capacity(raw_pattern.len());
        let mut guards = Vec::new();
        let mut last_end = 0;

        for captures in LOOK_BEHIND_REGEX.captures_iter(raw_pattern) {
            let (Some(whole), Some(body)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let literal = body.as_str();
            if literal.is_empty() || regex::escape(literal) != literal {
                return Err(RsArkError::RuleCompileError(format!(
                    "负向后顾只支持非空字面量：{}",
                    literal
                )));
            }

            let group = format!("{}{}", GUARD_GROUP_PREFIX, guards.len());
            cleaned.push_str(&raw_pattern[last_end..whole.start()]);
            cleaned.push_str(&format!("(?<{}>)", group));
            last_end = whole.end();

            guards.push(LookbehindGuard {
                group,
                forbidden: literal.to_string(),
            });
        }
        cleaned.push_str(&raw_pattern[last_end..]);

        Ok((cleaned, guards))
    }

    /// 将 `\d` / `\D` 收窄为 ASCII 数字
    ///
    /// regex crate 的 `\d` 匹配任意 Unicode 数字（如全角 `３`），规则表按 ASCII 数字书写。
    /// 字符类内部改写为范围 `0-9`，外部改写为 `[0-9]`。
    fn ascii_digit_classes(pattern: &str) -> String {
        let mut rewritten = String::with_capacity(pattern.len());
        let mut class_depth = 0usize;
        let mut chars = pattern.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('d') if class_depth > 0 => rewritten.push_str("0-9"),
                    Some('d') => rewritten.push_str("[0-9]"),
                    Some('D') => rewritten.push_str("[^0-9]"),
                    Some(escaped) => {
                        rewritten.push('\\');
                        rewritten.push(escaped);
                    }
                    None => rewritten.push('\\'),
                },
                '[' => {
                    class_depth += 1;
                    rewritten.push(c);
                }
                ']' if class_depth > 0 => {
                    class_depth -= 1;
                    rewritten.push(c);
                }
                _ => rewritten.push(c),
            }
        }
        rewritten
    }
}

/// 编译统计信息
#[derive(Debug, Clone, Default)]
struct CompileStats {
    room_count: usize,
    fallback_count: usize,
    category_count: usize,
    pattern_count: usize,
    guard_count: usize,
}
