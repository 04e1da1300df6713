//! 编译后模式模型
//! 正则编译后的结构

use std::collections::HashMap;
use regex::{Captures, Regex};

use crate::rule::{NumKeySchema, RoomType};

/// 负向后顾校验：标记组命中时，其起点之前不得紧接 `forbidden`
#[derive(Debug, Clone)]
pub struct LookbehindGuard {
    pub group: String,
    pub forbidden: String,
}

/// 编译后的正则模式
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub regex: Regex,
    pub guards: Vec<LookbehindGuard>,
}

impl CompiledPattern {
    /// 查找最左侧通过全部后顾校验的匹配
    ///
    /// 候选匹配校验失败时，从其起点的下一个字符重新搜索。
    pub fn captures<'h>(&self, haystack: &'h str) -> Option<Captures<'h>> {
        let mut start = 0;
        while start <= haystack.len() {
            let captures = self.regex.captures_at(haystack, start)?;
            let whole = captures.get(0)?;
            if self.guards_pass(haystack, &captures) {
                return Some(captures);
            }
            start = whole.start()
                + haystack[whole.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }
        None
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.captures(haystack).is_some()
    }

    /// 命中的具名捕获组（不含后顾标记组）
    pub fn named_groups<'p, 'h>(
        &'p self,
        captures: &'p Captures<'h>,
    ) -> impl Iterator<Item = (&'p str, &'h str)> + 'p {
        self.regex
            .capture_names()
            .flatten()
            .filter(move |name| !self.guards.iter().any(|g| g.group == *name))
            .filter_map(move |name| captures.name(name).map(|m| (name, m.as_str())))
    }

    /// 规则描述
    pub fn describe(&self) -> &str {
        self.regex.as_str()
    }

    fn guards_pass(&self, haystack: &str, captures: &Captures<'_>) -> bool {
        self.guards.iter().all(|guard| match captures.name(&guard.group) {
            Some(marker) => !haystack[..marker.start()].ends_with(guard.forbidden.as_str()),
            None => true,
        })
    }
}

/// 编译后的分类规则（模式列表非空，按顺序尝试）
#[derive(Debug, Clone)]
pub struct CompiledCategoryRule {
    pub category: String,
    pub patterns: Vec<CompiledPattern>,
}

impl CompiledCategoryRule {
    /// 返回首个匹配的模式及其捕获
    pub fn first_match<'r, 'h>(
        &'r self,
        haystack: &'h str,
    ) -> Option<(&'r CompiledPattern, Captures<'h>)> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.captures(haystack).map(|caps| (pattern, caps)))
    }
}

/// 规则表查找结果
#[derive(Debug, Clone, Copy)]
pub enum TableLookup<'a> {
    /// 房间专属规则表
    Specific(&'a [CompiledCategoryRule]),
    /// 通用兜底规则（只合并数值，不标记分类）
    Fallback(&'a CompiledCategoryRule),
    None,
}

/// 编译后的规则库
#[derive(Debug, Clone)]
pub struct CompiledRuleLibrary {
    pub room_rules: HashMap<RoomType, Vec<CompiledCategoryRule>>,
    pub fallback_rules: HashMap<RoomType, CompiledCategoryRule>,
    pub num_key: NumKeySchema,
}

impl CompiledRuleLibrary {
    /// 专属表优先，其次兜底表
    pub fn resolve(&self, room: &RoomType) -> TableLookup<'_> {
        if let Some(rules) = self.room_rules.get(room) {
            TableLookup::Specific(rules)
        } else if let Some(rule) = self.fallback_rules.get(room) {
            TableLookup::Fallback(rule)
        } else {
            TableLookup::None
        }
    }
}
