//! 富文本样式表与术语词典

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use super::dataset::TermEntry;
use crate::gamedata::TermDescription;

static COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<color=(#[0-9A-F]+)>").expect("颜色正则非法"));
static NON_ALNUM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9a-zA-Z]").expect("类名正则非法"));
static NON_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9a-zA-Z_]").expect("词条键正则非法"));

/// 只处理 `cc.` 开头的样式与词条
const TERM_PREFIX: &str = "cc.";

/// 样式键 -> (CSS 类名, 颜色)，没有颜色的样式跳过
pub fn class_colors(rich_text_styles: &IndexMap<String, String>) -> IndexMap<String, String> {
    rich_text_styles
        .iter()
        .filter(|(key, _)| key.starts_with(TERM_PREFIX))
        .filter_map(|(key, style)| {
            let color = COLOR_REGEX.captures(style)?.get(1)?.as_str().to_string();
            Some((NON_ALNUM_REGEX.replace_all(key, "-").into_owned(), color))
        })
        .collect()
}

/// 生成样式表：`:root` 声明颜色变量，每个类名生成文字色与术语标记色两条规则
pub fn render_css(class_colors: &IndexMap<String, String>) -> String {
    let mut rules = Vec::with_capacity(class_colors.len() * 2 + 1);

    let declarations: String = class_colors
        .iter()
        .map(|(class, color)| format!("  --color-{}: {};\n", class, color))
        .collect();
    rules.push(format!(":root {{\n{}}}", declarations));

    for class in class_colors.keys() {
        rules.push(format!(".{} {{\n  color: var(--color-{});\n}}", class, class));
        rules.push(format!(
            ".riic-term .{}:before {{\n  background-color: var(--color-{});\n}}",
            class, class
        ));
    }

    rules.join("\n\n")
}

/// 术语词典：键中的非单词字符替换为 `_`，描述去掉 `\r`
pub fn term_dictionary(terms: &IndexMap<String, TermDescription>) -> IndexMap<String, TermEntry> {
    terms
        .iter()
        .filter(|(key, _)| key.starts_with(TERM_PREFIX))
        .map(|(key, term)| {
            (
                NON_WORD_REGEX.replace_all(key, "_").into_owned(),
                TermEntry {
                    name: term.term_name.clone(),
                    desc: term.description.replace('\r', ""),
                },
            )
        })
        .collect()
}
