//! 富文本标签清理
//! 描述文本中的 `<@cc.vup>制造站</>` 形式标签只保留内容

use std::borrow::Cow;
use once_cell::sync::Lazy;
use regex::Regex;

/// 单层标签：开标签到首个 `>` 为止，闭合标签为 `</>`（兼容具名闭合），内容不含尖括号
static RICH_TEXT_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>([^<>]+)</[^<>]*>").expect("富文本标签正则非法"));

/// 富文本清理工具
pub struct RichTextStripper;

impl RichTextStripper {
    /// 反复剥离标签直到不再有可剥离的包裹
    ///
    /// 每轮至少消除一个包裹，因此必然终止；不含完整包裹的输入原样返回。
    pub fn strip(text: &str) -> Cow<'_, str> {
        let mut current = Cow::Borrowed(text);
        while RICH_TEXT_TAG_REGEX.is_match(&current) {
            let replaced = RICH_TEXT_TAG_REGEX.replace_all(&current, "$1").into_owned();
            current = Cow::Owned(replaced);
        }
        current
    }
}
