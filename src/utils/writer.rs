//! 输出写入工具
//! 仅在内容变化时写盘，保证重复运行不产生无意义的改动

use std::fs;
use std::path::{Path, PathBuf};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ArkResult, RsArkError};

/// 输出写入器（根目录下分 data/ 与 locales/{locale}/）
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn locale_dir(&self, locale: &str) -> PathBuf {
        self.root.join("locales").join(locale)
    }

    /// 写入 data/{name}
    pub fn write_data<T: Serialize>(&self, name: &str, value: &T, allow_empty: bool) -> ArkResult<bool> {
        let value = serde_json::to_value(value)?;
        if !allow_empty {
            check_not_empty(name, &value)?;
        }
        let written = write_json_if_changed(&self.data_dir().join(name), &value)?;
        if written {
            info!("Update {}", name);
        }
        Ok(written)
    }

    /// 写入 locales/{locale}/{name}
    pub fn write_locale<T: Serialize>(
        &self,
        locale: &str,
        name: &str,
        value: &T,
        allow_empty: bool,
    ) -> ArkResult<bool> {
        let value = serde_json::to_value(value)?;
        if !allow_empty {
            check_not_empty(&format!("{}/{}", locale, name), &value)?;
        }
        let written = write_json_if_changed(&self.locale_dir(locale).join(name), &value)?;
        if written {
            info!("Update {} {}", locale, name);
        }
        Ok(written)
    }

    /// 写入 data/{name} 纯文本
    pub fn write_text(&self, name: &str, text: &str, allow_empty: bool) -> ArkResult<bool> {
        if !allow_empty && text.is_empty() {
            return Err(RsArkError::EmptyOutput(name.to_string()));
        }
        let written = write_text_if_changed(&self.data_dir().join(name), text)?;
        if written {
            info!("Update {}", name);
        }
        Ok(written)
    }
}

/// 空对象/空数组/null 视为空
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(list) => list.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// 非空校验
pub fn check_not_empty(name: &str, value: &Value) -> ArkResult<()> {
    if is_empty_value(value) {
        return Err(RsArkError::EmptyOutput(name.to_string()));
    }
    Ok(())
}

fn write_json_if_changed(path: &Path, value: &Value) -> ArkResult<bool> {
    if path.exists() {
        let unchanged = fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .is_some_and(|existing| existing == *value);
        if unchanged {
            debug!("内容未变化，跳过写入：{}", path.display());
            return Ok(false);
        }
    } else if is_empty_value(value) {
        return Ok(false);
    }

    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    ensure_parent(path)?;
    fs::write(path, content)?;
    Ok(true)
}

fn write_text_if_changed(path: &Path, text: &str) -> ArkResult<bool> {
    if path.exists() {
        if fs::read_to_string(path)? == text {
            debug!("内容未变化，跳过写入：{}", path.display());
            return Ok(false);
        }
    } else if text.is_empty() {
        return Ok(false);
    }

    ensure_parent(path)?;
    fs::write(path, text)?;
    Ok(true)
}

fn ensure_parent(path: &Path) -> ArkResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
