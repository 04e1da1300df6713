//! 游戏数据来源定义：语言区与数据表

use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ArkResult;

/// 语言区（短名 + 仓库目录名）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    pub short: &'static str,
    pub lang: &'static str,
}

/// 内容哈希的基准语言区
pub const CANONICAL_LOCALE: &str = "cn";

/// 全部语言区，基准语言区必须排在首位
pub const LOCALES: [Locale; 5] = [
    Locale { short: "cn", lang: "zh_CN" },
    Locale { short: "tw", lang: "zh_TW" },
    Locale { short: "us", lang: "en_US" },
    Locale { short: "jp", lang: "ja_JP" },
    Locale { short: "kr", lang: "ko_KR" },
];

impl Locale {
    pub fn is_canonical(&self) -> bool {
        self.short == CANONICAL_LOCALE
    }

    pub fn find(short: &str) -> Option<Locale> {
        LOCALES.iter().copied().find(|l| l.short == short)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short)
    }
}

/// 需要加载的数据表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameTable {
    BuildingData,
    CharacterTable,
    GamedataConst,
}

impl GameTable {
    pub const ALL: [GameTable; 3] = [
        GameTable::BuildingData,
        GameTable::CharacterTable,
        GameTable::GamedataConst,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            GameTable::BuildingData => "building_data.json",
            GameTable::CharacterTable => "character_table.json",
            GameTable::GamedataConst => "gamedata_const.json",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            GameTable::BuildingData => "buildingData",
            GameTable::CharacterTable => "characterTable",
            GameTable::GamedataConst => "gamedataConst",
        }
    }
}

impl fmt::Display for GameTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 数据表的具体位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLocation {
    Remote(Url),
    Local(PathBuf),
}

impl fmt::Display for TableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableLocation::Remote(url) => write!(f, "{}", url),
            TableLocation::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// 仓库内相对路径：{lang}/gamedata/excel/{file}
pub fn table_relative_path(locale: &Locale, table: GameTable) -> String {
    format!("{}/gamedata/excel/{}", locale.lang, table.file_name())
}

/// 远程地址（根地址缺少结尾 `/` 时自动补齐）
pub fn remote_location(base_url: &str, locale: &Locale, table: GameTable) -> ArkResult<TableLocation> {
    let base = if base_url.ends_with('/') {
        Url::parse(base_url)?
    } else {
        Url::parse(&format!("{}/", base_url))?
    };
    Ok(TableLocation::Remote(base.join(&table_relative_path(locale, table))?))
}

pub fn local_location(dir: &Path, locale: &Locale, table: GameTable) -> TableLocation {
    TableLocation::Local(
        dir.join(locale.lang)
            .join("gamedata")
            .join("excel")
            .join(table.file_name()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_locale_first() {
        assert!(LOCALES[0].is_canonical());
        assert_eq!(LOCALES.iter().filter(|l| l.is_canonical()).count(), 1);
        assert_eq!(Locale::find("jp").map(|l| l.lang), Some("ja_JP"));
        assert!(Locale::find("de").is_none());
    }

    #[test]
    fn test_remote_location() {
        let us = Locale::find("us").unwrap();
        let with_slash = remote_location("https://example.com/repo/master/", &us, GameTable::BuildingData).unwrap();
        let without_slash = remote_location("https://example.com/repo/master", &us, GameTable::BuildingData).unwrap();
        assert_eq!(with_slash, without_slash);
        assert_eq!(
            with_slash.to_string(),
            "https://example.com/repo/master/en_US/gamedata/excel/building_data.json"
        );
    }

    #[test]
    fn test_local_location() {
        let cn = Locale::find("cn").unwrap();
        let location = local_location(Path::new("/data"), &cn, GameTable::GamedataConst);
        assert_eq!(
            location,
            TableLocation::Local(PathBuf::from("/data/zh_CN/gamedata/excel/gamedata_const.json"))
        );
    }
}
