//! 游戏数据模块：数据来源、数据表模型与加载器
pub mod source;
pub mod model;
pub mod loader;

pub use self::source::{GameTable, Locale, TableLocation, CANONICAL_LOCALE, LOCALES};
pub use self::model::{
    BuildingBuff, BuildingChar, BuildingData, Character, CharacterTable, GamedataConst,
    LocaleGameData, Phase, TermDescription,
};
pub use self::loader::{GameDataLoader, GameDataSet};
