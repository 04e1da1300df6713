//! 更新模块：基建数据集、富文本样式、术语词典与覆盖率检查
pub mod dataset;
pub mod building;
pub mod rich_text;
pub mod coverage;
pub mod updater;

pub use self::dataset::{
    BuffData, BuildingBuffDataset, BuildingDataset, BuildingLocale, BuildingLocaleBuff, CharBuildingSkill,
    TermEntry,
};
pub use self::building::{BuildingOutput, BuildingUpdater};
pub use self::coverage::{CoverageChecker, UncoveredBuff};
pub use self::updater::{DataUpdater, UpdateSummary};
