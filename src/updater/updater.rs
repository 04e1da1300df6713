//! 数据更新入口
//! 加载游戏数据后按语言区依次生成基建、富文本与术语输出

use std::time::Instant;
use tracing::{error, info};

use super::building::BuildingUpdater;
use super::rich_text::{class_colors, render_css, term_dictionary};
use crate::classifier::{get_global_classifier, init_classifier, BuffClassifier};
use crate::config::GlobalConfig;
use crate::error::ArkResult;
use crate::gamedata::{GameDataLoader, GameDataSet, Locale, LOCALES};
use crate::utils::OutputWriter;

/// 一次更新的结果
#[derive(Debug, Clone, Default)]
pub struct UpdateSummary {
    /// 实际写入（内容有变化）的文件
    pub written: Vec<String>,
    /// 数据不完整而跳过的语言区
    pub skipped_locales: Vec<String>,
}

/// 数据更新器
pub struct DataUpdater {
    config: GlobalConfig,
    classifier: &'static BuffClassifier,
    writer: OutputWriter,
}

impl DataUpdater {
    pub fn new(config: GlobalConfig) -> ArkResult<Self> {
        init_classifier()?;
        let classifier = get_global_classifier()?;
        let writer = OutputWriter::new(&config.out_dir);
        Ok(Self {
            config,
            classifier,
            writer,
        })
    }

    /// 拉取数据并更新全部输出
    pub async fn start(&self) -> ArkResult<UpdateSummary> {
        let start = Instant::now();
        let loader = GameDataLoader::new(&self.config)?;
        let data_set = loader.load_all().await?;
        let summary = self.update_from(&data_set)?;
        info!("Update completed ({:?})", start.elapsed());
        Ok(summary)
    }

    /// 基于已加载的数据更新输出
    ///
    /// 基准语言区数据缺失时直接报错；其他语言区缺失时记录并跳过。
    pub fn update_from(&self, data_set: &GameDataSet) -> ArkResult<UpdateSummary> {
        let mut summary = UpdateSummary::default();
        let mut building = BuildingUpdater::new(self.config.hash_prefix_floor);

        for locale in LOCALES {
            let data = match data_set.parse_locale(locale.short) {
                Ok(data) => data,
                Err(e) if locale.is_canonical() => return Err(e),
                Err(e) => {
                    error!("语言区 {} 数据不完整，跳过：{}", locale, e);
                    summary.skipped_locales.push(locale.short.to_string());
                    continue;
                }
            };

            if locale.is_canonical() {
                let css = render_css(&class_colors(&data.gamedata_const.rich_text_styles));
                self.record(&mut summary, "data/richText.css", self.writer.write_text("richText.css", &css, false)?);
            }

            let terms = term_dictionary(&data.gamedata_const.term_description_dict);
            self.record_locale(&mut summary, &locale, "term.json", self.writer.write_locale(locale.short, "term.json", &terms, false)?);

            let output = building.update(&locale, &data, self.classifier)?;
            if let Some(dataset) = &output.dataset {
                self.record(&mut summary, "data/building.json", self.writer.write_data("building.json", dataset, false)?);
            }
            self.record_locale(
                &mut summary,
                &locale,
                "building.json",
                self.writer.write_locale(locale.short, "building.json", &output.locale, false)?,
            );
        }

        Ok(summary)
    }

    fn record(&self, summary: &mut UpdateSummary, name: &str, written: bool) {
        if written {
            summary.written.push(name.to_string());
        }
    }

    fn record_locale(&self, summary: &mut UpdateSummary, locale: &Locale, name: &str, written: bool) {
        self.record(summary, &format!("locales/{}/{}", locale, name), written);
    }
}
