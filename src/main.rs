use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use rsarkdata::{ConfigManager, CoverageChecker, CustomConfigBuilder, DataUpdater, GameDataSource};

#[derive(Parser)]
#[command(name = "rsarkdata")]
#[command(about = "明日方舟基建数据更新工具", long_about = None)]
struct Cli {
    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Remote,
    Local,
}

#[derive(Subcommand)]
enum Commands {
    /// 拉取游戏数据并更新输出
    Update {
        #[arg(long, value_enum)]
        source: Option<SourceArg>,
        /// 本地游戏数据目录（--source local）
        #[arg(long)]
        local_dir: Option<PathBuf>,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        retries: Option<u32>,
        /// 请求超时（秒）
        #[arg(long)]
        timeout: Option<u64>,
        /// GitHub 代理前缀，传空字符串禁用
        #[arg(long)]
        proxy: Option<String>,
    },
    /// 列出未提取到数值的基建技能描述
    Check {
        #[arg(long)]
        out: Option<PathBuf>,
        /// 忽略列表（短哈希 JSON 数组）
        #[arg(long)]
        ignore: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match cli.command {
        Commands::Update {
            source,
            local_dir,
            out,
            retries,
            timeout,
            proxy,
        } => {
            let env_config = ConfigManager::from_env();
            let mut builder = CustomConfigBuilder::from_config(env_config);

            match source {
                Some(SourceArg::Remote) => builder = builder.source(GameDataSource::Remote),
                Some(SourceArg::Local) => {
                    let dir = local_dir.unwrap_or_else(|| PathBuf::from("ArknightsGameData"));
                    builder = builder.source(GameDataSource::Local(dir));
                }
                None => {
                    if let Some(dir) = local_dir {
                        builder = builder.source(GameDataSource::Local(dir));
                    }
                }
            }
            if let Some(out) = out {
                builder = builder.out_dir(out);
            }
            if let Some(retries) = retries {
                builder = builder.max_retries(retries);
            }
            if let Some(timeout) = timeout {
                builder = builder.http_timeout(timeout);
            }
            if let Some(proxy) = proxy {
                builder = builder.gh_proxy_url(proxy);
            }

            let updater = DataUpdater::new(builder.build())?;
            let summary = updater.start().await?;
            if summary.written.is_empty() {
                tracing::info!("没有需要更新的文件");
            }
            if !summary.skipped_locales.is_empty() {
                tracing::warn!("已跳过语言区：{}", summary.skipped_locales.join(", "));
            }
        }
        Commands::Check { out, ignore } => {
            let out = out.unwrap_or_else(|| ConfigManager::from_env().out_dir);
            let ignore = match ignore {
                Some(path) => CoverageChecker::load_ignore_list(&path)?,
                None => Default::default(),
            };
            let uncovered = CoverageChecker::check_dir(&out, &ignore)?;
            let hashes: Vec<&str> = uncovered.iter().map(|u| u.hash.as_str()).collect();
            println!("{}", serde_json::to_string(&hashes)?);
            for entry in &uncovered {
                println!("{}", entry.description);
            }
        }
    }

    Ok(())
}
