use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tokio::io::BufReader;

use smart_answer_scorer::cli::Cli;
use smart_answer_scorer::utils::logging;
use smart_answer_scorer::{App, Config, RunMode};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 加载配置
    let config = cli.apply_to(Config::from_env()?);

    // 初始化日志
    logging::init(config.verbose_logging);

    let mode = cli.run_mode().await?;
    let single_shot = matches!(mode, RunMode::Single { .. });

    // 初始化并运行应用
    let app = App::initialize(config)?;
    let stats = app
        .run(mode, BufReader::new(tokio::io::stdin()), &mut std::io::stdout())
        .await?;

    if single_shot && !stats.all_succeeded() {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
