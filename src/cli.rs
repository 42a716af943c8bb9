//! 命令行参数

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::AppResult;
use crate::orchestrator::RunMode;

/// Smart Answer Scorer: AI-powered feedback for student responses
#[derive(Debug, Parser)]
#[command(name = "smart-answer-scorer", version)]
pub struct Cli {
    /// The concept or question (single-shot mode, needs an answer)
    #[arg(short, long, requires = "answer_source")]
    pub question: Option<String>,

    /// The student's explanation or definition
    #[arg(short, long, group = "answer_source", requires = "question")]
    pub answer: Option<String>,

    /// Read the student's answer from a file
    #[arg(long, value_name = "PATH", group = "answer_source", requires = "question")]
    pub answer_file: Option<PathBuf>,

    /// Secrets file holding `[api] GEMINI_API_KEY`
    #[arg(long, value_name = "PATH")]
    pub secrets: Option<String>,

    /// Model name
    #[arg(long)]
    pub model: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long)]
    pub api_base: Option<String>,

    /// Print the single-shot result as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 命令行参数覆盖环境变量配置
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(secrets) = &self.secrets {
            config.secrets_file = secrets.clone();
        }
        if let Some(model) = &self.model {
            config.llm_model_name = model.clone();
        }
        if let Some(api_base) = &self.api_base {
            config.llm_api_base_url = api_base.clone();
        }
        if self.verbose {
            config.verbose_logging = true;
        }
        config
    }

    /// 同时给出题目和答案时为单次模式，否则进入交互式表单
    ///
    /// 只给出其中一项的参数组合由 clap 在解析时拒绝。
    pub async fn run_mode(&self) -> AppResult<RunMode> {
        let answer = match (&self.question, &self.answer, &self.answer_file) {
            (Some(_), Some(answer), _) => answer.clone(),
            (Some(_), None, Some(path)) => tokio::fs::read_to_string(path).await?,
            _ => return Ok(RunMode::Interactive),
        };

        Ok(RunMode::Single {
            question: self.question.clone().unwrap_or_default(),
            answer,
            json: self.json,
        })
    }
}
