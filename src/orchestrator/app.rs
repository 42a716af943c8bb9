//! 应用主流程 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：确认 API 密钥、创建 LLM 服务和评分流程
//! 2. **读取表单**：单次模式直接使用命令行参数，交互模式循环读取终端输入
//! 3. **串行处理**：一次只处理一个提交，处理完才读取下一个
//! 4. **展示结果**：把每次提交的结果渲染到输出
//! 5. **会话统计**：结束时输出统计信息

use std::io::Write;
use tokio::io::AsyncBufRead;
use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::grading::DisplayOutcome;
use crate::orchestrator::form::FormReader;
use crate::orchestrator::render::{
    outcome_to_json, render_header, render_outcome, render_separator,
};
use crate::services::{CompletionService, LlmService};
use crate::utils::logging::log_startup;
use crate::workflow::{GradingFlow, SubmissionCtx};

/// 运行模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// 命令行直接给出题目和答案，评估一次后退出
    Single {
        question: String,
        answer: String,
        json: bool,
    },
    /// 交互式表单，直到输入结束
    Interactive,
}

/// 会话统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub submissions: usize,
    pub success: usize,
    pub missing_input: usize,
    pub parse_failure: usize,
    pub transport_error: usize,
}

impl SessionStats {
    fn record(&mut self, outcome: &DisplayOutcome) {
        self.submissions += 1;
        match outcome {
            DisplayOutcome::Success(_) => self.success += 1,
            DisplayOutcome::MissingInput => self.missing_input += 1,
            DisplayOutcome::ParseFailure { .. } => self.parse_failure += 1,
            DisplayOutcome::TransportError { .. } => self.transport_error += 1,
        }
    }

    /// 所有提交都评分成功
    pub fn all_succeeded(&self) -> bool {
        self.success == self.submissions
    }
}

/// 应用主结构
pub struct App<C = LlmService> {
    config: Config,
    flow: GradingFlow<C>,
}

impl App<LlmService> {
    /// 初始化应用
    ///
    /// 没有可用的 API 密钥时直接失败，不进入表单。
    pub fn initialize(config: Config) -> AppResult<Self> {
        let config = config.resolve_api_key()?;

        log_startup(&config);

        let llm_service = LlmService::new(&config);
        Ok(Self::with_completion(config, llm_service))
    }
}

impl<C: CompletionService> App<C> {
    /// 使用指定的补全服务创建应用
    pub fn with_completion(config: Config, completion: C) -> Self {
        Self {
            config,
            flow: GradingFlow::new(completion),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 运行应用主逻辑
    pub async fn run<R, W>(
        &self,
        mode: RunMode,
        input: R,
        output: &mut W,
    ) -> AppResult<SessionStats>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let stats = match mode {
            RunMode::Single {
                question,
                answer,
                json,
            } => self.run_single(&question, &answer, json, output).await?,
            RunMode::Interactive => self.run_interactive(input, output).await?,
        };

        print_final_stats(&stats);

        Ok(stats)
    }

    async fn run_single(
        &self,
        question: &str,
        answer: &str,
        json: bool,
        output: &mut impl Write,
    ) -> AppResult<SessionStats> {
        let outcome = self.flow.evaluate(question, answer).await;

        if json {
            let document = serde_json::to_string_pretty(&outcome_to_json(&outcome))?;
            writeln!(output, "{}", document)?;
            output.flush()?;
        } else {
            render_outcome(&outcome, output)?;
        }

        let mut stats = SessionStats::default();
        stats.record(&outcome);
        Ok(stats)
    }

    async fn run_interactive<R: AsyncBufRead + Unpin>(
        &self,
        input: R,
        output: &mut impl Write,
    ) -> AppResult<SessionStats> {
        render_header(output)?;

        let mut form = FormReader::new(input);
        let mut stats = SessionStats::default();

        while let Some(submission) = form.next_submission(output).await? {
            let ctx = SubmissionCtx::new(stats.submissions + 1);
            let outcome = self
                .flow
                .run(&ctx, &submission.question, &submission.answer)
                .await;

            render_separator(output)?;
            render_outcome(&outcome, output)?;
            render_separator(output)?;

            stats.record(&outcome);
        }

        Ok(stats)
    }
}

// ========== 日志辅助函数 ==========

fn print_final_stats(stats: &SessionStats) {
    info!("{}", "=".repeat(60));
    info!("📊 会话统计");
    info!("提交次数: {}", stats.submissions);
    info!("✅ 评分成功: {}", stats.success);
    info!("⚠️ 输入为空: {}", stats.missing_input);
    info!("❌ 解析失败: {}", stats.parse_failure);
    info!("❌ 调用失败: {}", stats.transport_error);
    info!("{}", "=".repeat(60));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_without_key_fails() {
        let config = Config {
            secrets_file: "/nonexistent/secrets.toml".to_string(),
            ..Config::default()
        };
        assert!(App::initialize(config).is_err());
    }

    #[test]
    fn test_initialize_with_key() {
        let config = Config {
            llm_api_key: "test-key".to_string(),
            ..Config::default()
        };
        let app = App::initialize(config).unwrap();
        assert_eq!(app.config().llm_api_key, "test-key");
    }

    #[test]
    fn test_stats_record() {
        let mut stats = SessionStats::default();
        stats.record(&DisplayOutcome::MissingInput);
        stats.record(&DisplayOutcome::TransportError {
            message: "x".to_string(),
        });
        assert_eq!(stats.submissions, 2);
        assert_eq!(stats.missing_input, 1);
        assert_eq!(stats.transport_error, 1);
        assert!(!stats.all_succeeded());
    }
}
