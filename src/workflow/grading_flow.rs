//! 评分流程 - 流程层
//!
//! 核心职责：定义"一次提交"的完整处理流程
//!
//! 流程顺序：
//! 1. 校验输入（任一为空直接返回，不调用模型）
//! 2. 构建提示词
//! 3. 调用模型（单次，不重试）
//! 4. 去掉代码块标记
//! 5. 解析 JSON

use tracing::{debug, error, info, warn};

use crate::models::grading::{DisplayOutcome, GradingRequest};
use crate::services::completion::CompletionService;
use crate::services::prompt::build_grading_prompt;
use crate::services::response_parser::parse_grading_response;
use crate::utils::logging::truncate_text;
use crate::workflow::submission_ctx::SubmissionCtx;

/// 评分流程
///
/// - 只依赖补全能力（`CompletionService`），不持有其他状态
/// - 所有失败都转换为 `DisplayOutcome`，不会向上抛错
pub struct GradingFlow<C> {
    completion: C,
}

impl<C: CompletionService> GradingFlow<C> {
    /// 创建新的评分流程
    pub fn new(completion: C) -> Self {
        Self { completion }
    }

    /// 评估一份答案
    pub async fn evaluate(&self, question: &str, answer: &str) -> DisplayOutcome {
        self.run(&SubmissionCtx::default(), question, answer).await
    }

    /// 带上下文地评估一份答案
    pub async fn run(&self, ctx: &SubmissionCtx, question: &str, answer: &str) -> DisplayOutcome {
        debug!("{} 校验输入", ctx);
        let request = match GradingRequest::new(question, answer) {
            Ok(request) => request,
            Err(e) => {
                warn!("{} ⚠️ {}", ctx, e);
                return DisplayOutcome::MissingInput;
            }
        };

        info!("{} 题目: {}", ctx, truncate_text(request.question.trim(), 80));

        let prompt = build_grading_prompt(&request);
        debug!("{} 提示词长度: {} 字符", ctx, prompt.len());

        info!("{} 🤖 正在调用模型评分...", ctx);
        let raw_output = match self.completion.complete(&prompt).await {
            Ok(raw_output) => raw_output,
            Err(e) => {
                error!("{} ❌ 模型调用失败: {}", ctx, e);
                return DisplayOutcome::TransportError {
                    message: e.to_string(),
                };
            }
        };

        debug!("{} 清理并解析模型输出", ctx);
        let outcome = parse_grading_response(&raw_output);

        match &outcome {
            DisplayOutcome::Success(result) => {
                info!("{} ✓ 评分完成", ctx);
                for issue in result.schema_issues() {
                    warn!("{} 评分结果格式不符合约定: {}", ctx, issue);
                }
            }
            DisplayOutcome::ParseFailure { .. } => {
                warn!("{} ⚠️ 模型没有返回合法 JSON", ctx);
            }
            _ => {}
        }

        outcome
    }
}
