//! 提交上下文
//!
//! 封装"这是本次会话的第几次提交"这一信息，只用于日志

use std::fmt::Display;

/// 提交上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionCtx {
    /// 提交序号（从1开始）
    pub submission_index: usize,
}

impl SubmissionCtx {
    pub fn new(submission_index: usize) -> Self {
        Self { submission_index }
    }
}

impl Default for SubmissionCtx {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Display for SubmissionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[提交 #{}]", self.submission_index)
    }
}
