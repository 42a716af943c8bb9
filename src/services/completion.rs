//! 文本补全能力
//!
//! 评分流程只依赖这个 trait，真实实现是 [`LlmService`](super::LlmService)，
//! 测试中可以替换为固定返回值的桩实现。

use async_trait::async_trait;

use crate::error::LlmError;

/// 文本补全服务：输入一段提示词，返回模型生成的一段文本
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl<T: CompletionService + ?Sized> CompletionService for std::sync::Arc<T> {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        (**self).complete(prompt).await
    }
}
