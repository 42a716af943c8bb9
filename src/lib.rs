//! # Smart Answer Scorer
//!
//! 输入一道题目和一份学生答案，交给大模型评分，并展示结构化的评分结果
//!
//! ## 架构设计
//!
//! 本系统沿用分层架构：
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单次调用
//! - `CompletionService` - 文本补全能力（trait，可替换）
//! - `LlmService` - 基于 async-openai 的补全实现
//! - `prompt` - 构建评分提示词
//! - `response_parser` - 去掉代码块标记并解析 JSON
//!
//! ### ② 流程层（Workflow）
//! - `workflow/` - 定义"一次提交"的完整处理流程
//! - `SubmissionCtx` - 上下文封装（提交序号）
//! - `GradingFlow` - 流程编排（校验 → 提示词 → 调用模型 → 清理 → 解析）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/app` - 应用生命周期、单次 / 交互模式
//! - `orchestrator/form` - 读取表单
//! - `orchestrator/render` - 展示结果
//!
//! ## 模块结构

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{DisplayOutcome, GradingRequest, GradingResult, Verdict};
pub use orchestrator::{App, RunMode};
pub use services::{CompletionService, LlmService};
pub use workflow::{GradingFlow, SubmissionCtx};
