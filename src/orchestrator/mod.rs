//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责读取表单、调度评分流程和展示结果，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用主结构
//! - 管理应用生命周期（初始化、运行）
//! - 单次模式 / 交互模式
//! - 保证同一时间只处理一个提交
//! - 输出会话统计信息
//!
//! ### `form` - 表单输入
//! - 从终端读取题目和学生答案
//!
//! ### `render` - 结果展示
//! - 成功 / 警告 / 错误三种展示方式，以及 JSON 输出
//!
//! ## 层次关系
//!
//! ```text
//! app (读取表单、处理多次提交)
//!     ↓
//! workflow::GradingFlow (处理单次提交)
//!     ↓
//! services (能力层：completion / prompt / response_parser)
//! ```

pub mod app;
pub mod form;
pub mod render;

// 重新导出主要类型
pub use app::{App, RunMode, SessionStats};
pub use form::{FormReader, FormSubmission};
pub use render::{outcome_to_json, render_outcome};
