//! 评分请求与评分结果

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// 评分请求：一道题目和一份学生答案
///
/// 只在一次提交的生命周期内存在，内容原样嵌入提示词。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradingRequest {
    pub question: String,
    pub answer: String,
}

impl GradingRequest {
    /// 创建评分请求，题目或答案去除空白后为空时返回 `MissingInput`
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let question = question.into();
        let answer = answer.into();

        if question.trim().is_empty() || answer.trim().is_empty() {
            return Err(ValidationError::MissingInput);
        }

        Ok(Self { question, answer })
    }
}

/// 总体评价
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Verdict {
    pub const ALL: [Verdict; 4] = [
        Verdict::Excellent,
        Verdict::Good,
        Verdict::Average,
        Verdict::Poor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent",
            Verdict::Good => "Good",
            Verdict::Average => "Average",
            Verdict::Poor => "Poor",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verdict::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("未知的评价: {}", s))
    }
}

/// 评分结果
///
/// 原样保存模型返回的 JSON，不做结构校验；
/// 下面的访问器只是按约定的三个字段读取，字段缺失或类型不对时返回 `None`。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GradingResult(Value);

impl GradingResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn score_out_of_10(&self) -> Option<f64> {
        self.0.get("score_out_of_10").and_then(Value::as_f64)
    }

    pub fn feedback(&self) -> Option<&str> {
        self.0.get("feedback").and_then(Value::as_str)
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.0
            .get("verdict")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    /// 列出与约定格式不一致的地方（仅用于提示，不影响结果）
    pub fn schema_issues(&self) -> Vec<String> {
        let Some(object) = self.0.as_object() else {
            return vec!["结果不是 JSON 对象".to_string()];
        };

        let mut issues = Vec::new();

        match object.get("score_out_of_10") {
            None => issues.push("缺少字段 score_out_of_10".to_string()),
            Some(v) => match v.as_f64() {
                None => issues.push(format!("score_out_of_10 不是数字: {}", v)),
                Some(score) if !(0.0..=10.0).contains(&score) => {
                    issues.push(format!("score_out_of_10 超出范围 [0, 10]: {}", score))
                }
                Some(_) => {}
            },
        }

        match object.get("feedback") {
            None => issues.push("缺少字段 feedback".to_string()),
            Some(v) if !v.is_string() => issues.push(format!("feedback 不是字符串: {}", v)),
            Some(_) => {}
        }

        match object.get("verdict") {
            None => issues.push("缺少字段 verdict".to_string()),
            Some(v) => match v.as_str() {
                Some(s) if s.parse::<Verdict>().is_ok() => {}
                _ => issues.push(format!("verdict 不是预期的取值: {}", v)),
            },
        }

        issues
    }
}

/// 一次提交最终展示给用户的结果
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayOutcome {
    /// 题目或答案为空，未调用模型
    MissingInput,
    /// 模型返回了可解析的 JSON
    Success(GradingResult),
    /// 模型返回的内容不是合法 JSON，保留原始输出
    ParseFailure { raw_text: String },
    /// 调用模型失败
    TransportError { message: String },
}

impl DisplayOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DisplayOutcome::Success(_))
    }

    /// 状态名，用于日志和 `--json` 输出
    pub fn status(&self) -> &'static str {
        match self {
            DisplayOutcome::MissingInput => "missing_input",
            DisplayOutcome::Success(_) => "success",
            DisplayOutcome::ParseFailure { .. } => "parse_failure",
            DisplayOutcome::TransportError { .. } => "transport_error",
        }
    }
}
