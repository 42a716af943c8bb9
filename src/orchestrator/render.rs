//! 结果展示
//!
//! 把 `DisplayOutcome` 渲染到终端（或任意 `Write`），
//! 也可以转换为 JSON 供脚本使用。

use serde_json::{json, Value};
use std::io::{self, Write};

use crate::models::grading::DisplayOutcome;

pub const MISSING_INPUT_MESSAGE: &str =
    "⚠️ Please fill in both the question and the student's answer.";
pub const SUCCESS_MESSAGE: &str = "✅ Evaluation complete!";
pub const RESULT_HEADING: &str = "### 📝 Grading Result";
pub const PARSE_FAILURE_MESSAGE: &str =
    "❌ The model did not return valid JSON. Here's the raw output:";

/// 页面标题和说明
pub fn render_header(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "# 📚 Smart Answer Scorer")?;
    writeln!(out, "*AI-Powered Feedback for Student Responses*")?;
    writeln!(out)?;
    writeln!(
        out,
        "Enter a question and a student's answer. This tool will analyze the explanation \
         and provide a score, feedback, and a verdict, instantly!"
    )?;
    render_separator(out)
}

pub fn render_separator(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out)
}

/// 渲染一次提交的结果
pub fn render_outcome(outcome: &DisplayOutcome, out: &mut impl Write) -> io::Result<()> {
    match outcome {
        DisplayOutcome::MissingInput => {
            writeln!(out, "{}", MISSING_INPUT_MESSAGE)?;
        }
        DisplayOutcome::Success(result) => {
            writeln!(out, "{}", SUCCESS_MESSAGE)?;
            writeln!(out)?;
            writeln!(out, "{}", RESULT_HEADING)?;
            let pretty = serde_json::to_string_pretty(result.value())
                .unwrap_or_else(|_| result.value().to_string());
            writeln!(out, "{}", pretty)?;

            let issues = result.schema_issues();
            if !issues.is_empty() {
                writeln!(out)?;
                for issue in issues {
                    writeln!(out, "ℹ️ Note: {}", issue)?;
                }
            }
        }
        DisplayOutcome::ParseFailure { raw_text } => {
            writeln!(out, "{}", PARSE_FAILURE_MESSAGE)?;
            writeln!(out, "````")?;
            writeln!(out, "{}", raw_text)?;
            writeln!(out, "````")?;
        }
        DisplayOutcome::TransportError { message } => {
            writeln!(out, "❌ Evaluation failed: {}", message)?;
        }
    }
    out.flush()
}

/// 转换为机器可读的 JSON
pub fn outcome_to_json(outcome: &DisplayOutcome) -> Value {
    match outcome {
        DisplayOutcome::MissingInput => json!({
            "status": outcome.status(),
            "message": MISSING_INPUT_MESSAGE,
        }),
        DisplayOutcome::Success(result) => json!({
            "status": outcome.status(),
            "result": result.value(),
        }),
        DisplayOutcome::ParseFailure { raw_text } => json!({
            "status": outcome.status(),
            "raw_output": raw_text,
        }),
        DisplayOutcome::TransportError { message } => json!({
            "status": outcome.status(),
            "message": message,
        }),
    }
}
