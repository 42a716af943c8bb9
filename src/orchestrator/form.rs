//! 表单输入
//!
//! 终端版的两栏表单：题目（单行）和学生答案（多行，以单独一行 `.` 或 EOF 结束）。
//! 答案里可以有空行，段落之间的空行会原样保留。

use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::error::AppResult;

pub const QUESTION_PROMPT: &str = "🔍 Enter the concept or question:";
pub const ANSWER_PROMPT: &str =
    "🧠 Enter the student's explanation or definition (finish with a line containing only `.`):";

/// 结束答案输入的行
pub const ANSWER_TERMINATOR: &str = ".";

/// 一次表单提交
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub question: String,
    pub answer: String,
}

/// 从输入流逐次读取表单
pub struct FormReader<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> FormReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// 读取下一次提交
    ///
    /// 在题目提示处遇到 EOF 时返回 `None`，表示会话结束。
    pub async fn next_submission(
        &mut self,
        out: &mut impl Write,
    ) -> AppResult<Option<FormSubmission>> {
        writeln!(out, "{}", QUESTION_PROMPT)?;
        out.flush()?;

        let Some(question) = self.lines.next_line().await? else {
            return Ok(None);
        };

        writeln!(out, "{}", ANSWER_PROMPT)?;
        out.flush()?;

        let mut answer_lines = Vec::new();
        while let Some(line) = self.lines.next_line().await? {
            if line.trim() == ANSWER_TERMINATOR {
                break;
            }
            answer_lines.push(line);
        }

        Ok(Some(FormSubmission {
            question,
            answer: answer_lines.join("\n"),
        }))
    }
}
