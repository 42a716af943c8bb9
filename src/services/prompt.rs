//! 评分提示词

use crate::models::grading::{GradingRequest, Verdict};

/// 构建评分提示词
///
/// 题目和答案直接插入模板，不做转义。
pub fn build_grading_prompt(request: &GradingRequest) -> String {
    let verdicts = Verdict::ALL
        .iter()
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"
You are an intelligent grader.

A student has written the following answer for the question:
Question: {}
Student's Answer: {}

Evaluate how correct, complete, and well-explained this answer is in simple English.
Return your evaluation in **valid JSON format** with the following keys:
- score_out_of_10: number
- feedback: short sentence or two
- verdict: One of [{}]
"#,
        request.question, request.answer, verdicts
    )
}
