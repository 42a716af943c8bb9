//! 模型输出解析
//!
//! 模型经常把 JSON 包在 markdown 代码块里返回，这里先去掉代码块标记再解析。
//! 只处理行首的 ```` ``` ````/```` ```json ```` 和行尾的 ```` ``` ````，
//! JSON 前后的其他说明文字不会被去掉。

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::grading::{DisplayOutcome, GradingResult};
use crate::utils::logging::truncate_text;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^```(?:json)?|```$").expect("代码块正则无效"));

/// 去掉 markdown 代码块标记并去除首尾空白
///
/// 去掉空白后行首可能露出新的代码块标记，所以重复清理直到结果不再变化。
pub fn strip_code_fences(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    loop {
        let cleaned = CODE_FENCE.replace_all(&text, "").trim().to_string();
        if cleaned == text {
            return text;
        }
        text = cleaned;
    }
}

/// 清理并解析模型输出
///
/// 解析成功返回 `Success`，结果不做结构校验；
/// 解析失败返回 `ParseFailure`，携带未经清理的原始输出。
pub fn parse_grading_response(raw: &str) -> DisplayOutcome {
    let cleaned = strip_code_fences(raw);

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => {
            debug!("模型输出解析成功");
            DisplayOutcome::Success(GradingResult::new(value))
        }
        Err(e) => {
            warn!(
                "模型输出不是合法 JSON: {} (输出: {})",
                e,
                truncate_text(raw, 120)
            );
            DisplayOutcome::ParseFailure {
                raw_text: raw.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_json_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), r#"{"a":1}"#);
    }

    #[test]
    fn test_strip_untagged_fence() {
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), r#"{"a":1}"#);
    }

    #[test]
    fn test_strip_surrounding_whitespace() {
        assert_eq!(
            strip_code_fences("\n\n  ```json\n{\"a\":1}\n```  \n"),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn test_no_fence_is_noop() {
        let text = r#"{"score_out_of_10": 7, "feedback": "ok", "verdict": "Average"}"#;
        assert_eq!(strip_code_fences(text), text);
        assert_eq!(strip_code_fences(&format!("  {}\n", text)), text);
    }

    #[test]
    fn test_strip_is_idempotent() {
        let inputs = [
            "```json\n{\"a\":1}\n```",
            "plain text",
            "```\n[1, 2]\n```\n",
            "Here you go:\n```json\n{}\n```",
            "```\n ```json\n{}",
        ];
        for input in inputs {
            let once = strip_code_fences(input);
            assert_eq!(strip_code_fences(&once), once, "输入: {:?}", input);
        }
    }

    #[test]
    fn test_fence_exposed_by_trim_is_stripped() {
        assert_eq!(strip_code_fences("```\n ```json\n{}"), "{}");
        assert!(parse_grading_response("```\n ```json\n{\"a\":1}\n```").is_success());
    }

    #[test]
    fn test_prose_is_not_stripped() {
        let cleaned = strip_code_fences("Here you go:\n```json\n{\"a\":1}\n```");
        assert_eq!(cleaned, "Here you go:\n\n{\"a\":1}");
    }

    #[test]
    fn test_parse_documented_example() {
        let raw = r#"{"score_out_of_10": 8, "feedback": "Solid but missing one detail.", "verdict": "Good"}"#;

        let DisplayOutcome::Success(result) = parse_grading_response(raw) else {
            panic!("应该解析成功");
        };

        let value = result.value();
        assert_eq!(value["score_out_of_10"], json!(8));
        assert!(value["score_out_of_10"].is_u64());
        assert_eq!(value["feedback"], json!("Solid but missing one detail."));
        assert_eq!(value["verdict"], json!("Good"));
    }

    #[test]
    fn test_invalid_json_keeps_raw_text() {
        let raw = "Sure! Here's the evaluation: {score_out_of_10: 8}";
        assert_eq!(
            parse_grading_response(raw),
            DisplayOutcome::ParseFailure {
                raw_text: raw.to_string()
            }
        );
    }

    #[test]
    fn test_parse_failure_keeps_fences_in_raw_text() {
        let raw = "```json\n{not json}\n```\n";
        let DisplayOutcome::ParseFailure { raw_text } = parse_grading_response(raw) else {
            panic!("应该解析失败");
        };
        assert_eq!(raw_text, raw);
    }

    #[test]
    fn test_fenced_round_trip() {
        let values = [
            json!({"score_out_of_10": 9.5, "feedback": "Great.", "verdict": "Excellent"}),
            json!({"nested": {"list": [1, 2, 3], "flag": true}, "empty": null}),
            json!({"text": "line one\nline two", "unicode": "引力"}),
            json!({}),
        ];

        for value in values {
            let raw = format!("```json\n{}\n```", serde_json::to_string(&value).unwrap());
            let DisplayOutcome::Success(result) = parse_grading_response(&raw) else {
                panic!("应该解析成功: {}", raw);
            };
            assert_eq!(result.into_value(), value);
        }
    }

    #[test]
    fn test_any_json_is_accepted() {
        assert!(parse_grading_response("[1, 2, 3]").is_success());
        assert!(parse_grading_response("42").is_success());
    }
}
