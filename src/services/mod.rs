pub mod completion;
pub mod llm_service;
pub mod prompt;
pub mod response_parser;

pub use completion::CompletionService;
pub use llm_service::LlmService;
pub use prompt::build_grading_prompt;
pub use response_parser::{parse_grading_response, strip_code_fences};
