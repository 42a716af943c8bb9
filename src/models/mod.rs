pub mod grading;

pub use grading::{DisplayOutcome, GradingRequest, GradingResult, Verdict};
