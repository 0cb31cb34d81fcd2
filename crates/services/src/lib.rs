#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;
pub mod scheduling;

pub use quiz_core::Clock;

pub use error::QuizServiceError;
pub use quiz::{QuizLoopService, QuizOutcome, QuizRunner, QuizSnapshot};
pub use scheduling::ScheduledTask;
