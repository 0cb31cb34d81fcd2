mod runner;
mod snapshot;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizServiceError;
pub use runner::QuizRunner;
pub use snapshot::{QuizOutcome, QuizSnapshot};
pub use workflow::QuizLoopService;
