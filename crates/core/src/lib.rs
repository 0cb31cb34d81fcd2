#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod results;
pub mod session;
pub mod time;

pub use error::Error;
pub use results::QuizResult;
pub use session::{
    FinishReason, PendingAdvance, QuizError, QuizPhase, QuizSession, Submission, TickCue,
};
pub use time::Clock;
