mod ids;
mod question;
mod settings;
mod test_type;

pub use ids::{ParseIdError, QuestionId};
pub use question::{Question, QuestionError, sample_questions};
pub use settings::{QuizSettings, QuizSettingsError};
pub use test_type::{TestType, UnsupportedTestType};
