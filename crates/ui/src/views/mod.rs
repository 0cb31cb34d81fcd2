mod home;
pub(crate) mod quiz;
mod result;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use quiz::{DefaultQuizView, QuizView};
pub use result::ResultView;
pub use state::{ViewError, ViewState, view_state_from_resource};
