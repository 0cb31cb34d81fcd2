use dioxus::prelude::*;
use services::QuizServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    UnsupportedTestType,
    EmptyBank,
    Unknown,
}

impl ViewError {
    /// Map a service failure to something the screen can explain.
    #[must_use]
    pub fn from_service(err: &QuizServiceError) -> Self {
        match err {
            QuizServiceError::TestType(_) => ViewError::UnsupportedTestType,
            QuizServiceError::Empty(_) => ViewError::EmptyBank,
            _ => ViewError::Unknown,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ViewError::UnsupportedTestType => "Not supported",
            ViewError::EmptyBank => "No questions yet",
            ViewError::Unknown => "Something went wrong",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::UnsupportedTestType => "This page supports only Quick and Free tests.",
            ViewError::EmptyBank => "There are no questions for this test yet.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
