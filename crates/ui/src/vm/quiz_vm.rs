use quiz_core::TickCue;
use quiz_core::model::TestType;
use services::QuizSnapshot;

use super::time_fmt::format_countdown;

/// Seconds the "Only 1 min left" toast stays up.
pub const LAST_MINUTE_TOAST_SECS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(usize),
    Submit,
    Skip,
}

/// Message shown after an action the runner refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizNotice {
    ChooseOption,
    Failed,
}

impl QuizNotice {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            QuizNotice::ChooseOption => "Choose an option",
            QuizNotice::Failed => "Something went wrong",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            QuizNotice::ChooseOption => "Please select an option before submitting.",
            QuizNotice::Failed => "Please try again.",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionFeedback {
    Idle,
    Selected,
    Correct,
    Wrong,
}

impl OptionFeedback {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionFeedback::Idle => "quiz-option",
            OptionFeedback::Selected => "quiz-option quiz-option--selected",
            OptionFeedback::Correct => "quiz-option quiz-option--correct",
            OptionFeedback::Wrong => "quiz-option quiz-option--wrong",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRowVm {
    pub index: usize,
    pub label: String,
    pub feedback: OptionFeedback,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizVm {
    pub title: String,
    pub badge: String,
    pub badge_class: &'static str,
    pub timer_label: String,
    pub timer_class: &'static str,
    pub show_last_minute_toast: bool,
    pub question_line: String,
    pub progress_style: String,
    pub options: Vec<OptionRowVm>,
}

impl QuizVm {
    #[must_use]
    pub fn from_snapshot(snapshot: &QuizSnapshot) -> Self {
        let badge_class = match snapshot.test_type {
            TestType::Quick => "quiz-badge quiz-badge--quick",
            TestType::Free => "quiz-badge quiz-badge--free",
        };
        let timer_class = if snapshot.in_last_minute {
            "quiz-timer quiz-timer--urgent"
        } else if snapshot.cue == TickCue::Pulse {
            "quiz-timer quiz-timer--pulse"
        } else {
            "quiz-timer"
        };

        let threshold = snapshot.last_minute_secs;
        let show_last_minute_toast = threshold > 0
            && snapshot.remaining_secs > 0
            && snapshot.remaining_secs <= threshold
            && threshold - snapshot.remaining_secs < LAST_MINUTE_TOAST_SECS;

        let options = snapshot
            .options
            .iter()
            .enumerate()
            .map(|(index, label)| OptionRowVm {
                index,
                label: label.clone(),
                feedback: option_feedback(snapshot, index),
                disabled: snapshot.submitted || snapshot.is_finished(),
            })
            .collect();

        Self {
            title: snapshot.test_type.title(),
            badge: snapshot.test_type.badge(),
            badge_class,
            timer_label: format_countdown(snapshot.remaining_secs),
            timer_class,
            show_last_minute_toast,
            question_line: format!("Q.{}  {}", snapshot.question_number, snapshot.prompt),
            progress_style: format!("width: {:.0}%", snapshot.progress * 100.0),
            options,
        }
    }
}

fn option_feedback(snapshot: &QuizSnapshot, index: usize) -> OptionFeedback {
    if snapshot.selected != Some(index) {
        return OptionFeedback::Idle;
    }
    match (snapshot.submitted, snapshot.last_answer_correct) {
        (true, Some(true)) => OptionFeedback::Correct,
        (true, Some(false)) => OptionFeedback::Wrong,
        _ => OptionFeedback::Selected,
    }
}
