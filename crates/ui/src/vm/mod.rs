mod quiz_vm;
mod result_vm;
mod time_fmt;

pub use quiz_vm::{
    LAST_MINUTE_TOAST_SECS, OptionFeedback, OptionRowVm, QuizIntent, QuizNotice, QuizVm,
};
pub use result_vm::ResultVm;
pub use time_fmt::format_countdown;
