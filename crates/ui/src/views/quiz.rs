use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::QuizError;
use services::{QuizRunner, QuizServiceError, QuizSnapshot};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{OptionRowVm, QuizIntent, QuizNotice, QuizVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView(test_type: String) -> Element {
    rsx! { QuizScreen { test_type: Some(test_type) } }
}

/// `/quiz` with no test type runs the quick test.
#[component]
pub fn DefaultQuizView() -> Element {
    rsx! { QuizScreen { test_type: None } }
}

#[component]
fn QuizScreen(test_type: Option<String>) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();

    let runner = use_signal(|| None::<Arc<QuizRunner>>);
    let snapshot = use_signal(|| None::<QuizSnapshot>);
    let notice = use_signal(|| None::<QuizNotice>);

    let resource = use_resource(move || {
        let quiz_loop = quiz_loop.clone();
        let test_type = test_type.clone();
        let mut runner = runner;
        let mut snapshot = snapshot;

        async move {
            let started = quiz_loop
                .start_quiz_for_param(test_type.as_deref())
                .await
                .map_err(|err| {
                    tracing::warn!(?test_type, error = %err, "could not start quiz");
                    ViewError::from_service(&err)
                })?;

            let mut updates = started.subscribe();
            snapshot.set(Some(updates.borrow_and_update().clone()));
            runner.set(Some(Arc::new(started)));

            // Mirror every runner update into the view until the runner goes away.
            spawn(async move {
                while updates.changed().await.is_ok() {
                    let next = updates.borrow_and_update().clone();
                    snapshot.set(Some(next));
                }
            });
            Ok::<_, ViewError>(())
        }
    });

    use_effect(move || {
        let finished = snapshot.read().as_ref().and_then(|snap| snap.outcome);
        if let Some(outcome) = finished {
            if let Some(failure) = navigator.replace(Route::Results {
                score: outcome.score,
                total: outcome.total,
            }) {
                tracing::warn!(?failure, "could not open results");
            }
        }
    });

    use_drop(move || {
        if let Ok(guard) = runner.try_peek() {
            if let Some(active) = guard.as_ref() {
                active.shutdown();
            }
        }
    });

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut notice = notice;
        let mut snapshot = snapshot;
        let Some(active) = runner.peek().as_ref().map(Arc::clone) else {
            return;
        };

        let result = match intent {
            QuizIntent::Select(index) => active.select_option(index).map(|_| ()),
            QuizIntent::Submit => active.submit_and_advance().map(|_| ()),
            QuizIntent::Skip => active.skip().map(|_| ()),
        };
        match result {
            Ok(()) => notice.set(None),
            Err(err) if err.is_no_selection() => notice.set(Some(QuizNotice::ChooseOption)),
            // Double clicks and clicks racing the timer.
            Err(QuizServiceError::Quiz(QuizError::AlreadySubmitted | QuizError::Finished)) => {}
            Err(err) => {
                tracing::warn!(error = %err, ?intent, "quiz action failed");
                notice.set(Some(QuizNotice::Failed));
            }
        }
        snapshot.set(Some(active.snapshot()));
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    let state = view_state_from_resource(resource);
    let vm = snapshot.read().as_ref().map(QuizVm::from_snapshot);
    let current_notice = *notice.read();

    rsx! {
        div { class: "page quiz-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "quiz-error", role: "alert",
                        h2 { "{err.title()}" }
                        p { "{err.message()}" }
                        Link { class: "btn btn-secondary", to: Route::Home {}, "OK" }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(vm) = vm {
                        QuizBody { vm, notice: current_notice, on_intent: dispatch_intent }
                    }
                },
            }
        }
    }
}

#[component]
fn QuizBody(vm: QuizVm, notice: Option<QuizNotice>, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        header { class: "quiz-header",
            h2 { class: "quiz-title", "{vm.title}" }
            span { class: "quiz-header__timer", "Timer" }
        }
        div { class: "{vm.badge_class}", "{vm.badge}" }
        div { class: "quiz-prompt",
            div { class: "{vm.timer_class}", id: "quiz-timer", "{vm.timer_label}" }
            div { class: "quiz-progress",
                div { class: "quiz-progress__fill", style: "{vm.progress_style}" }
            }
            p { class: "quiz-question", "{vm.question_line}" }
        }
        ul { class: "quiz-options",
            for row in vm.options.iter().cloned() {
                OptionRow { key: "{row.index}", row, on_intent }
            }
        }
        if let Some(notice) = notice {
            div { class: "quiz-notice", role: "alert",
                strong { "{notice.title()}" }
                span { " {notice.message()}" }
            }
        }
        footer { class: "quiz-footer",
            button {
                class: "btn btn-ghost",
                id: "quiz-skip",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Skip),
                "Skip"
            }
            button {
                class: "btn btn-primary",
                id: "quiz-submit",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Submit),
                "Submit & Next"
            }
        }
        if vm.show_last_minute_toast {
            div { class: "quiz-toast", role: "status", "Only 1 min left" }
        }
    }
}

#[component]
fn OptionRow(row: OptionRowVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let index = row.index;
    rsx! {
        li {
            button {
                class: "{row.feedback.class()}",
                r#type: "button",
                disabled: row.disabled,
                onclick: move |_| on_intent.call(QuizIntent::Select(index)),
                span { class: "quiz-option__label", "{row.label}" }
                span { class: "quiz-option__chevron", "›" }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }
}
