use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::time::fixed_now;
use services::{Clock, QuizLoopService};
use storage::repository::{InMemoryRepository, QuestionRepository};

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{DefaultQuizView, HomeView, QuizView, ResultView};

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz(String),
    DefaultQuiz,
    Result { score: u32, total: u32 },
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    use_context_provider(|| props.quiz_handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/result/:score/:total", ResultView)]
    Results { score: u32, total: u32 },
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz(test_type) => rsx! { QuizView { test_type } },
        ViewKind::DefaultQuiz => rsx! { DefaultQuizView {} },
        ViewKind::Result { score, total } => rsx! { ResultView { score, total } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub quiz_handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and give the quiz resource time to resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Harness over an in-memory bank seeded with the sample questions.
pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let repo = InMemoryRepository::new();
    let quiz_loop = QuizLoopService::new(Clock::fixed(fixed_now()), Arc::new(repo));
    quiz_loop.ensure_sample_banks().await.expect("seed banks");
    harness_for(view, quiz_loop)
}

pub fn setup_view_harness_with_repo(
    view: ViewKind,
    questions: Arc<dyn QuestionRepository>,
) -> ViewHarness {
    harness_for(view, QuizLoopService::new(Clock::fixed(fixed_now()), questions))
}

fn harness_for(view: ViewKind, quiz_loop: QuizLoopService) -> ViewHarness {
    let quiz_handles = QuizTestHandles::default();
    let app = Arc::new(TestApp {
        quiz_loop: Arc::new(quiz_loop),
    });
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness { dom, quiz_handles }
}
