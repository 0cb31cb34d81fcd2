use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{DefaultQuizView, HomeView, QuizView, ResultView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz", DefaultQuizView)] QuizDefault {},
        #[route("/quiz/:test_type", QuizView)] Quiz { test_type: String },
        #[route("/result/:score/:total", ResultView)] Results { score: u32, total: u32 },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            nav { class: "topbar",
                Link { class: "topbar__brand", to: Route::Home {}, "Quiz" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
