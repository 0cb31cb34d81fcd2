use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::TestType;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::format_countdown;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let time_limit = format_countdown(ctx.quiz_loop().settings().time_limit_secs());

    rsx! {
        div { class: "page home-page",
            h2 { "Choose a test" }
            p { class: "home-note", "Each test runs against a {time_limit} countdown." }
            ul { class: "home-tests",
                for test_type in TestType::ALL {
                    li { key: "{test_type}",
                        Link {
                            class: "home-test-link home-test-link--{test_type}",
                            to: Route::Quiz { test_type: test_type.as_str().to_string() },
                            "{test_type.title()}"
                        }
                    }
                }
            }
        }
    }
}
