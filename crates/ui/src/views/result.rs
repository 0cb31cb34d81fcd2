use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::QuizResult;

use crate::routes::Route;
use crate::vm::ResultVm;

#[component]
pub fn ResultView(score: u32, total: u32) -> Element {
    let vm = ResultVm::from(QuizResult::new(score, total));

    rsx! {
        div { class: "page result-page",
            h2 { class: "result-title", "Test Completed 🎉" }
            dl { class: "result-summary",
                dt { "Correct" }
                dd { "{vm.correct}" }

                dt { "Wrong" }
                dd { "{vm.wrong}" }

                dt { "Accuracy" }
                dd { "{vm.accuracy_label}" }
            }
            Link { class: "btn btn-primary", to: Route::Home {}, "Back to Home" }
        }
    }
}
