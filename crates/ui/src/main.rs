#![allow(non_snake_case)]

use std::sync::Arc;

use quest_core::model::LessonId;
use quest_core::{Clock, LessonCatalog};
use ui::{App, UiApp, build_app_context};

struct BuiltinApp {
    catalog: Arc<LessonCatalog>,
}

impl UiApp for BuiltinApp {
    fn catalog(&self) -> Arc<LessonCatalog> {
        Arc::clone(&self.catalog)
    }

    fn initial_lesson(&self) -> Option<LessonId> {
        None
    }
}

// Standalone preview of the widget with the built-in lessons; `crates/app` is the real entry point.
fn main() {
    let app: Arc<dyn UiApp> = Arc::new(BuiltinApp {
        catalog: Arc::new(LessonCatalog::builtin(&Clock::default_clock())),
    });
    dioxus::LaunchBuilder::desktop()
        .with_context(build_app_context(&app))
        .launch(App);
}
