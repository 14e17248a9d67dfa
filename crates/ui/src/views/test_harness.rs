use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quest_core::LessonCatalog;
use quest_core::model::LessonId;
use quest_core::time::fixed_clock;

use crate::context::{UiApp, build_app_context};
use crate::views::QuestView;

struct TestApp {
    catalog: Arc<LessonCatalog>,
    initial_lesson: Option<LessonId>,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<LessonCatalog> {
        Arc::clone(&self.catalog)
    }

    fn initial_lesson(&self) -> Option<LessonId> {
        self.initial_lesson.clone()
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { QuestView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        self.dom.process_events();
        self.dom.render_immediate(&mut NoOpMutations);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn setup_view_harness(initial_lesson: Option<&str>) -> ViewHarness {
    let app = Arc::new(TestApp {
        catalog: Arc::new(LessonCatalog::builtin(&fixed_clock())),
        initial_lesson: initial_lesson.map(|id| LessonId::new(id).expect("valid lesson id")),
    });
    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { app });
    ViewHarness { dom }
}
