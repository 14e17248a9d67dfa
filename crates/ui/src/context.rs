use std::sync::Arc;

use quest_core::LessonCatalog;
use quest_core::model::LessonId;
use services::ProgressionEngine;

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<LessonCatalog>;

    /// Lesson to open on launch; `None` opens the first lesson with the welcome banner.
    fn initial_lesson(&self) -> Option<LessonId>;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<LessonCatalog>,
    initial_lesson: Option<LessonId>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            initial_lesson: app.initial_lesson(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<LessonCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn initial_lesson(&self) -> Option<&LessonId> {
        self.initial_lesson.as_ref()
    }

    /// Fresh engine for a new widget instance.
    ///
    /// The binary validates `initial_lesson` up front; an id that is somehow
    /// unknown here falls back to the first lesson (the engine logs the miss).
    #[must_use]
    pub fn start_engine(&self) -> ProgressionEngine {
        match self.initial_lesson.as_ref() {
            Some(id) => ProgressionEngine::starting_at(self.catalog(), id.as_str())
                .unwrap_or_else(|_| ProgressionEngine::new(self.catalog())),
            None => ProgressionEngine::new(self.catalog()),
        }
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
