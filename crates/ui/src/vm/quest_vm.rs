use quest_core::model::{EntryKind, LessonIcon, TranscriptEntry};
use services::ProgressionEngine;

pub const PROMPT: &str = "user@quest:~$ ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissionVm {
    pub id: String,
    pub title: String,
    pub icon: &'static str,
    pub is_active: bool,
    pub is_mastered: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptLineVm {
    pub class: &'static str,
    pub prompt: Option<&'static str>,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NextMissionVm {
    pub id: String,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestVm {
    pub lesson_id: String,
    pub title: String,
    pub icon: &'static str,
    pub content: String,
    pub hint: String,
    pub current_command: String,
    pub missions: Vec<MissionVm>,
    pub lines: Vec<TranscriptLineVm>,
    pub progress_percent: f64,
    pub progress_label: String,
    pub progress_width: String,
    pub is_complete: bool,
    pub mastered_commands: Vec<String>,
    pub next_mission: Option<NextMissionVm>,
}

#[must_use]
pub fn icon_glyph(icon: LessonIcon) -> &'static str {
    match icon {
        LessonIcon::Rocket => "🚀",
        LessonIcon::HardDrive => "💾",
        LessonIcon::FileText => "📄",
        LessonIcon::Lock => "🔒",
        LessonIcon::Command => "⌘",
        LessonIcon::Terminal => ">_",
    }
}

fn line_class(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::System => "term-line term-line--system",
        EntryKind::Input => "term-line term-line--input",
        EntryKind::Output => "term-line term-line--output",
        EntryKind::Success => "term-line term-line--success",
        EntryKind::Next => "term-line term-line--next",
        EntryKind::Celebration => "term-line term-line--celebration",
        EntryKind::Error => "term-line term-line--error",
        EntryKind::Hint => "term-line term-line--hint",
    }
}

fn map_line(entry: &TranscriptEntry) -> TranscriptLineVm {
    TranscriptLineVm {
        class: line_class(entry.kind()),
        prompt: (entry.kind() == EntryKind::Input).then_some(PROMPT),
        text: entry.text().to_string(),
    }
}

#[must_use]
pub fn map_quest(engine: &ProgressionEngine) -> QuestVm {
    let lesson = engine.active_lesson();
    let state = engine.state();
    let progress_percent = engine.progress_percent();

    let missions = engine
        .catalog()
        .iter()
        .map(|mission| {
            let is_active = mission.id() == lesson.id();
            MissionVm {
                id: mission.id().to_string(),
                title: mission.title().to_string(),
                icon: icon_glyph(mission.icon()),
                is_active,
                is_mastered: is_active && state.is_complete(),
            }
        })
        .collect();

    let next_mission = engine.next_lesson().map(|next| NextMissionVm {
        id: next.id().to_string(),
        title: next.title().to_string(),
    });

    QuestVm {
        lesson_id: lesson.id().to_string(),
        title: lesson.title().to_string(),
        icon: icon_glyph(lesson.icon()),
        content: lesson.content().to_string(),
        hint: lesson.hint().to_string(),
        current_command: engine.current_task().command().to_string(),
        missions,
        lines: state.transcript().iter().map(map_line).collect(),
        progress_percent,
        progress_label: format!("{}%", progress_percent.round()),
        progress_width: format!("width: {progress_percent}%;"),
        is_complete: state.is_complete(),
        mastered_commands: lesson.commands().to_vec(),
        next_mission,
    }
}
