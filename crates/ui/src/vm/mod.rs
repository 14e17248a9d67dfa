mod quest_vm;
mod typewriter;

pub use quest_vm::{
    MissionVm, NextMissionVm, PROMPT, QuestVm, TranscriptLineVm, icon_glyph, map_quest,
};
pub use typewriter::{TYPEWRITER_TICK, Paragraph, char_count, paragraphs, typed_prefix};
