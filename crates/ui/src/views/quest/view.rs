use dioxus::document::eval;
use dioxus::prelude::*;
use services::Pulse;

use super::scripts::{INPUT_ID, TERMINAL_ID, focus_input_script, scroll_terminal_script};
use crate::context::AppContext;
use crate::vm::{
    PROMPT, Paragraph, TYPEWRITER_TICK, char_count, map_quest, paragraphs, typed_prefix,
};

#[component]
pub fn QuestView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();

    let mut engine = use_signal(|| ctx.start_engine());
    let mut lesson_key = use_signal(|| engine.peek().active_lesson().id().to_string());
    let mut command_line = use_signal(String::new);
    let mut show_hint = use_signal(|| false);
    let mut pulse_visible = use_signal(|| false);
    let typed = use_signal(|| 0_usize);
    let pulse = use_hook(Pulse::new);

    // Restarts whenever the lesson changes; the previous run is dropped.
    let _typewriter = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            let mut typed = typed;
            let content = catalog
                .get(&lesson_key())
                .map(|lesson| lesson.content().to_string())
                .unwrap_or_default();
            let total = char_count(&content);
            for shown in 0..=total {
                typed.set(shown);
                tokio::time::sleep(TYPEWRITER_TICK).await;
            }
        }
    });

    use_effect(move || {
        let _lines = engine.read().state().transcript().len();
        let _ = eval(&scroll_terminal_script());
    });

    use_effect(move || {
        let _lesson = lesson_key.read();
        let _task = engine.read().state().task_index();
        let _ = eval(&focus_input_script());
    });

    let select_lesson = use_callback(move |id: String| {
        // Unknown ids are logged by the engine and leave the session as it was.
        if engine.write().select_lesson(&id).is_ok() {
            lesson_key.set(id);
        }
    });

    let submit = use_callback(move |()| {
        let raw = command_line();
        command_line.set(String::new());
        let outcome = engine.write().submit_command(&raw);
        if outcome.triggers_pulse() {
            let pulse = pulse.clone();
            let ticket = pulse.trigger();
            pulse_visible.set(true);
            let mut pulse_visible = pulse_visible;
            spawn(async move {
                if pulse.run(ticket).await {
                    pulse_visible.set(false);
                }
            });
        }
    });

    let vm = map_quest(&engine.read());
    let shown = typed();
    let typed_text = typed_prefix(&vm.content, shown).to_string();
    let is_typing = shown < char_count(&vm.content);
    let hint_label = if show_hint() { "Hide Hint" } else { "Show Hint" };

    let missions = vm.missions.iter().map(|mission| {
        let id = mission.id.clone();
        let class = if mission.is_active {
            "mission mission--active"
        } else {
            "mission"
        };
        rsx! {
            button {
                key: "{mission.id}",
                class: "{class}",
                r#type: "button",
                onclick: move |_| select_lesson.call(id.clone()),
                span { class: "mission-icon", "{mission.icon}" }
                span { class: "mission-title", "{mission.title}" }
                if mission.is_mastered {
                    span { class: "mission-check", "✓" }
                }
            }
        }
    });

    let narrative = paragraphs(&typed_text)
        .into_iter()
        .enumerate()
        .map(|(i, part)| match part {
            Paragraph::Break => rsx! { br { key: "{i}" } },
            Paragraph::Text(line) => rsx! { p { key: "{i}", "{line}" } },
        });

    let lines = vm.lines.iter().enumerate().map(|(i, line)| {
        rsx! {
            div { key: "{i}", class: "{line.class}",
                if let Some(prompt) = line.prompt {
                    span { class: "term-prompt", "{prompt}" }
                }
                span { class: "term-text", "{line.text}" }
            }
        }
    });

    rsx! {
        div { class: "quest",
            header { class: "quest-header",
                h1 { class: "quest-title", ">_ Terminal Quest" }
                p { class: "quest-tagline", "Learn to use the command line - one adventure at a time!" }
            }

            div { class: "quest-body",
                nav { class: "missions",
                    h2 { class: "missions-title", "Missions" }
                    {missions}
                }

                section { class: "lesson-panel",
                    h2 { class: "lesson-title",
                        span { class: "lesson-icon", "{vm.icon}" }
                        "{vm.title}"
                    }
                    div { class: "lesson-content",
                        {narrative}
                        if is_typing {
                            span { class: "lesson-caret", "|" }
                        }
                    }
                    div { class: "lesson-task",
                        p { class: "lesson-task-label", "Try this command:" }
                        div { class: "lesson-command", "{vm.current_command}" }
                        button {
                            class: "btn btn-link",
                            r#type: "button",
                            onclick: move |_| show_hint.toggle(),
                            "{hint_label}"
                        }
                        if show_hint() {
                            div { class: "lesson-hint", "{vm.hint}" }
                        }
                    }
                }

                section { class: "terminal-panel",
                    div { class: "terminal-bar",
                        span { class: "terminal-dot terminal-dot--red" }
                        span { class: "terminal-dot terminal-dot--yellow" }
                        span { class: "terminal-dot terminal-dot--green" }
                        span { class: "terminal-name", "Terminal" }
                    }
                    div { id: TERMINAL_ID, class: "terminal",
                        if pulse_visible() {
                            div { class: "pulse-overlay",
                                span { class: "pulse-icon", "⚡" }
                            }
                        }
                        {lines}
                        div { class: "term-input-row",
                            span { class: "term-prompt", "{PROMPT}" }
                            input {
                                id: INPUT_ID,
                                class: "term-input",
                                r#type: "text",
                                autofocus: true,
                                value: "{command_line}",
                                oninput: move |evt| command_line.set(evt.value()),
                                onkeydown: move |evt: KeyboardEvent| {
                                    if evt.key() == Key::Enter {
                                        submit.call(());
                                    }
                                },
                            }
                        }
                    }

                    div { class: "progress-panel",
                        div { class: "progress-header",
                            h3 { "Mission Progress" }
                            span { class: "progress-label", "{vm.progress_label}" }
                        }
                        div { class: "progress-track",
                            div { class: "progress-fill", style: "{vm.progress_width}" }
                        }
                        if vm.is_complete {
                            div { class: "mission-complete",
                                h4 { "🏆 Mission Complete!" }
                                p { "You've mastered these commands:" }
                                div { class: "mastered-tags",
                                    for command in vm.mastered_commands.iter() {
                                        span { key: "{command}", class: "mastered-tag", "{command}" }
                                    }
                                }
                                if let Some(next) = vm.next_mission.clone() {
                                    button {
                                        class: "btn btn-primary",
                                        r#type: "button",
                                        onclick: move |_| select_lesson.call(next.id.clone()),
                                        "Next Mission →"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            footer { class: "quest-footer", "Terminal Quest • Made for future hackers" }
        }
    }
}
