pub(super) const TERMINAL_ID: &str = "quest-terminal";
pub(super) const INPUT_ID: &str = "quest-input";

pub(super) fn scroll_terminal_script() -> String {
    format!(
        r#"(function() {{
                    const terminal = document.getElementById({TERMINAL_ID:?});
                    if (terminal) {{
                        terminal.scrollTop = terminal.scrollHeight;
                    }}
                }})();"#
    )
}

pub(super) fn focus_input_script() -> String {
    format!("document.getElementById({INPUT_ID:?})?.focus();")
}
