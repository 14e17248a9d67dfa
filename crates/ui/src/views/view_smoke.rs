use super::test_harness::setup_view_harness;

#[tokio::test(flavor = "current_thread")]
async fn quest_view_renders_first_lesson() {
    let mut harness = setup_view_harness(None);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Terminal Quest"), "missing header in {html}");
    assert!(html.contains("Introduction to the Terminal"), "missing title in {html}");
    assert!(
        html.contains("Welcome to Terminal Quest! Your adventure begins now."),
        "missing welcome line in {html}"
    );
    assert!(html.contains("Show Hint"), "missing hint toggle in {html}");
    assert!(html.contains("0%"), "missing progress label in {html}");
    assert!(!html.contains("Mission Complete!"), "unexpected success box in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quest_view_lists_every_mission() {
    let mut harness = setup_view_harness(None);
    harness.rebuild();
    let html = harness.render();

    for title in [
        "Introduction to the Terminal",
        "Navigating the File System",
        "Working with Files",
        "File Permissions",
        "Pipes and Redirects",
    ] {
        assert!(html.contains(title), "missing mission {title} in {html}");
    }
    assert!(html.contains("mission mission--active"), "missing active marker in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quest_view_honors_initial_lesson() {
    let mut harness = setup_view_harness(Some("permissions"));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Starting lesson: File Permissions"), "missing start line in {html}");
    assert!(html.contains("Try: ls -l"), "missing first prompt in {html}");
    assert!(html.contains("🔒"), "missing lesson icon in {html}");
}
