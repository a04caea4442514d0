//! End-to-end checks of the edit/preview/validate pipeline through the
//! public API.

use htmlive::editor::Buffer;
use htmlive::lint::Linter;
use htmlive::sync::{DEBOUNCE_QUIET_MS, SyncController};

fn controller() -> SyncController {
    SyncController::new(Some(Linter::new()), DEBOUNCE_QUIET_MS)
}

#[test]
fn file_content_flows_to_preview_and_markers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.html");
    std::fs::write(&path, "<h1>Title</h1>\n<p id=\"a\">one</p>\n<p id=\"a\">two").unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let mut buffer = Buffer::from_text(&content);
    buffer.mark_clean();

    let mut sync = controller();
    sync.run_update_cycle(&buffer.text());

    assert_eq!(sync.preview().line_text(0), Some("Title"));
    assert_eq!(sync.preview().line_text(1), Some("one"));
    assert_eq!(sync.preview().line_text(2), Some("two"));

    // Duplicate id and the unclosed final tag both get markers.
    let rules: Vec<_> = sync.markers().iter().map(|m| m.rule).collect();
    assert!(rules.contains(&"id-unique"), "{rules:?}");
    assert!(rules.contains(&"tag-pair"), "{rules:?}");
}

#[test]
fn typing_burst_produces_one_cycle_then_idempotent_reruns() {
    let mut buffer = Buffer::empty();
    let mut sync = controller();
    sync.run_update_cycle(&buffer.text());

    let mut now = 0_u64;
    for c in "<p>hello</p>".chars() {
        buffer.insert_char(c);
        sync.note_buffer_changed(now);
        now += 50;
    }
    // No deadline inside the burst ever elapsed.
    assert_eq!(sync.update_count(), 1);

    assert!(sync.take_update_ready(now + DEBOUNCE_QUIET_MS));
    sync.run_update_cycle(&buffer.text());
    assert_eq!(sync.update_count(), 2);
    assert_eq!(sync.preview().line_text(0), Some("hello"));

    // A second cycle over unchanged content settles to the same state.
    sync.run_update_cycle(&buffer.text());
    assert_eq!(sync.preview().line_text(0), Some("hello"));
    assert_eq!(sync.preview().line_count(), 1);
    assert!(sync.markers().is_empty());
}

#[test]
fn preview_interaction_maps_back_to_source() {
    let mut buffer = Buffer::empty();
    buffer.set_text("<ul><li>first</li><li>second</li></ul>");
    let mut sync = controller();
    sync.run_update_cycle(&buffer.text());

    // Rows: "first", "second".
    assert!(sync.preview_clicked(&buffer, 1, 0));
    let hl = sync.active_highlight().unwrap();
    assert_eq!(&buffer.text()[hl.start..hl.end], "second");

    // Selecting rendered text that exists verbatim also maps back.
    assert!(sync.preview_selected(&buffer, "first"));
    let hl = sync.active_highlight().unwrap();
    assert_eq!(&buffer.text()[hl.start..hl.end], "first");
}

#[test]
fn export_round_trip_preserves_buffer_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");

    let mut buffer = Buffer::empty();
    buffer.set_text("<p>draft &amp; notes</p>\n");
    let mut sync = controller();
    sync.note_buffer_changed(0);

    // Export writes the raw buffer even while a cycle is still pending.
    std::fs::write(&path, buffer.text()).unwrap();
    assert!(sync.is_update_pending());

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, buffer.text());
}
