use std::time::{Duration, Instant};

use overdom::{Document, NodeId};
use scrim::Ui;
use scrim::toast::{Toast, ToastPosition};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn containers(ui: &Ui) -> Vec<NodeId> {
    let body = ui.doc().body().clone();
    ui.doc()
        .node(&body)
        .unwrap()
        .children()
        .iter()
        .filter(|id| ui.doc().has_class(id, "toast-container"))
        .cloned()
        .collect()
}

// =============================================================================
// Materialization
// =============================================================================

#[test]
fn test_toast_node_carries_severity_class_and_message() {
    let mut ui = Ui::new(Document::new());
    let t0 = Instant::now();

    let toast = ui.toast(Toast::success("Saved"), t0);
    assert!(ui.doc().has_class(&toast, "toast"));
    assert!(ui.doc().has_class(&toast, "toast-success"));
    assert!(ui.doc().has_class(&toast, "show"));
    assert_eq!(ui.doc().node(&toast).unwrap().text.as_deref(), Some("✓ Saved"));
}

#[test]
fn test_container_created_once_per_position() {
    let mut ui = Ui::new(Document::new());
    let t0 = Instant::now();

    ui.toast(Toast::info("one"), t0);
    ui.toast(Toast::info("two"), t0);
    assert_eq!(containers(&ui).len(), 1);

    ui.toast(Toast::info("three").with_position(ToastPosition::BottomLeft), t0);
    let all = containers(&ui);
    assert_eq!(all.len(), 2);
    let positions: Vec<_> = all
        .iter()
        .filter_map(|c| ui.doc().attr(c, "data-position"))
        .collect();
    assert!(positions.contains(&"top-right"));
    assert!(positions.contains(&"bottom-left"));
}

#[test]
fn test_container_survives_after_last_toast_leaves() {
    let mut ui = Ui::new(Document::new());
    let t0 = Instant::now();

    let toast = ui.toast(Toast::info("gone soon").with_delay(ms(500)), t0);
    ui.tick(t0 + ms(500));
    ui.tick(t0 + ms(700));
    assert!(!ui.doc().contains_node(&toast));
    assert!(ui.toasts().is_empty());
    assert_eq!(containers(&ui).len(), 1);
}

// =============================================================================
// Countdown
// =============================================================================

#[test]
fn test_autohide_fires_at_delay_then_detaches() {
    let mut ui = Ui::new(Document::new());
    let t0 = Instant::now();

    let toast = ui.toast(Toast::warning("careful").with_delay(ms(1000)), t0);
    ui.tick(t0 + ms(999));
    assert!(ui.doc().has_class(&toast, "show"));

    ui.tick(t0 + ms(1000));
    assert!(!ui.doc().has_class(&toast, "show"));
    assert!(ui.doc().contains_node(&toast));

    // Removal grace runs from the moment the hide started.
    ui.tick(t0 + ms(1200));
    assert!(!ui.doc().contains_node(&toast));
}

#[test]
fn test_sticky_toast_never_expires() {
    let mut ui = Ui::new(Document::new());
    let t0 = Instant::now();

    let toast = ui.toast(Toast::error("broken").sticky(), t0);
    ui.tick(t0 + ms(60_000));
    assert!(ui.doc().contains_node(&toast));
    assert!(ui.doc().has_class(&toast, "show"));
}

#[test]
fn test_hover_pauses_and_leave_restarts_full_delay() {
    let mut ui = Ui::new(Document::new());
    let t0 = Instant::now();

    let toast = ui.toast(Toast::info("hover me").with_delay(ms(1000)), t0);

    ui.pointer_enter(&toast);
    // Way past the original deadline: the paused countdown never fires.
    ui.tick(t0 + ms(5000));
    assert!(ui.doc().has_class(&toast, "show"));

    // Leaving restarts the whole delay, not the remainder.
    let t1 = t0 + ms(5000);
    ui.pointer_leave(&toast, t1);
    ui.tick(t1 + ms(999));
    assert!(ui.doc().has_class(&toast, "show"));
    ui.tick(t1 + ms(1000));
    assert!(!ui.doc().has_class(&toast, "show"));
}

#[test]
fn test_pause_on_sticky_toast_is_harmless() {
    let mut ui = Ui::new(Document::new());
    let t0 = Instant::now();

    let toast = ui.toast(Toast::info("pinned").sticky(), t0);
    ui.pointer_enter(&toast);
    ui.pointer_leave(&toast, t0 + ms(100));
    ui.tick(t0 + ms(10_000));
    assert!(ui.doc().contains_node(&toast));
}

// =============================================================================
// Lifecycle events
// =============================================================================

#[test]
fn test_full_event_sequence() {
    let mut ui = Ui::new(Document::new());
    let t0 = Instant::now();

    ui.toast(Toast::info("hello").with_delay(ms(1000)), t0);
    ui.tick(t0 + ms(200));
    ui.tick(t0 + ms(1000));
    ui.tick(t0 + ms(1200));

    let names: Vec<String> = ui.drain_events().into_iter().map(|e| e.name).collect();
    assert_eq!(
        names,
        vec!["toast.show", "toast.shown", "toast.hide", "toast.hidden"]
    );
}

#[test]
fn test_manual_hide_is_idempotent() {
    let mut ui = Ui::new(Document::new());
    let t0 = Instant::now();

    let toast = ui.toast(Toast::info("bye"), t0);
    ui.hide_toast(&toast, t0 + ms(100));
    ui.hide_toast(&toast, t0 + ms(120));
    ui.tick(t0 + ms(400));

    let names: Vec<String> = ui.drain_events().into_iter().map(|e| e.name).collect();
    assert_eq!(names.iter().filter(|n| *n == "toast.hide").count(), 1);
    assert_eq!(names.iter().filter(|n| *n == "toast.hidden").count(), 1);
}

// =============================================================================
// Declarative dismissal
// =============================================================================

#[test]
fn test_dismiss_button_inside_toast_closes_it() {
    let mut ui = Ui::new(Document::new());
    let t0 = Instant::now();

    let toast = ui.toast(Toast::info("closable").sticky(), t0);
    let close = ui.doc_mut().create_element_with_id("button", "toast-close");
    ui.doc_mut().set_attr(&close, "data-dismiss", "toast");
    ui.doc_mut().append_child(&toast, &close);

    ui.click_on(&close, t0 + ms(100));
    assert!(!ui.doc().has_class(&toast, "show"));
    ui.tick(t0 + ms(300));
    assert!(!ui.doc().contains_node(&toast));
}
