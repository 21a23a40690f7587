use std::time::{Duration, Instant};

use overdom::{Document, Key, Modifiers, NodeId, Rect, Viewport};
use scrim::Ui;
use scrim::dropdown::{DropdownOptions, place_menu};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// A dropdown container with a toggle button and a three-item menu.
fn dropdown_document() -> (Document, NodeId, NodeId, Vec<NodeId>) {
    let mut doc = Document::new();
    let body = doc.body().clone();
    let container = doc.create_element_with_id("div", "dd");
    doc.add_class(&container, "dropdown");
    doc.append_child(&body, &container);

    let toggle = doc.create_element_with_id("button", "dd-toggle");
    doc.set_attr(&toggle, "data-toggle", "dropdown");
    doc.node_mut(&toggle).unwrap().focusable = true;
    doc.node_mut(&toggle).unwrap().rect = Some(Rect::new(100, 50, 80, 30));
    doc.append_child(&container, &toggle);

    let menu = doc.create_element_with_id("ul", "dd-menu");
    doc.add_class(&menu, "dropdown-menu");
    doc.node_mut(&menu).unwrap().rect = Some(Rect::new(0, 0, 160, 120));
    doc.append_child(&container, &menu);

    let mut items = Vec::new();
    for i in 0..3 {
        let item = doc.create_element_with_id("li", format!("dd-item{i}"));
        doc.add_class(&item, "dropdown-item");
        doc.node_mut(&item).unwrap().focusable = true;
        doc.append_child(&menu, &item);
        items.push(item);
    }
    (doc, container, menu, items)
}

// =============================================================================
// Placement
// =============================================================================

#[test]
fn test_menu_drops_below_when_it_fits() {
    let toggle = Rect::new(100, 50, 80, 30);
    let placement = place_menu(toggle, 160, 120, Viewport::new(1024, 768));
    assert_eq!(placement.left, 100);
    assert_eq!(placement.top, 80);
    assert!(!placement.dropup);
}

#[test]
fn test_menu_flips_above_near_bottom_edge() {
    let toggle = Rect::new(100, 700, 80, 30);
    let placement = place_menu(toggle, 160, 120, Viewport::new(1024, 768));
    assert_eq!(placement.top, 580);
    assert!(placement.dropup);
}

#[test]
fn test_menu_clamps_to_top_when_neither_direction_fits() {
    let toggle = Rect::new(100, 40, 80, 30);
    let placement = place_menu(toggle, 160, 200, Viewport::new(1024, 100));
    assert_eq!(placement.top, 0);
    assert!(!placement.dropup);
}

#[test]
fn test_menu_right_aligns_near_right_edge() {
    let toggle = Rect::new(950, 50, 60, 30);
    let placement = place_menu(toggle, 160, 120, Viewport::new(1024, 768));
    // Right edge of the menu meets the right edge of the toggle.
    assert_eq!(placement.left, 850);
}

#[test]
fn test_menu_clamps_to_left_when_wider_than_viewport_remainder() {
    let toggle = Rect::new(10, 50, 60, 30);
    let placement = place_menu(toggle, 300, 120, Viewport::new(200, 768));
    assert_eq!(placement.left, 0);
}

#[test]
fn test_placement_respects_scroll_offsets() {
    let mut viewport = Viewport::new(1024, 768);
    viewport.scroll_y = 1000;
    // Page-relative toggle low in the second screenful.
    let toggle = Rect::new(100, 1700, 80, 30);
    let placement = place_menu(toggle, 160, 120, viewport);
    assert_eq!(placement.top, 1580);
    assert!(placement.dropup);
}

// =============================================================================
// Open / close side effects
// =============================================================================

#[test]
fn test_show_marks_classes_aria_and_position() {
    let (doc, container, menu, _) = dropdown_document();
    let mut ui = Ui::new(doc);
    let t0 = Instant::now();

    ui.show_dropdown(&container, t0);
    assert!(ui.dropdown_open(&container));
    assert!(ui.doc().has_class(&menu, "show"));
    assert_eq!(ui.doc().attr(&menu, "aria-expanded"), Some("true"));
    let toggle: NodeId = "dd-toggle".into();
    assert!(ui.doc().has_class(&toggle, "show"));

    let menu_node = ui.doc().node(&menu).unwrap();
    assert_eq!(menu_node.left, Some(100));
    assert_eq!(menu_node.top, Some(80));
    assert_eq!(menu_node.z_index, Some(1000));
}

#[test]
fn test_first_item_focused_after_settle_delay() {
    let (doc, container, _, items) = dropdown_document();
    let mut ui = Ui::new(doc);
    let t0 = Instant::now();

    ui.show_dropdown(&container, t0);
    ui.tick(t0 + ms(99));
    assert_ne!(ui.doc().focused(), Some(&items[0]));
    ui.tick(t0 + ms(100));
    assert_eq!(ui.doc().focused(), Some(&items[0]));
}

#[test]
fn test_close_before_settle_cancels_pending_focus() {
    let (doc, container, _, items) = dropdown_document();
    let mut ui = Ui::new(doc);
    let t0 = Instant::now();

    ui.show_dropdown(&container, t0);
    ui.hide_dropdown(&container, t0 + ms(50));
    ui.tick(t0 + ms(200));
    assert_ne!(ui.doc().focused(), Some(&items[0]));
}

#[test]
fn test_shown_and_hidden_events_fire_after_transition() {
    let (doc, container, _, _) = dropdown_document();
    let mut ui = Ui::new(doc);
    let t0 = Instant::now();

    ui.show_dropdown(&container, t0);
    ui.tick(t0 + ms(150));
    let names: Vec<String> = ui.drain_events().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["dropdown.show", "dropdown.shown"]);

    let t1 = t0 + ms(300);
    ui.hide_dropdown(&container, t1);
    ui.tick(t1 + ms(150));
    let names: Vec<String> = ui.drain_events().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["dropdown.hide", "dropdown.hidden"]);
}

// =============================================================================
// Outside-interaction sweep
// =============================================================================

#[test]
fn test_outside_click_closes_open_menu() {
    let (mut doc, container, _, _) = dropdown_document();
    let body = doc.body().clone();
    let elsewhere = doc.create_element_with_id("div", "elsewhere");
    doc.append_child(&body, &elsewhere);

    let mut ui = Ui::new(doc);
    let t0 = Instant::now();
    ui.show_dropdown(&container, t0);
    ui.click_on(&elsewhere, t0 + ms(200));
    assert!(!ui.dropdown_open(&container));
}

#[test]
fn test_inside_click_keeps_menu_open() {
    let (doc, container, _, items) = dropdown_document();
    let mut ui = Ui::new(doc);
    let t0 = Instant::now();

    ui.show_dropdown(&container, t0);
    ui.click_on(&items[1], t0 + ms(200));
    assert!(ui.dropdown_open(&container));
}

#[test]
fn test_auto_close_disabled_survives_outside_click() {
    let (mut doc, container, _, _) = dropdown_document();
    let body = doc.body().clone();
    let elsewhere = doc.create_element_with_id("div", "elsewhere");
    doc.append_child(&body, &elsewhere);

    let mut ui = Ui::new(doc);
    ui.ensure_dropdown(&container, DropdownOptions { auto_close: false });
    let t0 = Instant::now();
    ui.show_dropdown(&container, t0);
    ui.click_on(&elsewhere, t0 + ms(200));
    assert!(ui.dropdown_open(&container));
}

#[test]
fn test_escape_closes_menu_and_refocuses_toggle() {
    let (doc, container, _, _) = dropdown_document();
    let mut ui = Ui::new(doc);
    let t0 = Instant::now();

    ui.show_dropdown(&container, t0);
    ui.tick(t0 + ms(100));
    ui.key(Key::Escape, Modifiers::default(), t0 + ms(200));
    assert!(!ui.dropdown_open(&container));
    let toggle: NodeId = "dd-toggle".into();
    assert_eq!(ui.doc().focused(), Some(&toggle));
}

// =============================================================================
// Keyboard navigation
// =============================================================================

#[test]
fn test_arrow_keys_cycle_with_wraparound() {
    let (doc, container, _, items) = dropdown_document();
    let mut ui = Ui::new(doc);
    let t0 = Instant::now();

    ui.show_dropdown(&container, t0);
    ui.tick(t0 + ms(100));
    assert_eq!(ui.doc().focused(), Some(&items[0]));

    ui.key(Key::Down, Modifiers::default(), t0 + ms(200));
    assert_eq!(ui.doc().focused(), Some(&items[1]));
    ui.key(Key::Down, Modifiers::default(), t0 + ms(200));
    ui.key(Key::Down, Modifiers::default(), t0 + ms(200));
    assert_eq!(ui.doc().focused(), Some(&items[0]));

    ui.key(Key::Up, Modifiers::default(), t0 + ms(200));
    assert_eq!(ui.doc().focused(), Some(&items[2]));
}

#[test]
fn test_home_and_end_jump_to_extremes() {
    let (doc, container, _, items) = dropdown_document();
    let mut ui = Ui::new(doc);
    let t0 = Instant::now();

    ui.show_dropdown(&container, t0);
    ui.tick(t0 + ms(100));
    ui.key(Key::End, Modifiers::default(), t0 + ms(200));
    assert_eq!(ui.doc().focused(), Some(&items[2]));
    ui.key(Key::Home, Modifiers::default(), t0 + ms(200));
    assert_eq!(ui.doc().focused(), Some(&items[0]));
}

#[test]
fn test_disabled_items_are_skipped() {
    let (mut doc, container, _, items) = dropdown_document();
    doc.node_mut(&items[1]).unwrap().disabled = true;

    let mut ui = Ui::new(doc);
    let t0 = Instant::now();
    ui.show_dropdown(&container, t0);
    ui.tick(t0 + ms(100));

    ui.key(Key::Down, Modifiers::default(), t0 + ms(200));
    assert_eq!(ui.doc().focused(), Some(&items[2]));
}

#[test]
fn test_tab_closes_menu_but_passes_through() {
    let (doc, container, _, _) = dropdown_document();
    let mut ui = Ui::new(doc);
    let t0 = Instant::now();

    ui.show_dropdown(&container, t0);
    ui.tick(t0 + ms(100));
    ui.key(Key::Tab, Modifiers::default(), t0 + ms(200));
    assert!(!ui.dropdown_open(&container));
}
