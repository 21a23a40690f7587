//! Walkthrough Example
//!
//! Drives the coordinator through a typical page session:
//! - A declaratively wired modal opened by a trigger click
//! - Escape closing the top of the stack
//! - A dropdown with keyboard navigation
//! - A toast that pauses while hovered
//!
//! Lifecycle events are printed as they fire; `log` output goes to
//! `walkthrough.log`.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use scrim::logging::{LevelFilter, init_file_logger};
use scrim::prelude::*;

fn build_page(doc: &mut Document) {
    let body = doc.body().clone();

    let modal = doc.create_element_with_id("div", "confirm-modal");
    doc.add_class(&modal, "modal");
    doc.append_child(&body, &modal);
    let ok = doc.create_element_with_id("button", "confirm-ok");
    doc.node_mut(&ok).unwrap().focusable = true;
    doc.append_child(&modal, &ok);
    let cancel = doc.create_element_with_id("button", "confirm-cancel");
    doc.set_attr(&cancel, "data-dismiss", "modal");
    doc.node_mut(&cancel).unwrap().focusable = true;
    doc.append_child(&modal, &cancel);

    let open = doc.create_element_with_id("button", "open-confirm");
    doc.set_attr(&open, "data-toggle", "modal");
    doc.set_attr(&open, "data-target", "#confirm-modal");
    doc.append_child(&body, &open);

    let dropdown = doc.create_element_with_id("div", "file-menu");
    doc.add_class(&dropdown, "dropdown");
    doc.append_child(&body, &dropdown);
    let toggle = doc.create_element_with_id("button", "file-menu-toggle");
    doc.set_attr(&toggle, "data-toggle", "dropdown");
    doc.node_mut(&toggle).unwrap().rect = Some(Rect::new(10, 10, 60, 24));
    doc.append_child(&dropdown, &toggle);
    let menu = doc.create_element_with_id("ul", "file-menu-list");
    doc.add_class(&menu, "dropdown-menu");
    doc.node_mut(&menu).unwrap().rect = Some(Rect::new(0, 0, 120, 80));
    doc.append_child(&dropdown, &menu);
    for label in ["new", "open", "save"] {
        let item = doc.create_element_with_id("li", format!("file-{label}"));
        doc.add_class(&item, "dropdown-item");
        doc.node_mut(&item).unwrap().focusable = true;
        doc.append_child(&menu, &item);
    }
}

fn pump(ui: &mut Ui, duration: Duration) {
    let step = Duration::from_millis(25);
    let mut elapsed = Duration::ZERO;
    while elapsed < duration {
        thread::sleep(step);
        elapsed += step;
        ui.tick(Instant::now());
        for event in ui.drain_events() {
            println!("  {} on {}", event.name, event.target);
        }
    }
}

fn main() -> io::Result<()> {
    init_file_logger("walkthrough.log", LevelFilter::Debug)?;

    let mut doc = Document::new();
    build_page(&mut doc);
    let mut ui = Ui::new(doc);

    println!("clicking the modal trigger");
    ui.click_on(&"open-confirm".into(), Instant::now());
    pump(&mut ui, Duration::from_millis(200));

    println!("pressing Escape");
    ui.key(Key::Escape, Modifiers::default(), Instant::now());
    pump(&mut ui, Duration::from_millis(200));

    println!("opening the file menu");
    ui.click_on(&"file-menu-toggle".into(), Instant::now());
    pump(&mut ui, Duration::from_millis(200));

    println!("walking the menu with arrows");
    ui.key(Key::Down, Modifiers::default(), Instant::now());
    ui.key(Key::Down, Modifiers::default(), Instant::now());
    println!("  focused: {:?}", ui.doc().focused());
    ui.key(Key::Escape, Modifiers::default(), Instant::now());
    pump(&mut ui, Duration::from_millis(200));

    println!("raising a toast with a short countdown");
    let toast = ui.toast(
        Toast::success("saved").with_delay(Duration::from_millis(300)),
        Instant::now(),
    );
    ui.pointer_enter(&toast);
    pump(&mut ui, Duration::from_millis(400));
    println!("  still visible while hovered");
    ui.pointer_leave(&toast, Instant::now());
    pump(&mut ui, Duration::from_millis(600));

    Ok(())
}
