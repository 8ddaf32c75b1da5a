//! Tests for session opening, navigation, editing and persistence.

mod persistence_tests;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{Session, SessionEvent};

type EventLog = Rc<RefCell<Vec<SessionEvent>>>;

/// Subscribe a recorder that keeps every event.
fn record(session: &mut Session) -> EventLog {
    let events: EventLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

/// Write a blank RGB image; the format follows the extension.
fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::new(width, height).save(&path).unwrap();
    path
}
