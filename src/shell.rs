//! Line-oriented command front-end.
//!
//! [`apply`] is the update function: it routes one [`Message`] to the
//! matching [`Session`] operation and turns the outcome into a reply line.
//! [`run`] drives it from any reader and writer.

use std::io::{self, BufRead, Write};

use crate::constants::SHELL_PROMPT;
use crate::message::{HELP_TEXT, Message};
use crate::session::Session;

/// Result of applying one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to show the user; may be empty
    Text(String),
    /// The shell should stop
    Quit,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }
}

fn status_line(session: &Session) -> String {
    match session.current_image() {
        Some(path) => format!(
            "[{}/{}] {} ({}x{} cells of {}px{})",
            session.current_image_number(),
            session.total_images(),
            path.display(),
            session.grid().width(),
            session.grid().height(),
            session.cell_size(),
            if session.is_dirty() { ", unsaved" } else { "" }
        ),
        None => format!("No image open (cell size {}px)", session.cell_size()),
    }
}

fn navigated(session: &Session, changed: bool) -> String {
    if changed {
        status_line(session)
    } else {
        format!("Staying at {}", status_line(session))
    }
}

/// Apply one message to the session.
///
/// Errors are reported in the reply text; the session stays usable.
pub fn apply(session: &mut Session, message: Message) -> Reply {
    log::debug!("📨 {:?}", message);

    let outcome: crate::session::Result<String> = match message {
        Message::OpenDirectory(dir) => session.open_directory(&dir).map(|opened| {
            if opened {
                status_line(session)
            } else {
                format!("No images found in {}", dir.display())
            }
        }),
        Message::OpenFile(path) => session.open_file(&path).map(|()| status_line(session)),
        Message::NextImage => session.load_next().map(|changed| navigated(session, changed)),
        Message::PrevImage => session
            .load_previous()
            .map(|changed| navigated(session, changed)),
        Message::GoTo(number) => session
            .load_by_index(number)
            .map(|changed| navigated(session, changed)),
        Message::ToggleCell(x, y) => {
            let changed = session.toggle_cell(x, y);
            Ok(cell_reply(session, x, y, changed))
        }
        Message::SetCell(x, y, state) => {
            let changed = session.set_cell(x, y, state);
            Ok(cell_reply(session, x, y, changed))
        }
        Message::ClearSelection => Ok(if session.clear_selection() {
            "Selection cleared".to_string()
        } else {
            "Nothing to clear".to_string()
        }),
        Message::SetCellSize(size) => session
            .set_pixel_grid_size(size)
            .map(|()| status_line(session)),
        Message::Save => session.save_selection_file().map(|saved| match saved {
            Some(path) => format!("Saved {}", path.display()),
            None => "No image open".to_string(),
        }),
        Message::ExportMask => session.export_mask().map(|exported| match exported {
            Some(path) => format!("Exported {}", path.display()),
            None => "No image open".to_string(),
        }),
        Message::Show => Ok(session.grid().to_string()),
        Message::Status => Ok(status_line(session)),
        Message::Help => Ok(HELP_TEXT.to_string()),
        Message::Quit => return Reply::Quit,
    };

    match outcome {
        Ok(text) => Reply::text(text),
        Err(e) => {
            log::error!("❌ {}", e);
            Reply::text(format!("error: {}", e))
        }
    }
}

fn cell_reply(session: &Session, x: usize, y: usize, changed: bool) -> String {
    match session.grid().get(x, y) {
        Ok(state) if changed => format!("({}, {}) is now {}", x, y, state),
        Ok(state) => format!("({}, {}) stays {}", x, y, state),
        Err(e) => format!("error: {}", e),
    }
}

/// Read commands from `input` until end of input or `quit`.
///
/// Replies go to `output`. Only I/O errors on the streams are returned.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut output: W) -> io::Result<()> {
    write!(output, "{}", SHELL_PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match Message::parse(&line) {
            Ok(Some(message)) => match apply(session, message) {
                Reply::Quit => return Ok(()),
                Reply::Text(text) if text.is_empty() => {}
                Reply::Text(text) => writeln!(output, "{}", text.trim_end())?,
            },
            Ok(None) => {}
            Err(e) => writeln!(output, "error: {}", e)?,
        }
        write!(output, "{}", SHELL_PROMPT)?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}
