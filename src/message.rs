//! Command messages for GridMask.
//!
//! Every user action is represented as a [`Message`]. The shell parses one
//! message per input line and hands it to [`crate::shell::apply`].

use std::path::PathBuf;

use gridmask_model::CellState;
use thiserror::Error;

/// Messages that can be sent to update the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Open every image of a folder
    OpenDirectory(PathBuf),
    /// Open a single image
    OpenFile(PathBuf),
    /// Save and move to the next image
    NextImage,
    /// Save and move to the previous image
    PrevImage,
    /// Save and jump to a 1-based image number
    GoTo(i64),
    /// Flip a cell between default and selected
    ToggleCell(usize, usize),
    /// Set a cell to an explicit state
    SetCell(usize, usize, CellState),
    /// Reset every cell to default
    ClearSelection,
    /// Change the cell edge length in pixels
    SetCellSize(u32),
    /// Write the selection file
    Save,
    /// Write the mask PNG
    ExportMask,
    /// Print the grid
    Show,
    /// Print the session status
    Status,
    /// Print the command list
    Help,
    /// Leave the shell
    Quit,
}

/// Error produced when an input line is not a valid command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// First word is not a known command
    #[error("Unknown command '{0}', type 'help' for a list")]
    UnknownCommand(String),

    /// Wrong number of arguments
    #[error("'{command}' expects {expected}")]
    Usage {
        /// Canonical command name
        command: &'static str,
        /// Description of the expected arguments
        expected: &'static str,
    },

    /// Argument could not be parsed
    #[error("Invalid {what} '{value}'")]
    InvalidArgument {
        /// Kind of argument that was expected
        what: &'static str,
        /// The text as typed
        value: String,
    },
}

/// Command summary printed by `help`.
pub const HELP_TEXT: &str = "\
Commands:
  open <dir>            open every png/jpg/jpeg image in a folder
  file <image>          open a single image
  next | n              save and go to the next image
  prev | p              save and go to the previous image
  goto <number>         save and go to image <number> (1-based)
  toggle <x> <y>        flip a cell between default and selected
  set <x> <y> <state>   set a cell to -1, 0 or 1 (forbidden, default, selected)
  clear                 reset every cell to default
  cell <pixels>         change the cell size and re-grid the image
  save                  write the selection file
  mask                  export the selection as masks/<name>.png
  show                  print the grid
  status                print the current image and counters
  help                  print this text
  quit | q              leave";

fn parse_coord(value: &str) -> Result<usize, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidArgument {
        what: "coordinate",
        value: value.to_string(),
    })
}

fn expect_args(
    args: &[&str],
    count: usize,
    command: &'static str,
    expected: &'static str,
) -> Result<(), ParseError> {
    if args.len() == count {
        Ok(())
    } else {
        Err(ParseError::Usage { command, expected })
    }
}

impl Message {
    /// Parse one input line.
    ///
    /// Blank lines and lines starting with `#` yield `Ok(None)`. Path
    /// arguments take the rest of the line so they may contain spaces.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let message = match command.to_ascii_lowercase().as_str() {
            "open" | "dir" => {
                if rest.is_empty() {
                    return Err(ParseError::Usage {
                        command: "open",
                        expected: "a folder path",
                    });
                }
                Message::OpenDirectory(PathBuf::from(rest))
            }
            "file" => {
                if rest.is_empty() {
                    return Err(ParseError::Usage {
                        command: "file",
                        expected: "an image path",
                    });
                }
                Message::OpenFile(PathBuf::from(rest))
            }
            "next" | "n" => Message::NextImage,
            "prev" | "p" => Message::PrevImage,
            "goto" | "g" => {
                expect_args(&args, 1, "goto", "an image number")?;
                let number = args[0].parse().map_err(|_| ParseError::InvalidArgument {
                    what: "image number",
                    value: args[0].to_string(),
                })?;
                Message::GoTo(number)
            }
            "toggle" | "t" => {
                expect_args(&args, 2, "toggle", "<x> <y>")?;
                Message::ToggleCell(parse_coord(args[0])?, parse_coord(args[1])?)
            }
            "set" => {
                expect_args(&args, 3, "set", "<x> <y> <state>")?;
                let invalid_state = || ParseError::InvalidArgument {
                    what: "state",
                    value: args[2].to_string(),
                };
                let value: i32 = args[2].parse().map_err(|_| invalid_state())?;
                let state = CellState::try_from(value).map_err(|_| invalid_state())?;
                Message::SetCell(parse_coord(args[0])?, parse_coord(args[1])?, state)
            }
            "clear" => Message::ClearSelection,
            "cell" | "size" => {
                expect_args(&args, 1, "cell", "a size in pixels")?;
                let size = args[0].parse().map_err(|_| ParseError::InvalidArgument {
                    what: "cell size",
                    value: args[0].to_string(),
                })?;
                Message::SetCellSize(size)
            }
            "save" | "w" => Message::Save,
            "mask" | "export" => Message::ExportMask,
            "show" | "grid" => Message::Show,
            "status" => Message::Status,
            "help" | "?" => Message::Help,
            "quit" | "exit" | "q" => Message::Quit,
            _ => return Err(ParseError::UnknownCommand(command.to_string())),
        };

        Ok(Some(message))
    }
}
