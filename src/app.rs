//! Application state: the playback controller and the UI model around it.
//!
//! `Player` owns the playlist and the media element; `App` only holds what
//! the terminal UI needs on top (cursor, filter, prompts).

mod command;
mod model;
mod player;

pub use command::Command;
pub use model::{App, InputMode};
pub use player::{Player, PlaylistState};
