//! Playlist entries and how files become them.
//!
//! `intake` filters the user's selection to audio files and builds tracks,
//! `handles` owns the playable handle of every track.

mod display;
mod handles;
mod intake;
mod media_type;
mod model;

pub use display::{cover_letter, format_time};
pub use handles::{SourceHandle, SourceRegistry};
pub use intake::{build_tracks, expand_selection};
pub use media_type::{declared_media_type, is_audio_file};
pub use model::{Track, TrackId};

#[cfg(test)]
mod tests;
