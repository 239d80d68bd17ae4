use std::path::PathBuf;
use std::time::Duration;

/// Everything the UI can ask the playback controller to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    TogglePlay,
    Next,
    Previous,
    Seek(Duration),
    /// Scrub relative to the current position, in seconds.
    SeekBy(i64),
    SetVolume(f32),
    ToggleShuffle,
    ToggleRepeat,
    /// Files or directories picked by the user.
    AddTracks(Vec<PathBuf>),
    /// Jump to a playlist index.
    Select(usize),
    Clear,
}
