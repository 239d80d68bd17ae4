//! Media element contract shared by the controller and the audio backend.

use std::time::Duration;

use crate::error::Result;
use crate::library::SourceHandle;

/// Timing events emitted by a media element, drained by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// The loaded source reported its duration.
    LoadedMetadata(Duration),
    /// Periodic playback position update.
    TimeUpdate(Duration),
    /// The loaded source played to its natural end.
    Ended,
}

/// Something that decodes a playable handle and outputs it.
///
/// `play` is the only operation whose failure matters to the controller:
/// the output path may not be available yet, in which case the controller
/// keeps reporting playback as inactive.
pub trait MediaElement {
    /// Replace the current source with `source`, paused at position 0.
    fn load(&mut self, source: &SourceHandle) -> Result<()>;
    /// Start or resume output of the loaded source.
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn seek(&mut self, to: Duration) -> Result<()>;
    /// `volume` is already clamped to `[0, 1]`.
    fn set_volume(&mut self, volume: f32);
    /// Drop the loaded source, if any.
    fn unload(&mut self);
    /// Take the events produced since the last call.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
