//! Playback controller.
//!
//! Owns the playlist and drives a `MediaElement`. All mutation happens
//! through `Player::apply` (UI commands) and `Player::handle_media_event`
//! (timing events drained from the element).

use std::path::PathBuf;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::audio::{MediaElement, MediaEvent};
use crate::config::{LibrarySettings, Settings};
use crate::library::{SourceRegistry, Track, build_tracks, expand_selection};

use super::command::Command;

/// Playlist plus transport state.
///
/// When `tracks` is empty, `current` and `position` are zero and
/// `is_playing` is false.
#[derive(Debug)]
pub struct PlaylistState {
    pub tracks: Vec<Track>,
    pub current: usize,
    pub shuffle: bool,
    pub repeat: bool,
    pub volume: f32,
    pub position: Duration,
    pub is_playing: bool,
}

impl PlaylistState {
    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }
}

pub struct Player<M: MediaElement> {
    state: PlaylistState,
    media: M,
    registry: SourceRegistry,
    library: LibrarySettings,
    rng: StdRng,
    /// Whether the current track's source is loaded into `media`.
    loaded: bool,
}

impl<M: MediaElement> Player<M> {
    pub fn new(media: M, settings: &Settings) -> Self {
        Self::with_rng(media, settings, StdRng::from_os_rng())
    }

    pub fn with_rng(mut media: M, settings: &Settings, rng: StdRng) -> Self {
        let volume = settings.audio.initial_volume.clamp(0.0, 1.0);
        media.set_volume(volume);

        Self {
            state: PlaylistState {
                tracks: Vec::new(),
                current: 0,
                shuffle: settings.playback.shuffle,
                repeat: settings.playback.repeat,
                volume,
                position: Duration::ZERO,
                is_playing: false,
            },
            media,
            registry: SourceRegistry::new(),
            library: settings.library.clone(),
            rng,
            loaded: false,
        }
    }

    pub fn state(&self) -> &PlaylistState {
        &self.state
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn apply(&mut self, cmd: Command) {
        debug!(?cmd, "apply");
        match cmd {
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::TogglePlay => {
                if self.state.is_playing {
                    self.pause();
                } else {
                    self.play();
                }
            }
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::Seek(to) => self.seek(to),
            Command::SeekBy(secs) => self.seek_by(secs),
            Command::SetVolume(v) => self.set_volume(v),
            Command::ToggleShuffle => self.state.shuffle = !self.state.shuffle,
            Command::ToggleRepeat => self.state.repeat = !self.state.repeat,
            Command::AddTracks(paths) => self.add_tracks(&paths),
            Command::Select(index) => {
                if index < self.state.tracks.len() {
                    self.start_track(index);
                }
            }
            Command::Clear => self.clear(),
        }
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadedMetadata(duration) => {
                let current = self.state.current;
                if let Some(track) = self.state.tracks.get_mut(current) {
                    track.duration = Some(duration);
                }
            }
            MediaEvent::TimeUpdate(position) => {
                if !self.state.is_empty() {
                    self.state.position = position;
                }
            }
            MediaEvent::Ended => self.track_ended(),
        }
    }

    /// Drain and handle everything the media element reported since the
    /// last call.
    pub fn pump_media_events(&mut self) {
        for event in self.media.poll_events() {
            self.handle_media_event(event);
        }
    }

    fn play(&mut self) {
        if self.state.is_empty() {
            return;
        }
        if !self.loaded && !self.load_current() {
            return;
        }
        match self.media.play() {
            Ok(()) => self.state.is_playing = true,
            Err(e) => warn!(error = %e, "playback did not start"),
        }
    }

    fn pause(&mut self) {
        self.media.pause();
        self.state.is_playing = false;
    }

    fn next(&mut self) {
        let len = self.state.tracks.len();
        if len == 0 {
            return;
        }
        // Shuffle may land on the current track again.
        let index = if self.state.shuffle {
            self.rng.random_range(0..len)
        } else {
            (self.state.current + 1) % len
        };
        self.start_track(index);
    }

    fn previous(&mut self) {
        let len = self.state.tracks.len();
        if len == 0 {
            return;
        }
        self.start_track((self.state.current + len - 1) % len);
    }

    fn track_ended(&mut self) {
        if self.state.is_empty() {
            return;
        }
        if self.state.repeat {
            // The finished source cannot be rewound; load it again at 0.
            self.start_track(self.state.current);
        } else {
            self.next();
        }
    }

    fn seek(&mut self, to: Duration) {
        let Some(track) = self.state.current_track() else {
            return;
        };
        let to = match track.duration {
            Some(duration) => to.min(duration),
            None => to,
        };
        match self.media.seek(to) {
            Ok(()) => self.state.position = to,
            Err(e) => warn!(error = %e, "seek failed"),
        }
    }

    fn seek_by(&mut self, secs: i64) {
        let delta = Duration::from_secs(secs.unsigned_abs());
        let target = if secs >= 0 {
            self.state.position.saturating_add(delta)
        } else {
            self.state.position.saturating_sub(delta)
        };
        self.seek(target);
    }

    fn set_volume(&mut self, volume: f32) {
        if !volume.is_finite() {
            return;
        }
        self.state.volume = volume.clamp(0.0, 1.0);
        self.media.set_volume(self.state.volume);
    }

    fn add_tracks(&mut self, selection: &[PathBuf]) {
        let files = expand_selection(selection, &self.library);
        let added = build_tracks(&files, &mut self.registry, &self.library);
        if added.is_empty() {
            debug!(selected = selection.len(), "nothing playable in selection");
            return;
        }

        let was_empty = self.state.is_empty();
        info!(count = added.len(), "tracks added");
        self.state.tracks.extend(added);

        if was_empty {
            self.start_track(0);
        }
    }

    fn clear(&mut self) {
        self.media.unload();
        self.loaded = false;
        for track in self.state.tracks.drain(..) {
            self.registry.release(track.source);
        }
        self.state.current = 0;
        self.state.position = Duration::ZERO;
        self.state.is_playing = false;
        info!("playlist cleared");
    }

    /// Select `index`, load it from position 0 and start playback.
    fn start_track(&mut self, index: usize) {
        self.state.current = index;
        self.state.position = Duration::ZERO;
        self.state.is_playing = false;
        self.loaded = false;
        if self.load_current() {
            self.play();
        }
    }

    fn load_current(&mut self) -> bool {
        let Some(track) = self.state.tracks.get(self.state.current) else {
            return false;
        };
        match self.media.load(&track.source) {
            Ok(()) => {
                debug!(id = %track.id, "loaded");
                self.loaded = true;
                true
            }
            Err(e) => {
                warn!(error = %e, id = %track.id, "could not load track");
                false
            }
        }
    }
}
