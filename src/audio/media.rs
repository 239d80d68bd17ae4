use std::time::Duration;

use rodio::Sink;

use crate::config::AudioSettings;
use crate::error::{Error, Result};
use crate::library::SourceHandle;

use super::analyser::AnalyserHandle;
use super::graph::AudioGraph;
use super::sink::create_tapped_sink;
use super::types::{MediaElement, MediaEvent};

/// `MediaElement` backed by a `rodio` sink on the session's `AudioGraph`.
///
/// rodio mixes on its own thread; this type only ever touches the sink from
/// the UI thread, and learns about the end of a track by polling
/// `Sink::empty`.
pub struct RodioMedia {
    graph: AudioGraph,
    sink: Option<Sink>,
    paused: bool,
    ended_reported: bool,
    volume: f32,
    events: Vec<MediaEvent>,
}

impl RodioMedia {
    pub fn new(settings: AudioSettings) -> Self {
        Self {
            volume: settings.initial_volume,
            graph: AudioGraph::new(settings),
            sink: None,
            paused: true,
            ended_reported: false,
            events: Vec::new(),
        }
    }

    /// Analysis tap of this session, created if absent.
    pub fn analyser(&mut self) -> AnalyserHandle {
        self.graph.analyser()
    }
}

impl MediaElement for RodioMedia {
    fn load(&mut self, source: &SourceHandle) -> Result<()> {
        self.unload();
        // Positions of the previous source are meaningless now.
        self.events.clear();

        let tap = self.graph.tap();
        let stream = self.graph.output()?;
        let (sink, duration) = create_tapped_sink(stream, source.path(), tap)?;
        sink.set_volume(self.volume);

        tracing::debug!(url = source.url(), path = %source.path().display(), "loaded source");
        self.sink = Some(sink);
        self.paused = true;
        self.ended_reported = false;
        if let Some(d) = duration {
            self.events.push(MediaEvent::LoadedMetadata(d));
        }
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let sink = self.sink.as_ref().ok_or(Error::NothingLoaded)?;
        sink.play();
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.paused = true;
        // A paused element outputs silence; let the bars fall.
        self.graph.tap().clear();
    }

    fn seek(&mut self, to: Duration) -> Result<()> {
        let sink = self.sink.as_ref().ok_or(Error::NothingLoaded)?;
        sink.try_seek(to)?;
        self.ended_reported = false;
        self.events.push(MediaEvent::TimeUpdate(to));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn unload(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.paused = true;
        self.ended_reported = false;
        self.graph.tap().clear();
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        if let Some(sink) = &self.sink {
            if !self.paused {
                if sink.empty() {
                    if !self.ended_reported {
                        self.ended_reported = true;
                        self.events.push(MediaEvent::Ended);
                    }
                } else {
                    self.events.push(MediaEvent::TimeUpdate(sink.get_pos()));
                }
            }
        }
        std::mem::take(&mut self.events)
    }
}

impl Drop for RodioMedia {
    fn drop(&mut self) {
        self.unload();
    }
}
