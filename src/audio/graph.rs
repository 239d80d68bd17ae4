//! The session's audio graph: decoded source -> analysis tap -> output mixer.

use rodio::{OutputStream, OutputStreamBuilder};

use crate::config::AudioSettings;
use crate::error::Result;

use super::analyser::{Analyser, AnalyserHandle};
use super::tap::SampleTap;

/// Created once per player session. The output stream and the analyser are
/// both created on first use and live until the graph is dropped.
pub struct AudioGraph {
    settings: AudioSettings,
    tap: SampleTap,
    output: Option<OutputStream>,
    analyser: Option<AnalyserHandle>,
}

impl AudioGraph {
    pub fn new(settings: AudioSettings) -> Self {
        let tap = SampleTap::new(settings.fft_size);
        Self {
            settings,
            tap,
            output: None,
            analyser: None,
        }
    }

    /// The shared tap every decoded source is routed through.
    pub fn tap(&self) -> SampleTap {
        self.tap.clone()
    }

    /// Open the default output device if that has not happened yet.
    pub fn output(&mut self) -> Result<&OutputStream> {
        let stream = match self.output.take() {
            Some(stream) => stream,
            None => {
                let mut stream = OutputStreamBuilder::open_default_stream()?;
                // rodio logs to stderr when the stream is dropped, which would
                // land on top of the TUI.
                stream.log_on_drop(false);
                tracing::info!("opened default audio output");
                stream
            }
        };
        Ok(self.output.insert(stream))
    }

    #[cfg(test)]
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// The session's analyser, created on first request.
    pub fn analyser(&mut self) -> AnalyserHandle {
        if let Some(handle) = &self.analyser {
            return handle.clone();
        }
        tracing::debug!(
            fft_size = self.settings.fft_size,
            smoothing = self.settings.smoothing,
            "creating analysis tap"
        );
        let handle = AnalyserHandle::new(Analyser::new(self.tap.clone(), &self.settings));
        self.analyser = Some(handle.clone());
        handle
    }
}
