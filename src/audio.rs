//! Audio backend: the media element, the session's audio graph and its
//! analysis tap.

mod analyser;
mod graph;
mod media;
mod sink;
mod tap;
mod types;

pub use analyser::{Analyser, AnalyserHandle};
pub use graph::AudioGraph;
pub use media::RodioMedia;
pub use tap::{SampleTap, TappedSource};
pub use types::{MediaElement, MediaEvent};

#[cfg(test)]
mod tests;
