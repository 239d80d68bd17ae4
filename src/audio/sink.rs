//! Utilities for creating `rodio` sinks from playable handles.
//!
//! The helper here encapsulates opening/decoding a file, routing it through
//! the analysis tap and preparing a paused `Sink`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::{Error, Result};

use super::tap::{SampleTap, TappedSource};

/// Create a paused `Sink` for the file at `path`, tapped into `tap`.
///
/// Also returns the duration when the decoder or the file's tags know it.
pub(super) fn create_tapped_sink(
    stream: &OutputStream,
    path: &Path,
    tap: SampleTap,
) -> Result<(Sink, Option<Duration>)> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let duration = decoder.total_duration().or_else(|| probe_duration(path));

    let sink = Sink::connect_new(stream.mixer());
    sink.append(TappedSource::new(decoder, tap));
    sink.pause();
    Ok((sink, duration))
}

/// Duration from the container headers; used for formats the decoder cannot size.
fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}
