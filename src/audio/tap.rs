//! Inline analysis tap.
//!
//! `TappedSource` wraps a decoded source on its way to the mixer and copies a
//! mono downmix of every frame into a shared `SampleTap` window. Samples are
//! forwarded untouched, so the tap never changes what is heard.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rodio::source::SeekError;
use rodio::{ChannelCount, Sample, SampleRate, Source};

/// Frames collected locally before taking the window lock.
const PUSH_BATCH: usize = 128;

/// Sliding window of the most recent mono frames.
///
/// Written from rodio's mixer thread and read from the UI thread. Both sides
/// use `try_lock`; a contended write drops that batch, a contended read
/// reports failure to the caller.
#[derive(Debug, Clone)]
pub struct SampleTap {
    window: Arc<Mutex<VecDeque<f32>>>,
    capacity: usize,
}

impl SampleTap {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push_frames(&self, frames: &[f32]) {
        let Ok(mut window) = self.window.try_lock() else {
            return;
        };
        for &f in frames {
            if window.len() == self.capacity {
                window.pop_front();
            }
            window.push_back(f);
        }
    }

    /// Copy the newest `out.len()` frames into `out`, zero-padding the front
    /// when fewer are available. Returns `false` if the window was busy.
    pub fn copy_latest(&self, out: &mut [f32]) -> bool {
        let Ok(window) = self.window.try_lock() else {
            return false;
        };
        let available = window.len().min(out.len());
        let pad = out.len() - available;
        out[..pad].fill(0.0);
        let skip = window.len() - available;
        for (dst, src) in out[pad..].iter_mut().zip(window.iter().skip(skip)) {
            *dst = *src;
        }
        true
    }

    /// Forget buffered frames, e.g. when output pauses.
    pub fn clear(&self) {
        if let Ok(mut window) = self.window.lock() {
            window.clear();
        }
    }
}

pub struct TappedSource<I> {
    input: I,
    tap: SampleTap,
    frame_sum: f32,
    frame_len: ChannelCount,
    pending: Vec<f32>,
}

impl<I> TappedSource<I> {
    pub fn new(input: I, tap: SampleTap) -> Self {
        Self {
            input,
            tap,
            frame_sum: 0.0,
            frame_len: 0,
            pending: Vec::with_capacity(PUSH_BATCH),
        }
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.tap.push_frames(&self.pending);
            self.pending.clear();
        }
    }
}

impl<I> Iterator for TappedSource<I>
where
    I: Source,
{
    type Item = Sample;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(sample) = self.input.next() else {
            self.flush();
            return None;
        };

        let channels = self.input.channels().max(1);
        self.frame_sum += sample;
        self.frame_len += 1;
        if self.frame_len >= channels {
            self.pending.push(self.frame_sum / f32::from(channels));
            self.frame_sum = 0.0;
            self.frame_len = 0;
            if self.pending.len() >= PUSH_BATCH {
                self.flush();
            }
        }

        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.input.size_hint()
    }
}

impl<I> Source for TappedSource<I>
where
    I: Source,
{
    fn current_span_len(&self) -> Option<usize> {
        self.input.current_span_len()
    }

    fn channels(&self) -> ChannelCount {
        self.input.channels()
    }

    fn sample_rate(&self) -> SampleRate {
        self.input.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.input.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), SeekError> {
        self.frame_sum = 0.0;
        self.frame_len = 0;
        self.pending.clear();
        self.input.try_seek(pos)
    }
}
