//! 48-bar frequency visualizer.
//!
//! Each frame schedules the next one first, then reads a byte spectrum
//! from the attached source (if any) and repaints the surface. Without a
//! source the surface is cleared and the loop keeps running.

mod bars;
mod resize;
mod scheduler;
mod source;
mod surface;
mod widget;

pub use bars::{BAR_COUNT, bar_height, bar_rects, paint_bars, sample_bin};
pub use resize::ResizeWatcher;
pub use scheduler::{FrameRequestId, FrameScheduler};
pub use source::FrequencySource;
pub use surface::{HALF_BLOCK, PixelDensity, RectF, Rgba, Surface};
pub use widget::SurfaceView;

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use tracing::{debug, trace};

use crate::config::VisualizerSettings;


/// What a frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Bars were painted from a fresh snapshot.
    Painted,
    /// No source attached; the surface was cleared.
    Idle,
    /// The source had no snapshot; the previous pixels were kept.
    Skipped,
}

pub struct Visualizer {
    source: Option<Box<dyn FrequencySource>>,
    bins: Vec<u8>,
    surface: Surface,
    scheduler: FrameScheduler,
    pending: Option<FrameRequestId>,
    resize: ResizeWatcher,
    mounted: bool,
}

impl Visualizer {
    /// Size the surface to `area`, start watching its layout and run the
    /// first frame immediately.
    pub fn mount(settings: &VisualizerSettings, area: Rect, now: Instant) -> Self {
        let mut viz = Self {
            source: None,
            bins: Vec::new(),
            surface: Surface::new(HALF_BLOCK),
            scheduler: FrameScheduler::new(settings.fps),
            pending: None,
            resize: ResizeWatcher::new(),
            mounted: true,
        };
        viz.observe_layout(area);
        viz.frame(now);
        debug!(fps = settings.fps, "visualizer mounted");
        viz
    }

    /// Attach the spectrum source. The snapshot buffer is sized once here
    /// and reused by every frame.
    pub fn attach(&mut self, source: impl FrequencySource + 'static) {
        let bins = source.frequency_bin_count();
        self.bins = vec![0; bins];
        self.source = Some(Box::new(source));
        debug!(bins, "visualizer source attached");
    }

    #[cfg(test)]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Report the current layout rectangle. Resizes the surface when the
    /// size changed; returns whether it did.
    pub fn observe_layout(&mut self, area: Rect) -> bool {
        if !self.resize.observe(area) {
            return false;
        }
        self.surface.resize_to_layout(area.width, area.height);
        trace!(
            width = self.surface.width(),
            height = self.surface.height(),
            "visualizer resized"
        );
        true
    }

    /// Run the pending frame if it is due.
    pub fn tick(&mut self, now: Instant) -> Option<FrameOutcome> {
        let due = self.scheduler.take_due(now)?;
        if self.pending != Some(due) {
            return None;
        }
        self.pending = None;
        Some(self.frame(now))
    }

    pub fn time_until_next_frame(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_next(now)
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[cfg(test)]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[cfg(test)]
    pub fn is_frame_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[cfg(test)]
    pub fn is_watching_layout(&self) -> bool {
        self.resize.is_connected()
    }

    /// Cancel the pending frame and stop watching the layout.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
        self.resize.disconnect();
        self.mounted = false;
        debug!("visualizer unmounted");
    }

    fn frame(&mut self, now: Instant) -> FrameOutcome {
        self.pending = Some(self.scheduler.request(now));

        let Some(source) = self.source.as_ref() else {
            self.surface.clear();
            return FrameOutcome::Idle;
        };

        if !source.byte_frequency_data(&mut self.bins) {
            return FrameOutcome::Skipped;
        }

        self.surface.clear();
        paint_bars(&mut self.surface, &self.bins);
        FrameOutcome::Painted
    }
}

impl Drop for Visualizer {
    fn drop(&mut self) {
        self.unmount();
    }
}
