//! Bar-chart geometry and painting.

use super::surface::{RectF, Rgba, Surface};

pub const BAR_COUNT: usize = 48;
/// Share of the surface height a full-scale bar may use.
pub const HEADROOM: f32 = 0.9;
/// Silent bars stay this many pixels tall.
pub const MIN_BAR_HEIGHT: f32 = 2.0;
/// Share of each slot covered by its bar.
pub const BAR_FILL: f32 = 0.72;
/// Foreground inset from the top of the backing bar, as a share of its height.
pub const GLOW_INSET: f32 = 0.05;

pub const TRACK_COLOR: Rgba = Rgba::new(148, 163, 184, 64);
pub const GLOW_COLOR: Rgba = Rgba::new(94, 234, 212, 204);
pub const SHADE_TOP: Rgba = Rgba::new(0, 0, 0, 89);
pub const SHADE_BOTTOM: Rgba = Rgba::TRANSPARENT;

/// Bin sampled by `bar`: `floor(bar * total_bins / bar_count)`.
pub fn sample_bin(bar: usize, total_bins: usize, bar_count: usize) -> usize {
    bar * total_bins / bar_count
}

/// Bar height in pixels for a byte magnitude.
pub fn bar_height(magnitude: u8, surface_height: f32) -> f32 {
    let normalized = f32::from(magnitude) / 255.0;
    (normalized * HEADROOM * surface_height).max(MIN_BAR_HEIGHT)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRects {
    /// Faint full-height backing.
    pub track: RectF,
    /// Foreground, inset from the top.
    pub glow: RectF,
}

pub fn bar_rects(bar: usize, magnitude: u8, width: f32, height: f32) -> BarRects {
    let slot = width / BAR_COUNT as f32;
    let h = bar_height(magnitude, height);
    let x = bar as f32 * slot;
    let y = height - h;
    let w = slot * BAR_FILL;

    BarRects {
        track: RectF { x, y, w, h },
        glow: RectF {
            x,
            y: y + h * GLOW_INSET,
            w,
            h: h * (1.0 - GLOW_INSET),
        },
    }
}

/// Paint one frame of bars for `bins` onto an already cleared surface.
pub fn paint_bars(surface: &mut Surface, bins: &[u8]) {
    let width = surface.width() as f32;
    let height = surface.height() as f32;
    if bins.is_empty() || width == 0.0 || height == 0.0 {
        return;
    }

    for bar in 0..BAR_COUNT {
        let magnitude = bins[sample_bin(bar, bins.len(), BAR_COUNT)];
        let rects = bar_rects(bar, magnitude, width, height);
        surface.fill_rect(rects.track, TRACK_COLOR);
        surface.fill_rect(rects.glow, GLOW_COLOR);
    }

    surface.fill_vertical_gradient(SHADE_TOP, SHADE_BOTTOM);
}
