//! RGBA drawing surface.
//!
//! The surface's backing resolution is its layout size in terminal cells
//! multiplied by the pixel density of the glyphs used to present it.

/// Straight (non-premultiplied) RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Colour with a fractional alpha, e.g. `rgba(94, 234, 212, 0.8)`.
    #[cfg(test)]
    pub fn with_alpha(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self::new(r, g, b, unit_to_byte(alpha))
    }

    pub fn alpha(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// Source-over compositing of `self` onto `dst`.
    pub fn over(self, dst: Rgba) -> Rgba {
        let sa = self.alpha();
        let da = dst.alpha();
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let channel = |s: u8, d: u8| {
            let v = (f32::from(s) * sa + f32::from(d) * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgba::new(
            channel(self.r, dst.r),
            channel(self.g, dst.g),
            channel(self.b, dst.b),
            unit_to_byte(out_a),
        )
    }

    /// Linear interpolation between two colours, `t` in `[0, 1]`.
    pub fn lerp(self, to: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Rgba::new(
            mix(self.r, to.r),
            mix(self.g, to.g),
            mix(self.b, to.b),
            mix(self.a, to.a),
        )
    }
}

fn unit_to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Backing pixels per layout cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelDensity {
    pub x: u16,
    pub y: u16,
}

/// Upper-half-block glyphs: one column, two rows of pixels per cell.
pub const HALF_BLOCK: PixelDensity = PixelDensity { x: 1, y: 2 };

/// Axis-aligned rectangle in backing pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: usize,
    height: usize,
    density: PixelDensity,
    pixels: Vec<Rgba>,
}

impl Surface {
    pub fn new(density: PixelDensity) -> Self {
        Self {
            width: 0,
            height: 0,
            density,
            pixels: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn density(&self) -> PixelDensity {
        self.density
    }

    /// Resize the backing store for a layout of `cols` x `rows` cells.
    /// Contents are cleared when the size changes.
    pub fn resize_to_layout(&mut self, cols: u16, rows: u16) {
        let width = usize::from(cols) * usize::from(self.density.x);
        let height = usize::from(rows) * usize::from(self.density.y);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, Rgba::TRANSPARENT);
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Composite `color` over every pixel whose centre lies inside `rect`.
    /// Anything outside the surface is clipped.
    pub fn fill_rect(&mut self, rect: RectF, color: Rgba) {
        if rect.w <= 0.0 || rect.h <= 0.0 || color.a == 0 {
            return;
        }
        let (x0, x1) = covered_span(rect.x, rect.w, self.width);
        let (y0, y1) = covered_span(rect.y, rect.h, self.height);
        for y in y0..y1 {
            let row = &mut self.pixels[y * self.width..(y + 1) * self.width];
            for px in &mut row[x0..x1] {
                *px = color.over(*px);
            }
        }
    }

    /// Composite a full-surface vertical gradient from `top` to `bottom`.
    pub fn fill_vertical_gradient(&mut self, top: Rgba, bottom: Rgba) {
        if self.height == 0 {
            return;
        }
        for y in 0..self.height {
            let t = (y as f32 + 0.5) / self.height as f32;
            let color = top.lerp(bottom, t);
            if color.a == 0 {
                continue;
            }
            let row = &mut self.pixels[y * self.width..(y + 1) * self.width];
            for px in row {
                *px = color.over(*px);
            }
        }
    }
}

/// Pixel indices `[start, end)` whose centres fall in `[pos, pos + len)`.
fn covered_span(pos: f32, len: f32, limit: usize) -> (usize, usize) {
    let start = (pos - 0.5).ceil().max(0.0) as usize;
    let end = (pos + len - 0.5).ceil().max(0.0) as usize;
    (start.min(limit), end.min(limit))
}
