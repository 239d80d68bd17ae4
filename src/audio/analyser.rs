//! Frequency analysis of the tapped signal.
//!
//! Follows the usual analyser-node recipe: Blackman window over the newest
//! `fft_size` frames, forward FFT, magnitude scaled by `1 / fft_size`,
//! exponential smoothing against the previous reading, then a dB scale
//! mapped linearly onto `0..=255` between `min_db` and `max_db`.

use std::cell::RefCell;
use std::f32::consts::PI;
use std::rc::Rc;
use std::sync::Arc;

use rustfft::{Fft, FftPlanner, num_complex::Complex};

use crate::config::AudioSettings;
use crate::visualizer::FrequencySource;

use super::tap::SampleTap;

pub struct Analyser {
    tap: SampleTap,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    time: Vec<f32>,
    spectrum: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    smoothing: f32,
    min_db: f32,
    max_db: f32,
}

impl Analyser {
    pub fn new(tap: SampleTap, settings: &AudioSettings) -> Self {
        let fft_size = settings.fft_size;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        Self {
            tap,
            fft,
            window: blackman_window(fft_size),
            time: vec![0.0; fft_size],
            spectrum: vec![Complex::new(0.0, 0.0); fft_size],
            smoothed: vec![0.0; fft_size / 2],
            smoothing: settings.smoothing,
            min_db: settings.min_db,
            max_db: settings.max_db,
        }
    }

    pub fn fft_size(&self) -> usize {
        self.time.len()
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.smoothed.len()
    }

    /// Write one byte per bin into `out` (extra bins are ignored, missing ones
    /// left untouched). Returns `false` when the tap could not be read; `out`
    /// is not modified then.
    pub fn byte_frequency_data(&mut self, out: &mut [u8]) -> bool {
        if !self.tap.copy_latest(&mut self.time) {
            return false;
        }
        self.update_magnitudes();
        for (dst, &mag) in out.iter_mut().zip(&self.smoothed) {
            *dst = magnitude_to_byte(mag, self.min_db, self.max_db);
        }
        true
    }

    fn update_magnitudes(&mut self) {
        for ((dst, &x), &w) in self.spectrum.iter_mut().zip(&self.time).zip(&self.window) {
            *dst = Complex::new(x * w, 0.0);
        }
        self.fft.process(&mut self.spectrum);

        let scale = 1.0 / self.time.len() as f32;
        for (prev, bin) in self.smoothed.iter_mut().zip(&self.spectrum) {
            *prev = smooth(*prev, bin.norm() * scale, self.smoothing);
        }
    }
}

/// Blackman window (alpha = 0.16) of length `n`.
pub(crate) fn blackman_window(n: usize) -> Vec<f32> {
    let (a0, a1, a2) = (0.42_f32, 0.5_f32, 0.08_f32);
    (0..n)
        .map(|i| {
            let x = 2.0 * PI * i as f32 / n as f32;
            a0 - a1 * x.cos() + a2 * (2.0 * x).cos()
        })
        .collect()
}

/// Blend a new magnitude into the previous one. Non-finite results reset to 0.
pub(crate) fn smooth(previous: f32, current: f32, tau: f32) -> f32 {
    let v = tau * previous + (1.0 - tau) * current;
    if v.is_finite() { v } else { 0.0 }
}

pub(crate) fn magnitude_to_byte(magnitude: f32, min_db: f32, max_db: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = (255.0 / (max_db - min_db)) * (db - min_db);
    scaled.floor().clamp(0.0, 255.0) as u8
}

/// Shared, read-only view of the session's analyser for the visualizer.
#[derive(Clone)]
pub struct AnalyserHandle(Rc<RefCell<Analyser>>);

impl AnalyserHandle {
    pub(crate) fn new(analyser: Analyser) -> Self {
        Self(Rc::new(RefCell::new(analyser)))
    }
}

impl FrequencySource for AnalyserHandle {
    fn frequency_bin_count(&self) -> usize {
        self.0.borrow().frequency_bin_count()
    }

    fn byte_frequency_data(&self, out: &mut [u8]) -> bool {
        match self.0.try_borrow_mut() {
            Ok(mut analyser) => analyser.byte_frequency_data(out),
            Err(_) => false,
        }
    }
}
