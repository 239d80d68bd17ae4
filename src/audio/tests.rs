use std::f32::consts::PI;

use rodio::buffer::SamplesBuffer;

use super::analyser::{blackman_window, magnitude_to_byte, smooth};
use super::*;
use crate::config::AudioSettings;
use crate::visualizer::FrequencySource;

fn sine(bin: usize, fft_size: usize, amplitude: f32) -> Vec<f32> {
    (0..fft_size)
        .map(|n| amplitude * (2.0 * PI * bin as f32 * n as f32 / fft_size as f32).sin())
        .collect()
}

fn argmax(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .enumerate()
        .max_by_key(|(_, v)| **v)
        .map(|(i, _)| i)
        .unwrap()
}

#[test]
fn tap_copy_latest_zero_pads_the_front() {
    let tap = SampleTap::new(8);
    tap.push_frames(&[1.0, 2.0, 3.0]);

    let mut out = [9.0; 5];
    assert!(tap.copy_latest(&mut out));
    assert_eq!(out, [0.0, 0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn tap_keeps_only_the_newest_frames() {
    let tap = SampleTap::new(4);
    tap.push_frames(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

    let mut out = [0.0; 4];
    assert!(tap.copy_latest(&mut out));
    assert_eq!(out, [3.0, 4.0, 5.0, 6.0]);

    let mut short = [0.0; 2];
    assert!(tap.copy_latest(&mut short));
    assert_eq!(short, [5.0, 6.0]);

    tap.clear();
    assert!(tap.copy_latest(&mut out));
    assert_eq!(out, [0.0; 4]);
}

#[test]
fn tapped_source_forwards_samples_unchanged_and_downmixes() {
    let tap = SampleTap::new(16);
    let input = SamplesBuffer::new(2, 44_100, vec![0.5, 0.1, -0.4, 0.2, 1.0, 1.0]);
    let tapped = TappedSource::new(input, tap.clone());

    let heard: Vec<f32> = tapped.collect();
    assert_eq!(heard, vec![0.5, 0.1, -0.4, 0.2, 1.0, 1.0]);

    let mut frames = [0.0; 3];
    assert!(tap.copy_latest(&mut frames));
    assert!((frames[0] - 0.3).abs() < 1e-6);
    assert!((frames[1] - -0.1).abs() < 1e-6);
    assert!((frames[2] - 1.0).abs() < 1e-6);
}

#[test]
fn blackman_window_is_zero_at_the_edges_and_one_in_the_middle() {
    let w = blackman_window(1024);
    assert!(w[0].abs() < 1e-6);
    assert!((w[512] - 1.0).abs() < 1e-5);
    assert!((w[100] - w[1024 - 100]).abs() < 1e-5);
}

#[test]
fn smoothing_blends_with_the_previous_reading() {
    assert_eq!(smooth(1.0, 0.0, 0.8), 0.8);
    assert_eq!(smooth(0.0, 1.0, 0.0), 1.0);
    assert_eq!(smooth(f32::NAN, 1.0, 0.5), 0.0);
}

#[test]
fn magnitude_to_byte_maps_db_range_onto_bytes() {
    assert_eq!(magnitude_to_byte(0.0, -100.0, -30.0), 0);
    // -100 dB
    assert_eq!(magnitude_to_byte(1e-5, -100.0, -30.0), 0);
    // 0 dB is above max_db
    assert_eq!(magnitude_to_byte(1.0, -100.0, -30.0), 255);
    // -65 dB sits half way
    let mid = magnitude_to_byte(10f32.powf(-65.0 / 20.0), -100.0, -30.0);
    assert!((126..=128).contains(&mid));
}

#[test]
fn analyser_exposes_half_the_fft_size_as_bins() {
    let settings = AudioSettings::default();
    let analyser = Analyser::new(SampleTap::new(settings.fft_size), &settings);
    assert_eq!(analyser.fft_size(), 1024);
    assert_eq!(analyser.frequency_bin_count(), 512);
}

#[test]
fn analyser_reports_silence_as_zero() {
    let settings = AudioSettings::default();
    let mut analyser = Analyser::new(SampleTap::new(settings.fft_size), &settings);
    let mut bins = vec![7u8; analyser.frequency_bin_count()];
    assert!(analyser.byte_frequency_data(&mut bins));
    assert!(bins.iter().all(|&b| b == 0));
}

#[test]
fn analyser_peaks_at_the_sine_bin() {
    let settings = AudioSettings {
        smoothing: 0.0,
        ..AudioSettings::default()
    };
    let tap = SampleTap::new(settings.fft_size);
    tap.push_frames(&sine(64, settings.fft_size, 0.01));
    let mut analyser = Analyser::new(tap, &settings);

    let mut bins = vec![0u8; analyser.frequency_bin_count()];
    assert!(analyser.byte_frequency_data(&mut bins));
    assert_eq!(argmax(&bins), 64);
    assert!(bins[64] > bins[200]);
}

#[test]
fn analyser_lets_bins_decay_after_the_signal_stops() {
    let settings = AudioSettings::default();
    let tap = SampleTap::new(settings.fft_size);
    tap.push_frames(&sine(32, settings.fft_size, 0.01));
    let mut analyser = Analyser::new(tap.clone(), &settings);
    let mut bins = vec![0u8; analyser.frequency_bin_count()];

    assert!(analyser.byte_frequency_data(&mut bins));
    let loud = bins[32];
    assert!(loud > 0);

    tap.clear();
    assert!(analyser.byte_frequency_data(&mut bins));
    let fading = bins[32];
    assert!(fading > 0, "smoothing keeps the previous reading alive");
    assert!(fading < loud);
}

#[test]
fn graph_creates_one_analyser_per_session() {
    let mut graph = AudioGraph::new(AudioSettings::default());
    assert!(!graph.has_output());

    let a = graph.analyser();
    let b = graph.analyser();
    assert_eq!(a.frequency_bin_count(), 512);

    // Both handles read the same smoothing state: a frame of signal read
    // through `a` is still visible as decay through `b`.
    graph.tap().push_frames(&sine(16, 1024, 0.01));
    let mut bins = vec![0u8; 512];
    assert!(a.byte_frequency_data(&mut bins));
    graph.tap().clear();
    assert!(b.byte_frequency_data(&mut bins));
    assert!(bins[16] > 0);
}
