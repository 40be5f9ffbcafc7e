//! Mixing of note lists into a mono float buffer.

use crate::composition::AudioNote;

/// Peak level after normalisation, leaving headroom below full scale.
pub const HEADROOM: f32 = 0.8;

/// Longest buffer the synthesizer will allocate.
pub const MAX_RENDER_SECONDS: f64 = 3600.0;

/// Number of samples covering `duration` seconds (0 for negative or non-finite input).
pub fn sample_count(duration: f64, sample_rate: u32) -> usize {
    if !duration.is_finite() || duration <= 0.0 {
        return 0;
    }
    (duration * sample_rate as f64) as usize
}

/// Additively mix every note into a zeroed buffer of `total_duration` seconds.
///
/// Each note contributes `duration * sample_rate` oscillator samples scaled by
/// its volume, starting at `start_time * sample_rate`. Samples falling outside
/// the buffer are dropped.
pub fn mix_notes(notes: &[AudioNote], sample_rate: u32, total_duration: f64) -> Vec<f32> {
    let len = sample_count(total_duration, sample_rate);
    let mut buffer = vec![0.0f32; len];
    if len == 0 {
        return buffer;
    }

    let sr = sample_rate as f64;
    for note in notes {
        if !(note.frequency.is_finite() && note.volume.is_finite() && note.start_time.is_finite()) {
            log::debug!("Skipping note with non-finite parameters: {:?}", note);
            continue;
        }

        // bound the span in floating point so huge notes clamp instead of wrapping
        let start = (note.start_time * sr).floor();
        let span = sample_count(note.duration, sample_rate) as f64;
        let first = start.max(0.0);
        let last = (start + span).min(len as f64);
        if first >= last {
            continue;
        }

        for idx in first as usize..last as usize {
            let t = (idx as f64 - start) / sr;
            let value = note.instrument.sample(note.frequency, t) * note.volume;
            buffer[idx] += value as f32;
        }
    }

    buffer
}

/// Scale the buffer so its absolute peak equals `target_peak`.
///
/// Returns the peak found before scaling. An all-zero buffer is left alone.
pub fn normalize(buffer: &mut [f32], target_peak: f32) -> f32 {
    let peak = buffer.iter().fold(0.0f32, |max, s| max.max(s.abs()));
    if peak > 0.0 {
        let gain = target_peak / peak;
        for sample in buffer.iter_mut() {
            *sample *= gain;
        }
    }
    peak
}

/// Convert [-1, 1] floats to signed 16-bit PCM.
pub fn quantize(buffer: &[f32]) -> Vec<i16> {
    buffer
        .iter()
        .map(|s| (s * 32767.0).round().clamp(i16::MIN as f32, i16::MAX as f32) as i16)
        .collect()
}
