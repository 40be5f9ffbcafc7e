use crate::waveform::Waveform;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// A single timed tone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioNote {
    /// Hz
    pub frequency: f64,
    /// Seconds
    pub duration: f64,
    /// Linear gain before normalisation, [0, 1]
    pub volume: f64,
    pub instrument: Waveform,
    /// Seconds from the start of the composition
    pub start_time: f64,
}

impl AudioNote {
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}

/// Note list ready for synthesis. Built per request and discarded after rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioComposition {
    pub notes: Vec<AudioNote>,
    /// Requested length in seconds
    pub duration: f64,
    /// Rendered length in seconds; notes running past it are cut off
    pub total_duration: f64,
    pub sample_rate: u32,
    pub format: String,
}

impl AudioComposition {
    /// Silent composition of the given length.
    pub fn empty(duration: f64, sample_rate: u32) -> Self {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        Self {
            notes: Vec::new(),
            duration,
            total_duration: duration,
            sample_rate,
            format: "wav".to_string(),
        }
    }

    pub fn new(notes: Vec<AudioNote>, duration: f64, sample_rate: u32) -> Self {
        let mut composition = Self::empty(duration, sample_rate);
        composition.notes = notes;
        composition
    }

    /// Whether any note sounds past `total_duration` and will be truncated.
    pub fn overruns(&self) -> bool {
        self.notes.iter().any(|n| n.end_time() > self.total_duration)
    }

    pub fn is_silent(&self) -> bool {
        self.notes.is_empty()
    }
}
