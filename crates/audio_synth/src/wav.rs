use crate::composition::{AudioComposition, AudioNote};
use crate::render::{mix_notes, normalize, quantize, HEADROOM, MAX_RENDER_SECONDS};
use serde::Serialize;
use std::io::Cursor;
use thiserror::Error;

/// Size of the canonical RIFF/WAVE header for 16-bit mono PCM.
pub const WAV_HEADER_BYTES: usize = 44;

/// Rendered buffers smaller than this are reported back to the caller.
pub const DEFAULT_MIN_WAV_BYTES: usize = 1024;

/// Errors that can occur while encoding audio
#[derive(Error, Debug)]
pub enum SynthError {
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(u32),
    #[error("Render length of {0} s exceeds the one hour limit")]
    DurationTooLong(f64),
    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),
}

/// Non-fatal findings about a rendered buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderWarning {
    BufferTooSmall { bytes: usize, threshold: usize },
}

/// A rendered WAV file plus what the caller should know about it.
#[derive(Debug, Clone)]
pub struct WavRender {
    pub bytes: Vec<u8>,
    pub sample_rate: u32,
    pub samples: usize,
    /// Peak amplitude of the mix before normalisation
    pub peak: f32,
    pub warnings: Vec<RenderWarning>,
}

fn wav_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Encode 16-bit mono PCM as a complete WAV file in memory.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, SynthError> {
    if sample_rate == 0 {
        return Err(SynthError::InvalidSampleRate(sample_rate));
    }

    let mut cursor = Cursor::new(Vec::with_capacity(WAV_HEADER_BYTES + samples.len() * 2));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, wav_spec(sample_rate))?;
        for sample in samples {
            writer.write_sample(*sample)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Decode a 16-bit WAV buffer back into its spec and samples.
pub fn decode_wav(bytes: &[u8]) -> Result<(hound::WavSpec, Vec<i16>), SynthError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    let samples = reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;
    Ok((spec, samples))
}

/// Turns compositions into WAV bytes.
#[derive(Debug, Clone)]
pub struct WavSynthesizer {
    min_bytes: usize,
}

impl WavSynthesizer {
    pub fn new() -> Self {
        Self {
            min_bytes: DEFAULT_MIN_WAV_BYTES,
        }
    }

    pub fn with_min_bytes(mut self, min_bytes: usize) -> Self {
        self.min_bytes = min_bytes;
        self
    }

    /// Render a composition over its `total_duration` at its sample rate.
    pub fn synthesize(&self, composition: &AudioComposition) -> Result<WavRender, SynthError> {
        if composition.overruns() {
            log::debug!(
                "Notes past {:.2} s will be truncated",
                composition.total_duration
            );
        }
        self.render_notes(
            &composition.notes,
            composition.sample_rate,
            composition.total_duration,
        )
    }

    /// Mix, normalise to 0.8 peak, quantise, and wrap in a WAV header.
    ///
    /// An empty note list renders as silence of the requested length. Notes
    /// outside `total_duration` are cut at the buffer bounds.
    pub fn render_notes(
        &self,
        notes: &[AudioNote],
        sample_rate: u32,
        total_duration: f64,
    ) -> Result<WavRender, SynthError> {
        if sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate(sample_rate));
        }
        if total_duration > MAX_RENDER_SECONDS {
            return Err(SynthError::DurationTooLong(total_duration));
        }

        let mut buffer = mix_notes(notes, sample_rate, total_duration);
        let peak = normalize(&mut buffer, HEADROOM);
        let pcm = quantize(&buffer);
        let bytes = encode_wav(&pcm, sample_rate)?;

        let mut warnings = Vec::new();
        if bytes.len() < self.min_bytes {
            log::warn!(
                "Rendered WAV is only {} bytes (threshold {})",
                bytes.len(),
                self.min_bytes
            );
            warnings.push(RenderWarning::BufferTooSmall {
                bytes: bytes.len(),
                threshold: self.min_bytes,
            });
        }

        log::debug!(
            "Rendered {} notes into {} samples at {} Hz (peak {:.3})",
            notes.len(),
            pcm.len(),
            sample_rate,
            peak
        );

        Ok(WavRender {
            bytes,
            sample_rate,
            samples: pcm.len(),
            peak,
            warnings,
        })
    }
}

impl Default for WavSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a composition with the default synthesizer settings.
pub fn synthesize_wav(composition: &AudioComposition) -> Result<WavRender, SynthError> {
    WavSynthesizer::new().synthesize(composition)
}
