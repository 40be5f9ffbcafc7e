//! Simple additive synthesis: note lists in, 16-bit mono WAV bytes out.
//!
//! This is intentionally plain oscillator mixing with a single peak
//! normalisation pass, not studio DSP.

pub mod composition;
pub mod render;
pub mod waveform;
pub mod wav;

pub use composition::{AudioComposition, AudioNote, DEFAULT_SAMPLE_RATE};
pub use render::{mix_notes, normalize, quantize, HEADROOM, MAX_RENDER_SECONDS};
pub use waveform::Waveform;
pub use wav::{
    decode_wav, encode_wav, synthesize_wav, RenderWarning, SynthError, WavRender, WavSynthesizer,
    DEFAULT_MIN_WAV_BYTES, WAV_HEADER_BYTES,
};
