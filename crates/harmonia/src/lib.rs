//! Turns astrological charts into music.
//!
//! Planets become voices through static mapping tables, aspects become
//! intervals, and the chart's dominant element picks the scale. Two
//! generators share those tables: a flat one (one note per planet, used for
//! previews and sandboxes) and a melodic one (role-based phrases). Both end in
//! notes that [`audio_synth`] renders to WAV.

pub mod flat;
pub mod genre;
pub mod mapping;
pub mod melodic;
pub mod narration;
pub mod notes;
pub mod passes;
pub mod phrase;
pub mod resolver;
pub mod selection;
pub mod session;

pub use aphrodite::calculate_aspects;
pub use audio_synth::synthesize_wav;
pub use flat::{FlatGenerator, VariantDurations};
pub use genre::Genre;
pub use mapping::{MappingError, MappingTables, MusicalRole, PlanetaryMapping};
pub use melodic::MelodicGenerator;
pub use narration::{Narration, NarrationGenerator};
pub use notes::PitchClass;
pub use phrase::{Effect, MelodicNote, MelodicPhrase};
pub use resolver::{ConfigurationResolver, MusicalConfiguration, PlanetVoice};
pub use session::{MelodicAudioSession, SessionRegistry, TimeSignature};

use aphrodite::Chart;
use audio_synth::AudioComposition;
use rand::Rng;

/// Flat composition with the built-in tables at the default sample rate.
pub fn generate_flat_composition(chart: &Chart, duration_seconds: f64, genre: Genre) -> AudioComposition {
    FlatGenerator::new(MappingTables::builtin()).generate(chart, duration_seconds, genre)
}

/// Melodic session with the built-in tables and a thread-local random source.
pub fn generate_melodic_composition(
    chart: &Chart,
    genre: Genre,
    tempo: f64,
    duration_seconds: f64,
) -> MelodicAudioSession {
    generate_melodic_composition_with_rng(chart, genre, tempo, duration_seconds, &mut rand::thread_rng())
}

pub fn generate_melodic_composition_with_rng<R: Rng + ?Sized>(
    chart: &Chart,
    genre: Genre,
    tempo: f64,
    duration_seconds: f64,
    rng: &mut R,
) -> MelodicAudioSession {
    MelodicGenerator::new(MappingTables::builtin()).generate(chart, genre, tempo, duration_seconds, rng)
}

/// Resolve and narrate a chart with the built-in tables.
pub fn narrate_chart(chart: &Chart, genre: Genre) -> Narration {
    let tables = MappingTables::builtin();
    let config = ConfigurationResolver::new(tables).resolve(chart, genre);
    NarrationGenerator::new(&tables.narration).narrate(chart, &config)
}
