use crate::genre::Genre;
use crate::mapping::MappingTables;
use crate::passes::{apply_harmonic_relationships, apply_rhythmic_patterns};
use crate::phrase::PhraseGenerator;
use crate::resolver::ConfigurationResolver;
use crate::session::MelodicAudioSession;
use aphrodite::Chart;
use rand::Rng;

/// Chart + genre to a session of phrases.
pub struct MelodicGenerator<'a> {
    tables: &'a MappingTables,
}

impl<'a> MelodicGenerator<'a> {
    pub fn new(tables: &'a MappingTables) -> Self {
        Self { tables }
    }

    /// Generate a session with the given random source.
    ///
    /// A non-positive or non-finite tempo uses the genre's default tempo.
    /// A zero duration yields a session without phrases.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        chart: &Chart,
        genre: Genre,
        tempo: f64,
        duration: f64,
        rng: &mut R,
    ) -> MelodicAudioSession {
        let config = ConfigurationResolver::new(self.tables).resolve(chart, genre);
        let tempo = if tempo.is_finite() && tempo > 0.0 {
            tempo
        } else {
            config.tempo
        };
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };

        let mut phrases = if duration > 0.0 {
            PhraseGenerator::new(tempo, duration).generate(chart, &config, rng)
        } else {
            Vec::new()
        };
        apply_harmonic_relationships(&mut phrases, &config.aspects);
        apply_rhythmic_patterns(&mut phrases, chart);
        for phrase in phrases.iter_mut() {
            phrase.recompute_duration();
        }

        let session = MelodicAudioSession::new(
            genre,
            phrases,
            config.scale.notes.clone(),
            config.key,
            tempo,
            duration,
        );
        log::info!(
            "Melodic session {}: {} phrases, {} notes, {} {} at {} BPM",
            session.id,
            session.phrases.len(),
            session.note_count(),
            config.key,
            config.scale.mode,
            tempo
        );
        session
    }
}
