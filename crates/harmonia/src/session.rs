use crate::genre::Genre;
use crate::mapping::MappingTables;
use crate::notes::PitchClass;
use crate::phrase::MelodicPhrase;
use audio_synth::{AudioComposition, AudioNote};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub beats: u8,
    pub unit: u8,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self { beats: 4, unit: 4 }
    }
}

/// Output of the melodic generator. Owned by the caller; playback is
/// somebody else's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MelodicAudioSession {
    pub id: Uuid,
    pub genre: Genre,
    pub phrases: Vec<MelodicPhrase>,
    pub scale: Vec<PitchClass>,
    pub key: PitchClass,
    /// BPM
    pub tempo: f64,
    pub time_signature: TimeSignature,
    /// Seconds
    pub duration: f64,
    pub is_playing: bool,
    pub created_at: DateTime<Utc>,
}

impl MelodicAudioSession {
    pub fn new(
        genre: Genre,
        phrases: Vec<MelodicPhrase>,
        scale: Vec<PitchClass>,
        key: PitchClass,
        tempo: f64,
        duration: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            genre,
            phrases,
            scale,
            key,
            tempo,
            time_signature: TimeSignature::default(),
            duration,
            is_playing: false,
            created_at: Utc::now(),
        }
    }

    pub fn note_count(&self) -> usize {
        self.phrases.iter().map(|p| p.notes.len()).sum()
    }

    /// Flatten every phrase into a note list for the synthesizer.
    ///
    /// Notes are placed at phrase start plus timestamp; notes that would start
    /// at or after the session's end are dropped.
    pub fn to_composition(&self, tables: &MappingTables, sample_rate: u32) -> AudioComposition {
        let mut notes = Vec::with_capacity(self.note_count());
        for phrase in &self.phrases {
            for note in &phrase.notes {
                let start_time = phrase.start_time + note.timestamp;
                if start_time >= self.duration {
                    continue;
                }
                notes.push(AudioNote {
                    frequency: note.frequency,
                    duration: note.duration,
                    volume: note.velocity,
                    instrument: tables.timbre_waveform(&note.instrument),
                    start_time,
                });
            }
        }
        notes.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        AudioComposition::new(notes, self.duration, sample_rate)
    }
}

/// Sessions kept by id for callers that track more than one at a time.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, MelodicAudioSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, MelodicAudioSession>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn insert(&self, session: MelodicAudioSession) -> Uuid {
        let id = session.id;
        self.lock().insert(id, session);
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<MelodicAudioSession> {
        self.lock().get(id).cloned()
    }

    /// Returns false when the id is unknown.
    pub fn set_playing(&self, id: &Uuid, playing: bool) -> bool {
        match self.lock().get_mut(id) {
            Some(session) => {
                session.is_playing = playing;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, id: &Uuid) -> Option<MelodicAudioSession> {
        self.lock().remove(id)
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.lock().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MusicalRole;
    use crate::phrase::MelodicNote;
    use aphrodite::Planet;
    use audio_synth::Waveform;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn session(duration: f64) -> MelodicAudioSession {
        let note = |timestamp: f64| MelodicNote {
            frequency: 440.0,
            duration: 1.0,
            velocity: 0.6,
            instrument: "violin".to_string(),
            timestamp,
            effects: BTreeSet::new(),
        };
        let phrase = MelodicPhrase {
            planet: Planet::Sun,
            role: MusicalRole::LeadMelody,
            notes: vec![note(0.0), note(1.0), note(2.0)],
            start_time: 2.0,
            duration: 3.0,
            intensity: 0.9,
            variation: 0.0,
        };
        MelodicAudioSession::new(
            Genre::Classical,
            vec![phrase],
            vec![PitchClass::C],
            PitchClass::C,
            120.0,
            duration,
        )
    }

    #[test]
    fn test_composition_uses_absolute_times_and_timbres() {
        let composition = session(4.0).to_composition(MappingTables::builtin(), 8000);
        // the note at 4.0 s starts at the session end and is dropped
        assert_eq!(composition.notes.len(), 2);
        assert_eq!(composition.notes[0].start_time, 2.0);
        assert_eq!(composition.notes[1].start_time, 3.0);
        assert_eq!(composition.notes[0].volume, 0.6);
        assert_eq!(composition.notes[0].instrument, Waveform::Sawtooth);
        assert_eq!(composition.duration, 4.0);
        assert_eq!(composition.total_duration, 4.0);
    }

    #[test]
    fn test_new_session_defaults() {
        let session = session(10.0);
        assert!(!session.is_playing);
        assert_eq!(session.time_signature, TimeSignature { beats: 4, unit: 4 });
        assert_eq!(session.note_count(), 3);
    }

    #[test]
    fn test_session_json_shape() {
        let json = serde_json::to_value(session(1.0)).unwrap();
        assert_eq!(json["isPlaying"], false);
        assert_eq!(json["timeSignature"]["beats"], 4);
        assert_eq!(json["key"], "C");
        assert_eq!(json["genre"], "classical");
        assert_eq!(json["phrases"][0]["role"], "lead_melody");
    }

    #[test]
    fn test_registry_tracks_sessions_by_id() {
        let registry = SessionRegistry::new();
        let first = registry.insert(session(10.0));
        let second = registry.insert(session(10.0));
        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);

        assert!(registry.set_playing(&first, true));
        assert!(registry.get(&first).unwrap().is_playing);
        assert!(!registry.get(&second).unwrap().is_playing);

        assert!(registry.remove(&first).is_some());
        assert!(!registry.set_playing(&first, true));
        assert_eq!(registry.ids(), vec![second]);
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        let registry = Arc::new(SessionRegistry::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.insert(session(1.0)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 4);
    }
}
