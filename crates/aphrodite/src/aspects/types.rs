use crate::chart::Planet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five major aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectType {
    /// Classification order: the first type whose window matches wins.
    pub const ALL: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Sextile,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Opposition,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AspectType::Conjunction => "conjunction",
            AspectType::Sextile => "sextile",
            AspectType::Square => "square",
            AspectType::Trine => "trine",
            AspectType::Opposition => "opposition",
        }
    }

    /// Inclusive orb windows over the raw longitude difference in [0, 360).
    pub fn orb_windows(&self) -> &'static [(f64, f64)] {
        match self {
            AspectType::Conjunction => &[(0.0, 8.0), (352.0, 360.0)],
            AspectType::Sextile => &[(58.0, 62.0), (298.0, 302.0)],
            AspectType::Square => &[(85.0, 95.0), (265.0, 275.0)],
            AspectType::Trine => &[(118.0, 122.0), (238.0, 242.0)],
            AspectType::Opposition => &[(172.0, 188.0)],
        }
    }

    pub fn matches(&self, angle: f64) -> bool {
        self.orb_windows()
            .iter()
            .any(|(low, high)| angle >= *low && angle <= *high)
    }

    pub fn harmonic(&self) -> Harmonic {
        match self {
            AspectType::Conjunction => Harmonic::Unison,
            AspectType::Sextile => Harmonic::MajorThird,
            AspectType::Square => Harmonic::Tritone,
            AspectType::Trine => Harmonic::PerfectFifth,
            AspectType::Opposition => Harmonic::Octave,
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Interval symbol an aspect sounds as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Harmonic {
    Unison,
    MajorThird,
    Tritone,
    PerfectFifth,
    Octave,
}

impl Harmonic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Harmonic::Unison => "unison",
            Harmonic::MajorThird => "major_third",
            Harmonic::Tritone => "tritone",
            Harmonic::PerfectFifth => "perfect_fifth",
            Harmonic::Octave => "octave",
        }
    }
}

impl fmt::Display for Harmonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An aspect between two planets of one chart. Derived per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectRelation {
    pub planet1: Planet,
    pub planet2: Planet,
    #[serde(rename = "type")]
    pub aspect_type: AspectType,
    /// Raw absolute longitude difference, [0, 360)
    pub angle: f64,
    pub harmonic: Harmonic,
}

impl AspectRelation {
    pub fn involves(&self, planet: Planet) -> bool {
        self.planet1 == planet || self.planet2 == planet
    }
}
