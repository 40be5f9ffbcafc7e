//! Essential dignities for Western astrology.
//!
//! Rulership, detriment, exaltation and fall of a planet in a sign, read from
//! a single table rather than per-planet branches.

use crate::chart::Planet;
use crate::western::signs::Sign;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DignityType {
    Rulership,
    Exaltation,
    Detriment,
    Fall,
    /// No essential dignity or debility in the sign.
    Peregrine,
}

impl DignityType {
    pub fn name(&self) -> &'static str {
        match self {
            DignityType::Rulership => "rulership",
            DignityType::Exaltation => "exaltation",
            DignityType::Detriment => "detriment",
            DignityType::Fall => "fall",
            DignityType::Peregrine => "peregrine",
        }
    }

    /// Signed strength: dignities positive, debilities negative.
    pub fn score(&self) -> i8 {
        match self {
            DignityType::Rulership => 2,
            DignityType::Exaltation => 1,
            DignityType::Peregrine => 0,
            DignityType::Fall => -1,
            DignityType::Detriment => -2,
        }
    }
}

impl fmt::Display for DignityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DignityResult {
    #[serde(rename = "type")]
    pub dignity_type: DignityType,
    pub sign: Sign,
}

struct DignityRow {
    planet: Planet,
    rulership: &'static [Sign],
    detriment: &'static [Sign],
    exaltation: &'static [Sign],
    fall: &'static [Sign],
}

const DIGNITY_TABLE: &[DignityRow] = &[
    DignityRow { planet: Planet::Sun, rulership: &[Sign::Leo], detriment: &[Sign::Aquarius], exaltation: &[Sign::Aries], fall: &[Sign::Libra] },
    DignityRow { planet: Planet::Moon, rulership: &[Sign::Cancer], detriment: &[Sign::Capricorn], exaltation: &[Sign::Taurus], fall: &[Sign::Scorpio] },
    DignityRow { planet: Planet::Mercury, rulership: &[Sign::Gemini, Sign::Virgo], detriment: &[Sign::Sagittarius, Sign::Pisces], exaltation: &[Sign::Virgo], fall: &[Sign::Pisces] },
    DignityRow { planet: Planet::Venus, rulership: &[Sign::Taurus, Sign::Libra], detriment: &[Sign::Aries, Sign::Scorpio], exaltation: &[Sign::Pisces], fall: &[Sign::Virgo] },
    DignityRow { planet: Planet::Mars, rulership: &[Sign::Aries, Sign::Scorpio], detriment: &[Sign::Libra, Sign::Taurus], exaltation: &[Sign::Capricorn], fall: &[Sign::Cancer] },
    DignityRow { planet: Planet::Jupiter, rulership: &[Sign::Sagittarius, Sign::Pisces], detriment: &[Sign::Gemini, Sign::Virgo], exaltation: &[Sign::Cancer], fall: &[Sign::Capricorn] },
    DignityRow { planet: Planet::Saturn, rulership: &[Sign::Capricorn, Sign::Aquarius], detriment: &[Sign::Cancer, Sign::Leo], exaltation: &[Sign::Libra], fall: &[Sign::Aries] },
    DignityRow { planet: Planet::Uranus, rulership: &[Sign::Aquarius], detriment: &[Sign::Leo], exaltation: &[], fall: &[] },
    DignityRow { planet: Planet::Neptune, rulership: &[Sign::Pisces], detriment: &[Sign::Virgo], exaltation: &[], fall: &[] },
    DignityRow { planet: Planet::Pluto, rulership: &[Sign::Scorpio], detriment: &[Sign::Taurus], exaltation: &[Sign::Aries], fall: &[Sign::Libra] },
];

pub struct DignitiesService;

impl DignitiesService {
    /// All dignities and debilities a planet holds in a sign.
    ///
    /// Mercury in Virgo is both in rulership and exalted, so more than one
    /// entry can come back. Bodies outside the table get an empty list.
    pub fn get_dignities(&self, planet: Planet, sign: Sign) -> Vec<DignityResult> {
        let Some(row) = DIGNITY_TABLE.iter().find(|row| row.planet == planet) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        for (kind, signs) in [
            (DignityType::Rulership, row.rulership),
            (DignityType::Exaltation, row.exaltation),
            (DignityType::Detriment, row.detriment),
            (DignityType::Fall, row.fall),
        ] {
            if signs.contains(&sign) {
                result.push(DignityResult { dignity_type: kind, sign });
            }
        }
        result
    }

    /// The single most significant dignity, `Peregrine` when there is none.
    pub fn primary_dignity(&self, planet: Planet, sign: Sign) -> DignityType {
        self.get_dignities(planet, sign)
            .into_iter()
            .map(|d| d.dignity_type)
            .max_by_key(|d| d.score().abs())
            .unwrap_or(DignityType::Peregrine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_dignities_sun() {
        let service = DignitiesService;
        let dignities = service.get_dignities(Planet::Sun, Sign::Leo);
        assert!(dignities.iter().any(|d| d.dignity_type == DignityType::Rulership));
    }

    #[test]
    fn test_get_dignities_moon() {
        let service = DignitiesService;
        let dignities = service.get_dignities(Planet::Moon, Sign::Scorpio);
        assert!(dignities.iter().any(|d| d.dignity_type == DignityType::Fall));
    }

    #[test]
    fn test_mercury_in_virgo_holds_two_dignities() {
        let service = DignitiesService;
        let dignities = service.get_dignities(Planet::Mercury, Sign::Virgo);
        assert_eq!(dignities.len(), 2);
        assert_eq!(service.primary_dignity(Planet::Mercury, Sign::Virgo), DignityType::Rulership);
    }

    #[test]
    fn test_unlisted_body_is_peregrine() {
        let service = DignitiesService;
        assert!(service.get_dignities(Planet::Chiron, Sign::Leo).is_empty());
        assert_eq!(service.primary_dignity(Planet::Chiron, Sign::Leo), DignityType::Peregrine);
        assert_eq!(service.primary_dignity(Planet::Venus, Sign::Gemini), DignityType::Peregrine);
    }
}
