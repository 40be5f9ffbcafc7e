//! Sign rulers for Western astrology.
//!
//! Maps zodiac signs to their planetary rulers (traditional and modern).

use crate::chart::Planet;
use crate::western::signs::Sign;

// Indexed by zodiac order
const TRADITIONAL_RULERS: [Planet; 12] = [
    Planet::Mars,    // Aries
    Planet::Venus,   // Taurus
    Planet::Mercury, // Gemini
    Planet::Moon,    // Cancer
    Planet::Sun,     // Leo
    Planet::Mercury, // Virgo
    Planet::Venus,   // Libra
    Planet::Mars,    // Scorpio (traditional)
    Planet::Jupiter, // Sagittarius
    Planet::Saturn,  // Capricorn
    Planet::Saturn,  // Aquarius (traditional)
    Planet::Jupiter, // Pisces (traditional)
];

const MODERN_RULERS: [Planet; 12] = [
    Planet::Mars,
    Planet::Venus,
    Planet::Mercury,
    Planet::Moon,
    Planet::Sun,
    Planet::Mercury,
    Planet::Venus,
    Planet::Pluto,   // Scorpio (modern)
    Planet::Jupiter,
    Planet::Saturn,
    Planet::Uranus,  // Aquarius (modern)
    Planet::Neptune, // Pisces (modern)
];

/// Get the ruling planet of a sign
pub fn get_sign_ruler(sign: Sign, modern: bool) -> Planet {
    let idx = (sign.index() - 1) as usize;
    if modern {
        MODERN_RULERS[idx]
    } else {
        TRADITIONAL_RULERS[idx]
    }
}

/// Get sign ruler from longitude
pub fn get_sign_ruler_from_longitude(longitude: f64, modern: bool) -> Planet {
    get_sign_ruler(Sign::from_longitude(longitude), modern)
}

/// Signs a planet rules, in zodiac order.
pub fn signs_ruled_by(planet: Planet, modern: bool) -> Vec<Sign> {
    Sign::ALL
        .iter()
        .copied()
        .filter(|sign| get_sign_ruler(*sign, modern) == planet)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_sign_ruler_traditional() {
        assert_eq!(get_sign_ruler(Sign::Aries, false), Planet::Mars);
        assert_eq!(get_sign_ruler(Sign::Cancer, false), Planet::Moon);
        assert_eq!(get_sign_ruler(Sign::Leo, false), Planet::Sun);
        assert_eq!(get_sign_ruler(Sign::Scorpio, false), Planet::Mars);
    }

    #[test]
    fn test_get_sign_ruler_modern() {
        assert_eq!(get_sign_ruler(Sign::Scorpio, true), Planet::Pluto);
        assert_eq!(get_sign_ruler(Sign::Aquarius, true), Planet::Uranus);
        assert_eq!(get_sign_ruler(Sign::Pisces, true), Planet::Neptune);
    }

    #[test]
    fn test_signs_ruled_by() {
        assert_eq!(signs_ruled_by(Planet::Mercury, false), vec![Sign::Gemini, Sign::Virgo]);
        assert_eq!(signs_ruled_by(Planet::Pluto, true), vec![Sign::Scorpio]);
        assert!(signs_ruled_by(Planet::Pluto, false).is_empty());
        assert_eq!(get_sign_ruler_from_longitude(125.0, false), Planet::Sun);
    }
}
