use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Celestial bodies a chart may carry.
///
/// Declaration order is the canonical enumeration order: classical planets
/// first, then the extended bodies. `Ord` follows it, so a
/// `BTreeMap<Planet, _>` iterates Sun, Moon, Mercury, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
    Lilith,
    NorthNode,
    SouthNode,
    Ceres,
    Pallas,
    Juno,
    Vesta,
}

// (planet, id, display name, accepted aliases)
const PLANET_NAMES: &[(Planet, &str, &str, &[&str])] = &[
    (Planet::Sun, "sun", "Sun", &[]),
    (Planet::Moon, "moon", "Moon", &[]),
    (Planet::Mercury, "mercury", "Mercury", &[]),
    (Planet::Venus, "venus", "Venus", &[]),
    (Planet::Mars, "mars", "Mars", &[]),
    (Planet::Jupiter, "jupiter", "Jupiter", &[]),
    (Planet::Saturn, "saturn", "Saturn", &[]),
    (Planet::Uranus, "uranus", "Uranus", &[]),
    (Planet::Neptune, "neptune", "Neptune", &[]),
    (Planet::Pluto, "pluto", "Pluto", &[]),
    (Planet::Chiron, "chiron", "Chiron", &[]),
    (Planet::Lilith, "lilith", "Lilith", &["black_moon_lilith", "mean_lilith"]),
    (Planet::NorthNode, "north_node", "North Node", &["northnode", "true_node", "mean_node", "rahu"]),
    (Planet::SouthNode, "south_node", "South Node", &["southnode", "ketu"]),
    (Planet::Ceres, "ceres", "Ceres", &[]),
    (Planet::Pallas, "pallas", "Pallas", &["pallas_athena"]),
    (Planet::Juno, "juno", "Juno", &[]),
    (Planet::Vesta, "vesta", "Vesta", &[]),
];

impl Planet {
    pub const ALL: [Planet; 18] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
        Planet::Chiron,
        Planet::Lilith,
        Planet::NorthNode,
        Planet::SouthNode,
        Planet::Ceres,
        Planet::Pallas,
        Planet::Juno,
        Planet::Vesta,
    ];

    fn entry(&self) -> &'static (Planet, &'static str, &'static str, &'static [&'static str]) {
        &PLANET_NAMES[*self as usize]
    }

    /// Snake-case identifier, as used in mapping data and JSON keys.
    pub fn id(&self) -> &'static str {
        self.entry().1
    }

    pub fn display_name(&self) -> &'static str {
        self.entry().2
    }
}

impl FromStr for Planet {
    type Err = String;

    /// Accepts ids, display names and common provider aliases, ignoring case,
    /// spaces and hyphens ("North Node", "north-node", "NorthNode").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        PLANET_NAMES
            .iter()
            .find(|(_, id, _, aliases)| *id == key || aliases.contains(&key.as_str()))
            .map(|(planet, _, _, _)| *planet)
            .ok_or_else(|| format!("Unknown celestial body: {}", s))
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
