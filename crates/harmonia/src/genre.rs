use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Musical genres with entries in the mapping tables.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[default]
    Ambient,
    Classical,
    Jazz,
    Electronic,
    Rock,
    Folk,
    World,
    Cinematic,
    Lofi,
    Techno,
    Meditation,
    Experimental,
}

impl Genre {
    pub const ALL: [Genre; 12] = [
        Genre::Ambient,
        Genre::Classical,
        Genre::Jazz,
        Genre::Electronic,
        Genre::Rock,
        Genre::Folk,
        Genre::World,
        Genre::Cinematic,
        Genre::Lofi,
        Genre::Techno,
        Genre::Meditation,
        Genre::Experimental,
    ];

    /// Genre used whenever a key is unknown or a table has no entry.
    pub const FALLBACK: Genre = Genre::Ambient;

    pub fn name(&self) -> &'static str {
        match self {
            Genre::Ambient => "ambient",
            Genre::Classical => "classical",
            Genre::Jazz => "jazz",
            Genre::Electronic => "electronic",
            Genre::Rock => "rock",
            Genre::Folk => "folk",
            Genre::World => "world",
            Genre::Cinematic => "cinematic",
            Genre::Lofi => "lofi",
            Genre::Techno => "techno",
            Genre::Meditation => "meditation",
            Genre::Experimental => "experimental",
        }
    }

    /// Parse a genre key, falling back to ambient for anything unknown.
    pub fn parse_or_fallback(value: &str) -> Genre {
        value.parse().unwrap_or_else(|_| {
            log::debug!("Unknown genre {:?}, using {}", value, Genre::FALLBACK);
            Genre::FALLBACK
        })
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' ', '_'], "");
        Genre::ALL
            .iter()
            .copied()
            .find(|g| g.name() == key)
            .ok_or_else(|| format!("Unknown genre: {}", s))
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_lenient_about_case_and_separators() {
        assert_eq!("Jazz".parse::<Genre>(), Ok(Genre::Jazz));
        assert_eq!("lo-fi".parse::<Genre>(), Ok(Genre::Lofi));
        assert_eq!(" TECHNO ".parse::<Genre>(), Ok(Genre::Techno));
    }

    #[test]
    fn test_unknown_genre_falls_back_to_ambient() {
        assert!("polka".parse::<Genre>().is_err());
        assert_eq!(Genre::parse_or_fallback("polka"), Genre::Ambient);
        assert_eq!(Genre::parse_or_fallback("rock"), Genre::Rock);
    }
}
