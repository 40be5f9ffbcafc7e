//! Zodiac signs and their classification axes.
//!
//! Each sign carries an element (Fire, Earth, Air, Water) and a modality
//! (Cardinal, Fixed, Mutable). Signs are numbered 1..=12 starting at Aries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    /// Fixed priority order, also used to break ties when counting elements.
    pub const ALL: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];

    pub fn name(&self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Air => "air",
            Element::Water => "water",
        }
    }
}

impl FromStr for Element {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fire" => Ok(Element::Fire),
            "earth" => Ok(Element::Earth),
            "air" => Ok(Element::Air),
            "water" => Ok(Element::Water),
            other => Err(format!("Unknown element: {}", other)),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

impl Modality {
    pub fn name(&self) -> &'static str {
        match self {
            Modality::Cardinal => "cardinal",
            Modality::Fixed => "fixed",
            Modality::Mutable => "mutable",
        }
    }
}

impl FromStr for Modality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cardinal" => Ok(Modality::Cardinal),
            "fixed" => Ok(Modality::Fixed),
            "mutable" => Ok(Modality::Mutable),
            other => Err(format!("Unknown modality: {}", other)),
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

#[derive(Debug, Clone, Copy)]
pub struct SignMeta {
    pub sign: Sign,
    pub name: &'static str,
    pub element: Element,
    pub modality: Modality,
}

// Zodiac order
const SIGNS: [SignMeta; 12] = [
    SignMeta { sign: Sign::Aries, name: "aries", element: Element::Fire, modality: Modality::Cardinal },
    SignMeta { sign: Sign::Taurus, name: "taurus", element: Element::Earth, modality: Modality::Fixed },
    SignMeta { sign: Sign::Gemini, name: "gemini", element: Element::Air, modality: Modality::Mutable },
    SignMeta { sign: Sign::Cancer, name: "cancer", element: Element::Water, modality: Modality::Cardinal },
    SignMeta { sign: Sign::Leo, name: "leo", element: Element::Fire, modality: Modality::Fixed },
    SignMeta { sign: Sign::Virgo, name: "virgo", element: Element::Earth, modality: Modality::Mutable },
    SignMeta { sign: Sign::Libra, name: "libra", element: Element::Air, modality: Modality::Cardinal },
    SignMeta { sign: Sign::Scorpio, name: "scorpio", element: Element::Water, modality: Modality::Fixed },
    SignMeta { sign: Sign::Sagittarius, name: "sagittarius", element: Element::Fire, modality: Modality::Mutable },
    SignMeta { sign: Sign::Capricorn, name: "capricorn", element: Element::Earth, modality: Modality::Cardinal },
    SignMeta { sign: Sign::Aquarius, name: "aquarius", element: Element::Air, modality: Modality::Fixed },
    SignMeta { sign: Sign::Pisces, name: "pisces", element: Element::Water, modality: Modality::Mutable },
];

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    fn meta(&self) -> &'static SignMeta {
        &SIGNS[*self as usize]
    }

    /// 1-based position in the zodiac (Aries = 1, Pisces = 12).
    pub fn index(&self) -> u8 {
        *self as u8 + 1
    }

    /// Inverse of [`Sign::index`]; `None` outside 1..=12.
    pub fn from_index(index: u8) -> Option<Sign> {
        if (1..=12).contains(&index) {
            Some(Sign::ALL[(index - 1) as usize])
        } else {
            None
        }
    }

    /// Sign containing an ecliptic longitude (normalized to [0, 360)).
    pub fn from_longitude(longitude: f64) -> Sign {
        let lon = ((longitude % 360.0) + 360.0) % 360.0;
        Sign::ALL[((lon / 30.0) as usize) % 12]
    }

    pub fn name(&self) -> &'static str {
        self.meta().name
    }

    pub fn element(&self) -> Element {
        self.meta().element
    }

    pub fn modality(&self) -> Modality {
        self.meta().modality
    }

    /// Longitude at which this sign begins.
    pub fn start_longitude(&self) -> f64 {
        (self.index() as f64 - 1.0) * 30.0
    }
}

impl FromStr for Sign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        SIGNS
            .iter()
            .find(|meta| meta.name == lowered)
            .map(|meta| meta.sign)
            .ok_or_else(|| format!("Unknown sign: {}", s))
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            None => Ok(()),
            Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
        }
    }
}
