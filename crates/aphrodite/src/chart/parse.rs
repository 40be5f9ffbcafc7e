//! Boundary between provider JSON and the typed chart.
//!
//! Providers send planets as a loosely keyed object. Unknown bodies are dropped
//! (there is nothing downstream that could voice them); malformed placements
//! of known bodies are rejected.

use crate::chart::data::{Chart, ChartMetadata, HouseCusp, PlanetPosition, SignPosition};
use crate::chart::planet::Planet;
use crate::western::signs::{Element, Modality, Sign};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur when reading a provider chart
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid chart JSON: {0}")]
    InvalidJson(String),
    #[error("Unknown sign '{sign}' for {planet}")]
    UnknownSign { planet: String, sign: String },
    #[error("House {house} for {planet} is outside 1..=12")]
    InvalidHouse { planet: String, house: i64 },
    #[error("Degree {degree} for {planet} is outside [0, 30)")]
    InvalidDegree { planet: String, degree: f64 },
    #[error("Invalid house key '{0}'")]
    InvalidHouseKey(String),
    #[error("Invalid cusp longitude {longitude} for house {house}")]
    InvalidCusp { house: u8, longitude: f64 },
    #[error("Keys '{first}' and '{second}' both name {planet}")]
    DuplicatePlanet {
        planet: Planet,
        first: String,
        second: String,
    },
    #[error("House {0} is given more than once")]
    DuplicateHouse(u8),
}

#[derive(Debug, Deserialize)]
struct RawChart {
    #[serde(default)]
    metadata: Option<ChartMetadata>,
    #[serde(default)]
    planets: HashMap<String, RawPlanet>,
    #[serde(default)]
    houses: HashMap<String, RawHouse>,
}

#[derive(Debug, Deserialize)]
struct RawPlanet {
    #[serde(default)]
    longitude: Option<f64>,
    sign: RawSign,
    house: i64,
    #[serde(default)]
    retrograde: bool,
}

#[derive(Debug, Deserialize)]
struct RawSign {
    name: String,
    #[serde(default)]
    element: Option<String>,
    #[serde(default)]
    modality: Option<String>,
    degree: f64,
}

#[derive(Debug, Deserialize)]
struct RawHouse {
    #[serde(alias = "cusp", alias = "degree")]
    longitude: f64,
    #[serde(default)]
    sign: Option<String>,
}

impl Chart {
    /// Parse a provider chart document.
    pub fn from_json(json: &str) -> Result<Chart, ChartError> {
        let raw: RawChart =
            serde_json::from_str(json).map_err(|e| ChartError::InvalidJson(e.to_string()))?;

        let mut chart = Chart::new(raw.metadata.unwrap_or_default());

        let mut keys: HashMap<Planet, String> = HashMap::new();
        for (key, body) in raw.planets {
            let planet = match key.parse::<Planet>() {
                Ok(planet) => planet,
                Err(_) => {
                    log::debug!("Dropping unknown chart body '{}'", key);
                    continue;
                }
            };
            if let Some(other) = keys.get(&planet) {
                let (first, second) = if *other <= key {
                    (other.clone(), key)
                } else {
                    (key, other.clone())
                };
                return Err(ChartError::DuplicatePlanet {
                    planet,
                    first,
                    second,
                });
            }
            let position = convert_planet(&key, body)?;
            chart.planets.insert(planet, position);
            keys.insert(planet, key);
        }

        for (key, house) in raw.houses {
            let number: u8 = key
                .trim()
                .parse()
                .ok()
                .filter(|n| (1..=12).contains(n))
                .ok_or_else(|| ChartError::InvalidHouseKey(key.clone()))?;
            if !house.longitude.is_finite() {
                return Err(ChartError::InvalidCusp { house: number, longitude: house.longitude });
            }
            if chart.houses.contains_key(&number) {
                return Err(ChartError::DuplicateHouse(number));
            }
            let mut cusp = HouseCusp::new(house.longitude);
            if let Some(sign) = house.sign.as_deref().and_then(|s| s.parse::<Sign>().ok()) {
                cusp.sign = sign;
            }
            chart.houses.insert(number, cusp);
        }

        Ok(chart)
    }
}

fn convert_planet(key: &str, body: RawPlanet) -> Result<PlanetPosition, ChartError> {
    let sign: Sign = body.sign.name.parse().map_err(|_| ChartError::UnknownSign {
        planet: key.to_string(),
        sign: body.sign.name.clone(),
    })?;

    if !(1..=12).contains(&body.house) {
        return Err(ChartError::InvalidHouse {
            planet: key.to_string(),
            house: body.house,
        });
    }

    let degree = body.sign.degree;
    if !degree.is_finite() || !(0.0..30.0).contains(&degree) {
        return Err(ChartError::InvalidDegree {
            planet: key.to_string(),
            degree,
        });
    }

    // Provider-supplied classification wins; fall back to the sign's own.
    let element = body
        .sign
        .element
        .as_deref()
        .and_then(|e| e.parse::<Element>().ok())
        .unwrap_or_else(|| sign.element());
    let modality = body
        .sign
        .modality
        .as_deref()
        .and_then(|m| m.parse::<Modality>().ok())
        .unwrap_or_else(|| sign.modality());

    let longitude = body
        .longitude
        .filter(|lon| lon.is_finite())
        .unwrap_or_else(|| sign.start_longitude() + degree);

    Ok(PlanetPosition {
        longitude,
        sign: SignPosition {
            name: sign,
            element,
            modality,
            degree,
        },
        house: body.house as u8,
        retrograde: body.retrograde,
    })
}
