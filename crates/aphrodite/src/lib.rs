//! Astrological chart model and the angular relationships between its bodies.
//!
//! Charts arrive from an external provider as JSON; [`chart::Chart::from_json`]
//! is the typed boundary. Everything downstream works with [`chart::Chart`].

pub mod aspects;
pub mod chart;
pub mod western;

pub use aspects::{calculate_aspects, AspectCalculator, AspectRelation, AspectType, Harmonic};
pub use chart::{Chart, ChartError, ChartMetadata, HouseCusp, Planet, PlanetPosition, SignPosition};
pub use western::{Element, Modality, Sign};
