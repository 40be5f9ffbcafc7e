pub mod calculator;
pub mod types;

pub use calculator::{calculate_aspects, AspectCalculator};
pub use types::{AspectRelation, AspectType, Harmonic};
