pub mod data;
pub mod parse;
pub mod planet;

pub use data::{Chart, ChartMetadata, HouseCusp, PlanetPosition, SignPosition};
pub use parse::ChartError;
pub use planet::Planet;
