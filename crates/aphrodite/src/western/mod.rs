pub mod dignities;
pub mod rulers;
pub mod signs;

pub use dignities::{DignitiesService, DignityResult, DignityType};
pub use rulers::{get_sign_ruler, get_sign_ruler_from_longitude, signs_ruled_by};
pub use signs::{Element, Modality, Sign};
