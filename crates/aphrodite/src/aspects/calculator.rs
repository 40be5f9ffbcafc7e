use crate::aspects::types::{AspectRelation, AspectType};
use crate::chart::{Chart, Planet, PlanetPosition};

/// Aspect calculator
pub struct AspectCalculator;

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new() -> Self {
        Self
    }

    /// Compute aspects for every unordered planet pair of a chart.
    ///
    /// Pairs are enumerated in declaration order (outer planet first), so the
    /// output order is a pure function of the chart. Each pair yields at most
    /// one relation.
    pub fn calculate_aspects(&self, chart: &Chart) -> Vec<AspectRelation> {
        let planets: Vec<(&Planet, &PlanetPosition)> = chart.planets.iter().collect();

        // Early exit if not enough planets
        if planets.len() < 2 {
            return Vec::new();
        }

        let mut relations = Vec::new();
        for i in 0..planets.len() {
            for j in (i + 1)..planets.len() {
                let (p1, pos1) = planets[i];
                let (p2, pos2) = planets[j];

                if let Some(relation) = self.calculate_aspect(*p1, pos1, *p2, pos2) {
                    relations.push(relation);
                }
            }
        }

        log::debug!(
            "Found {} aspects among {} planets",
            relations.len(),
            planets.len()
        );
        relations
    }

    /// Aspect between two placed planets, if any.
    pub fn calculate_aspect(
        &self,
        planet1: Planet,
        pos1: &PlanetPosition,
        planet2: Planet,
        pos2: &PlanetPosition,
    ) -> Option<AspectRelation> {
        let (aspect_type, angle) =
            self.classify(pos1.absolute_longitude(), pos2.absolute_longitude())?;
        Some(AspectRelation {
            planet1,
            planet2,
            aspect_type,
            angle,
            harmonic: aspect_type.harmonic(),
        })
    }

    /// Classify the raw difference of two longitudes.
    ///
    /// The difference is not folded to [0, 180]; windows above 180 cover the
    /// mirrored side instead. The first matching window wins.
    pub fn classify(&self, lon1: f64, lon2: f64) -> Option<(AspectType, f64)> {
        let angle = (lon1 - lon2).abs();
        AspectType::ALL
            .iter()
            .find(|aspect| aspect.matches(angle))
            .map(|aspect| (*aspect, angle))
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Aspects of a chart with the default calculator.
pub fn calculate_aspects(chart: &Chart) -> Vec<AspectRelation> {
    AspectCalculator::new().calculate_aspects(chart)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_windows_are_inclusive() {
        let calc = AspectCalculator::new();
        assert_eq!(calc.classify(0.0, 8.0).map(|a| a.0), Some(AspectType::Conjunction));
        assert_eq!(calc.classify(0.0, 58.0).map(|a| a.0), Some(AspectType::Sextile));
        assert_eq!(calc.classify(0.0, 95.0).map(|a| a.0), Some(AspectType::Square));
        assert_eq!(calc.classify(242.0, 0.0).map(|a| a.0), Some(AspectType::Trine));
        assert_eq!(calc.classify(188.0, 0.0).map(|a| a.0), Some(AspectType::Opposition));
    }

    #[test]
    fn test_classify_gaps_yield_nothing() {
        let calc = AspectCalculator::new();
        assert!(calc.classify(0.0, 8.5).is_none());
        assert!(calc.classify(0.0, 45.0).is_none());
        assert!(calc.classify(0.0, 150.0).is_none());
        assert!(calc.classify(0.0, 200.0).is_none());
    }

    #[test]
    fn test_wraparound_conjunction() {
        let calc = AspectCalculator::new();
        let (aspect, angle) = calc.classify(355.0, 1.0).unwrap();
        assert_eq!(aspect, AspectType::Conjunction);
        assert_eq!(angle, 354.0);
    }
}
