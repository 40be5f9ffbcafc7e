use aphrodite::aspects::{calculate_aspects, AspectCalculator, AspectType, Harmonic};
use aphrodite::chart::{Chart, Planet, PlanetPosition};
use aphrodite::western::Sign;
use std::collections::HashSet;

fn spread_chart() -> Chart {
    Chart::default()
        .with_planet(Planet::Sun, PlanetPosition::new(Sign::Aries, 0.0, 1))
        .with_planet(Planet::Moon, PlanetPosition::new(Sign::Aries, 5.0, 1))
        .with_planet(Planet::Mercury, PlanetPosition::new(Sign::Gemini, 1.0, 3))
        .with_planet(Planet::Venus, PlanetPosition::new(Sign::Cancer, 2.0, 4))
        .with_planet(Planet::Mars, PlanetPosition::new(Sign::Leo, 0.0, 5))
        .with_planet(Planet::Jupiter, PlanetPosition::new(Sign::Libra, 3.0, 7))
        .with_planet(Planet::Saturn, PlanetPosition::new(Sign::Sagittarius, 29.0, 9))
        .with_planet(Planet::Uranus, PlanetPosition::new(Sign::Aquarius, 14.0, 11))
        .with_planet(Planet::Neptune, PlanetPosition::new(Sign::Pisces, 27.0, 12))
        .with_planet(Planet::Pluto, PlanetPosition::new(Sign::Scorpio, 9.0, 8))
}

#[test]
fn test_sun_moon_opposition() {
    let chart = Chart::default()
        .with_planet(Planet::Sun, PlanetPosition::new(Sign::Aries, 0.0, 1))
        .with_planet(Planet::Moon, PlanetPosition::new(Sign::Libra, 0.0, 7));

    let aspects = calculate_aspects(&chart);

    assert_eq!(aspects.len(), 1);
    let aspect = &aspects[0];
    assert_eq!(aspect.planet1, Planet::Sun);
    assert_eq!(aspect.planet2, Planet::Moon);
    assert_eq!(aspect.aspect_type, AspectType::Opposition);
    assert_eq!(aspect.angle, 180.0);
    assert_eq!(aspect.harmonic, Harmonic::Octave);
    assert_eq!(aspect.harmonic.as_str(), "octave");
}

#[test]
fn test_each_pair_reported_once_and_inside_its_window() {
    let aspects = calculate_aspects(&spread_chart());
    assert!(!aspects.is_empty());

    let mut seen = HashSet::new();
    for aspect in &aspects {
        let key = if aspect.planet1 < aspect.planet2 {
            (aspect.planet1, aspect.planet2)
        } else {
            (aspect.planet2, aspect.planet1)
        };
        assert!(seen.insert(key), "pair {:?} reported twice", key);
        assert!(
            aspect.aspect_type.matches(aspect.angle),
            "{:?} at {} is outside its window",
            aspect.aspect_type,
            aspect.angle
        );
        assert_eq!(aspect.harmonic, aspect.aspect_type.harmonic());
    }
}

#[test]
fn test_calculation_is_deterministic() {
    let chart = spread_chart();
    let first = calculate_aspects(&chart);
    let second = calculate_aspects(&chart);
    assert_eq!(first, second);
}

#[test]
fn test_pairs_follow_declaration_order() {
    let aspects = calculate_aspects(&spread_chart());
    for aspect in &aspects {
        assert!(aspect.planet1 < aspect.planet2);
    }
    let order: Vec<(Planet, Planet)> = aspects.iter().map(|a| (a.planet1, a.planet2)).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
}

#[test]
fn test_first_matching_window_wins() {
    let calculator = AspectCalculator::new();
    // Sun 0 Aries / Moon 5 Aries: conjunction, nothing else
    let chart = spread_chart();
    let sun = chart.planet(Planet::Sun).unwrap();
    let moon = chart.planet(Planet::Moon).unwrap();
    let aspect = calculator
        .calculate_aspect(Planet::Sun, sun, Planet::Moon, moon)
        .unwrap();
    assert_eq!(aspect.aspect_type, AspectType::Conjunction);
    assert_eq!(aspect.angle, 5.0);
}

#[test]
fn test_degenerate_charts_have_no_aspects() {
    assert!(calculate_aspects(&Chart::default()).is_empty());

    let single = Chart::default().with_planet(Planet::Sun, PlanetPosition::new(Sign::Leo, 10.0, 5));
    assert!(calculate_aspects(&single).is_empty());

    // 45 degrees apart: no window
    let none = Chart::default()
        .with_planet(Planet::Sun, PlanetPosition::new(Sign::Aries, 0.0, 1))
        .with_planet(Planet::Venus, PlanetPosition::new(Sign::Taurus, 15.0, 2));
    assert!(calculate_aspects(&none).is_empty());
}

#[test]
fn test_sign_placement_drives_the_angle() {
    // Provider longitude disagrees with the sign placement; the sign wins.
    let mut moon = PlanetPosition::new(Sign::Leo, 0.0, 5);
    moon.longitude = 10.0;
    let chart = Chart::default()
        .with_planet(Planet::Sun, PlanetPosition::new(Sign::Aries, 0.0, 1))
        .with_planet(Planet::Moon, moon);

    let aspects = calculate_aspects(&chart);
    assert_eq!(aspects.len(), 1);
    assert_eq!(aspects[0].aspect_type, AspectType::Trine);
    assert_eq!(aspects[0].angle, 120.0);
}
