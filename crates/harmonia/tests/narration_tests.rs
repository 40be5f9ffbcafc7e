use aphrodite::{Chart, Planet, PlanetPosition, Sign};
use harmonia::{narrate_chart, ConfigurationResolver, Genre, MappingTables, NarrationGenerator};

fn chart() -> Chart {
    Chart::default()
        .with_planet(Planet::Sun, PlanetPosition::new(Sign::Aries, 0.0, 1))
        .with_planet(Planet::Moon, PlanetPosition::new(Sign::Libra, 0.0, 7))
        .with_planet(Planet::Chiron, PlanetPosition::new(Sign::Leo, 12.0, 3))
}

#[test]
fn test_narration_voices_planets_and_aspects() {
    let narration = narrate_chart(&chart(), Genre::Jazz);

    assert_eq!(narration.title, "Jazz portrait in C Lydian");
    assert!(narration.overview.starts_with("Fire dominates this chart"));
    assert!(narration.overview.contains("110 BPM"));

    // house order: Sun, Chiron, Moon
    assert_eq!(narration.planets.len(), 3);
    assert_eq!(
        narration.planets[0],
        "Sun in Aries (ruled by Mars), 1st house, exaltation: the lead melody on saxophone."
    );
    assert!(narration.planets[1].contains("without a melodic voice"));
    assert!(narration.planets[2].contains("Libra"));
    assert!(narration.planets[2].contains("7th house"));
    assert!(narration.planets[2].contains("counter melody"));

    assert_eq!(
        narration.aspects,
        vec!["The opposition between Sun and Moon is voiced at the octave.".to_string()]
    );
}

#[test]
fn test_custom_templates() {
    let mut tables = MappingTables::builtin().clone();
    tables.narration.title = "{key}-{scale}-{unknown}".to_string();
    let config = ConfigurationResolver::new(&tables).resolve(&chart(), Genre::Ambient);
    let narration = NarrationGenerator::new(&tables.narration).narrate(&chart(), &config);
    assert_eq!(narration.title, "C-Lydian-{unknown}");
}

#[test]
fn test_text_rendering() {
    let text = narrate_chart(&chart(), Genre::Ambient).to_text();
    assert!(text.starts_with("Ambient portrait in C Lydian\n\n"));
    assert_eq!(text.lines().filter(|l| l.starts_with("- ")).count(), 4);
}
