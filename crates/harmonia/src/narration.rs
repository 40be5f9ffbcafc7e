//! Plain-language description of a resolved chart.

use crate::mapping::NarrationTemplates;
use crate::passes::interval_name;
use crate::resolver::MusicalConfiguration;
use aphrodite::western::get_sign_ruler;
use aphrodite::Chart;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashMap;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern");
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Narration {
    pub title: String,
    pub overview: String,
    pub planets: Vec<String>,
    pub aspects: Vec<String>,
}

impl Narration {
    pub fn to_text(&self) -> String {
        let mut text = format!("{}\n\n{}\n", self.title, self.overview);
        if !self.planets.is_empty() {
            text.push('\n');
            for line in &self.planets {
                text.push_str(&format!("- {}\n", line));
            }
        }
        if !self.aspects.is_empty() {
            text.push('\n');
            for line in &self.aspects {
                text.push_str(&format!("- {}\n", line));
            }
        }
        text
    }
}

/// Fill `{name}` placeholders; unknown names are left as written.
pub fn render_template(template: &str, values: &HashMap<&str, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// "1st", "2nd", "11th", ...
pub fn ordinal(n: u8) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub struct NarrationGenerator<'a> {
    templates: &'a NarrationTemplates,
}

impl<'a> NarrationGenerator<'a> {
    pub fn new(templates: &'a NarrationTemplates) -> Self {
        Self { templates }
    }

    pub fn narrate(&self, chart: &Chart, config: &MusicalConfiguration) -> Narration {
        let mut shared: HashMap<&str, String> = HashMap::new();
        shared.insert("genre", config.genre.to_string());
        shared.insert("key", config.key.to_string());
        shared.insert("scale", config.scale.mode.clone());
        shared.insert("element", capitalize(config.dominant_element.name()));
        shared.insert("tempo", format!("{}", config.tempo.round()));
        shared.insert("voices", config.voices.len().to_string());
        shared.insert("aspects", config.aspects.len().to_string());

        let title = capitalize(&render_template(&self.templates.title, &shared));
        let overview = render_template(&self.templates.overview, &shared);

        let mut planets = Vec::new();
        for (planet, position) in chart.planets_by_house() {
            let Some(voice) = config.voice(planet) else {
                continue;
            };
            let mut values = shared.clone();
            values.insert("planet", planet.display_name().to_string());
            values.insert("sign", position.sign.name.to_string());
            values.insert("ruler", get_sign_ruler(position.sign.name, true).display_name().to_string());
            values.insert("house", ordinal(position.house));
            values.insert("dignity", voice.dignity.name().to_string());
            values.insert("instrument", voice.instrument.replace('_', " "));
            let template = match voice.role {
                Some(role) => {
                    values.insert("role", role.name().to_string());
                    &self.templates.planet
                }
                None => &self.templates.unvoiced,
            };
            planets.push(render_template(template, &values));
        }

        let aspects = config
            .aspects
            .iter()
            .map(|aspect| {
                let mut values = shared.clone();
                values.insert("aspect", aspect.aspect_type.name().to_string());
                values.insert("planet", aspect.planet1.display_name().to_string());
                values.insert("other", aspect.planet2.display_name().to_string());
                values.insert("interval", interval_name(aspect.aspect_type).to_string());
                render_template(&self.templates.aspect, &values)
            })
            .collect();

        Narration {
            title,
            overview,
            planets,
            aspects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template_keeps_unknown_placeholders() {
        let mut values = HashMap::new();
        values.insert("planet", "Mars".to_string());
        assert_eq!(
            render_template("{planet} meets {other}", &values),
            "Mars meets {other}"
        );
    }

    #[test]
    fn test_ordinals() {
        let got: Vec<String> = [1, 2, 3, 4, 11, 12].iter().map(|n| ordinal(*n)).collect();
        assert_eq!(got, vec!["1st", "2nd", "3rd", "4th", "11th", "12th"]);
    }
}
