use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct HarmoniaSettings {
    pub sample_rate: u32,
    /// Genre key; unknown keys fall back to ambient at generation time
    pub default_genre: String,
    /// BPM
    pub default_tempo: f64,
    pub preview_duration: f64,
    pub daily_duration: f64,
    pub sandbox_duration: f64,
    /// Rendered WAVs smaller than this are reported
    pub min_wav_bytes: usize,
    /// Replacement for the built-in mapping tables
    pub mappings_path: Option<PathBuf>,
}

impl Default for HarmoniaSettings {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            default_genre: default_genre(),
            default_tempo: default_tempo(),
            preview_duration: default_preview_duration(),
            daily_duration: default_daily_duration(),
            sandbox_duration: default_sandbox_duration(),
            min_wav_bytes: default_min_wav_bytes(),
            mappings_path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AudioToml {
    #[serde(default = "default_sample_rate")]
    sample_rate: u32,
    #[serde(default = "default_min_wav_bytes")]
    min_wav_bytes: usize,
}

impl Default for AudioToml {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            min_wav_bytes: default_min_wav_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct GenerationToml {
    #[serde(default = "default_genre")]
    default_genre: String,
    #[serde(default = "default_tempo")]
    default_tempo: f64,
    #[serde(default = "default_preview_duration")]
    preview_duration: f64,
    #[serde(default = "default_daily_duration")]
    daily_duration: f64,
    #[serde(default = "default_sandbox_duration")]
    sandbox_duration: f64,
    #[serde(default)]
    mappings_path: Option<PathBuf>,
}

impl Default for GenerationToml {
    fn default() -> Self {
        Self {
            default_genre: default_genre(),
            default_tempo: default_tempo(),
            preview_duration: default_preview_duration(),
            daily_duration: default_daily_duration(),
            sandbox_duration: default_sandbox_duration(),
            mappings_path: None,
        }
    }
}

fn default_sample_rate() -> u32 {
    44_100
}

fn default_min_wav_bytes() -> usize {
    1024
}

fn default_genre() -> String {
    "ambient".to_string()
}

fn default_tempo() -> f64 {
    120.0
}

fn default_preview_duration() -> f64 {
    15.0
}

fn default_daily_duration() -> f64 {
    30.0
}

fn default_sandbox_duration() -> f64 {
    45.0
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    audio: AudioToml,
    #[serde(default)]
    generation: GenerationToml,
}

/// Try common relative paths for `configs/harmonia.toml`; `None` when absent.
pub fn read_config_toml_text() -> Option<String> {
    let paths = ["configs/harmonia.toml", "../../configs/harmonia.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            log::debug!("Loaded settings from {}", p);
            return Some(c);
        }
    }
    None
}

pub fn parse_settings(text: &str) -> anyhow::Result<HarmoniaSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse harmonia settings: {e}"))?;
    let RootConfigToml { audio, generation } = root;
    let settings = HarmoniaSettings {
        sample_rate: audio.sample_rate,
        default_genre: generation.default_genre,
        default_tempo: generation.default_tempo,
        preview_duration: generation.preview_duration,
        daily_duration: generation.daily_duration,
        sandbox_duration: generation.sandbox_duration,
        min_wav_bytes: audio.min_wav_bytes,
        mappings_path: generation.mappings_path,
    };
    validate_settings(&settings)?;
    Ok(settings)
}

pub fn validate_settings(settings: &HarmoniaSettings) -> anyhow::Result<()> {
    if settings.sample_rate == 0 {
        anyhow::bail!("audio.sample_rate must be positive");
    }
    if !(settings.default_tempo.is_finite() && settings.default_tempo > 0.0) {
        anyhow::bail!(
            "generation.default_tempo must be a positive BPM, got {}",
            settings.default_tempo
        );
    }
    for (name, value) in [
        ("preview_duration", settings.preview_duration),
        ("daily_duration", settings.daily_duration),
        ("sandbox_duration", settings.sandbox_duration),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            anyhow::bail!("generation.{name} must be a non-negative number of seconds, got {value}");
        }
    }
    if let Some(path) = &settings.mappings_path {
        if !path.exists() {
            anyhow::bail!("generation.mappings_path does not exist: {}", path.display());
        }
    }
    Ok(())
}

/// Settings from `configs/harmonia.toml`, or defaults when there is none.
pub fn load_settings() -> anyhow::Result<HarmoniaSettings> {
    match read_config_toml_text() {
        Some(text) => parse_settings(&text),
        None => {
            log::debug!("No harmonia.toml found, using default settings");
            Ok(HarmoniaSettings::default())
        }
    }
}

/// Settings from an explicit file, which must exist.
pub fn load_settings_from_path(path: &Path) -> anyhow::Result<HarmoniaSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    parse_settings(&text)
}
