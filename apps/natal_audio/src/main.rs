use anyhow::Context;
use aphrodite::Chart;
use audio_synth::{AudioComposition, WavSynthesizer};
use clap::{Parser, ValueEnum};
use harmonia::{
    ConfigurationResolver, FlatGenerator, Genre, MappingTables, MelodicGenerator,
    NarrationGenerator, VariantDurations,
};
use harmonia_config::HarmoniaSettings;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Mode {
    /// One note per planet over `--duration` seconds.
    Flat,
    /// Flat composition at the configured preview length.
    Preview,
    /// Flat composition of a transit chart at the configured daily length.
    Daily,
    /// Flat composition plus one note per aspect.
    Sandbox,
    /// Role-based phrases.
    Melodic,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a natal chart as audio")]
struct Args {
    /// Chart JSON as produced by the chart provider.
    #[arg(long)]
    chart: PathBuf,

    /// Genre key (unknown keys fall back to ambient). Defaults to the configured genre.
    #[arg(long)]
    genre: Option<String>,

    #[arg(long, value_enum, default_value_t = Mode::Flat)]
    mode: Mode,

    /// Length in seconds for flat and melodic modes.
    #[arg(long, default_value_t = 30.0)]
    duration: f64,

    /// BPM for melodic mode. Defaults to the configured tempo.
    #[arg(long)]
    tempo: Option<f64>,

    /// Seed for reproducible melodic output (otherwise random per run).
    #[arg(long)]
    seed: Option<u64>,

    /// Output WAV path.
    #[arg(long, default_value = "target/natal_audio/chart.wav")]
    out: PathBuf,

    /// Also write a narration text file next to the WAV.
    #[arg(long, default_value_t = false)]
    narration: bool,

    /// Write the melodic session as JSON to this path (melodic mode only).
    #[arg(long)]
    session_json: Option<PathBuf>,

    /// Settings file (default: configs/harmonia.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug)]
struct RunSummary {
    wav_path: PathBuf,
    wav_bytes: usize,
    notes: usize,
    narration_path: Option<PathBuf>,
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<HarmoniaSettings> {
    match path {
        Some(path) => harmonia_config::load_settings_from_path(path),
        None => harmonia_config::load_settings(),
    }
}

fn load_tables(settings: &HarmoniaSettings) -> anyhow::Result<MappingTables> {
    match &settings.mappings_path {
        Some(path) => MappingTables::load_from_path(path)
            .with_context(|| format!("Failed to load mapping tables {}", path.display())),
        None => Ok(MappingTables::builtin().clone()),
    }
}

fn write_file(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create out dir {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

fn run(args: &Args) -> anyhow::Result<RunSummary> {
    let settings = load_settings(args.config.as_deref())?;
    let tables = load_tables(&settings)?;

    let chart_text = std::fs::read_to_string(&args.chart)
        .with_context(|| format!("Failed to read chart {}", args.chart.display()))?;
    let chart = Chart::from_json(&chart_text)
        .with_context(|| format!("Failed to parse chart {}", args.chart.display()))?;

    let genre = Genre::parse_or_fallback(args.genre.as_deref().unwrap_or(&settings.default_genre));
    let flat = FlatGenerator::new(&tables)
        .with_sample_rate(settings.sample_rate)
        .with_durations(VariantDurations {
            preview: settings.preview_duration,
            daily: settings.daily_duration,
            sandbox: settings.sandbox_duration,
        });

    let composition: AudioComposition = match args.mode {
        Mode::Flat => flat.generate(&chart, args.duration, genre),
        Mode::Preview => flat.preview(&chart, genre),
        Mode::Daily => flat.daily(&chart, genre),
        Mode::Sandbox => flat.sandbox(&chart, genre),
        Mode::Melodic => {
            let tempo = args.tempo.unwrap_or(settings.default_tempo);
            let generator = MelodicGenerator::new(&tables);
            let session = match args.seed {
                Some(seed) => {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    generator.generate(&chart, genre, tempo, args.duration, &mut rng)
                }
                None => generator.generate(&chart, genre, tempo, args.duration, &mut rand::thread_rng()),
            };
            if let Some(path) = &args.session_json {
                let json = serde_json::to_vec_pretty(&session)?;
                write_file(path, &json)?;
            }
            session.to_composition(&tables, settings.sample_rate)
        }
    };

    let render = WavSynthesizer::new()
        .with_min_bytes(settings.min_wav_bytes)
        .synthesize(&composition)
        .context("Failed to render WAV")?;
    for warning in &render.warnings {
        log::warn!("{:?}", warning);
    }
    write_file(&args.out, &render.bytes)?;

    let narration_path = if args.narration {
        let config = ConfigurationResolver::new(&tables).resolve(&chart, genre);
        let narration = NarrationGenerator::new(&tables.narration).narrate(&chart, &config);
        let path = args.out.with_extension("txt");
        write_file(&path, narration.to_text().as_bytes())?;
        Some(path)
    } else {
        None
    };

    Ok(RunSummary {
        wav_path: args.out.clone(),
        wav_bytes: render.bytes.len(),
        notes: composition.notes.len(),
        narration_path,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let summary = run(&args)?;
    eprintln!(
        "[natal_audio] {:?}: {} notes, {} bytes -> {}",
        args.mode,
        summary.notes,
        summary.wav_bytes,
        summary.wav_path.display()
    );
    if let Some(path) = summary.narration_path {
        eprintln!("[natal_audio] narration -> {}", path.display());
    }
    Ok(())
}
