use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Oscillator shapes the synthesizer can voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Sawtooth,
    Square,
    Triangle,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Sawtooth,
        Waveform::Square,
        Waveform::Triangle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
        }
    }

    /// Parse an instrument name, falling back to sine for anything unknown.
    pub fn from_name_or_sine(name: &str) -> Waveform {
        name.parse().unwrap_or_else(|_| {
            log::debug!("Unknown waveform '{}', using sine", name);
            Waveform::Sine
        })
    }

    /// Oscillator value in [-1, 1] for `frequency` Hz at `t` seconds.
    pub fn sample(&self, frequency: f64, t: f64) -> f64 {
        let cycles = frequency * t;
        let phase = cycles - cycles.floor();
        match self {
            Waveform::Sine => (2.0 * PI * cycles).sin(),
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => (2.0 * phase - 1.0).abs() * 2.0 - 1.0,
        }
    }
}

impl FromStr for Waveform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sine" => Ok(Waveform::Sine),
            "sawtooth" | "saw" => Ok(Waveform::Sawtooth),
            "square" => Ok(Waveform::Square),
            "triangle" => Ok(Waveform::Triangle),
            other => Err(format!("Unknown waveform: {}", other)),
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_sine_quarter_period() {
        // 1 Hz at 0.25 s is the crest
        assert!((Waveform::Sine.sample(1.0, 0.25) - 1.0).abs() < EPS);
        assert!(Waveform::Sine.sample(1.0, 0.0).abs() < EPS);
    }

    #[test]
    fn test_sawtooth_ramp() {
        assert!((Waveform::Sawtooth.sample(1.0, 0.0) + 1.0).abs() < EPS);
        assert!(Waveform::Sawtooth.sample(1.0, 0.5).abs() < EPS);
        assert!((Waveform::Sawtooth.sample(1.0, 0.75) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_square_halves() {
        assert_eq!(Waveform::Square.sample(1.0, 0.25), 1.0);
        assert_eq!(Waveform::Square.sample(1.0, 0.75), -1.0);
    }

    #[test]
    fn test_triangle_shape() {
        assert!((Waveform::Triangle.sample(1.0, 0.0) - 1.0).abs() < EPS);
        assert!((Waveform::Triangle.sample(1.0, 0.5) + 1.0).abs() < EPS);
        assert!(Waveform::Triangle.sample(1.0, 0.25).abs() < EPS);
    }

    #[test]
    fn test_unknown_name_falls_back_to_sine() {
        assert_eq!(Waveform::from_name_or_sine("theremin"), Waveform::Sine);
        assert_eq!(Waveform::from_name_or_sine("Square"), Waveform::Square);
    }
}
