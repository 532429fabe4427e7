use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::sim::SimParams;

/// Periodic shapes the generator can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Cosine,
    Square,
    Triangle,
    Sawtooth,
}

impl Waveform {
    pub const ALL: [Waveform; 5] = [
        Waveform::Sine,
        Waveform::Cosine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Sawtooth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Cosine => "Cosine",
            Waveform::Square => "Square",
            Waveform::Triangle => "Triangle",
            Waveform::Sawtooth => "Sawtooth",
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Cosine => "cosine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
        }
    }

    pub fn from_key(value: &str) -> Option<Waveform> {
        match value.to_ascii_lowercase().as_str() {
            "sine" => Some(Waveform::Sine),
            "cosine" => Some(Waveform::Cosine),
            "square" => Some(Waveform::Square),
            "triangle" => Some(Waveform::Triangle),
            "saw" | "sawtooth" => Some(Waveform::Sawtooth),
            _ => None,
        }
    }

    /// Evaluate the unit-amplitude shape at angular argument `theta`, in
    /// radians. One period spans `theta` in `[0, 2pi)`.
    pub fn eval(self, theta: f32) -> f32 {
        match self {
            Waveform::Sine => theta.sin(),
            Waveform::Cosine => theta.cos(),
            Waveform::Square => {
                if theta.sin() >= 0.0 { 1.0 } else { -1.0 }
            }
            Waveform::Triangle => {
                let n = frac(theta / TAU);
                if n < 0.25 {
                    4.0 * n
                } else if n < 0.75 {
                    2.0 - 4.0 * n
                } else {
                    4.0 * n - 4.0
                }
            }
            Waveform::Sawtooth => 2.0 * frac(theta / TAU) - 1.0,
        }
    }
}

/// Fractional part wrapped into `[0, 1)`, also for negative arguments.
fn frac(x: f32) -> f32 {
    x.rem_euclid(1.0)
}

/// Produces one sample per call from the current parameters. The noise
/// source is owned and seedable, so noisy runs can be reproduced.
pub struct WaveSampler {
    rng: StdRng,
}

impl WaveSampler {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sample the configured waveform at simulation time `t` seconds.
    ///
    /// Parameters are taken as-is; feeding non-finite values or a
    /// non-positive frequency gives garbage out.
    pub fn sample(&mut self, t: f32, params: &SimParams) -> f32 {
        let theta = TAU * params.frequency * t + params.phase;
        let mut value = params.amplitude * params.wave.eval(theta);
        if params.noise > 0.0 {
            value += params.noise * params.amplitude * self.rng.gen_range(-1.0..=1.0);
        }
        value
    }
}

impl Default for WaveSampler {
    fn default() -> Self {
        Self::new()
    }
}
