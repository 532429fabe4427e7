use crate::trace::{MAX_SAMPLES, TraceBuffer};
use crate::wave::{WaveSampler, Waveform};

// Slider ranges exposed to front-ends. The core never enforces them;
// `SimParams::clamped` applies them to untrusted input.
pub const MIN_FREQUENCY: f32 = 0.1;
pub const MAX_FREQUENCY: f32 = 100.0;
pub const MIN_AMPLITUDE: f32 = 0.1;
pub const MAX_AMPLITUDE: f32 = 10.0;
pub const MAX_NOISE: f32 = 1.0;
pub const MIN_FPS: f32 = 5.0;
pub const MAX_FPS: f32 = 240.0;

/// Generation parameters, edited between ticks through `params_mut`.
#[derive(Clone, Debug, PartialEq)]
pub struct SimParams {
    /// Oscillation frequency in Hz.
    pub frequency: f32,
    pub amplitude: f32,
    /// Phase offset in radians.
    pub phase: f32,
    /// Additive noise level relative to the amplitude. 0 disables it.
    pub noise: f32,
    pub wave: Waveform,
    /// Logical tick rate. One tick advances time by `1 / fps` seconds,
    /// independent of how fast the host actually renders.
    pub fps: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            amplitude: 1.0,
            phase: 0.0,
            noise: 0.0,
            wave: Waveform::Sine,
            fps: 60.0,
        }
    }
}

impl SimParams {
    /// Clamp every field to the published slider ranges.
    pub fn clamped(mut self) -> Self {
        self.frequency = self.frequency.clamp(MIN_FREQUENCY, MAX_FREQUENCY);
        self.amplitude = self.amplitude.clamp(MIN_AMPLITUDE, MAX_AMPLITUDE);
        self.noise = self.noise.clamp(0.0, MAX_NOISE);
        self.fps = self.fps.clamp(MIN_FPS, MAX_FPS);
        self
    }

    pub fn tick_len(&self) -> f32 {
        1.0 / self.fps
    }
}

/// Owns the parameters, the simulation clock and the rolling trace.
///
/// One actor drives `advance`/`tick` and reads `samples` in between;
/// there is no concurrent access.
pub struct Simulation {
    params: SimParams,
    time: f32,
    paused: bool,
    sampler: WaveSampler,
    trace: TraceBuffer,
}

impl Simulation {
    pub fn new(params: SimParams) -> Self {
        Self::with_sampler(params, WaveSampler::new(), MAX_SAMPLES)
    }

    /// Fixed noise seed, for reproducible runs.
    pub fn with_seed(params: SimParams, seed: u64) -> Self {
        Self::with_sampler(params, WaveSampler::with_seed(seed), MAX_SAMPLES)
    }

    pub fn with_sampler(params: SimParams, sampler: WaveSampler, capacity: usize) -> Self {
        Self {
            params,
            time: 0.0,
            paused: false,
            sampler,
            trace: TraceBuffer::with_capacity(capacity),
        }
    }

    /// Advance the clock by `dt` seconds and record one sample at the new
    /// time. `dt` is a logical step, never wall-clock elapsed time.
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
        let sample = self.sampler.sample(self.time, &self.params);
        self.trace.push(sample);
    }

    /// One fixed step of `1 / fps`. Does nothing while paused.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.advance(self.params.tick_len());
    }

    pub fn samples(&self) -> Vec<f32> {
        self.trace.snapshot()
    }

    pub fn trace(&self) -> &TraceBuffer {
        &self.trace
    }

    /// Drop the history and rewind the clock to zero. Never called
    /// implicitly: editing parameters mid-run keeps the old samples, so
    /// the trace can splice regimes together.
    pub fn reset(&mut self) {
        self.trace.clear();
        self.time = 0.0;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SimParams {
        &mut self.params
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_length_tracks_tick_count() {
        let mut sim = Simulation::with_seed(SimParams::default(), 0);
        for i in 0..600 {
            sim.tick();
            assert_eq!(sim.trace().len(), (i + 1).min(MAX_SAMPLES));
        }
    }

    #[test]
    fn oldest_samples_are_evicted_first() {
        let params = SimParams::default();
        let mut sim = Simulation::with_seed(params.clone(), 0);
        let mut unbounded = Simulation::with_sampler(params, WaveSampler::with_seed(0), 1000);
        for _ in 0..600 {
            sim.tick();
            unbounded.tick();
        }
        let bounded = sim.samples();
        let full = unbounded.samples();
        assert_eq!(bounded.len(), MAX_SAMPLES);
        // the first 100 generated samples were dropped
        assert_eq!(bounded[0], full[100]);
        assert_eq!(bounded, full[100..]);
    }

    #[test]
    fn noiseless_runs_are_bit_identical() {
        let mut a = Simulation::new(SimParams::default());
        let mut b = Simulation::new(SimParams::default());
        for _ in 0..250 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn seeded_noisy_runs_are_bit_identical() {
        let params = SimParams {
            noise: 0.3,
            ..SimParams::default()
        };
        let mut a = Simulation::with_seed(params.clone(), 11);
        let mut b = Simulation::with_seed(params, 11);
        for _ in 0..250 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn first_tick_samples_an_eighth_period() {
        let params = SimParams {
            fps: 8.0,
            ..SimParams::default()
        };
        let mut sim = Simulation::with_seed(params, 0);
        sim.tick();
        // t = 0.125, sin(pi / 4)
        let v = sim.samples()[0];
        assert!((v - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn tick_advances_by_the_logical_step() {
        let params = SimParams {
            fps: 4.0,
            ..SimParams::default()
        };
        let mut sim = Simulation::with_seed(params, 0);
        for _ in 0..8 {
            sim.tick();
        }
        assert!((sim.time() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn reset_clears_history_and_rewinds_time() {
        let mut sim = Simulation::with_seed(SimParams::default(), 0);
        for _ in 0..20 {
            sim.tick();
        }
        sim.reset();
        assert!(sim.trace().is_empty());
        assert_eq!(sim.time(), 0.0);

        // a run after reset matches a fresh one
        let mut fresh = Simulation::with_seed(SimParams::default(), 0);
        for _ in 0..20 {
            sim.tick();
            fresh.tick();
        }
        assert_eq!(sim.samples(), fresh.samples());
    }

    #[test]
    fn paused_tick_is_a_no_op() {
        let mut sim = Simulation::with_seed(SimParams::default(), 0);
        sim.tick();
        sim.toggle_pause();
        assert!(sim.is_paused());
        let before = sim.samples();
        let time = sim.time();
        sim.tick();
        sim.tick();
        assert_eq!(sim.samples(), before);
        assert_eq!(sim.time(), time);
        sim.set_paused(false);
        sim.tick();
        assert_eq!(sim.trace().len(), 2);
    }

    #[test]
    fn parameter_edits_keep_existing_history() {
        let mut sim = Simulation::with_seed(SimParams::default(), 0);
        for _ in 0..10 {
            sim.tick();
        }
        let old = sim.samples();
        sim.params_mut().wave = Waveform::Square;
        sim.params_mut().frequency = 3.0;
        for _ in 0..10 {
            sim.tick();
        }
        let mixed = sim.samples();
        assert_eq!(mixed.len(), 20);
        assert_eq!(&mixed[..10], &old[..]);
    }

    #[test]
    fn clamped_pulls_fields_into_range() {
        let params = SimParams {
            frequency: 1000.0,
            amplitude: 0.0,
            noise: 7.0,
            fps: 1.0,
            ..SimParams::default()
        }
        .clamped();
        assert_eq!(params.frequency, MAX_FREQUENCY);
        assert_eq!(params.amplitude, MIN_AMPLITUDE);
        assert_eq!(params.noise, MAX_NOISE);
        assert_eq!(params.fps, MIN_FPS);
    }
}
