use log::{info, warn};

use wavesim::settings::{AppSettings, default_settings_path};
use wavesim::sim::Simulation;
use wavesim::wave::WaveSampler;

const PLOT_WIDTH: usize = 80;

fn main() {
    env_logger::init();

    let settings_path = default_settings_path();
    let settings = AppSettings::load(&settings_path);

    let sampler = match settings.noise_seed {
        Some(seed) => WaveSampler::with_seed(seed),
        None => WaveSampler::new(),
    };
    let mut sim = Simulation::with_sampler(settings.params.clone(), sampler, settings.max_samples);

    info!(
        "generating a {} wave at {:.2} Hz, {:.0} ticks per second",
        sim.params().wave.label(),
        sim.params().frequency,
        sim.params().fps
    );

    // Two seconds of simulated time in fixed logical steps.
    let ticks = (2.0 * sim.params().fps) as usize;
    for _ in 0..ticks {
        sim.tick();
    }
    print_trace(&sim);

    if let Err(err) = settings.save(&settings_path) {
        warn!(
            "could not save settings to {}: {err}",
            settings_path.display()
        );
    }
}

/// Terminal column plot of the recorded trace, one row per sample.
fn print_trace(sim: &Simulation) {
    let zero = PLOT_WIDTH / 2;
    let span = sim.params().amplitude * (1.0 + sim.params().noise);
    let scale = (zero as f32 - 1.0) / span.max(f32::MIN_POSITIVE);
    for sample in sim.trace().iter() {
        let column = (zero as i64 + (sample * scale) as i64).clamp(0, PLOT_WIDTH as i64 - 1);
        let column = column as usize;
        let mut row = String::new();
        for i in 0..PLOT_WIDTH {
            if i == column {
                row.push('+');
            } else if i == zero {
                row.push('|');
            } else {
                row.push(' ');
            }
        }
        println!("{row}");
    }
}
