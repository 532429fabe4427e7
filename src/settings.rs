use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::sim::SimParams;
use crate::trace::MAX_SAMPLES;
use crate::wave::Waveform;

/// Persisted knobs: the simulation parameters plus the trace depth and an
/// optional fixed noise seed for reproducible runs.
#[derive(Clone, Debug, PartialEq)]
pub struct AppSettings {
    pub params: SimParams,
    pub max_samples: usize,
    pub noise_seed: Option<u64>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            params: SimParams::default(),
            max_samples: MAX_SAMPLES,
            noise_seed: None,
        }
    }
}

impl AppSettings {
    /// Best-effort load. A missing file or malformed lines fall back to
    /// defaults so a stale config never prevents startup.
    pub fn load(path: &Path) -> Self {
        let mut settings = AppSettings::default();
        if let Ok(raw) = fs::read_to_string(path) {
            for line in raw.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    apply_kv(key.trim(), value.trim(), &mut settings);
                }
            }
        }
        settings.params = settings.params.clamped();
        settings
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut buf = String::new();
        buf.push_str(&format!("frequency={}\n", self.params.frequency));
        buf.push_str(&format!("amplitude={}\n", self.params.amplitude));
        buf.push_str(&format!("phase={}\n", self.params.phase));
        buf.push_str(&format!("noise={}\n", self.params.noise));
        buf.push_str(&format!("waveform={}\n", self.params.wave.as_key()));
        buf.push_str(&format!("fps={}\n", self.params.fps));
        buf.push_str(&format!("max_samples={}\n", self.max_samples));
        if let Some(seed) = self.noise_seed {
            buf.push_str(&format!("noise_seed={seed}\n"));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, buf)
    }
}

pub fn default_settings_path() -> PathBuf {
    config_dir().join("wavesim.cfg")
}

fn apply_kv(key: &str, value: &str, settings: &mut AppSettings) {
    match key {
        "frequency" => parse_f32(value, &mut settings.params.frequency),
        "amplitude" => parse_f32(value, &mut settings.params.amplitude),
        "phase" => parse_f32(value, &mut settings.params.phase),
        "noise" => parse_f32(value, &mut settings.params.noise),
        "fps" => parse_f32(value, &mut settings.params.fps),
        "waveform" => {
            if let Some(wave) = Waveform::from_key(value) {
                settings.params.wave = wave;
            } else {
                log::warn!("ignoring unknown waveform {value:?}");
            }
        }
        "max_samples" => {
            if let Ok(n) = value.parse::<usize>() {
                if n > 0 {
                    settings.max_samples = n;
                }
            }
        }
        "noise_seed" => settings.noise_seed = value.parse::<u64>().ok(),
        _ => log::warn!("ignoring unknown settings key {key:?}"),
    }
}

fn parse_f32(value: &str, target: &mut f32) {
    if let Ok(v) = value.parse::<f32>() {
        if v.is_finite() {
            *target = v;
        }
    }
}

fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(roaming) = std::env::var("APPDATA") {
            return PathBuf::from(roaming).join("wavesim");
        }
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("wavesim");
    }
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".config")
        .join("wavesim")
}
