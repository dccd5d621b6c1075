//! User configuration — sequence location, input scaling, inertia tuning.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/scroll-scrub/config.toml` (default
//! `~/.config/scroll-scrub/config.toml`).  Missing or malformed keys fall
//! back to the built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use image::Rgba;

use crate::core::controller::ScrollTuning;
use crate::core::inertia::InertiaTuning;

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding `frame_001.png`, `frame_002.png`, …
    pub frame_dir: PathBuf,
    /// Number of frames in the sequence.
    pub frame_count: usize,
    /// Canvas width cap in pixels (terminal columns).
    pub max_canvas_width: u32,
    /// Progress per wheel notch.
    pub wheel_step: f64,
    /// Progress per pixel of drag.
    pub touch_scale: f64,
    /// Virtual pixels per terminal row when measuring a drag.
    pub drag_px_per_row: f64,
    /// Release speed (px/ms) needed to start inertia.
    pub min_release_velocity: f64,
    /// Inertia stops below this speed.
    pub stop_velocity: f64,
    /// Per-frame velocity multiplier during inertia.
    pub velocity_decay: f64,
    /// Progress per unit of velocity on each inertia frame.
    pub inertia_gain: f64,
    /// Animation frame interval.
    pub frame_interval_ms: u64,
    /// Canvas background behind letterboxed frames.
    pub background: Rgba<u8>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let tuning = ScrollTuning::default();
        Self {
            frame_dir: PathBuf::from("sequence"),
            frame_count: 25,
            max_canvas_width: 800,
            wheel_step: tuning.wheel_step,
            touch_scale: tuning.touch_scale,
            drag_px_per_row: 16.0,
            min_release_velocity: tuning.inertia.min_release_velocity,
            stop_velocity: tuning.inertia.stop_velocity,
            velocity_decay: tuning.inertia.decay,
            inertia_gain: tuning.inertia.gain,
            frame_interval_ms: 16,
            background: Rgba([0xf9, 0xf2, 0xf2, 0xff]),
        }
    }
}

impl AppConfig {
    /// Input and inertia tunables for the controller.
    pub fn scroll_tuning(&self) -> ScrollTuning {
        ScrollTuning {
            wheel_step: self.wheel_step,
            touch_scale: self.touch_scale,
            inertia: InertiaTuning {
                min_release_velocity: self.min_release_velocity,
                stop_velocity: self.stop_velocity,
                decay: self.velocity_decay,
                gain: self.inertia_gain,
            },
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => return Self::parse(&contents),
                Err(e) => tracing::warn!("could not read {}: {e}", path.display()),
            }
        }
        Self::default()
    }

    /// Persist current config to disk, returning the path written.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    pub fn parse(s: &str) -> Self {
        let mut cfg = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            // Ranges keep a hand-edited file from producing a stuck or
            // runaway animation.
            match key {
                "frame_dir" if !value.is_empty() => cfg.frame_dir = PathBuf::from(value),
                "frame_count" => {
                    if let Ok(v) = value.parse::<usize>() {
                        cfg.frame_count = v.clamp(1, 9999);
                    }
                }
                "max_canvas_width" => {
                    if let Ok(v) = value.parse::<u32>() {
                        cfg.max_canvas_width = v.clamp(1, 10_000);
                    }
                }
                "wheel_step" => parse_f64(value, 0.01, 100.0, &mut cfg.wheel_step),
                "touch_scale" => parse_f64(value, 0.001, 10.0, &mut cfg.touch_scale),
                "drag_px_per_row" => parse_f64(value, 1.0, 64.0, &mut cfg.drag_px_per_row),
                "min_release_velocity" => {
                    parse_f64(value, 0.0, 100.0, &mut cfg.min_release_velocity)
                }
                "stop_velocity" => parse_f64(value, 0.001, 100.0, &mut cfg.stop_velocity),
                "velocity_decay" => parse_f64(value, 0.05, 0.999, &mut cfg.velocity_decay),
                "inertia_gain" => parse_f64(value, 0.0, 100.0, &mut cfg.inertia_gain),
                "frame_interval_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        cfg.frame_interval_ms = v.clamp(4, 200);
                    }
                }
                "background" => {
                    if let Some(c) = parse_hex_color(value) {
                        cfg.background = c;
                    }
                }
                _ => tracing::debug!("ignoring config key `{key}`"),
            }
        }

        cfg
    }

    pub fn serialise(&self) -> String {
        let [r, g, b, _] = self.background.0;
        let lines = [
            "# scroll-scrub configuration".to_string(),
            String::new(),
            "# Sequence".to_string(),
            format!("frame_dir = \"{}\"", self.frame_dir.display()),
            format!("frame_count = {}", self.frame_count),
            format!("max_canvas_width = {}", self.max_canvas_width),
            format!("background = \"#{r:02x}{g:02x}{b:02x}\""),
            String::new(),
            "# Input scaling (progress runs 0-100)".to_string(),
            format!("wheel_step = {}", self.wheel_step),
            format!("touch_scale = {}", self.touch_scale),
            format!("drag_px_per_row = {}", self.drag_px_per_row),
            String::new(),
            "# Inertia after a drag release (velocities in px/ms)".to_string(),
            format!("min_release_velocity = {}", self.min_release_velocity),
            format!("stop_velocity = {}", self.stop_velocity),
            format!("velocity_decay = {}", self.velocity_decay),
            format!("inertia_gain = {}", self.inertia_gain),
            format!("frame_interval_ms = {}", self.frame_interval_ms),
            String::new(),
        ];
        lines.join("\n")
    }
}

fn parse_f64(value: &str, min: f64, max: f64, out: &mut f64) {
    if let Ok(v) = value.parse::<f64>() {
        if v.is_finite() {
            *out = v.clamp(min, max);
        }
    }
}

/// Parse `#rrggbb` (leading `#` optional) into an opaque colour.
pub fn parse_hex_color(s: &str) -> Option<Rgba<u8>> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgba([channel(0)?, channel(2)?, channel(4)?, 0xff]))
}

/// Return the config file path (`$XDG_CONFIG_HOME/scroll-scrub/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("scroll-scrub").join("config.toml")
}
