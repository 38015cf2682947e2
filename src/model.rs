//! Core data models for the particle logo.
//! The physics and types here never touch the DOM; only `FieldConfig::load` reads localStorage.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Current position in canvas space, mutated only by `step_particles`.
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Rest position the spring pulls back to. Fixed at sampling time.
    anchor_x: f64,
    anchor_y: f64,
    color: Rgb,
}

impl Particle {
    pub fn at_rest(x: f64, y: f64, color: Rgb) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            anchor_x: x,
            anchor_y: y,
            color,
        }
    }

    #[cfg(test)]
    pub fn anchor(&self) -> (f64, f64) {
        (self.anchor_x, self.anchor_y)
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

/// Tunables for sampling and physics. Defaults are the values the logo ships with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Logical canvas size (the `width`/`height` attributes, not CSS size).
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Offscreen resolution the image is drawn at before sampling.
    pub sample_width: u32,
    pub sample_height: u32,
    /// Only every Nth row/column of the sample grid is scanned.
    pub stride: u32,
    /// Pixel admitted only when alpha is strictly above this.
    pub alpha_threshold: u8,
    /// Pixel admitted only when (r+g+b)/3 is strictly below this.
    pub brightness_threshold: f64,
    pub effect_radius: f64,
    pub force_strength: f64,
    pub spring: f64,
    pub friction: f64,
    pub particle_radius: f64,
    /// Pointer position used when no pointer is over the canvas.
    pub far_away: (f64, f64),
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            canvas_width: 180.0,
            canvas_height: 170.0,
            sample_width: 96,
            sample_height: 96,
            stride: 1,
            alpha_threshold: 100,
            brightness_threshold: 250.0,
            effect_radius: 51.0,
            force_strength: 1.5,
            spring: 0.1,
            friction: 0.85,
            particle_radius: 1.3,
            far_away: (-1000.0, -1000.0),
        }
    }
}

pub const CONFIG_STORAGE_KEY: &str = "particle_logo_config";

impl FieldConfig {
    /// Parse a (possibly partial) JSON override; unknown keys are ignored.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<FieldConfig>(raw).map(FieldConfig::sanitized)
    }

    /// Read an override persisted in localStorage, or fall back to defaults.
    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(CONFIG_STORAGE_KEY) {
                    match FieldConfig::from_json(&raw) {
                        Ok(cfg) => return cfg,
                        Err(e) => crate::util::clog(&format!("ignoring stored config: {e}")),
                    }
                }
            }
        }
        FieldConfig::default()
    }

    /// Clamp grid parameters that would otherwise stall or divide by zero.
    pub fn sanitized(mut self) -> Self {
        self.stride = self.stride.max(1);
        self.sample_width = self.sample_width.max(1);
        self.sample_height = self.sample_height.max(1);
        self
    }
}

/// Pointer position in canvas space. `Far` contributes no repulsion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pointer {
    Far,
    At { x: f64, y: f64 },
}

impl Pointer {
    pub fn position(&self, cfg: &FieldConfig) -> (f64, f64) {
        match *self {
            Pointer::Far => cfg.far_away,
            Pointer::At { x, y } => (x, y),
        }
    }
}

/// Magnitude of the push at `dist` from the pointer: linear falloff to zero at the radius.
pub fn repulsion_force(dist: f64, cfg: &FieldConfig) -> f64 {
    if dist < cfg.effect_radius {
        (1.0 - dist / cfg.effect_radius) * cfg.force_strength
    } else {
        0.0
    }
}

/// Advance every particle by one frame: repulsion, spring, friction, then Euler step.
pub fn step_particles(particles: &mut [Particle], pointer: Pointer, cfg: &FieldConfig) {
    let (px, py) = pointer.position(cfg);
    for p in particles.iter_mut() {
        let dx = p.x - px;
        let dy = p.y - py;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < cfg.effect_radius {
            let angle = dy.atan2(dx);
            let force = repulsion_force(dist, cfg);
            p.vx += angle.cos() * force;
            p.vy += angle.sin() * force;
        }

        p.vx += (p.anchor_x - p.x) * cfg.spring;
        p.vy += (p.anchor_y - p.y) * cfg.spring;

        p.vx *= cfg.friction;
        p.vy *= cfg.friction;

        p.x += p.vx;
        p.y += p.vy;
    }
}
