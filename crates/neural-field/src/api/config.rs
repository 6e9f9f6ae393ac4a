//! Tunable parameters for the field, loaded from JSON or taken from `Default`.
//!
//! Every group carries `#[serde(default)]`, so a host can override a single
//! value (`{ "pointer": { "mode": "repel" } }`) and keep the rest.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::renderer::color::Color;

/// Errors raised while loading a [`FieldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be {expected}, got {value}")]
    Invalid {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
    #[error("{field} must be at most {limit}, got {value}")]
    TooLarge {
        field: &'static str,
        limit: usize,
        value: usize,
    },
    #[error("{field} range is inverted: [{lo}, {hi})")]
    InvertedRange {
        field: &'static str,
        lo: f32,
        hi: f32,
    },
}

/// Largest accepted `density.max_particles`.
pub const PARTICLE_LIMIT: usize = 1000;

/// How particle count scales with viewport width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityConfig {
    /// One particle per this many horizontal pixels.
    pub px_per_particle: f32,
    /// Hard ceiling; connection cost is quadratic in particle count.
    pub max_particles: usize,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            px_per_particle: 12.0,
            max_particles: 300,
        }
    }
}

/// Where new particles appear on rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnMode {
    /// Uniform over the visible area.
    #[default]
    Uniform,
    /// In the band just above the visible area, drifting downward.
    FallingIn,
}

/// Random ranges for freshly spawned particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub mode: SpawnMode,
    /// Velocity components are drawn from [-speed/2, speed/2).
    pub speed: f32,
    pub radius: (f32, f32),
    pub alpha: (f32, f32),
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            mode: SpawnMode::Uniform,
            speed: 0.25,
            radius: (0.8, 2.0),
            alpha: (0.2, 0.6),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Multiplicative velocity damping per step, in (0, 1].
    pub damping: f32,
    /// Distance past an edge before a particle teleports to the opposite side.
    pub wrap_margin: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            damping: 0.99,
            wrap_margin: 20.0,
        }
    }
}

/// Direction of the pointer force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceMode {
    /// Particles are pulled toward the pointer.
    #[default]
    Attract,
    /// Particles are pushed away from the pointer.
    Repel,
}

/// Pointer interaction: force shape and the pointer-line overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerForce {
    pub mode: ForceMode,
    /// Interaction radius `R`.
    pub radius: f32,
    /// Impulse at distance zero; falls off linearly to nothing at `R`.
    pub strength: f32,
}

impl Default for PointerForce {
    fn default() -> Self {
        Self {
            mode: ForceMode::Attract,
            radius: 280.0,
            strength: 0.2,
        }
    }
}

/// Which edge-management strategy the field uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionPolicy {
    /// Recomputed from scratch every frame, no memory.
    Ephemeral,
    /// Created on proximity, reinforced, decaying every frame.
    #[default]
    Persistent,
}

/// Constants of the persistent-with-decay policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayParams {
    /// New link strength is `(1 - d/max_dist) * initial_scale`.
    pub initial_scale: f32,
    /// Upper bound on strength.
    pub cap: f32,
    /// Added when an existing link is seen in range again.
    pub reinforce: f32,
    /// Subtracted from every link every step.
    pub decay: f32,
    /// Added to every link's age every step.
    pub age_step: f32,
    /// A link may be removed once strength drops below this...
    pub floor: f32,
    /// ...and its age exceeds this.
    pub min_age: f32,
}

impl Default for DecayParams {
    fn default() -> Self {
        Self {
            initial_scale: 0.25,
            cap: 0.25,
            reinforce: 0.005,
            decay: 0.002,
            age_step: 0.003,
            floor: 0.01,
            min_age: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub policy: ConnectionPolicy,
    /// Particles closer than this are linked.
    pub max_dist: f32,
    /// Opacity scale for ephemeral links.
    pub ephemeral_opacity: f32,
    pub decay: DecayParams,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            policy: ConnectionPolicy::Persistent,
            max_dist: 140.0,
            ephemeral_opacity: 0.25,
            decay: DecayParams::default(),
        }
    }
}

/// Colors and stroke widths. Alpha in the colors is replaced per draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub node_color: Color,
    pub link_color: Color,
    pub link_width: f32,
    pub pointer_link_color: Color,
    pub pointer_link_width: f32,
    /// Opacity scale for particle-to-pointer lines.
    pub pointer_link_opacity: f32,
    pub cursor_color: Color,
    /// Cursor dot radius; zero disables the dot.
    pub cursor_radius: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            node_color: Color::NODE,
            link_color: Color::LINK,
            link_width: 0.5,
            pointer_link_color: Color::POINTER_LINK,
            pointer_link_width: 0.9,
            pointer_link_opacity: 0.55,
            cursor_color: Color::CURSOR.with_alpha(0.6),
            cursor_radius: 3.0,
        }
    }
}

/// Full configuration of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub density: DensityConfig,
    pub spawn: SpawnConfig,
    pub motion: MotionConfig,
    pub pointer: PointerForce,
    pub links: LinkConfig,
    pub style: StyleConfig,
    /// Quiet period after the last resize notification before rebuilding.
    pub resize_debounce_ms: f64,
    /// Fixed simulation rate; `None` steps once per frame callback.
    pub fixed_hz: Option<f32>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density: DensityConfig::default(),
            spawn: SpawnConfig::default(),
            motion: MotionConfig::default(),
            pointer: PointerForce::default(),
            links: LinkConfig::default(),
            style: StyleConfig::default(),
            resize_debounce_ms: 100.0,
            fixed_hz: None,
        }
    }
}

impl FieldConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values the simulation divides by or relies on for stability.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("density.px_per_particle", self.density.px_per_particle)?;
        if self.density.max_particles > PARTICLE_LIMIT {
            return Err(ConfigError::TooLarge {
                field: "density.max_particles",
                limit: PARTICLE_LIMIT,
                value: self.density.max_particles,
            });
        }
        positive("links.max_dist", self.links.max_dist)?;
        positive("pointer.radius", self.pointer.radius)?;
        non_negative("pointer.strength", self.pointer.strength)?;
        non_negative("spawn.speed", self.spawn.speed)?;
        non_negative("motion.wrap_margin", self.motion.wrap_margin)?;
        non_negative("resize_debounce_ms", self.resize_debounce_ms as f32)?;

        let damping = self.motion.damping;
        if !(damping > 0.0 && damping <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "motion.damping",
                expected: "in (0, 1]",
                value: damping,
            });
        }

        ordered("spawn.radius", self.spawn.radius)?;
        ordered("spawn.alpha", self.spawn.alpha)?;
        positive("spawn.radius.0", self.spawn.radius.0)?;
        if self.spawn.alpha.0 < 0.0 || self.spawn.alpha.1 > 1.0 {
            return Err(ConfigError::Invalid {
                field: "spawn.alpha",
                expected: "within [0, 1]",
                value: if self.spawn.alpha.0 < 0.0 { self.spawn.alpha.0 } else { self.spawn.alpha.1 },
            });
        }

        let decay = &self.links.decay;
        non_negative("links.decay.initial_scale", decay.initial_scale)?;
        non_negative("links.decay.cap", decay.cap)?;
        non_negative("links.decay.reinforce", decay.reinforce)?;
        non_negative("links.decay.decay", decay.decay)?;
        non_negative("links.decay.age_step", decay.age_step)?;
        non_negative("links.decay.floor", decay.floor)?;
        non_negative("links.decay.min_age", decay.min_age)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, expected: "positive", value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, expected: "non-negative", value })
    }
}

fn ordered(field: &'static str, (lo, hi): (f32, f32)) -> Result<(), ConfigError> {
    if lo <= hi {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, lo, hi })
    }
}
