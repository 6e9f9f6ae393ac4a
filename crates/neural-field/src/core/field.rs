use glam::Vec2;

use crate::api::config::{DensityConfig, MotionConfig, PointerForce, SpawnConfig, SpawnMode};
use crate::components::particle::Particle;
use crate::core::rng::Rng;

/// Particle count for a viewport `width` pixels wide.
pub fn particle_count(width: f32, density: &DensityConfig) -> usize {
    if !(width > 0.0) || !(density.px_per_particle > 0.0) {
        return 0;
    }
    ((width / density.px_per_particle).floor() as usize).min(density.max_particles)
}

/// The current particle set, rebuilt as a unit when the viewport changes.
///
/// Particle indices are only meaningful within one generation; every
/// rebuild bumps [`Field::generation`].
pub struct Field {
    particles: Vec<Particle>,
    bounds: Vec2,
    generation: u32,
}

impl Field {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            bounds: Vec2::ZERO,
            generation: 0,
        }
    }

    /// Discard every particle and spawn a fresh set for a `width` × `height` surface.
    pub fn rebuild(
        &mut self,
        width: f32,
        height: f32,
        density: &DensityConfig,
        spawn: &SpawnConfig,
        wrap_margin: f32,
        rng: &mut Rng,
    ) {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let count = particle_count(width, density);

        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(spawn_particle(width, height, spawn, wrap_margin, rng));
        }
        self.bounds = Vec2::new(width, height);
        self.generation = self.generation.wrapping_add(1);

        log::debug!(
            "field rebuilt: {}x{} -> {} particles (generation {})",
            width, height, count, self.generation
        );
    }

    /// Advance every particle one step against a single pointer snapshot.
    pub fn update(&mut self, pointer: Option<Vec2>, force: &PointerForce, motion: &MotionConfig) {
        let bounds = self.bounds;
        for p in &mut self.particles {
            p.update(pointer, force, motion, bounds);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Surface size the field was last built for.
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_particle(width: f32, height: f32, spawn: &SpawnConfig, wrap_margin: f32, rng: &mut Rng) -> Particle {
    let x = rng.range(0.0, width);
    let mut vel = Vec2::new(rng.symmetric(spawn.speed), rng.symmetric(spawn.speed));
    let y = match spawn.mode {
        SpawnMode::Uniform => rng.range(0.0, height),
        SpawnMode::FallingIn => {
            vel.y = vel.y.abs();
            rng.range(-wrap_margin, 0.0)
        }
    };
    let radius = rng.range(spawn.radius.0, spawn.radius.1);
    let alpha = rng.range(spawn.alpha.0, spawn.alpha.1);
    Particle::new(Vec2::new(x, y), vel, radius, alpha)
}
