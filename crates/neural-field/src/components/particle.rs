//! A single field node and its per-step update rule.

use glam::Vec2;

use crate::api::config::{ForceMode, MotionConfig, PointerForce};

/// A single node with physics and rendering state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, alpha: f32) -> Self {
        Particle {
            pos,
            vel,
            radius,
            alpha,
        }
    }

    /// Advance one step inside a `bounds` sized surface.
    ///
    /// Order: pointer impulse, damping, Euler integration, toroidal wrap.
    pub fn update(
        &mut self,
        pointer: Option<Vec2>,
        force: &PointerForce,
        motion: &MotionConfig,
        bounds: Vec2,
    ) {
        if let Some(pointer) = pointer {
            self.vel += pointer_impulse(self.pos, pointer, force);
        }
        self.vel *= motion.damping;
        self.pos += self.vel;
        self.pos = wrap(self.pos, bounds, motion.wrap_margin);
    }
}

/// Velocity change the pointer applies to a particle at `pos`.
///
/// Zero outside the interaction radius and at distance zero.
pub fn pointer_impulse(pos: Vec2, pointer: Vec2, force: &PointerForce) -> Vec2 {
    let delta = pointer - pos;
    let d = delta.length();
    if d <= 0.0 || d >= force.radius {
        return Vec2::ZERO;
    }

    let falloff = (force.radius - d) / force.radius;
    let toward = delta / d;
    let dir = match force.mode {
        ForceMode::Attract => toward,
        ForceMode::Repel => -toward,
    };
    dir * falloff * force.strength
}

/// Teleport a position that left `[-margin, size + margin]` to the opposite edge.
pub fn wrap(mut pos: Vec2, bounds: Vec2, margin: f32) -> Vec2 {
    if pos.x < -margin {
        pos.x = bounds.x + margin;
    } else if pos.x > bounds.x + margin {
        pos.x = -margin;
    }
    if pos.y < -margin {
        pos.y = bounds.y + margin;
    } else if pos.y > bounds.y + margin {
        pos.y = -margin;
    }
    pos
}
