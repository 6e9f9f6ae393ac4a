use crate::api::config::ConnectionPolicy;
use crate::components::particle::Particle;

use super::{for_each_close_pair, ConnectionStrategy, EdgeSegment};

/// Stateless links: every in-range pair, recomputed each frame.
#[derive(Debug, Clone)]
pub struct EphemeralLinks {
    max_dist: f32,
    opacity: f32,
}

impl EphemeralLinks {
    pub fn new(max_dist: f32, opacity: f32) -> Self {
        Self { max_dist, opacity }
    }
}

impl ConnectionStrategy for EphemeralLinks {
    fn policy(&self) -> ConnectionPolicy {
        ConnectionPolicy::Ephemeral
    }

    fn update(&mut self, _particles: &[Particle]) {}

    fn visit(&self, particles: &[Particle], f: &mut dyn FnMut(EdgeSegment)) {
        let max_dist = self.max_dist;
        let scale = self.opacity;
        for_each_close_pair(particles, max_dist, |i, j, d| {
            f(EdgeSegment {
                from: particles[i].pos,
                to: particles[j].pos,
                opacity: (1.0 - d / max_dist) * scale,
            });
        });
    }

    fn clear(&mut self) {}

    fn len(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0, 0.5)
    }

    fn edges(links: &EphemeralLinks, particles: &[Particle]) -> Vec<EdgeSegment> {
        let mut out = Vec::new();
        links.visit(particles, &mut |e| out.push(e));
        out
    }

    #[test]
    fn opacity_falls_off_with_distance() {
        let links = EphemeralLinks::new(140.0, 0.25);
        let out = edges(&links, &[at(0.0, 0.0), at(70.0, 0.0)]);
        assert_eq!(out.len(), 1);
        assert!((out[0].opacity - 0.125).abs() < 1e-6);
    }

    #[test]
    fn no_memory_between_frames() {
        let mut links = EphemeralLinks::new(140.0, 0.25);
        let mut particles = vec![at(0.0, 0.0), at(50.0, 0.0)];
        links.update(&particles);
        assert_eq!(edges(&links, &particles).len(), 1);

        particles[1].pos = Vec2::new(500.0, 0.0);
        links.update(&particles);
        assert!(edges(&links, &particles).is_empty());
        assert!(links.is_empty());
    }

    #[test]
    fn pair_at_exact_threshold_is_not_linked() {
        let links = EphemeralLinks::new(140.0, 0.25);
        assert!(edges(&links, &[at(0.0, 0.0), at(140.0, 0.0)]).is_empty());
    }
}
