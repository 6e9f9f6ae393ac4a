//! Edge management between particles.
//!
//! Two policies share one interface: [`EphemeralLinks`] recomputes every
//! in-range pair per frame and stores nothing, [`PersistentLinks`] remembers
//! links and lets them decay. Pick one with [`strategy_for`].

mod ephemeral;
mod persistent;

pub use ephemeral::EphemeralLinks;
pub use persistent::{Link, PairKey, PersistentLinks};

use glam::Vec2;

use crate::api::config::{ConnectionPolicy, LinkConfig};
use crate::components::particle::Particle;

/// A drawable edge: endpoints and opacity in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
}

/// Edge-management policy.
pub trait ConnectionStrategy {
    /// Which policy this is.
    fn policy(&self) -> ConnectionPolicy;

    /// Advance stored state by one step against the current particle positions.
    fn update(&mut self, particles: &[Particle]);

    /// Emit every edge to draw this frame.
    /// Edges referring to indices past `particles.len()` are skipped.
    fn visit(&self, particles: &[Particle], f: &mut dyn FnMut(EdgeSegment));

    /// Forget all stored edges.
    fn clear(&mut self);

    /// Number of stored edges (always zero for stateless policies).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the strategy selected by `config.policy`.
pub fn strategy_for(config: &LinkConfig) -> Box<dyn ConnectionStrategy> {
    match config.policy {
        ConnectionPolicy::Ephemeral => Box::new(EphemeralLinks::new(config.max_dist, config.ephemeral_opacity)),
        ConnectionPolicy::Persistent => Box::new(PersistentLinks::new(config.max_dist, config.decay.clone())),
    }
}

/// Call `f(i, j, d)` for every unordered pair closer than `max_dist`.
pub(crate) fn for_each_close_pair(particles: &[Particle], max_dist: f32, mut f: impl FnMut(usize, usize, f32)) {
    let max_sq = max_dist * max_dist;
    for i in 0..particles.len() {
        let a = particles[i].pos;
        for (j, pb) in particles.iter().enumerate().skip(i + 1) {
            let d_sq = a.distance_squared(pb.pos);
            if d_sq < max_sq {
                f(i, j, d_sq.sqrt());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0, 0.5)
    }

    #[test]
    fn close_pairs_are_unordered_and_in_range() {
        let particles = [at(0.0, 0.0), at(10.0, 0.0), at(200.0, 0.0), at(205.0, 0.0)];
        let mut pairs = Vec::new();
        for_each_close_pair(&particles, 50.0, |i, j, d| pairs.push((i, j, d)));
        assert_eq!(pairs, vec![(0, 1, 10.0), (2, 3, 5.0)]);
    }

    #[test]
    fn strategy_for_respects_policy() {
        let mut config = LinkConfig::default();
        assert_eq!(strategy_for(&config).policy(), ConnectionPolicy::Persistent);
        config.policy = ConnectionPolicy::Ephemeral;
        assert_eq!(strategy_for(&config).policy(), ConnectionPolicy::Ephemeral);
    }

    #[test]
    fn both_policies_draw_a_close_pair() {
        let particles = [at(0.0, 0.0), at(70.0, 0.0)];
        for policy in [ConnectionPolicy::Ephemeral, ConnectionPolicy::Persistent] {
            let config = LinkConfig { policy, ..LinkConfig::default() };
            let mut links = strategy_for(&config);
            links.update(&particles);
            let mut edges = Vec::new();
            links.visit(&particles, &mut |e| edges.push(e));
            assert_eq!(edges.len(), 1, "{policy:?}");
            assert!(edges[0].opacity > 0.0);
        }
    }
}
