use std::collections::HashMap;

use crate::api::config::{ConnectionPolicy, DecayParams};
use crate::components::particle::Particle;

use super::{for_each_close_pair, ConnectionStrategy, EdgeSegment};

/// Unordered particle-index pair, stored as (lo, hi).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    lo: usize,
    hi: usize,
}

impl PairKey {
    /// Normalise `(i, j)`; `None` for a self-pair.
    pub fn new(i: usize, j: usize) -> Option<Self> {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => Some(Self { lo: i, hi: j }),
            std::cmp::Ordering::Greater => Some(Self { lo: j, hi: i }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn indices(&self) -> (usize, usize) {
        (self.lo, self.hi)
    }

    /// Whether both indices are valid for `count` particles.
    pub fn fits(&self, count: usize) -> bool {
        self.hi < count
    }
}

/// Remembered link state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub strength: f32,
    pub age: f32,
}

/// Links that form on proximity, strengthen while it lasts and fade afterwards.
///
/// Keyed by [`PairKey`], so a pair can never hold two links.
#[derive(Debug, Clone)]
pub struct PersistentLinks {
    max_dist: f32,
    params: DecayParams,
    links: HashMap<PairKey, Link>,
}

impl PersistentLinks {
    pub fn new(max_dist: f32, params: DecayParams) -> Self {
        Self {
            max_dist,
            params,
            links: HashMap::new(),
        }
    }

    /// Strength a new link gets at distance `d`.
    pub fn initial_strength(&self, d: f32) -> f32 {
        ((1.0 - d / self.max_dist) * self.params.initial_scale).clamp(0.0, self.params.cap)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&Link> {
        PairKey::new(i, j).and_then(|key| self.links.get(&key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &Link)> {
        self.links.iter()
    }
}

impl ConnectionStrategy for PersistentLinks {
    fn policy(&self) -> ConnectionPolicy {
        ConnectionPolicy::Persistent
    }

    fn update(&mut self, particles: &[Particle]) {
        let count = particles.len();
        self.links.retain(|key, _| key.fits(count));

        let max_dist = self.max_dist;
        let DecayParams {
            initial_scale,
            cap,
            reinforce,
            ..
        } = self.params;
        let links = &mut self.links;
        for_each_close_pair(particles, max_dist, |i, j, d| {
            let Some(key) = PairKey::new(i, j) else {
                return;
            };
            links
                .entry(key)
                .and_modify(|link| link.strength = (link.strength + reinforce).min(cap))
                .or_insert_with(|| Link {
                    strength: ((1.0 - d / max_dist) * initial_scale).clamp(0.0, cap),
                    age: 0.0,
                });
        });

        let (decay, age_step) = (self.params.decay, self.params.age_step);
        for link in self.links.values_mut() {
            link.age += age_step;
            link.strength = (link.strength - decay).max(0.0);
        }

        // Removal needs both a faded strength and a minimum age.
        let before = self.links.len();
        let (floor, min_age) = (self.params.floor, self.params.min_age);
        self.links
            .retain(|_, link| !(link.strength < floor && link.age > min_age));
        let removed = before - self.links.len();
        if removed > 0 {
            log::trace!("pruned {} faded links, {} remain", removed, self.links.len());
        }
    }

    fn visit(&self, particles: &[Particle], f: &mut dyn FnMut(EdgeSegment)) {
        for (key, link) in &self.links {
            let (i, j) = key.indices();
            let (Some(a), Some(b)) = (particles.get(i), particles.get(j)) else {
                continue;
            };
            f(EdgeSegment {
                from: a.pos,
                to: b.pos,
                opacity: link.strength,
            });
        }
    }

    fn clear(&mut self) {
        self.links.clear();
    }

    fn len(&self) -> usize {
        self.links.len()
    }
}
