//! Per-frame body of the hero animation.
//!
//! A host drives it in this order every frame:
//! 1. [`Simulation::handle`] for each queued input event,
//! 2. [`Simulation::sync_viewport`] (resize the surface if it returns a size),
//! 3. [`Simulation::step`] as many times as the frame clock says,
//! 4. [`Simulation::draw`].

use glam::Vec2;

use crate::api::config::FieldConfig;
use crate::core::field::Field;
use crate::core::pointer::PointerState;
use crate::core::rng::Rng;
use crate::input::queue::InputEvent;
use crate::renderer::surface::DrawSurface;
use crate::systems::connections::{strategy_for, ConnectionStrategy};
use crate::systems::viewport::ViewportAdapter;

/// Lifecycle of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Terminal. Steps and draws become no-ops.
    Stopped,
}

pub struct Simulation {
    config: FieldConfig,
    field: Field,
    links: Box<dyn ConnectionStrategy>,
    pointer: PointerState,
    viewport: ViewportAdapter,
    rng: Rng,
    state: LoopState,
    steps: u64,
}

impl Simulation {
    pub fn new(config: FieldConfig, seed: u64) -> Self {
        let links = strategy_for(&config.links);
        let viewport = ViewportAdapter::new(config.resize_debounce_ms);
        Self {
            config,
            field: Field::new(),
            links,
            pointer: PointerState::absent(),
            viewport,
            rng: Rng::new(seed),
            state: LoopState::Running,
            steps: 0,
        }
    }

    /// Apply one input event received at `now_ms`.
    pub fn handle(&mut self, event: InputEvent, now_ms: f64) {
        match event {
            InputEvent::PointerMove { x, y } => self.pointer.set(x, y),
            InputEvent::PointerLeave => self.pointer.clear(),
            InputEvent::Resize { width, height } => self.viewport.notify(width, height, now_ms),
        }
    }

    /// Rebuild the field if a viewport change is due. Returns the new size.
    pub fn sync_viewport(&mut self, now_ms: f64) -> Option<(u32, u32)> {
        let (width, height) = self.viewport.poll(now_ms)?;
        self.rebuild(width as f32, height as f32);
        Some((width, height))
    }

    /// Replace every particle and forget every connection.
    pub fn rebuild(&mut self, width: f32, height: f32) {
        let FieldConfig {
            density,
            spawn,
            motion,
            ..
        } = &self.config;
        self.field
            .rebuild(width, height, density, spawn, motion.wrap_margin, &mut self.rng);
        self.links.clear();
    }

    /// Advance connections then particles by one step.
    pub fn step(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.links.update(self.field.particles());
        self.field
            .update(self.pointer.position(), &self.config.pointer, &self.config.motion);
        self.steps += 1;
    }

    /// Clear the surface and draw connections, pointer lines and particles.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        if self.state == LoopState::Stopped {
            return;
        }
        let style = &self.config.style;
        let bounds = self.field.bounds();
        let particles = self.field.particles();

        surface.clear(bounds.x, bounds.y);

        self.links.visit(particles, &mut |edge| {
            surface.stroke_line(
                edge.from,
                edge.to,
                style.link_width,
                style.link_color.with_alpha(edge.opacity),
            );
        });

        if let Some(pointer) = self.pointer.position() {
            self.draw_pointer(surface, pointer);
        }

        for p in particles {
            surface.fill_circle(p.pos, p.radius, style.node_color.with_alpha(p.alpha));
        }
    }

    fn draw_pointer(&self, surface: &mut dyn DrawSurface, pointer: Vec2) {
        let style = &self.config.style;
        let radius = self.config.pointer.radius;
        for p in self.field.iter() {
            let d = p.pos.distance(pointer);
            if d < radius {
                let opacity = (1.0 - d / radius) * style.pointer_link_opacity;
                surface.stroke_line(
                    p.pos,
                    pointer,
                    style.pointer_link_width,
                    style.pointer_link_color.with_alpha(opacity),
                );
            }
        }
        if style.cursor_radius > 0.0 {
            surface.fill_circle(pointer, style.cursor_radius, style.cursor_color);
        }
    }

    /// Stop the loop for good.
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            log::info!("simulation stopped after {} steps", self.steps);
        }
        self.state = LoopState::Stopped;
        self.links.clear();
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn links(&self) -> &dyn ConnectionStrategy {
        self.links.as_ref()
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn viewport(&self) -> &ViewportAdapter {
        &self.viewport
    }

    /// Steps run since creation.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::ConnectionPolicy;
    use crate::core::pointer::POINTER_SENTINEL;
    use crate::renderer::color::Color;
    use crate::renderer::surface::{DrawCommand, DrawList};

    fn sim_with(config: FieldConfig) -> Simulation {
        let mut sim = Simulation::new(config, 7);
        sim.handle(InputEvent::Resize { width: 800, height: 400 }, 0.0);
        assert_eq!(sim.sync_viewport(0.0), Some((800, 400)));
        sim
    }

    #[test]
    fn resize_builds_field() {
        let sim = sim_with(FieldConfig::default());
        assert_eq!(sim.field().len(), 66);
        assert_eq!(sim.viewport().current(), Some((800, 400)));
    }

    #[test]
    fn absent_pointer_has_no_effect_and_draws_nothing_for_it() {
        let mut sim = sim_with(FieldConfig::default());
        sim.handle(InputEvent::PointerMove { x: POINTER_SENTINEL, y: POINTER_SENTINEL }, 1.0);
        assert!(!sim.pointer().is_present());

        // With the pointer absent, each velocity is just damped.
        let before: Vec<_> = sim.field().iter().map(|p| p.vel).collect();
        sim.step();
        for (p, v) in sim.field().iter().zip(before) {
            assert!((p.vel - v * 0.99).length() < 1e-6);
        }

        let mut list = DrawList::new();
        sim.draw(&mut list);
        let pointer_color = sim.config().style.pointer_link_color;
        let pointer_lines = list.lines().filter(|c| match c {
            DrawCommand::Line { color, .. } => color.r == pointer_color.r && color.g == pointer_color.g,
            _ => false,
        });
        assert_eq!(pointer_lines.count(), 0);
        assert_eq!(list.circles().count(), sim.field().len());
    }

    #[test]
    fn pointer_lines_and_cursor_dot_when_present() {
        let mut sim = sim_with(FieldConfig::default());
        sim.handle(InputEvent::PointerMove { x: 400.0, y: 200.0 }, 1.0);
        let pointer = Vec2::new(400.0, 200.0);
        let in_range = sim.field().iter().filter(|p| p.pos.distance(pointer) < 280.0).count();

        let mut list = DrawList::new();
        sim.draw(&mut list);
        let to_pointer = list
            .lines()
            .filter(|c| matches!(c, DrawCommand::Line { to, .. } if *to == pointer))
            .count();
        assert_eq!(to_pointer, in_range);
        // Particles plus the cursor dot.
        assert_eq!(list.circles().count(), sim.field().len() + 1);
    }

    #[test]
    fn pointer_lines_fade_with_distance() {
        let mut sim = sim_with(FieldConfig::default());
        let pointer = Vec2::new(400.0, 200.0);
        sim.handle(InputEvent::PointerMove { x: pointer.x, y: pointer.y }, 1.0);

        let mut list = DrawList::new();
        sim.draw(&mut list);
        let mut seen = 0;
        for cmd in list.lines() {
            let DrawCommand::Line { from, to, width, color } = cmd else {
                continue;
            };
            if *to != pointer {
                continue;
            }
            let d = from.distance(pointer);
            assert_eq!(*width, 0.9);
            assert_eq!((color.r, color.g, color.b), (Color::POINTER_LINK.r, Color::POINTER_LINK.g, Color::POINTER_LINK.b));
            assert!((color.a - (1.0 - d / 280.0) * 0.55).abs() < 1e-5, "alpha {} at d {}", color.a, d);
            seen += 1;
        }
        assert!(seen > 0);

        let dot = list.circles().find(|c| {
            matches!(c, DrawCommand::Circle { center, radius, .. } if *center == pointer && *radius == 3.0)
        });
        match dot {
            Some(DrawCommand::Circle { color, .. }) => {
                assert_eq!(*color, Color::CURSOR.with_alpha(0.6));
            }
            _ => panic!("cursor dot missing"),
        }
    }

    #[test]
    fn persistent_links_draw_at_their_strength() {
        let mut sim = sim_with(FieldConfig::default());
        for _ in 0..30 {
            sim.step();
        }
        let mut edges = Vec::new();
        sim.links().visit(sim.field().particles(), &mut |e| edges.push(e));
        assert!(!edges.is_empty());

        let mut list = DrawList::new();
        sim.draw(&mut list);
        let links: Vec<_> = list
            .lines()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, width, color } => Some((*from, *to, *width, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(links.len(), edges.len());
        for ((from, to, width, color), edge) in links.into_iter().zip(edges) {
            assert_eq!((from, to), (edge.from, edge.to));
            assert_eq!(width, 0.5);
            assert_eq!(color, Color::LINK.with_alpha(edge.opacity));
            assert!(edge.opacity >= 0.0 && edge.opacity <= 0.25);
        }
    }

    #[test]
    fn leave_clears_pointer() {
        let mut sim = sim_with(FieldConfig::default());
        sim.handle(InputEvent::PointerMove { x: 10.0, y: 10.0 }, 1.0);
        sim.handle(InputEvent::PointerLeave, 2.0);
        assert!(!sim.pointer().is_present());
    }

    #[test]
    fn draw_order_is_clear_links_particles() {
        let mut sim = sim_with(FieldConfig::default());
        for _ in 0..5 {
            sim.step();
        }
        let mut list = DrawList::new();
        sim.draw(&mut list);
        let cmds = list.commands();
        assert!(matches!(cmds[0], DrawCommand::Clear { width, height } if width == 800.0 && height == 400.0));
        let first_circle = cmds.iter().position(|c| matches!(c, DrawCommand::Circle { .. })).unwrap();
        let last_line = cmds.iter().rposition(|c| matches!(c, DrawCommand::Line { .. }));
        if let Some(last_line) = last_line {
            assert!(last_line < first_circle);
        }
    }

    #[test]
    fn rebuild_drops_all_links() {
        let mut sim = sim_with(FieldConfig::default());
        for _ in 0..20 {
            sim.step();
        }
        assert!(!sim.links().is_empty());
        sim.rebuild(240.0, 400.0);
        assert!(sim.links().is_empty());
        assert_eq!(sim.field().len(), 20);
    }

    #[test]
    fn repeated_rebuilds_never_leave_stale_links() {
        let mut sim = sim_with(FieldConfig::default());
        let widths = [1200.0, 300.0, 900.0, 120.0, 600.0];
        for (round, w) in widths.into_iter().enumerate() {
            sim.rebuild(w, 400.0);
            for _ in 0..(10 + round) {
                sim.step();
            }
            let mut drawn = 0;
            sim.links().visit(sim.field().particles(), &mut |_| drawn += 1);
            assert_eq!(drawn, sim.links().len());
        }
    }

    #[test]
    fn ephemeral_policy_stores_nothing() {
        let mut config = FieldConfig::default();
        config.links.policy = ConnectionPolicy::Ephemeral;
        let mut sim = sim_with(config);
        for _ in 0..10 {
            sim.step();
        }
        assert_eq!(sim.links().policy(), ConnectionPolicy::Ephemeral);
        assert!(sim.links().is_empty());
    }

    #[test]
    fn stopped_simulation_is_inert() {
        let mut sim = sim_with(FieldConfig::default());
        sim.step();
        sim.stop();
        let positions: Vec<_> = sim.field().iter().map(|p| p.pos).collect();
        sim.step();
        assert_eq!(sim.steps(), 1);
        assert_eq!(sim.state(), LoopState::Stopped);
        assert!(sim.field().iter().map(|p| p.pos).eq(positions));

        let mut list = DrawList::new();
        sim.draw(&mut list);
        assert!(list.is_empty());
    }
}
