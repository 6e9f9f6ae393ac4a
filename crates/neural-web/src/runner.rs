use neural_field::{DrawSurface, FieldConfig, FrameClock, InputEvent, InputQueue, Simulation};

/// Drives a [`Simulation`] into a drawing surface, one frame at a time.
///
/// The browser loop in `dom.rs` and the headless export both own one of
/// these. Listeners only ever push into the input queue; `tick` drains it
/// at the start of the frame.
pub struct FieldRunner<S: DrawSurface> {
    sim: Simulation,
    surface: S,
    input: InputQueue,
    clock: FrameClock,
    frames: u64,
}

impl<S: DrawSurface> FieldRunner<S> {
    pub fn new(config: FieldConfig, seed: u64, surface: S) -> Self {
        let clock = FrameClock::from_hz(config.fixed_hz);
        Self {
            sim: Simulation::new(config, seed),
            surface,
            input: InputQueue::new(),
            clock,
            frames: 0,
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame at timestamp `now_ms`. Returns false once stopped.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.sim.is_running() {
            return false;
        }

        // One consistent input snapshot for the whole frame.
        for event in self.input.drain() {
            self.sim.handle(event, now_ms);
        }

        if let Some((width, height)) = self.sim.sync_viewport(now_ms) {
            self.surface.resize(width, height);
        }

        let steps = self.clock.advance(now_ms);
        for _ in 0..steps {
            self.sim.step();
        }

        self.sim.draw(&mut self.surface);
        self.frames += 1;
        true
    }

    /// Stop the simulation and drop anything still queued.
    pub fn stop(&mut self) {
        self.sim.stop();
        self.input.drain();
    }

    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn particle_count(&self) -> u32 {
        self.sim.field().len() as u32
    }

    pub fn connection_count(&self) -> u32 {
        self.sim.links().len() as u32
    }

    /// Frames drawn since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use neural_field::{DrawCommand, DrawList};

    fn runner() -> FieldRunner<DrawList> {
        FieldRunner::new(FieldConfig::default(), 11, DrawList::new())
    }

    #[test]
    fn first_frame_sizes_surface_and_builds_field() {
        let mut r = runner();
        r.push_input(InputEvent::Resize { width: 1200, height: 600 });
        assert!(r.tick(0.0));
        assert_eq!(r.particle_count(), 100);
        assert_eq!(r.surface().commands()[0], DrawCommand::Resize { width: 1200, height: 600 });
        assert_eq!(r.surface().circles().count(), 100);
    }

    #[test]
    fn nothing_drawn_before_first_size() {
        let mut r = runner();
        r.tick(0.0);
        assert_eq!(r.particle_count(), 0);
        assert_eq!(r.surface().circles().count(), 0);
    }

    #[test]
    fn queued_pointer_applies_before_step() {
        let mut r = runner();
        r.push_input(InputEvent::Resize { width: 800, height: 600 });
        r.tick(0.0);

        r.push_input(InputEvent::PointerMove { x: 10.0, y: 10.0 });
        r.push_input(InputEvent::PointerMove { x: 400.0, y: 300.0 });
        r.tick(16.0);
        // Only the last position of the frame is visible.
        assert_eq!(r.simulation().pointer().position(), Some(Vec2::new(400.0, 300.0)));

        let frame = r.surface().last_frame();
        assert!(frame.iter().any(|c| matches!(
            c,
            DrawCommand::Circle { center, .. } if *center == Vec2::new(400.0, 300.0)
        )));
    }

    #[test]
    fn resize_storm_rebuilds_once_after_debounce() {
        let mut r = runner();
        r.push_input(InputEvent::Resize { width: 800, height: 600 });
        r.tick(0.0);
        let first_generation = r.simulation().field().generation();

        for i in 0..10u32 {
            let t = 100.0 + i as f64 * 16.0;
            r.push_input(InputEvent::Resize { width: 900 + i, height: 600 });
            r.tick(t);
        }
        assert_eq!(r.simulation().field().generation(), first_generation);

        r.tick(1000.0);
        assert_eq!(r.simulation().field().generation(), first_generation + 1);
        assert_eq!(r.simulation().viewport().current(), Some((909, 600)));
    }

    #[test]
    fn stop_ends_the_loop() {
        let mut r = runner();
        r.push_input(InputEvent::Resize { width: 800, height: 600 });
        r.tick(0.0);
        let frames = r.frames();
        r.push_input(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        r.stop();
        assert!(!r.tick(16.0));
        assert!(!r.is_running());
        assert_eq!(r.frames(), frames);
        assert_eq!(r.connection_count(), 0);
    }

    #[test]
    fn fixed_rate_runs_multiple_steps_on_slow_frames() {
        let config = FieldConfig {
            fixed_hz: Some(60.0),
            ..FieldConfig::default()
        };
        let mut r = FieldRunner::new(config, 3, DrawList::new());
        r.push_input(InputEvent::Resize { width: 800, height: 600 });
        r.tick(0.0);
        assert_eq!(r.simulation().steps(), 1);
        r.tick(60.0);
        assert_eq!(r.simulation().steps(), 4);
    }
}
