/// Input events the field reacts to.
/// Coordinates are in container-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A cursor or the first touch moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The cursor left the container or the touch ended.
    PointerLeave,
    /// The hosting container now measures `width` × `height`.
    Resize { width: u32, height: u32 },
}

/// Events collected between frames.
///
/// Listeners push whenever the browser fires; the runner takes the whole
/// batch at frame start and applies it in arrival order.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Take every pending event, oldest first, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
