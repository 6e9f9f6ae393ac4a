use glam::Vec2;

/// Raw coordinate hosts pass for "no pointer" when they can only send numbers.
pub const POINTER_SENTINEL: f32 = -9999.0;

/// Raw coordinates below this on either axis decode as absent.
const ABSENT_BELOW: f32 = -999.0;

/// Last known pointer location in canvas-local coordinates, or absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pos: Option<Vec2>,
}

impl PointerState {
    pub fn absent() -> Self {
        Self { pos: None }
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self {
            pos: Some(Vec2::new(x, y)),
        }
    }

    /// Decode a raw host coordinate, treating the sentinel range as absent.
    pub fn from_raw(x: f32, y: f32) -> Self {
        if x < ABSENT_BELOW || y < ABSENT_BELOW || !x.is_finite() || !y.is_finite() {
            Self::absent()
        } else {
            Self::at(x, y)
        }
    }

    /// Raw form of this state; absent encodes as the sentinel.
    pub fn to_raw(&self) -> [f32; 2] {
        match self.pos {
            Some(p) => [p.x, p.y],
            None => [POINTER_SENTINEL, POINTER_SENTINEL],
        }
    }

    pub fn position(&self) -> Option<Vec2> {
        self.pos
    }

    pub fn is_present(&self) -> bool {
        self.pos.is_some()
    }

    pub fn set(&mut self, x: f32, y: f32) {
        *self = Self::from_raw(x, y);
    }

    pub fn clear(&mut self) {
        self.pos = None;
    }
}
