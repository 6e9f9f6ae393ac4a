pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{
    ConfigError, ConnectionPolicy, DecayParams, DensityConfig, FieldConfig, ForceMode,
    LinkConfig, MotionConfig, PointerForce, SpawnConfig, SpawnMode, StyleConfig, PARTICLE_LIMIT,
};
pub use components::particle::{pointer_impulse, Particle};
pub use core::field::{particle_count, Field};
pub use core::pointer::{PointerState, POINTER_SENTINEL};
pub use core::rng::Rng;
pub use core::time::FrameClock;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::color::Color;
pub use renderer::surface::{DrawCommand, DrawList, DrawSurface};
pub use systems::connections::{
    strategy_for, ConnectionStrategy, EdgeSegment, EphemeralLinks, Link, PairKey, PersistentLinks,
};
pub use systems::simulation::{LoopState, Simulation};
pub use systems::viewport::ViewportAdapter;
