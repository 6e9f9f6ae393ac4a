pub mod connections;
pub mod simulation;
pub mod viewport;
