pub mod field;
pub mod pointer;
pub mod rng;
pub mod time;
