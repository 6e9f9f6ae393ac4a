pub mod particle;
