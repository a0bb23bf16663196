pub mod render;
pub mod simulation;
pub mod tools;
pub mod world;

// Re-export the material crate so downstream code needs a single dependency
pub mod materials {
    pub use grainbox_simulation::*;
}
