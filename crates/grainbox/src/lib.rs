//! # Grainbox - headless falling-sand sandbox
//!
//! Runs scripted scenarios on the grain simulation and writes PNG captures
//! and JSON run reports.

pub mod capture;
pub mod config;
pub mod demo;
pub mod scenario;

// Re-export core modules for convenience
pub use grainbox_core::materials;
pub use grainbox_core::render;
pub use grainbox_core::tools;
pub use grainbox_core::world;
