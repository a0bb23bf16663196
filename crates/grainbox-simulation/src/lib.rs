//! Material simulation data for grainbox
//!
//! This crate provides the foundational data types for the grain simulation:
//! - Material definitions (MaterialKind, MaterialDef, the static rule table)
//! - Grain cell values (Grain, grain_flags)
//! - The random feed consumed by every stochastic rule (GrainRng)

mod grain;
mod materials;
mod rng;

pub use grain::{Grain, grain_flags};
pub use materials::{
    ColorChannel, MaterialDef, MaterialError, MaterialKind, MaterialType, Transition,
    GAS_DENSITY,
};
pub use rng::{GrainRng, RecordingRng, ReplayRng};
