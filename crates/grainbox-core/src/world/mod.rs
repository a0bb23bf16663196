//! World management - grid storage and the per-frame simulation step

mod grid;
mod neighbor_queries;
pub mod stats;
#[allow(clippy::module_inception)]
mod world;

pub use grid::{Grid, GridError};
pub use neighbor_queries::{NeighborQueries, ORTHOGONAL};
pub use stats::{FrameStats, NoopStats, SimStats};
pub use world::PowderWorld;
