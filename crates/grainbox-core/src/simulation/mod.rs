//! Grain rules: movement primitives, per-material behaviors, reactive spread

mod behaviors;
mod movement;
mod reactions;

pub use behaviors::BehaviorSystem;
pub use movement::MovementSystem;
pub use reactions::ReactionSystem;
