//! Grain cell values
//!
//! A grain is one unit of matter occupying exactly one grid cell.

use crate::{ColorChannel, GrainRng, MaterialDef, MaterialKind};
use serde::{Deserialize, Serialize};

/// A single grain in the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grain {
    pub kind: MaterialKind,
    /// RGB, rolled once at spawn from the material's channel ranges
    pub color: [u8; 3],
    /// State flags (see `grain_flags`)
    pub flags: u8,
    /// Frames this grain has existed
    pub age: u32,
}

/// Flag bits for grain state
pub mod grain_flags {
    pub const UPDATED: u8 = 1 << 0; // Already processed this frame
}

impl Grain {
    /// Spawn a new grain, rolling its color from the shared feed
    pub fn spawn<R: GrainRng + ?Sized>(kind: MaterialKind, rng: &mut R) -> Self {
        let channels = kind.def().color;
        let mut color = [0u8; 3];
        for (out, channel) in color.iter_mut().zip(channels) {
            *out = roll_channel(channel, rng);
        }
        Self::with_color(kind, color)
    }

    /// Build a grain with a known color (no randomness consumed)
    pub fn with_color(kind: MaterialKind, color: [u8; 3]) -> Self {
        Self {
            kind,
            color,
            flags: 0,
            age: 0,
        }
    }

    #[inline]
    pub fn def(&self) -> &'static MaterialDef {
        self.kind.def()
    }

    #[inline]
    pub fn is_updated(&self) -> bool {
        self.flags & grain_flags::UPDATED != 0
    }

    #[inline]
    pub fn mark_updated(&mut self) {
        self.flags |= grain_flags::UPDATED;
    }

    #[inline]
    pub fn clear_updated(&mut self) {
        self.flags &= !grain_flags::UPDATED;
    }

    /// Whether this grain may move into a cell holding `other`
    ///
    /// Empty cells are always enterable. Two liquids in the same row trade
    /// places when the mover is at least as dense; anything else needs the
    /// mover to be strictly denser, so equal solids never oscillate.
    pub fn can_swap(&self, other: Option<&Grain>, same_row: bool) -> bool {
        let Some(other) = other else {
            return true;
        };
        let (mine, theirs) = (self.def(), other.def());
        if mine.is_liquid && theirs.is_liquid && same_row {
            mine.density >= theirs.density
        } else {
            mine.density > theirs.density
        }
    }

    /// Re-roll the selected channels from the material's ranges
    pub fn recolor<R: GrainRng + ?Sized>(&mut self, channels: [bool; 3], rng: &mut R) {
        let ranges = self.def().color;
        for ((out, range), selected) in self.color.iter_mut().zip(ranges).zip(channels) {
            if selected {
                *out = roll_channel(range, rng);
            }
        }
    }
}

fn roll_channel<R: GrainRng + ?Sized>(channel: ColorChannel, rng: &mut R) -> u8 {
    match channel {
        ColorChannel::Fixed(value) => value,
        ColorChannel::Range(min, max) => rng.int(min as i32, max as i32) as u8,
    }
}
