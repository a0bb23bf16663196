//! Material definitions and the static rule table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Density sentinel for materials that rise instead of sink
pub const GAS_DENSITY: i8 = -1;

/// Every material a grain can be made of
///
/// The set is closed: adding a variant means adding a row to the rule table
/// and an arm to the behavior dispatch, both checked for exhaustiveness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum MaterialKind {
    Sand,
    FineSand,
    Water,
    Oil,
    Wood,
    Fire,
    Smoke,
    Steam,
    Ice,
    Snow,
    Lava,
    Stone,
    Rock,
    Brick,
    Gunpowder,
    Fuse,
    Acid,
    Void,
}

/// How a material behaves physically (descriptive; rules are per kind)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialType {
    /// Doesn't move (wood, rock, fuse)
    Solid,
    /// Falls, piles up (sand, stone, snow)
    Powder,
    /// Flows, seeks level (water, oil, lava)
    Liquid,
    /// Rises, disperses (smoke, steam)
    Gas,
}

/// One color channel of a freshly spawned grain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorChannel {
    /// Constant intensity, consumes no randomness
    Fixed(u8),
    /// `rng.int(min, max)` with `max` exclusive
    Range(u8, u8),
}

/// A probabilistic one-way transition into another material
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Chance per neighbor contact per tick
    pub rate: f64,
    /// What the grain becomes
    pub into: MaterialKind,
}

/// Definition of a material's properties
#[derive(Clone, Debug)]
pub struct MaterialDef {
    pub kind: MaterialKind,
    pub name: &'static str,
    pub material_type: MaterialType,

    /// Per-instance color is rolled from these ranges at spawn time
    pub color: [ColorChannel; 3],

    /// Higher sinks below lower; `GAS_DENSITY` rises
    pub density: i8,
    /// Equal-density liquids may trade places within a row
    pub is_liquid: bool,

    /// Ignition by an adjacent fire source
    pub burns: Option<Transition>,
    /// Melting by an adjacent heat source
    pub melts: Option<Transition>,
    /// Chance of being dissolved by an adjacent corrosive (0 = immune)
    pub corrodability: f64,
}

impl MaterialDef {
    pub fn rises(&self) -> bool {
        self.density == GAS_DENSITY
    }

    pub fn flammability(&self) -> f64 {
        self.burns.map_or(0.0, |t| t.rate)
    }

    pub fn meltability(&self) -> f64 {
        self.melts.map_or(0.0, |t| t.rate)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaterialError {
    #[error("unknown material `{0}`")]
    UnknownMaterial(String),
}

use ColorChannel::{Fixed, Range};
use MaterialKind as K;

const fn burns_into_fire(rate: f64) -> Option<Transition> {
    Some(Transition {
        rate,
        into: K::Fire,
    })
}

const fn melts_into_water(rate: f64) -> Option<Transition> {
    Some(Transition {
        rate,
        into: K::Water,
    })
}

const fn def(
    kind: MaterialKind,
    name: &'static str,
    material_type: MaterialType,
    color: [ColorChannel; 3],
    density: i8,
    is_liquid: bool,
) -> MaterialDef {
    MaterialDef {
        kind,
        name,
        material_type,
        color,
        density,
        is_liquid,
        burns: None,
        melts: None,
        corrodability: 0.0,
    }
}

// Indexed by `MaterialKind as usize`; order must follow the enum.
static MATERIALS: [MaterialDef; 18] = [
    def(
        K::Sand,
        "sand",
        MaterialType::Powder,
        [Fixed(153), Fixed(68), Fixed(0)],
        5,
        false,
    ),
    def(
        K::FineSand,
        "fine_sand",
        MaterialType::Powder,
        [Range(180, 220), Range(160, 200), Range(0, 20)],
        5,
        false,
    ),
    def(
        K::Water,
        "water",
        MaterialType::Liquid,
        [Fixed(0), Fixed(0), Fixed(120)],
        2,
        true,
    ),
    def(
        K::Oil,
        "oil",
        MaterialType::Liquid,
        [Fixed(255), Fixed(255), Fixed(0)],
        1,
        true,
    ),
    MaterialDef {
        burns: burns_into_fire(0.02),
        corrodability: 0.05,
        ..def(
            K::Wood,
            "wood",
            MaterialType::Solid,
            [Range(50, 70), Range(20, 40), Fixed(0)],
            7,
            false,
        )
    },
    def(
        K::Fire,
        "fire",
        MaterialType::Gas,
        [Range(210, 255), Range(0, 125), Fixed(0)],
        0,
        true,
    ),
    def(
        K::Smoke,
        "smoke",
        MaterialType::Gas,
        [Range(30, 40), Range(30, 40), Range(30, 40)],
        GAS_DENSITY,
        true,
    ),
    def(
        K::Steam,
        "steam",
        MaterialType::Gas,
        [Range(110, 130), Range(110, 130), Range(130, 150)],
        GAS_DENSITY,
        true,
    ),
    MaterialDef {
        melts: melts_into_water(0.03),
        ..def(
            K::Ice,
            "ice",
            MaterialType::Solid,
            [Range(205, 225), Range(205, 225), Fixed(255)],
            5,
            false,
        )
    },
    MaterialDef {
        melts: melts_into_water(0.1),
        corrodability: 0.1,
        ..def(
            K::Snow,
            "snow",
            MaterialType::Powder,
            [Range(235, 255), Range(235, 255), Fixed(255)],
            5,
            false,
        )
    },
    def(
        K::Lava,
        "lava",
        MaterialType::Liquid,
        [Range(110, 155), Range(0, 65), Fixed(0)],
        3,
        true,
    ),
    MaterialDef {
        corrodability: 0.002,
        ..def(
            K::Stone,
            "stone",
            MaterialType::Powder,
            [Range(60, 90), Range(60, 90), Range(60, 90)],
            5,
            false,
        )
    },
    MaterialDef {
        corrodability: 0.002,
        ..def(
            K::Rock,
            "rock",
            MaterialType::Solid,
            [Range(60, 70), Range(60, 70), Range(60, 70)],
            7,
            false,
        )
    },
    MaterialDef {
        corrodability: 0.001,
        ..def(
            K::Brick,
            "brick",
            MaterialType::Powder,
            [Range(40, 60), Fixed(0), Range(0, 10)],
            5,
            false,
        )
    },
    MaterialDef {
        burns: burns_into_fire(0.20),
        ..def(
            K::Gunpowder,
            "gunpowder",
            MaterialType::Powder,
            [Range(30, 40), Range(30, 40), Range(30, 40)],
            5,
            false,
        )
    },
    MaterialDef {
        burns: burns_into_fire(0.75),
        corrodability: 0.1,
        ..def(
            K::Fuse,
            "fuse",
            MaterialType::Solid,
            [Range(120, 140), Range(120, 140), Fixed(0)],
            7,
            false,
        )
    },
    def(
        K::Acid,
        "acid",
        MaterialType::Liquid,
        [Range(80, 100), Range(200, 220), Fixed(0)],
        2,
        true,
    ),
    def(
        K::Void,
        "void",
        MaterialType::Solid,
        [Range(80, 100), Fixed(0), Range(40, 50)],
        7,
        false,
    ),
];

impl MaterialKind {
    pub const ALL: [MaterialKind; 18] = [
        K::Sand,
        K::FineSand,
        K::Water,
        K::Oil,
        K::Wood,
        K::Fire,
        K::Smoke,
        K::Steam,
        K::Ice,
        K::Snow,
        K::Lava,
        K::Stone,
        K::Rock,
        K::Brick,
        K::Gunpowder,
        K::Fuse,
        K::Acid,
        K::Void,
    ];

    /// Rule table row for this material
    #[inline]
    pub fn def(self) -> &'static MaterialDef {
        &MATERIALS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaterialKind {
    type Err = MaterialError;

    /// Case-insensitive; `_`, `-` and spaces are ignored (`fine-sand` == `FineSand`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        MaterialKind::ALL
            .into_iter()
            .find(|kind| normalize(kind.name()) == wanted)
            .ok_or_else(|| MaterialError::UnknownMaterial(s.to_string()))
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
