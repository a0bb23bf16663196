//! Setup actions applied to the grid before the first frame

use anyhow::{Result, ensure};
use glam::IVec2;
use grainbox_core::materials::{Grain, GrainRng, MaterialKind};
use grainbox_core::tools::{EraseTool, PenTool, Tool};
use grainbox_core::world::Grid;
use serde::{Deserialize, Serialize};

use super::verification::Region;

fn default_brush() -> u32 {
    1
}

/// Grid edits a scenario performs during setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScenarioAction {
    /// Fill every cell of a region
    Fill { material: MaterialKind, region: Region },

    /// Round brush stroke at one point
    Paint {
        material: MaterialKind,
        at: IVec2,
        #[serde(default = "default_brush")]
        brush_size: u32,
    },

    /// Clear a round brush area
    Erase {
        at: IVec2,
        #[serde(default = "default_brush")]
        brush_size: u32,
    },

    /// Brush dragged along a straight line, both ends included
    Line {
        material: MaterialKind,
        from: IVec2,
        to: IVec2,
        #[serde(default = "default_brush")]
        brush_size: u32,
    },

    /// A single grain; the cell must be inside the grid
    Place { material: MaterialKind, at: IVec2 },
}

impl ScenarioAction {
    /// Apply the action; returns a short description for the run log
    pub fn apply(&self, grid: &mut Grid, rng: &mut dyn GrainRng) -> Result<String> {
        match self {
            ScenarioAction::Fill { material, region } => {
                let cells = region.cells(grid);
                for cell in &cells {
                    grid.put(cell.x, cell.y, Some(Grain::spawn(*material, rng)));
                }
                Ok(format!("Fill {material} x{}", cells.len()))
            }

            ScenarioAction::Paint {
                material,
                at,
                brush_size,
            } => {
                PenTool::new(*material).apply(grid, *at, *brush_size, rng);
                Ok(format!("Paint {material} at {at}"))
            }

            ScenarioAction::Erase { at, brush_size } => {
                EraseTool.apply(grid, *at, *brush_size, rng);
                Ok(format!("Erase at {at}"))
            }

            ScenarioAction::Line {
                material,
                from,
                to,
                brush_size,
            } => {
                PenTool::new(*material).stroke(grid, *from, *to, *brush_size, rng);
                Ok(format!("Line {material} {from} -> {to}"))
            }

            ScenarioAction::Place { material, at } => {
                ensure!(
                    grid.in_range(at.x, at.y),
                    "Place {material} at {at}: outside the {}x{} grid",
                    grid.width(),
                    grid.height()
                );
                grid.put(at.x, at.y, Some(Grain::spawn(*material, rng)));
                Ok(format!("Place {material} at {at}"))
            }
        }
    }
}
