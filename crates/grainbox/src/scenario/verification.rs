//! Verification conditions and state checks for scenarios

use std::collections::BTreeMap;

use glam::IVec2;
use grainbox_core::materials::MaterialKind;
use grainbox_core::world::{Grid, NeighborQueries, PowderWorld};
use serde::{Deserialize, Serialize};

/// Conditions that can be verified against the final world state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VerificationCondition {
    /// Assert exact material count in region
    MaterialCount {
        material: MaterialKind,
        region: Region,
        expected: usize,
        #[serde(default)]
        tolerance: Option<usize>, // Allow ±N variance
    },

    /// Assert material count within an inclusive range
    MaterialCountRange {
        material: MaterialKind,
        region: Region,
        min: usize,
        max: usize,
    },

    /// Assert the cell content; `None` means empty
    MaterialAt {
        at: IVec2,
        expected: Option<MaterialKind>,
    },

    /// Assert no grain in region
    RegionEmpty { region: Region },

    /// Assert the grain count is unchanged since setup finished
    ///
    /// With a material, only that material is compared; without, the total.
    Conserved {
        #[serde(default)]
        material: Option<MaterialKind>,
    },
}

/// Spatial region for verification and fills
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Region {
    /// Rectangular region, bounds inclusive
    Rect {
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
    },

    /// Circular region
    Circle { center: IVec2, radius: u32 },

    /// Entire grid
    Whole,
}

impl Region {
    /// Cells of the region that lie inside the grid
    pub fn cells(&self, grid: &Grid) -> Vec<IVec2> {
        match *self {
            Region::Rect {
                min_x,
                min_y,
                max_x,
                max_y,
            } => {
                let mut cells = Vec::new();
                for y in min_y..=max_y {
                    for x in min_x..=max_x {
                        if grid.in_range(x, y) {
                            cells.push(IVec2::new(x, y));
                        }
                    }
                }
                cells
            }
            Region::Circle { center, radius } => {
                NeighborQueries::cells_in_radius(grid, center.x, center.y, radius as i32)
                    .into_iter()
                    .map(|(x, y)| IVec2::new(x, y))
                    .collect()
            }
            Region::Whole => {
                let (w, h) = (grid.width() as i32, grid.height() as i32);
                (0..h)
                    .flat_map(|y| (0..w).map(move |x| IVec2::new(x, y)))
                    .collect()
            }
        }
    }
}

/// Result of a verification check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub passed: bool,
    pub message: String,
    pub actual_value: Option<String>, // For debugging
}

impl VerificationCondition {
    /// Evaluate condition against world state
    ///
    /// `baseline` is the population recorded right after setup.
    pub fn evaluate(
        &self,
        world: &PowderWorld,
        baseline: &BTreeMap<MaterialKind, usize>,
    ) -> VerificationResult {
        let grid = world.grid();
        match self {
            VerificationCondition::MaterialCount {
                material,
                region,
                expected,
                tolerance,
            } => {
                let actual = count_material_in_region(grid, *material, region);
                let tol = tolerance.unwrap_or(0);
                let passed = actual >= expected.saturating_sub(tol) && actual <= expected + tol;

                VerificationResult {
                    passed,
                    message: format!(
                        "{material} count in {region:?}: expected {expected}±{tol}, got {actual}"
                    ),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::MaterialCountRange {
                material,
                region,
                min,
                max,
            } => {
                let actual = count_material_in_region(grid, *material, region);
                let passed = actual >= *min && actual <= *max;

                VerificationResult {
                    passed,
                    message: format!(
                        "{material} count in {region:?}: expected {min}-{max}, got {actual}"
                    ),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::MaterialAt { at, expected } => {
                let actual = grid.safe_get(at.x, at.y, None).map(|g| g.kind);
                let passed = actual == *expected;

                VerificationResult {
                    passed,
                    message: format!(
                        "Material at {at}: expected {}, got {}",
                        describe(*expected),
                        describe(actual)
                    ),
                    actual_value: Some(describe(actual)),
                }
            }

            VerificationCondition::RegionEmpty { region } => {
                let occupied = region
                    .cells(grid)
                    .iter()
                    .filter(|c| grid.get(c.x, c.y).is_some())
                    .count();

                VerificationResult {
                    passed: occupied == 0,
                    message: format!("{region:?} empty: {occupied} occupied cells"),
                    actual_value: Some(occupied.to_string()),
                }
            }

            VerificationCondition::Conserved { material } => {
                let (before, after) = match material {
                    Some(kind) => (
                        baseline.get(kind).copied().unwrap_or(0),
                        grid.count(*kind),
                    ),
                    None => (baseline.values().sum(), grid.occupied()),
                };
                let label = material.map_or("grain".to_string(), |k| k.to_string());

                VerificationResult {
                    passed: before == after,
                    message: format!("{label} count conserved: {before} -> {after}"),
                    actual_value: Some(after.to_string()),
                }
            }
        }
    }
}

fn describe(kind: Option<MaterialKind>) -> String {
    kind.map_or_else(|| "empty".to_string(), |k| k.to_string())
}

fn count_material_in_region(grid: &Grid, material: MaterialKind, region: &Region) -> usize {
    region
        .cells(grid)
        .iter()
        .filter(|c| grid.get(c.x, c.y).is_some_and(|g| g.kind == material))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grainbox_core::materials::Grain;

    fn world_with(cells: &[(i32, i32, MaterialKind)]) -> PowderWorld {
        let mut world = PowderWorld::new(10, 10);
        for &(x, y, kind) in cells {
            world
                .grid_mut()
                .put(x, y, Some(Grain::with_color(kind, [0; 3])));
        }
        world
    }

    #[test]
    fn test_region_cells_clipped() {
        let grid = Grid::new(10, 10);
        let rect = Region::Rect {
            min_x: -2,
            min_y: 8,
            max_x: 1,
            max_y: 12,
        };
        assert_eq!(rect.cells(&grid).len(), 4);
        assert_eq!(Region::Whole.cells(&grid).len(), 100);
        let circle = Region::Circle {
            center: IVec2::new(5, 5),
            radius: 1,
        };
        assert_eq!(circle.cells(&grid).len(), 5);
    }

    #[test]
    fn test_material_count_with_tolerance() {
        let world = world_with(&[
            (0, 9, MaterialKind::Sand),
            (1, 9, MaterialKind::Sand),
            (2, 9, MaterialKind::Water),
        ]);
        let baseline = world.population();

        let exact = VerificationCondition::MaterialCount {
            material: MaterialKind::Sand,
            region: Region::Whole,
            expected: 3,
            tolerance: None,
        };
        assert!(!exact.evaluate(&world, &baseline).passed);

        let loose = VerificationCondition::MaterialCount {
            material: MaterialKind::Sand,
            region: Region::Whole,
            expected: 3,
            tolerance: Some(1),
        };
        assert!(loose.evaluate(&world, &baseline).passed);
    }

    #[test]
    fn test_material_at_and_region_empty() {
        let world = world_with(&[(4, 4, MaterialKind::Oil)]);
        let baseline = world.population();

        let at = VerificationCondition::MaterialAt {
            at: IVec2::new(4, 4),
            expected: Some(MaterialKind::Oil),
        };
        assert!(at.evaluate(&world, &baseline).passed);

        let empty_at = VerificationCondition::MaterialAt {
            at: IVec2::new(4, 5),
            expected: None,
        };
        assert!(empty_at.evaluate(&world, &baseline).passed);

        let top = VerificationCondition::RegionEmpty {
            region: Region::Rect {
                min_x: 0,
                min_y: 0,
                max_x: 9,
                max_y: 3,
            },
        };
        assert!(top.evaluate(&world, &baseline).passed);

        let result = VerificationCondition::RegionEmpty {
            region: Region::Whole,
        }
        .evaluate(&world, &baseline);
        assert!(!result.passed);
        assert_eq!(result.actual_value.as_deref(), Some("1"));
    }

    #[test]
    fn test_conserved() {
        let mut world = world_with(&[(1, 1, MaterialKind::Water), (2, 2, MaterialKind::Sand)]);
        let baseline = world.population();
        let total = VerificationCondition::Conserved { material: None };
        let water = VerificationCondition::Conserved {
            material: Some(MaterialKind::Water),
        };
        assert!(total.evaluate(&world, &baseline).passed);

        world.grid_mut().put(2, 2, None);
        assert!(!total.evaluate(&world, &baseline).passed);
        assert!(water.evaluate(&world, &baseline).passed);
    }

    #[test]
    fn test_condition_ron_syntax() {
        let condition: VerificationCondition =
            ron::from_str("MaterialAt(at: (1, 2), expected: Some(Water))").unwrap();
        assert_eq!(
            condition,
            VerificationCondition::MaterialAt {
                at: IVec2::new(1, 2),
                expected: Some(MaterialKind::Water),
            }
        );
    }
}
