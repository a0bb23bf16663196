//! Built-in demo: a wooden shelf and ramp under a rain of sand, water and oil

use glam::IVec2;
use grainbox_core::materials::MaterialKind;
use grainbox_core::tools::Emitter;

use crate::scenario::{Region, ScenarioAction, ScenarioDefinition, VerificationCondition};

const WIDTH: usize = 300;
const HEIGHT: usize = 200;

fn wood_line(from: (i32, i32), to: (i32, i32)) -> ScenarioAction {
    ScenarioAction::Line {
        material: MaterialKind::Wood,
        from: IVec2::new(from.0, from.1),
        to: IVec2::new(to.0, to.1),
        brush_size: 1,
    }
}

/// The scenario run when no scenario file is given
pub fn demo_scenario() -> ScenarioDefinition {
    let rain = |kind, rate| Emitter::new(kind, rate, 0, 100, 200);

    ScenarioDefinition {
        name: "Demo".to_string(),
        description: "Sand, water and oil rain onto a shelf and slide down a ramp".to_string(),
        width: Some(WIDTH),
        height: Some(HEIGHT),
        seed: None,
        frames: None,
        setup: vec![
            wood_line((120, 50), (179, 50)),
            wood_line((180, 130), (219, 169)),
            wood_line((180, 131), (219, 170)),
        ],
        emitters: vec![
            rain(MaterialKind::Sand, 2),
            rain(MaterialKind::Water, 2),
            rain(MaterialKind::Oil, 1),
        ],
        verify: vec![
            // Nothing in the demo burns or corrodes
            VerificationCondition::Conserved {
                material: Some(MaterialKind::Wood),
            },
            VerificationCondition::MaterialAt {
                at: IVec2::new(150, 50),
                expected: Some(MaterialKind::Wood),
            },
            VerificationCondition::MaterialCountRange {
                material: MaterialKind::Sand,
                region: Region::Whole,
                min: 1,
                max: WIDTH * HEIGHT,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{RunSettings, ScenarioExecutor};

    #[test]
    fn test_demo_setup_builds_structures() {
        let settings = RunSettings {
            frames_override: Some(0),
            ..RunSettings::default()
        };
        let mut executor = ScenarioExecutor::new(settings);
        let (world, _) = executor.execute_scenario(&demo_scenario()).unwrap();
        assert_eq!(world.grid().count(MaterialKind::Wood), 140);
    }

    #[test]
    fn test_demo_passes_short_run() {
        let settings = RunSettings {
            frames_override: Some(60),
            ..RunSettings::default()
        };
        let mut executor = ScenarioExecutor::new(settings);
        let (_, results) = executor.execute_scenario(&demo_scenario()).unwrap();
        assert!(results.passed, "{:#?}", results.verifications);
        assert!(results.population.contains_key("oil"));
    }
}
