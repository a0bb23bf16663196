use anyhow::bail;
use clap::Parser;
use grainbox::config::AppConfig;
use grainbox::demo::demo_scenario;
use grainbox::materials::MaterialKind;
use grainbox::scenario::{RunSettings, ScenarioDefinition, ScenarioExecutor};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file to run (RON); runs the built-in demo when omitted
    scenario: Option<PathBuf>,

    /// Number of frames to simulate (overrides scenario and config)
    #[arg(long)]
    frames: Option<u64>,

    /// Random seed (overrides scenario and config)
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory for captures and the run report
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip PNG captures
    #[arg(long)]
    no_capture: bool,

    /// List materials and their properties
    #[arg(long)]
    list_materials: bool,

    /// Write the built-in demo scenario to a RON file and exit
    #[arg(long)]
    export_demo: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    // Handle --list-materials flag
    if args.list_materials {
        list_materials();
        return Ok(());
    }

    // Handle --export-demo flag
    if let Some(path) = &args.export_demo {
        demo_scenario().to_file(path)?;
        log::info!("Demo scenario written to {}", path.display());
        return Ok(());
    }

    let config = AppConfig::load()?;
    let mut settings = RunSettings::from_config(&config);
    settings.seed_override = args.seed;
    settings.frames_override = args.frames;
    if let Some(output) = &args.output {
        settings.output_dir = Some(output.clone());
    }
    let report_dir = settings.output_dir.clone();
    if args.no_capture {
        settings.output_dir = None;
    }

    let scenario = match &args.scenario {
        Some(path) => ScenarioDefinition::from_file(path)?,
        None => demo_scenario(),
    };

    log::info!("Starting Grainbox");
    let mut executor = ScenarioExecutor::new(settings);
    let (_, results) = executor.execute_scenario(&scenario)?;

    if let Some(dir) = report_dir {
        let path = dir.join("report.json");
        results.save_json(&path)?;
        log::info!("Report written to {}", path.display());
    }

    if !results.passed {
        for failure in results.failures() {
            log::error!("{}", failure.message);
        }
        bail!("Scenario '{}' failed verification", scenario.name);
    }

    Ok(())
}

fn list_materials() {
    println!(
        "{:<10} {:<7} {:>7} {:>6} {:>7} {:>6} {:>8}",
        "name", "type", "density", "liquid", "burns", "melts", "corrodes"
    );
    for kind in MaterialKind::ALL {
        let def = kind.def();
        println!(
            "{:<10} {:<7} {:>7} {:>6} {:>7} {:>6} {:>8}",
            def.name,
            format!("{:?}", def.material_type),
            def.density,
            if def.is_liquid { "yes" } else { "no" },
            def.flammability(),
            def.meltability(),
            def.corrodability
        );
    }
}
