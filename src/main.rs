//! Command line tool for inspecting and driving predator/prey worlds

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ecosystem_grid::{
    config::{CliOverrides, OutputFormat, Settings},
    simulation::{HoldRule, Simulation},
    utils::{init_logging, ColorOutput, WorldFormatter},
    world::{create_example_worlds, load_world_from_file, save_world_to_file, worlds_equal},
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ecosystem_grid")]
#[command(about = "Predator/prey grid world tools")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config/default.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a world file
    Show {
        /// World file (overrides config)
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Check whether two world files hold the same world
    Compare {
        left: PathBuf,
        right: PathBuf,

        /// Print both worlds next to each other
        #[arg(long)]
        show: bool,
    },

    /// Advance a world through its generations, keeping every occupant in place
    Run {
        /// World file (overrides config)
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// Number of generations (overrides the world file)
        #[arg(short, long)]
        generations: Option<u32>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write the final world to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create example configuration and world files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    init_logging(&settings.logging.filter)?;

    match cli.command {
        Commands::Show { world, format } => {
            let overrides = CliOverrides {
                world_file: world,
                format,
                ..Default::default()
            };
            show_command(settings, overrides)
        }
        Commands::Compare { left, right, show } => {
            if !compare_command(left, right, show)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Run { world, generations, format, output } => {
            let overrides = CliOverrides {
                world_file: world,
                format,
                output_file: output,
                generations,
            };
            run_command(settings, overrides)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn show_command(mut settings: Settings, overrides: CliOverrides) -> Result<()> {
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let world = load_world_from_file(&settings.input.world_file)?;
    print!("{}", WorldFormatter::format_world(&world, settings.output.format));

    Ok(())
}

fn compare_command(left: PathBuf, right: PathBuf, show: bool) -> Result<bool> {
    let left_world = load_world_from_file(&left)
        .with_context(|| format!("Failed to load {}", left.display()))?;
    let right_world = load_world_from_file(&right)
        .with_context(|| format!("Failed to load {}", right.display()))?;

    if show {
        println!("{}", WorldFormatter::format_side_by_side(&left_world, &right_world));
    }

    let equal = worlds_equal(Some(&left_world), Some(&right_world));
    if equal {
        println!("{}", ColorOutput::success("✅ Worlds are equal"));
    } else {
        println!("{}", ColorOutput::warning("❌ Worlds differ"));
    }

    Ok(equal)
}

fn run_command(mut settings: Settings, overrides: CliOverrides) -> Result<()> {
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let world = load_world_from_file(&settings.input.world_file)?;
    let mut simulation = Simulation::new(world, HoldRule);

    let start_time = Instant::now();
    let census = match settings.simulation.generations {
        Some(generations) => simulation.run_for(generations)?,
        None => simulation.run()?,
    };
    info!(
        "Ran {} generations in {:.3}s",
        simulation.generation(),
        start_time.elapsed().as_secs_f64()
    );

    let world = simulation.into_world();
    print!("{}", WorldFormatter::format_world(&world, settings.output.format));
    println!("{}", census);

    if let Some(ref output_file) = settings.output.output_file {
        save_world_to_file(&world, output_file)?;
        println!("{}", ColorOutput::success(&format!(
            "World saved to {}", output_file.display()
        )));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let worlds_dir = directory.join("input/worlds");
    for dir in [&config_dir, &worlds_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        warn!("Skipped existing {}", config_path.display());
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_worlds(&worlds_dir)
        .context("Failed to create example worlds")?;
    println!("Created example worlds in: {}", worlds_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    Ok(())
}
