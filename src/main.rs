//! Command line interface for the maze BMC encoder

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use maze_bmc::{
    config::{CliOverrides, OutputFormat, Settings},
    maze::{create_example_mazes, load_maze_from_file},
    reachability::{decode_solver_model, MazeProblem, PathValidator},
    sat::dimacs::load_solver_output,
    utils::{ColorOutput, PathFormatter},
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maze_bmc")]
#[command(about = "Encode maze reachability as SAT and decode solver models")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a maze as a DIMACS CNF formula
    Encode {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Maze file (overrides config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Number of moves (overrides config)
        #[arg(short, long)]
        step: Option<usize>,

        /// Write DIMACS to this file instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Describe the variable layout in DIMACS comment lines
        #[arg(long)]
        comments: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decode a solver model into a path
    Decode {
        /// Solver output file
        #[arg(short, long)]
        input: PathBuf,

        /// Side of the maze
        #[arg(short, long)]
        dim: usize,

        /// Number of moves the formula was encoded with; auxiliary
        /// variables past the position blocks are then ignored
        #[arg(short, long)]
        steps: Option<usize>,

        /// Maze file to validate the decoded path against
        #[arg(short, long)]
        maze: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Save the path to this file as well
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show maze and encoding statistics without writing a formula
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Maze file (overrides config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Number of moves (overrides config)
        #[arg(short, long)]
        step: Option<usize>,
    },

    /// Create example configuration and maze files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            config,
            input,
            step,
            output,
            comments,
            verbose,
        } => {
            init_tracing(verbose);
            let overrides = CliOverrides {
                steps: step,
                maze_file: input,
                dimacs_file: output,
                format: None,
                comments,
            };
            encode_command(&config, &overrides, verbose)
        }
        Commands::Decode {
            input,
            dim,
            steps,
            maze,
            format,
            output,
            verbose,
        } => {
            init_tracing(verbose);
            decode_command(&input, dim, steps, maze.as_deref(), format, output.as_deref())
        }
        Commands::Analyze { config, input, step } => {
            init_tracing(false);
            let overrides = CliOverrides {
                steps: step,
                maze_file: input,
                ..Default::default()
            };
            analyze_command(&config, &overrides)
        }
        Commands::Setup { directory, force } => {
            init_tracing(false);
            setup_command(&directory, force)
        }
    }
}

fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    let (mut settings, found) = Settings::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if !found {
        eprintln!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
    }

    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn encode_command(config_path: &Path, overrides: &CliOverrides, verbose: bool) -> Result<()> {
    let settings = load_settings(config_path, overrides)?;

    if verbose {
        eprintln!("Configuration:");
        eprintln!("  Maze file: {}", settings.input.maze_file.display());
        eprintln!("  Steps: {}", settings.encoding.steps);
        match settings.output.dimacs_file {
            Some(ref file) => eprintln!("  Output: {}", file.display()),
            None => eprintln!("  Output: stdout"),
        }
    }

    let problem = MazeProblem::new(settings).context("Failed to create maze problem")?;
    let stats = problem.write_output()?;

    if verbose {
        eprintln!("\n{}", stats);
    }
    if problem.settings().output.dimacs_file.is_some() {
        eprintln!(
            "{}",
            ColorOutput::success(&format!(
                "Wrote {} variables and {} clauses",
                stats.total_variables, stats.total_clauses
            ))
        );
    }

    Ok(())
}

fn decode_command(
    input: &Path,
    dim: usize,
    steps: Option<usize>,
    maze_path: Option<&Path>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let model = load_solver_output(input)?;
    let path = decode_solver_model(&model, dim, steps)?;

    let maze = maze_path
        .map(|p| load_maze_from_file(p).with_context(|| format!("Failed to load maze {}", p.display())))
        .transpose()?;

    println!("{}", PathFormatter::format(&path, format, maze.as_ref())?);

    if let Some(ref maze) = maze {
        let validation = PathValidator::new(maze).validate(&path);
        if validation.is_valid {
            eprintln!("{}", ColorOutput::success("Path is valid"));
        } else {
            eprintln!("{}", ColorOutput::error(&validation.to_string()));
        }
    }

    if let Some(file) = output {
        PathFormatter::save_path(&path, file, format, maze.as_ref())?;
        eprintln!("{}", ColorOutput::info(&format!("Path saved to {}", file.display())));
    }

    Ok(())
}

fn analyze_command(config_path: &Path, overrides: &CliOverrides) -> Result<()> {
    let settings = load_settings(config_path, overrides)?;
    let problem = MazeProblem::new(settings).context("Failed to create maze problem")?;
    let maze = problem.maze();

    println!("Maze ({}x{}):", maze.size, maze.size);
    println!("{}", maze);
    println!(
        "Free cells: {} of {} ({:.1}%)",
        maze.free_count(),
        maze.cell_count(),
        maze.free_count() as f64 / maze.cell_count() as f64 * 100.0
    );
    println!();
    println!("{}", problem.encoding_statistics()?);

    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    eprintln!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/mazes");

    for dir in [&config_dir, &input_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        eprintln!("Created: {}", config_path.display());
    } else {
        eprintln!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_mazes(&input_dir).context("Failed to create example mazes")?;
    eprintln!("Created example mazes in: {}", input_dir.display());

    let examples_dir = config_dir.join("examples");
    let mut open_config = Settings::default();
    open_config.encoding.steps = 2;
    open_config.input.maze_file = PathBuf::from("input/mazes/open.txt");
    open_config.to_file(&examples_dir.join("open.yaml"))?;

    let mut detour_config = Settings::default();
    detour_config.encoding.steps = 12;
    detour_config.input.maze_file = PathBuf::from("input/mazes/detour.txt");
    detour_config.output.comments = true;
    detour_config.to_file(&examples_dir.join("detour.yaml"))?;

    eprintln!("\n{}", ColorOutput::success("Setup complete!"));
    eprintln!("\nNext steps:");
    eprintln!("1. Run: maze_bmc encode --config config/default.yaml -o maze.cnf");
    eprintln!("2. Solve maze.cnf with any DIMACS SAT solver, saving its output");
    eprintln!("3. Run: maze_bmc decode -i solver.out -d 4 -s 6");

    Ok(())
}
