//! Main CLI application for the fold hash inversion tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fold_hash_reverse::{
    config::{CliOverrides, Settings},
    fold_hash::FoldHash,
    reverse::InversionProblem,
    utils::{ColorOutput, PreimageFormatter},
};
use itertools::Itertools;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "fold_hash_reverse")]
#[command(about = "Bounded exhaustive inversion of fold hashes")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find every bounded-length preimage of the configured terminal state
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Terminal state to invert (overrides config)
        #[arg(short, long)]
        terminal: Option<i64>,

        /// Maximum preimage length in symbols (overrides config)
        #[arg(short, long)]
        max_length: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show the accumulator states of each preimage
        #[arg(long)]
        show_states: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Forward-hash a candidate string and compare it to the terminal state
    Verify {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Candidate input string
        #[arg(short, long)]
        input: String,

        /// Show the accumulator states of the candidate
        #[arg(long)]
        show_states: bool,
    },

    /// Estimate the size and feasibility of the configured search
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Terminal state to analyze (overrides config)
        #[arg(short, long)]
        terminal: Option<i64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            terminal,
            max_length,
            output,
            show_states,
            verbose,
        } => solve_command(config, terminal, max_length, output, show_states, verbose),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Verify {
            config,
            input,
            show_states,
        } => verify_command(config, input, show_states),
        Commands::Analyze { config, terminal } => analyze_command(config, terminal),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn solve_command(
    config_path: PathBuf,
    terminal: Option<i64>,
    max_length: Option<usize>,
    output_dir: Option<PathBuf>,
    show_states: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("🔄 Starting fold hash inversion"));

    let mut settings = load_settings(&config_path)?;

    // Apply CLI overrides
    let cli_overrides = CliOverrides {
        terminal_state: terminal,
        max_string_length: max_length,
        output_dir: output_dir.clone(),
    };
    settings.merge_with_cli(&cli_overrides);

    if verbose {
        println!("Configuration:");
        println!("  Terminal state: {}", settings.search.terminal_state);
        println!("  Initial state: {}", settings.search.initial_state);
        println!("  Max length: {}", settings.search.max_string_length);
        println!(
            "  Alphabet: {}",
            settings.hash.symbols.iter().map(|s| &s.token).join(", ")
        );
        println!();
    }

    settings
        .validate()
        .context("Configuration validation failed")?;

    let start_time = Instant::now();
    let problem =
        InversionProblem::new(settings.clone()).context("Failed to create inversion problem")?;

    if verbose {
        println!("{}", problem.estimate_search_size());
        println!();
    }

    println!(
        "{}",
        ColorOutput::info("🧮 Searching the reverse-transition tree...")
    );
    let (preimages, statistics) = problem
        .solve_with_statistics()
        .context("Failed to solve inversion problem")?;

    let total_time = start_time.elapsed();

    if preimages.is_empty() {
        println!("{}", ColorOutput::warning("❌ No preimages found"));
        if verbose {
            println!("\n{}", statistics);
        }
        return Ok(());
    }

    println!(
        "{}",
        ColorOutput::success(&format!(
            "✅ Found {} preimage(s) in {:.3}s",
            preimages.len(),
            total_time.as_secs_f64()
        ))
    );

    println!("\n{}", PreimageFormatter::format_summary(&preimages));

    if show_states || preimages.len() <= 3 {
        println!("{}", ColorOutput::info("Preimage Details:"));
        for preimage in &preimages {
            println!();
            println!("{}", PreimageFormatter::format_preimage(preimage, show_states));
        }
    }

    if settings.output.save_results {
        println!("{}", ColorOutput::info("💾 Saving preimages..."));
        PreimageFormatter::save_preimages(
            &preimages,
            &settings.output.output_directory,
            &settings.output.format,
        )
        .context("Failed to save preimages")?;

        println!(
            "{}",
            ColorOutput::success(&format!(
                "Preimages saved to {}",
                settings.output.output_directory.display()
            ))
        );
    }

    if verbose {
        println!("\n{}", statistics);
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    // Default configuration: the two-symbol toy hash with h("aaa") = 1205.
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // Colliding configuration: both symbols share a value, so every
    // length-2 string is a preimage of 80.
    let mut collision_config = Settings::default();
    collision_config.hash.symbols[1].value = 1;
    collision_config.search.terminal_state = 80;
    collision_config.search.max_string_length = 2;
    collision_config.to_file(&examples_dir.join("collision.yaml"))?;

    // Deeper search: h("aaaaa") = 271205.
    let mut deep_config = Settings::default();
    deep_config.search.terminal_state = 271_205;
    deep_config.search.max_string_length = 5;
    deep_config.to_file(&examples_dir.join("deep.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}

fn verify_command(config_path: PathBuf, input: String, show_states: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Verifying candidate..."));

    let settings = load_settings(&config_path)?;
    let hash = FoldHash::from_config(&settings.hash)
        .context("Failed to build fold hash from configuration")?;

    let states = hash
        .trajectory(&input, settings.search.initial_state)
        .with_context(|| format!("Failed to hash candidate \"{}\"", input))?;
    let digest = states.last().copied().unwrap_or(settings.search.initial_state);

    if show_states {
        println!("States: {}", states.iter().join(" -> "));
    }

    println!(
        "Digest of \"{}\": {} (terminal state: {})",
        input, digest, settings.search.terminal_state
    );

    if digest == settings.search.terminal_state {
        println!("{}", ColorOutput::success("✅ Candidate is a preimage"));
    } else {
        println!("{}", ColorOutput::error("❌ Candidate is not a preimage"));
    }

    Ok(())
}

fn analyze_command(config_path: PathBuf, terminal: Option<i64>) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing configured search..."));

    let mut settings = load_settings(&config_path)?;
    if let Some(terminal_state) = terminal {
        settings.search.terminal_state = terminal_state;
    }
    settings
        .validate()
        .context("Configuration validation failed")?;

    println!(
        "Hash: acc = (acc * {} + value) * {}",
        settings.hash.multiplier, settings.hash.scale
    );
    println!(
        "Alphabet: {}",
        settings
            .hash
            .symbols
            .iter()
            .map(|s| format!("{}={}", s.token, s.value))
            .join(", ")
    );
    println!(
        "Boundary states: terminal {}, initial {}",
        settings.search.terminal_state, settings.search.initial_state
    );

    let problem = InversionProblem::new(settings).context("Failed to create inversion problem")?;
    println!("\n{}", problem.estimate_search_size());

    Ok(())
}
