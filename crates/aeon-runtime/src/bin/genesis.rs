//! genesis - synthesize a universe from a seed and print it

use std::path::PathBuf;
use std::process::ExitCode;

use aeon_core::{AeonError, AeonResult};
use aeon_runtime::{init_logging, Universe, UniverseConfig};
use aeon_synthesis::Seed;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "genesis")]
#[command(about = "Synthesize a universe from a seed, then tick it forward")]
struct Cli {
    /// Seed: a number, or any phrase
    #[arg(long)]
    seed: Option<String>,

    /// Ticks to run after synthesis
    #[arg(long, default_value = "0")]
    ticks: u64,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Log filter directive, e.g. "debug" or "aeon_broker=trace"
    #[arg(long)]
    log_level: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> AeonResult<UniverseConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| AeonError::Config(format!("{}: {e}", path.display())))?;
            UniverseConfig::from_json_str(&text)?
        }
        None => UniverseConfig::default(),
    };
    if let Some(seed) = &cli.seed {
        config.seed = Seed::parse(seed);
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    Ok(config)
}

async fn run(cli: Cli) -> AeonResult<()> {
    let config = load_config(&cli)?;
    init_logging(&config.logging)?;

    let mut universe = Universe::new(config);
    universe.genesis().await?;
    universe.run(cli.ticks).await?;

    let snapshot = universe.snapshot();
    if cli.json {
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| AeonError::Serialization(e.to_string()))?;
        println!("{json}");
        return Ok(());
    }

    println!("seed        {}", snapshot.seed.value());
    println!("complexity  {}", snapshot.complexity);
    println!("time        {}", snapshot.state.t);
    println!("stars       {} (+{} from clouds)", snapshot.state.stars.len(), snapshot.stats.stars_formed);
    println!("planets     {}", snapshot.state.planets.len());
    println!("species     {}", snapshot.state.species.len());
    println!("activity    {:.1}", snapshot.state.activity_level());
    println!();
    for event in &snapshot.state.events {
        println!("  {:>12}  {}", event.at.to_string(), event.label);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("genesis: {e}");
            ExitCode::FAILURE
        }
    }
}
