use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::SubscriberBuilder;

use polyvault::config::FileConfig;
use polyvault::service::{Outcome, PolygonService, Request, handle, validate_request};
use polyvault::store::JsonFileStore;

/// Validate and store hand-drawn polygons
///
/// Examples:
///   # Check a point list without storing it
///   polyvault validate shape.json
///
///   # Store a polygon read from stdin
///   echo '[{"x":0,"y":0},{"x":90,"y":0},{"x":50,"y":80}]' | polyvault create -n Roof -p -
///
///   # Load the sample shapes into a scratch store
///   polyvault --store /tmp/polygons.json seed
#[derive(Parser, Debug)]
#[command(name = "polyvault")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches polyvault.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the JSON polygon store
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a JSON point list (file path or - for stdin) without storing it
    Validate { points: PathBuf },
    #[command(flatten)]
    Store(StoreCommand),
}

#[derive(Subcommand, Debug)]
enum StoreCommand {
    /// Validate and store a new polygon
    Create {
        #[arg(short = 'n', long)]
        name: String,
        /// JSON point list (file path or - for stdin)
        #[arg(short = 'p', long)]
        points: PathBuf,
    },
    /// List stored polygons, newest first
    List,
    /// Show one polygon
    Get { id: String },
    /// Delete one polygon
    Delete { id: String },
    /// Show aggregate figures over every stored polygon
    Stats,
    /// Replace the store contents with sample shapes
    Seed,
}

impl StoreCommand {
    fn into_request(self) -> Result<Request> {
        Ok(match self {
            StoreCommand::Create { name, points } => Request::Create {
                name,
                points: read_input(&points)?,
            },
            StoreCommand::List => Request::List,
            StoreCommand::Get { id } => Request::Get { id },
            StoreCommand::Delete { id } => Request::Delete { id },
            StoreCommand::Stats => Request::Stats,
            StoreCommand::Seed => Request::Seed,
        })
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let file_config = match args.config {
        Some(ref path) => FileConfig::from_path(path)?,
        None => FileConfig::load().unwrap_or_default(),
    };

    init_logging(args.verbose || file_config.verbose);

    let limits = file_config.limits;
    let store_path = args.store.clone().unwrap_or_else(|| file_config.store_path());

    let outcome = match args.command {
        Command::Validate { ref points } => {
            validate_request(&read_input(points)?, &limits).context("Failed to build response")?
        }
        Command::Store(command) => {
            let request = command.into_request()?;
            let store = JsonFileStore::open(&store_path).with_context(|| {
                format!("Failed to open polygon store: {}", store_path.display())
            })?;
            let mut service = PolygonService::with_limits(store, limits);
            handle(&mut service, request).context("Failed to build response")?
        }
    };

    print_outcome(&outcome)?;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_outcome(outcome: &Outcome) -> Result<()> {
    let text =
        serde_json::to_string_pretty(&outcome.body).context("Failed to serialize response")?;
    println!("{}", text);
    Ok(())
}

/// Read a file, or stdin when the path is `-`
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read points from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read points file: {}", path.display()))
    }
}
