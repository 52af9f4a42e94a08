use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hybrid_router::route::BatchRouteView;
use hybrid_router::{EngineConfig, GeoPoint, Profile, RouteRequest, RoutingEngine};

/// Compute road-like routes with provider fallback and local synthesis
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON engine configuration (providers, cache size, synthesizer)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip all external providers and synthesize every route locally
    #[arg(long, global = true)]
    offline: bool,

    /// Fixed seed for synthesized paths
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print provider and cache statistics to stderr when done
    #[arg(long, global = true)]
    stats: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a single route and print it as JSON
    Route {
        /// Start point as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        from: GeoPoint,

        /// End point as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        to: GeoPoint,

        /// drive, bicycle or walk
        #[arg(long, default_value = "drive")]
        profile: Profile,

        /// Print only the encoded polyline of the path
        #[arg(long)]
        polyline: bool,
    },
    /// Compute every request in a JSON array file
    Batch {
        file: PathBuf,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    }
    .with_env_overrides();
    if cli.offline {
        config.providers.clear();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let engine = RoutingEngine::from_config(&config)?;

    match cli.command {
        Command::Route {
            from,
            to,
            profile,
            polyline,
        } => {
            let route = engine.compute_route(from, to, profile)?;
            tracing::info!(
                method = %route.method,
                source = %route.source,
                "{:.0} m, {:.0} s over {} points",
                route.distance_meters,
                route.duration_seconds,
                route.coordinates.len()
            );
            if polyline {
                println!("{}", route.polyline());
            } else {
                println!("{}", serde_json::to_string_pretty(&route)?);
            }
        }
        Command::Batch { file } => {
            let data = fs::read_to_string(&file)?;
            let requests: Vec<RouteRequest> = serde_json::from_str(&data)?;
            tracing::info!("computing {} routes from {}", requests.len(), file.display());
            let results = engine.compute_routes(&requests);
            let views: Vec<BatchRouteView> = results.iter().map(BatchRouteView::from).collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
    }

    if cli.stats {
        eprintln!("{}", serde_json::to_string_pretty(&engine.stats())?);
    }
    Ok(())
}
