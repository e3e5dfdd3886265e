//! One-shot routable point resolution.
//!
//! Reads a `{ "point", "feature", "routable_override" }` request as JSON and
//! prints the resolved routable points.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use routable::config::Config;
use routable::RoutableRequest;

#[derive(Parser, Debug)]
#[command(name = "resolve")]
#[command(about = "Resolve routable points for a matched address feature")]
struct Args {
    /// Request JSON file (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Decimal places for projected coordinates (0-15)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=15))]
    precision: Option<u32>,

    /// Print the feature with the result under `routable_points`
    #[arg(long)]
    attach: bool,

    /// Indent JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays parseable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load_or_default(args.config.as_ref())?;
    let mut options = config.resolver;
    if let Some(precision) = args.precision {
        options.precision = precision;
    }

    let raw = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };

    let request: RoutableRequest =
        serde_json::from_str(&raw).context("Failed to parse request JSON")?;
    let result = request.resolve(&options);
    debug!("Resolved: {:?}", result);

    let output = if args.attach {
        let mut feature = request.feature.unwrap_or_default();
        feature.attach_routable_points(&result)?;
        serde_json::to_value(&feature)?
    } else {
        serde_json::to_value(&result)?
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    Ok(())
}
