mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::inspect::handle_inspect_command;
use commands::paths::{handle_paths_command, PathsCommandArgs};
use commands::route::{handle_route_command, RouteCommandArgs};
use commands::LimitArgs;
use talide_cli::output::OutputFormat;
use talide_cli::terminal::supports_color;

#[derive(Parser, Debug)]
#[command(author, version, about = "Talide map routing utilities")]
struct Cli {
    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two nodes of a map.
    Route {
        /// Path to the map JSON file.
        #[arg(long)]
        map: PathBuf,
        /// Starting node id.
        #[arg(long)]
        start: String,
        /// Destination node id.
        #[arg(long)]
        target: String,
        /// Heading of the vehicle at the start, echoed with the route.
        #[arg(long)]
        orientation: String,
        /// Map id reported with the route (defaults to the file stem).
        #[arg(long)]
        map_id: Option<String>,
        /// Order id reported with the route.
        #[arg(long)]
        order_id: Option<String>,
        /// Also list every equally short candidate.
        #[arg(long)]
        all: bool,
        #[command(flatten)]
        limits: LimitArgs,
    },
    /// List every simple path between two nodes.
    Paths {
        /// Path to the map JSON file.
        #[arg(long)]
        map: PathBuf,
        /// Starting node id.
        #[arg(long)]
        start: String,
        /// Destination node id.
        #[arg(long)]
        target: String,
        /// Only list the minimal-length paths.
        #[arg(long)]
        shortest: bool,
        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Summarise the nodes and edges of a map.
    Inspect {
        /// Path to the map JSON file.
        #[arg(long)]
        map: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route {
            map,
            start,
            target,
            orientation,
            map_id,
            order_id,
            all,
            limits,
        } => handle_route_command(
            cli.format,
            &RouteCommandArgs {
                map,
                start,
                target,
                orientation,
                map_id,
                order_id,
                all,
                limits,
            },
        ),
        Command::Paths {
            map,
            start,
            target,
            shortest,
            limits,
        } => handle_paths_command(
            cli.format,
            &PathsCommandArgs {
                map,
                start,
                target,
                shortest,
                limits,
            },
        ),
        Command::Inspect { map } => handle_inspect_command(cli.format, &map),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(supports_color())
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
