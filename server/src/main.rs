use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use mediadir_browse::BrowseRequest;
use mediadir_server::ServeOptions;
use mediadir_server::browse_once;
use mediadir_server::default_config_path;
use mediadir_server::run_serve;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Media directory server.
#[derive(Debug, Parser)]
#[command(name = "mediadir", version)]
struct Cli {
    /// Configuration file. Defaults to `$MEDIADIR_HOME/config.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the browse and folder endpoints over HTTP.
    Serve(ServeArgs),
    /// Browse a node once and print the DIDL-Lite result.
    Browse(BrowseArgs),
}

#[derive(Debug, clap::Args)]
struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Overrides `http_port` from the configuration.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Debug, clap::Args)]
struct BrowseArgs {
    /// Node id; `0` is the root.
    #[arg(default_value = "0")]
    id: String,

    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Maximum number of children; 0 returns all of them.
    #[arg(long, default_value_t = 0)]
    count: usize,

    /// Describe the node itself instead of its children.
    #[arg(long)]
    metadata: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    match cli.command {
        Command::Serve(args) => {
            run_serve(ServeOptions {
                config_path,
                host: args.host,
                port: args.port,
            })
            .await
        }
        Command::Browse(args) => {
            let request = if args.metadata {
                BrowseRequest::metadata(args.id)
            } else {
                BrowseRequest::children(args.id, args.start, args.count)
            };
            let result = browse_once(&config_path, &request)?;
            println!("{}", result.result);
            eprintln!(
                "returned {} of {} matches",
                result.number_returned, result.total_matches
            );
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
