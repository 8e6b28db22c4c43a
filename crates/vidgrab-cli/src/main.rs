//! CLI entry point - the composition root.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use vidgrab_cli::{Cli, CliConfig, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads `env = ...` defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let settings = cli.settings.to_settings();

    match command {
        Commands::Serve {
            host,
            port,
            cors_origins,
        } => {
            let ctx = bootstrap(CliConfig::new(settings))?;
            handlers::serve::execute(&ctx, host, port, cors_origins).await?;
        }
        Commands::Fetch {
            url,
            options,
            output_dir,
            json,
        } => {
            let ctx = bootstrap(CliConfig::new(settings))?;
            handlers::fetch::execute(&ctx, url, options, output_dir, json).await?;
        }
        Commands::CheckDeps => {
            handlers::check_deps::execute(&settings).await?;
        }
        Commands::Paths => {
            handlers::paths::execute(&settings)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
