use cliarr::cli::{self, args::Cli};
use cliarr::config::Defaults;
use std::process::ExitCode;
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let defaults_path = Defaults::default_path();
    let (defaults, load_error) = match Defaults::load(&defaults_path) {
        Ok(defaults) => (defaults, None),
        Err(e) => (Defaults::default(), Some(e)),
    };

    let cli = Cli::parse_with_defaults(&defaults);

    // Initialize tracing
    let filter = if cli.debug { "cliarr=debug" } else { cli.log_level.as_str() };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = load_error {
        warn!("Ignoring defaults: {}", e);
    }
    info!("Starting cliarr v{}", env!("CARGO_PKG_VERSION"));

    let debug = cli.debug;
    match cli::run(cli, defaults, &defaults_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => cli::report(&e, debug),
    }
}
