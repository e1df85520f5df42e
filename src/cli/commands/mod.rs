mod common;
mod defaults;
mod radarr;
mod sonarr;

use super::args::{Cli, Commands};
use super::output::Printer;
use crate::config::{Configuration, Connection, ConnectionArgs, Defaults};
use crate::media::Service;
use crate::radarr::RadarrClient;
use crate::sonarr::SonarrClient;
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// Execute the parsed command line.
pub async fn run(cli: Cli, defaults: Defaults, defaults_path: &Path) -> Result<()> {
    let printer = Printer::new(cli.json);
    let conn_args = cli.connection_args();
    let config_path = cli.config.clone();

    match cli.command {
        Commands::Radarr { command } => {
            let conn = connection(Service::Radarr, &conn_args, config_path.as_deref())?;
            let mut client = RadarrClient::connect(
                &conn.host,
                &conn.api_key,
                conn.username.as_deref(),
                conn.password.as_deref(),
            )?;
            client.api_mut().set_default_root_folder_id(conn.root_folder_id);

            let result = radarr::run(&client, command, &printer).await;
            client.close();
            result
        }
        Commands::Sonarr { command } => {
            let conn = connection(Service::Sonarr, &conn_args, config_path.as_deref())?;
            let mut client = SonarrClient::connect(
                &conn.host,
                &conn.api_key,
                conn.username.as_deref(),
                conn.password.as_deref(),
            )?;
            client.api_mut().set_default_root_folder_id(conn.root_folder_id);

            let result = sonarr::run(&client, command, &printer).await;
            client.close();
            result
        }
        Commands::Defaults { command } => defaults::run(command, defaults, defaults_path, &printer),
    }
}

fn connection(
    service: Service,
    args: &ConnectionArgs,
    config_path: Option<&Path>,
) -> Result<Connection> {
    let config = match config_path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            Configuration::from_file(path)?
        }
        None => Configuration::default(),
    };
    Ok(Connection::resolve(service, args, config.server(service))?)
}
