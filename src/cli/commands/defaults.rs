use crate::cli::args::{is_grouped_key, is_known_key, Cli, DefaultsCommand};
use crate::cli::output::Printer;
use crate::config::Defaults;
use crate::error::Error;
use anyhow::Result;
use clap::CommandFactory;
use std::path::Path;
use tracing::debug;

pub(super) fn run(
    command: DefaultsCommand,
    mut defaults: Defaults,
    path: &Path,
    printer: &Printer,
) -> Result<()> {
    match command {
        DefaultsCommand::Set { key, value } => {
            set(&mut defaults, &key, &value)?;
            defaults.save(path)?;
            debug!("Saved defaults to {}", path.display());
            printer.message(&format!("{} = {}", key, value));
        }
        DefaultsCommand::Get { key } => match defaults.get(&key) {
            Some(value) => printer.message(&format!("{} = {}", key, Defaults::arg_value(value))),
            None => printer.message(&format!("No default for {}", key)),
        },
        DefaultsCommand::Unset { key } => {
            if defaults.unset(&key).is_some() {
                defaults.save(path)?;
                printer.message(&format!("Removed default for {}", key));
            } else {
                printer.message(&format!("No default for {}", key));
            }
        }
        DefaultsCommand::List => printer.defaults(&defaults)?,
    }
    Ok(())
}

/// Store `raw` under `key`, which must name an existing flag.
pub(crate) fn set(defaults: &mut Defaults, key: &str, raw: &str) -> Result<()> {
    let cmd = Cli::command();
    if !is_known_key(&cmd, key) {
        return Err(Error::Config(format!("Unknown flag '{}'", key)).into());
    }
    if is_grouped_key(&cmd, key) {
        return Err(Error::Config(format!("Flag '{}' cannot take a default", key)).into());
    }
    defaults.set(key, Defaults::parse_value(raw));
    Ok(())
}
