use super::common;
use crate::cli::args::{AddSerieArgs, EditSerieArgs, SonarrCommand};
use crate::cli::output::Printer;
use crate::error::Error;
use crate::sonarr::{AddSeries, SonarrClient};
use anyhow::Result;
use tracing::info;

pub(super) async fn run(client: &SonarrClient, command: SonarrCommand, printer: &Printer) -> Result<()> {
    match command {
        SonarrCommand::Get { sid } => printer.items("Serie info", &client.get_serie(sid).await?)?,
        SonarrCommand::Lookup { terms, tvdb } => {
            match client.lookup_serie(terms.as_deref(), tvdb).await? {
                Some(series) => printer.candidates(&series)?,
                None => printer.message("No match found"),
            }
        }
        SonarrCommand::Add(args) => add(client, args, printer).await?,
        SonarrCommand::Edit(args) => edit(client, args, printer).await?,
        SonarrCommand::Delete {
            sid,
            delfiles,
            exclude,
        } => printer.value("Result", &client.delete_serie(sid, delfiles, exclude).await?)?,
        SonarrCommand::Refresh { sid } => {
            printer.value("Result", &client.refresh_serie(sid).await?)?
        }
        SonarrCommand::Rescan { sid } => printer.value("Result", &client.rescan_serie(sid).await?)?,
        SonarrCommand::GetEpisode { sid, epid } => {
            printer.value("Episodes", &client.get_episode(sid, epid).await?)?
        }
        SonarrCommand::GetEpisodeFile { sid, epid } => {
            printer.value("Episode files", &client.get_episode_file(sid, epid).await?)?
        }
        SonarrCommand::DeleteEpisodeFile { epid } => {
            printer.value("Result", &client.delete_episode_file(epid).await?)?
        }
        SonarrCommand::MissingSearch => {
            printer.value("Result", &client.missing_episodes_search().await?)?
        }
        SonarrCommand::RenamePreview { sid } => {
            printer.value("Renames", &client.get_rename(sid).await?)?
        }
        SonarrCommand::Rename { sid, files } => {
            printer.value("Result", &client.rename_files(&files, sid).await?)?
        }
        SonarrCommand::AddExclusion { title, tvdb } => {
            printer.value("Result", &client.create_exclusion(&title, tvdb).await?)?
        }
        SonarrCommand::Common(command) => common::run(client.api(), command, printer).await?,
    }
    Ok(())
}

async fn add(client: &SonarrClient, args: AddSerieArgs, printer: &Printer) -> Result<()> {
    let mut request = AddSeries::new(0).seasons(args.seasons);
    if let Some(terms) = args.terms.as_deref().filter(|_| args.tvdb.is_none()) {
        let choices = client.lookup_serie(Some(terms), None).await?;
        request.serie_info = Some(common::choose_item(terms, choices)?);
    }
    request.tvdb_id = args.tvdb;
    request.quality = common::choose_profile(client.api(), args.quality).await?;
    if args.path.is_none() {
        request.root_id = common::choose_root_folder(client.api(), args.root).await?;
    }
    request.path = args.path;
    request.season_folder = args.season_folders;
    request.monitored = !args.unmonitored;
    request.search = !args.no_search;

    let res = client.add_serie(request).await?;
    info!("Serie added");
    printer.value("Added", &res)
}

async fn edit(client: &SonarrClient, args: EditSerieArgs, printer: &Printer) -> Result<()> {
    let mut serie = client
        .get_serie(Some(args.sid))
        .await?
        .into_first()
        .ok_or_else(|| Error::Sonarr(format!("No serie with id {}", args.sid)))?;

    if let Some(quality) = args.quality {
        serie.set_quality_profile_id(quality);
    }
    if let Some(path) = args.path.as_deref() {
        serie.set_path(path);
    }
    if let Some(monitored) = args.monitored {
        serie.set_monitored(monitored);
    }
    if let Some(season_folder) = args.season_folders {
        serie.set_season_folder(season_folder);
    }

    let res = client.edit_serie(&serie).await?;
    printer.value("Updated", &res)
}
