use super::common;
use crate::cli::args::{AddMovieArgs, EditMovieArgs, RadarrCommand};
use crate::cli::output::Printer;
use crate::error::Error;
use crate::radarr::{AddMovie, RadarrClient};
use anyhow::Result;
use serde_json::Value;
use tracing::info;

pub(super) async fn run(client: &RadarrClient, command: RadarrCommand, printer: &Printer) -> Result<()> {
    match command {
        RadarrCommand::Get { mid } => printer.items("Movie info", &client.get_movie(mid).await?)?,
        RadarrCommand::Lookup { terms, imdb, tmdb } => {
            match client
                .lookup_movie(terms.as_deref(), imdb.as_deref(), tmdb)
                .await?
            {
                Some(movies) => printer.candidates(&movies)?,
                None => printer.message("No match found"),
            }
        }
        RadarrCommand::Add(args) => add(client, args, printer).await?,
        RadarrCommand::Edit(args) => edit(client, args, printer).await?,
        RadarrCommand::Delete {
            mid,
            delfiles,
            exclude,
        } => printer.value("Result", &client.delete_movie(mid, delfiles, exclude).await?)?,
        RadarrCommand::Refresh { mid } => {
            printer.value("Result", &client.refresh_movie(mid).await?)?
        }
        RadarrCommand::Rescan { mid } => printer.value("Result", &client.rescan_movie(mid).await?)?,
        RadarrCommand::MissingSearch => {
            printer.value("Result", &client.missing_movies_search().await?)?
        }
        RadarrCommand::RenamePreview { mid } => {
            printer.value("Renames", &client.get_rename(mid).await?)?
        }
        RadarrCommand::Rename { files } => {
            printer.value("Result", &client.rename_files(&files).await?)?
        }
        RadarrCommand::AddExclusion { title, tmdb, year } => {
            printer.value("Result", &client.create_exclusion(&title, tmdb, year).await?)?
        }
        RadarrCommand::LanguageProfiles => {
            let profiles = client.get_language_profiles().await?;
            printer.value("Language profiles", &Value::Array(profiles))?
        }
        RadarrCommand::Common(command) => common::run(client.api(), command, printer).await?,
    }
    Ok(())
}

async fn add(client: &RadarrClient, args: AddMovieArgs, printer: &Printer) -> Result<()> {
    let mut request = AddMovie::new(0);
    let by_id = args.tmdb.is_some() || args.imdb.is_some();
    if let Some(terms) = args.terms.as_deref().filter(|_| !by_id) {
        let choices = client.lookup_movie(Some(terms), None, None).await?;
        request.movie_info = Some(common::choose_item(terms, choices)?);
    }
    request.tmdb_id = args.tmdb;
    request.imdb_id = args.imdb;
    request.quality = common::choose_profile(client.api(), args.quality).await?;
    if args.path.is_none() {
        request.root_id = common::choose_root_folder(client.api(), args.root).await?;
    }
    request.path = args.path;
    request.monitored = !args.unmonitored;
    request.search = !args.no_search;

    let res = client.add_movie(request).await?;
    info!("Movie added");
    printer.value("Added", &res)
}

async fn edit(client: &RadarrClient, args: EditMovieArgs, printer: &Printer) -> Result<()> {
    let mut movie = client
        .get_movie(Some(args.mid))
        .await?
        .into_first()
        .ok_or_else(|| Error::Radarr(format!("No movie with id {}", args.mid)))?;

    if let Some(quality) = args.quality {
        movie.set_quality_profile_id(quality);
    }
    if let Some(path) = args.path.as_deref() {
        movie.set_path(path);
    }
    if let Some(monitored) = args.monitored {
        movie.set_monitored(monitored);
    }

    let res = client.edit_movie(&movie, args.move_files).await?;
    printer.value("Updated", &res)
}
