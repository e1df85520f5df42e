mod movie;

pub use movie::{Movie, MovieItem};

use crate::error::{Error, Result};
use crate::http::{HttpClient, Params, Transport};
use crate::media::{ApiLayout, MediaClient, Paging};
use crate::models::Items;
use serde_json::{json, Value};
use tracing::{info, instrument};

const LANGUAGE_PROFILE_PATH: &str = "/api/v3/languageProfile";

/// Radarr API client.
pub struct RadarrClient {
    api: MediaClient,
}

/// Parameters of [`RadarrClient::add_movie`].
///
/// The movie description comes from `movie_info`, or is looked up when a
/// TMDB or IMDB id is given.
#[derive(Debug, Clone)]
pub struct AddMovie {
    pub quality: u32,
    pub tmdb_id: Option<u64>,
    pub imdb_id: Option<String>,
    pub movie_info: Option<MovieItem>,
    pub monitored: bool,
    pub search: bool,
    /// Full path of the movie folder; built from the root folder when unset.
    pub path: Option<String>,
    /// Root folder id, ignored when `path` is set. 0 means the default one.
    pub root_id: u32,
}

impl AddMovie {
    pub fn new(quality: u32) -> Self {
        Self {
            quality,
            tmdb_id: None,
            imdb_id: None,
            movie_info: None,
            monitored: true,
            search: true,
            path: None,
            root_id: 0,
        }
    }

    pub fn tmdb(mut self, tmdb_id: u64) -> Self {
        self.tmdb_id = Some(tmdb_id);
        self
    }

    pub fn imdb(mut self, imdb_id: &str) -> Self {
        self.imdb_id = Some(imdb_id.to_string());
        self
    }

    pub fn movie_info(mut self, movie: MovieItem) -> Self {
        self.movie_info = Some(movie);
        self
    }
}

impl RadarrClient {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            api: MediaClient::new(transport, ApiLayout::radarr()),
        }
    }

    pub fn connect(
        host_url: &str,
        api_key: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self> {
        let http = HttpClient::new(host_url, api_key, username, password)?;
        Ok(Self::new(Box::new(http)))
    }

    /// Endpoints shared with Sonarr.
    pub fn api(&self) -> &MediaClient {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut MediaClient {
        &mut self.api
    }

    pub fn close(&mut self) {
        self.api.close();
    }

    pub async fn get_language_profiles(&self) -> Result<Vec<Value>> {
        match self.api.transport().get(LANGUAGE_PROFILE_PATH, None).await? {
            Value::Array(profiles) => Ok(profiles),
            Value::Null => Ok(Vec::new()),
            other => Err(Error::client(format!(
                "Expected a list of language profiles, got: {}",
                other
            ))),
        }
    }

    /// One movie, or every movie of the collection when `movie_id` is `None`.
    #[instrument(skip(self))]
    pub async fn get_movie(&self, movie_id: Option<u64>) -> Result<Items<Movie>> {
        let res = self.api.get_item(movie_id).await?;
        Items::from_value(res)
    }

    /// Search for a movie by TMDB id, else IMDB id, else keywords.
    ///
    /// Returns `None` when nothing matches.
    #[instrument(skip(self))]
    pub async fn lookup_movie(
        &self,
        term: Option<&str>,
        imdb_id: Option<&str>,
        tmdb_id: Option<u64>,
    ) -> Result<Option<Items<Movie>>> {
        let term = match (
            tmdb_id.filter(|id| *id != 0),
            imdb_id.filter(|id| !id.is_empty()),
            term.filter(|t| !t.is_empty()),
        ) {
            (Some(tmdb), _, _) => format!("tmdb:{}", tmdb),
            (None, Some(imdb), _) => format!("imdb:{}", imdb),
            (None, None, Some(term)) => term.to_string(),
            (None, None, None) => return Err(Error::Radarr("Error, invalid parameters".into())),
        };

        let res = self.api.lookup_item(&term).await?;
        Items::from_lookup(res)
    }

    #[instrument(skip(self, request))]
    pub async fn add_movie(&self, request: AddMovie) -> Result<Value> {
        let tmdb_id = request.tmdb_id.filter(|id| *id != 0);
        let imdb_id = request.imdb_id.as_deref().filter(|id| !id.is_empty());
        let movie_info = if tmdb_id.is_some() || imdb_id.is_some() {
            self.lookup_movie(None, imdb_id, tmdb_id)
                .await?
                .and_then(Items::into_first)
        } else {
            request.movie_info
        };
        let mut movie = movie_info.ok_or_else(|| {
            Error::Radarr("Error, invalid parameters or invalid tmdb/imdb id".into())
        })?;

        let path = match request.path {
            Some(path) => path,
            None => self.build_movie_path(&movie, request.root_id).await?,
        };
        movie.set_path(&path);
        movie.set_quality_profile_id(request.quality);
        movie.set_monitored(request.monitored);
        movie.add_attribute("addOptions", json!({"searchForMovie": request.search}));

        info!("Adding movie to Radarr: {}", movie.title());
        self.api.add_item(&movie.to_value()).await
    }

    /// `<root folder>/<title> (<year>)`.
    pub async fn build_movie_path(&self, movie: &MovieItem, root_folder_id: u32) -> Result<String> {
        self.api
            .build_item_path(&movie.folder_title(), root_folder_id)
            .await
    }

    pub async fn delete_movie(
        &self,
        movie_id: u64,
        delete_files: bool,
        add_exclusion: bool,
    ) -> Result<Value> {
        let mut options = Params::new();
        if add_exclusion {
            options.insert(
                self.api.layout().import_exclusion_option.to_string(),
                json!(true),
            );
        }
        self.api.delete_item(movie_id, delete_files, &options).await
    }

    /// Replace a movie, usually one obtained from [`RadarrClient::get_movie`].
    pub async fn edit_movie(&self, movie: &MovieItem, move_files: bool) -> Result<Value> {
        let mut params = Params::new();
        if move_files {
            params.insert("moveFiles".to_string(), json!(true));
        }
        self.api.edit_item(&movie.to_value(), Some(&params)).await
    }

    /// Refresh information and rescan disk for one movie, or all of them.
    pub async fn refresh_movie(&self, movie_id: Option<u64>) -> Result<Value> {
        self.api.item_command("RefreshMovie", movie_id).await
    }

    pub async fn rescan_movie(&self, movie_id: Option<u64>) -> Result<Value> {
        self.api.item_command("RescanMovie", movie_id).await
    }

    pub async fn create_exclusion(&self, title: &str, tmdb_id: u64, year: u32) -> Result<Value> {
        let body = json!({"movieTitle": title, "tmdbId": tmdb_id, "movieYear": year});
        self.api.create_exclusion(&body).await
    }

    pub async fn missing_movies_search(&self) -> Result<Value> {
        self.api
            .send_command(&json!({"name": "MissingMoviesSearch"}))
            .await
    }

    pub async fn get_queue(&self, paging: &Paging, include_unknown: bool) -> Result<Value> {
        self.api.get_queue(paging, include_unknown).await
    }

    pub async fn rename_files(&self, file_ids: &[u64]) -> Result<Value> {
        self.api.rename_files(file_ids, Params::new()).await
    }

    pub async fn get_rename(&self, movie_id: u64) -> Result<Value> {
        self.api.get_rename(movie_id).await
    }
}
