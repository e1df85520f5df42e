mod series;

pub use series::{Series, SeriesItem};

use crate::error::{Error, Result};
use crate::http::{HttpClient, Params, Transport};
use crate::media::{ApiLayout, MediaClient, Paging};
use crate::models::Items;
use serde_json::{json, Value};
use tracing::{info, instrument};

const EPISODE_PATH: &str = "/api/v3/episode";
const EPISODE_FILE_PATH: &str = "/api/v3/episodefile";

/// Sonarr API client.
pub struct SonarrClient {
    api: MediaClient,
}

/// Parameters of [`SonarrClient::add_serie`].
#[derive(Debug, Clone)]
pub struct AddSeries {
    pub quality: u32,
    pub tvdb_id: Option<u64>,
    pub serie_info: Option<SeriesItem>,
    /// Season numbers to monitor. Empty keeps the server's season selection.
    pub monitored_seasons: Vec<i64>,
    pub monitored: bool,
    pub search: bool,
    pub season_folder: bool,
    pub path: Option<String>,
    pub root_id: u32,
}

impl AddSeries {
    pub fn new(quality: u32) -> Self {
        Self {
            quality,
            tvdb_id: None,
            serie_info: None,
            monitored_seasons: Vec::new(),
            monitored: true,
            search: true,
            season_folder: true,
            path: None,
            root_id: 0,
        }
    }

    pub fn tvdb(mut self, tvdb_id: u64) -> Self {
        self.tvdb_id = Some(tvdb_id);
        self
    }

    pub fn serie_info(mut self, serie: SeriesItem) -> Self {
        self.serie_info = Some(serie);
        self
    }

    pub fn seasons(mut self, seasons: Vec<i64>) -> Self {
        self.monitored_seasons = seasons;
        self
    }
}

impl SonarrClient {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            api: MediaClient::new(transport, ApiLayout::sonarr()),
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

    /// Endpoints shared with Radarr.
    pub fn api(&self) -> &MediaClient {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut MediaClient {
        &mut self.api
    }

    pub fn close(&mut self) {
        self.api.close();
    }

    #[instrument(skip(self))]
    pub async fn get_serie(&self, serie_id: Option<u64>) -> Result<Items<Series>> {
        let res = self.api.get_item(serie_id).await?;
        Items::from_value(res)
    }

    /// Search for a serie by TVDB id, or by keywords when no id is given.
    #[instrument(skip(self))]
    pub async fn lookup_serie(
        &self,
        term: Option<&str>,
        tvdb_id: Option<u64>,
    ) -> Result<Option<Items<Series>>> {
        let term = match (tvdb_id.filter(|id| *id != 0), term.filter(|t| !t.is_empty())) {
            (Some(tvdb), _) => format!("tvdb:{}", tvdb),
            (None, Some(term)) => term.to_string(),
            (None, None) => return Err(Error::Sonarr("Error invalid parameters".into())),
        };

        let res = self.api.lookup_item(&term).await?;
        Items::from_lookup(res)
    }

    #[instrument(skip(self, request))]
    pub async fn add_serie(&self, request: AddSeries) -> Result<Value> {
        let serie_info = match request.tvdb_id.filter(|id| *id != 0) {
            Some(tvdb_id) => self
                .lookup_serie(None, Some(tvdb_id))
                .await?
                .and_then(Items::into_first),
            None => request.serie_info,
        };
        let mut serie = serie_info
            .ok_or_else(|| Error::Sonarr("Error, invalid parameters or invalid tvdb id".into()))?;

        let path = match request.path {
            Some(path) => path,
            None => self.build_serie_path(&serie, request.root_id).await?,
        };
        serie.set_path(&path);
        serie.set_quality_profile_id(request.quality);
        serie.set_monitored(request.monitored);
        serie.set_season_folder(request.season_folder);

        if !request.monitored_seasons.is_empty() {
            serie.monitor_only_seasons(&request.monitored_seasons);
        }

        serie.add_attribute(
            "addOptions",
            json!({
                "searchForMissingEpisodes": request.search,
                "ignoreEpisodesWithFiles": true,
                "ignoreEpisodesWithoutFiles": request.monitored_seasons.is_empty(),
            }),
        );

        info!("Adding series to Sonarr: {}", serie.title());
        self.api.add_item(&serie.to_value()).await
    }

    /// `<root folder>/<title>`.
    pub async fn build_serie_path(&self, serie: &SeriesItem, root_folder_id: u32) -> Result<String> {
        self.api.build_item_path(serie.title(), root_folder_id).await
    }

    pub async fn delete_serie(
        &self,
        serie_id: u64,
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
        self.api.delete_item(serie_id, delete_files, &options).await
    }

    pub async fn edit_serie(&self, serie: &SeriesItem) -> Result<Value> {
        self.api.edit_item(&serie.to_value(), None).await
    }

    pub async fn refresh_serie(&self, serie_id: Option<u64>) -> Result<Value> {
        self.api.item_command("RefreshSeries", serie_id).await
    }

    pub async fn rescan_serie(&self, serie_id: Option<u64>) -> Result<Value> {
        self.api.item_command("RescanSeries", serie_id).await
    }

    /// Every episode of a serie, or one episode by id.
    pub async fn get_episode(
        &self,
        serie_id: Option<u64>,
        episode_id: Option<u64>,
    ) -> Result<Value> {
        self.episode_resource(EPISODE_PATH, serie_id, episode_id)
            .await
    }

    /// Every episode file of a serie, or one episode file by id.
    pub async fn get_episode_file(
        &self,
        serie_id: Option<u64>,
        episode_id: Option<u64>,
    ) -> Result<Value> {
        self.episode_resource(EPISODE_FILE_PATH, serie_id, episode_id)
            .await
    }

    pub async fn delete_episode_file(&self, episode_file_id: u64) -> Result<Value> {
        let path = format!("{}/{}", EPISODE_FILE_PATH, episode_file_id);
        self.api.transport().delete(&path, None).await
    }

    pub async fn create_exclusion(&self, title: &str, tvdb_id: u64) -> Result<Value> {
        let body = json!({"title": title, "tvdbId": tvdb_id});
        self.api.create_exclusion(&body).await
    }

    pub async fn missing_episodes_search(&self) -> Result<Value> {
        self.api
            .send_command(&json!({"name": "missingEpisodeSearch"}))
            .await
    }

    pub async fn get_queue(&self, paging: &Paging, include_unknown: bool) -> Result<Value> {
        self.api.get_queue(paging, include_unknown).await
    }

    pub async fn rename_files(&self, file_ids: &[u64], serie_id: u64) -> Result<Value> {
        let mut extra = Params::new();
        extra.insert("seriesId".to_string(), json!(serie_id));
        self.api.rename_files(file_ids, extra).await
    }

    pub async fn get_rename(&self, serie_id: u64) -> Result<Value> {
        self.api.get_rename(serie_id).await
    }

    async fn episode_resource(
        &self,
        base: &str,
        serie_id: Option<u64>,
        episode_id: Option<u64>,
    ) -> Result<Value> {
        let transport = self.api.transport();
        match (serie_id, episode_id) {
            (Some(serie_id), _) => {
                let mut params = Params::new();
                params.insert("seriesId".to_string(), json!(serie_id));
                transport.get(base, Some(&params)).await
            }
            (None, Some(episode_id)) => {
                let path = format!("{}/{}", base, episode_id);
                transport.get(&path, None).await
            }
            (None, None) => Err(Error::Sonarr(
                "serie_id or episode_id must be provided".into(),
            )),
        }
    }
}
