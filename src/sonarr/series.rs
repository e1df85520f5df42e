use crate::models::{Item, Schema};
use serde_json::{json, Map, Value};

/// Series entity of the Sonarr API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Series;

pub type SeriesItem = Item<Series>;

impl Schema for Series {
    const NAME: &'static str = "Series";

    fn defaults() -> Map<String, Value> {
        let defaults = json!({
            "title": "",
            "alternateTitles": [],
            "sortTitle": "",
            "statistics": {},
            "status": "",
            "overview": "",
            "network": "",
            "airTime": "",
            "images": [],
            "seasons": [],
            "year": 0,
            "path": "",
            "seasonFolder": true,
            "monitored": true,
            "useSceneNumbering": false,
            "runtime": 0,
            "tvdbId": 0,
            "tvRageId": 0,
            "tvMazeId": 0,
            "firstAired": "",
            "seriesType": "",
            "cleanTitle": "",
            "imdbId": "",
            "titleSlug": "",
            "certification": "",
            "genres": [],
            "tags": [],
            "added": "",
            "ratings": {},
            "qualityProfileId": 0,
            "id": 0,
        });
        match defaults {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

impl Item<Series> {
    pub fn id(&self) -> i64 {
        self.i64_field("id")
    }

    pub fn title(&self) -> &str {
        self.str_field("title")
    }

    pub fn year(&self) -> i64 {
        self.i64_field("year")
    }

    pub fn tvdb_id(&self) -> i64 {
        self.i64_field("tvdbId")
    }

    pub fn path(&self) -> &str {
        self.str_field("path")
    }

    pub fn monitored(&self) -> bool {
        self.bool_field("monitored")
    }

    pub fn season_folder(&self) -> bool {
        self.bool_field("seasonFolder")
    }

    pub fn set_path(&mut self, path: &str) {
        if let Some(slot) = self.field_mut("path") {
            *slot = json!(path);
        }
    }

    pub fn set_quality_profile_id(&mut self, id: u32) {
        if let Some(slot) = self.field_mut("qualityProfileId") {
            *slot = json!(id);
        }
    }

    pub fn set_monitored(&mut self, monitored: bool) {
        if let Some(slot) = self.field_mut("monitored") {
            *slot = json!(monitored);
        }
    }

    pub fn set_season_folder(&mut self, season_folder: bool) {
        if let Some(slot) = self.field_mut("seasonFolder") {
            *slot = json!(season_folder);
        }
    }

    /// Monitor exactly the seasons whose number is in `seasons`.
    pub fn monitor_only_seasons(&mut self, seasons: &[i64]) {
        let Some(Value::Array(entries)) = self.field_mut("seasons") else {
            return;
        };
        for season in entries.iter_mut() {
            let number = season.get("seasonNumber").and_then(Value::as_i64);
            let monitored = number.map_or(false, |n| seasons.contains(&n));
            if let Value::Object(season) = season {
                season.insert("monitored".to_string(), json!(monitored));
            }
        }
    }
}
