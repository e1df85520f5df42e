use crate::models::{Item, Schema};
use serde_json::{json, Map, Value};

/// Movie entity of the Radarr API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movie;

pub type MovieItem = Item<Movie>;

impl Schema for Movie {
    const NAME: &'static str = "Movie";

    fn defaults() -> Map<String, Value> {
        let defaults = json!({
            "title": "",
            "originalTitle": "",
            "sortTitle": "",
            "sizeOnDisk": 0,
            "overview": "",
            "inCinemas": null,
            "physicalRelease": null,
            "status": "",
            "images": [],
            "website": "",
            "downloaded": false,
            "year": 0,
            "hasFile": false,
            "youTubeTrailerId": "",
            "studio": "",
            "path": "",
            "rootFolderPath": "",
            "monitored": true,
            "minimumAvailability": "",
            "isAvailable": "",
            "folderName": "",
            "runtime": 0,
            "cleanTitle": "",
            "imdbId": "",
            "tmdbId": 0,
            "titleSlug": "",
            "certification": "",
            "genres": [],
            "tags": [],
            "added": null,
            "ratings": {},
            "collection": {},
            "alternateTitles": [],
            "qualityProfileId": 0,
            "secondaryYearSourceId": 0,
            "id": 0,
        });
        match defaults {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

impl Item<Movie> {
    pub fn id(&self) -> i64 {
        self.i64_field("id")
    }

    pub fn title(&self) -> &str {
        self.str_field("title")
    }

    pub fn year(&self) -> i64 {
        self.i64_field("year")
    }

    pub fn tmdb_id(&self) -> i64 {
        self.i64_field("tmdbId")
    }

    pub fn imdb_id(&self) -> &str {
        self.str_field("imdbId")
    }

    pub fn path(&self) -> &str {
        self.str_field("path")
    }

    pub fn monitored(&self) -> bool {
        self.bool_field("monitored")
    }

    pub fn quality_profile_id(&self) -> i64 {
        self.i64_field("qualityProfileId")
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

    /// Folder name `<title> (<year>)`, without the year when it is unknown.
    pub fn folder_title(&self) -> String {
        match self.year() {
            0 => self.title().to_string(),
            year => format!("{} ({})", self.title(), year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_title() {
        let mut movie = MovieItem::new();
        movie.set("title", "some movie").unwrap();
        assert_eq!(movie.folder_title(), "some movie");

        movie.set("year", 2020).unwrap();
        assert_eq!(movie.folder_title(), "some movie (2020)");
    }

    #[test]
    fn test_defaults_are_declared() {
        let movie = MovieItem::new();
        assert!(movie.monitored());
        assert_eq!(movie.get("inCinemas").unwrap(), &Value::Null);
        assert!(movie.get("addOptions").is_err());
    }
}
