//! Interactive selection on the terminal.

use super::output::{profile_line, summary};
use crate::error::Error;
use crate::models::{Item, Items, QualityProfile, RootFolder, Schema};
use anyhow::{anyhow, Result};
use dialoguer::console::Term;
use dialoguer::Select;

/// Ask which quality profile to use and return its id.
pub fn select_profile(profiles: &[QualityProfile]) -> Result<u32> {
    if profiles.is_empty() {
        return Err(Error::client("No quality profile configured on the server").into());
    }
    let labels: Vec<String> = profiles.iter().map(profile_line).collect();
    let choice = choose("Select a quality profile", &labels)?;
    profiles
        .get(choice)
        .map(|profile| profile.id)
        .ok_or_else(|| anyhow!("Invalid profile selection: {}", choice))
}

/// Pick one of the lookup results for `terms`. A single result is taken as is.
pub fn select_item<S: Schema>(terms: &str, choices: Option<Items<S>>) -> Result<Item<S>> {
    let mut choices = candidates(terms, choices)?;
    if choices.len() == 1 {
        return choices
            .pop()
            .ok_or_else(|| anyhow!("No match found for {}", terms));
    }
    let labels: Vec<String> = choices.iter().map(summary).collect();
    let choice = choose(&format!("Results for '{}'", terms), &labels)?;
    if choice >= choices.len() {
        return Err(anyhow!("Invalid selection: {}", choice));
    }
    Ok(choices.swap_remove(choice))
}

/// Ask which root folder to use and return its id. A single folder is taken as is.
pub fn select_root_folder(folders: &[RootFolder]) -> Result<u32> {
    match folders {
        [] => Err(Error::client("No root folder configured on the server").into()),
        [only] => Ok(only.id),
        _ => {
            let labels: Vec<String> = folders.iter().map(folder_label).collect();
            let choice = choose("Select a root folder", &labels)?;
            folders
                .get(choice)
                .map(|folder| folder.id)
                .ok_or_else(|| anyhow!("Invalid root folder selection: {}", choice))
        }
    }
}

fn choose(prompt: &str, labels: &[String]) -> Result<usize> {
    let choice = Select::new()
        .with_prompt(prompt)
        .items(labels)
        .default(0)
        .interact_on(&Term::stderr())?;
    Ok(choice)
}

/// Lookup results as a list; no result at all is an error.
fn candidates<S: Schema>(terms: &str, choices: Option<Items<S>>) -> Result<Vec<Item<S>>> {
    let items = choices.map(Items::into_vec).unwrap_or_default();
    if items.is_empty() {
        return Err(Error::client(format!("No match found for {}", terms)).into());
    }
    Ok(items)
}

fn folder_label(folder: &RootFolder) -> String {
    match folder.free_space {
        Some(free) => format!("{} ({} free)", folder.path, super::output::format_size(free)),
        None => folder.path.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radarr::{Movie, MovieItem};
    use serde_json::json;

    fn movie(title: &str, year: i64) -> MovieItem {
        MovieItem::from_value(json!({"title": title, "year": year})).unwrap()
    }

    #[test]
    fn test_single_result_needs_no_prompt() {
        let picked = select_item("alien", Some(Items::One(movie("Alien", 1979)))).unwrap();
        assert_eq!(picked.year(), 1979);

        let picked = select_item("alien", Some(Items::Many(vec![movie("Alien", 1979)]))).unwrap();
        assert_eq!(picked.title(), "Alien");
    }

    #[test]
    fn test_no_match_is_api_error() {
        let err = select_item::<Movie>("zzz", None).unwrap_err();
        assert!(err.downcast_ref::<Error>().map_or(false, Error::is_api_error));

        let err = candidates::<Movie>("zzz", Some(Items::Many(Vec::new()))).unwrap_err();
        assert_eq!(err.to_string(), "No match found for zzz");
    }

    #[test]
    fn test_single_root_folder_needs_no_prompt() {
        let folders: Vec<RootFolder> =
            serde_json::from_value(json!([{"id": 3, "path": "/films"}])).unwrap();
        assert_eq!(select_root_folder(&folders).unwrap(), 3);
        assert!(select_root_folder(&[]).is_err());
    }

    #[test]
    fn test_empty_profiles_is_api_error() {
        let err = select_profile(&[]).unwrap_err();
        assert!(err.downcast_ref::<Error>().map_or(false, Error::is_api_error));
    }

    #[test]
    fn test_folder_label() {
        let folder: RootFolder =
            serde_json::from_value(json!({"id": 1, "path": "/movies", "freeSpace": 1024})).unwrap();
        assert_eq!(folder_label(&folder), "/movies (1.0 KB free)");
    }
}
