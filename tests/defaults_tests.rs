use cliarr::cli::args::{Cli, Commands, RadarrCommand};
use cliarr::config::Defaults;
use cliarr::Error;
use serde_json::json;

#[test]
fn test_missing_file_gives_empty_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let defaults = Defaults::load(&dir.path().join("defaults.json")).unwrap();
    assert!(defaults.is_empty());
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cliarr").join("defaults.json");

    let mut defaults = Defaults::default();
    defaults.set("radarr.add.quality", json!(4));
    defaults.set("host", json!("http://nas:7878"));
    defaults.save(&path).unwrap();

    let loaded = Defaults::load(&path).unwrap();
    assert_eq!(loaded, defaults);
    assert_eq!(loaded.len(), 2);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw, json!({"host": "http://nas:7878", "radarr.add.quality": 4}));
}

#[test]
fn test_corrupt_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("defaults.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(Defaults::load(&path), Err(Error::Config(_))));
}

#[test]
fn test_loaded_defaults_drive_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("defaults.json");
    std::fs::write(
        &path,
        r#"{"radarr.delete.mid": 8, "radarr.delete.delfiles": true, "api-key": "k"}"#,
    )
    .unwrap();

    let defaults = Defaults::load(&path).unwrap();
    let cli = Cli::try_parse_from_with_defaults(["cliarr", "radarr", "delete"], &defaults).unwrap();

    assert_eq!(cli.api_key.as_deref(), Some("k"));
    match cli.command {
        Commands::Radarr {
            command: RadarrCommand::Delete { mid, delfiles, exclude },
        } => {
            assert_eq!(mid, 8);
            assert!(delfiles);
            assert!(!exclude);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_unknown_default_keys_are_ignored() {
    let mut defaults = Defaults::default();
    defaults.set("radarr.delete.colour", json!("red"));

    let cli = Cli::try_parse_from_with_defaults(["cliarr", "radarr", "delete", "-i", "2"], &defaults)
        .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Radarr {
            command: RadarrCommand::Delete { mid: 2, .. }
        }
    ));
}
