mod common;

use cliarr::sonarr::{AddSeries, SeriesItem, SonarrClient};
use cliarr::Error;
use common::MockTransport;
use reqwest::Method;
use serde_json::json;

fn client(mock: &MockTransport) -> SonarrClient {
    SonarrClient::new(mock.boxed())
}

fn lookup_result() -> serde_json::Value {
    json!([{
        "title": "The Expanse",
        "year": 2015,
        "tvdbId": 280619,
        "seasons": [
            {"seasonNumber": 0, "monitored": false},
            {"seasonNumber": 1, "monitored": true},
            {"seasonNumber": 2, "monitored": true},
        ],
    }])
}

#[tokio::test]
async fn test_add_serie_monitoring_selected_seasons() {
    let mock = MockTransport::new();
    mock.respond(Method::GET, "/api/v3/series/lookup", lookup_result())
        .respond(Method::GET, "/api/v3/rootfolder", json!([{"id": 1, "path": "/tv"}]));

    client(&mock)
        .add_serie(AddSeries::new(3).tvdb(280619).seasons(vec![2]))
        .await
        .unwrap();

    assert_eq!(
        mock.calls_to(Method::GET, "/api/v3/series/lookup")[0].param("term"),
        Some(&json!("tvdb:280619"))
    );
    let posted = mock.calls_to(Method::POST, "/api/v3/series");
    let body = posted[0].body.as_ref().unwrap();
    assert_eq!(body["path"], json!("/tv/The Expanse"));
    assert_eq!(body["qualityProfileId"], json!(3));
    assert_eq!(body["seasonFolder"], json!(true));
    assert_eq!(
        body["seasons"],
        json!([
            {"seasonNumber": 0, "monitored": false},
            {"seasonNumber": 1, "monitored": false},
            {"seasonNumber": 2, "monitored": true},
        ])
    );
    assert_eq!(
        body["addOptions"],
        json!({
            "searchForMissingEpisodes": true,
            "ignoreEpisodesWithFiles": true,
            "ignoreEpisodesWithoutFiles": false,
        })
    );
}

#[tokio::test]
async fn test_add_serie_without_seasons_keeps_server_selection() {
    let mock = MockTransport::new();
    mock.respond(Method::GET, "/api/v3/series/lookup", lookup_result())
        .respond(Method::GET, "/api/v3/rootfolder", json!([{"id": 1, "path": "/tv"}]));

    let mut request = AddSeries::new(1).tvdb(280619);
    request.season_folder = false;
    request.search = false;
    client(&mock).add_serie(request).await.unwrap();

    let body = mock.last_call().body.unwrap();
    assert_eq!(body["seasons"], lookup_result()[0]["seasons"]);
    assert_eq!(body["seasonFolder"], json!(false));
    assert_eq!(body["addOptions"]["searchForMissingEpisodes"], json!(false));
    assert_eq!(body["addOptions"]["ignoreEpisodesWithoutFiles"], json!(true));
}

#[tokio::test]
async fn test_add_serie_zero_tvdb_id_falls_back_to_serie_info() {
    let mock = MockTransport::new();
    mock.respond(Method::GET, "/api/v3/rootfolder", json!([{"id": 1, "path": "/tv"}]));

    let serie = SeriesItem::from_value(lookup_result()[0].clone()).unwrap();
    client(&mock)
        .add_serie(AddSeries::new(1).tvdb(0).serie_info(serie))
        .await
        .unwrap();

    assert!(mock.calls_to(Method::GET, "/api/v3/series/lookup").is_empty());
    assert_eq!(mock.last_call().body.unwrap()["tvdbId"], json!(280619));
}

#[tokio::test]
async fn test_add_serie_unknown_tvdb_id() {
    let mock = MockTransport::new();
    mock.respond(Method::GET, "/api/v3/series/lookup", json!([]));

    let err = client(&mock)
        .add_serie(AddSeries::new(1).tvdb(1))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Sonarr(_)));
}

#[tokio::test]
async fn test_lookup_serie_requires_a_criterion() {
    let mock = MockTransport::new();
    let err = client(&mock).lookup_serie(None, None).await.unwrap_err();
    assert!(matches!(err, Error::Sonarr(_)));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_lookup_serie_prefers_tvdb_id() {
    let mock = MockTransport::new();
    let sonarr = client(&mock);

    sonarr.lookup_serie(Some("expanse"), Some(280619)).await.unwrap();
    assert_eq!(mock.last_call().param("term"), Some(&json!("tvdb:280619")));

    sonarr.lookup_serie(Some("expanse"), None).await.unwrap();
    assert_eq!(mock.last_call().param("term"), Some(&json!("expanse")));
}

#[tokio::test]
async fn test_episodes() {
    let mock = MockTransport::new();
    let sonarr = client(&mock);

    sonarr.get_episode(Some(4), None).await.unwrap();
    let call = mock.last_call();
    assert_eq!(call.path, "/api/v3/episode");
    assert_eq!(call.params, Some(json!({"seriesId": 4})));

    sonarr.get_episode(None, Some(40)).await.unwrap();
    assert_eq!(mock.last_call().path, "/api/v3/episode/40");

    sonarr.get_episode_file(None, Some(41)).await.unwrap();
    assert_eq!(mock.last_call().path, "/api/v3/episodefile/41");

    sonarr.delete_episode_file(41).await.unwrap();
    let call = mock.last_call();
    assert_eq!((call.method, call.path.as_str()), (Method::DELETE, "/api/v3/episodefile/41"));

    let err = sonarr.get_episode(None, None).await.unwrap_err();
    assert!(matches!(err, Error::Sonarr(_)));
}

#[tokio::test]
async fn test_delete_serie_with_exclusion() {
    let mock = MockTransport::new();
    client(&mock).delete_serie(2, true, true).await.unwrap();

    let call = mock.last_call();
    assert_eq!(call.path, "/api/v3/series/2");
    assert_eq!(
        call.params,
        Some(json!({"deleteFiles": true, "addImportListExclusion": true}))
    );
}

#[tokio::test]
async fn test_serie_commands() {
    let mock = MockTransport::new();
    let sonarr = client(&mock);

    sonarr.refresh_serie(Some(2)).await.unwrap();
    assert_eq!(
        mock.last_call().body,
        Some(json!({"name": "RefreshSeries", "seriesId": 2}))
    );

    sonarr.rescan_serie(None).await.unwrap();
    assert_eq!(mock.last_call().body, Some(json!({"name": "RescanSeries"})));

    sonarr.missing_episodes_search().await.unwrap();
    assert_eq!(
        mock.last_call().body,
        Some(json!({"name": "missingEpisodeSearch"}))
    );

    sonarr.rename_files(&[5], 2).await.unwrap();
    assert_eq!(
        mock.last_call().body,
        Some(json!({"name": "RenameFiles", "files": [5], "seriesId": 2}))
    );
}

#[tokio::test]
async fn test_create_exclusion() {
    let mock = MockTransport::new();
    client(&mock).create_exclusion("The Expanse", 280619).await.unwrap();

    let call = mock.last_call();
    assert_eq!(call.path, "/api/v3/importlistexclusion");
    assert_eq!(call.body, Some(json!({"title": "The Expanse", "tvdbId": 280619})));
}
