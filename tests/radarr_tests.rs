mod common;

use cliarr::models::Items;
use cliarr::radarr::{AddMovie, MovieItem, RadarrClient};
use cliarr::Error;
use common::MockTransport;
use reqwest::Method;
use serde_json::json;

fn client(mock: &MockTransport) -> RadarrClient {
    RadarrClient::new(mock.boxed())
}

#[tokio::test]
async fn test_add_movie_by_tmdb_id() {
    let mock = MockTransport::new();
    mock.respond(
        Method::GET,
        "/api/v3/movie/lookup",
        json!([{"title": "X", "year": 2020}]),
    )
    .respond(Method::GET, "/api/v3/rootfolder", json!([{"id": 1, "path": "root/"}]));

    client(&mock)
        .add_movie(AddMovie::new(1).tmdb(1234))
        .await
        .unwrap();

    let lookup = mock.calls_to(Method::GET, "/api/v3/movie/lookup");
    assert_eq!(lookup.len(), 1);
    assert_eq!(lookup[0].param("term"), Some(&json!("tmdb:1234")));

    let posted = mock.calls_to(Method::POST, "/api/v3/movie");
    assert_eq!(posted.len(), 1);
    let body = posted[0].body.as_ref().unwrap();
    assert_eq!(body["path"], json!("root/X (2020)"));
    assert_eq!(body["qualityProfileId"], json!(1));
    assert_eq!(body["monitored"], json!(true));
    assert_eq!(body["addOptions"], json!({"searchForMovie": true}));
    assert_eq!(body["title"], json!("X"));
}

#[tokio::test]
async fn test_add_movie_with_explicit_path_skips_root_folders() {
    let mock = MockTransport::new();
    mock.respond(
        Method::GET,
        "/api/v3/movie/lookup",
        json!([{"title": "X", "year": 2020}]),
    );

    let mut request = AddMovie::new(4).imdb("tt0078748");
    request.path = Some("/data/X".to_string());
    request.search = false;
    request.monitored = false;
    client(&mock).add_movie(request).await.unwrap();

    assert!(mock.calls_to(Method::GET, "/api/v3/rootfolder").is_empty());
    assert_eq!(
        mock.calls_to(Method::GET, "/api/v3/movie/lookup")[0].param("term"),
        Some(&json!("imdb:tt0078748"))
    );
    let body = mock.last_call().body.unwrap();
    assert_eq!(body["path"], json!("/data/X"));
    assert_eq!(body["monitored"], json!(false));
    assert_eq!(body["addOptions"], json!({"searchForMovie": false}));
}

#[tokio::test]
async fn test_add_movie_from_movie_info() {
    let mock = MockTransport::new();
    mock.respond(Method::GET, "/api/v3/rootfolder", json!([{"id": 1, "path": "/movies"}]));

    let movie = MovieItem::from_value(json!({"title": "Alien", "year": 1979, "tmdbId": 348})).unwrap();
    client(&mock)
        .add_movie(AddMovie::new(2).movie_info(movie))
        .await
        .unwrap();

    assert!(mock.calls_to(Method::GET, "/api/v3/movie/lookup").is_empty());
    let body = mock.last_call().body.unwrap();
    assert_eq!(body["path"], json!("/movies/Alien (1979)"));
    assert_eq!(body["tmdbId"], json!(348));
}

#[tokio::test]
async fn test_add_movie_zero_ids_fall_back_to_movie_info() {
    let mock = MockTransport::new();
    mock.respond(Method::GET, "/api/v3/rootfolder", json!([{"id": 1, "path": "/movies"}]));

    let movie = MovieItem::from_value(json!({"title": "Alien", "year": 1979})).unwrap();
    client(&mock)
        .add_movie(AddMovie::new(1).tmdb(0).imdb("").movie_info(movie))
        .await
        .unwrap();

    assert!(mock.calls_to(Method::GET, "/api/v3/movie/lookup").is_empty());
    assert_eq!(mock.last_call().body.unwrap()["title"], json!("Alien"));
}

#[tokio::test]
async fn test_add_movie_unknown_id() {
    let mock = MockTransport::new();
    mock.respond(Method::GET, "/api/v3/movie/lookup", json!([]));

    let err = client(&mock)
        .add_movie(AddMovie::new(1).tmdb(1))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Radarr(_)));
    assert!(mock.calls_to(Method::POST, "/api/v3/movie").is_empty());
}

#[tokio::test]
async fn test_lookup_movie_requires_a_criterion() {
    let mock = MockTransport::new();

    let err = client(&mock).lookup_movie(None, None, None).await.unwrap_err();
    assert!(matches!(err, Error::Radarr(_)));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_lookup_movie_precedence() {
    let mock = MockTransport::new();
    let radarr = client(&mock);

    radarr
        .lookup_movie(Some("alien"), Some("tt0078748"), Some(348))
        .await
        .unwrap();
    assert_eq!(mock.last_call().param("term"), Some(&json!("tmdb:348")));

    radarr
        .lookup_movie(Some("alien"), Some("tt0078748"), None)
        .await
        .unwrap();
    assert_eq!(mock.last_call().param("term"), Some(&json!("imdb:tt0078748")));

    radarr.lookup_movie(Some("alien"), None, None).await.unwrap();
    assert_eq!(mock.last_call().param("term"), Some(&json!("alien")));
}

#[tokio::test]
async fn test_lookup_movie_result_shapes() {
    let mock = MockTransport::new();
    let radarr = client(&mock);

    mock.respond(Method::GET, "/api/v3/movie/lookup", json!([]));
    assert!(radarr.lookup_movie(Some("zzz"), None, None).await.unwrap().is_none());

    mock.respond(Method::GET, "/api/v3/movie/lookup", json!([{"title": "Alien"}]));
    let found = radarr.lookup_movie(Some("alien"), None, None).await.unwrap();
    assert!(matches!(found, Some(Items::One(_))));

    mock.respond(
        Method::GET,
        "/api/v3/movie/lookup",
        json!([{"title": "Alien"}, {"title": "Aliens"}]),
    );
    let found = radarr.lookup_movie(Some("alien"), None, None).await.unwrap();
    assert_eq!(found.map(|items| items.len()), Some(2));
}

#[tokio::test]
async fn test_get_movie() {
    let mock = MockTransport::new();
    mock.respond(Method::GET, "/api/v3/movie", json!([{"id": 1, "title": "Alien"}]))
        .respond(Method::GET, "/api/v3/movie/1", json!({"id": 1, "title": "Alien"}));
    let radarr = client(&mock);

    let all = radarr.get_movie(None).await.unwrap();
    assert!(matches!(all, Items::Many(ref movies) if movies.len() == 1));

    let one = radarr.get_movie(Some(1)).await.unwrap();
    match one {
        Items::One(movie) => {
            assert_eq!(movie.id(), 1);
            assert_eq!(movie.title(), "Alien");
        }
        other => panic!("expected a single movie, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_movie_with_exclusion() {
    let mock = MockTransport::new();
    client(&mock).delete_movie(7, false, true).await.unwrap();

    let call = mock.last_call();
    assert_eq!(call.method, Method::DELETE);
    assert_eq!(call.path, "/api/v3/movie/7");
    assert_eq!(
        call.params,
        Some(json!({"deleteFiles": false, "addImportExclusion": true}))
    );
}

#[tokio::test]
async fn test_edit_movie_move_files() {
    let mock = MockTransport::new();
    let mut movie = MovieItem::from_value(json!({"id": 3, "title": "Alien"})).unwrap();
    movie.set_quality_profile_id(6);

    let radarr = client(&mock);
    radarr.edit_movie(&movie, false).await.unwrap();
    assert_eq!(mock.last_call().params, Some(json!({})));

    radarr.edit_movie(&movie, true).await.unwrap();
    let call = mock.last_call();
    assert_eq!(call.method, Method::PUT);
    assert_eq!(call.params, Some(json!({"moveFiles": true})));
    assert_eq!(call.body.unwrap()["qualityProfileId"], json!(6));
}

#[tokio::test]
async fn test_movie_commands() {
    let mock = MockTransport::new();
    let radarr = client(&mock);

    radarr.refresh_movie(Some(3)).await.unwrap();
    assert_eq!(
        mock.last_call().body,
        Some(json!({"name": "RefreshMovie", "movieId": 3}))
    );

    radarr.rescan_movie(None).await.unwrap();
    assert_eq!(mock.last_call().body, Some(json!({"name": "RescanMovie"})));

    radarr.missing_movies_search().await.unwrap();
    assert_eq!(
        mock.last_call().body,
        Some(json!({"name": "MissingMoviesSearch"}))
    );
}

#[tokio::test]
async fn test_create_exclusion() {
    let mock = MockTransport::new();
    client(&mock)
        .create_exclusion("Alien", 348, 1979)
        .await
        .unwrap();

    let call = mock.last_call();
    assert_eq!(call.path, "/api/v3/exclusions");
    assert_eq!(
        call.body,
        Some(json!({"movieTitle": "Alien", "tmdbId": 348, "movieYear": 1979}))
    );
}

#[tokio::test]
async fn test_language_profiles() {
    let mock = MockTransport::new();
    mock.respond(
        Method::GET,
        "/api/v3/languageProfile",
        json!([{"id": 1, "name": "English"}]),
    );

    let profiles = client(&mock).get_language_profiles().await.unwrap();
    assert_eq!(profiles, vec![json!({"id": 1, "name": "English"})]);
}
