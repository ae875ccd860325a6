mod common;

use common::{MockTransport, client, url};
use reqwest::Method;
use serde_json::{Value, json};
use spotify_data_tools::{
    management::*,
    spotify::CatalogSession,
    types::{Playlist, PlaylistSummary, SavedTrack},
};

fn saved(name: &str, album_type: Option<&str>, release_date: Option<&str>, added_at: &str) -> SavedTrack {
    serde_json::from_value(json!({
        "added_at": added_at,
        "is_local": false,
        "track": {
            "name": name,
            "uri": format!("spotify:track:{}", name.replace(' ', "")),
            "artists": [{ "id": "a1", "name": "Artist One" }, { "id": "a2", "name": "Artist Two" }],
            "album": { "name": format!("{name} LP"), "album_type": album_type, "release_date": release_date },
            "popularity": 42
        }
    }))
    .unwrap()
}

fn removed() -> SavedTrack {
    serde_json::from_value(json!({ "added_at": "2020-01-01T00:00:00Z", "track": null })).unwrap()
}

fn playlist(name: &str, tracks: Vec<SavedTrack>) -> Playlist {
    Playlist {
        id: "p1".to_string(),
        name: name.to_string(),
        owner: None,
        tracks_href: None,
        total: tracks.len() as u64,
        tracks,
        extra: Default::default(),
    }
}

#[test]
fn test_split_by_release_decade() {
    let source = playlist(
        "Mix",
        vec![
            saved("A", Some("album"), Some("1994-02-01"), "2020-01-01T00:00:00Z"),
            saved("B", Some("compilation"), Some("2011"), "2020-01-01T00:00:00Z"),
            saved("C", Some("single"), Some("1999-12"), "2021-01-01T00:00:00Z"),
            removed(),
            saved("D", Some("album"), None, "2021-01-01T00:00:00Z"),
        ],
    );

    let groups = split_playlist(&source, SplitMode::ReleaseDate, false);
    let names: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Mix.1990s", "Mix.2010s"]);
    let nineties: Vec<&str> = groups["Mix.1990s"]
        .iter()
        .map(|t| t.track.as_ref().unwrap().name.as_str())
        .collect();
    assert_eq!(nineties, vec!["A", "C"]);

    let groups = split_playlist(&source, SplitMode::ReleaseDate, true);
    assert_eq!(groups["Mix.compilation"].len(), 1);
    assert!(!groups.contains_key("Mix.2010s"));
}

#[test]
fn test_split_by_date_added() {
    let source = playlist(
        "Mix",
        vec![
            saved("A", Some("album"), Some("1994"), "2020-05-01T00:00:00Z"),
            saved("B", Some("album"), Some("1995"), "2021-05-01T00:00:00Z"),
            removed(),
        ],
    );

    let groups = split_playlist(&source, SplitMode::DateAdded, false);

    assert_eq!(groups["Mix.added2020"].len(), 2);
    assert_eq!(groups["Mix.added2021"].len(), 1);
}

#[test]
fn test_histograms() {
    let tracks = vec![
        saved("A", Some("album"), Some("1994-02-01"), "2020-01-01T00:00:00Z"),
        saved("B", Some("compilation"), Some("1994"), "2020-06-01T00:00:00Z"),
        saved("C", None, Some("2001-01-01"), "2021-01-01T00:00:00Z"),
        removed(),
    ];

    let all = filter_tracks(&tracks, false);
    assert_eq!(all.len(), 3);
    let years = release_years(&all);
    assert_eq!(years.get(&1994), Some(&2));
    assert_eq!(years.get(&2001), Some(&1));
    let decades = release_decades(&all);
    assert_eq!(decades.get(&1990), Some(&2));
    assert_eq!(decades.get(&2000), Some(&1));
    let added = added_years(&all);
    assert_eq!(added.get(&2020), Some(&2));

    // compilations and unknown album types are dropped
    let studio = filter_tracks(&tracks, true);
    assert_eq!(studio.len(), 1);
    assert_eq!(release_years(&studio).get(&1994), Some(&1));

    let table = histogram_table(&decades, spotify_data_tools::utils::year_to_decade_str).to_string();
    assert!(table.contains("1990s"));
    assert!(table.contains("2000s"));
}

#[test]
fn test_release_vs_added() {
    let tracks = vec![
        saved("A", Some("album"), Some("1994-02-01"), "2020-01-01T00:00:00Z"),
        saved("B", Some("album"), Some("1994"), "2020-06-01T00:00:00Z"),
        saved("C", Some("compilation"), Some("2001-01-01"), "2021-01-01T00:00:00Z"),
        saved("D", Some("album"), None, "2021-01-01T00:00:00Z"),
        removed(),
    ];

    let all = filter_tracks(&tracks, false);
    let counts = release_vs_added(&all);
    assert_eq!(counts.len(), 2);
    assert_eq!(counts.get(&(1994, 2020)), Some(&2));
    assert_eq!(counts.get(&(2001, 2021)), Some(&1));

    let studio = filter_tracks(&tracks, true);
    assert_eq!(release_vs_added(&studio).get(&(2001, 2021)), None);

    let table = grid_table(&counts).to_string();
    assert!(table.contains("Released / Added"));
    assert!(table.contains("2020"));
    assert!(table.contains("2021"));
    assert!(table.contains("1994"));
    assert!(table.contains("2001"));
}

#[test]
fn test_write_playlist_tsv() {
    let source = playlist(
        "Road Trip",
        vec![saved("First Song", Some("album"), Some("2000"), "2020-01-01T00:00:00Z"), removed(), saved("Third", Some("album"), Some("2000"), "2020-01-01T00:00:00Z")],
    );

    let mut buf = Vec::new();
    write_playlist(&mut buf, &source).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Road Trip");
    assert_eq!(
        lines[1],
        "1\tFirst Song\tArtist One, Artist Two\tFirst Song LP\tspotify:track:FirstSong"
    );
    assert!(lines[2].starts_with("3\tThird\t"));
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_write_duplicates() {
    let source = playlist(
        "Mix",
        vec![
            saved("Hello", Some("album"), None, "2020-01-01T00:00:00Z"),
            saved("Other", Some("album"), None, "2020-01-01T00:00:00Z"),
            saved("Hello (Live)", Some("album"), None, "2020-01-01T00:00:00Z"),
        ],
    );
    let pairs = find_duplicates(&source.tracks);
    assert_eq!(pairs, vec![(0, 2)]);

    let mut buf = Vec::new();
    write_duplicates(&mut buf, &source, &pairs).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Mix duplicates");
    assert!(lines[1].starts_with("1\tHello\t"));
    assert!(lines[2].starts_with("3\tHello (Live)\t"));
}

#[test]
fn test_json_export_keeps_unknown_fields() {
    let source = playlist("Mix", vec![saved("A", Some("album"), Some("1994"), "2020-01-01T00:00:00Z"), removed()]);

    let mut buf = Vec::new();
    write_json(&mut buf, &source).unwrap();
    let value: Value = serde_json::from_slice(&buf).unwrap();

    assert_eq!(value["name"], "Mix");
    assert_eq!(value["tracks"][0]["is_local"], false);
    assert_eq!(value["tracks"][0]["track"]["popularity"], 42);
    assert!(value["tracks"][1]["track"].is_null());
}

#[test]
fn test_json_export_keeps_playlist_fields() {
    let summary: PlaylistSummary = serde_json::from_value(json!({
        "id": "p1",
        "name": "Mix",
        "description": "Road trip",
        "uri": "spotify:playlist:p1",
        "public": false,
        "owner": { "id": "u1", "display_name": "User One" },
        "tracks": { "href": url("playlists/p1/tracks"), "total": 0 }
    }))
    .unwrap();
    let source = Playlist::from(summary);

    let mut buf = Vec::new();
    write_json(&mut buf, &source).unwrap();
    let value: Value = serde_json::from_slice(&buf).unwrap();

    assert_eq!(value["description"], "Road trip");
    assert_eq!(value["uri"], "spotify:playlist:p1");
    assert_eq!(value["public"], false);
    assert_eq!(value["owner"]["display_name"], "User One");
    assert_eq!(value["tracks"], json!([]));
}

#[test]
fn test_output_format_from_filename() {
    assert_eq!(OutputFormat::from_filename("all.json"), Some(OutputFormat::Json));
    assert_eq!(OutputFormat::from_filename("all.TXT"), Some(OutputFormat::Txt));
    assert_eq!(OutputFormat::from_filename("all"), None);
}

fn library_routes() -> Vec<(String, Value)> {
    vec![
        (url("me"), json!({ "id": "u1", "display_name": "User One" })),
        (
            url("users/u1/playlists?limit=50"),
            json!({
                "items": [
                    { "id": "p1", "name": "Mine", "owner": { "id": "u1" }, "tracks": { "href": url("playlists/p1/tracks"), "total": 2 } },
                    { "id": "p2", "name": "Followed", "owner": { "id": "u2" }, "tracks": { "href": url("playlists/p2/tracks"), "total": 5 } }
                ],
                "next": null
            }),
        ),
        (
            url("playlists/p1/tracks?limit=100"),
            json!({ "items": [
                { "added_at": "2020-01-01T00:00:00Z", "track": { "name": "A", "uri": "spotify:track:a", "artists": [], "album": { "name": "X" } } },
                { "added_at": "2020-01-01T00:00:00Z", "track": null }
            ], "next": null }),
        ),
        (
            url("me/tracks?limit=50"),
            json!({ "items": [{ "added_at": "2020-01-01T00:00:00Z", "track": { "name": "L", "uri": "spotify:track:l", "album": { "name": "Y" } } }], "next": null }),
        ),
        (url("users/u1/playlists"), json!({ "id": "new1", "name": "Mine.1990s" })),
        (url("playlists/new1/tracks"), json!({ "snapshot_id": "snap" })),
    ]
}

#[tokio::test]
async fn test_library_lists_and_loads_playlists() {
    let session = CatalogSession::with_client(client(MockTransport::routes(library_routes())));
    let library = PlaylistLibrary::login(&session).await.unwrap();
    assert_eq!(library.me().id, "u1");

    let all = library.playlists(Include::Both, false).await;
    let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Liked Songs", "Mine", "Followed"]);

    let mine = library.playlists(Include::Playlists, true).await;
    assert_eq!(mine.len(), 1);

    let mut own = mine[0].clone();
    library.load(&mut own).await;
    assert_eq!(own.tracks.len(), 2);
    assert!(own.tracks[1].track.is_none());

    let mut likes = all[0].clone();
    library.load(&mut likes).await;
    assert_eq!(likes.tracks[0].track.as_ref().unwrap().name, "L");
}

#[tokio::test]
async fn test_library_creates_playlist_in_chunks() {
    let session = CatalogSession::with_client(client(MockTransport::routes(library_routes())));
    let library = PlaylistLibrary::login(&session).await.unwrap();
    let tracks: Vec<SavedTrack> = (0..250)
        .map(|i| saved(&format!("T{i}"), Some("album"), Some("1990"), "2020-01-01T00:00:00Z"))
        .collect();

    let created = library.create("Mine.1990s", &tracks).await.unwrap();
    assert_eq!(created.id, "new1");

    let posts: Vec<_> = session
        .client()
        .transport()
        .requests()
        .into_iter()
        .filter(|r| r.method == Method::POST)
        .collect();
    assert_eq!(posts.len(), 4);
    assert_eq!(posts[0].body.as_ref().unwrap()["public"], false);
    let sizes: Vec<usize> = posts[1..]
        .iter()
        .map(|r| r.body.as_ref().unwrap()["uris"].as_array().unwrap().len())
        .collect();
    assert_eq!(sizes, vec![100, 100, 50]);
}
