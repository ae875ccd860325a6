use chrono::Local;
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config,
    error::CatalogError,
    info,
    spotify::{CatalogSession, Transport},
    types::{AddTracksRequest, CreatePlaylistRequest, CreatedPlaylist, Playlist, PlaylistSummary, SavedTrack, User},
    utils, warning,
};

/// Which collections a command works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Include {
    Likes,
    Playlists,
    Both,
}

impl Include {
    pub fn likes(self) -> bool {
        matches!(self, Include::Likes | Include::Both)
    }

    pub fn playlists(self) -> bool {
        matches!(self, Include::Playlists | Include::Both)
    }
}

/// Playlist access on behalf of the logged in user.
pub struct PlaylistLibrary<'a, T> {
    session: &'a CatalogSession<T>,
    me: User,
}

impl<'a, T: Transport> PlaylistLibrary<'a, T> {
    /// Loads the current user and returns the library for them.
    pub async fn login(session: &'a CatalogSession<T>) -> Result<Self, CatalogError> {
        info!("Loading user info...");
        let me: User = serde_json::from_value(session.get("me", &[]).await)?;
        info!(
            "Logged in as {} ({})",
            me.display_name.as_deref().unwrap_or(&me.id),
            me.id
        );

        Ok(PlaylistLibrary { session, me })
    }

    pub fn me(&self) -> &User {
        &self.me
    }

    /// Lists the liked songs pseudo playlist and/or the user's playlists,
    /// tracks not loaded yet.
    ///
    /// With `mine` only playlists owned by the user are kept.
    pub async fn playlists(&self, include: Include, mine: bool) -> Vec<Playlist> {
        let mut playlists = Vec::new();

        if include.likes() {
            playlists.push(liked_songs());
        }

        if include.playlists() {
            info!("Loading playlists...");
            let items = self
                .session
                .list(&format!("users/{}/playlists", self.me.id), &[("limit", "50")])
                .await;
            let mut summaries: Vec<PlaylistSummary> = decode_items(items);
            info!("Found {} playlists", summaries.len());

            if mine {
                summaries.retain(|p| p.owner.as_ref().is_some_and(|o| o.id == self.me.id));
            }
            playlists.extend(summaries.into_iter().map(Playlist::from));
        }

        playlists
    }

    /// Fetches every track of the playlist.
    pub async fn load(&self, playlist: &mut Playlist) {
        let pb = utils::spinner(format!("Loading {}...", playlist.name));
        let items = if playlist.id == config::LIKES_ID {
            self.session.list("me/tracks", &[("limit", "50")]).await
        } else {
            let href = playlist
                .tracks_href
                .clone()
                .unwrap_or_else(|| format!("playlists/{}/tracks", playlist.id));
            self.session.list(&href, &[("limit", "100")]).await
        };
        pb.finish_and_clear();

        playlist.tracks = decode_items(items);
        info!("Loaded {} ({} songs)", playlist.name, playlist.tracks.len());
    }

    /// Creates a private playlist and fills it with `tracks`.
    pub async fn create(&self, name: &str, tracks: &[SavedTrack]) -> Result<CreatedPlaylist, CatalogError> {
        let request = CreatePlaylistRequest {
            name: name.to_string(),
            public: false,
            description: format!(
                "Created by Spotify Data Tools at {}",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            ),
        };
        let body = serde_json::to_value(&request)?;
        let created: CreatedPlaylist = serde_json::from_value(
            self.session
                .post(&format!("users/{}/playlists", self.me.id), &body)
                .await,
        )?;
        info!("Created playlist: {}", created.name);

        if !tracks.is_empty() {
            let added = self.add_tracks(&created, tracks).await?;
            info!("Added total {} tracks to playlist: {}", added, created.name);
        }

        Ok(created)
    }

    /// Adds tracks in chunks of [`config::PLAYLIST_ADD_CHUNK`], returns how many
    /// were sent. Tracks without data are skipped.
    pub async fn add_tracks(&self, playlist: &CreatedPlaylist, tracks: &[SavedTrack]) -> Result<usize, CatalogError> {
        let uris: Vec<String> = tracks
            .iter()
            .filter_map(|t| t.track.as_ref())
            .map(|t| t.uri.clone())
            .filter(|uri| !uri.is_empty())
            .collect();

        for chunk in uris.chunks(config::PLAYLIST_ADD_CHUNK) {
            let body = serde_json::to_value(AddTracksRequest {
                uris: chunk.to_vec(),
            })?;
            self.session
                .post(&format!("playlists/{}/tracks", playlist.id), &body)
                .await;
        }

        Ok(uris.len())
    }
}

fn liked_songs() -> Playlist {
    Playlist {
        id: config::LIKES_ID.to_string(),
        name: config::LIKES_PLAYLIST.to_string(),
        owner: None,
        tracks_href: None,
        total: 0,
        tracks: Vec::new(),
        extra: Default::default(),
    }
}

/// Converts opaque items into a typed view, items of another shape are
/// skipped with a warning.
pub fn decode_items<I: DeserializeOwned>(items: Vec<Value>) -> Vec<I> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warning!("Skipping item {}: {}", i, e);
                None
            }
        })
        .collect()
}
