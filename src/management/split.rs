use std::collections::BTreeMap;

use clap::ValueEnum;

use crate::{
    config,
    types::{Playlist, SavedTrack},
    utils, warning,
};

/// Characteristic a playlist is split by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SplitMode {
    /// One playlist per release decade
    ReleaseDate,
    /// One playlist per year the track was added
    DateAdded,
}

/// Groups the tracks of `playlist` into new playlists keyed by name.
///
/// Names are `<playlist>.<suffix>` with suffixes like `1990s`, `added2021`
/// or `compilation`. With `separate_compilations` tracks from compilation
/// albums go to their own playlist in release-date mode, since compilations
/// carry misleading release dates. Tracks without data or without a usable
/// date are skipped with a warning. Track order is preserved per group.
pub fn split_playlist(
    playlist: &Playlist,
    mode: SplitMode,
    separate_compilations: bool,
) -> BTreeMap<String, Vec<SavedTrack>> {
    let mut groups: BTreeMap<String, Vec<SavedTrack>> = BTreeMap::new();

    for (i, saved) in playlist.tracks.iter().enumerate() {
        let Some(suffix) = suffix_for(saved, mode, separate_compilations) else {
            warning!("Skipping track {} of {}: no usable date", i + 1, playlist.name);
            continue;
        };

        groups
            .entry(format!("{}.{}", playlist.name, suffix))
            .or_default()
            .push(saved.clone());
    }

    groups
}

fn suffix_for(saved: &SavedTrack, mode: SplitMode, separate_compilations: bool) -> Option<String> {
    match mode {
        SplitMode::ReleaseDate => {
            let track = saved.track.as_ref()?;
            if separate_compilations
                && track.album.album_type.as_deref() == Some(config::ALBUM_TYPE_COMPILATION)
            {
                return Some(config::ALBUM_TYPE_COMPILATION.to_string());
            }

            let year = utils::release_to_year(track.album.release_date.as_deref()?)?;
            Some(utils::year_to_decade_str(year))
        }
        SplitMode::DateAdded => {
            let year = utils::added_year(saved.added_at.as_deref()?)?;
            Some(format!("added{year}"))
        }
    }
}
