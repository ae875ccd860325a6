use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use crate::{
    types::{Playlist, Track},
    warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Txt,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Json => "json",
        }
    }

    /// Format implied by a file name, `None` for unknown extensions.
    pub fn from_filename(filename: &str) -> Option<Self> {
        match filename.rsplit_once('.')?.1.to_ascii_lowercase().as_str() {
            "txt" | "tsv" => Some(OutputFormat::Txt),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Writes a playlist as its name followed by one tab-separated line per track.
///
/// Lines are `index, name, artists, album, uri` with 1-based indices; entries
/// without track data are logged and skipped, keeping the indices of the
/// remaining tracks.
pub fn write_playlist<W: Write>(out: &mut W, playlist: &Playlist) -> io::Result<()> {
    writeln!(out, "{}", playlist.name)?;
    for (i, saved) in playlist.tracks.iter().enumerate() {
        match &saved.track {
            Some(track) => write_track(out, track, i + 1)?,
            None => warning!("Track {} of {} has no data", i + 1, playlist.name),
        }
    }
    Ok(())
}

/// Writes the duplicate pairs found in a playlist, both tracks of a pair on
/// consecutive lines.
pub fn write_duplicates<W: Write>(
    out: &mut W,
    playlist: &Playlist,
    pairs: &[(usize, usize)],
) -> io::Result<()> {
    writeln!(out, "{} duplicates", playlist.name)?;
    for &(i, j) in pairs {
        for index in [i, j] {
            if let Some(track) = playlist.tracks.get(index).and_then(|t| t.track.as_ref()) {
                write_track(out, track, index + 1)?;
            }
        }
    }
    Ok(())
}

fn write_track<W: Write>(out: &mut W, track: &Track, index: usize) -> io::Result<()> {
    writeln!(
        out,
        "{index}\t{name}\t{artists}\t{album}\t{uri}",
        index = index,
        name = track.name,
        artists = track.artist_names(),
        album = track.album.name,
        uri = track.uri
    )
}

pub fn write_json<W: Write, S: Serialize + ?Sized>(out: &mut W, value: &S) -> io::Result<()> {
    serde_json::to_writer(out, value).map_err(io::Error::other)
}
