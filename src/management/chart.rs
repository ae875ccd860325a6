use std::{
    collections::{BTreeMap, BTreeSet},
    iter,
};

use clap::ValueEnum;
use tabled::{Table, builder::Builder};

use crate::{
    config,
    types::{HistogramRow, SavedTrack},
    utils,
};

const BAR_WIDTH: usize = 40;

/// Whether tracks from compilation albums are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Compilations {
    Include,
    Exclude,
    Both,
}

impl Compilations {
    /// The `exclude_compilations` flags to chart, in display order.
    pub fn variants(self) -> Vec<bool> {
        match self {
            Compilations::Include => vec![false],
            Compilations::Exclude => vec![true],
            Compilations::Both => vec![false, true],
        }
    }
}

/// Keeps tracks with data, dropping compilations (or unknown album types) when
/// `exclude_compilations` is set.
pub fn filter_tracks(tracks: &[SavedTrack], exclude_compilations: bool) -> Vec<&SavedTrack> {
    tracks
        .iter()
        .filter(|saved| match &saved.track {
            None => false,
            Some(track) => {
                !exclude_compilations
                    || track
                        .album
                        .album_type
                        .as_deref()
                        .is_some_and(|kind| kind != config::ALBUM_TYPE_COMPILATION)
            }
        })
        .collect()
}

pub fn release_years(tracks: &[&SavedTrack]) -> BTreeMap<i32, usize> {
    count(tracks.iter().filter_map(|saved| {
        let release_date = saved.track.as_ref()?.album.release_date.as_deref()?;
        utils::release_to_year(release_date)
    }))
}

pub fn release_decades(tracks: &[&SavedTrack]) -> BTreeMap<i32, usize> {
    let mut decades = BTreeMap::new();
    for (year, n) in release_years(tracks) {
        *decades.entry(utils::year_to_decade(year)).or_insert(0) += n;
    }
    decades
}

pub fn added_years(tracks: &[&SavedTrack]) -> BTreeMap<i32, usize> {
    count(
        tracks
            .iter()
            .filter_map(|saved| utils::added_year(saved.added_at.as_deref()?)),
    )
}

/// Track counts per `(release year, year added)`.
///
/// Tracks missing either date are skipped.
pub fn release_vs_added(tracks: &[&SavedTrack]) -> BTreeMap<(i32, i32), usize> {
    let mut counts = BTreeMap::new();
    for saved in tracks {
        let released = saved
            .track
            .as_ref()
            .and_then(|track| track.album.release_date.as_deref())
            .and_then(utils::release_to_year);
        let added = saved.added_at.as_deref().and_then(utils::added_year);

        if let (Some(released), Some(added)) = (released, added) {
            *counts.entry((released, added)).or_insert(0) += 1;
        }
    }
    counts
}

fn count(keys: impl Iterator<Item = i32>) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Renders a histogram as a table with a bar column scaled to the largest bucket.
pub fn histogram_table(counts: &BTreeMap<i32, usize>, label: impl Fn(i32) -> String) -> Table {
    let max = counts.values().copied().max().unwrap_or(0);
    let rows: Vec<HistogramRow> = counts
        .iter()
        .map(|(&bucket, &n)| HistogramRow {
            bucket: label(bucket),
            count: n,
            bar: "█".repeat(scaled(n, max)),
        })
        .collect();

    Table::new(rows)
}

/// Renders release years as rows against years added as columns, empty cells
/// for pairs without tracks.
pub fn grid_table(counts: &BTreeMap<(i32, i32), usize>) -> Table {
    let released: BTreeSet<i32> = counts.keys().map(|&(year, _)| year).collect();
    let added: BTreeSet<i32> = counts.keys().map(|&(_, year)| year).collect();

    let mut builder = Builder::new();
    builder.push_record(iter::once("Released / Added".to_string()).chain(added.iter().map(i32::to_string)));
    for year in released {
        let cells = added.iter().map(|added| {
            counts
                .get(&(year, *added))
                .map(usize::to_string)
                .unwrap_or_default()
        });
        builder.push_record(iter::once(year.to_string()).chain(cells));
    }

    builder.build()
}

fn scaled(n: usize, max: usize) -> usize {
    if max == 0 {
        return 0;
    }
    // never hide a non-empty bucket
    ((n * BAR_WIDTH) / max).max(usize::from(n > 0))
}
