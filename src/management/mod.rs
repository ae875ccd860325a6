mod chart;
mod duplicates;
mod library;
mod split;
mod writer;

pub use chart::{
    Compilations, added_years, filter_tracks, grid_table, histogram_table, release_decades, release_vs_added,
    release_years,
};
pub use duplicates::find_duplicates;
pub use library::{Include, PlaylistLibrary, decode_items};
pub use split::{SplitMode, split_playlist};
pub use writer::{OutputFormat, write_duplicates, write_json, write_playlist};
