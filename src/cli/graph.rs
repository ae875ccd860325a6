use std::{io, path::PathBuf};

use clap::Args;
use tabled::Table;

use crate::{
    config, error, info,
    management::{self, Compilations, Include, PlaylistLibrary},
    success,
    types::{Playlist, SavedTrack},
    utils, warning,
};

use super::{open_session, prompt};

#[derive(Args, Debug, Clone)]
pub struct GraphOptions {
    /// Use an existing OAuth token instead of the browser flow
    #[clap(long, value_name = "OAUTH_TOKEN")]
    pub token: Option<String>,

    #[clap(long, value_enum, default_value = "both")]
    pub include: Include,

    /// Count tracks from compilations, whose release dates are misleading
    #[clap(short, long, value_enum, default_value = "both")]
    pub compilations: Compilations,

    /// Only playlists owned by you
    #[clap(long)]
    pub mine: bool,

    /// Save the charts as text files instead of only printing them
    #[clap(long)]
    pub save: bool,

    /// Overwrite existing chart files without asking
    #[clap(short, long)]
    pub yes: bool,
}

type Chart = fn(&[&SavedTrack]) -> Table;

const CHARTS: [(&str, &str, Chart); 4] = [
    ("release_year", "Release Year", release_year_chart),
    ("release_decade", "Release Decade", release_decade_chart),
    ("date_added", "Year Added", added_year_chart),
    ("release_vs_added", "Release Year vs Year Added", release_vs_added_chart),
];

fn release_year_chart(tracks: &[&SavedTrack]) -> Table {
    management::histogram_table(&management::release_years(tracks), |year| year.to_string())
}

fn release_decade_chart(tracks: &[&SavedTrack]) -> Table {
    management::histogram_table(&management::release_decades(tracks), utils::year_to_decade_str)
}

fn added_year_chart(tracks: &[&SavedTrack]) -> Table {
    management::histogram_table(&management::added_years(tracks), |year| year.to_string())
}

fn release_vs_added_chart(tracks: &[&SavedTrack]) -> Table {
    management::grid_table(&management::release_vs_added(tracks))
}

/// Prints release and date-added charts of the chosen playlists.
pub async fn graph(opts: GraphOptions) {
    let session = open_session(opts.token.clone(), config::SCOPE_READ).await;
    let library = match PlaylistLibrary::login(&session).await {
        Ok(library) => library,
        Err(e) => error!("Cannot load user info: {}", e),
    };

    let playlists = library.playlists(opts.include, opts.mine).await;
    if playlists.is_empty() {
        warning!("No playlists to chart");
        return;
    }

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout();
    let chosen = match prompt::choose_playlists(&playlists, &mut stdin, &mut stdout) {
        Ok(chosen) => chosen,
        Err(e) => error!("No playlists chosen: {}", e),
    };

    let name = if chosen.len() == 1 {
        playlists[chosen[0]].name.clone()
    } else {
        match prompt::ask("What's the name for this set of playlists? ", &mut stdin, &mut stdout) {
            Ok(name) => name,
            Err(e) => error!("{}", e),
        }
    };
    drop(stdin);

    let mut combined = Playlist {
        id: String::new(),
        name,
        owner: None,
        tracks_href: None,
        total: 0,
        tracks: Vec::new(),
        extra: Default::default(),
    };
    for i in chosen {
        let mut playlist = playlists[i].clone();
        library.load(&mut playlist).await;
        combined.tracks.append(&mut playlist.tracks);
    }

    for (key, title, chart) in CHARTS {
        let mut rendered = String::new();
        for exclude in opts.compilations.variants() {
            let tracks = management::filter_tracks(&combined.tracks, exclude);
            let table = chart(&tracks);

            rendered.push_str(&format!(
                "{} - {} ({} Compilations)\n{}\n\n",
                combined.name,
                title,
                if exclude { "Exc." } else { "Inc." },
                table
            ));
        }
        print!("{rendered}");

        if opts.save {
            let path = PathBuf::from(format!("{}_{}.txt", combined.name.replace(' ', "_"), key));
            match prompt::confirm_overwrite(&path, opts.yes, &mut io::stdin().lock(), &mut io::stdout()) {
                Ok(true) => match async_fs::write(&path, rendered).await {
                    Ok(()) => success!("Saved {}", path.display()),
                    Err(e) => warning!("Cannot save {}: {}", path.display(), e),
                },
                Ok(false) => info!("Skipped {}", path.display()),
                Err(e) => error!("{}", e),
            }
        }
    }
}
