use std::io;

use clap::Args;

use crate::{
    config, error, info,
    management::{self, Include, PlaylistLibrary, SplitMode},
    success, warning,
};

use super::{open_session, prompt};

#[derive(Args, Debug, Clone)]
pub struct SplitOptions {
    /// Use an existing OAuth token instead of the browser flow
    #[clap(long, value_name = "OAUTH_TOKEN")]
    pub token: Option<String>,

    #[clap(long, value_enum, default_value = "release-date")]
    pub mode: SplitMode,

    /// Put compilations into a separate playlist, their release dates are misleading
    #[clap(long = "separate-compilations", visible_alias = "sc")]
    pub separate_compilations: bool,
}

/// Splits one chosen playlist into new private playlists.
pub async fn split(opts: SplitOptions) {
    let session = open_session(opts.token.clone(), config::SCOPE_MODIFY).await;
    let library = match PlaylistLibrary::login(&session).await {
        Ok(library) => library,
        Err(e) => error!("Cannot load user info: {}", e),
    };

    let playlists = library.playlists(Include::Both, false).await;
    let chosen = match prompt::choose_playlist(&playlists, &mut io::stdin().lock(), &mut io::stdout()) {
        Ok(chosen) => chosen,
        Err(e) => error!("No playlist chosen: {}", e),
    };
    let mut playlist = playlists[chosen].clone();
    library.load(&mut playlist).await;

    let groups = management::split_playlist(&playlist, opts.mode, opts.separate_compilations);
    if groups.is_empty() {
        warning!("Nothing to split in {}", playlist.name);
        return;
    }
    info!("Creating {} playlists from {}", groups.len(), playlist.name);

    for (name, tracks) in &groups {
        if let Err(e) = library.create(name, tracks).await {
            error!("Cannot create playlist {}: {}", name, e);
        }
    }

    success!("Split {} into {} playlists", playlist.name, groups.len());
}
