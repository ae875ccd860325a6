use std::{io, path::PathBuf};

use clap::Args;

use crate::{
    config, error, info,
    management::{self, Include, PlaylistLibrary},
    success, utils, warning,
};

use super::{open_session, prompt};

#[derive(Args, Debug, Clone)]
pub struct DuplicatesOptions {
    /// Use an existing OAuth token instead of the browser flow
    #[clap(long, value_name = "OAUTH_TOKEN")]
    pub token: Option<String>,

    /// Search liked songs, playlists or both
    #[clap(long, value_enum, default_value = "playlists")]
    pub include: Include,

    /// Overwrite an existing duplicates file without asking
    #[clap(short, long)]
    pub yes: bool,
}

/// Lists pairs of similar tracks of one chosen playlist into
/// `<playlist>_duplicates.txt`.
pub async fn duplicates(opts: DuplicatesOptions) {
    let session = open_session(opts.token.clone(), config::SCOPE_READ).await;
    let library = match PlaylistLibrary::login(&session).await {
        Ok(library) => library,
        Err(e) => error!("Cannot load user info: {}", e),
    };

    let playlists = library.playlists(opts.include, false).await;
    if playlists.is_empty() {
        warning!("No playlists to check");
        return;
    }

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout();
    let chosen = match prompt::choose_playlist(&playlists, &mut stdin, &mut stdout) {
        Ok(chosen) => chosen,
        Err(e) => error!("No playlist chosen: {}", e),
    };
    let mut playlist = playlists[chosen].clone();

    let path = PathBuf::from(format!("{}_duplicates.txt", utils::playlist_filename(&playlist.name)));
    match prompt::confirm_overwrite(&path, opts.yes, &mut stdin, &mut stdout) {
        Ok(true) => {}
        Ok(false) => return,
        Err(e) => error!("{}", e),
    }
    drop(stdin);

    library.load(&mut playlist).await;
    let pairs = management::find_duplicates(&playlist.tracks);
    info!("Found {} duplicate pairs in {}", pairs.len(), playlist.name);

    let mut buf = Vec::new();
    if let Err(e) = management::write_duplicates(&mut buf, &playlist, &pairs) {
        error!("Cannot render duplicates: {}", e);
    }
    if let Err(e) = async_fs::write(&path, buf).await {
        error!("Cannot write {}: {}", path.display(), e);
    }
    success!("Wrote file: {}", path.display());
}
