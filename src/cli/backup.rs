use std::{
    io,
    path::{Path, PathBuf},
};

use clap::Args;

use crate::{
    config, error, info,
    management::{self, Include, OutputFormat, PlaylistLibrary},
    spotify::Transport,
    success,
    types::Playlist,
    utils, warning,
};

use super::{open_session, prompt};

#[derive(Args, Debug, Clone)]
pub struct BackupOptions {
    /// Use an existing OAuth token instead of the browser flow
    #[clap(long, value_name = "OAUTH_TOKEN")]
    pub token: Option<String>,

    /// Export liked songs, playlists or both
    #[clap(long, value_enum, default_value = "both")]
    pub include: Include,

    /// Folder receiving one file per playlist
    #[clap(long, default_value = "backup")]
    pub folder: PathBuf,

    #[clap(long, value_enum, default_value = "txt")]
    pub format: OutputFormat,

    /// Write every chosen playlist into one file, asked for when not given
    #[clap(long, value_name = "FILE")]
    pub single: Option<Option<String>>,

    /// Only playlists owned by you
    #[clap(long)]
    pub mine: bool,

    /// Also write a duplicates file per playlist (folder mode only)
    #[clap(long = "check-duplicates", visible_alias = "cd")]
    pub check_duplicates: bool,

    /// Overwrite existing files without asking
    #[clap(short, long)]
    pub yes: bool,
}

pub async fn backup(opts: BackupOptions) {
    let session = open_session(opts.token.clone(), config::SCOPE_READ).await;
    let library = match PlaylistLibrary::login(&session).await {
        Ok(library) => library,
        Err(e) => error!("Cannot load user info: {}", e),
    };

    let playlists = library.playlists(opts.include, opts.mine).await;
    if playlists.is_empty() {
        warning!("No playlists to export");
        return;
    }

    let chosen = match prompt::choose_playlists(&playlists, &mut io::stdin().lock(), &mut io::stdout()) {
        Ok(chosen) => chosen,
        Err(e) => error!("No playlists chosen: {}", e),
    };
    let selected: Vec<Playlist> = chosen.into_iter().map(|i| playlists[i].clone()).collect();

    let result = if let Some(file) = opts.single.clone() {
        backup_single(&library, selected, file, &opts).await
    } else {
        backup_folder(&library, selected, &opts).await
    };

    if let Err(e) = result {
        error!("Export failed: {}", e);
    }
}

async fn backup_single<T: Transport>(
    library: &PlaylistLibrary<'_, T>,
    mut playlists: Vec<Playlist>,
    file: Option<String>,
    opts: &BackupOptions,
) -> io::Result<()> {
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout();
    let mut format = opts.format;

    let mut file = match file {
        Some(name) if prompt::confirm_overwrite(Path::new(&name), opts.yes, &mut stdin, &mut stdout)? => {
            Some(name)
        }
        _ => None,
    };
    let file = loop {
        if let Some(name) = file.take() {
            break name;
        }

        let name = prompt::ask("Enter a file name (e.g. playlists.txt): ", &mut stdin, &mut stdout)?;
        if name.is_empty() {
            continue;
        }
        format = OutputFormat::from_filename(&name).unwrap_or(format);
        if prompt::confirm_overwrite(Path::new(&name), opts.yes, &mut stdin, &mut stdout)? {
            file = Some(name);
        }
    };
    drop(stdin);

    for playlist in playlists.iter_mut() {
        library.load(playlist).await;
    }

    info!("Writing file: {}", file);
    let mut buf = Vec::new();
    match format {
        OutputFormat::Json => management::write_json(&mut buf, &playlists)?,
        OutputFormat::Txt => {
            for playlist in &playlists {
                info!("Writing {}", playlist.name);
                management::write_playlist(&mut buf, playlist)?;
                buf.push(b'\n');
            }
        }
    }
    async_fs::write(&file, buf).await?;
    success!("Wrote file: {}", file);

    Ok(())
}

async fn backup_folder<T: Transport>(
    library: &PlaylistLibrary<'_, T>,
    playlists: Vec<Playlist>,
    opts: &BackupOptions,
) -> io::Result<()> {
    async_fs::create_dir_all(&opts.folder).await?;

    for mut playlist in playlists {
        let stem = utils::playlist_filename(&playlist.name);
        let path = opts
            .folder
            .join(format!("{}.{}", stem, opts.format.extension()));

        if !confirm(&path, opts.yes)? {
            continue;
        }

        library.load(&mut playlist).await;

        info!("Writing file: {}", path.display());
        let mut buf = Vec::new();
        match opts.format {
            OutputFormat::Json => management::write_json(&mut buf, &playlist)?,
            OutputFormat::Txt => management::write_playlist(&mut buf, &playlist)?,
        }
        async_fs::write(&path, buf).await?;

        if opts.check_duplicates {
            let path = opts.folder.join(format!("{stem}_duplicates.txt"));
            if !confirm(&path, opts.yes)? {
                continue;
            }

            let pairs = management::find_duplicates(&playlist.tracks);
            info!("Writing file: {} ({} pairs)", path.display(), pairs.len());
            let mut buf = Vec::new();
            management::write_duplicates(&mut buf, &playlist, &pairs)?;
            async_fs::write(&path, buf).await?;
        }
    }

    success!("Export finished in {}", opts.folder.display());
    Ok(())
}

fn confirm(path: &Path, yes: bool) -> io::Result<bool> {
    prompt::confirm_overwrite(path, yes, &mut io::stdin().lock(), &mut io::stdout())
}
