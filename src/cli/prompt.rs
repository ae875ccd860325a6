use std::{
    io::{self, BufRead, Write},
    path::Path,
};

use tabled::Table;

use crate::{
    config,
    types::{Playlist, PlaylistTableRow},
    utils,
};

/// Prints the numbered playlist listing, with a `-1 All` entry when `all`.
pub fn list_playlists<W: Write>(out: &mut W, playlists: &[Playlist], all: bool) -> io::Result<()> {
    let mut rows: Vec<PlaylistTableRow> = playlists
        .iter()
        .enumerate()
        .map(|(i, p)| PlaylistTableRow {
            index: i.to_string(),
            name: p.name.clone(),
            tracks: if p.id == config::LIKES_ID {
                String::new()
            } else {
                p.total.to_string()
            },
        })
        .collect();

    if all {
        rows.push(PlaylistTableRow {
            index: "-1".to_string(),
            name: "All".to_string(),
            tracks: String::new(),
        });
    }

    writeln!(out, "{}", Table::new(rows))
}

/// Asks for one playlist index until a valid one is entered.
pub fn choose_playlist<R: BufRead, W: Write>(
    playlists: &[Playlist],
    input: &mut R,
    out: &mut W,
) -> io::Result<usize> {
    list_playlists(out, playlists, false)?;

    loop {
        let answer = ask("Choose: ", input, out)?;
        match answer.parse::<usize>() {
            Ok(choice) if choice < playlists.len() => return Ok(choice),
            _ => writeln!(out, "Please enter a valid integer index")?,
        }
    }
}

/// Asks for a selection like `0-2,5` until a valid one is entered; `-1`
/// selects every playlist.
pub fn choose_playlists<R: BufRead, W: Write>(
    playlists: &[Playlist],
    input: &mut R,
    out: &mut W,
) -> io::Result<Vec<usize>> {
    list_playlists(out, playlists, true)?;

    loop {
        let answer = ask("Choose: ", input, out)?;
        match utils::parse_choices(&answer, playlists.len()) {
            Ok(choices) if !choices.is_empty() => return Ok(choices),
            _ => writeln!(out, "Please enter valid integer indices")?,
        }
    }
}

/// Returns whether `path` may be written: it does not exist yet, `yes` was
/// given or the user confirmed.
pub fn confirm_overwrite<R: BufRead, W: Write>(
    path: &Path,
    yes: bool,
    input: &mut R,
    out: &mut W,
) -> io::Result<bool> {
    if yes || !path.exists() {
        return Ok(true);
    }

    let answer = ask(
        &format!("{} already exists, do you want to overwrite? [y/N] ", path.display()),
        input,
        out,
    )?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Prints `question` and reads one trimmed line.
///
/// Fails with `UnexpectedEof` when the input is closed, so prompt loops end.
pub fn ask<R: BufRead, W: Write>(question: &str, input: &mut R, out: &mut W) -> io::Result<String> {
    write!(out, "{question}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}
