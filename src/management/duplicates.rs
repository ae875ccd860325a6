use crate::types::SavedTrack;

/// Number of leading characters of the track name compared.
const NAME_PREFIX: usize = 5;

/// Finds pairs of tracks that look like the same song.
///
/// Two tracks match when their names share the first five characters and
/// their artist lists are equal. Returns index pairs `(i, j)` with `i < j`
/// into `tracks`; entries without track data never match.
pub fn find_duplicates(tracks: &[SavedTrack]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();

    for (i, first) in tracks.iter().enumerate() {
        let Some(first) = first.track.as_ref() else {
            continue;
        };

        for (j, second) in tracks.iter().enumerate().skip(i + 1) {
            let Some(second) = second.track.as_ref() else {
                continue;
            };

            if name_prefix(&first.name) == name_prefix(&second.name)
                && first.artists == second.artists
            {
                pairs.push((i, j));
            }
        }
    }

    pairs
}

fn name_prefix(name: &str) -> &str {
    match name.char_indices().nth(NAME_PREFIX) {
        Some((end, _)) => &name[..end],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn saved(name: &str, artist: &str) -> SavedTrack {
        serde_json::from_value(json!({
            "added_at": "2021-01-01T00:00:00Z",
            "track": {
                "name": name,
                "uri": format!("spotify:track:{name}"),
                "artists": [{ "id": artist, "name": artist }],
                "album": { "name": "Album" }
            }
        }))
        .unwrap()
    }

    fn removed() -> SavedTrack {
        serde_json::from_value(json!({ "added_at": null, "track": null })).unwrap()
    }

    #[test]
    fn matches_on_prefix_and_artists() {
        let tracks = vec![
            saved("Hello World", "a"),
            saved("Other", "a"),
            saved("Hello - Remastered", "a"),
            saved("Hello World", "b"),
        ];
        assert_eq!(find_duplicates(&tracks), vec![(0, 2)]);
    }

    #[test]
    fn skips_removed_tracks() {
        let tracks = vec![removed(), saved("Song", "a"), removed(), saved("Song", "a")];
        assert_eq!(find_duplicates(&tracks), vec![(1, 3)]);
    }

    #[test]
    fn short_and_multibyte_names() {
        let tracks = vec![saved("Été", "a"), saved("Été", "a"), saved("Étéxyz", "a")];
        assert_eq!(find_duplicates(&tracks), vec![(0, 1)]);
    }
}
