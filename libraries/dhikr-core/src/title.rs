//! Display titles derived from uploaded filenames
//!
//! Catalog rows created from storage uploads often have no title of their own,
//! so the filename is turned into something presentable:
//! `morning_dzikir-part-2.mp3` becomes `Morning Dzikir Part 2`.

/// Build a display title from a filename
///
/// Drops the final extension, turns `_` and `-` into spaces and capitalizes
/// each space-separated word (first letter upper, rest lower).
pub fn title_from_filename(filename: &str) -> String {
    strip_extension(filename)
        .replace(['_', '-'], " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Final path segment of a URL or path, without query string
pub fn filename_from_url(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    without_query.rsplit('/').next().unwrap_or(without_query)
}

fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(dot) if dot + 1 < filename.len() && !filename[dot + 1..].contains('/') => {
            &filename[..dot]
        }
        _ => filename,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
