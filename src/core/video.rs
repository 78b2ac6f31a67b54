//! YouTube URL recognition for video entries.

use url::Url;

pub fn is_youtube(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Extracts the video id from the `watch?v=`, `youtu.be/` and `/embed/` URL
/// shapes. Returns `None` for anything it cannot read.
pub fn youtube_id(url: &str) -> Option<String> {
    let id = if let Some(parsed) = watch_url(url) {
        parsed
            .query_pairs()
            .find(|(name, _)| name == "v")
            .map(|(_, value)| value.into_owned())
    } else if let Some((_, rest)) = url.split_once("youtu.be/") {
        rest.split(['?', '&', '#']).next().map(str::to_string)
    } else if let Some((_, rest)) = url.split_once("/embed/") {
        if is_youtube(url) {
            rest.split(['?', '&', '#', '/']).next().map(str::to_string)
        } else {
            None
        }
    } else {
        None
    };

    id.filter(|id| is_plausible_id(id))
}

fn watch_url(url: &str) -> Option<Url> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let on_youtube = host == "youtube.com" || host.ends_with(".youtube.com");
    (on_youtube && parsed.path() == "/watch").then_some(parsed)
}

// ids end up inside URLs we build, so only the characters YouTube uses pass
fn is_plausible_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub fn thumbnail_url(id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", id)
}

pub fn embed_url(id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", id)
}
