//! Shareable links for individual tracks
//!
//! Every track is addressable at `<base>/track/<id>`. The QR codes printed for
//! a track encode this link; rendering the QR image itself is left to the UI.

use crate::error::{CoreError, Result};
use crate::types::TrackId;
use url::Url;

/// Deep link that opens a single track
pub fn track_link(base_url: &str, id: &TrackId) -> Result<String> {
    if id.as_str().trim().is_empty() {
        return Err(CoreError::EmptyTrackId);
    }

    let mut url = parse_base(base_url)?;
    url.path_segments_mut()
        .map_err(|()| CoreError::InvalidUrl(format!("{base_url} cannot be a base URL")))?
        .pop_if_empty()
        .push("track")
        .push(id.as_str());

    Ok(url.to_string())
}

/// File name offered when downloading a track's QR code
///
/// Each whitespace run in the title becomes a single `-`.
pub fn qr_download_name(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for c in title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }

    format!("qrcode-{slug}.png")
}

fn parse_base(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidUrl("base URL cannot be empty".into()));
    }

    let url = Url::parse(trimmed)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CoreError::InvalidUrl(format!(
            "unsupported scheme {other}, expected http:// or https://"
        ))),
    }
}
