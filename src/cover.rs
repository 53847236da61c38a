//! Tournament cover image discovery.
//!
//! Tournament announcements on the osu! forums open with a banner image.
//! Given the raw BBCode of the first post, pick the image to use as the
//! tournament's cover.

use thiserror::Error;
use url::Url;

/// Errors from forum link handling.
#[derive(Debug, Error)]
pub enum CoverError {
    #[error("Invalid forum link: {0}")]
    InvalidLink(#[from] url::ParseError),

    #[error("Not a forum topic link: {0}")]
    NotATopicLink(String),
}

/// Extract the topic id from a forum post link.
///
/// `https://osu.ppy.sh/community/forums/topics/1836729?n=1` yields `"1836729"`.
pub fn topic_id_from_link(link: &str) -> Result<String, CoverError> {
    let url = Url::parse(link)?;
    let not_topic = || CoverError::NotATopicLink(link.to_string());

    let mut segments = url.path_segments().ok_or_else(not_topic)?;
    segments
        .find(|s| *s == "topics")
        .and_then(|_| segments.next())
        .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .ok_or_else(not_topic)
}

/// Pick the cover image from a post's raw BBCode.
///
/// Scans `[img]...[/img]` contents in order. Link-wrapped images and flag
/// sprites are skipped; Google Drive links are rewritten to their thumbnail
/// endpoint. Returns `None` when the post has no usable image.
pub fn extract_cover_url(raw_body: &str) -> Option<String> {
    let mut candidates = Vec::new();

    for fragment in raw_body.split("img]") {
        let mut link = fragment.trim_end_matches(['/', '[']).to_string();
        if !link.contains("https") || link.contains("url=") {
            continue;
        }

        if link.contains("drive.google.com") {
            if let Some((_, id)) = link.split_once("id=") {
                candidates.push(format!("https://drive.google.com/thumbnail?id={}", id));
            }
        }

        if !(link.contains(".png") || link.contains(".jpg") || link.contains(".jpeg")) {
            link.push_str(".png");
        }

        if !link.contains("osuflags") {
            candidates.push(link);
            break;
        }
    }

    candidates.into_iter().next()
}
