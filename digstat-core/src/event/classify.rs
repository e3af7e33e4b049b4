use crate::event::constants::{HOME_RESOURCE_ID, HTML_SUFFIX, LIST_MARKER, MOVIE_MARKER};
use crate::event::types::{PageType, UrlNode};

/// Map a page url to its semantic node: detail page, then listing page, then home.
pub fn classify(url: &str, time: &str) -> UrlNode {
    let (page_type, resource_id) = if let Some(id) = resource_after(url, MOVIE_MARKER) {
        (PageType::Movie, id)
    } else if let Some(id) = resource_after(url, LIST_MARKER) {
        (PageType::List, id)
    } else {
        (PageType::Home, HOME_RESOURCE_ID)
    };

    UrlNode {
        page_type,
        resource_id,
        url: url.to_string(),
        time: time.to_string(),
    }
}

/// `Some(id)` when `marker` is followed by `.html` somewhere later in `url`.
/// The id is `0` when the segment between them is not a number.
fn resource_after(url: &str, marker: &str) -> Option<i64> {
    let start = url.find(marker)? + marker.len();
    let rest = &url[start..];
    let end = rest.find(HTML_SUFFIX)?;

    Some(rest[..end].parse().unwrap_or(0))
}
