use crate::event::constants::{DIG_MARKER, PROTOCOL_MARKER};
use crate::event::types::DigEvent;
use url::Url;

/// Extract the beacon payload from one access-log line.
///
/// Returns `None` when the line carries no `/dig?` request or the payload
/// cannot be read as a query string. Missing fields come back empty.
pub fn parse_line(raw: &str) -> Option<DigEvent> {
    let line = raw.trim();

    // The marker must follow at least the request method.
    let pos = match line.find(DIG_MARKER) {
        Some(p) if p >= 1 => p + DIG_MARKER.len(),
        _ => return None,
    };

    let rest = &line[pos..];
    let payload = match rest.find(PROTOCOL_MARKER) {
        Some(end) => &rest[..end],
        None => rest,
    };

    let parsed = match Url::parse(&format!("http://localhost/?{}", payload.trim())) {
        Ok(u) => u,
        Err(e) => {
            tracing::debug!(error = %e, "dig payload is not a valid url");
            return None;
        }
    };

    Some(DigEvent {
        time: field(&parsed, "time"),
        url: field(&parsed, "url"),
        refer: field(&parsed, "refer"),
        ua: field(&parsed, "ua"),
    })
}

/// First value of `name`, like a form lookup.
fn field(url: &Url, name: &str) -> String {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default()
}
