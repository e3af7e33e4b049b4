pub const DIG_MARKER: &str = "/dig?";
pub const PROTOCOL_MARKER: &str = "HTTP/";

pub const MOVIE_MARKER: &str = "/movie/";
pub const LIST_MARKER: &str = "/list/";
pub const HTML_SUFFIX: &str = ".html";

/// Resource id recorded for every home page hit.
pub const HOME_RESOURCE_ID: i64 = 1;
