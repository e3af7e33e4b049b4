use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Fields carried in the `/dig?` beacon query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigEvent {
    pub time: String,
    pub url: String,
    pub refer: String,
    pub ua: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageType {
    Home,
    List,
    Movie,
}

impl PageType {
    pub fn as_str(self) -> &'static str {
        match self {
            PageType::Home => "home",
            PageType::List => "list",
            PageType::Movie => "movie",
        }
    }

    pub fn all() -> [PageType; 3] {
        [PageType::Home, PageType::List, PageType::Movie]
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic view of the requested page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlNode {
    pub page_type: PageType,
    /// Movie or list id. Home pages always carry the sentinel `1`.
    pub resource_id: i64,
    pub url: String,
    pub time: String,
}

/// One parsed request, shared read-only by the PV and UV paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitEvent {
    pub event: DigEvent,
    pub visitor_id: String,
    pub node: UrlNode,
}

pub type SharedVisit = Arc<VisitEvent>;

/// Label that prefixes every derived counter key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterKind {
    #[default]
    Pv,
    Uv,
}

impl CounterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CounterKind::Pv => "pv",
            CounterKind::Uv => "uv",
        }
    }
}

impl fmt::Display for CounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageInstruction {
    pub kind: CounterKind,
    pub node: UrlNode,
}
