//! Request model and the pure transforms that build it from a log line.
//!
//! raw line
//! parse_line  -> DigEvent
//! identify    -> visitor id
//! classify    -> UrlNode
//! VisitEvent

mod classify;
pub mod constants;
mod parse;
mod types;
mod visitor;


pub use classify::classify;
pub use parse::parse_line;
pub use types::*;
pub use visitor::identify;

impl VisitEvent {
    pub fn from_event(event: DigEvent) -> Self {
        let visitor_id = identify(&event.refer, &event.ua);
        let node = classify(&event.url, &event.time);

        Self {
            event,
            visitor_id,
            node,
        }
    }
}
