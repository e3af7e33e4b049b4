pub mod bucket;
pub mod cli;
pub mod conf;
pub mod event;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod store;

#[cfg(test)]
mod test_helpers;
