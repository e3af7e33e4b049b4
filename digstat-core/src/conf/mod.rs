mod error;
mod loader;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::{load_config, load_or_default, parse_config, validate_config};
pub use types::{ConfigOverrides, DigstatConfig};
