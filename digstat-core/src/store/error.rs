use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to connect to counter store at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: redis::RedisError,
    },

    #[error("{op} on {key} failed: {source}")]
    Command {
        op: &'static str,
        key: String,
        #[source]
        source: redis::RedisError,
    },

    /// Injected by test doubles.
    #[cfg(test)]
    #[error("counter store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn connect(url: impl Into<String>, source: redis::RedisError) -> Self {
        Self::Connect {
            url: url.into(),
            source,
        }
    }

    pub fn command(op: &'static str, key: impl Into<String>, source: redis::RedisError) -> Self {
        Self::Command {
            op,
            key: key.into(),
            source,
        }
    }
}
