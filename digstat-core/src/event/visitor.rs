use sha2::{Digest, Sha256};

/// Stable visitor fingerprint: hex SHA-256 of referrer followed by user agent.
pub fn identify(refer: &str, ua: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(refer.as_bytes());
    hasher.update(ua.as_bytes());
    hex::encode(hasher.finalize())
}
