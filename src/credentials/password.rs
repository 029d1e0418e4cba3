//! One-way password digests.
//!
//! Both schemes are deterministic so a login can be checked by re-hashing the
//! submitted secret and letting the store compare digests. Neither uses a
//! per-account salt: equal passwords produce equal digests. A slow, per-record
//! salted hash would be stronger, but switching invalidates every stored digest.

use sha1::{Digest, Sha1};

/// How a secret is turned into a stored digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    /// `hex(salt) ++ hex(sha1(secret))`, the format already present in existing
    /// account tables. The salt is only a fixed prefix and does not enter the hash.
    #[default]
    Legacy,
    /// `hex(sha1(salt ++ secret))`
    Salted,
}

impl std::str::FromStr for PasswordScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(PasswordScheme::Legacy),
            "salted" => Ok(PasswordScheme::Salted),
            other => Err(format!("unknown password scheme: {}", other)),
        }
    }
}

#[derive(Clone)]
pub struct PasswordHasher {
    salt: Vec<u8>,
    scheme: PasswordScheme,
}

impl PasswordHasher {
    pub fn new(salt: impl AsRef<[u8]>, scheme: PasswordScheme) -> Self {
        Self {
            salt: salt.as_ref().to_vec(),
            scheme,
        }
    }

    /// Digests `secret` as lowercase hex
    pub fn hash(&self, secret: &str) -> String {
        match self.scheme {
            PasswordScheme::Legacy => {
                let digest = Sha1::digest(secret.as_bytes());
                let mut out = hex::encode(&self.salt);
                out.push_str(&hex::encode(digest));
                out
            }
            PasswordScheme::Salted => {
                let mut hasher = Sha1::new();
                hasher.update(&self.salt);
                hasher.update(secret.as_bytes());
                hex::encode(hasher.finalize())
            }
        }
    }
}
