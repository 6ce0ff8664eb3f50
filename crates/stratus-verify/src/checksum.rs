//! Hex-encoded digest values.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseSha1HexError;

/// A SHA-1 digest as 40 lowercase hex characters.
///
/// This is the form digests take on the wire and inside part identities,
/// so it is the canonical representation throughout the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha1Hex(String);

impl Sha1Hex {
    /// Hex-encode a raw 20-byte digest.
    pub fn from_digest(digest: &[u8]) -> Self {
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Sha1Hex {
    type Err = ParseSha1HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 40 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSha1HexError(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl fmt::Display for Sha1Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
