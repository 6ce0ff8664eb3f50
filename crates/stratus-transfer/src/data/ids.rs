//! Identity of planned parts and subparts.
//!
//! Identities let a resumed multipart session recognize parts it has
//! already uploaded without re-reading their bytes from the wire.

use stratus_verify::Sha1Hex;

/// Identity of one upload subpart.
///
/// Local subparts are identified by the digest of their exact byte
/// range; remote subparts by their stored coordinates, which costs no
/// data pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubpartId {
    /// SHA-1 of the subpart's bytes.
    Content(Sha1Hex),
    /// Coordinates of an already-stored byte range.
    Remote {
        file_id: String,
        offset: u64,
        length: u64,
    },
}

/// Identity of one planned upload part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartId {
    /// Digest of the part's chained bytes; used when every subpart is
    /// local, so the digest comes from local reads only.
    Hash(Sha1Hex),
    /// Ordered subpart identities; used when any subpart is remote.
    Subparts(Vec<SubpartId>),
}
