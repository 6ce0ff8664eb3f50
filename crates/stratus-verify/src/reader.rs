//! Whole-stream digests.

use std::io::{self, Read};

use crate::checksum::Sha1Hex;
use crate::hasher::{Hasher, Sha1Hasher};

const DIGEST_BUF_SIZE: usize = 1024 * 1024;

/// Digest an entire reader in one pass.
///
/// Returns the hex digest together with the number of bytes consumed,
/// which callers use to cross-check declared lengths.
pub fn sha1_of_reader<R: Read + ?Sized>(reader: &mut R) -> io::Result<(Sha1Hex, u64)> {
    let mut hasher = Sha1Hasher::new();
    let mut buf = vec![0u8; DIGEST_BUF_SIZE];
    let mut count = 0u64;
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        count += n as u64;
    }
    Ok((Sha1Hex::from_digest(&hasher.finalize()), count))
}
