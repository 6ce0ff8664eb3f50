//! Ordered flushing of completed parts.

use std::collections::BTreeMap;
use std::io::Write;

use bytes::Bytes;

use stratus_verify::{EmptyHasher, Hasher, Sha1Hasher, Sha1Hex};

use crate::error::Result;

/// Running digest over flushed bytes; a no-op when verification is off.
enum RunningHash {
    Sha1(Sha1Hasher),
    Disabled(EmptyHasher),
}

impl RunningHash {
    fn new(check_hash: bool) -> Self {
        if check_hash {
            Self::Sha1(Sha1Hasher::new())
        } else {
            Self::Disabled(EmptyHasher)
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            RunningHash::Sha1(hasher) => hasher.update(data),
            RunningHash::Disabled(hasher) => hasher.update(data),
        }
    }

    fn finalize(self) -> Option<Sha1Hex> {
        match self {
            RunningHash::Sha1(hasher) => Some(Sha1Hex::from_digest(&hasher.finalize())),
            RunningHash::Disabled(_) => None,
        }
    }
}

/// Sequential consumer that flushes completed parts in ascending offset
/// order, feeding the running digest as bytes hit the sink.
///
/// Offsets are local to the downloaded range: the first part is always
/// offset zero. Out-of-order arrivals wait in the pending set, so the
/// sink only ever sees a strictly sequential byte stream.
pub(crate) struct OrderedAssembly<W> {
    sink: W,
    hash: RunningHash,
    pending: BTreeMap<u64, Bytes>,
    next_offset: u64,
    bytes_written: u64,
}

impl<W: Write> OrderedAssembly<W> {
    pub(crate) fn new(sink: W, check_hash: bool) -> Self {
        Self {
            sink,
            hash: RunningHash::new(check_hash),
            pending: BTreeMap::new(),
            next_offset: 0,
            bytes_written: 0,
        }
    }

    /// Accept a completed part; flush everything that became contiguous.
    pub(crate) fn push(&mut self, offset: u64, data: Bytes) -> Result<()> {
        self.pending.insert(offset, data);
        while let Some(data) = self.pending.remove(&self.next_offset) {
            self.sink.write_all(&data)?;
            self.hash.update(&data);
            self.next_offset += data.len() as u64;
            self.bytes_written += data.len() as u64;
        }
        Ok(())
    }

    /// Flush the sink and finish the digest.
    pub(crate) fn finish(mut self) -> Result<(u64, Option<Sha1Hex>)> {
        self.sink.flush()?;
        Ok((self.bytes_written, self.hash.finalize()))
    }
}
