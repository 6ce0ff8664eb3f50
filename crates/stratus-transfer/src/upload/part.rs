//! One physical upload call's worth of chained subparts.

use std::sync::{Arc, OnceLock};

use stratus_stream::{ChainedStream, HashingReader, StreamWithLength, TRAILER_LEN};
use stratus_verify::{Sha1Hex, sha1_of_reader};

use crate::data::PartId;
use crate::effects::RangeFetcher;
use crate::error::Result;

use super::subpart::Subpart;

/// Ordered subparts uploaded as a single part.
#[derive(Debug)]
pub struct UploadPart {
    subparts: Vec<Subpart>,
    sha1: OnceLock<Sha1Hex>,
}

impl UploadPart {
    pub(crate) fn new(subparts: Vec<Subpart>) -> Self {
        debug_assert!(!subparts.is_empty());
        Self {
            subparts,
            sha1: OnceLock::new(),
        }
    }

    /// Subparts in upload order.
    pub fn subparts(&self) -> &[Subpart] {
        &self.subparts
    }

    /// Payload length: the sum of subpart lengths.
    pub fn len(&self) -> u64 {
        self.subparts.iter().map(Subpart::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the part identity is a plain content digest.
    pub fn is_hashable(&self) -> bool {
        self.subparts.iter().all(Subpart::is_hashable)
    }

    /// Payload digest, computed lazily and cached.
    ///
    /// `None` when any subpart is remote; hashing those would force a
    /// fetch ahead of the upload call.
    pub fn sha1(&self) -> Result<Option<Sha1Hex>> {
        if !self.is_hashable() {
            return Ok(None);
        }
        if let Some(sha1) = self.sha1.get() {
            return Ok(Some(sha1.clone()));
        }
        let sha1 = self.compute_sha1()?;
        Ok(Some(self.sha1.get_or_init(|| sha1).clone()))
    }

    fn compute_sha1(&self) -> Result<Sha1Hex> {
        // A lone local subpart spanning its whole source shares the
        // source's cached content digest.
        if let [Subpart::Local {
            source,
            offset: 0,
            length,
        }] = self.subparts.as_slice()
        {
            if *length == source.len() {
                return Ok(source.content_sha1()?);
            }
        }
        let mut stream = self.open_stream(None)?;
        let (sha1, _) = sha1_of_reader(&mut stream)?;
        Ok(sha1)
    }

    /// Identity for content-addressed resumability of multipart
    /// sessions.
    pub fn part_id(&self) -> Result<PartId> {
        match self.sha1()? {
            Some(sha1) => Ok(PartId::Hash(sha1)),
            None => {
                let ids = self
                    .subparts
                    .iter()
                    .map(Subpart::id)
                    .collect::<Result<Vec<_>>>()?;
                Ok(PartId::Subparts(ids))
            }
        }
    }

    /// Chain every subpart's opener into the part's payload stream.
    ///
    /// `fetcher` is required when any subpart is remote.
    pub fn open_stream(&self, fetcher: Option<&Arc<dyn RangeFetcher>>) -> Result<ChainedStream> {
        let openers = self
            .subparts
            .iter()
            .map(|subpart| subpart.stream_opener(fetcher))
            .collect::<Result<Vec<_>>>()?;
        Ok(ChainedStream::new(openers)?)
    }

    /// Payload stream with the trailing digest appended and the total
    /// length declared: exactly what a transport consumes for one call.
    ///
    /// Rewinding the body to the start replays it byte for byte,
    /// re-opening local subparts and serving remote ones from cache.
    pub fn open_body(
        &self,
        fetcher: Option<&Arc<dyn RangeFetcher>>,
    ) -> Result<StreamWithLength<HashingReader<ChainedStream>>> {
        let payload_len = self.len();
        let stream = HashingReader::new(self.open_stream(fetcher)?);
        Ok(StreamWithLength::new(stream, payload_len + TRAILER_LEN))
    }
}
