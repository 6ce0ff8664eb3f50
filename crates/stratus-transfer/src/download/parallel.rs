//! Concurrent ranged download with per-part suffix retry.

use std::io::{self, Write};
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use stratus_verify::Sha1Hex;

use crate::core::{chunk_size, split_range, stream_count};
use crate::data::{ByteRange, DownloadOptions, DownloadOutcome, DownloadTarget};
use crate::download::assembly::OrderedAssembly;
use crate::effects::{RangeResponse, RangedTransport};
use crate::error::{Result, TransferError};

/// Downloads an object over concurrent range requests.
///
/// The requested range is split into contiguous parts, one worker task
/// per part. Each worker owns a bounded attempt budget and re-requests
/// only the missing suffix after an interruption; completed parts flow
/// to a single assembly stage that writes them to the sink strictly in
/// offset order while maintaining the running content hash.
#[derive(Debug, Clone, Default)]
pub struct ParallelDownloader {
    options: DownloadOptions,
}

impl ParallelDownloader {
    pub fn new(options: DownloadOptions) -> Self {
        Self { options }
    }

    /// The configured options.
    pub fn options(&self) -> &DownloadOptions {
        &self.options
    }

    /// Reconstruct `target` into `sink`.
    ///
    /// `initial` is the caller's already-open response for the target
    /// range; the first part consumes it as its first attempt instead
    /// of issuing a fresh request. Every other part, and every retry,
    /// goes through `transport`. Must run inside a Tokio runtime.
    ///
    /// On success the outcome's byte count equals the requested range
    /// length and the digest covers exactly the bytes written.
    pub async fn download<T, W>(
        &self,
        target: &DownloadTarget,
        initial: RangeResponse,
        transport: Arc<T>,
        sink: &mut W,
    ) -> Result<DownloadOutcome>
    where
        T: RangedTransport + 'static,
        W: Write,
    {
        let range = match target.range {
            Some(range) => range,
            None => ByteRange::from_offset_length(0, initial.content_length),
        };
        if range.is_empty() {
            drop(initial);
            let (bytes_written, sha1) =
                OrderedAssembly::new(&mut *sink, self.options.check_hash).finish()?;
            return self.verified(target, bytes_written, sha1, 0);
        }

        let count = stream_count(range.len(), self.options.min_part_size, self.options.max_streams);
        let parts = split_range(range, count);
        let chunk = chunk_size(&self.options, range.len()).max(1);
        debug!(
            object = %target.object_id,
            range = %range,
            parts = parts.len(),
            chunk,
            "starting parallel download"
        );

        // Capacity covers one message per worker, so no send ever blocks
        // on a slow sink.
        let (tx, mut rx) = mpsc::channel::<(u64, Bytes)>(parts.len());
        let mut workers: JoinSet<Result<()>> = JoinSet::new();
        let mut initial = Some(initial);
        for part in &parts {
            let ctx = PartContext {
                object_id: target.object_id.clone(),
                cloud: *part,
                local_offset: part.start() - range.start(),
                chunk,
                max_attempts: self.options.max_part_attempts.max(1),
            };
            let first = initial.take();
            let transport = Arc::clone(&transport);
            let tx = tx.clone();
            workers.spawn(async move {
                let data = download_part(&ctx, first, transport.as_ref()).await?;
                // A closed receiver means the operation already failed.
                let _ = tx.send((ctx.local_offset, data)).await;
                Ok(())
            });
        }
        drop(tx);

        let mut assembly = OrderedAssembly::new(&mut *sink, self.options.check_hash);
        let mut channel_open = true;
        loop {
            if !channel_open && workers.is_empty() {
                break;
            }
            tokio::select! {
                message = rx.recv(), if channel_open => match message {
                    Some((offset, data)) => assembly.push(offset, data)?,
                    None => channel_open = false,
                },
                Some(joined) = workers.join_next() => {
                    joined.map_err(|e| TransferError::Io(io::Error::other(e)))??;
                }
            }
        }

        let (bytes_written, sha1) = assembly.finish()?;
        if bytes_written != range.len() {
            return Err(TransferError::TruncatedOutput {
                bytes_read: bytes_written,
                expected: range.len(),
            });
        }
        self.verified(target, bytes_written, sha1, parts.len())
    }

    fn verified(
        &self,
        target: &DownloadTarget,
        bytes_written: u64,
        sha1: Option<Sha1Hex>,
        parts: usize,
    ) -> Result<DownloadOutcome> {
        if let (Some(expected), Some(actual)) = (&target.expected_sha1, &sha1) {
            if expected != actual {
                return Err(TransferError::ChecksumMismatch {
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                });
            }
        }
        debug!(object = %target.object_id, bytes_written, parts, "download complete");
        Ok(DownloadOutcome {
            bytes_written,
            sha1,
        })
    }
}

/// Everything a part worker needs, owned so the task is `'static`.
struct PartContext {
    object_id: String,
    /// Absolute range of this part within the stored object.
    cloud: ByteRange,
    /// Offset of this part within the downloaded range.
    local_offset: u64,
    chunk: u64,
    max_attempts: u32,
}

/// Fetch one part completely, re-requesting the remaining suffix after
/// retryable failures until the attempt budget runs out.
async fn download_part<T: RangedTransport>(
    ctx: &PartContext,
    initial: Option<RangeResponse>,
    transport: &T,
) -> Result<Bytes> {
    let part_size = ctx.cloud.len();
    let mut buffer = BytesMut::with_capacity(part_size as usize);
    let mut attempt: u32 = 0;

    if let Some(response) = initial {
        attempt += 1;
        debug!(object = %ctx.object_id, part = %ctx.cloud, attempt, "consuming initial response");
        let mut body = response.body;
        while (buffer.len() as u64) < part_size {
            match body.next().await {
                None => break,
                Some(Ok(data)) => append_chunks(&mut buffer, data, ctx.chunk, part_size),
                Some(Err(e)) => {
                    if e.is_retryable() && attempt < ctx.max_attempts {
                        warn!(object = %ctx.object_id, part = %ctx.cloud, attempt, error = %e, "initial stream interrupted");
                        break;
                    }
                    return Err(e.into());
                }
            }
        }
    }

    while (buffer.len() as u64) < part_size && attempt < ctx.max_attempts {
        attempt += 1;
        let received = buffer.len() as u64;
        let suffix = ctx.cloud.subrange(received, part_size - 1);
        debug!(object = %ctx.object_id, part = %ctx.cloud, attempt, received, suffix = %suffix, "requesting part suffix");
        match fetch_suffix(ctx, transport, suffix, &mut buffer, part_size).await {
            Ok(()) => {}
            Err(e) if e.is_retryable() && attempt < ctx.max_attempts => {
                warn!(object = %ctx.object_id, part = %ctx.cloud, attempt, error = %e, "part attempt failed");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if (buffer.len() as u64) != part_size {
        error!(
            object = %ctx.object_id,
            part = %ctx.cloud,
            received = buffer.len(),
            expected = part_size,
            attempt,
            "part incomplete after retries"
        );
        return Err(TransferError::TruncatedOutput {
            bytes_read: buffer.len() as u64,
            expected: part_size,
        });
    }
    debug!(object = %ctx.object_id, part = %ctx.cloud, attempt, "part complete");
    Ok(buffer.freeze())
}

async fn fetch_suffix<T: RangedTransport>(
    ctx: &PartContext,
    transport: &T,
    suffix: ByteRange,
    buffer: &mut BytesMut,
    part_size: u64,
) -> std::result::Result<(), crate::error::TransportError> {
    let response = transport.ranged_get(&ctx.object_id, suffix).await?;
    let mut body = response.body;
    while (buffer.len() as u64) < part_size {
        match body.next().await {
            None => break,
            Some(chunk) => append_chunks(buffer, chunk?, ctx.chunk, part_size),
        }
    }
    Ok(())
}

/// Append `data` to `buffer` in reads of at most `chunk` bytes, never
/// growing past `part_size`.
fn append_chunks(buffer: &mut BytesMut, mut data: Bytes, chunk: u64, part_size: u64) {
    while !data.is_empty() && (buffer.len() as u64) < part_size {
        let take = data.len().min(chunk as usize);
        let mut piece = data.split_to(take);
        let room = part_size - buffer.len() as u64;
        if (piece.len() as u64) > room {
            piece.truncate(room as usize);
        }
        buffer.extend_from_slice(&piece);
    }
}
