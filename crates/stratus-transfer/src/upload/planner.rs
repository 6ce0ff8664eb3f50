//! Splitting outbound objects into parts and subparts.

use std::sync::Arc;

use tracing::debug;

use crate::core::plan::{concatenation_slices, part_lengths};
use crate::data::UploadPartPolicy;
use crate::effects::OutboundSource;
use crate::error::{Result, TransferError};

use super::part::UploadPart;
use super::subpart::Subpart;

/// Ordered parts covering one outbound object.
#[derive(Debug)]
pub struct UploadPlan {
    parts: Vec<UploadPart>,
}

impl UploadPlan {
    /// Parts in upload order.
    pub fn parts(&self) -> &[UploadPart] {
        &self.parts
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Total payload length across all parts.
    pub fn total_length(&self) -> u64 {
        self.parts.iter().map(UploadPart::len).sum()
    }

    pub fn into_parts(self) -> Vec<UploadPart> {
        self.parts
    }
}

/// Plan a single source as one upload.
pub fn plan_upload(
    source: impl Into<OutboundSource>,
    policy: &UploadPartPolicy,
) -> Result<UploadPlan> {
    plan_concatenation(vec![source.into()], policy)
}

/// Plan an ordered list of sources as one concatenated object.
///
/// The sources form one logical byte space. Part boundaries are sized
/// by `policy` over the total length and ignore source boundaries; each
/// part's subparts are the source slices intersecting it, in order.
pub fn plan_concatenation(
    sources: Vec<OutboundSource>,
    policy: &UploadPartPolicy,
) -> Result<UploadPlan> {
    if sources.is_empty() {
        return Err(TransferError::InvalidSource("no sources to plan".into()));
    }
    if sources.len() > 1 && sources.iter().any(OutboundSource::is_empty) {
        return Err(TransferError::InvalidSource(
            "zero-length source in concatenation".into(),
        ));
    }

    let lengths: Vec<u64> = sources.iter().map(OutboundSource::len).collect();
    let total: u64 = lengths.iter().sum();
    let part_lens = part_lengths(policy, total);
    let parts: Vec<UploadPart> = concatenation_slices(&lengths, &part_lens)
        .into_iter()
        .map(|slices| {
            let subparts = slices
                .into_iter()
                .map(|slice| subpart_for(&sources[slice.source], slice.offset, slice.length))
                .collect();
            UploadPart::new(subparts)
        })
        .collect();
    debug!(sources = sources.len(), parts = parts.len(), total, "planned upload");
    Ok(UploadPlan { parts })
}

fn subpart_for(source: &OutboundSource, offset: u64, length: u64) -> Subpart {
    match source {
        OutboundSource::Local(source) => Subpart::Local {
            source: Arc::clone(source),
            offset,
            length,
        },
        OutboundSource::Remote(source) => Subpart::Remote {
            source: Arc::clone(source),
            offset,
            length,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use crate::effects::{RemoteSource, UploadSource};

    use super::*;

    fn small_policy() -> UploadPartPolicy {
        UploadPartPolicy::default()
            .min_part_size(5)
            .recommended_part_size(10)
    }

    fn subpart_len(subpart: &Subpart) -> u64 {
        subpart.len()
    }

    #[test]
    fn test_single_source_split_into_parts() {
        let plan = plan_upload(UploadSource::bytes(b"x".repeat(25)), &small_policy()).unwrap();
        let lens: Vec<u64> = plan.parts().iter().map(UploadPart::len).collect();
        assert_eq!(lens, vec![10, 10, 5]);
        assert_eq!(plan.total_length(), 25);
        // Single-source parts stay single-subpart.
        assert!(plan.parts().iter().all(|p| p.subparts().len() == 1));
    }

    #[test]
    fn test_short_object_is_single_part() {
        let plan = plan_upload(UploadSource::bytes(b"y".repeat(12)), &small_policy()).unwrap();
        assert_eq!(plan.part_count(), 1);
        assert_eq!(plan.parts()[0].len(), 12);
    }

    #[test]
    fn test_concatenation_slices_span_source_boundaries() {
        let sources = vec![
            UploadSource::bytes(b"a".repeat(10)).into(),
            UploadSource::bytes(b"b".repeat(5)).into(),
            UploadSource::bytes(b"c".repeat(20)).into(),
        ];
        let plan = plan_concatenation(sources, &small_policy()).unwrap();
        let lens: Vec<u64> = plan.parts().iter().map(UploadPart::len).collect();
        // 35 bytes: three preferred-size parts, then the remainder.
        assert_eq!(lens, vec![10, 10, 10, 5]);

        // Part 1 crosses from source 1 into source 2.
        let second: Vec<u64> = plan.parts()[1].subparts().iter().map(subpart_len).collect();
        assert_eq!(second, vec![5, 5]);

        // Chained content reproduces the concatenated byte space.
        let mut all = Vec::new();
        for part in plan.parts() {
            part.open_stream(None)
                .unwrap()
                .read_to_end(&mut all)
                .unwrap();
        }
        let mut expected = b"a".repeat(10);
        expected.extend_from_slice(&b"b".repeat(5));
        expected.extend_from_slice(&b"c".repeat(20));
        assert_eq!(all, expected);
    }

    #[test]
    fn test_remote_sources_plan_without_data_access() {
        let sources = vec![
            RemoteSource::new("stored-1", 0, 12).into(),
            UploadSource::bytes(b"z".repeat(8)).into(),
        ];
        let plan = plan_concatenation(sources, &small_policy()).unwrap();
        assert_eq!(plan.total_length(), 20);
        let kinds: Vec<bool> = plan
            .parts()
            .iter()
            .flat_map(|p| p.subparts().iter().map(Subpart::is_hashable))
            .collect();
        // Remote slices first, local after.
        assert_eq!(kinds.first(), Some(&false));
        assert_eq!(kinds.last(), Some(&true));
    }

    #[test]
    fn test_no_sources_rejected() {
        assert!(matches!(
            plan_concatenation(Vec::new(), &small_policy()),
            Err(TransferError::InvalidSource(_))
        ));
    }

    #[test]
    fn test_empty_source_in_concatenation_rejected() {
        let sources = vec![
            UploadSource::bytes(b"ab".to_vec()).into(),
            UploadSource::bytes(Vec::new()).into(),
        ];
        assert!(matches!(
            plan_concatenation(sources, &small_policy()),
            Err(TransferError::InvalidSource(_))
        ));
    }

    #[test]
    fn test_empty_object_plans_one_empty_part() {
        let plan = plan_upload(UploadSource::bytes(Vec::new()), &small_policy()).unwrap();
        assert_eq!(plan.part_count(), 1);
        assert!(plan.parts()[0].is_empty());
        assert_eq!(
            plan.parts()[0].sha1().unwrap().unwrap().as_str(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }
}
