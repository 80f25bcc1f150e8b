//! Reciprocal Rank Fusion.
//!
//! Dense cosine scores and BM25 scores live on incomparable scales, so the
//! merge uses ranks only: every document appearing in any channel scores
//! `sum over channels of 1 / (K + rank)`. A document found by both channels
//! outranks one found by a single channel at a similar position.

use crate::types::Candidate;
use std::collections::HashMap;

/// Damping constant. Larger values flatten the advantage of top ranks over
/// the long tail; 60 is the conventional setting.
pub const RRF_K: f64 = 60.0;

/// A document's position in the fused ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Fused {
    pub document_id: String,
    pub score: f64,
}

/// Merge channel result lists into one ordering by descending RRF score.
/// Ties keep first-encounter order, walking `channels` in the given order
/// (callers pass dense before sparse) and each list front to back.
pub fn reciprocal_rank_fusion(channels: &[&[Candidate]]) -> Vec<Fused> {
    let mut first_seen: Vec<String> = Vec::new();
    let mut scores: HashMap<String, f64> = HashMap::new();

    for list in channels {
        for candidate in *list {
            let entry = scores.entry(candidate.document_id.clone()).or_insert_with(|| {
                first_seen.push(candidate.document_id.clone());
                0.0
            });
            *entry += 1.0 / (RRF_K + candidate.rank as f64);
        }
    }

    let mut fused: Vec<Fused> = first_seen
        .into_iter()
        .map(|document_id| {
            let score = scores[&document_id];
            Fused { document_id, score }
        })
        .collect();
    fused.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    fused
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Channel;

    fn channel(ids: &[&str], channel: Channel) -> Vec<Candidate> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| Candidate {
                document_id: (*id).to_string(),
                channel,
                rank: i + 1,
                raw_score: 1.0 / (i + 1) as f32,
            })
            .collect()
    }

    #[test]
    fn doc_in_both_channels_wins() {
        let dense = channel(&["A", "B", "C"], Channel::Dense);
        let sparse = channel(&["B", "C", "D"], Channel::Sparse);
        let fused = reciprocal_rank_fusion(&[&dense, &sparse]);

        assert_eq!(fused[0].document_id, "B");
        let expected_b = 1.0 / (RRF_K + 2.0) + 1.0 / (RRF_K + 1.0);
        assert!((fused[0].score - expected_b).abs() < 1e-12);

        let a = fused.iter().find(|f| f.document_id == "A").unwrap();
        let expected_a = 1.0 / (RRF_K + 1.0);
        assert!((a.score - expected_a).abs() < 1e-12);
        // B (both channels) beats A (dense rank 1 only).
        assert!(fused[0].score > a.score);
    }

    #[test]
    fn ties_keep_first_encounter_order() {
        // Same single rank in each channel: identical scores.
        let dense = channel(&["X"], Channel::Dense);
        let sparse = channel(&["Y"], Channel::Sparse);
        let fused = reciprocal_rank_fusion(&[&dense, &sparse]);
        assert_eq!(fused[0].document_id, "X");
        assert_eq!(fused[1].document_id, "Y");
        assert_eq!(fused[0].score, fused[1].score);
    }

    #[test]
    fn single_channel_passthrough() {
        let sparse = channel(&["P", "Q"], Channel::Sparse);
        let fused = reciprocal_rank_fusion(&[&[], &sparse]);
        let ids: Vec<&str> = fused.iter().map(|f| f.document_id.as_str()).collect();
        assert_eq!(ids, ["P", "Q"]);
    }
}
