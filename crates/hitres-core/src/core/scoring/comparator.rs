use super::score_type::ScoreType;
use crate::core::models::collection::HitCollection;
use crate::core::models::hit::Hit;
use crate::core::models::ids::HitId;
use std::cmp::Ordering;

/// The attributes of a hit that decide its rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRank {
    /// Raw score, read according to the comparator's [`ScoreType`].
    pub score: f64,
    /// Total number of residues covered by the hit's untrimmed segments.
    pub total_length: u64,
    /// Registration index within the owning collection.
    pub index: usize,
}

impl HitRank {
    pub fn of(hit: &Hit, index: usize) -> Self {
        Self {
            score: hit.score,
            total_length: hit.total_length(),
            index,
        }
    }
}

/// A total order over the hits of one collection, best first.
///
/// Hits are ordered by score (in the direction given by the score type), then by total
/// length (longer first), then by registration index (earlier first). Two distinct hits of a
/// collection therefore never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitComparator {
    score_type: ScoreType,
}

impl HitComparator {
    pub fn new(score_type: ScoreType) -> Self {
        Self { score_type }
    }

    pub fn score_type(&self) -> ScoreType {
        self.score_type
    }

    /// Compares two ranks; `Ordering::Less` means `a` is the better hit.
    pub fn compare(&self, a: &HitRank, b: &HitRank) -> Ordering {
        self.score_type
            .compare(a.score, b.score)
            .then_with(|| b.total_length.cmp(&a.total_length))
            .then_with(|| a.index.cmp(&b.index))
    }

    pub fn is_better(&self, a: &HitRank, b: &HitRank) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Compares two hits of a collection by handle.
    ///
    /// Returns `None` if either handle is not part of the collection.
    pub fn compare_ids(
        &self,
        collection: &HitCollection,
        a: HitId,
        b: HitId,
    ) -> Option<Ordering> {
        let rank_a = HitRank::of(collection.hit(a)?, collection.index_of(a)?);
        let rank_b = HitRank::of(collection.hit(b)?, collection.index_of(b)?);
        Some(self.compare(&rank_a, &rank_b))
    }
}
