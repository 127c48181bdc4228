use super::hit::Hit;
use super::ids::HitId;
use slotmap::{SecondaryMap, SlotMap};

/// The candidate hits of a single query sequence.
///
/// Hits are stored in an arena and addressed by stable [`HitId`] handles. The collection
/// remembers registration order: the position of a hit in that order is its
/// *registration index*, which the engine uses as the final tie-breaker between
/// otherwise equivalent hits and as the default output order.
#[derive(Debug, Clone, Default)]
pub struct HitCollection {
    query_id: String,
    hits: SlotMap<HitId, Hit>,
    order: Vec<HitId>,
    positions: SecondaryMap<HitId, usize>,
}

impl HitCollection {
    pub fn new(query_id: impl Into<String>) -> Self {
        Self {
            query_id: query_id.into(),
            ..Default::default()
        }
    }

    /// Builds a collection from hits in registration order.
    pub fn from_hits(query_id: impl Into<String>, hits: impl IntoIterator<Item = Hit>) -> Self {
        let mut collection = Self::new(query_id);
        for hit in hits {
            collection.push(hit);
        }
        collection
    }

    pub fn query_id(&self) -> &str {
        &self.query_id
    }

    /// Registers a hit and returns its handle.
    pub fn push(&mut self, hit: Hit) -> HitId {
        let id = self.hits.insert(hit);
        self.positions.insert(id, self.order.len());
        self.order.push(id);
        id
    }

    pub fn hit(&self, id: HitId) -> Option<&Hit> {
        self.hits.get(id)
    }

    /// The registration index of a hit.
    pub fn index_of(&self, id: HitId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn id_at(&self, index: usize) -> Option<HitId> {
        self.order.get(index).copied()
    }

    /// Handles of all hits in registration order.
    pub fn ids(&self) -> &[HitId] {
        &self.order
    }

    /// Iterates over hits in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (HitId, &Hit)> {
        self.order.iter().map(move |&id| (id, &self.hits[id]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
