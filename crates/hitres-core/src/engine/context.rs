use super::config::ResolveConfig;
use super::error::EngineError;
use super::progress::ProgressReporter;
use crate::core::models::collection::HitCollection;
use crate::core::models::hit::Hit;
use crate::core::models::ids::HitId;
use crate::core::scoring::comparator::{HitComparator, HitRank};

/// Everything a resolution task needs to read, bundled for one resolution run.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub collection: &'a HitCollection,
    pub config: &'a ResolveConfig,
    pub reporter: &'a ProgressReporter<'a>,
    pub comparator: HitComparator,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        collection: &'a HitCollection,
        config: &'a ResolveConfig,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            collection,
            config,
            reporter,
            comparator: HitComparator::new(config.score_type),
        }
    }

    pub fn hit(&self, id: HitId) -> Result<&'a Hit, EngineError> {
        self.collection.hit(id).ok_or(EngineError::UnknownHit(id))
    }

    pub fn rank(&self, id: HitId) -> Result<HitRank, EngineError> {
        let hit = self.hit(id)?;
        let index = self
            .collection
            .index_of(id)
            .ok_or(EngineError::UnknownHit(id))?;
        Ok(HitRank::of(hit, index))
    }
}
