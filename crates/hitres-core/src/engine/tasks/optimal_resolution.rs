use super::ComponentSolution;
use crate::core::models::segment::ResIdx;
use crate::core::scoring::comparator::HitComparator;
use crate::engine::calc_hit::CalcHit;
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{instrument, trace};

/// One hit of an architecture, linked to the rest of the architecture to its left.
///
/// Architectures built during the scan share their common prefixes.
struct ArchLink {
    hit: usize,
    prev: Option<Rc<ArchLink>>,
}

impl Drop for ArchLink {
    // Unlinks iteratively so long chains do not recurse on drop.
    fn drop(&mut self) {
        let mut next = self.prev.take();
        while let Some(link) = next {
            match Rc::try_unwrap(link) {
                Ok(mut owned) => next = owned.prev.take(),
                Err(_) => break,
            }
        }
    }
}

#[derive(Clone, Default)]
struct ScoredArch {
    score: f64,
    head: Option<Rc<ArchLink>>,
}

impl ScoredArch {
    fn with_hit(&self, hit: usize, weight: f64) -> Self {
        Self {
            score: self.score + weight,
            head: Some(Rc::new(ArchLink {
                hit,
                prev: self.head.clone(),
            })),
        }
    }

    fn hits(&self) -> Vec<usize> {
        let mut hits = Vec::new();
        let mut link = self.head.as_deref();
        while let Some(current) = link {
            hits.push(current.hit);
            link = current.prev.as_deref();
        }
        hits.sort_unstable();
        hits
    }
}

/// The best architectures of one scan, indexed by stop position.
///
/// `bests[k - first]` is the best architecture using only hits that stop at or before
/// stop position `k`. Positions before `first` are answered by the enclosing scan, whose
/// best architectures are also valid here because no hit stopping there can overlap the
/// hit that opened this scan.
struct ScanFrame<'p> {
    first: usize,
    bests: Vec<ScoredArch>,
    parent: Option<&'p ScanFrame<'p>>,
}

impl ScanFrame<'_> {
    fn best_up_to(&self, position: Option<usize>) -> ScoredArch {
        match position {
            None => ScoredArch::default(),
            Some(position) if position >= self.first => self.bests[position - self.first].clone(),
            Some(position) => self
                .parent
                .map_or_else(ScoredArch::default, |parent| parent.best_up_to(Some(position))),
        }
    }
}

/// Exact maximum-weight selection of mutually non-overlapping hits.
///
/// The scan walks the distinct stop positions of the hits left to right and records, for
/// every position, the best architecture of the hits that stop there or earlier. A
/// contiguous hit combines with the best architecture stopping before its start. A
/// discontiguous hit combines with the best architecture stopping before the start of its
/// last segment that does not overlap it, which may use the gaps between its segments; that
/// architecture is found by a nested scan over the hit's span with the hit added to the
/// set of hits every candidate must avoid. Nested scans are memoised by that set and their
/// end position.
struct OptimalResolver<'a> {
    hits: &'a [CalcHit],
    comparator: &'a HitComparator,
    stops: Vec<ResIdx>,
    hits_by_stop: Vec<Vec<usize>>,
    memo: HashMap<(Vec<usize>, usize), ScoredArch>,
}

impl<'a> OptimalResolver<'a> {
    fn new(hits: &'a [CalcHit], members: &[usize], comparator: &'a HitComparator) -> Self {
        let ordered = members.iter().copied().sorted_by(|&a, &b| {
            hits[a]
                .stop()
                .cmp(&hits[b].stop())
                .then_with(|| comparator.compare(&hits[a].rank, &hits[b].rank))
        });

        let mut stops = Vec::new();
        let mut hits_by_stop = Vec::new();
        for (stop, group) in &ordered.chunk_by(|&index| hits[index].stop()) {
            stops.push(stop);
            hits_by_stop.push(group.collect::<Vec<_>>());
        }

        Self {
            hits,
            comparator,
            stops,
            hits_by_stop,
            memo: HashMap::new(),
        }
    }

    /// Number of distinct stop positions strictly before `residue`.
    fn stops_before(&self, residue: ResIdx) -> usize {
        self.stops.partition_point(|&stop| stop < residue)
    }

    fn best_first(&self, arch: &ScoredArch) -> Vec<usize> {
        let mut hits = arch.hits();
        hits.sort_by(|&a, &b| self.comparator.compare(&self.hits[a].rank, &self.hits[b].rank));
        hits
    }

    /// Whether `candidate` should replace `incumbent` as the best architecture.
    fn outranks(&self, candidate: &ScoredArch, incumbent: &ScoredArch) -> bool {
        match candidate.score.partial_cmp(&incumbent.score) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Equal) => {
                let ours = self.best_first(candidate);
                let theirs = self.best_first(incumbent);
                match ours.iter().zip(&theirs).find(|(a, b)| a != b) {
                    Some((&a, &b)) => self.comparator.is_better(&self.hits[a].rank, &self.hits[b].rank),
                    None => ours.len() > theirs.len(),
                }
            }
            _ => false,
        }
    }

    fn solve(mut self) -> ComponentSolution {
        let best = self.best_in_region(&[], 0, self.stops.len(), None);
        trace!(
            stops = self.stops.len(),
            nested_scans = self.memo.len(),
            "Optimal scan finished."
        );
        ComponentSolution {
            selected: best.hits(),
            weight: best.score,
        }
    }

    /// Best architecture over stop positions `first..end` that avoids every hit in `mask`.
    fn best_in_region(
        &mut self,
        mask: &[usize],
        first: usize,
        end: usize,
        parent: Option<&ScanFrame<'_>>,
    ) -> ScoredArch {
        let hits = self.hits;
        let mut frame = ScanFrame {
            first,
            bests: Vec::with_capacity(end.saturating_sub(first)),
            parent,
        };

        for position in first..end {
            let best_before = frame.best_up_to(position.checked_sub(1));
            let mut best_here: Option<ScoredArch> = None;

            for slot in 0..self.hits_by_stop[position].len() {
                let index = self.hits_by_stop[position][slot];
                let hit = &hits[index];
                if mask.iter().any(|&masked| hits[masked].overlaps(hit)) {
                    continue;
                }

                let complement = if hit.is_discontiguous() {
                    self.best_around(mask, index, &frame)
                } else {
                    frame.best_up_to(self.stops_before(hit.start()).checked_sub(1))
                };

                let incumbent = best_here.as_ref().unwrap_or(&best_before);
                if complement.score + hit.weight < incumbent.score {
                    continue;
                }
                let candidate = complement.with_hit(index, hit.weight);
                if self.outranks(&candidate, incumbent) {
                    best_here = Some(candidate);
                }
            }

            frame.bests.push(best_here.unwrap_or(best_before));
        }

        frame.best_up_to(end.checked_sub(1))
    }

    /// Best architecture that stops before the last segment of discontiguous hit `index`
    /// and avoids both the hit and `mask`.
    fn best_around(&mut self, mask: &[usize], index: usize, frame: &ScanFrame<'_>) -> ScoredArch {
        let hit = &self.hits[index];
        let first = self.stops_before(hit.start());
        let end = self.stops_before(hit.start_of_last_segment());

        let mut inner_mask = mask.to_vec();
        let insert_at = inner_mask.partition_point(|&m| m < index);
        inner_mask.insert(insert_at, index);

        let key = (inner_mask, end);
        if let Some(cached) = self.memo.get(&key) {
            return cached.clone();
        }
        let best = self.best_in_region(&key.0, first, end, Some(frame));
        self.memo.insert(key, best.clone());
        best
    }
}

/// Finds the maximum-weight set of mutually non-overlapping hits among `members`.
///
/// Among architectures of equal weight the one holding the comparator-better hits wins.
/// Hits that overlap nothing in the chosen architecture are then added best first, so a hit
/// of zero or negative weight is still selected when nothing competes with it.
#[instrument(skip_all, name = "optimal_resolution_task", fields(hits = members.len()))]
pub fn run(hits: &[CalcHit], members: &[usize], comparator: &HitComparator) -> ComponentSolution {
    if members.is_empty() {
        return ComponentSolution::default();
    }
    let mut solution = OptimalResolver::new(hits, members, comparator).solve();
    admit_unopposed(hits, members, comparator, &mut solution);
    solution
}

fn admit_unopposed(
    hits: &[CalcHit],
    members: &[usize],
    comparator: &HitComparator,
    solution: &mut ComponentSolution,
) {
    let leftovers = members
        .iter()
        .copied()
        .filter(|member| solution.selected.binary_search(member).is_err())
        .sorted_by(|&a, &b| comparator.compare(&hits[a].rank, &hits[b].rank))
        .collect_vec();

    let mut admitted = 0;
    for index in leftovers {
        if solution
            .selected
            .iter()
            .all(|&chosen| !hits[chosen].overlaps(&hits[index]))
        {
            solution.selected.push(index);
            solution.weight += hits[index].weight;
            admitted += 1;
        }
    }
    if admitted > 0 {
        trace!(admitted, "Added hits of non-positive weight that overlap nothing chosen.");
        solution.selected.sort_unstable();
    }
}
