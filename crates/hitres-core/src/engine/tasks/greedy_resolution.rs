use super::ComponentSolution;
use crate::core::scoring::comparator::HitComparator;
use crate::engine::calc_hit::CalcHit;
use itertools::Itertools;
use tracing::instrument;

/// Walks the hits best first and keeps each one that overlaps nothing kept so far.
///
/// Much cheaper than the optimal scan but may miss the best architecture, e.g. when one
/// strong hit blocks two slightly weaker ones whose combined weight is larger.
#[instrument(skip_all, name = "greedy_resolution_task", fields(hits = members.len()))]
pub fn run(hits: &[CalcHit], members: &[usize], comparator: &HitComparator) -> ComponentSolution {
    let mut kept: Vec<usize> = Vec::new();
    for index in members
        .iter()
        .copied()
        .sorted_by(|&a, &b| comparator.compare(&hits[a].rank, &hits[b].rank))
    {
        if kept.iter().all(|&other| !hits[other].overlaps(&hits[index])) {
            kept.push(index);
        }
    }

    let weight = kept.iter().map(|&index| hits[index].weight).sum();
    kept.sort_unstable();
    ComponentSolution {
        selected: kept,
        weight,
    }
}
