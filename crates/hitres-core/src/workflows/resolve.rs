use crate::core::models::collection::HitCollection;
use crate::core::models::segment::Segment;
use crate::engine::calc_hit::CalcHit;
use crate::engine::config::{OutputOrder, ResolveConfig, ResolveStrategy};
use crate::engine::context::ResolveContext;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{RejectedHit, RejectionReason, Resolution, SelectedHit};
use crate::engine::tasks::{self, ComponentSolution};
use std::time::Instant;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

enum ComponentOutcome {
    Solved(ComponentSolution),
    DeadlineExceeded,
}

/// Resolves one query's hits into its best non-overlapping architecture.
///
/// # Arguments
///
/// * `collection` - The candidate hits of the query.
/// * `config` - Resolution settings; checked before any work is done.
/// * `reporter` - Receives progress events.
///
/// # Return
///
/// A [`Resolution`] in which every hit of `collection` is either selected, rejected with
/// a reason, or listed as a diagnostic.
///
/// # Errors
///
/// Returns [`EngineError::Config`] for contradictory settings, and
/// [`EngineError::InvalidHit`] for a malformed hit when the invalid-hit policy is `Reject`.
#[instrument(skip_all, name = "resolve_workflow", fields(query = collection.query_id(), hits = collection.len()))]
pub fn run(
    collection: &HitCollection,
    config: &ResolveConfig,
    reporter: &ProgressReporter,
) -> Result<Resolution, EngineError> {
    config.validate()?;

    if collection.is_empty() {
        info!("No hits to resolve.");
        return Ok(Resolution::empty());
    }

    let context = ResolveContext::new(collection, config, reporter);

    // === Phase 0: Validation and preparation ===
    let (validation, mut rejected, hits) = reporter.phase("Preparation", || {
        let validation = tasks::validation::run(&context)?;
        if !validation.diagnostics.is_empty() {
            reporter.report(Progress::Message(format!(
                "Skipped {} malformed hit(s) of query '{}'.",
                validation.diagnostics.len(),
                collection.query_id()
            )));
        }
        let prepared = tasks::preparation::run(&context, &validation.valid)?;
        let filtered = tasks::duplicate_filter::run(&context, prepared.hits)?;
        let mut rejected = prepared.rejected;
        rejected.extend(filtered.pruned);
        Ok::<_, EngineError>((validation, rejected, filtered.hits))
    })?;

    // === Phase 1: Overlap graph decomposition ===
    let components = tasks::decomposition::run(&hits);

    // === Phase 2: Per-component resolution ===
    let deadline = config
        .time_budget
        .and_then(|budget| Instant::now().checked_add(budget));
    let outcomes = reporter.phase("Resolving", || {
        resolve_components(&context, &hits, &components, deadline)
    });

    // === Phase 3: Assemble the architecture ===
    let mut chosen: Vec<usize> = Vec::new();
    let mut complete = true;
    for (members, outcome) in components.iter().zip(outcomes) {
        match outcome {
            ComponentOutcome::Solved(solution) => {
                let mut selected = solution.selected.iter().copied().peekable();
                for &member in members {
                    if selected.next_if_eq(&member).is_some() {
                        chosen.push(member);
                    } else {
                        rejected.push(RejectedHit {
                            hit: hits[member].id,
                            reason: RejectionReason::OverlapLoss,
                        });
                    }
                }
            }
            ComponentOutcome::DeadlineExceeded => {
                complete = false;
                rejected.extend(members.iter().map(|&member| RejectedHit {
                    hit: hits[member].id,
                    reason: RejectionReason::DeadlineExceeded,
                }));
            }
        }
    }

    if !complete {
        reporter.report(Progress::Message(format!(
            "Time budget exhausted; query '{}' was resolved only partially.",
            collection.query_id()
        )));
    }

    // === Phase 4: Truncation and ordering ===
    let comparator = context.comparator;
    if let Some(max_hits) = config.max_hits {
        if chosen.len() > max_hits {
            chosen.sort_by(|&a, &b| comparator.compare(&hits[a].rank, &hits[b].rank));
            rejected.extend(chosen.split_off(max_hits).into_iter().map(|member| {
                RejectedHit {
                    hit: hits[member].id,
                    reason: RejectionReason::TruncatedByMaxCount,
                }
            }));
        }
    }
    order_selection(&context, &hits, &mut chosen, config.output_order)?;

    // === Phase 5: Boundary resolution ===
    let raw_segments: Vec<&[Segment]> = chosen
        .iter()
        .map(|&member| {
            context
                .hit(hits[member].id)
                .map(|hit| hit.segments.as_slice())
        })
        .collect::<Result<_, _>>()?;
    let resolved = tasks::boundary_resolution::run(&raw_segments);

    let total_weight = chosen.iter().map(|&member| hits[member].weight).sum();
    let selected: Vec<SelectedHit> = chosen
        .iter()
        .zip(resolved)
        .map(|(&member, resolved_segments)| SelectedHit {
            hit: hits[member].id,
            resolved_segments,
        })
        .collect();

    rejected.sort_by_key(|r| collection.index_of(r.hit));

    let resolution = Resolution {
        selected,
        rejected,
        diagnostics: validation.diagnostics,
        total_weight,
        num_components: components.len(),
        complete,
    };

    info!(
        selected = resolution.selected.len(),
        rejected = resolution.rejected.len(),
        skipped = resolution.diagnostics.len(),
        components = resolution.num_components,
        total_weight = resolution.total_weight,
        complete = resolution.complete,
        "Resolution complete."
    );
    Ok(resolution)
}

fn resolve_components(
    context: &ResolveContext,
    hits: &[CalcHit],
    components: &[Vec<usize>],
    deadline: Option<Instant>,
) -> Vec<ComponentOutcome> {
    let comparator = context.comparator;
    let strategy = context.config.strategy;
    let reporter = context.reporter;

    reporter.report(Progress::ComponentsStart {
        total: components.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = components.iter();

    #[cfg(feature = "parallel")]
    let iterator = components.par_iter();

    let outcomes: Vec<ComponentOutcome> = iterator
        .map(|members| {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return ComponentOutcome::DeadlineExceeded;
            }
            let solution = match strategy {
                ResolveStrategy::Optimal => {
                    tasks::optimal_resolution::run(hits, members, &comparator)
                }
                ResolveStrategy::NaiveGreedy => {
                    tasks::greedy_resolution::run(hits, members, &comparator)
                }
            };
            debug!(
                hits = members.len(),
                selected = solution.selected.len(),
                weight = solution.weight,
                "Resolved component."
            );
            reporter.report(Progress::ComponentResolved {
                hits: members.len(),
            });
            ComponentOutcome::Solved(solution)
        })
        .collect();

    reporter.report(Progress::ComponentsFinish);
    outcomes
}

fn order_selection(
    context: &ResolveContext,
    hits: &[CalcHit],
    chosen: &mut [usize],
    order: OutputOrder,
) -> Result<(), EngineError> {
    match order {
        OutputOrder::Original => chosen.sort_by_key(|&member| hits[member].rank.index),
        OutputOrder::Score => {
            let comparator = context.comparator;
            chosen.sort_by(|&a, &b| comparator.compare(&hits[a].rank, &hits[b].rank));
        }
        OutputOrder::Start => {
            let starts = chosen
                .iter()
                .map(|&member| {
                    context
                        .hit(hits[member].id)
                        .map(|hit| (hit.start(), hits[member].rank.index))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let mut keyed: Vec<_> = starts.into_iter().zip(chosen.iter().copied()).collect();
            keyed.sort_unstable();
            for (slot, (_, member)) in chosen.iter_mut().zip(keyed) {
                *slot = member;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::hit::{Hit, InvalidHitError};
    use crate::core::models::ids::HitId;
    use crate::core::models::segment::ResIdx;
    use crate::core::overlap::hits_overlap;
    use crate::core::scoring::score_type::ScoreType;
    use crate::core::trim::TrimSpec;
    use crate::engine::config::{
        ConfigError, DuplicatePolicy, InvalidHitPolicy, ResolveConfigBuilder,
    };
    use itertools::Itertools;
    use std::sync::Mutex;
    use std::time::Duration;

    fn collection(hits: &[(&str, &[(ResIdx, ResIdx)], f64)]) -> HitCollection {
        HitCollection::from_hits(
            "query",
            hits.iter()
                .map(|(label, bounds, score)| Hit::from_bounds(*label, bounds, *score, ScoreType::CrhScore)),
        )
    }

    fn resolve(collection: &HitCollection, config: &ResolveConfig) -> Resolution {
        run(collection, config, &ProgressReporter::new()).unwrap()
    }

    fn selected_labels<'a>(collection: &'a HitCollection, resolution: &Resolution) -> Vec<&'a str> {
        resolution
            .selected_ids()
            .map(|id| collection.hit(id).unwrap().label.as_str())
            .collect()
    }

    fn id_of(collection: &HitCollection, label: &str) -> HitId {
        collection
            .iter()
            .find(|(_, hit)| hit.label == label)
            .map(|(id, _)| id)
            .unwrap()
    }

    mod worked_examples {
        use super::*;

        #[test]
        fn disjoint_hits_are_both_selected() {
            let hits = collection(&[("c", &[(1, 10)], 5.0), ("d", &[(20, 30)], 3.0)]);
            let resolution = resolve(&hits, &ResolveConfig::default());
            assert_eq!(selected_labels(&hits, &resolution), ["c", "d"]);
            assert_eq!(resolution.total_weight, 8.0);
            assert_eq!(resolution.num_components, 2);
            assert!(resolution.complete);
        }

        #[test]
        fn equal_scores_prefer_the_longer_contiguous_hit() {
            let hits = collection(&[
                ("a", &[(1272, 1363)], 1.0),
                ("b", &[(1272, 1320), (1398, 1437)], 1.0),
            ]);
            let resolution = resolve(&hits, &ResolveConfig::default());
            assert_eq!(selected_labels(&hits, &resolution), ["a"]);
            assert_eq!(
                resolution.rejection_of(id_of(&hits, "b")),
                Some(RejectionReason::OverlapLoss)
            );
        }

        #[test]
        fn equal_scores_prefer_the_better_hit_even_when_it_stops_later() {
            let hits = collection(&[("a", &[(100, 191)], 1.0), ("b", &[(100, 188)], 1.0)]);
            let resolution = resolve(&hits, &ResolveConfig::default());
            assert_eq!(selected_labels(&hits, &resolution), ["a"]);
            assert_eq!(
                resolution.rejection_of(id_of(&hits, "b")),
                Some(RejectionReason::OverlapLoss)
            );

            let hits = collection(&[("first", &[(10, 59)], 1.0), ("second", &[(1, 50)], 1.0)]);
            let resolution = resolve(&hits, &ResolveConfig::default());
            assert_eq!(selected_labels(&hits, &resolution), ["first"]);
        }

        #[test]
        fn a_lone_negative_hit_is_selected() {
            let hits = collection(&[("neg", &[(1, 10)], -2.5)]);
            let resolution = resolve(&hits, &ResolveConfig::default());
            assert_eq!(selected_labels(&hits, &resolution), ["neg"]);
            assert!(resolution.rejected.is_empty());
            assert_eq!(resolution.total_weight, -2.5);
        }

        #[test]
        fn zero_score_hit_overlapping_nothing_is_selected() {
            let hits = collection(&[("zero", &[(1, 10)], 0.0), ("other", &[(20, 30)], 4.0)]);
            let resolution = resolve(&hits, &ResolveConfig::default());
            assert_eq!(selected_labels(&hits, &resolution), ["zero", "other"]);
            assert!(resolution.rejected.is_empty());
            assert_eq!(resolution.total_weight, 4.0);
        }

        #[test]
        fn evalue_above_one_is_still_selected_alone() {
            let hits = HitCollection::from_hits(
                "q",
                [Hit::from_bounds("weak", &[(1, 40)], 2.0, ScoreType::Evalue)],
            );
            let config = ResolveConfigBuilder::new()
                .score_type(ScoreType::Evalue)
                .build()
                .unwrap();
            let resolution = resolve(&hits, &config);
            assert_eq!(selected_labels(&hits, &resolution), ["weak"]);
            assert!(resolution.rejected.is_empty());
            assert!(resolution.total_weight < 0.0);
        }

        #[test]
        fn negative_hit_overlapping_a_selected_hit_is_an_overlap_loss() {
            let hits = collection(&[("good", &[(1, 50)], 3.0), ("neg", &[(40, 60)], -1.0)]);
            let resolution = resolve(&hits, &ResolveConfig::default());
            assert_eq!(selected_labels(&hits, &resolution), ["good"]);
            assert_eq!(
                resolution.rejection_of(id_of(&hits, "neg")),
                Some(RejectionReason::OverlapLoss)
            );
        }

        #[test]
        fn interleaved_discontiguous_hits_are_all_selected() {
            let hits = collection(&[
                ("a", &[(10, 19), (40, 49)], 1.0),
                ("b", &[(30, 39), (50, 59)], 1.0),
                ("c", &[(0, 9), (60, 69)], 1.0),
            ]);
            let resolution = resolve(&hits, &ResolveConfig::default());
            assert_eq!(selected_labels(&hits, &resolution), ["a", "b", "c"]);
            assert_eq!(resolution.total_weight, 3.0);
        }

        #[test]
        fn empty_collection_resolves_to_nothing() {
            let hits = HitCollection::new("empty");
            let resolution = resolve(&hits, &ResolveConfig::default());
            assert!(resolution.selected.is_empty());
            assert_eq!(resolution.total_weight, 0.0);
            assert!(resolution.complete);
        }

        #[test]
        fn evalues_are_weighted_by_negative_log() {
            let hits = HitCollection::from_hits(
                "q",
                [
                    Hit::from_bounds("long", &[(1, 100)], 1e-10, ScoreType::Evalue),
                    Hit::from_bounds("left", &[(1, 50)], 1e-6, ScoreType::Evalue),
                    Hit::from_bounds("right", &[(51, 100)], 1e-6, ScoreType::Evalue),
                ],
            );
            let config = ResolveConfigBuilder::new()
                .score_type(ScoreType::Evalue)
                .build()
                .unwrap();
            let resolution = resolve(&hits, &config);
            assert_eq!(selected_labels(&hits, &resolution), ["left", "right"]);
            assert!((resolution.total_weight - 12.0).abs() < 1e-9);
        }
    }

    mod properties {
        use super::*;
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        fn random_collection(rng: &mut StdRng, count: usize) -> HitCollection {
            let mut collection = HitCollection::new("random");
            for n in 0..count {
                let mut bounds = Vec::new();
                let mut cursor: ResIdx = rng.gen_range(0..300);
                for _ in 0..rng.gen_range(1..=3) {
                    let length = rng.gen_range(5..60);
                    bounds.push((cursor, cursor + length - 1));
                    cursor += length + rng.gen_range(1..80);
                }
                let score = f64::from(rng.gen_range(1..50u32)) / 4.0;
                collection.push(Hit::from_bounds(format!("h{n}"), &bounds, score, ScoreType::CrhScore));
            }
            collection
        }

        #[test]
        fn selected_hits_never_overlap() {
            let mut rng = StdRng::seed_from_u64(1);
            for _ in 0..50 {
                let hits = random_collection(&mut rng, 60);
                let resolution = resolve(&hits, &ResolveConfig::default());
                let selected: Vec<HitId> = resolution.selected_ids().collect();
                for (&a, &b) in selected.iter().tuple_combinations() {
                    assert!(!hits_overlap(hits.hit(a).unwrap(), hits.hit(b).unwrap()));
                }
            }
        }

        #[test]
        fn every_hit_is_accounted_for_once() {
            let mut rng = StdRng::seed_from_u64(2);
            let hits = random_collection(&mut rng, 80);
            let resolution = resolve(&hits, &ResolveConfig::default());
            let mut seen: Vec<HitId> = resolution
                .selected_ids()
                .chain(resolution.rejected.iter().map(|r| r.hit))
                .chain(resolution.diagnostics.iter().map(|d| d.hit))
                .collect();
            assert_eq!(seen.len(), hits.len());
            seen.sort_by_key(|id| hits.index_of(*id));
            seen.dedup();
            assert_eq!(seen.len(), hits.len());
        }

        #[test]
        fn resolving_the_selection_again_changes_nothing() {
            let mut rng = StdRng::seed_from_u64(3);
            let hits = random_collection(&mut rng, 60);
            let config = ResolveConfig::default();
            let first = resolve(&hits, &config);

            let again = HitCollection::from_hits(
                "again",
                first.selected_ids().map(|id| hits.hit(id).unwrap().clone()),
            );
            let second = resolve(&again, &config);
            assert_eq!(second.selected.len(), first.selected.len());
            assert_eq!(second.total_weight, first.total_weight);
            assert!(second.rejected.is_empty());
        }

        #[test]
        fn adding_a_hit_never_lowers_the_total() {
            let mut rng = StdRng::seed_from_u64(4);
            let config = ResolveConfig::default();
            for _ in 0..20 {
                let mut hits = random_collection(&mut rng, 40);
                let before = resolve(&hits, &config).total_weight;
                let start = rng.gen_range(0..400);
                hits.push(Hit::from_bounds("extra", &[(start, start + 30)], 0.0, ScoreType::CrhScore));
                let after = resolve(&hits, &config).total_weight;
                assert!(after >= before - 1e-9);
                assert!((after - before).abs() < 1e-9);
            }
        }

        #[test]
        fn repeated_runs_give_identical_results() {
            let mut rng = StdRng::seed_from_u64(5);
            let hits = random_collection(&mut rng, 100);
            let config = ResolveConfig::default();
            let first = resolve(&hits, &config);
            for _ in 0..3 {
                assert_eq!(resolve(&hits, &config), first);
            }
        }

        #[test]
        fn optimal_is_never_worse_than_greedy() {
            let mut rng = StdRng::seed_from_u64(6);
            let greedy_config = ResolveConfigBuilder::new()
                .strategy(ResolveStrategy::NaiveGreedy)
                .build()
                .unwrap();
            for _ in 0..30 {
                let hits = random_collection(&mut rng, 50);
                let optimal = resolve(&hits, &ResolveConfig::default()).total_weight;
                let greedy = resolve(&hits, &greedy_config).total_weight;
                assert!(optimal >= greedy - 1e-9);
            }
        }
    }

    mod policies {
        use super::*;

        #[test]
        fn duplicate_policy_prune_marks_the_worse_copy() {
            let hits = collection(&[
                ("low", &[(1, 50)], 2.0),
                ("high", &[(1, 50)], 5.0),
            ]);
            let config = ResolveConfigBuilder::new()
                .duplicate_policy(DuplicatePolicy::Prune)
                .build()
                .unwrap();
            let resolution = resolve(&hits, &config);
            assert_eq!(selected_labels(&hits, &resolution), ["high"]);
            assert_eq!(
                resolution.rejection_of(id_of(&hits, "low")),
                Some(RejectionReason::DuplicatePruned)
            );

            let preserved = resolve(&hits, &ResolveConfig::default());
            assert_eq!(
                preserved.rejection_of(id_of(&hits, "low")),
                Some(RejectionReason::OverlapLoss)
            );
        }

        #[test]
        fn duplicate_policy_prune_keeps_the_earlier_of_tied_copies() {
            let hits = collection(&[
                ("early", &[(5, 60), (70, 90)], 3.0),
                ("late", &[(5, 60), (70, 90)], 3.0),
            ]);
            let config = ResolveConfigBuilder::new()
                .duplicate_policy(DuplicatePolicy::Prune)
                .build()
                .unwrap();
            let resolution = resolve(&hits, &config);
            assert_eq!(selected_labels(&hits, &resolution), ["early"]);
            assert_eq!(
                resolution.rejection_of(id_of(&hits, "late")),
                Some(RejectionReason::DuplicatePruned)
            );
        }

        #[test]
        fn max_hits_keeps_the_best_ranked_selection() {
            let hits = collection(&[
                ("a", &[(1, 10)], 1.0),
                ("b", &[(20, 30)], 9.0),
                ("c", &[(40, 50)], 5.0),
            ]);
            let config = ResolveConfigBuilder::new().max_hits(2).build().unwrap();
            let resolution = resolve(&hits, &config);
            assert_eq!(selected_labels(&hits, &resolution), ["b", "c"]);
            assert_eq!(resolution.total_weight, 14.0);
            assert_eq!(
                resolution.rejection_of(id_of(&hits, "a")),
                Some(RejectionReason::TruncatedByMaxCount)
            );
        }

        #[test]
        fn invalid_configuration_fails_before_any_work() {
            let hits = collection(&[("a", &[(1, 10)], 1.0)]);
            let config = ResolveConfig {
                max_hits: Some(0),
                ..Default::default()
            };
            let result = run(&hits, &config, &ProgressReporter::new());
            assert!(matches!(
                result,
                Err(EngineError::Config(ConfigError::InvalidValue { .. }))
            ));
        }

        #[test]
        fn invalid_hits_are_skipped_with_a_diagnostic() {
            let hits = collection(&[("good", &[(1, 10)], 2.0), ("bad", &[(30, 20)], 9.0)]);
            let resolution = resolve(&hits, &ResolveConfig::default());
            assert_eq!(selected_labels(&hits, &resolution), ["good"]);
            assert_eq!(resolution.diagnostics.len(), 1);
            assert_eq!(resolution.diagnostics[0].hit, id_of(&hits, "bad"));
            assert_eq!(
                resolution.diagnostics[0].error,
                InvalidHitError::InvertedSegment { start: 30, stop: 20 }
            );
        }

        #[test]
        fn invalid_hits_abort_under_the_reject_policy() {
            let hits = collection(&[("good", &[(1, 10)], 2.0), ("bad", &[], 9.0)]);
            let config = ResolveConfigBuilder::new()
                .invalid_hit_policy(InvalidHitPolicy::Reject)
                .build()
                .unwrap();
            let result = run(&hits, &config, &ProgressReporter::new());
            assert!(matches!(result, Err(EngineError::InvalidHit { ref label, .. }) if label == "bad"));
        }

        #[test]
        fn boundary_tolerance_lets_neighbours_share_residues() {
            let hits = collection(&[("left", &[(1, 100)], 5.0), ("right", &[(97, 200)], 5.0)]);
            let strict = resolve(&hits, &ResolveConfig::default());
            assert_eq!(strict.selected.len(), 1);

            let config = ResolveConfigBuilder::new().boundary_overlap(4).build().unwrap();
            let tolerant = resolve(&hits, &config);
            assert_eq!(selected_labels(&hits, &tolerant), ["left", "right"]);
            assert_eq!(tolerant.selected[0].resolved_segments, vec![Segment::new(1, 98)]);
            assert_eq!(tolerant.selected[1].resolved_segments, vec![Segment::new(99, 200)]);
        }

        #[test]
        fn trim_spec_and_min_seg_length_apply_together() {
            let hits = collection(&[
                ("a", &[(1, 100)], 5.0),
                ("b", &[(90, 200), (210, 212)], 5.0),
            ]);
            let config = ResolveConfigBuilder::new()
                .overlap_trim(TrimSpec::new(50, 30).unwrap())
                .min_seg_length(10)
                .build()
                .unwrap();
            let resolution = resolve(&hits, &config);
            assert_eq!(selected_labels(&hits, &resolution), ["a", "b"]);
        }

        #[test]
        fn output_order_follows_configuration() {
            let hits = collection(&[
                ("late", &[(100, 150)], 1.0),
                ("best", &[(200, 250)], 9.0),
                ("early", &[(1, 50)], 5.0),
            ]);
            let by = |order| {
                let config = ResolveConfigBuilder::new().output_order(order).build().unwrap();
                let resolution = resolve(&hits, &config);
                selected_labels(&hits, &resolution)
            };
            assert_eq!(by(OutputOrder::Original), ["late", "best", "early"]);
            assert_eq!(by(OutputOrder::Score), ["best", "early", "late"]);
            assert_eq!(by(OutputOrder::Start), ["early", "late", "best"]);
        }

        #[test]
        fn expired_deadline_skips_remaining_components() {
            let hits = collection(&[("a", &[(1, 10)], 1.0), ("b", &[(20, 30)], 1.0)]);
            let config = ResolveConfig::default();
            let reporter = ProgressReporter::new();
            let context = ResolveContext::new(&hits, &config, &reporter);
            let prepared = tasks::preparation::run(&context, hits.ids()).unwrap();
            let components = tasks::decomposition::run(&prepared.hits);

            let outcomes =
                resolve_components(&context, &prepared.hits, &components, Some(Instant::now()));
            assert_eq!(outcomes.len(), 2);
            assert!(
                outcomes
                    .iter()
                    .all(|o| matches!(o, ComponentOutcome::DeadlineExceeded))
            );
        }

        #[test]
        fn generous_time_budget_completes() {
            let hits = collection(&[("a", &[(1, 10)], 1.0), ("b", &[(5, 30)], 2.0)]);
            let config = ResolveConfigBuilder::new()
                .time_budget(Duration::from_secs(3600))
                .build()
                .unwrap();
            let resolution = resolve(&hits, &config);
            assert!(resolution.complete);
            assert_eq!(selected_labels(&hits, &resolution), ["b"]);
        }
    }

    #[test]
    fn progress_reports_every_component() {
        let hits = collection(&[
            ("a", &[(1, 10)], 1.0),
            ("b", &[(20, 30)], 1.0),
            ("c", &[(25, 40)], 2.0),
        ]);
        let resolved = Mutex::new(0usize);
        let total = Mutex::new(0u64);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::ComponentsStart { total: n } => *total.lock().unwrap() = n,
            Progress::ComponentResolved { .. } => *resolved.lock().unwrap() += 1,
            _ => {}
        }));

        run(&hits, &ResolveConfig::default(), &reporter).unwrap();
        drop(reporter);
        assert_eq!(total.into_inner().unwrap(), 2);
        assert_eq!(resolved.into_inner().unwrap(), 2);
    }

    #[test]
    fn progress_wraps_phases_and_reports_skipped_hits() {
        let hits = collection(&[("good", &[(1, 10)], 2.0), ("bad", &[(30, 20)], 9.0)]);
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let label = match event {
                Progress::PhaseStart { name } => format!("start {name}"),
                Progress::PhaseFinish => "finish".to_string(),
                Progress::Message(message) => format!("message {message}"),
                _ => return,
            };
            events.lock().unwrap().push(label);
        }));

        run(&hits, &ResolveConfig::default(), &reporter).unwrap();
        drop(reporter);
        assert_eq!(
            events.into_inner().unwrap(),
            [
                "start Preparation",
                "message Skipped 1 malformed hit(s) of query 'query'.",
                "finish",
                "start Resolving",
                "finish",
            ]
        );
    }
}
