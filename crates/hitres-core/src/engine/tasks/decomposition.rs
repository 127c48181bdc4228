use crate::core::models::segment::ResIdx;
use crate::engine::calc_hit::CalcHit;
use tracing::{debug, instrument};

/// Union-find over hit indices.
struct DisjointSets {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
    }
}

/// Splits the hits into connected components of the overlap graph.
///
/// Two hits are connected when they overlap, directly or through a chain of overlapping
/// hits. The optimum of the whole set is the union of the optima of its components.
///
/// Components are found by sweeping over all segments in start order: every run of
/// mutually chained segments joins the hits that own them. Each component lists its members
/// in ascending index order, and components are ordered by their smallest member.
#[instrument(skip_all, name = "decomposition_task", fields(hits = hits.len()))]
pub fn run(hits: &[CalcHit]) -> Vec<Vec<usize>> {
    let mut segments: Vec<(ResIdx, ResIdx, usize)> = hits
        .iter()
        .enumerate()
        .flat_map(|(index, hit)| {
            hit.segments()
                .iter()
                .map(move |segment| (segment.start(), segment.stop(), index))
        })
        .collect();
    segments.sort_unstable();

    let mut sets = DisjointSets::new(hits.len());
    let mut run_owner: Option<usize> = None;
    let mut run_stop: ResIdx = 0;
    for &(start, stop, owner) in &segments {
        match run_owner {
            Some(first) if start <= run_stop => {
                sets.union(first, owner);
                run_stop = run_stop.max(stop);
            }
            _ => {
                run_owner = Some(owner);
                run_stop = stop;
            }
        }
    }

    let mut component_of_root: Vec<Option<usize>> = vec![None; hits.len()];
    let mut components: Vec<Vec<usize>> = Vec::new();
    for index in 0..hits.len() {
        let root = sets.find(index);
        let component = *component_of_root[root].get_or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[component].push(index);
    }

    debug!(components = components.len(), "Decomposed the overlap graph.");
    components
}
