//! Tasks that make up a resolution run.
//!
//! Each submodule performs one step of the pipeline: validating and preparing hits,
//! applying the duplicate policy, splitting the overlap graph into independent components,
//! choosing the architecture of each component, and finally splitting shared boundaries
//! between the chosen hits.

pub mod boundary_resolution;
pub mod decomposition;
pub mod duplicate_filter;
pub mod greedy_resolution;
pub mod optimal_resolution;
pub mod preparation;
pub mod validation;

/// The hits chosen for one component, as indices into the prepared hit list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentSolution {
    pub selected: Vec<usize>,
    pub weight: f64,
}
