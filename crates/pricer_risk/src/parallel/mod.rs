//! Rayon-based parallelisation utilities.
//!
//! Grid cells are independent, so they are evaluated with `par_iter` once
//! the cell count crosses [`ParallelConfig::parallel_threshold`]. Results
//! keep input order either way.

use rayon::prelude::*;

/// Minimum number of cells handed to one Rayon task.
pub const DEFAULT_BATCH_SIZE: usize = 16;

/// Cell count from which grid evaluation goes parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Parallel map with specified batch size.
///
/// Maps each item through a function in parallel, preserving order.
///
/// # Arguments
///
/// * `items` - Slice of items to process
/// * `batch_size` - Minimum items per Rayon task
/// * `mapper` - Function to apply to each item
pub fn parallel_map<T, R, F>(items: &[T], batch_size: usize, mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    items
        .par_iter()
        .with_min_len(batch_size.max(1))
        .map(mapper)
        .collect()
}

/// Configuration for parallel execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallelConfig {
    /// Batch size for chunked processing
    pub batch_size: usize,
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Configuration that never goes parallel.
    pub fn sequential() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: usize::MAX,
        }
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }

    /// Maps `items` in order, in parallel when the count warrants it.
    pub fn map<T, R, F>(&self, items: &[T], mapper: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.should_parallelize(items.len()) {
            parallel_map(items, self.batch_size, mapper)
        } else {
            items.iter().map(mapper).collect()
        }
    }
}
