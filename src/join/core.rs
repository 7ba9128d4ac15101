//! QuadtreeJoinExecutor struct and the shared work-splitting helper

use rayon::prelude::*;

use crate::config::{ExecutionConfig, JoinConfig};

/// Runs the broad- and narrow-phase engines with one execution setting.
///
/// Stateless apart from its configuration; every call allocates its own
/// intermediate tables, so one executor can serve concurrent calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadtreeJoinExecutor {
    pub(crate) execution: ExecutionConfig,
}

impl QuadtreeJoinExecutor {
    pub fn new(execution: ExecutionConfig) -> Self {
        Self { execution }
    }

    pub fn from_config(config: &JoinConfig) -> Self {
        Self::new(config.execution)
    }

    pub fn sequential() -> Self {
        Self::new(ExecutionConfig::sequential())
    }

    pub fn execution(&self) -> &ExecutionConfig {
        &self.execution
    }
}

/// Run `f(i, out)` for `i in 0..n` and concatenate the outputs in index order.
///
/// Parallel and sequential paths produce identical vectors: rayon's `fold`
/// keeps one buffer per split and `reduce` joins the splits left to right.
pub(crate) fn collect_indexed<R, F>(execution: &ExecutionConfig, n: usize, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize, &mut Vec<R>) + Sync + Send,
{
    if execution.should_parallelize(n) {
        (0..n)
            .into_par_iter()
            .fold(Vec::new, |mut out, i| {
                f(i, &mut out);
                out
            })
            .reduce(Vec::new, |mut left, mut right| {
                left.append(&mut right);
                left
            })
    } else {
        let mut out = Vec::new();
        for i in 0..n {
            f(i, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(i: usize, out: &mut Vec<usize>) {
        // 0, 1 or 2 copies depending on i
        for _ in 0..(i % 3) {
            out.push(i);
        }
    }

    #[test]
    fn test_parallel_matches_sequential_order() {
        let seq = collect_indexed(&ExecutionConfig::sequential(), 10_000, expand);
        let par = collect_indexed(&ExecutionConfig::always_parallel(), 10_000, expand);
        assert_eq!(seq, par);
        assert!(seq.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_empty_range() {
        let out: Vec<usize> = collect_indexed(&ExecutionConfig::always_parallel(), 0, expand);
        assert!(out.is_empty());
    }

    #[test]
    fn test_executor_from_config() {
        let executor = QuadtreeJoinExecutor::from_config(&JoinConfig::for_testing());
        assert!(!executor.execution().parallel);
        assert_eq!(QuadtreeJoinExecutor::sequential(), executor);
    }
}
