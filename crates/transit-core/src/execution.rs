//! Execution engines for controlling computation strategy
//!
//! Candidate evaluation in a period search is embarrassingly parallel. An
//! engine decides whether the candidates are walked in order on the calling
//! thread or spread over a Rayon pool. Either way every result lands in the
//! slot indexed by its candidate position, so output order never depends on
//! completion order.

#[cfg(feature = "parallel")]
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStrategy {
    /// Process items sequentially
    Sequential,
    /// Process items in parallel
    Parallel,
}

/// Trait for execution engines that control how batches are evaluated
pub trait ExecutionEngine: Clone + Send + Sync {
    /// Execute a function in the engine's execution context
    fn execute<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send;

    /// Fill every slot of a pre-sized buffer with `f(index)`
    ///
    /// Each invocation writes only its own slot; no synchronisation is
    /// needed between slots.
    fn fill_slots<R, F>(&self, slots: &mut [R], f: F)
    where
        R: Send,
        F: Fn(usize) -> R + Sync + Send;

    /// Evaluate `f` for indices `0..count`, returning results in index order
    fn execute_batch<R, F>(&self, count: usize, f: F) -> Vec<R>
    where
        R: Send + Default + Clone,
        F: Fn(usize) -> R + Sync + Send,
    {
        let mut slots = vec![R::default(); count];
        self.fill_slots(&mut slots, f);
        slots
    }

    /// Get the execution strategy
    fn strategy(&self) -> ExecutionStrategy;

    /// Check if parallel execution is used
    fn is_parallel(&self) -> bool {
        self.strategy() == ExecutionStrategy::Parallel
    }

    /// Get the number of threads available
    fn num_threads(&self) -> usize;
}

/// Sequential execution engine
///
/// Executes all operations sequentially in the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialEngine;

impl SequentialEngine {
    /// Create a new sequential engine
    pub fn new() -> Self {
        Self
    }
}

impl ExecutionEngine for SequentialEngine {
    fn execute<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        f()
    }

    fn fill_slots<R, F>(&self, slots: &mut [R], f: F)
    where
        R: Send,
        F: Fn(usize) -> R + Sync + Send,
    {
        for (i, slot) in slots.iter_mut().enumerate() {
            *slot = f(i);
        }
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Sequential
    }

    fn num_threads(&self) -> usize {
        1
    }
}

/// Parallel execution engine using Rayon
///
/// Uses the global Rayon pool unless a dedicated pool is supplied.
#[cfg(feature = "parallel")]
#[derive(Clone, Debug, Default)]
pub struct ParallelEngine {
    thread_pool: Option<std::sync::Arc<rayon::ThreadPool>>,
}

#[cfg(feature = "parallel")]
impl ParallelEngine {
    /// Create a new parallel engine with the global thread pool
    pub fn new() -> Self {
        Self { thread_pool: None }
    }

    /// Create a new parallel engine with a custom thread pool
    pub fn with_thread_pool(pool: std::sync::Arc<rayon::ThreadPool>) -> Self {
        Self {
            thread_pool: Some(pool),
        }
    }

    /// Create with a specific number of threads
    pub fn with_num_threads(num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| Error::Execution(format!("Failed to create thread pool: {e}")))?;

        Ok(Self {
            thread_pool: Some(std::sync::Arc::new(pool)),
        })
    }
}

#[cfg(feature = "parallel")]
impl ExecutionEngine for ParallelEngine {
    fn execute<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if let Some(pool) = &self.thread_pool {
            pool.install(f)
        } else {
            f()
        }
    }

    fn fill_slots<R, F>(&self, slots: &mut [R], f: F)
    where
        R: Send,
        F: Fn(usize) -> R + Sync + Send,
    {
        use rayon::prelude::*;

        let fill = |slots: &mut [R]| {
            slots
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, slot)| *slot = f(i));
        };

        if let Some(pool) = &self.thread_pool {
            pool.install(|| fill(slots))
        } else {
            fill(slots)
        }
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Parallel
    }

    fn num_threads(&self) -> usize {
        if let Some(pool) = &self.thread_pool {
            pool.current_num_threads()
        } else {
            rayon::current_num_threads()
        }
    }
}

/// Create a sequential engine
pub fn sequential() -> SequentialEngine {
    SequentialEngine::new()
}

/// Create a parallel engine on the global Rayon pool
#[cfg(feature = "parallel")]
pub fn parallel() -> ParallelEngine {
    ParallelEngine::new()
}

/// Engine used when the caller does not pick one
#[cfg(feature = "parallel")]
pub type DefaultEngine = ParallelEngine;

/// Engine used when the caller does not pick one
#[cfg(not(feature = "parallel"))]
pub type DefaultEngine = SequentialEngine;

/// Create the default engine: parallel when the `parallel` feature is enabled
pub fn default_engine() -> DefaultEngine {
    DefaultEngine::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_engine() {
        let engine = sequential();

        let result = engine.execute(|| 42);
        assert_eq!(result, 42);

        let squares = engine.execute_batch(5, |i| i * i);
        assert_eq!(squares, vec![0, 1, 4, 9, 16]);

        let mut slots = vec![0.0; 4];
        engine.fill_slots(&mut slots, |i| i as f64 * 0.5);
        assert_eq!(slots, vec![0.0, 0.5, 1.0, 1.5]);

        assert_eq!(engine.strategy(), ExecutionStrategy::Sequential);
        assert!(!engine.is_parallel());
        assert_eq!(engine.num_threads(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let engine = sequential();
        let out: Vec<u64> = engine.execute_batch(0, |i| i as u64);
        assert!(out.is_empty());
    }

    #[test]
    fn test_default_engine_has_threads() {
        let engine = default_engine();
        assert!(engine.num_threads() > 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_engine_preserves_order() {
        let engine = parallel();

        let values = engine.execute_batch(1000, |i| (i as f64).sqrt());
        let expected: Vec<f64> = (0..1000).map(|i| (i as f64).sqrt()).collect();
        assert_eq!(values, expected);

        assert_eq!(engine.strategy(), ExecutionStrategy::Parallel);
        assert!(engine.num_threads() > 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_engine_with_num_threads() {
        let engine = ParallelEngine::with_num_threads(2).unwrap();
        assert_eq!(engine.num_threads(), 2);

        let sum = engine.execute(|| {
            use rayon::prelude::*;
            (0..1000).into_par_iter().sum::<i32>()
        });
        assert_eq!(sum, 499500);
    }
}
