//! Memoised Bernoulli numbers.
//!
//! The cache is append-only: entry `n` is `B(n)`, with `B(0) = 1` and
//! `B(1) = -1/2` seeded up front. Requests past the end fill every missing index
//! in order while holding the lock, so concurrent callers never compute or
//! append the same entry twice.

use std::sync::atomic::{AtomicUsize, Ordering};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use parking_lot::Mutex;
use tracing::trace;

use crate::combinatorics::binomial_row;

#[derive(Debug)]
pub struct BernoulliCache {
    values: Mutex<Vec<BigRational>>,
    computed: AtomicUsize,
}

impl BernoulliCache {
    pub fn new() -> Self {
        let seed = vec![
            BigRational::one(),
            BigRational::new(BigInt::from(-1), BigInt::from(2)),
        ];
        Self {
            values: Mutex::new(seed),
            computed: AtomicUsize::new(0),
        }
    }

    /// Returns `B(n)`, computing and caching any missing entries up to `n`.
    pub fn get(&self, n: usize) -> BigRational {
        let mut values = self.values.lock();
        while values.len() <= n {
            let next = next_value(&values);
            trace!(index = values.len(), "caching bernoulli number");
            values.push(next);
            self.computed.fetch_add(1, Ordering::Relaxed);
        }
        values[n].clone()
    }

    /// Number of cached entries, seeds included.
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    /// Always false: the two seed values are present from construction.
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }

    /// How many entries have been computed (not seeded) over the cache's lifetime.
    pub fn computed(&self) -> usize {
        self.computed.load(Ordering::Relaxed)
    }
}

impl Default for BernoulliCache {
    fn default() -> Self {
        Self::new()
    }
}

/// `B(m)` for `m = known.len()`, given `B(0) .. B(m-1)`.
///
/// Odd indices above one are zero. Even ones use
/// `B(m) = -1/(m+1) * sum_{k<m} C(m+1, k) B(k)`.
fn next_value(known: &[BigRational]) -> BigRational {
    let m = known.len();
    if m % 2 == 1 {
        return BigRational::zero();
    }
    let row = binomial_row(m + 1);
    let sum = known
        .iter()
        .zip(row.iter())
        .filter(|(value, _)| !value.is_zero())
        .fold(BigRational::zero(), |acc, (value, coefficient)| {
            acc + value * BigRational::from_integer(coefficient.clone())
        });
    -sum / BigRational::from_integer(BigInt::from(m + 1))
}
