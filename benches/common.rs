#![allow(dead_code)]

use num_bigint::BigInt;
use num_rational::BigRational;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rational_gamma::{ComplexRational, Rational};

/// Non-integer rationals `p/q` with `|p| < 40 q`, drawn from a fixed seed so runs
/// are comparable.
pub fn real_arguments(count: usize) -> Vec<Rational> {
    let mut rng = StdRng::seed_from_u64(7);
    let mut values = Vec::with_capacity(count);
    while values.len() < count {
        let denom: i64 = rng.gen_range(2..=16);
        let numer: i64 = rng.gen_range(-40 * denom..40 * denom);
        if numer % denom == 0 {
            continue;
        }
        values.push(Rational::new(numer, denom));
    }
    values
}

/// Complex arguments with both parts in `(-20, 20)` at a granularity of 1/8.
pub fn complex_arguments(count: usize) -> Vec<ComplexRational> {
    let mut rng = StdRng::seed_from_u64(11);
    (0..count)
        .map(|_| {
            let re = eighths(rng.gen_range(-160..160));
            let im = eighths(rng.gen_range(-160..160));
            ComplexRational::new(re, im)
        })
        .collect()
}

fn eighths(numer: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(8))
}
