//! Exact integer combinatorics.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// `n!` for `n >= 1`, and 1 for every `n < 1`.
pub fn factorial(n: i64) -> BigInt {
    (2..=n).fold(BigInt::one(), |acc, k| acc * k)
}

/// `C(n, k)` via the falling product `n (n-1) ... (n-k+1) / k!`.
///
/// Uses the smaller of `k` and `n - k`. Outside `0 <= k <= n` the coefficient is zero.
pub fn binomial_coefficient(n: &BigInt, k: &BigInt) -> BigInt {
    if k.is_negative() || k > n {
        return BigInt::zero();
    }
    let complement = n - k;
    let k = if complement < *k { complement } else { k.clone() };
    if k.is_zero() {
        return BigInt::one();
    }
    // Each prefix of the product is itself a binomial coefficient, so every division is exact.
    let base = n - &k;
    let mut result = BigInt::one();
    let mut i = BigInt::one();
    while i <= k {
        result = result * (&base + &i) / &i;
        i += 1;
    }
    result
}

/// Row `n` of Pascal's triangle: `[C(n, 0), ..., C(n, n)]`.
pub fn binomial_row(n: usize) -> Vec<BigInt> {
    let mut row = Vec::with_capacity(n + 1);
    let mut current = BigInt::one();
    row.push(current.clone());
    for k in 1..=n {
        current = current * (n - k + 1) / k;
        row.push(current.clone());
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn factorial_of_small_values() {
        assert_eq!(factorial(0), big(1));
        assert_eq!(factorial(-4), big(1));
        assert_eq!(factorial(1), big(1));
        assert_eq!(factorial(5), big(120));
        assert_eq!(factorial(20), big(2_432_902_008_176_640_000));
    }

    #[test]
    fn binomial_matches_known_values() {
        assert_eq!(binomial_coefficient(&big(5), &big(2)), big(10));
        assert_eq!(binomial_coefficient(&big(10), &big(0)), big(1));
        assert_eq!(binomial_coefficient(&big(10), &big(10)), big(1));
        let expected: BigInt = "100891344545564193334812497256"
            .parse()
            .unwrap_or_default();
        assert_eq!(binomial_coefficient(&big(100), &big(50)), expected);
    }

    #[test]
    fn binomial_is_symmetric() {
        for k in 0..=30 {
            assert_eq!(
                binomial_coefficient(&big(30), &big(k)),
                binomial_coefficient(&big(30), &big(30 - k))
            );
        }
    }

    #[test]
    fn binomial_outside_the_triangle_is_zero() {
        assert_eq!(binomial_coefficient(&big(3), &big(5)), big(0));
        assert_eq!(binomial_coefficient(&big(3), &big(-1)), big(0));
    }

    #[test]
    fn pascal_row_agrees_with_single_coefficients() {
        let row = binomial_row(17);
        assert_eq!(row.len(), 18);
        for (k, value) in row.iter().enumerate() {
            assert_eq!(*value, binomial_coefficient(&big(17), &big(k as i64)));
        }
    }
}
