#![allow(clippy::expect_used, clippy::panic)]

use std::io::{self, Write};
use std::sync::Arc;

use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rational_gamma::elementary::real;
use rational_gamma::{
    factorial, lgamma, tgamma, ComplexRational, GammaConfig, GammaEngine, GammaFunction, Rational,
};

fn rat(numer: i64, denom: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

fn two_pow(exponent: i64) -> BigRational {
    let shift = exponent.unsigned_abs() as usize;
    if exponent >= 0 {
        BigRational::from_integer(BigInt::one() << shift)
    } else {
        BigRational::new(BigInt::one(), BigInt::one() << shift)
    }
}

fn finite(value: &Rational) -> BigRational {
    value.as_finite().cloned().expect("finite result")
}

fn relative_error(actual: &BigRational, expected: &BigRational) -> BigRational {
    let error = (actual - expected).abs();
    if expected.is_zero() {
        error
    } else {
        error / expected.abs()
    }
}

fn assert_relative(actual: &BigRational, expected: &BigRational, bits: i64) {
    let error = relative_error(actual, expected);
    assert!(
        error <= two_pow(-bits),
        "expected {expected}, got {actual}, relative error above 2^-{bits}"
    );
}

fn sample_arguments(count: usize) -> Vec<BigRational> {
    let mut rng = StdRng::seed_from_u64(0x6a6d);
    let mut samples = Vec::with_capacity(count);
    while samples.len() < count {
        let numer: i64 = rng.gen_range(-60..=60);
        let denom: i64 = rng.gen_range(1..=9);
        let value = rat(numer, denom);
        if value.is_integer() && !value.is_positive() {
            continue;
        }
        samples.push(value);
    }
    samples
}

#[test]
fn recurrence_law_holds_across_the_real_line() {
    let engine = GammaEngine::default();
    for z in sample_arguments(24) {
        let shifted = finite(&engine.gamma(&Rational::from(&z + BigRational::one()), 64));
        let scaled = &z * finite(&engine.gamma(&Rational::from(z.clone()), 64));
        assert_relative(&shifted, &scaled, 58);
    }
}

#[test]
fn recurrence_law_holds_for_complex_arguments() {
    let engine = GammaEngine::default();
    for (re, im) in [(rat(1, 3), rat(2, 1)), (rat(-5, 2), rat(1, 4)), (rat(7, 1), rat(-3, 2))] {
        let z = ComplexRational::new(re.clone(), im.clone());
        let z_plus_one = ComplexRational::new(re + BigRational::one(), im);
        let shifted = engine.gamma(&z_plus_one, 64);
        let scaled = z.clone() * engine.gamma(&z, 64);
        let shifted = shifted.to_finite().expect("finite");
        let scaled = scaled.to_finite().expect("finite");
        let difference = (&shifted - &scaled).norm_sqr();
        assert!(difference <= shifted.norm_sqr() * two_pow(-112));
    }
}

#[test]
fn integer_arguments_give_exact_factorials() {
    let engine = GammaEngine::default();
    for n in 1..=170i64 {
        let value = engine.gamma(&Rational::from(n), 64);
        assert_eq!(value, Rational::from(factorial(n - 1)), "Γ({n})");
    }
}

#[test]
fn reflection_identity() {
    let engine = GammaEngine::default();
    for x in sample_arguments(16) {
        if x.is_integer() {
            continue;
        }
        let left = finite(&engine.gamma(&Rational::from(x.clone()), 64));
        let right = finite(&engine.gamma(&Rational::from(BigRational::one() - &x), 64));
        let expected = real::pi(160) / real::sin_pi(&x, 160);
        assert_relative(&(left * right), &expected, 58);
    }
}

#[test]
fn known_values() {
    let engine = GammaEngine::default();
    assert_eq!(engine.gamma(&Rational::one(), 64), Rational::one());
    assert_eq!(engine.gamma(&Rational::from(2), 64), Rational::one());
    assert_eq!(engine.ln_gamma(&Rational::one(), 64), Rational::zero());

    let root_pi = real::sqrt(&real::pi(200), 160);
    let half = finite(&engine.gamma(&Rational::new(1, 2), 64));
    assert_relative(&half, &root_pi, 63);
}

#[test]
fn concrete_scenarios_at_64_bits() {
    let engine = GammaEngine::default();
    let root_pi = real::sqrt(&real::pi(200), 160);

    let ln_24 = real::ln(&rat(24, 1), 160).expect("nonzero");
    assert_relative(&finite(&engine.ln_gamma(&Rational::from(5), 64)), &ln_24, 63);

    let half = finite(&engine.gamma(&Rational::new(1, 2), 64));
    assert_relative(&half, &root_pi, 63);

    let minus_half = finite(&engine.gamma(&Rational::new(-1, 2), 64));
    let expected = -(root_pi * rat(2, 1));
    assert_relative(&minus_half, &expected, 63);

    assert!((0.5f64.gamma(&engine, 64) - std::f64::consts::PI.sqrt()).abs() < 1e-15);
    assert!(((-0.5f64).gamma(&engine, 64) + 2.0 * std::f64::consts::PI.sqrt()).abs() < 1e-15);
}

#[test]
fn more_bits_never_means_fewer_correct_bits() {
    let engine = GammaEngine::default();
    for z in [rat(7, 3), rat(-13, 4), rat(41, 5)] {
        let reference = finite(&engine.gamma(&Rational::from(z.clone()), 192));
        let mut coarser: Vec<i64> = Vec::new();
        for px in [16, 32, 64, 128] {
            let value = finite(&engine.gamma(&Rational::from(z.clone()), px));
            let error = relative_error(&value, &reference);
            assert!(error <= two_pow(-(px - 1)), "{z} at {px} bits");
            for &lower in &coarser {
                assert!(error <= two_pow(-(lower - 1)), "{z}: {px} bits worse than {lower}");
            }
            coarser.push(px);
        }
    }
}

#[test]
fn high_precision_requests_still_converge() {
    let engine = GammaEngine::default();
    let z = Rational::new(1, 3);
    let value = finite(&engine.ln_gamma(&z, 256));
    let reference = finite(&engine.ln_gamma(&z, 320));
    assert_relative(&value, &reference, 254);
}

#[test]
fn bernoulli_lookups_are_memoised() {
    let engine = GammaEngine::default();
    let first = engine.bernoulli_number(24);
    let computed = engine.bernoulli().computed();
    let second = engine.bernoulli_number(24);
    assert_eq!(first, second);
    assert_eq!(engine.bernoulli().computed(), computed);
    assert_eq!(first, rat(-236_364_091, 2730));
}

#[test]
fn specials() {
    assert_eq!(tgamma(&Rational::zero(), 64), Rational::PosInf);
    assert!(tgamma(&Rational::NaN, 64).is_nan());
    assert_eq!(tgamma(&Rational::PosInf, 64), Rational::PosInf);
    assert_eq!(lgamma(&Rational::NegInf, 64), Rational::PosInf);
    assert_eq!(tgamma(&ComplexRational::zero(), 64), ComplexRational::pole());
    assert!(tgamma(&Complex64::new(f64::NAN, 0.0), 64).re.is_nan());
}

#[test]
fn log_gamma_of_large_arguments_does_not_overflow() {
    let value = lgamma(&Rational::new(100_001, 2), 64);
    let approx = value.to_f64();
    // Stirling: (x - 1/2) ln x - x + ln(2 pi)/2 at x = 50000.5
    let x = 50_000.5f64;
    let expected = (x - 0.5) * x.ln() - x + (2.0 * std::f64::consts::PI).ln() / 2.0;
    assert!((approx - expected).abs() / expected < 1e-9);
}

#[test]
fn custom_bias_gives_the_same_answer() {
    let wide = GammaEngine::new(GammaConfig::default().with_bias(24)).expect("valid config");
    let narrow = GammaEngine::default();
    let z = Rational::new(5, 7);
    let a = finite(&wide.gamma(&z, 64));
    let b = finite(&narrow.gamma(&z, 64));
    assert_relative(&a, &b, 62);
}

#[test]
fn shared_engine_is_consistent_across_threads() {
    let z = Rational::new(22, 7);
    let results: Vec<Rational> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| tgamma(&z, 96))).collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread finished"))
            .collect()
    });
    for result in &results {
        assert_eq!(result, &results[0]);
    }
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

fn capture_debug<T>(run: impl FnOnce() -> T) -> (T, String) {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, run);
    (result, capture.contents())
}

#[test]
fn debug_flag_traces_terms_without_changing_results() {
    let engine = GammaEngine::default();
    let z = Rational::new(3, 4);

    let (plain, quiet_output) = capture_debug(|| engine.ln_gamma(&z, 64));
    assert!(!quiet_output.contains("stirling term"));

    let (traced, output) = capture_debug(|| engine.ln_gamma_debug(&z, 64));
    assert_eq!(plain, traced);
    assert!(output.contains("argument shifted"), "{output}");
    assert!(output.contains("stirling term"), "{output}");
}
