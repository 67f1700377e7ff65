//! Random draws used when initialising node values and wiring links.

use std::f64::consts::PI;

use rand::Rng;

/// Largest mean handed to a single multiplication pass. `exp(-500)` is still
/// a normal `f64`, so the acceptance threshold never underflows to zero.
const POISSON_CHUNK: f64 = 500.0;

/// Draws a sample from the standard normal distribution using the Box-Muller
/// transform.
#[expect(
    clippy::float_arithmetic,
    reason = "Box-Muller transform requires floating-point arithmetic"
)]
pub(crate) fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let mut u1 = rng.gen_range(0.0_f64..1.0_f64);
    if u1 <= f64::EPSILON {
        u1 = f64::EPSILON;
    }
    let u2 = rng.gen_range(0.0_f64..1.0_f64);
    let radius = (-2.0_f64 * u1.ln()).sqrt();
    let theta = 2.0_f64 * PI * u2;
    let sample = radius * theta.cos();
    debug_assert!(sample.is_finite(), "u1 is clamped away from zero");
    sample
}

/// Draws `min(X, cap)` where `X` follows a Poisson distribution with the
/// given `mean`.
///
/// Uses Knuth's multiplication method. Means above [`POISSON_CHUNK`] are
/// split into chunks whose draws are summed, which is exact because the sum
/// of independent Poisson variables is Poisson with the summed mean. Drawing
/// stops as soon as the running total reaches `cap`, so the cost is bounded
/// by `cap` rather than by `mean`.
///
/// The caller guarantees `mean` is finite and non-negative.
#[expect(
    clippy::float_arithmetic,
    reason = "chunking the mean subtracts floating-point values"
)]
pub(crate) fn poisson<R: Rng + ?Sized>(rng: &mut R, mean: f64, cap: usize) -> usize {
    debug_assert!(mean.is_finite() && mean >= 0.0, "mean validated by caller");
    let mut remaining = mean;
    let mut total = 0_usize;
    // `remaining -= chunk` is a no-op for huge means; the cap ends the loop.
    while remaining > 0.0 && total < cap {
        let chunk = remaining.min(POISSON_CHUNK);
        total += knuth_poisson(rng, chunk, cap - total);
        remaining -= chunk;
    }
    total
}

#[expect(
    clippy::float_arithmetic,
    reason = "Knuth's method multiplies uniform draws"
)]
fn knuth_poisson<R: Rng + ?Sized>(rng: &mut R, mean: f64, cap: usize) -> usize {
    let threshold = (-mean).exp();
    let mut product = rng.gen_range(0.0_f64..1.0_f64);
    let mut count = 0_usize;
    while product > threshold && count < cap {
        count += 1;
        product *= rng.gen_range(0.0_f64..1.0_f64);
    }
    count
}
