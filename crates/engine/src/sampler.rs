//! Relevance-biased random selection over an ordered pool.

use rand::Rng;
use thiserror::Error;

/// Above this diversity the sampler ignores pool order entirely.
pub const UNIFORM_THRESHOLD: f64 = 0.7;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot select from an empty pool")]
pub struct EmptyPoolError;

/// Pick one item from `pool`.
///
/// Pools are ordered most-relevant first. With `diversity > 0.7` every item is
/// equally likely. Otherwise item `i` carries weight `(1 - diversity)^i`, so low
/// diversity concentrates picks near the front while `diversity = 0` weighs every
/// item at 1.
pub fn sample<'a, T, R>(pool: &'a [T], diversity: f64, rng: &mut R) -> Result<&'a T, EmptyPoolError>
where
    R: Rng + ?Sized,
{
    let last = pool.last().ok_or(EmptyPoolError)?;

    if diversity > UNIFORM_THRESHOLD {
        return Ok(&pool[rng.gen_range(0..pool.len())]);
    }

    let decay = 1.0 - diversity;
    // Running product: weight i is decay^i for any pool length.
    let weights: Vec<f64> = std::iter::successors(Some(1.0_f64), |w| Some(w * decay))
        .take(pool.len())
        .collect();
    let total: f64 = weights.iter().sum();
    let mut remainder = rng.gen::<f64>() * total;

    for (item, weight) in pool.iter().zip(&weights) {
        remainder -= weight;
        if remainder <= 0.0 {
            return Ok(item);
        }
    }

    // Rounding left a sliver of weight unclaimed.
    Ok(last)
}
