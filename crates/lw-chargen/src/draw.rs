//! Random draws: distinct sampling without replacement and weighted picks.

use rand::Rng;
use rand::rngs::StdRng;

/// Something with a selection weight. Negative and non-finite weights count as zero.
pub trait Weighted {
    /// The raw weight.
    fn weight(&self) -> f64;
}

fn effective_weight<T: Weighted>(item: &T) -> f64 {
    let w = item.weight();
    if w.is_finite() { w.max(0.0) } else { 0.0 }
}

/// Draws elements one at a time, uniformly and without replacement.
///
/// Works on a private pool of references, so the source slice is never
/// touched.
pub struct DistinctDraw<'a, T> {
    pool: Vec<&'a T>,
}

impl<'a, T> DistinctDraw<'a, T> {
    /// Start a draw over `items`.
    pub fn new(items: &'a [T]) -> Self {
        Self {
            pool: items.iter().collect(),
        }
    }

    /// Draw the next element, or `None` once the pool is exhausted.
    pub fn next(&mut self, rng: &mut StdRng) -> Option<&'a T> {
        if self.pool.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.pool.len());
        Some(self.pool.remove(idx))
    }
}

/// Pick up to `n` distinct elements, in selection order.
pub fn pick_distinct<'a, T>(items: &'a [T], n: usize, rng: &mut StdRng) -> Vec<&'a T> {
    let mut draw = DistinctDraw::new(items);
    (0..n).map_while(|_| draw.next(rng)).collect()
}

/// Pick one element with probability proportional to its weight.
///
/// If no element has a positive weight the first element is returned.
/// Returns `None` only for an empty slice.
pub fn pick_weighted<'a, T: Weighted>(items: &'a [T], rng: &mut StdRng) -> Option<&'a T> {
    let first = items.first()?;
    let total: f64 = items.iter().map(effective_weight).sum();
    if total <= 0.0 {
        return Some(first);
    }

    let mut remainder = rng.random::<f64>() * total;
    for item in items {
        let w = effective_weight(item);
        if w <= 0.0 {
            continue;
        }
        remainder -= w;
        if remainder <= 0.0 {
            return Some(item);
        }
    }
    // Rounding can leave a sliver of remainder; it belongs to the last live entry.
    items.iter().rev().find(|i| effective_weight(*i) > 0.0)
}

/// Roll a percentile die (1-100).
pub fn roll_percentile(rng: &mut StdRng) -> u32 {
    rng.random_range(1..=100)
}
