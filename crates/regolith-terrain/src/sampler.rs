//! Low-discrepancy placement: a two-dimensional Halton sequence.
//!
//! Rock and bump placements come from a deterministic quasi-random sequence
//! instead of uniform noise, so even a handful of samples covers the unit
//! square without large gaps or clusters.

use rand::Rng;
use rand::seq::SliceRandom;

/// Radical-inverse bases for the two coordinates.
const BASES: [u64; 2] = [2, 3];

/// Largest `f64` strictly below 1.
const ONE_MINUS_EPSILON: f64 = 1.0 - f64::EPSILON / 2.0;

/// Digit positions scrambled per base; enough to cover any `u32` index.
fn digit_count(base: u64) -> usize {
    (u32::BITS as f64 / (base as f64).log2()).ceil() as usize
}

/// Deterministic 2D Halton sequence generator.
///
/// An unscrambled sampler starts at the origin and yields
/// `(0, 0), (1/2, 1/3), (1/4, 2/3), (3/4, 1/9), ...`. Successive calls to
/// [`HaltonSampler::random`] continue the sequence.
#[derive(Clone, Debug)]
pub struct HaltonSampler {
    next_index: u64,
    /// Per base, per digit position, a permutation of `0..base`.
    permutations: Option<[Vec<Vec<u64>>; 2]>,
}

impl HaltonSampler {
    /// Unscrambled sampler positioned at the first point.
    pub fn new() -> Self {
        Self {
            next_index: 0,
            permutations: None,
        }
    }

    /// Sampler with random digit permutations drawn from `rng`.
    ///
    /// The sequence keeps its low-discrepancy structure but no longer starts at
    /// the origin. The same RNG state always yields the same permutations.
    pub fn scrambled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let permutations = BASES.map(|base| {
            (0..digit_count(base))
                .map(|_| {
                    let mut digits: Vec<u64> = (0..base).collect();
                    digits.shuffle(&mut *rng);
                    digits
                })
                .collect()
        });
        Self {
            next_index: 0,
            permutations: Some(permutations),
        }
    }

    /// Index of the next point to be generated.
    pub fn position(&self) -> u64 {
        self.next_index
    }

    /// Rewind to the first point.
    pub fn reset(&mut self) {
        self.next_index = 0;
    }

    /// Skip `count` points.
    pub fn fast_forward(&mut self, count: u64) {
        self.next_index += count;
    }

    /// Draw the next `n` points, each coordinate in `[0, 1)`.
    pub fn random(&mut self, n: usize) -> Vec<[f64; 2]> {
        let points = (0..n as u64)
            .map(|offset| self.point(self.next_index + offset))
            .collect();
        self.next_index += n as u64;
        points
    }

    fn point(&self, index: u64) -> [f64; 2] {
        match &self.permutations {
            None => BASES.map(|base| radical_inverse(index, base)),
            Some(perms) => [
                scrambled_radical_inverse(index, BASES[0], &perms[0]),
                scrambled_radical_inverse(index, BASES[1], &perms[1]),
            ],
        }
    }
}

impl Default for HaltonSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Van der Corput radical inverse of `index` in `base`.
fn radical_inverse(mut index: u64, base: u64) -> f64 {
    let inv_base = 1.0 / base as f64;
    let mut factor = inv_base;
    let mut result = 0.0;
    while index > 0 {
        result += (index % base) as f64 * factor;
        index /= base;
        factor *= inv_base;
    }
    result
}

/// Radical inverse with each digit position mapped through its permutation.
///
/// Trailing zero digits are permuted too, up to the fixed digit count.
fn scrambled_radical_inverse(mut index: u64, base: u64, perms: &[Vec<u64>]) -> f64 {
    let inv_base = 1.0 / base as f64;
    let mut factor = inv_base;
    let mut result = 0.0;
    for perm in perms {
        let digit = (index % base) as usize;
        result += perm[digit] as f64 * factor;
        index /= base;
        factor *= inv_base;
    }
    result.min(ONE_MINUS_EPSILON)
}

/// A sample point rescaled onto integer grid indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPoint {
    pub row: usize,
    pub col: usize,
}

impl GridPoint {
    /// Scale a unit-square point by the grid shape and floor it:
    /// `x` spans rows, `y` spans columns. Placements are the transpose of a
    /// layout that indexes the grid as `[y][x]`.
    pub fn from_unit(point: [f64; 2], num_rows: usize, num_cols: usize) -> Self {
        Self {
            row: (point[0] * num_rows as f64).floor() as usize,
            col: (point[1] * num_cols as f64).floor() as usize,
        }
    }
}
