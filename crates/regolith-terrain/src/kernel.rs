//! Square weight kernels stamped onto heightfields.

use crate::error::{TerrainError, ensure_non_negative, ensure_positive};

/// A square, row-major grid of weights.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// A `size x size` kernel where every weight is `value`.
    pub fn constant(size: usize, value: f64) -> Self {
        Self {
            size,
            weights: vec![value; size * size],
        }
    }

    /// Separable Gaussian bump of odd `diameter` with spread `sigma`.
    ///
    /// The kernel is the outer product of two [`gaussian_profile`]s, min-max
    /// normalised so the centre weight is exactly 1 and the corners 0. A
    /// diameter of 0 or 1 yields the single-weight kernel `[1.0]`.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::NonPositive`] if `sigma` is not a finite
    /// positive number.
    pub fn gaussian(diameter: usize, sigma: f64) -> Result<Self, TerrainError> {
        let sigma = ensure_positive("sigma", sigma)?;
        if diameter <= 1 {
            return Ok(Self::constant(1, 1.0));
        }

        let profile = gaussian_profile(diameter, sigma);
        let mut weights = Vec::with_capacity(diameter * diameter);
        for &a in &profile {
            weights.extend(profile.iter().map(|&b| a * b));
        }
        normalize_min_max(&mut weights);

        Ok(Self {
            size: diameter,
            weights,
        })
    }

    /// Side length in cells.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cells from the centre to an edge (`size / 2`).
    pub fn half_width(&self) -> usize {
        self.size / 2
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.weights[row * self.size + col]
    }

    /// One row of weights.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.size;
        &self.weights[start..start + self.size]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Largest weight.
    pub fn peak(&self) -> f64 {
        self.weights.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Sample the standard Gaussian density at `n` points evenly spaced over
/// `[-1, 1]` and min-max normalise the result to `[0, 1]`.
///
/// `n <= 1` returns `[1.0]`.
pub fn gaussian_profile(n: usize, sigma: f64) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0];
    }

    let denom = (n - 1) as f64;
    let norm = 1.0 / (sigma * (2.0 * std::f64::consts::PI).sqrt());
    let mut profile: Vec<f64> = (0..n)
        .map(|i| {
            // Exact negation of mirrored samples keeps the profile symmetric.
            let x = (2.0 * i as f64 - denom) / denom;
            let z = x / sigma;
            norm * (-0.5 * z * z).exp()
        })
        .collect();
    normalize_min_max(&mut profile);
    profile
}

/// Odd kernel diameter, in cells: `round(2 * radius / horizontal_scale) + 1`,
/// bumped to the next odd number when even.
///
/// # Errors
///
/// Returns an error for a negative or non-finite radius, a non-positive
/// horizontal scale, or a diameter whose `d x d` kernel cannot be addressed.
pub fn kernel_diameter(radius: f64, horizontal_scale: f64) -> Result<usize, TerrainError> {
    let radius = ensure_non_negative("kernel radius", radius)?;
    let horizontal_scale = ensure_positive("horizontal_scale", horizontal_scale)?;
    let too_large = || TerrainError::KernelTooLarge {
        radius,
        horizontal_scale,
    };

    let span = (2.0 * radius / horizontal_scale).round();
    if !span.is_finite() || span >= usize::MAX as f64 {
        return Err(too_large());
    }
    let diameter = (span as usize).checked_add(1).ok_or_else(too_large)?;
    let diameter = if diameter % 2 == 0 {
        diameter.checked_add(1).ok_or_else(too_large)?
    } else {
        diameter
    };
    diameter.checked_mul(diameter).ok_or_else(too_large)?;
    Ok(diameter)
}

/// Rescale in place so the minimum maps to 0 and the maximum to 1.
/// A constant slice becomes all ones.
fn normalize_min_max(values: &mut [f64]) {
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = hi - lo;
    if range > 0.0 {
        for v in values.iter_mut() {
            *v = (*v - lo) / range;
        }
    } else {
        values.fill(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_is_exactly_one_at_centre() {
        for diameter in (3..=41).step_by(2) {
            for sigma in [0.05, 0.3, 0.4, 1.0, 5.0] {
                let k = Kernel::gaussian(diameter, sigma).unwrap();
                let c = diameter / 2;
                assert_eq!(k.get(c, c), 1.0, "d={diameter} sigma={sigma}");
                assert_eq!(k.peak(), 1.0, "d={diameter} sigma={sigma}");
            }
        }
    }

    #[test]
    fn test_kernel_is_point_symmetric() {
        for diameter in [3, 5, 9, 31, 301] {
            let k = Kernel::gaussian(diameter, 0.4).unwrap();
            let d = k.size();
            for i in 0..d {
                for j in 0..d {
                    assert_eq!(k.get(i, j), k.get(d - 1 - i, d - 1 - j));
                    assert_eq!(k.get(i, j), k.get(j, i));
                }
            }
        }
    }

    #[test]
    fn test_weights_in_unit_interval_with_zero_corners() {
        let k = Kernel::gaussian(15, 0.4).unwrap();
        assert!(k.as_slice().iter().all(|&w| (0.0..=1.0).contains(&w)));
        assert_eq!(k.get(0, 0), 0.0);
        assert_eq!(k.get(14, 14), 0.0);
    }

    #[test]
    fn test_weights_decrease_away_from_centre() {
        let k = Kernel::gaussian(11, 0.4).unwrap();
        let mid = k.row(5);
        for j in 5..10 {
            assert!(mid[j] > mid[j + 1], "row not decreasing at {j}: {mid:?}");
        }
    }

    #[test]
    fn test_degenerate_diameters() {
        for d in [0, 1] {
            let k = Kernel::gaussian(d, 0.4).unwrap();
            assert_eq!(k.size(), 1);
            assert_eq!(k.as_slice(), &[1.0]);
        }
        assert_eq!(gaussian_profile(1, 0.3), vec![1.0]);
    }

    #[test]
    fn test_rejects_non_positive_sigma() {
        assert!(Kernel::gaussian(5, 0.0).is_err());
        assert!(Kernel::gaussian(5, -0.3).is_err());
        assert!(Kernel::gaussian(5, f64::NAN).is_err());
    }

    #[test]
    fn test_profile_endpoints_and_midpoint() {
        let p = gaussian_profile(5, 0.3);
        assert_eq!(p.len(), 5);
        assert_eq!(p[0], 0.0);
        assert_eq!(p[4], 0.0);
        assert_eq!(p[2], 1.0);
        assert_eq!(p[1], p[3]);
    }

    #[test]
    fn test_kernel_diameter_is_odd() {
        assert_eq!(kernel_diameter(15.0, 0.1).unwrap(), 301);
        assert_eq!(kernel_diameter(1.0, 1.0).unwrap(), 3);
        assert_eq!(kernel_diameter(0.0, 0.1).unwrap(), 1);
        for r in [0.3, 0.75, 2.5, 7.0, 1.25, 1.4] {
            assert_eq!(kernel_diameter(r, 0.2).unwrap() % 2, 1);
        }
        assert!(kernel_diameter(-1.0, 0.1).is_err());
        assert!(kernel_diameter(1.0, 0.0).is_err());
    }

    #[test]
    fn test_kernel_diameter_rounds_full_span() {
        // 2r/hs = 2.5 rounds to 3, giving 4, bumped to 5.
        assert_eq!(kernel_diameter(1.25, 1.0).unwrap(), 5);
        // 2r/hs = 2.8 rounds to 3, giving 4, bumped to 5.
        assert_eq!(kernel_diameter(1.4, 1.0).unwrap(), 5);
        // 2r/hs = 1.5 rounds to 2, giving 3.
        assert_eq!(kernel_diameter(0.75, 1.0).unwrap(), 3);
        // 2r/hs = 0.8 rounds to 1, giving 2, bumped to 3.
        assert_eq!(kernel_diameter(0.4, 1.0).unwrap(), 3);
        // 2r/hs = 0.4 rounds to 0: the single-cell kernel.
        assert_eq!(kernel_diameter(0.2, 1.0).unwrap(), 1);
    }

    #[test]
    fn test_kernel_diameter_too_large_is_an_error() {
        for (radius, hs) in [(1e300, 1.0), (f64::MAX, 1e-300), (1e18, 1.0)] {
            assert!(
                matches!(
                    kernel_diameter(radius, hs),
                    Err(TerrainError::KernelTooLarge { .. })
                ),
                "{radius} @ {hs}"
            );
        }
    }

    #[test]
    fn test_constant_kernel() {
        let k = Kernel::constant(2, 0.15);
        assert_eq!(k.size(), 2);
        assert_eq!(k.half_width(), 1);
        assert_eq!(k.as_slice(), &[0.15; 4]);
    }
}
