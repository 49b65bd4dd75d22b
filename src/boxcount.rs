use std::collections::HashSet;

use faer::Mat;

use crate::types::ChaosError;
use crate::utils::fit_line;

/// Dimension threshold above which a 2-D point set is classified as
/// exhibiting chaotic (fractal) structure.
pub const DEFAULT_CHAOS_THRESHOLD: f64 = 1.2;

/// Occupied-box counts per box size for one 2-D point set.
///
/// Counts are non-increasing as box size grows: a coarser cover needs no
/// more boxes than a finer one. For nested size ladders (each size an
/// integer multiple of the previous) this holds exactly; anchored grids
/// with arbitrary size ratios can show rare one-off inversions, which is
/// a property of the grid arithmetic, not a counting bug.
#[derive(Debug, Clone)]
pub struct BoxCountProfile {
    /// Box sizes, strictly increasing.
    pub sizes: Vec<f64>,
    /// Occupied-box count per size.
    pub counts: Vec<usize>,
}

impl BoxCountProfile {
    /// Fit the box-counting dimension from this profile.
    ///
    /// Ordinary least squares of log(count) against log(1/size); the slope
    /// is reported directly as the dimension. Sign convention: occupied
    /// boxes grow as boxes shrink, so log(count) rises with log(1/size)
    /// and a fractal set yields a positive slope (≈2 for an area-filling
    /// set, ≈1 for a curve).
    pub fn fit_dimension(&self) -> Result<DimensionFit, ChaosError> {
        let log_inv_sizes: Vec<f64> = self.sizes.iter().map(|s| (1.0 / s).ln()).collect();
        let log_counts: Vec<f64> = self
            .counts
            .iter()
            .map(|&c| (c.max(1) as f64).ln())
            .collect();
        let fit = fit_line(&log_inv_sizes, &log_counts)?;
        Ok(DimensionFit {
            dimension: fit.slope,
            intercept: fit.intercept,
        })
    }
}

/// Fitted box-counting dimension.
#[derive(Debug, Clone, Copy)]
pub struct DimensionFit {
    /// Estimated box-counting dimension (slope of log(count) vs
    /// log(1/size)).
    pub dimension: f64,
    /// Fitted intercept of the log-log line.
    pub intercept: f64,
}

impl DimensionFit {
    /// Heuristic chaos classifier: true when the estimated dimension
    /// exceeds `threshold` (conventionally [`DEFAULT_CHAOS_THRESHOLD`]).
    ///
    /// A dimension above the threshold is evidence of fractal structure in
    /// the point set, not a proof of chaotic dynamics.
    pub fn is_chaotic(&self, threshold: f64) -> bool {
        self.dimension > threshold
    }
}

/// Count occupied boxes over a 2-D point set for each requested box size.
///
/// For each size s the bounding rectangle is tiled with non-overlapping
/// axis-aligned cells [min + i·s, min + (i+1)·s) anchored at the
/// bounding-box minimum, and cells containing at least one point are
/// counted. The implementation hashes cell indices rather than scanning
/// cells, but the counts are exactly those of the naive
/// O(boxes × points) tiling.
///
/// # Errors
/// * `NumericDegeneracy` - empty point set, or all points identical (the
///   bounding box is degenerate in both axes). A point set degenerate in
///   only one axis (a horizontal or vertical segment) is fine.
/// * `DomainError` - points not 2-D or non-finite; sizes empty,
///   non-positive, non-finite, or not strictly increasing.
pub fn box_counts(points: &Mat<f64>, sizes: &[f64]) -> Result<BoxCountProfile, ChaosError> {
    if points.nrows() != 2 {
        return Err(ChaosError::DomainError(format!(
            "box counting needs 2-D points (2 × n), got {} rows",
            points.nrows()
        )));
    }
    let n = points.ncols();
    if n == 0 {
        return Err(ChaosError::NumericDegeneracy(
            "box counting needs a non-empty point set".to_string(),
        ));
    }
    if sizes.is_empty() {
        return Err(ChaosError::DomainError(
            "box counting needs at least one box size".to_string(),
        ));
    }
    for &s in sizes {
        if !s.is_finite() || s <= 0.0 {
            return Err(ChaosError::DomainError(format!(
                "box sizes must be positive and finite, got {s}"
            )));
        }
    }
    if sizes.windows(2).any(|w| w[1] <= w[0]) {
        return Err(ChaosError::DomainError(
            "box sizes must be strictly increasing".to_string(),
        ));
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for j in 0..n {
        let (x, y) = (points[(0, j)], points[(1, j)]);
        if !x.is_finite() || !y.is_finite() {
            return Err(ChaosError::DomainError(format!(
                "point {j} = ({x}, {y}) is not finite"
            )));
        }
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    if max_x == min_x && max_y == min_y {
        return Err(ChaosError::NumericDegeneracy(format!(
            "all {n} points coincide at ({min_x}, {min_y}); the bounding box is empty"
        )));
    }

    let mut counts = Vec::with_capacity(sizes.len());
    let mut occupied: HashSet<(i64, i64)> = HashSet::new();
    for &size in sizes {
        occupied.clear();
        for j in 0..n {
            let ix = ((points[(0, j)] - min_x) / size).floor() as i64;
            let iy = ((points[(1, j)] - min_y) / size).floor() as i64;
            occupied.insert((ix, iy));
        }
        counts.push(occupied.len());
    }

    Ok(BoxCountProfile {
        sizes: sizes.to_vec(),
        counts,
    })
}

/// `num` geometrically spaced box sizes from 10^lo_exp to 10^hi_exp,
/// smallest first.
pub fn log_spaced_sizes(lo_exp: f64, hi_exp: f64, num: usize) -> Result<Vec<f64>, ChaosError> {
    if num < 2 {
        return Err(ChaosError::DomainError(format!(
            "size ladder needs at least 2 sizes, got {num}"
        )));
    }
    if !(hi_exp > lo_exp) {
        return Err(ChaosError::DomainError(format!(
            "size ladder exponents must increase, got [{lo_exp}, {hi_exp}]"
        )));
    }
    Ok((0..num)
        .map(|i| {
            let e = lo_exp + (hi_exp - lo_exp) * i as f64 / (num - 1) as f64;
            10.0_f64.powf(e)
        })
        .collect())
}
