use faer::Mat;

use crate::types::{ChaosError, Trajectory};

/// Extract the Poincaré section of a 3-D trajectory through an axis-aligned
/// cutting plane.
///
/// Returns the trajectory points (3 × m, original order preserved) whose
/// `axis` coordinate lies within [target − tolerance, target + tolerance].
/// All three coordinates are retained: the two off-axis coordinates form
/// the 2-D section, the cutting coordinate stays available for coloring.
///
/// This is a tolerance-band membership filter, not a transversal-crossing
/// detector with sign-change interpolation: the crossings it reports are
/// approximate, and their density depends on the trajectory's sampling
/// rate. A sparsely sampled orbit can miss crossings entirely.
pub fn poincare_section(
    traj: &Trajectory,
    axis: usize,
    target: f64,
    tolerance: f64,
) -> Result<Mat<f64>, ChaosError> {
    if traj.dim() != 3 {
        return Err(ChaosError::DomainError(format!(
            "poincaré section needs a 3-D trajectory, got dimension {}",
            traj.dim()
        )));
    }
    if axis >= 3 {
        return Err(ChaosError::DomainError(format!(
            "cutting axis {axis} out of range for a 3-D trajectory"
        )));
    }
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(ChaosError::DomainError(format!(
            "tolerance band must be non-negative and finite, got {tolerance}"
        )));
    }
    if !target.is_finite() {
        return Err(ChaosError::DomainError(format!(
            "cutting-plane target {target} is not finite"
        )));
    }

    let hits: Vec<usize> = (0..traj.len())
        .filter(|&j| (traj.states[(axis, j)] - target).abs() <= tolerance)
        .collect();

    let mut section = Mat::<f64>::zeros(3, hits.len());
    for (col, &j) in hits.iter().enumerate() {
        for i in 0..3 {
            section[(i, col)] = traj.states[(i, j)];
        }
    }
    Ok(section)
}

/// Pair each sample of a scalar series with its immediate predecessor.
///
/// Returns a 2 × (n−1) matrix with row 0 holding x[1..] and row 1 holding
/// x[..n−1]: the classical lag plot, serving as the discrete-map analogue
/// of a Poincaré section.
pub fn lag_pairs(series: &[f64]) -> Result<Mat<f64>, ChaosError> {
    if series.len() < 2 {
        return Err(ChaosError::InsufficientData(format!(
            "lag pairs need at least 2 samples, got {}",
            series.len()
        )));
    }
    let n = series.len() - 1;
    let mut pairs = Mat::<f64>::zeros(2, n);
    for j in 0..n {
        pairs[(0, j)] = series[j + 1];
        pairs[(1, j)] = series[j];
    }
    Ok(pairs)
}
