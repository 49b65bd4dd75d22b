use crate::types::ChaosError;
use crate::utils::{fit_line, validate_finite};

/// Floor added inside the logarithm so an exactly-vanishing divergence does
/// not degenerate to log(0).
pub const LOG_FLOOR: f64 = 1e-10;

/// Result of a conditional Lyapunov exponent fit.
#[derive(Debug, Clone)]
pub struct LyapunovFit {
    /// Fitted slope of log|divergence| against time: the estimated
    /// conditional Lyapunov exponent.
    pub exponent: f64,
    /// Fitted intercept, log of the effective initial separation.
    pub intercept: f64,
    /// The pointwise log(|divergence| + ε) series, for inspection or
    /// plotting.
    pub log_divergence: Vec<f64>,
}

impl LyapunovFit {
    /// Whether the fit indicates the coupled trajectories converge.
    ///
    /// A negative exponent means the separation decays exponentially over
    /// the window, i.e. the pair synchronizes; a non-negative exponent
    /// means it does not.
    pub fn synchronizes(&self) -> bool {
        self.exponent < 0.0
    }
}

/// Estimate the conditional Lyapunov exponent from a divergence series.
///
/// Computes log(|d| + ε) pointwise (ε = [`LOG_FLOOR`]) and fits a
/// first-degree polynomial against the time grid by ordinary least
/// squares. The slope is the exponent estimate.
///
/// This is a diagnostic estimate of the exponential growth or decay rate
/// over the supplied window, not a rigorous Lyapunov-spectrum computation:
/// no tangent-space evolution or Gram-Schmidt re-orthonormalization is
/// performed. It answers "do these two trajectories converge" and nothing
/// stronger.
///
/// # Errors
/// * `InsufficientData` - fewer than 2 samples.
/// * `DomainError` - mismatched grid lengths or non-finite samples.
pub fn estimate_lyapunov(times: &[f64], divergence: &[f64]) -> Result<LyapunovFit, ChaosError> {
    if times.len() != divergence.len() {
        return Err(ChaosError::DomainError(format!(
            "time grid has {} samples but divergence series has {}",
            times.len(),
            divergence.len()
        )));
    }
    if times.len() < 2 {
        return Err(ChaosError::InsufficientData(format!(
            "lyapunov fit needs at least 2 samples, got {}",
            times.len()
        )));
    }
    validate_finite(times, "time grid")?;
    validate_finite(divergence, "divergence series")?;

    let log_divergence: Vec<f64> = divergence
        .iter()
        .map(|d| (d.abs() + LOG_FLOOR).ln())
        .collect();

    let fit = fit_line(times, &log_divergence)?;
    Ok(LyapunovFit {
        exponent: fit.slope,
        intercept: fit.intercept,
        log_divergence,
    })
}
