use crate::types::ChaosError;

/// `n` evenly spaced values over the closed interval [a, b].
///
/// Requires n ≥ 2 so both endpoints are representable.
pub fn linspace(a: f64, b: f64, n: usize) -> Result<Vec<f64>, ChaosError> {
    if n < 2 {
        return Err(ChaosError::DomainError(format!(
            "linspace needs at least 2 points, got {n}"
        )));
    }
    Ok((0..n)
        .map(|i| a + (b - a) * i as f64 / (n - 1) as f64)
        .collect())
}

/// Arithmetic mean of a series. Zero for an empty series.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Validate that a series contains only finite values.
pub fn validate_finite(values: &[f64], what: &str) -> Result<(), ChaosError> {
    if let Some((i, v)) = values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite())
    {
        return Err(ChaosError::DomainError(format!(
            "{what} contains a non-finite value {v} at index {i}"
        )));
    }
    Ok(())
}

/// Slope and intercept of an ordinary-least-squares line fit y ≈ a·x + b.
#[derive(Debug, Clone, Copy)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

/// Fit a first-degree polynomial to (x, y) pairs by ordinary least squares.
///
/// Fails on fewer than 2 samples, mismatched lengths, or an x-grid with no
/// spread (the normal equations degenerate).
pub fn fit_line(x: &[f64], y: &[f64]) -> Result<LineFit, ChaosError> {
    if x.len() != y.len() {
        return Err(ChaosError::DomainError(format!(
            "line fit got {} x-values but {} y-values",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(ChaosError::InsufficientData(format!(
            "line fit needs at least 2 samples, got {}",
            x.len()
        )));
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_x2: f64 = x.iter().map(|v| v * v).sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();

    let denom = n * sum_x2 - sum_x * sum_x;
    if denom.abs() < 1e-14 {
        return Err(ChaosError::NumericDegeneracy(
            "line fit x-grid has no spread".to_string(),
        ));
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Ok(LineFit { slope, intercept })
}
