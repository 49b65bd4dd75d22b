use faer::Mat;

use crate::types::{ChaosError, Trajectory};

/// Trait for discrete dynamical system maps.
///
/// A map takes a state vector and returns the next state. Like the
/// continuous fields, implementations are pure functions of state and the
/// parameters bound at construction.
pub trait DiscreteMap: Send + Sync {
    /// Apply one iteration of the map.
    fn step(&self, state: &[f64]) -> Vec<f64>;

    /// Configured initial condition.
    fn initial(&self) -> Vec<f64>;

    /// State space dimension.
    fn dim(&self) -> usize;

    /// Map name.
    fn name(&self) -> &str;
}

/// Hénon map (2D, dissipative).
///
/// x' = 1 - a·x² + y
/// y' = b·x
///
/// Chaotic at the classical a=1.4, b=0.3; its attractor has box-counting
/// dimension around 1.2–1.3.
#[derive(Debug, Clone, Copy)]
pub struct HenonMap {
    pub a: f64,
    pub b: f64,
    pub x0: f64,
    pub y0: f64,
}

impl Default for HenonMap {
    fn default() -> Self {
        Self {
            a: 1.4,
            b: 0.3,
            x0: 0.1,
            y0: 0.1,
        }
    }
}

impl HenonMap {
    pub fn new(a: f64, b: f64, x0: f64, y0: f64) -> Result<Self, ChaosError> {
        for (label, value) in [("a", a), ("b", b), ("x0", x0), ("y0", y0)] {
            if !value.is_finite() {
                return Err(ChaosError::DomainError(format!(
                    "henon_map parameter {label} = {value} is not finite"
                )));
            }
        }
        Ok(Self { a, b, x0, y0 })
    }
}

impl DiscreteMap for HenonMap {
    fn step(&self, state: &[f64]) -> Vec<f64> {
        let (x, y) = (state[0], state[1]);
        vec![1.0 - self.a * x * x + y, self.b * x]
    }
    fn initial(&self) -> Vec<f64> {
        vec![self.x0, self.y0]
    }
    fn dim(&self) -> usize {
        2
    }
    fn name(&self) -> &str {
        "henon_map"
    }
}

/// Iterate a map for exactly `n` points.
///
/// Point 0 is the map's configured initial condition; each subsequent point
/// is computed from its immediate predecessor. The returned trajectory uses
/// the step index as its time axis.
pub fn iterate_map(map: &dyn DiscreteMap, n: usize) -> Result<Trajectory, ChaosError> {
    if n < 1 {
        return Err(ChaosError::DomainError(format!(
            "{} iteration count must be at least 1, got {n}",
            map.name()
        )));
    }

    let dim = map.dim();
    let mut states = Mat::<f64>::zeros(dim, n);
    let mut state = map.initial();
    for i in 0..dim {
        states[(i, 0)] = state[i];
    }

    for k in 1..n {
        state = map.step(&state);
        for i in 0..dim {
            states[(i, k)] = state[i];
        }
    }

    let times = (0..n).map(|k| k as f64).collect();
    Trajectory::new(times, states)
}
