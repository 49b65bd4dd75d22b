use crate::fields::VectorField;
use crate::types::{ChaosError, Trajectory};

/// Two copies of a base field under bidirectional linear coupling.
///
/// For a base field of dimension d, the composite field has dimension 2d.
/// The first half evolves under the base field plus k·(second − first),
/// the second half under the base field plus k·(first − second), the
/// coupling applied to every component. With k = 0 the halves evolve
/// independently; increasing k makes the synchronized manifold
/// (first = second) more strongly attracting.
///
/// Whether a given k actually synchronizes the pair is not decided here:
/// derive a divergence series from the integrated trajectory and fit it
/// with the Lyapunov estimator.
pub struct CoupledPair<F: VectorField> {
    base: F,
    k: f64,
    name: String,
}

impl<F: VectorField> CoupledPair<F> {
    pub fn new(base: F, k: f64) -> Result<Self, ChaosError> {
        if !k.is_finite() {
            return Err(ChaosError::DomainError(format!(
                "coupling strength k = {k} is not finite"
            )));
        }
        let name = format!("coupled_{}", base.name());
        Ok(Self { base, k, name })
    }

    /// Coupling strength bound at construction.
    pub fn coupling(&self) -> f64 {
        self.k
    }
}

impl<F: VectorField> VectorField for CoupledPair<F> {
    fn eval(&self, t: f64, state: &[f64]) -> Vec<f64> {
        let d = self.base.dim();
        let (first, second) = state.split_at(d);
        let mut deriv = self.base.eval(t, first);
        deriv.extend(self.base.eval(t, second));
        for i in 0..d {
            deriv[i] += self.k * (second[i] - first[i]);
            deriv[d + i] += self.k * (first[i] - second[i]);
        }
        deriv
    }
    fn dim(&self) -> usize {
        2 * self.base.dim()
    }
    fn name(&self) -> &str {
        &self.name
    }
}

/// Stack two same-dimension initial states into one composite state.
pub fn stacked_initial(first: &[f64], second: &[f64]) -> Result<Vec<f64>, ChaosError> {
    if first.len() != second.len() {
        return Err(ChaosError::DomainError(format!(
            "initial states have dimensions {} and {}",
            first.len(),
            second.len()
        )));
    }
    let mut state = first.to_vec();
    state.extend_from_slice(second);
    Ok(state)
}

/// Signed difference of component `i` between the two halves of a coupled
/// trajectory, sampled on the trajectory's own time grid.
pub fn component_divergence(traj: &Trajectory, i: usize) -> Result<Vec<f64>, ChaosError> {
    let d = half_dim(traj)?;
    if i >= d {
        return Err(ChaosError::DomainError(format!(
            "component {i} out of range for half-dimension {d}"
        )));
    }
    Ok((0..traj.len())
        .map(|j| traj.states[(i, j)] - traj.states[(d + i, j)])
        .collect())
}

/// Euclidean distance between the two halves of a coupled trajectory at
/// each sample time.
pub fn norm_divergence(traj: &Trajectory) -> Result<Vec<f64>, ChaosError> {
    let d = half_dim(traj)?;
    Ok((0..traj.len())
        .map(|j| {
            (0..d)
                .map(|i| {
                    let delta = traj.states[(i, j)] - traj.states[(d + i, j)];
                    delta * delta
                })
                .sum::<f64>()
                .sqrt()
        })
        .collect())
}

fn half_dim(traj: &Trajectory) -> Result<usize, ChaosError> {
    let dim = traj.dim();
    if dim == 0 || dim % 2 != 0 {
        return Err(ChaosError::DomainError(format!(
            "divergence series needs an even-dimension coupled trajectory, got dimension {dim}"
        )));
    }
    Ok(dim / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Lorenz;
    use faer::Mat;

    fn assert_near(a: f64, b: f64, eps: f64) {
        assert!(
            (a - b).abs() < eps,
            "expected {a} ≈ {b} (diff = {})",
            (a - b).abs()
        );
    }

    #[test]
    fn test_uncoupled_pair_is_block_diagonal() {
        let base = Lorenz::default();
        let pair = CoupledPair::new(Lorenz::default(), 0.0).unwrap();
        let a = [1.0, 2.0, 3.0];
        let b = [-0.5, 0.25, 4.0];
        let state = stacked_initial(&a, &b).unwrap();

        let deriv = pair.eval(0.0, &state);
        let da = base.eval(0.0, &a);
        let db = base.eval(0.0, &b);
        for i in 0..3 {
            assert_near(deriv[i], da[i], 1e-12);
            assert_near(deriv[3 + i], db[i], 1e-12);
        }
    }

    #[test]
    fn test_coupling_term_every_component() {
        let base = Lorenz::default();
        let k = 2.0;
        let pair = CoupledPair::new(Lorenz::default(), k).unwrap();
        let a = [1.0, 1.0, 1.0];
        let b = [1.1, 1.2, 1.3];
        let state = stacked_initial(&a, &b).unwrap();

        let deriv = pair.eval(0.0, &state);
        let da = base.eval(0.0, &a);
        let db = base.eval(0.0, &b);
        for i in 0..3 {
            assert_near(deriv[i], da[i] + k * (b[i] - a[i]), 1e-12);
            assert_near(deriv[3 + i], db[i] + k * (a[i] - b[i]), 1e-12);
        }
    }

    #[test]
    fn test_coupling_vanishes_on_synchronized_manifold() {
        let base = Lorenz::default();
        let pair = CoupledPair::new(Lorenz::default(), 5.0).unwrap();
        let a = [2.0, -1.0, 20.0];
        let state = stacked_initial(&a, &a).unwrap();
        let deriv = pair.eval(0.0, &state);
        let da = base.eval(0.0, &a);
        for i in 0..3 {
            assert_near(deriv[i], da[i], 1e-12);
            assert_near(deriv[3 + i], da[i], 1e-12);
        }
    }

    #[test]
    fn test_divergence_series() {
        let mut states = Mat::<f64>::zeros(2, 3);
        for j in 0..3 {
            states[(0, j)] = j as f64; // first half
            states[(1, j)] = 2.0 * j as f64; // second half
        }
        let traj = Trajectory::new(vec![0.0, 1.0, 2.0], states).unwrap();

        let delta = component_divergence(&traj, 0).unwrap();
        assert_eq!(delta, vec![0.0, -1.0, -2.0]);

        let norms = norm_divergence(&traj).unwrap();
        assert_near(norms[2], 2.0, 1e-12);
    }

    #[test]
    fn test_divergence_rejects_odd_dimension() {
        let traj = Trajectory::new(vec![0.0, 1.0], Mat::<f64>::zeros(3, 2)).unwrap();
        assert!(component_divergence(&traj, 0).is_err());
        assert!(norm_divergence(&traj).is_err());
    }

    #[test]
    fn test_stacked_initial_rejects_mismatch() {
        assert!(stacked_initial(&[1.0, 2.0], &[1.0]).is_err());
    }
}
