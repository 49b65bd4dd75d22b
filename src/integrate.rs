use faer::Mat;

use crate::fields::VectorField;
use crate::types::{ChaosError, Trajectory};

/// Configuration for the adaptive integrator.
#[derive(Debug, Clone)]
pub struct IntegratorConfig {
    /// Relative error tolerance.
    pub rtol: f64,
    /// Absolute error tolerance.
    pub atol: f64,
    /// Budget of internal steps before giving up on a stiff or blown-up
    /// system.
    pub max_steps: usize,
    /// Initial step size. None selects a span-based heuristic.
    pub first_step: Option<f64>,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            rtol: 1e-3,
            atol: 1e-6,
            max_steps: 500_000,
            first_step: None,
        }
    }
}

// Dormand-Prince 5(4) coefficients. The last stage row doubles as the
// 5th-order solution weights (FSAL).
const C: [f64; 6] = [1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];
const A: [[f64; 6]; 6] = [
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
        0.0,
    ],
    [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
];
// Difference between the 5th- and 4th-order weights; h·Σ E_j·k_j estimates
// the local error.
const E: [f64; 7] = [
    71.0 / 57600.0,
    0.0,
    -71.0 / 16695.0,
    71.0 / 1920.0,
    -17253.0 / 339200.0,
    22.0 / 525.0,
    -1.0 / 40.0,
];

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;

/// Integrate an initial value problem over [t0, t1], reporting the solution
/// at the requested evaluation times.
///
/// Embedded Runge-Kutta 4(5) (Dormand-Prince pair) with adaptive step-size
/// control on a mixed relative/absolute error norm. The internal step size
/// is chosen by the method alone; requested evaluation times are filled in
/// by cubic Hermite interpolation over the accepted steps (third-order
/// dense output, below the solver's fifth order but consistent with the
/// step tolerances for the smooth systems handled here).
///
/// # Errors
/// * `IntegrationFailure` - t1 ≤ t0, a non-finite derivative, step-size
///   underflow, or step budget exhaustion (a stiff or blown-up system).
/// * `DomainError` - initial state dimension mismatch, non-finite initial
///   state, or an evaluation grid that is empty, unsorted, or outside
///   [t0, t1].
pub fn solve_ivp(
    field: &dyn VectorField,
    t_span: (f64, f64),
    y0: &[f64],
    t_eval: &[f64],
    config: &IntegratorConfig,
) -> Result<Trajectory, ChaosError> {
    let (t0, t1) = t_span;
    let dim = field.dim();

    if !(t1 > t0) {
        return Err(ChaosError::IntegrationFailure(format!(
            "{}: time span [{t0}, {t1}] is empty or inverted",
            field.name()
        )));
    }
    if y0.len() != dim {
        return Err(ChaosError::DomainError(format!(
            "{}: initial state has dimension {} but the field has dimension {dim}",
            field.name(),
            y0.len()
        )));
    }
    if y0.iter().any(|v| !v.is_finite()) {
        return Err(ChaosError::DomainError(format!(
            "{}: initial state {y0:?} contains a non-finite value",
            field.name()
        )));
    }
    if t_eval.is_empty() {
        return Err(ChaosError::DomainError(format!(
            "{}: evaluation grid is empty",
            field.name()
        )));
    }
    if t_eval.windows(2).any(|w| w[1] <= w[0]) {
        return Err(ChaosError::DomainError(format!(
            "{}: evaluation times must be strictly increasing",
            field.name()
        )));
    }
    if t_eval[0] < t0 || *t_eval.last().unwrap() > t1 {
        return Err(ChaosError::DomainError(format!(
            "{}: evaluation times must lie inside [{t0}, {t1}]",
            field.name()
        )));
    }

    let mut states = Mat::<f64>::zeros(dim, t_eval.len());
    let mut next_eval = 0;

    // Evaluation points at exactly t0 come straight from the initial state.
    while next_eval < t_eval.len() && t_eval[next_eval] <= t0 {
        for i in 0..dim {
            states[(i, next_eval)] = y0[i];
        }
        next_eval += 1;
    }

    let mut t = t0;
    let mut y = y0.to_vec();
    let mut f = eval_checked(field, t, &y)?;
    let mut h = config
        .first_step
        .unwrap_or((t1 - t0) * 1e-3)
        .min(t1 - t0);

    let mut k = vec![vec![0.0; dim]; 7];
    let mut steps = 0usize;

    while t < t1 && next_eval < t_eval.len() {
        if steps >= config.max_steps {
            return Err(ChaosError::IntegrationFailure(format!(
                "{}: step budget of {} exhausted at t = {t} (stiff or blown-up system)",
                field.name(),
                config.max_steps
            )));
        }
        steps += 1;

        // Clamp the final step onto t1; everywhere else h is the method's.
        let hits_end = t + h >= t1;
        if hits_end {
            h = t1 - t;
        }
        if h < 1e-14 * t.abs().max(1.0) {
            return Err(ChaosError::IntegrationFailure(format!(
                "{}: step size underflow at t = {t}",
                field.name()
            )));
        }

        k[0].copy_from_slice(&f);
        for stage in 0..6 {
            let mut y_stage = y.clone();
            for i in 0..dim {
                let mut acc = 0.0;
                for (j, k_j) in k.iter().enumerate().take(stage + 1) {
                    acc += A[stage][j] * k_j[i];
                }
                y_stage[i] += h * acc;
            }
            k[stage + 1] = eval_checked(field, t + C[stage] * h, &y_stage)?;
        }

        // Stage 7 is the 5th-order solution (FSAL: its derivative is k[6]).
        let mut y_new = y.clone();
        for i in 0..dim {
            let mut acc = 0.0;
            for (j, k_j) in k.iter().enumerate().take(6) {
                acc += A[5][j] * k_j[i];
            }
            y_new[i] += h * acc;
        }

        // Scaled RMS error estimate over the embedded 4th-order solution.
        let mut err_sq = 0.0;
        for i in 0..dim {
            let mut e = 0.0;
            for (j, k_j) in k.iter().enumerate() {
                e += E[j] * k_j[i];
            }
            e *= h;
            let scale = config.atol + config.rtol * y[i].abs().max(y_new[i].abs());
            err_sq += (e / scale) * (e / scale);
        }
        let err_norm = (err_sq / dim as f64).sqrt();

        if err_norm <= 1.0 {
            let f_new = k[6].clone();
            // The clamped final step lands on t1 exactly.
            let t_new = if hits_end { t1 } else { t + h };

            // Report every requested time inside the accepted step via
            // cubic Hermite interpolation on (y, f) at the step ends.
            while next_eval < t_eval.len() && t_eval[next_eval] <= t_new {
                let theta = (t_eval[next_eval] - t) / h;
                let t2 = theta * theta;
                let t3 = t2 * theta;
                let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
                let h10 = t3 - 2.0 * t2 + theta;
                let h01 = -2.0 * t3 + 3.0 * t2;
                let h11 = t3 - t2;
                for i in 0..dim {
                    states[(i, next_eval)] =
                        h00 * y[i] + h10 * h * f[i] + h01 * y_new[i] + h11 * h * f_new[i];
                }
                next_eval += 1;
            }

            t = t_new;
            y = y_new;
            f = f_new;

            let factor = if err_norm == 0.0 {
                MAX_FACTOR
            } else {
                (SAFETY * err_norm.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
            };
            h *= factor;
        } else {
            h *= (SAFETY * err_norm.powf(-0.2)).clamp(MIN_FACTOR, 1.0);
        }
    }

    Trajectory::new(t_eval.to_vec(), states)
}

fn eval_checked(
    field: &dyn VectorField,
    t: f64,
    y: &[f64],
) -> Result<Vec<f64>, ChaosError> {
    let d = field.eval(t, y);
    debug_assert_eq!(d.len(), field.dim());
    if d.iter().any(|v| !v.is_finite()) {
        return Err(ChaosError::IntegrationFailure(format!(
            "{}: non-finite derivative {d:?} at t = {t}, state = {y:?}",
            field.name()
        )));
    }
    Ok(d)
}
