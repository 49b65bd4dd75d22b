use crate::types::ChaosError;

/// Trait for continuous dynamical systems.
///
/// A vector field maps (time, state) to the state derivative. Implementations
/// must be pure functions of time, state, and the parameters bound at
/// construction, so they can be evaluated repeatedly and in parallel.
pub trait VectorField: Send + Sync {
    /// Evaluate the derivative at (t, state). `state.len()` equals `dim()`.
    fn eval(&self, t: f64, state: &[f64]) -> Vec<f64>;

    /// State space dimension.
    fn dim(&self) -> usize;

    /// Field name, used in error context.
    fn name(&self) -> &str;
}

fn check_finite(name: &str, params: &[(&str, f64)]) -> Result<(), ChaosError> {
    for (label, value) in params {
        if !value.is_finite() {
            return Err(ChaosError::DomainError(format!(
                "{name} parameter {label} = {value} is not finite"
            )));
        }
    }
    Ok(())
}

/// Damped linear oscillator (2D).
///
/// dx = y
/// dy = -γ·y - x
#[derive(Debug, Clone, Copy)]
pub struct DampedOscillator {
    pub damping: f64,
}

impl Default for DampedOscillator {
    fn default() -> Self {
        Self { damping: 0.5 }
    }
}

impl DampedOscillator {
    pub fn new(damping: f64) -> Result<Self, ChaosError> {
        check_finite("damped_oscillator", &[("damping", damping)])?;
        Ok(Self { damping })
    }
}

impl VectorField for DampedOscillator {
    fn eval(&self, _t: f64, state: &[f64]) -> Vec<f64> {
        let (x, y) = (state[0], state[1]);
        vec![y, -self.damping * y - x]
    }
    fn dim(&self) -> usize {
        2
    }
    fn name(&self) -> &str {
        "damped_oscillator"
    }
}

/// Van der Pol oscillator (2D, limit cycle).
///
/// dx = y
/// dy = μ(1 - x²)y - x
#[derive(Debug, Clone, Copy)]
pub struct VanDerPol {
    pub mu: f64,
}

impl Default for VanDerPol {
    fn default() -> Self {
        Self { mu: 1.0 }
    }
}

impl VanDerPol {
    pub fn new(mu: f64) -> Result<Self, ChaosError> {
        check_finite("van_der_pol", &[("mu", mu)])?;
        Ok(Self { mu })
    }
}

impl VectorField for VanDerPol {
    fn eval(&self, _t: f64, state: &[f64]) -> Vec<f64> {
        let (x, y) = (state[0], state[1]);
        vec![y, self.mu * (1.0 - x * x) * y - x]
    }
    fn dim(&self) -> usize {
        2
    }
    fn name(&self) -> &str {
        "van_der_pol"
    }
}

/// Parametric torus flow (3D, quasiperiodic).
///
/// dx = cos(ω1·t)
/// dy = sin(ω2·t)
/// dz = cos((ω1 + ω2)·t)
///
/// The derivatives are explicit functions of time only; the state never
/// feeds back. Integrating this field generates a forced quasiperiodic
/// trajectory, not an autonomous flow.
#[derive(Debug, Clone, Copy)]
pub struct TorusFlow {
    pub omega1: f64,
    pub omega2: f64,
}

impl Default for TorusFlow {
    fn default() -> Self {
        Self {
            omega1: 1.0,
            omega2: std::f64::consts::SQRT_2,
        }
    }
}

impl TorusFlow {
    pub fn new(omega1: f64, omega2: f64) -> Result<Self, ChaosError> {
        check_finite("torus_flow", &[("omega1", omega1), ("omega2", omega2)])?;
        Ok(Self { omega1, omega2 })
    }
}

impl VectorField for TorusFlow {
    fn eval(&self, t: f64, _state: &[f64]) -> Vec<f64> {
        vec![
            (self.omega1 * t).cos(),
            (self.omega2 * t).sin(),
            ((self.omega1 + self.omega2) * t).cos(),
        ]
    }
    fn dim(&self) -> usize {
        3
    }
    fn name(&self) -> &str {
        "torus_flow"
    }
}

/// Lorenz system (3D, dissipative, chaotic at the classical parameters).
///
/// dx = σ(y - x)
/// dy = x(ρ - z) - y
/// dz = xy - βz
///
/// σ is the Prandtl number, ρ the Rayleigh number, β a geometric factor.
/// Classical chaos occurs at σ=10, ρ=28, β=8/3.
#[derive(Debug, Clone, Copy)]
pub struct Lorenz {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for Lorenz {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

impl Lorenz {
    pub fn new(sigma: f64, rho: f64, beta: f64) -> Result<Self, ChaosError> {
        check_finite(
            "lorenz",
            &[("sigma", sigma), ("rho", rho), ("beta", beta)],
        )?;
        Ok(Self { sigma, rho, beta })
    }

    /// Fixed points of the flow.
    ///
    /// For ρ ≤ 1 only the origin; for ρ > 1 additionally
    /// C± = (±√(β(ρ-1)), ±√(β(ρ-1)), ρ-1).
    pub fn fixed_points(&self) -> Vec<[f64; 3]> {
        if self.rho <= 1.0 {
            vec![[0.0, 0.0, 0.0]]
        } else {
            let c = (self.beta * (self.rho - 1.0)).sqrt();
            vec![
                [0.0, 0.0, 0.0],
                [c, c, self.rho - 1.0],
                [-c, -c, self.rho - 1.0],
            ]
        }
    }
}

impl VectorField for Lorenz {
    fn eval(&self, _t: f64, state: &[f64]) -> Vec<f64> {
        let (x, y, z) = (state[0], state[1], state[2]);
        vec![
            self.sigma * (y - x),
            x * (self.rho - z) - y,
            x * y - self.beta * z,
        ]
    }
    fn dim(&self) -> usize {
        3
    }
    fn name(&self) -> &str {
        "lorenz"
    }
}
