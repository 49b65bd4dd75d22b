use faer::Mat;

/// Error types for integration and estimation operations.
#[derive(Debug, thiserror::Error)]
pub enum ChaosError {
    #[error("integration failure: {0}")]
    IntegrationFailure(String),

    #[error("domain error: {0}")]
    DomainError(String),

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("numeric degeneracy: {0}")]
    NumericDegeneracy(String),
}

/// Complex number type (re, im), just enough arithmetic for the DFT.
#[derive(Debug, Clone, Copy)]
pub struct C64 {
    pub re: f64,
    pub im: f64,
}

impl C64 {
    /// Create a new complex number.
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Magnitude |z| = sqrt(re² + im²).
    pub fn norm(&self) -> f64 {
        (self.re * self.re + self.im * self.im).sqrt()
    }

    /// The zero complex number (0 + 0i).
    pub fn zero() -> Self {
        Self { re: 0.0, im: 0.0 }
    }
}

impl std::ops::Add for C64 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl std::ops::AddAssign for C64 {
    fn add_assign(&mut self, rhs: Self) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

impl std::ops::Mul for C64 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl std::ops::Mul<f64> for C64 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self {
            re: self.re * rhs,
            im: self.im * rhs,
        }
    }
}

impl std::ops::Div<f64> for C64 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self {
            re: self.re / rhs,
            im: self.im / rhs,
        }
    }
}

/// A time-ordered sequence of states produced by one integration or
/// iteration run.
///
/// States are stored as a matrix (dim × n_samples), columns time-ordered.
/// For discrete maps `times` holds the step indices 0, 1, 2, …
/// A trajectory is never mutated after construction; estimators derive
/// new series from it instead.
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// Sample times, strictly increasing.
    pub times: Vec<f64>,
    /// State vectors (dim × n_samples).
    pub states: Mat<f64>,
}

impl Trajectory {
    /// Build a trajectory from a time grid and a state matrix.
    ///
    /// Fails when the column count disagrees with the time grid or the
    /// times are not strictly increasing.
    pub fn new(times: Vec<f64>, states: Mat<f64>) -> Result<Self, ChaosError> {
        if states.ncols() != times.len() {
            return Err(ChaosError::DomainError(format!(
                "state matrix has {} columns but {} sample times",
                states.ncols(),
                times.len()
            )));
        }
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ChaosError::DomainError(
                "sample times must be strictly increasing".to_string(),
            ));
        }
        Ok(Self { times, states })
    }

    /// State space dimension.
    pub fn dim(&self) -> usize {
        self.states.nrows()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the trajectory holds no samples.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Copy of component `i` as a scalar time series.
    pub fn component(&self, i: usize) -> Vec<f64> {
        (0..self.len()).map(|j| self.states[(i, j)]).collect()
    }

    /// Copy of the state vector at sample `j`.
    pub fn state(&self, j: usize) -> Vec<f64> {
        (0..self.dim()).map(|i| self.states[(i, j)]).collect()
    }
}
