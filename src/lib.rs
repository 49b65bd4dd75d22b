//! # chaos-dynamics
//!
//! Numeric core for exploring chaotic dynamical systems: adaptive
//! integration of nonlinear ODEs, synchronization of coupled chaotic
//! oscillators, and the estimators used to characterize the results.
//!
//! - **Vector fields** ([`Lorenz`], [`VanDerPol`], [`DampedOscillator`],
//!   [`TorusFlow`]): pure right-hand sides with validated parameter sets
//! - **Adaptive integration** ([`solve_ivp`]): embedded Runge-Kutta 4(5)
//!   reporting at caller-chosen evaluation times
//! - **Discrete maps** ([`HenonMap`], [`iterate_map`]): fixed-count
//!   iteration from a configured initial condition
//! - **Synchronization** ([`CoupledPair`]): bidirectional linear coupling
//!   of two copies of a base field, plus divergence-series derivation
//! - **Lyapunov** ([`estimate_lyapunov`]): conditional exponent from a
//!   log-divergence line fit - negative means the pair synchronizes
//! - **Poincaré sections** ([`poincare_section`], [`lag_pairs`]):
//!   tolerance-band plane filter and the discrete lag plot
//! - **Fractal dimension** ([`box_counts`]): box-count profile, log-log
//!   dimension fit, heuristic chaos classification
//! - **Spectra** ([`power_spectrum`]): one-sided DFT amplitude spectrum
//! - **Sweeps** ([`coupling_sweep`], [`rho_sweep`]): parallel runs over
//!   coupling strengths or Rayleigh parameters
//!
//! ## Quick Start
//!
//! ```rust
//! use chaos_dynamics::{linspace, solve_ivp, IntegratorConfig, Lorenz};
//!
//! let field = Lorenz::default(); // σ=10, ρ=28, β=8/3
//! let t_eval = linspace(0.0, 1.0, 20).unwrap();
//! let traj = solve_ivp(
//!     &field,
//!     (0.0, 1.0),
//!     &[1.0, 1.0, 1.0],
//!     &t_eval,
//!     &IntegratorConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(traj.dim(), 3);
//! assert_eq!(traj.len(), 20);
//! ```
//!
//! ## References
//!
//! - Lorenz (1963), *J. Atmos. Sci.*, 20, 130-141
//! - Hénon (1976), *Commun. Math. Phys.*, 50, 69-77
//! - Pecora & Carroll (1990), *Phys. Rev. Lett.*, 64, 821-824
//! - Dormand & Prince (1980), *J. Comput. Appl. Math.*, 6, 19-26

pub mod boxcount;
pub mod fields;
pub mod integrate;
pub mod lyapunov;
pub mod maps;
pub mod section;
pub mod spectrum;
pub mod sweep;
pub mod sync;
pub mod types;
pub mod utils;

pub use boxcount::{
    box_counts, log_spaced_sizes, BoxCountProfile, DimensionFit, DEFAULT_CHAOS_THRESHOLD,
};
pub use fields::{DampedOscillator, Lorenz, TorusFlow, VanDerPol, VectorField};
pub use integrate::{solve_ivp, IntegratorConfig};
pub use lyapunov::{estimate_lyapunov, LyapunovFit, LOG_FLOOR};
pub use maps::{iterate_map, DiscreteMap, HenonMap};
pub use section::{lag_pairs, poincare_section};
pub use spectrum::{power_spectrum, Spectrum};
pub use sweep::{coupling_sweep, rho_sweep, CouplingRun};
pub use sync::{component_divergence, norm_divergence, stacked_initial, CoupledPair};
pub use types::{ChaosError, Trajectory, C64};
pub use utils::linspace;
