//! # Constants and type definitions for Torus
//!
//! This module centralizes the **numerical tolerances**, **search bounds**, and **common type
//! definitions** used throughout the `torus` library.
//!
//! ## Overview
//!
//! - Turning-point search bounds and velocity tolerances
//! - Root-finding and quadrature convergence defaults
//! - Core type aliases used across the crate
//!
//! All radii, velocities and frequencies are expressed in the natural unit system of the
//! supplied potential (e.g. `vc = 1` at `r = 1` for a unit point mass).

// -------------------------------------------------------------------------------------------------
// Turning-point search
// -------------------------------------------------------------------------------------------------

/// 2π, useful for angle reduction
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Absolute tolerance declaring a velocity component zero (circular / at-turning-point tests)
pub const VEL_TOL: f64 = 1e-15;

/// Pericenter bracket floor: a trial radius below this means the orbit reaches the center
pub const BRACKET_FLOOR: f64 = 1e-9;

/// Apocenter bracket ceiling in scale units: no sign change below this radius means the
/// orbit is unbound
pub const BRACKET_CEILING: f64 = 100.;

/// Offset above an exact pericenter radius when bracketing the apocenter root
pub const PERICENTER_NUDGE: f64 = 1e-5;

/// Offset below an exact apocenter radius when bracketing the pericenter root
pub const APOCENTER_NUDGE: f64 = 1e-6;

/// Step used to probe the sign of the radial equation next to an exact turning point
pub const SIGN_PROBE_STEP: f64 = 1e-8;

// -------------------------------------------------------------------------------------------------
// Convergence defaults
// -------------------------------------------------------------------------------------------------

/// Interval tolerance for Brent refinement of turning-point radii
pub const ROOT_EPS: f64 = 2e-12;

/// Iteration cap for Brent refinement of turning-point radii
pub const ROOT_MAX_ITER: usize = 100;

/// Raised iteration cap for the pericenter refinement of a generic sample; exceeding it
/// flags the orbit as unbound
pub const REFINE_MAX_ITER: usize = 200;

/// Default absolute and relative tolerance of the adaptive quadrature
pub const QUAD_TOL: f64 = 1.49e-8;

/// Highest Gauss–Legendre order the adaptive quadrature escalates to
pub const QUAD_MAX_ORDER: usize = 50;

/// Gauss–Legendre order of the fixed-order quadrature
pub const QUAD_FIXED_ORDER: usize = 10;

/// Radial action below which an orbit is treated as circular and frequencies are taken
/// from the epicyclic approximation
pub const CIRCULAR_ACTION_TOL: f64 = 1e-9;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;
