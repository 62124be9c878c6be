//! # Action-angle machinery for spherical potentials
//!
//! This module gathers the action-angle solver and its supporting types:
//!
//! - [`spherical`] – The [`SphericalActionAngle`] solver, turning phase-space samples
//!   into actions, frequencies, angles and orbit extents.
//! - [`result`] – The typed outputs: [`Actions`], [`Frequencies`], [`Angles`] and
//!   [`OrbitExtents`].
//! - [`TorusParams`] – Quadrature configuration shared by every solver call, built
//!   either with defaults or through the fluent [`TorusParamsBuilder`].
//!
//! ## Quadrature configuration
//!
//! Every radial integral of the solver runs through [`TorusParams::integrate`], which
//! dispatches on the configured [`QuadratureRule`]:
//!
//! - [`QuadratureRule::Adaptive`] (default) escalates the Gauss–Legendre order until
//!   two successive estimates agree within `max(quad_tol, quad_rtol · |value|)` or
//!   `max_order` is reached. A non-converged last estimate is kept as-is.
//! - [`QuadratureRule::FixedOrder`] evaluates a single Gauss–Legendre rule of order
//!   `fixed_order`, trading a little accuracy for a fully predictable cost.
//!
//! ## Example
//!
//! ```rust,no_run
//! use torus::action_angle::TorusParams;
//! use torus::quadrature::QuadratureRule;
//!
//! let params = TorusParams::builder()
//!     .quadrature_rule(QuadratureRule::FixedOrder)
//!     .fixed_order(20)
//!     .build()
//!     .unwrap();
//! println!("{params:#}");
//! ```

use std::cmp::Ordering::{Equal, Greater};
use std::fmt;

use crate::constants::{QUAD_FIXED_ORDER, QUAD_MAX_ORDER, QUAD_TOL};
use crate::quadrature::{adaptive_quad, fixed_quad, QuadratureRule};
use crate::torus_errors::TorusError;

pub mod result;
pub mod spherical;

pub use result::{Actions, Angles, Frequencies, OrbitExtents};
pub use spherical::SphericalActionAngle;

/// Quadrature parameters of the action-angle solver.
///
/// The defaults reproduce the historical tolerances of adaptive Gauss–Legendre
/// quadrature (`1.49e-8` absolute and relative, order escalation capped at 50) and an
/// order-10 fixed rule. Use [`TorusParams::new`] for the defaults or
/// [`TorusParams::builder`] to override fields with validation.
///
/// Fields
/// ---------
/// * `quadrature_rule` – Selects adaptive order escalation or a single fixed-order
///   rule.
/// * `quad_tol` – Absolute convergence tolerance of the adaptive rule.
/// * `quad_rtol` – Relative convergence tolerance of the adaptive rule.
/// * `max_order` – Highest Gauss–Legendre order the adaptive rule escalates to.
/// * `fixed_order` – Order of the fixed rule.
///
/// See also
/// ------------
/// * [`SphericalActionAngle`] – Consumes these parameters on every evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct TorusParams {
    pub quadrature_rule: QuadratureRule,
    pub quad_tol: f64,
    pub quad_rtol: f64,
    pub max_order: usize,
    pub fixed_order: usize,
}

impl TorusParams {
    /// Create parameters with the default quadrature configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`TorusParamsBuilder`] to configure custom quadrature parameters.
    ///
    /// This is a **fluent builder API** for [`TorusParams`]: override the defaults
    /// step by step, then call [`TorusParamsBuilder::build`] to validate and obtain
    /// the final parameter set.
    pub fn builder() -> TorusParamsBuilder {
        TorusParamsBuilder::new()
    }

    /// Integrate `integrand` over `[a, b]` with the configured quadrature rule.
    ///
    /// Arguments
    /// -----------------
    /// * `integrand`: the function to integrate.
    /// * `a`, `b`: integration bounds; a zero-width interval integrates to `0`.
    ///
    /// Return
    /// ----------
    /// * The integral estimate. The adaptive rule keeps its last estimate when the
    ///   order cap is reached without convergence.
    pub fn integrate<F: Fn(f64) -> f64>(&self, integrand: F, a: f64, b: f64) -> f64 {
        match self.quadrature_rule {
            QuadratureRule::Adaptive => adaptive_quad(
                &integrand,
                a,
                b,
                self.quad_tol,
                self.quad_rtol,
                self.max_order,
            ),
            QuadratureRule::FixedOrder => fixed_quad(&integrand, a, b, self.fixed_order),
        }
    }
}

impl Default for TorusParams {
    fn default() -> Self {
        TorusParams {
            quadrature_rule: QuadratureRule::Adaptive,
            quad_tol: QUAD_TOL,
            quad_rtol: QUAD_TOL,
            max_order: QUAD_MAX_ORDER,
            fixed_order: QUAD_FIXED_ORDER,
        }
    }
}

/// Fluent builder for [`TorusParams`].
#[derive(Debug, Clone)]
pub struct TorusParamsBuilder {
    params: TorusParams,
}

impl Default for TorusParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TorusParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: TorusParams::default(),
        }
    }

    pub fn quadrature_rule(mut self, v: QuadratureRule) -> Self {
        self.params.quadrature_rule = v;
        self
    }
    pub fn quad_tol(mut self, v: f64) -> Self {
        self.params.quad_tol = v;
        self
    }
    pub fn quad_rtol(mut self, v: f64) -> Self {
        self.params.quad_rtol = v;
        self
    }
    pub fn max_order(mut self, v: usize) -> Self {
        self.params.max_order = v;
        self
    }
    pub fn fixed_order(mut self, v: usize) -> Self {
        self.params.fixed_order = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff x >= 0.0 and comparable (i.e., not NaN).
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    /// Finalize the builder and produce a [`TorusParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `quad_tol > 0.0` – the absolute tolerance must be strictly positive.
    /// * `quad_rtol >= 0.0` – the relative tolerance may be zero but not negative.
    /// * `max_order >= 1`, `fixed_order >= 1` – a quadrature rule needs at least one
    ///   node.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(TorusParams)` if all values are valid.
    /// * `Err(TorusError::InvalidParameter)` if any validation rule fails.
    pub fn build(self) -> Result<TorusParams, TorusError> {
        let p = &self.params;

        if !Self::gt0(p.quad_tol) {
            return Err(TorusError::InvalidParameter(
                "quad_tol must be > 0".into(),
            ));
        }
        if !Self::ge0(p.quad_rtol) {
            return Err(TorusError::InvalidParameter(
                "quad_rtol must be >= 0".into(),
            ));
        }
        if p.max_order == 0 {
            return Err(TorusError::InvalidParameter(
                "max_order must be >= 1".into(),
            ));
        }
        if p.fixed_order == 0 {
            return Err(TorusError::InvalidParameter(
                "fixed_order must be >= 1".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for TorusParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 42; // width reserved for "name = value"
            writeln!(f, "Torus Quadrature Parameters")?;
            writeln!(f, "---------------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            writeln!(f, "[Quadrature]")?;
            line!(
                "quadrature_rule = {:?}",
                self.quadrature_rule,
                "Radial integral evaluation strategy"
            )?;
            line!(
                "quad_tol        = {:.2e}",
                self.quad_tol,
                "Absolute tolerance of the adaptive rule"
            )?;
            line!(
                "quad_rtol       = {:.2e}",
                self.quad_rtol,
                "Relative tolerance of the adaptive rule"
            )?;
            line!(
                "max_order       = {}",
                self.max_order,
                "Order cap of the adaptive rule"
            )?;
            line!(
                "fixed_order     = {}",
                self.fixed_order,
                "Order of the fixed rule"
            )?;

            Ok(())
        } else {
            write!(
                f,
                "TorusParams(rule={:?}, tol={:.2e}, rtol={:.2e}, max_order={}, fixed_order={})",
                self.quadrature_rule,
                self.quad_tol,
                self.quad_rtol,
                self.max_order,
                self.fixed_order,
            )
        }
    }
}
