//! # Radial turning points
//!
//! Given the spherical invariants `(r, vr, vt, E, L)` of a sample, this module locates
//! the pericenter and apocenter radii, the roots of the radial equation
//!
//! ```text
//! g(R) = E - Φ(R) - L²/(2R²)
//! ```
//!
//! i.e. the radii where the effective potential `Φ(R) + L²/(2R²)` meets the energy and
//! the radial velocity vanishes.
//!
//! The placement of the sample relative to its turning points is classified **once**
//! into an [`OrbitRegime`](crate::turning_point::OrbitRegime) and each regime gets its
//! own bracket construction:
//!
//! - circular orbits need no search at all;
//! - a sample sitting exactly on a turning point only needs the opposite root;
//! - a generic sample brackets each root by halving (inward) or doubling (outward) a
//!   trial radius away from `r`, where `g(r) = vr²/2 > 0` is known.
//!
//! The halving search bottoms out at a floor radius below which the pericenter is
//! taken to be the center itself; the doubling search aborts at a ceiling radius,
//! which declares the orbit unbound. Bracketed roots are refined with Brent's method
//! from the `roots` crate.

use roots::{find_root_brent, SimpleConvergency};

use crate::constants::{
    APOCENTER_NUDGE, BRACKET_CEILING, BRACKET_FLOOR, PERICENTER_NUDGE, REFINE_MAX_ITER, ROOT_EPS,
    ROOT_MAX_ITER, SIGN_PROBE_STEP, VEL_TOL,
};
use crate::potential::SphericalPotential;
use crate::torus_errors::TorusError;

/// Radial placement of a sample relative to its turning points.
///
/// Classified once per sample so the turning-point search and the angle assembly
/// branch on the same auditable decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitRegime {
    /// `vr ≈ 0` and `vt ≈ vc(r)`: circular orbit, both turning points collapse on `r`.
    Circular,
    /// `vr ≈ 0` and `vt > vc(r)`: `r` is exactly the inner turning point.
    AtPericenter,
    /// `vr ≈ 0` and `vt < vc(r)`: `r` is exactly the outer turning point.
    AtApocenter,
    /// `r` lies strictly between its turning points.
    Generic,
}

impl OrbitRegime {
    /// Classify from the radial velocity and the tangential speed against the local
    /// circular velocity, both with absolute tolerance
    /// [`VEL_TOL`](crate::constants::VEL_TOL).
    pub fn classify(vr: f64, vt: f64, vc: f64) -> Self {
        if vr.abs() < VEL_TOL {
            if (vt - vc).abs() < VEL_TOL {
                OrbitRegime::Circular
            } else if vt > vc {
                OrbitRegime::AtPericenter
            } else {
                OrbitRegime::AtApocenter
            }
        } else {
            OrbitRegime::Generic
        }
    }
}

/// Radial turning points of one sample, `0 ≤ rperi ≤ r ≤ rap`.
///
/// `rperi == rap` denotes a circular orbit; `rperi == 0` an orbit passing through the
/// center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurningPoints {
    pub rperi: f64,
    pub rap: f64,
}

/// Value of the radial equation `g(R) = E - Φ(R) - L²/(2R²)`.
///
/// Vanishes at the turning points, equals `vr²/2` at the sample radius.
pub fn radial_equation<P: SphericalPotential>(r: f64, energy: f64, l: f64, potential: &P) -> f64 {
    energy - potential.value(r) - l * l / (2. * r * r)
}

/// Sign of `g` at a probe radius, guarding the bracket search against the sign flip an
/// anisotropy-shifted `(E, L)` pair can induce. Fixed at `+1` without coupling.
fn probe_sign<P: SphericalPotential>(
    probe: f64,
    energy: f64,
    l: f64,
    potential: &P,
    gamma: f64,
) -> f64 {
    if gamma != 0. {
        radial_equation(probe, energy, l, potential).signum()
    } else {
        1.
    }
}

/// Walk a trial radius away from `r` until `g` changes sign.
///
/// Halving inward (`apocenter_side = false`) returns `0.` once the trial drops below
/// the floor; doubling outward errors with
/// [`TorusError::UnboundOrbit`](crate::torus_errors::TorusError::UnboundOrbit) once the
/// trial passes the ceiling without a sign change.
fn find_start<P: SphericalPotential>(
    r: f64,
    energy: f64,
    l: f64,
    potential: &P,
    apocenter_side: bool,
    startsign: f64,
) -> Result<f64, TorusError> {
    let mut rtry = if apocenter_side { 2. * r } else { r / 2. };
    while startsign * radial_equation(rtry, energy, l, potential) > 0. && rtry > BRACKET_FLOOR {
        if apocenter_side {
            if rtry > BRACKET_CEILING {
                return Err(TorusError::UnboundOrbit);
            }
            rtry *= 2.;
        } else {
            rtry /= 2.;
        }
    }
    if rtry < BRACKET_FLOOR {
        Ok(0.)
    } else {
        Ok(rtry)
    }
}

/// Locate the radial turning points of one sample.
///
/// Arguments
/// -----------------
/// * `r`, `vr`, `vt`: spherical radius, radial velocity and tangential speed.
/// * `energy`, `l`: sample energy and total angular momentum (after any anisotropy
///   shift).
/// * `potential`: the spherical potential.
/// * `gamma`: anisotropy coupling; only its zero test matters here, enabling the sign
///   probe of the radial equation.
///
/// Return
/// ----------
/// * [`TurningPoints`] on success.
/// * [`TorusError::UnboundOrbit`] when the outward search passes the radius ceiling or
///   the pericenter refinement of a generic sample fails to converge.
/// * [`TorusError::RootFindingError`] when a refinement anchored at a known turning
///   point fails.
///
/// See also
/// ------------
/// * [`OrbitRegime::classify`] – The per-sample branch taken here.
/// * [`radial_equation`] – The function whose roots are returned.
pub fn turning_points<P: SphericalPotential>(
    r: f64,
    vr: f64,
    vt: f64,
    energy: f64,
    l: f64,
    potential: &P,
    gamma: f64,
) -> Result<TurningPoints, TorusError> {
    let f = |x: f64| radial_equation(x, energy, l, potential);
    match OrbitRegime::classify(vr, vt, potential.circular_velocity(r)) {
        OrbitRegime::Circular => Ok(TurningPoints { rperi: r, rap: r }),
        OrbitRegime::AtPericenter => {
            let startsign = probe_sign(r + SIGN_PROBE_STEP, energy, l, potential, gamma);
            let rend = find_start(r, energy, l, potential, true, startsign)?;
            let mut tol = SimpleConvergency {
                eps: ROOT_EPS,
                max_iter: ROOT_MAX_ITER,
            };
            let rap = find_root_brent(r + PERICENTER_NUDGE, rend, &f, &mut tol)?;
            Ok(TurningPoints { rperi: r, rap })
        }
        OrbitRegime::AtApocenter => {
            let startsign = probe_sign(r - SIGN_PROBE_STEP, energy, l, potential, gamma);
            let rstart = find_start(r, energy, l, potential, false, startsign)?;
            let rperi = if rstart == 0. {
                0.
            } else {
                let mut tol = SimpleConvergency {
                    eps: ROOT_EPS,
                    max_iter: ROOT_MAX_ITER,
                };
                find_root_brent(rstart, r - APOCENTER_NUDGE, &f, &mut tol)?
            };
            Ok(TurningPoints { rperi, rap: r })
        }
        OrbitRegime::Generic => {
            let startsign = probe_sign(r, energy, l, potential, gamma);
            let rstart = find_start(r, energy, l, potential, false, startsign)?;
            let rperi = if rstart == 0. {
                0.
            } else {
                let mut tol = SimpleConvergency {
                    eps: ROOT_EPS,
                    max_iter: REFINE_MAX_ITER,
                };
                // Un échec de convergence côté péricentre signale une orbite non liée
                find_root_brent(rstart, r, &f, &mut tol)
                    .map_err(|_| TorusError::UnboundOrbit)?
            };
            let rend = find_start(r, energy, l, potential, true, startsign)?;
            let mut tol = SimpleConvergency {
                eps: ROOT_EPS,
                max_iter: ROOT_MAX_ITER,
            };
            let rap = find_root_brent(r, rend, &f, &mut tol)?;
            Ok(TurningPoints { rperi, rap })
        }
    }
}
