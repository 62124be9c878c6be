//! # Spherical action-angle solver
//!
//! This module defines [`SphericalActionAngle`], which converts cylindrical
//! phase-space samples into action-angle coordinates in any spherically symmetric
//! potential. Conservation of the angular momentum vector makes every orbit planar,
//! so the three degrees of freedom reduce to a single radial quadrature problem plus
//! geometry.
//!
//! ## Pipeline
//!
//! Each evaluation runs the same chain:
//!
//! 1. Reduce the sample to its spherical invariants (`r`, `vr`, `E`, `L`, `Lz`), see
//!    [`phase_space`](crate::phase_space).
//! 2. Locate the radial turning points `rperi ≤ r ≤ rap`, see
//!    [`turning_point`](crate::turning_point).
//! 3. Integrate the radial momentum between the turning points. Every integral is
//!    split at the geometric mean radius and substituted with `r = rperi + t²`
//!    (inner half) or `r = rap - t²` (outer half), which removes the square-root
//!    vanishing of the momentum at the turning points.
//! 4. Assemble frequencies and angles from the same half-integrals evaluated at the
//!    sample radius.
//!
//! Orbits whose radial action falls below
//! [`CIRCULAR_ACTION_TOL`](crate::constants::CIRCULAR_ACTION_TOL) are treated as
//! circular: their frequencies come from the epicyclic approximation at the sample
//! radius instead of degenerate quadratures.
//!
//! ## Conventions
//!
//! - The azimuthal frequency and the azimuthal angle follow the sign of the
//!   tangential velocity; the vertical frequency keeps the unsigned magnitude.
//! - Angles are reduced to `[0, 2π)`. The radial angle is zero at pericenter.
//! - For orbits confined to the equatorial plane the ascending node is placed on the
//!   sample azimuth, so the node longitude is zero by convention.
//!
//! ## Anisotropy coupling
//!
//! A solver built with [`SphericalActionAngle::with_gamma`] replaces `L` by
//! `L + γ·Jz` before the turning-point search when an external vertical action is
//! supplied. Only [`SphericalActionAngle::actions_with_vertical_action`] and
//! [`SphericalActionAngle::orbit_extents_with_vertical_action`] apply the shift;
//! frequency and angle evaluations always use the plain invariants.
//!
//! ## Example
//!
//! ```rust,no_run
//! use torus::action_angle::spherical::SphericalActionAngle;
//! use torus::action_angle::TorusParams;
//! use torus::phase_space::OrbitSample;
//! use torus::potential::PointMass;
//!
//! let solver = SphericalActionAngle::new(PointMass::default());
//! let params = TorusParams::new();
//! let sample = OrbitSample::with_azimuth(1.0, 0.3, 1.1, 0.0, 0.0, 0.5);
//! let (actions, frequencies, angles) = solver
//!     .actions_frequencies_angles(&sample, &params)
//!     .unwrap();
//! println!("{actions}{frequencies}{angles}");
//! ```

use std::f64::consts::PI;

use crate::action_angle::result::{Actions, Angles, Frequencies, OrbitExtents};
use crate::action_angle::TorusParams;
use crate::constants::{Radian, CIRCULAR_ACTION_TOL, DPI};
use crate::phase_space::{principal_angle, OrbitSample, SphericalState};
use crate::potential::SphericalPotential;
use crate::torus_errors::TorusError;
use crate::turning_point::{radial_equation, turning_points, TurningPoints};

/// Action-angle solver for a spherically symmetric potential.
///
/// The solver owns the potential and an optional anisotropy coupling `gamma`; all
/// per-call state lives in the arguments, so one instance can evaluate any number of
/// samples.
///
/// See also
/// ------------
/// * [`TorusParams`] – Quadrature configuration passed to every evaluation.
/// * [`OrbitSample`] – The cylindrical phase-space input.
#[derive(Debug, Clone)]
pub struct SphericalActionAngle<P: SphericalPotential> {
    potential: P,
    gamma: f64,
}

impl<P: SphericalPotential> SphericalActionAngle<P> {
    /// Create a solver without anisotropy coupling.
    pub fn new(potential: P) -> Self {
        Self {
            potential,
            gamma: 0.,
        }
    }

    /// Create a solver with anisotropy coupling `gamma`.
    ///
    /// The coupling only takes effect on the `*_with_vertical_action` evaluations,
    /// where the angular momentum is replaced by `L + gamma·Jz` before the
    /// turning-point search.
    pub fn with_gamma(potential: P, gamma: f64) -> Self {
        Self { potential, gamma }
    }

    /// Borrow the underlying potential.
    pub fn potential(&self) -> &P {
        &self.potential
    }

    /// The anisotropy coupling of this solver.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Compute the actions `(J_r, J_φ, J_z)` of one sample.
    ///
    /// Arguments
    /// -----------------
    /// * `sample`: cylindrical phase-space sample; the azimuth is not needed here.
    /// * `params`: quadrature configuration.
    ///
    /// Return
    /// ----------
    /// * The [`Actions`] of the orbit through `sample`.
    /// * [`TorusError::UnboundOrbit`] when the sample does not belong to a bound
    ///   orbit.
    ///
    /// See also
    /// ------------
    /// * [`SphericalActionAngle::actions_frequencies`] – Actions together with their
    ///   frequencies.
    /// * [`SphericalActionAngle::actions_with_vertical_action`] – Same computation
    ///   with the anisotropy shift applied.
    pub fn actions(
        &self,
        sample: &OrbitSample,
        params: &TorusParams,
    ) -> Result<Actions, TorusError> {
        self.compute_actions(sample, None, params)
    }

    /// Compute the actions with the anisotropy shift `L ← L + gamma·Jz` applied.
    ///
    /// Arguments
    /// -----------------
    /// * `sample`: cylindrical phase-space sample.
    /// * `vertical_action`: externally estimated vertical action `Jz` entering the
    ///   shift.
    /// * `params`: quadrature configuration.
    ///
    /// Return
    /// ----------
    /// * The [`Actions`] computed from the shifted invariants. The azimuthal action
    ///   keeps the unshifted `L_z`; the vertical action uses the shifted `L`.
    pub fn actions_with_vertical_action(
        &self,
        sample: &OrbitSample,
        vertical_action: f64,
        params: &TorusParams,
    ) -> Result<Actions, TorusError> {
        self.compute_actions(sample, Some(vertical_action), params)
    }

    /// Compute the actions and frequencies `(J, Ω)` of one sample.
    ///
    /// Arguments
    /// -----------------
    /// * `sample`: cylindrical phase-space sample; the azimuth is not needed here.
    /// * `params`: quadrature configuration.
    ///
    /// Return
    /// ----------
    /// * The [`Actions`] and [`Frequencies`] of the orbit through `sample`.
    /// * [`TorusError::UnboundOrbit`] when the sample does not belong to a bound
    ///   orbit.
    ///
    /// See also
    /// ------------
    /// * [`SphericalActionAngle::actions_frequencies_angles`] – Also assembles the
    ///   angle coordinates.
    pub fn actions_frequencies(
        &self,
        sample: &OrbitSample,
        params: &TorusParams,
    ) -> Result<(Actions, Frequencies), TorusError> {
        let state = SphericalState::reduce(sample, &self.potential, self.gamma, None);
        let TurningPoints { rperi, rap } = turning_points(
            state.r,
            state.vr,
            state.vt,
            state.energy,
            state.l,
            &self.potential,
            self.gamma,
        )?;
        let rmean = geometric_mean_radius(rperi, rap);
        let radial = self.radial_action(rmean, rperi, rap, state.energy, state.l, params);
        let actions = Actions {
            radial,
            azimuthal: state.lz,
            vertical: state.l - state.lz.abs(),
        };
        let (radial_freq, azimuthal_freq) =
            self.unsigned_frequencies(radial, &state, rmean, rperi, rap, params);
        Ok((
            actions,
            orient_frequencies(radial_freq, azimuthal_freq, sample.tangential_velocity),
        ))
    }

    /// Compute the full action-angle coordinates `(J, Ω, θ)` of one sample.
    ///
    /// Arguments
    /// -----------------
    /// * `sample`: cylindrical phase-space sample. The azimuth is required: angle
    ///   coordinates are anchored on the ascending node.
    /// * `params`: quadrature configuration.
    ///
    /// Return
    /// ----------
    /// * The [`Actions`], [`Frequencies`] and [`Angles`] of the orbit through
    ///   `sample`, angles reduced to `[0, 2π)`.
    /// * [`TorusError::MissingAzimuth`] when `sample.azimuth` is `None`.
    /// * [`TorusError::UnboundOrbit`] when the sample does not belong to a bound
    ///   orbit.
    pub fn actions_frequencies_angles(
        &self,
        sample: &OrbitSample,
        params: &TorusParams,
    ) -> Result<(Actions, Frequencies, Angles), TorusError> {
        let azimuth = sample.azimuth.ok_or(TorusError::MissingAzimuth)?;
        let state = SphericalState::reduce(sample, &self.potential, self.gamma, None);
        let node_longitude = ascending_node_longitude(
            sample.height,
            sample.cylindrical_radius,
            state.vtheta,
            azimuth,
            state.lz,
            state.l,
        );
        let TurningPoints { rperi, rap } = turning_points(
            state.r,
            state.vr,
            state.vt,
            state.energy,
            state.l,
            &self.potential,
            self.gamma,
        )?;
        let rmean = geometric_mean_radius(rperi, rap);
        let radial = self.radial_action(rmean, rperi, rap, state.energy, state.l, params);
        let actions = Actions {
            radial,
            azimuthal: state.lz,
            vertical: state.l - state.lz.abs(),
        };
        let (radial_freq, azimuthal_freq) =
            self.unsigned_frequencies(radial, &state, rmean, rperi, rap, params);

        let radial_angle = self.radial_angle(radial_freq, &state, rmean, rperi, rap, params);
        let vertical_angle = self.vertical_angle(
            radial_freq,
            azimuthal_freq,
            radial_angle,
            sample.height,
            azimuth,
            &state,
            rmean,
            rperi,
            rap,
            params,
        );
        let azimuthal_angle = if sample.tangential_velocity < 0. {
            node_longitude - vertical_angle
        } else {
            node_longitude + vertical_angle
        };

        Ok((
            actions,
            orient_frequencies(radial_freq, azimuthal_freq, sample.tangential_velocity),
            Angles {
                radial: principal_angle(radial_angle),
                azimuthal: principal_angle(azimuthal_angle),
                vertical: principal_angle(vertical_angle),
            },
        ))
    }

    /// Compute the radial and vertical extent of the orbit through one sample.
    ///
    /// No quadrature is involved: the extents only need the turning points, so this
    /// is considerably cheaper than an action evaluation.
    ///
    /// Return
    /// ----------
    /// * The [`OrbitExtents`] `(e, zmax, rperi, rap)`.
    /// * [`TorusError::UnboundOrbit`] when the sample does not belong to a bound
    ///   orbit.
    pub fn orbit_extents(&self, sample: &OrbitSample) -> Result<OrbitExtents, TorusError> {
        self.compute_extents(sample, None)
    }

    /// Compute the orbit extents with the anisotropy shift `L ← L + gamma·Jz`.
    ///
    /// The maximum height keeps the unshifted inclination geometry: it is evaluated
    /// against the squared angular momentum of the raw sample.
    pub fn orbit_extents_with_vertical_action(
        &self,
        sample: &OrbitSample,
        vertical_action: f64,
    ) -> Result<OrbitExtents, TorusError> {
        self.compute_extents(sample, Some(vertical_action))
    }

    /// Evaluate [`SphericalActionAngle::actions`] over a batch of samples.
    ///
    /// Failures are isolated: each sample yields its own `Result`, in input order.
    pub fn actions_batch(
        &self,
        samples: &[OrbitSample],
        params: &TorusParams,
    ) -> Vec<Result<Actions, TorusError>> {
        samples
            .iter()
            .map(|sample| self.actions(sample, params))
            .collect()
    }

    /// Evaluate [`SphericalActionAngle::actions_frequencies`] over a batch of
    /// samples.
    pub fn actions_frequencies_batch(
        &self,
        samples: &[OrbitSample],
        params: &TorusParams,
    ) -> Vec<Result<(Actions, Frequencies), TorusError>> {
        samples
            .iter()
            .map(|sample| self.actions_frequencies(sample, params))
            .collect()
    }

    /// Evaluate [`SphericalActionAngle::actions_frequencies_angles`] over a batch of
    /// samples.
    pub fn actions_frequencies_angles_batch(
        &self,
        samples: &[OrbitSample],
        params: &TorusParams,
    ) -> Vec<Result<(Actions, Frequencies, Angles), TorusError>> {
        samples
            .iter()
            .map(|sample| self.actions_frequencies_angles(sample, params))
            .collect()
    }

    /// Evaluate [`SphericalActionAngle::orbit_extents`] over a batch of samples.
    pub fn orbit_extents_batch(
        &self,
        samples: &[OrbitSample],
    ) -> Vec<Result<OrbitExtents, TorusError>> {
        samples
            .iter()
            .map(|sample| self.orbit_extents(sample))
            .collect()
    }

    fn compute_actions(
        &self,
        sample: &OrbitSample,
        extra_vertical_action: Option<f64>,
        params: &TorusParams,
    ) -> Result<Actions, TorusError> {
        let state =
            SphericalState::reduce(sample, &self.potential, self.gamma, extra_vertical_action);
        let TurningPoints { rperi, rap } = turning_points(
            state.r,
            state.vr,
            state.vt,
            state.energy,
            state.l,
            &self.potential,
            self.gamma,
        )?;
        let rmean = geometric_mean_radius(rperi, rap);
        Ok(Actions {
            radial: self.radial_action(rmean, rperi, rap, state.energy, state.l, params),
            azimuthal: state.lz,
            vertical: state.l - state.lz.abs(),
        })
    }

    fn compute_extents(
        &self,
        sample: &OrbitSample,
        extra_vertical_action: Option<f64>,
    ) -> Result<OrbitExtents, TorusError> {
        let state =
            SphericalState::reduce(sample, &self.potential, self.gamma, extra_vertical_action);
        let TurningPoints { rperi, rap } = turning_points(
            state.r,
            state.vr,
            state.vt,
            state.energy,
            state.l,
            &self.potential,
            self.gamma,
        )?;
        Ok(OrbitExtents {
            eccentricity: (rap - rperi) / (rap + rperi),
            zmax: rap * (1. - state.lz * state.lz / state.l2).sqrt(),
            rperi,
            rap,
        })
    }

    /// Radial action from the two substituted half-integrals of the radial momentum.
    fn radial_action(
        &self,
        rmean: f64,
        rperi: f64,
        rap: f64,
        energy: f64,
        l: f64,
        params: &TorusParams,
    ) -> f64 {
        // Une orbite circulaire n'enferme aucune aire radiale
        if rperi == rap {
            return 0.;
        }
        let mut jr = 0.;
        if rmean > rperi {
            jr += params.integrate(
                |t| 2. * t * radial_momentum(rperi + t * t, energy, l, &self.potential),
                0.,
                (rmean - rperi).sqrt(),
            );
        }
        if rmean < rap {
            jr += params.integrate(
                |t| 2. * t * radial_momentum(rap - t * t, energy, l, &self.potential),
                0.,
                (rap - rmean).sqrt(),
            );
        }
        jr / PI
    }

    /// Radial frequency `2π / T_r` from the substituted period integrals.
    fn radial_frequency(
        &self,
        rmean: f64,
        rperi: f64,
        rap: f64,
        energy: f64,
        l: f64,
        params: &TorusParams,
    ) -> f64 {
        let mut half_period = 0.;
        if rmean > rperi {
            half_period += params.integrate(
                |t| 2. * t / radial_momentum(rperi + t * t, energy, l, &self.potential),
                0.,
                (rmean - rperi).sqrt(),
            );
        }
        if rmean < rap {
            half_period += params.integrate(
                |t| 2. * t / radial_momentum(rap - t * t, energy, l, &self.potential),
                0.,
                (rap - rmean).sqrt(),
            );
        }
        DPI / (2. * half_period)
    }

    /// Azimuthal frequency from the angular-advance integral `I = 2L ∫ dt/(p_r r²)`.
    #[allow(clippy::too_many_arguments)]
    fn azimuthal_frequency(
        &self,
        radial_freq: f64,
        rmean: f64,
        rperi: f64,
        rap: f64,
        energy: f64,
        l: f64,
        params: &TorusParams,
    ) -> f64 {
        let mut advance = 0.;
        if rmean > rperi {
            advance += params.integrate(
                |t| {
                    let rt = rperi + t * t;
                    2. * t / (radial_momentum(rt, energy, l, &self.potential) * rt * rt)
                },
                0.,
                (rmean - rperi).sqrt(),
            );
        }
        if rmean < rap {
            advance += params.integrate(
                |t| {
                    let rt = rap - t * t;
                    2. * t / (radial_momentum(rt, energy, l, &self.potential) * rt * rt)
                },
                0.,
                (rap - rmean).sqrt(),
            );
        }
        advance *= 2. * l;
        advance * radial_freq / DPI
    }

    /// Unsigned radial and azimuthal frequencies of the orbit.
    ///
    /// A vanishing radial action means the quadratures degenerate; the epicyclic and
    /// circular frequencies at the sample radius take over.
    fn unsigned_frequencies(
        &self,
        radial_action: f64,
        state: &SphericalState,
        rmean: f64,
        rperi: f64,
        rap: f64,
        params: &TorusParams,
    ) -> (f64, f64) {
        if radial_action < CIRCULAR_ACTION_TOL {
            (
                self.potential.epicyclic_frequency(state.r),
                self.potential.circular_frequency(state.r),
            )
        } else {
            let radial_freq =
                self.radial_frequency(rmean, rperi, rap, state.energy, state.l, params);
            let azimuthal_freq = self.azimuthal_frequency(
                radial_freq,
                rmean,
                rperi,
                rap,
                state.energy,
                state.l,
                params,
            );
            (radial_freq, azimuthal_freq)
        }
    }

    /// Radial angle of the sample, unwrapped.
    ///
    /// The inner branch accumulates the travel time from pericenter, the outer
    /// branch the remaining time to apocenter; a negative radial velocity mirrors
    /// the phase onto the returning half of the cycle.
    fn radial_angle(
        &self,
        radial_freq: f64,
        state: &SphericalState,
        rmean: f64,
        rperi: f64,
        rap: f64,
        params: &TorusParams,
    ) -> Radian {
        let (r, vr, energy, l) = (state.r, state.vr, state.energy, state.l);
        if r < rmean {
            let mut wr = if r > rperi {
                radial_freq
                    * params.integrate(
                        |t| 2. * t / radial_momentum(rperi + t * t, energy, l, &self.potential),
                        0.,
                        (r - rperi).sqrt(),
                    )
            } else {
                0.
            };
            if vr < 0. {
                wr = DPI - wr;
            }
            wr
        } else {
            let wr = if r < rap {
                radial_freq
                    * params.integrate(
                        |t| 2. * t / radial_momentum(rap - t * t, energy, l, &self.potential),
                        0.,
                        (rap - r).sqrt(),
                    )
            } else {
                PI
            };
            if vr < 0. {
                PI + wr
            } else {
                PI - wr
            }
        }
    }

    /// Vertical angle of the sample, unwrapped.
    #[allow(clippy::too_many_arguments)]
    fn vertical_angle(
        &self,
        radial_freq: f64,
        azimuthal_freq: f64,
        radial_angle: Radian,
        height: f64,
        azimuth: Radian,
        state: &SphericalState,
        rmean: f64,
        rperi: f64,
        rap: f64,
        params: &TorusParams,
    ) -> Radian {
        let (r, vr, energy, l) = (state.r, state.vr, state.energy, state.l);
        let inclination = (state.lz / l).acos();
        let sinpsi = height / (r * inclination.sin());
        let psi = if sinpsi.is_finite() {
            let psi = sinpsi.clamp(-1., 1.).asin();
            if state.vtheta > 0. {
                PI - psi
            } else {
                psi
            }
        } else {
            azimuth
        };
        let psi = principal_angle(psi);

        // dpsi is the azimuthal advance over one full radial period
        let dpsi = azimuthal_freq / radial_freq * DPI;
        let wz = if r < rmean {
            let wz = l
                * params.integrate(
                    |t| {
                        let rt = rperi + t * t;
                        2. * t / (radial_momentum(rt, energy, l, &self.potential) * rt * rt)
                    },
                    0.,
                    (r - rperi).sqrt(),
                );
            if vr < 0. {
                dpsi - wz
            } else {
                wz
            }
        } else {
            let wz = l
                * params.integrate(
                    |t| {
                        let rt = rap - t * t;
                        2. * t / (radial_momentum(rt, energy, l, &self.potential) * rt * rt)
                    },
                    0.,
                    (rap - r).sqrt(),
                );
            if vr < 0. {
                dpsi / 2. + wz
            } else {
                dpsi / 2. - wz
            }
        };
        -wz + psi + azimuthal_freq / radial_freq * radial_angle
    }
}

/// Radial momentum `√(2 g(r))`, where `g` is the
/// [`radial_equation`](crate::turning_point::radial_equation) whose roots bound the
/// integrals.
fn radial_momentum<P: SphericalPotential>(r: f64, energy: f64, l: f64, potential: &P) -> f64 {
    (2. * radial_equation(r, energy, l, potential)).sqrt()
}

/// Geometric mean of the turning radii, `exp((ln rperi + ln rap) / 2)`.
///
/// Collapses to `0` when `rperi == 0`, putting the whole range on the outer
/// substitution.
fn geometric_mean_radius(rperi: f64, rap: f64) -> f64 {
    ((rperi.ln() + rap.ln()) / 2.).exp()
}

/// Orient the azimuthal frequency with the tangential velocity; the vertical
/// frequency keeps the unsigned magnitude.
fn orient_frequencies(radial: f64, azimuthal: f64, tangential_velocity: f64) -> Frequencies {
    Frequencies {
        radial,
        azimuthal: if tangential_velocity < 0. {
            -azimuthal
        } else {
            azimuthal
        },
        vertical: azimuthal,
    }
}

/// Longitude of the ascending node of the orbital plane.
fn ascending_node_longitude(
    height: f64,
    cylindrical_radius: f64,
    vtheta: f64,
    azimuth: Radian,
    lz: f64,
    l: f64,
) -> Radian {
    let inclination = (lz / l).acos();
    let sinu = height / (cylindrical_radius * inclination.tan());
    let node_phase = if sinu.is_finite() {
        let u = sinu.clamp(-1., 1.).asin();
        if vtheta > 0. {
            PI - u
        } else {
            u
        }
    } else {
        // Pour une orbite non inclinée le noeud est placé sur l'azimut
        azimuth
    };
    azimuth - node_phase
}
