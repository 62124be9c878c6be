//! # Phase-space samples and spherical kinematics
//!
//! This module defines the [`OrbitSample`](crate::phase_space::OrbitSample) input type,
//! a single cylindrical phase-space point `(R, vR, vT, z, vz, phi)`, and the reduction
//! of a sample to the **spherical dynamical invariants** `(r, vr, vt, L, Lz, E)` that
//! drive every action-angle computation.
//!
//! ## Conventions
//!
//! - `R` is the cylindrical radius, `z` the height above the reference plane, `phi`
//!   the (optional) azimuth. Velocities are the matching cylindrical components.
//! - The angular momentum vector is the cross product of the position `(R, 0, z)` and
//!   velocity `(vR, vT, vz)` expressed in the meridional frame, so `Lz = R·vT` and the
//!   sense of rotation is carried by the sign of `vT`.
//! - The azimuth is only needed for angle variables; actions and frequencies of a
//!   spherical potential do not depend on it.

use itertools::izip;
use nalgebra::Vector3;

use crate::constants::{Radian, DPI};
use crate::potential::SphericalPotential;
use crate::torus_errors::TorusError;

/// Retourne la valeur principale d'un angle en radians dans [0, 2π).
pub fn principal_angle(a: Radian) -> Radian {
    a.rem_euclid(DPI)
}

/// One cylindrical phase-space sample.
///
/// Units
/// -----
/// * `cylindrical_radius`, `height`: scale units of the potential.
/// * `radial_velocity`, `tangential_velocity`, `vertical_velocity`: matching velocity
///   units (`vc = 1` at the reference radius in natural units).
/// * `azimuth`: radians, only required when angle variables are requested.
///
/// Notes
/// -----
/// The sample is a plain value; batches are slices of samples and every evaluation is
/// independent of its neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSample {
    pub cylindrical_radius: f64,
    pub radial_velocity: f64,
    pub tangential_velocity: f64,
    pub height: f64,
    pub vertical_velocity: f64,
    pub azimuth: Option<Radian>,
}

impl OrbitSample {
    /// Build a sample without an azimuth (actions and frequencies only).
    pub fn new(
        cylindrical_radius: f64,
        radial_velocity: f64,
        tangential_velocity: f64,
        height: f64,
        vertical_velocity: f64,
    ) -> Self {
        Self {
            cylindrical_radius,
            radial_velocity,
            tangential_velocity,
            height,
            vertical_velocity,
            azimuth: None,
        }
    }

    /// Build a sample carrying an azimuth, enabling angle variables.
    pub fn with_azimuth(
        cylindrical_radius: f64,
        radial_velocity: f64,
        tangential_velocity: f64,
        height: f64,
        vertical_velocity: f64,
        azimuth: Radian,
    ) -> Self {
        Self {
            cylindrical_radius,
            radial_velocity,
            tangential_velocity,
            height,
            vertical_velocity,
            azimuth: Some(azimuth),
        }
    }

    /// Promote six parallel coordinate slices into a batch of samples.
    ///
    /// Arguments
    /// -----------------
    /// * `cylindrical_radius`, `radial_velocity`, `tangential_velocity`, `height`,
    ///   `vertical_velocity`: coordinate arrays of equal length.
    /// * `azimuth`: optional azimuth array; when present it must have the same length
    ///   as the others.
    ///
    /// Return
    /// ----------
    /// * A `Vec<OrbitSample>` in input order, or
    ///   [`TorusError::InvalidParameter`](crate::torus_errors::TorusError::InvalidParameter)
    ///   on a length mismatch.
    pub fn from_slices(
        cylindrical_radius: &[f64],
        radial_velocity: &[f64],
        tangential_velocity: &[f64],
        height: &[f64],
        vertical_velocity: &[f64],
        azimuth: Option<&[f64]>,
    ) -> Result<Vec<OrbitSample>, TorusError> {
        let n = cylindrical_radius.len();
        if radial_velocity.len() != n
            || tangential_velocity.len() != n
            || height.len() != n
            || vertical_velocity.len() != n
        {
            return Err(TorusError::InvalidParameter(
                "coordinate slices must have equal lengths".into(),
            ));
        }
        if let Some(phi) = azimuth {
            if phi.len() != n {
                return Err(TorusError::InvalidParameter(
                    "azimuth slice must match the coordinate slice length".into(),
                ));
            }
            Ok(izip!(
                cylindrical_radius,
                radial_velocity,
                tangential_velocity,
                height,
                vertical_velocity,
                phi
            )
            .map(|(&r, &vr, &vt, &z, &vz, &p)| OrbitSample::with_azimuth(r, vr, vt, z, vz, p))
            .collect())
        } else {
            Ok(izip!(
                cylindrical_radius,
                radial_velocity,
                tangential_velocity,
                height,
                vertical_velocity
            )
            .map(|(&r, &vr, &vt, &z, &vz)| OrbitSample::new(r, vr, vt, z, vz))
            .collect())
        }
    }
}

/// Spherical dynamical invariants of one sample.
///
/// `l` and `energy` include the anisotropy shift when one is applied; `l2` keeps the
/// **unshifted** squared angular momentum, which the vertical-extent geometry uses, and
/// `vt` keeps the unshifted tangential speed entering the shift itself.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SphericalState {
    pub r: f64,
    pub vr: f64,
    pub vt: f64,
    pub vtheta: f64,
    pub lz: f64,
    pub l2: f64,
    pub l: f64,
    pub energy: f64,
}

impl SphericalState {
    /// Reduce a sample to its spherical invariants.
    ///
    /// With a nonzero coupling `gamma` and an externally supplied vertical action, the
    /// angular momentum is shifted first and the energy is then re-derived against the
    /// shifted momentum: `L ← L + γ·Jz`, `E ← E + L²/(2r²) - vt²/2`. Garbage inputs are
    /// not screened here; non-finite invariants surface in the turning-point search.
    pub(crate) fn reduce<P: SphericalPotential>(
        sample: &OrbitSample,
        potential: &P,
        gamma: f64,
        extra_vertical_action: Option<f64>,
    ) -> Self {
        let position = Vector3::new(sample.cylindrical_radius, 0., sample.height);
        let velocity = Vector3::new(
            sample.radial_velocity,
            sample.tangential_velocity,
            sample.vertical_velocity,
        );
        let momentum = position.cross(&velocity);

        let r = position.norm();
        let vr = position.dot(&velocity) / r;
        let vtheta = momentum.y / r;
        let l2 = momentum.norm_squared();
        let mut l = momentum.norm();
        let vt = l / r;
        let mut energy = potential.value(r) + 0.5 * velocity.norm_squared();

        if gamma != 0. {
            if let Some(jz) = extra_vertical_action {
                l += gamma * jz;
                energy += l * l / (2. * r * r) - vt * vt / 2.;
            }
        }

        Self {
            r,
            vr,
            vt,
            vtheta,
            lz: momentum.z,
            l2,
            l,
            energy,
        }
    }
}

#[cfg(test)]
mod phase_space_test {
    use super::*;
    use crate::potential::PointMass;
    use approx::assert_relative_eq;

    // ---------- reduction formulas ----------

    #[test]
    fn planar_sample_reduces_to_textbook_invariants() {
        let pot = PointMass::default();
        let sample = OrbitSample::new(1.0, 0.3, 0.8, 0.0, 0.0);
        let state = SphericalState::reduce(&sample, &pot, 0.0, None);

        assert_eq!(state.r, 1.0);
        assert_eq!(state.vr, 0.3);
        assert_eq!(state.lz, 0.8);
        assert_eq!(state.l, 0.8);
        assert_eq!(state.vtheta, 0.0);
        assert_relative_eq!(state.energy, -1.0 + 0.5 * (0.09 + 0.64), epsilon = 1e-15);
    }

    #[test]
    fn inclined_sample_reduces_through_the_cross_product() {
        let pot = PointMass::default();
        let sample = OrbitSample::new(0.8, 0.2, 0.9, 0.6, -0.1);
        let state = SphericalState::reduce(&sample, &pot, 0.0, None);

        assert_relative_eq!(state.r, 1.0, epsilon = 1e-15);
        // vr = (R·vR + z·vz)/r, Lz = R·vT, vtheta = (z·vR - R·vz)/r
        assert_relative_eq!(state.vr, 0.10, epsilon = 1e-15);
        assert_relative_eq!(state.lz, 0.72, epsilon = 1e-15);
        assert_relative_eq!(state.vtheta, 0.20, epsilon = 1e-15);
        assert_relative_eq!(state.l, 0.85_f64.sqrt(), epsilon = 1e-15);
        assert_relative_eq!(state.energy, -1.0 + 0.5 * 0.86, epsilon = 1e-14);
    }

    #[test]
    fn anisotropy_shift_rederives_energy_against_shifted_momentum() {
        let pot = PointMass::default();
        let sample = OrbitSample::new(0.8, 0.2, 0.9, 0.6, -0.1);
        let plain = SphericalState::reduce(&sample, &pot, 0.0, None);
        let shifted = SphericalState::reduce(&sample, &pot, 0.5, Some(0.1));

        let l_expected = plain.l + 0.5 * 0.1;
        assert_relative_eq!(shifted.l, l_expected, epsilon = 1e-15);
        assert_relative_eq!(
            shifted.energy,
            plain.energy + l_expected * l_expected / (2. * plain.r * plain.r)
                - plain.vt * plain.vt / 2.,
            epsilon = 1e-14
        );
        // The unshifted quantities survive for the vertical-extent geometry.
        assert_eq!(shifted.l2, plain.l2);
        assert_eq!(shifted.vt, plain.vt);
    }

    #[test]
    fn shift_without_vertical_action_is_a_no_op() {
        let pot = PointMass::default();
        let sample = OrbitSample::new(1.0, 0.3, 0.8, 0.0, 0.0);
        assert_eq!(
            SphericalState::reduce(&sample, &pot, 0.5, None),
            SphericalState::reduce(&sample, &pot, 0.0, None)
        );
    }

    // ---------- batch promotion ----------

    #[test]
    fn from_slices_zips_in_order_and_carries_azimuths() {
        let batch = OrbitSample::from_slices(
            &[1.0, 1.1],
            &[0.0, 0.1],
            &[1.0, 0.9],
            &[0.0, 0.2],
            &[0.0, -0.1],
            Some(&[0.5, 1.5]),
        )
        .expect("matching lengths");
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].cylindrical_radius, 1.0);
        assert_eq!(batch[1].tangential_velocity, 0.9);
        assert_eq!(batch[1].azimuth, Some(1.5));
    }

    #[test]
    fn from_slices_rejects_length_mismatches() {
        let err = OrbitSample::from_slices(
            &[1.0, 2.0],
            &[0.0],
            &[1.0, 1.0],
            &[0.0, 0.0],
            &[0.0, 0.0],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, TorusError::InvalidParameter(_)));

        let err =
            OrbitSample::from_slices(&[1.0], &[0.0], &[1.0], &[0.0], &[0.0], Some(&[0.1, 0.2]))
                .unwrap_err();
        assert!(matches!(err, TorusError::InvalidParameter(_)));
    }

    // ---------- angle normalization ----------

    #[test]
    fn principal_angle_wraps_into_zero_two_pi() {
        assert_relative_eq!(principal_angle(-0.5), DPI - 0.5, epsilon = 1e-15);
        assert_relative_eq!(principal_angle(DPI + 0.25), 0.25, epsilon = 1e-15);
        assert_eq!(principal_angle(0.0), 0.0);
    }
}
