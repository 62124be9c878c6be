//! # Action-angle outputs
//!
//! This module defines the typed outputs of the spherical action-angle solver:
//! [`Actions`], [`Frequencies`], [`Angles`] and [`OrbitExtents`].
//!
//! ## Conventions
//!
//! - **Actions** follow the spherical-potential conventions: the azimuthal action is
//!   the signed `z` angular momentum `Lz`, the vertical action is `L - |Lz|`, and the
//!   radial action is the phase-space area enclosed by one radial oscillation divided
//!   by `2π`. Radial and vertical actions are non-negative for bound orbits.
//! - **Frequencies** are derivatives of the Hamiltonian with respect to the actions.
//!   The azimuthal frequency carries the sign of the tangential velocity; the vertical
//!   frequency is its unsigned magnitude, since the orbital plane of a spherical
//!   potential does not precess.
//! - **Angles** are reduced to `[0, 2π)`.
//!
//! All quantities are expressed in the same natural unit system as the potential
//! (`G = 1`); frequencies are inverse dynamical times.
//!
//! ## See also
//!
//! - [`SphericalActionAngle`](crate::action_angle::spherical::SphericalActionAngle) –
//!   The solver producing these values.
//! - [`TorusParams`](crate::action_angle::TorusParams) – Quadrature configuration
//!   controlling their accuracy.

use std::fmt;

use crate::constants::Radian;

/// The three actions of an orbit in a spherically symmetric potential.
///
/// Fields
/// ---------
/// * `radial` – Radial action `J_r`, non-negative for a bound orbit and zero on a
///   circular one.
/// * `azimuthal` – Azimuthal action `J_φ = L_z`, signed; negative on retrograde
///   orbits.
/// * `vertical` – Vertical action `J_z = L - |L_z|`, non-negative; zero for orbits
///   confined to the equatorial plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actions {
    pub radial: f64,
    pub azimuthal: f64,
    pub vertical: f64,
}

/// The three orbital frequencies conjugate to [`Actions`].
///
/// Fields
/// ---------
/// * `radial` – Radial frequency `Ω_r`, the rate of the radial oscillation.
/// * `azimuthal` – Azimuthal frequency `Ω_φ`, signed like the tangential velocity.
/// * `vertical` – Vertical frequency `Ω_z`, the unsigned azimuthal frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequencies {
    pub radial: f64,
    pub azimuthal: f64,
    pub vertical: f64,
}

/// The three orbital angles conjugate to [`Actions`], each in `[0, 2π)`.
///
/// Fields
/// ---------
/// * `radial` – Radial angle `θ_r`, zero at pericenter and growing at `Ω_r`.
/// * `azimuthal` – Azimuthal angle `θ_φ`, measured from the ascending node
///   convention of the solver.
/// * `vertical` – Vertical angle `θ_z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angles {
    pub radial: Radian,
    pub azimuthal: Radian,
    pub vertical: Radian,
}

/// Radial and vertical extent of an orbit.
///
/// Fields
/// ---------
/// * `eccentricity` – `(rap - rperi) / (rap + rperi)`, in `[0, 1]` for bound orbits;
///   `1` for an orbit passing through the center.
/// * `zmax` – Maximum height above the equatorial plane, `rap · √(1 - L_z²/L²)`. For a
///   purely radial orbit (`L = 0`) the inclination is undefined and this is NaN.
/// * `rperi` – Pericenter radius.
/// * `rap` – Apocenter radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitExtents {
    pub eccentricity: f64,
    pub zmax: f64,
    pub rperi: f64,
    pub rap: f64,
}

impl fmt::Display for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Actions")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(f, "  J_r   (radial action)       = {:.6}", self.radial)?;
        writeln!(f, "  J_phi (azimuthal action)    = {:.6}", self.azimuthal)?;
        writeln!(f, "  J_z   (vertical action)     = {:.6}", self.vertical)
    }
}

impl fmt::Display for Frequencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frequencies")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(f, "  O_r   (radial frequency)    = {:.6}", self.radial)?;
        writeln!(f, "  O_phi (azimuthal frequency) = {:.6}", self.azimuthal)?;
        writeln!(f, "  O_z   (vertical frequency)  = {:.6}", self.vertical)
    }
}

impl fmt::Display for Angles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rad_to_deg = 180.0 / std::f64::consts::PI;
        writeln!(f, "Angles")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  theta_r   (radial angle)    = {:.6} rad ({:.6}°)",
            self.radial,
            self.radial * rad_to_deg
        )?;
        writeln!(
            f,
            "  theta_phi (azimuthal angle) = {:.6} rad ({:.6}°)",
            self.azimuthal,
            self.azimuthal * rad_to_deg
        )?;
        writeln!(
            f,
            "  theta_z   (vertical angle)  = {:.6} rad ({:.6}°)",
            self.vertical,
            self.vertical * rad_to_deg
        )
    }
}

impl fmt::Display for OrbitExtents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Orbit Extents")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(f, "  e     (eccentricity)        = {:.6}", self.eccentricity)?;
        writeln!(f, "  zmax  (maximum height)      = {:.6}", self.zmax)?;
        writeln!(f, "  rperi (pericenter radius)   = {:.6}", self.rperi)?;
        writeln!(f, "  rap   (apocenter radius)    = {:.6}", self.rap)
    }
}
