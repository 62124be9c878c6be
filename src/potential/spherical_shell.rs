//! # Homogeneous thin-shell potential
//!
//! Infinitesimally thin spherical shell of mass `amp` at radius `r0`: constant
//! potential (zero force) inside the shell, Keplerian outside. Useful for exercising
//! orbits that cross a force-free core.

use super::SphericalPotential;

/// Thin shell of mass `amp` at radius `r0`.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalShell {
    /// Shell mass, `G·M` in natural units.
    pub amp: f64,
    /// Shell radius.
    pub r0: f64,
}

impl SphericalShell {
    pub fn new(amp: f64, r0: f64) -> Self {
        Self { amp, r0 }
    }
}

impl SphericalPotential for SphericalShell {
    fn value(&self, r: f64) -> f64 {
        if r <= self.r0 {
            -self.amp / self.r0
        } else {
            -self.amp / r
        }
    }

    fn radial_force(&self, r: f64) -> f64 {
        if r <= self.r0 {
            0.
        } else {
            -self.amp / (r * r)
        }
    }

    fn second_derivative(&self, r: f64) -> f64 {
        if r <= self.r0 {
            0.
        } else {
            -2. * self.amp / (r * r * r)
        }
    }
}
