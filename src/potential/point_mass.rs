//! # Keplerian point-mass potential
//!
//! `Φ(r) = -amp/r`, the potential of a point mass `amp` (in units where `G = 1`).
//! Every bound orbit is a closed ellipse, so the radial and azimuthal frequencies
//! coincide and the actions have closed forms, which makes this the primary oracle
//! for the quadrature machinery.

use super::SphericalPotential;

/// Point mass of amplitude `amp` at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMass {
    /// Mass of the central body, `G·M` in natural units.
    pub amp: f64,
}

impl PointMass {
    pub fn new(amp: f64) -> Self {
        Self { amp }
    }
}

impl Default for PointMass {
    /// Unit mass: `vc = 1` at `r = 1`.
    fn default() -> Self {
        Self { amp: 1.0 }
    }
}

impl SphericalPotential for PointMass {
    fn value(&self, r: f64) -> f64 {
        -self.amp / r
    }

    fn radial_force(&self, r: f64) -> f64 {
        -self.amp / (r * r)
    }

    fn second_derivative(&self, r: f64) -> f64 {
        -2. * self.amp / (r * r * r)
    }
}
