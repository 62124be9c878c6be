//! # Hénon isochrone potential
//!
//! `Φ(r) = -amp/(b + sqrt(b² + r²))` with scale radius `b`. This is the most general
//! spherical potential whose actions and frequencies are known in closed form:
//!
//! - `Jr = amp/sqrt(-2E) - (L + sqrt(L² + 4·amp·b))/2`
//! - `Or = (-2E)^(3/2)/amp`
//! - `Op = Or·(1 + L/sqrt(L² + 4·amp·b))/2`
//!
//! making it the reference oracle for non-degenerate orbits (unlike the point mass,
//! `Or ≠ Op` whenever `b > 0`). At `b = 0` it reduces to the Keplerian point mass, and
//! for `r ≪ b` it approaches a harmonic core.

use super::SphericalPotential;

/// Isochrone sphere of amplitude `amp` and scale radius `b`.
#[derive(Debug, Clone, PartialEq)]
pub struct Isochrone {
    /// Total mass, `G·M` in natural units.
    pub amp: f64,
    /// Scale radius; `b = 0` degenerates to the point mass.
    pub b: f64,
}

impl Isochrone {
    pub fn new(amp: f64, b: f64) -> Self {
        Self { amp, b }
    }

    /// `sqrt(b² + r²)`, the auxiliary radius entering all derivatives.
    fn aux(&self, r: f64) -> f64 {
        (self.b * self.b + r * r).sqrt()
    }
}

impl SphericalPotential for Isochrone {
    fn value(&self, r: f64) -> f64 {
        -self.amp / (self.b + self.aux(r))
    }

    fn radial_force(&self, r: f64) -> f64 {
        let s = self.aux(r);
        let bs = self.b + s;
        -self.amp * r / (s * bs * bs)
    }

    fn second_derivative(&self, r: f64) -> f64 {
        // d²Φ/dr² = amp·(s²(b + s) - r²(b + 3s)) / (s³(b + s)³)
        let s = self.aux(r);
        let bs = self.b + s;
        self.amp * (s * s * bs - r * r * (self.b + 3. * s)) / (s * s * s * bs * bs * bs)
    }
}
