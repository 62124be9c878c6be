//! # Spherically symmetric potentials
//!
//! This module defines the [`SphericalPotential`](crate::potential::SphericalPotential) trait,
//! the contract between the action-angle machinery and any **spherically symmetric
//! gravitational potential** reduced to a function of radius alone, together with a small
//! set of analytic reference potentials:
//!
//! - [`point_mass`](crate::potential::point_mass) — Keplerian potential `Φ(r) = -amp/r`,
//!   the fully degenerate reference case with closed-form actions.
//! - [`isochrone`](crate::potential::isochrone) — Hénon isochrone
//!   `Φ(r) = -amp/(b + sqrt(b² + r²))`, the most general potential with closed-form
//!   actions and frequencies.
//! - [`spherical_shell`](crate::potential::spherical_shell) — thin homogeneous shell,
//!   flat (force-free) inside its radius.
//!
//! ## Contract
//!
//! Implementors supply the potential value `Φ(r)`, the radial force `-dΦ/dr`, and the
//! second derivative `d²Φ/dr²`. Circular velocity, circular frequency and epicyclic
//! frequency have default implementations derived from those three, so the whole family
//! is mutually consistent by construction. All methods must return finite values for
//! every `r > 0`.
//!
//! ## Units
//!
//! Natural units of the potential itself: pick `amp` and length scales so that the
//! circular velocity is 1 at the reference radius, and every derived action, frequency
//! and angle comes out in the matching units.

/// Keplerian point-mass potential.
pub mod point_mass;

/// Hénon isochrone potential.
pub mod isochrone;

/// Homogeneous thin-shell potential.
pub mod spherical_shell;

pub use isochrone::Isochrone;
pub use point_mass::PointMass;
pub use spherical_shell::SphericalShell;

/// A spherically symmetric gravitational potential reduced to a function of radius.
///
/// The three required methods fix the radial profile; the provided methods derive the
/// circular-orbit quantities from it. Overriding a provided method is allowed for
/// potentials with cheaper closed forms, but the override must agree with the derived
/// value since turning-point classification compares velocities against
/// [`circular_velocity`](SphericalPotential::circular_velocity).
///
/// Sign convention
/// ---------------
/// * `value` is the potential `Φ(r)`, negative for attractive potentials with the usual
///   zero at infinity.
/// * `radial_force` is `-dΦ/dr`, i.e. negative (inward) everywhere for attractive
///   potentials.
pub trait SphericalPotential {
    /// Potential value `Φ(r)`.
    fn value(&self, r: f64) -> f64;

    /// Radial force per unit mass, `-dΦ/dr`.
    fn radial_force(&self, r: f64) -> f64;

    /// Second radial derivative `d²Φ/dr²`.
    fn second_derivative(&self, r: f64) -> f64;

    /// Circular velocity `vc(r) = sqrt(-r · radial_force(r))`.
    fn circular_velocity(&self, r: f64) -> f64 {
        (-r * self.radial_force(r)).sqrt()
    }

    /// Circular angular frequency `Ωc(r) = vc(r)/r`.
    fn circular_frequency(&self, r: f64) -> f64 {
        self.circular_velocity(r) / r
    }

    /// Epicyclic frequency `κ(r) = sqrt(d²Φ/dr² - 3·radial_force(r)/r)`.
    ///
    /// This is the frequency of small radial oscillations around the circular orbit at
    /// `r`, used as the radial frequency of near-circular orbits.
    fn epicyclic_frequency(&self, r: f64) -> f64 {
        (self.second_derivative(r) - 3. * self.radial_force(r) / r).sqrt()
    }
}

#[cfg(test)]
mod potential_test {
    use super::*;
    use approx::assert_relative_eq;

    // ---------- derived quantities agree with closed forms ----------

    #[test]
    fn point_mass_circular_quantities_at_unit_radius() {
        let pot = PointMass::default();
        assert_relative_eq!(pot.circular_velocity(1.0), 1.0, epsilon = 1e-15);
        assert_relative_eq!(pot.circular_frequency(1.0), 1.0, epsilon = 1e-15);
        assert_relative_eq!(pot.epicyclic_frequency(1.0), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn point_mass_keplerian_scaling() {
        // vc ∝ r^(-1/2), Ωc ∝ r^(-3/2), κ = Ωc for a point mass.
        let pot = PointMass::new(1.0);
        for &r in &[0.3, 1.0, 2.5, 10.0] {
            assert_relative_eq!(pot.circular_velocity(r), r.powf(-0.5), epsilon = 1e-14);
            assert_relative_eq!(pot.circular_frequency(r), r.powf(-1.5), epsilon = 1e-14);
            assert_relative_eq!(
                pot.epicyclic_frequency(r),
                pot.circular_frequency(r),
                epsilon = 1e-13
            );
        }
    }

    #[test]
    fn isochrone_reduces_to_point_mass_at_zero_scale() {
        let iso = Isochrone::new(1.0, 0.0);
        let kep = PointMass::new(1.0);
        for &r in &[0.5, 1.0, 3.0] {
            assert_relative_eq!(iso.value(r), kep.value(r), epsilon = 1e-14);
            assert_relative_eq!(iso.radial_force(r), kep.radial_force(r), epsilon = 1e-14);
            assert_relative_eq!(
                iso.second_derivative(r),
                kep.second_derivative(r),
                epsilon = 1e-13
            );
        }
    }

    #[test]
    fn isochrone_second_derivative_matches_finite_difference() {
        let iso = Isochrone::new(1.3, 0.7);
        let h = 1e-5;
        for &r in &[0.4, 1.0, 2.0, 6.0] {
            let num = (iso.value(r + h) - 2. * iso.value(r) + iso.value(r - h)) / (h * h);
            assert_relative_eq!(iso.second_derivative(r), num, max_relative = 1e-5);
        }
    }

    #[test]
    fn shell_is_force_free_inside_and_keplerian_outside() {
        let shell = SphericalShell::new(1.0, 2.0);
        assert_eq!(shell.radial_force(1.0), 0.0);
        assert_eq!(shell.value(0.5), shell.value(1.9));
        let kep = PointMass::new(1.0);
        assert_relative_eq!(shell.value(3.0), kep.value(3.0), epsilon = 1e-15);
        assert_relative_eq!(shell.radial_force(3.0), kep.radial_force(3.0), epsilon = 1e-15);
    }
}
