use std::f64::consts::PI;

use torus::phase_space::{principal_angle, OrbitSample};

/// Shortest angular distance between `a` and `b`, both in radians.
#[inline]
pub fn angle_abs_diff(a: f64, b: f64) -> f64 {
    let tau = 2.0 * PI;
    let mut d = (a - b) % tau;
    if d > PI {
        d -= tau;
    }
    if d < -PI {
        d += tau;
    }
    d.abs()
}

/// Closed-form radial action `1/sqrt(-2E) - L` of a bound Kepler orbit.
pub fn kepler_radial_action(energy: f64, l: f64) -> f64 {
    1. / (-2. * energy).sqrt() - l
}

/// Closed-form radial frequency `(-2E)^(3/2)` of a bound Kepler orbit; the azimuthal
/// frequency of the point-mass potential is identical.
pub fn kepler_radial_frequency(energy: f64) -> f64 {
    (-2. * energy).powf(1.5)
}

/// Planar prograde Kepler sample at true anomaly `nu` on the orbit `(a, e)`.
///
/// The conic relations fix the kinematics with `p = a(1 - e²)`:
/// `r = p/(1 + e cos nu)`, `vr = e sin(nu)/sqrt(p)`, `vt = (1 + e cos nu)/sqrt(p)`.
pub fn kepler_sample(a: f64, e: f64, nu: f64, azimuth: f64) -> OrbitSample {
    let p = a * (1. - e * e);
    let r = p / (1. + e * nu.cos());
    let vr = e * nu.sin() / p.sqrt();
    let vt = (1. + e * nu.cos()) / p.sqrt();
    OrbitSample::with_azimuth(r, vr, vt, 0., 0., azimuth)
}

/// Mean anomaly of the orbit with eccentricity `e` at true anomaly `nu`, in `[0, 2π)`.
pub fn kepler_mean_anomaly(e: f64, nu: f64) -> f64 {
    let denom = 1. + e * nu.cos();
    let ecc_anomaly = f64::atan2((1. - e * e).sqrt() * nu.sin() / denom, (e + nu.cos()) / denom);
    principal_angle(ecc_anomaly - e * ecc_anomaly.sin())
}
