use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use torus::action_angle::{SphericalActionAngle, TorusParams};
use torus::phase_space::OrbitSample;
use torus::potential::{Isochrone, PointMass, SphericalPotential};
use torus::quadrature::QuadratureRule;
use torus::torus_errors::TorusError;

mod common;
use common::{
    angle_abs_diff, kepler_mean_anomaly, kepler_radial_action, kepler_radial_frequency,
    kepler_sample,
};

#[test]
fn kepler_pipeline_recovers_closed_form_actions_and_frequencies() {
    let solver = SphericalActionAngle::new(PointMass::default());
    let params = TorusParams::new();

    for (a, e) in [(1.0, 0.2), (1.2, 1. / 3.), (2.0, 0.5)] {
        let sample = kepler_sample(a, e, 1.0, 0.0);
        let (actions, frequencies) = solver
            .actions_frequencies(&sample, &params)
            .expect("bound orbit");

        let energy = -1. / (2. * a);
        let l = (a * (1. - e * e)).sqrt();
        assert_relative_eq!(
            actions.radial,
            kepler_radial_action(energy, l),
            max_relative = 1e-6
        );
        assert_relative_eq!(actions.azimuthal, l, max_relative = 1e-12);

        let freq = kepler_radial_frequency(energy);
        assert_relative_eq!(frequencies.radial, freq, max_relative = 1e-6);
        assert_relative_eq!(frequencies.azimuthal, freq, max_relative = 1e-6);
        assert_eq!(frequencies.vertical, frequencies.azimuthal);
    }
}

#[test]
fn radial_angle_tracks_the_mean_anomaly_around_the_orbit() {
    let solver = SphericalActionAngle::new(PointMass::default());
    let params = TorusParams::new();
    let (a, e) = (1.2, 1. / 3.);

    for nu in [0.5, 1.5, 2.5, 4.0, 5.5] {
        let sample = kepler_sample(a, e, nu, 0.9);
        let (_, _, angles) = solver
            .actions_frequencies_angles(&sample, &params)
            .expect("bound orbit");
        let expected = kepler_mean_anomaly(e, nu);
        let diff = angle_abs_diff(angles.radial, expected);
        assert!(
            diff <= 1e-6,
            "radial angle drifts from the mean anomaly at nu={nu}: |Δ| = {diff:.3e} \
             (got={:.12}, expected={expected:.12})",
            angles.radial
        );
    }
}

#[test]
fn isochrone_pipeline_matches_the_henon_closed_forms() {
    let amp = 1.0;
    let b = 0.3;
    let solver = SphericalActionAngle::new(Isochrone::new(amp, b));
    let sample = OrbitSample::new(1.1, 0.2, 0.9, 0.0, 0.0);

    let l = 1.1 * 0.9;
    let energy = solver.potential().value(1.1) + 0.5 * (0.2 * 0.2 + 0.9 * 0.9);
    let jr = amp / (-2. * energy).sqrt() - 0.5 * (l + (l * l + 4. * amp * b).sqrt());
    let fr = (-2. * energy).powf(1.5) / amp;
    let fp = fr * 0.5 * (1. + l / (l * l + 4. * amp * b).sqrt());

    let (actions, frequencies) = solver
        .actions_frequencies(&sample, &TorusParams::new())
        .expect("bound orbit");
    assert_relative_eq!(actions.radial, jr, max_relative = 1e-6);
    assert_relative_eq!(frequencies.radial, fr, max_relative = 1e-6);
    assert_relative_eq!(frequencies.azimuthal, fp, max_relative = 1e-6);
}

#[test]
fn orbit_extents_recover_the_keplerian_geometry() {
    let solver = SphericalActionAngle::new(PointMass::default());
    let (a, e) = (1.2, 1. / 3.);

    // nu = 0 sits exactly on the pericenter, the others are generic
    for nu in [0.0, 1.0, 3.0] {
        let extents = solver
            .orbit_extents(&kepler_sample(a, e, nu, 0.0))
            .expect("bound orbit");
        assert_relative_eq!(extents.rperi, a * (1. - e), max_relative = 1e-8);
        assert_relative_eq!(extents.rap, a * (1. + e), max_relative = 1e-8);
        assert_relative_eq!(extents.eccentricity, e, max_relative = 1e-8);
        assert_eq!(extents.zmax, 0.0);
    }
}

#[test]
fn slice_promotion_and_batch_evaluation_isolate_unbound_samples() {
    let solver = SphericalActionAngle::new(PointMass::default());
    let params = TorusParams::new();
    let samples = OrbitSample::from_slices(
        &[1.0, 1.0, 1.0],
        &[0.3, 0.5, 0.0],
        &[1.1, 1.5, 1.0],
        &[0.0; 3],
        &[0.0; 3],
        None,
    )
    .expect("matching lengths");

    let results = solver.actions_frequencies_batch(&samples, &params);
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert_eq!(results[1], Err(TorusError::UnboundOrbit));

    let (actions, frequencies) = results[2].as_ref().expect("bound orbit");
    assert_eq!(actions.radial, 0.0);
    assert_eq!(frequencies.radial, 1.0);
}

#[test]
fn fixed_order_quadrature_tracks_the_adaptive_rule() {
    let solver = SphericalActionAngle::new(PointMass::default());
    let adaptive = TorusParams::new();
    let fixed = TorusParams::builder()
        .quadrature_rule(QuadratureRule::FixedOrder)
        .build()
        .expect("valid parameters");

    let mut rng = StdRng::seed_from_u64(0xDECADE);
    for _ in 0..32 {
        let sample = OrbitSample::new(
            rng.random_range(0.8..1.2),
            rng.random_range(-0.3..0.3),
            rng.random_range(0.8..1.1),
            0.0,
            0.0,
        );
        let coarse = solver.actions(&sample, &fixed).expect("bound orbit");
        let fine = solver.actions(&sample, &adaptive).expect("bound orbit");
        assert_relative_eq!(
            coarse.radial,
            fine.radial,
            epsilon = 1e-9,
            max_relative = 1e-5
        );
        assert!(fine.radial >= -1e-10 && fine.vertical >= -1e-10);
    }
}

#[test]
fn anisotropy_coupling_threads_through_the_public_interface() {
    let plain_solver = SphericalActionAngle::new(PointMass::default());
    let coupled = SphericalActionAngle::with_gamma(PointMass::default(), 0.5);
    assert_eq!(coupled.gamma(), 0.5);

    let params = TorusParams::new();
    let sample = OrbitSample::new(1.0, 0.3, 1.1, 0.0, 0.0);
    let plain = plain_solver.actions(&sample, &params).expect("bound orbit");
    let shifted = coupled
        .actions_with_vertical_action(&sample, 0.2, &params)
        .expect("bound orbit");

    // The momentum shift gamma·Jz lands entirely in the vertical action
    assert_relative_eq!(
        shifted.vertical,
        plain.vertical + 0.1,
        max_relative = 1e-12
    );
    assert_eq!(shifted.azimuthal, plain.azimuthal);
    assert!(shifted.radial > plain.radial);

    let extents = coupled
        .orbit_extents_with_vertical_action(&sample, 0.2)
        .expect("bound orbit");
    assert_eq!(extents.zmax, 0.0);
    assert!(extents.rap > 2.0);
}

#[test]
fn angle_request_without_azimuth_is_rejected() {
    let solver = SphericalActionAngle::new(PointMass::default());
    let sample = OrbitSample::new(1.0, 0.3, 1.1, 0.0, 0.0);
    assert_eq!(
        solver.actions_frequencies_angles(&sample, &TorusParams::new()),
        Err(TorusError::MissingAzimuth)
    );
}
