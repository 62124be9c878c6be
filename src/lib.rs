pub mod action_angle;
pub mod constants;
pub mod phase_space;
pub mod potential;
pub mod quadrature;
pub mod torus_errors;
pub mod turning_point;
