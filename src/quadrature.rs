//! # Gauss–Legendre quadrature
//!
//! Quadrature backend for the action and angle integrals: classical Gauss–Legendre
//! rules with nodes and weights synthesized by Newton iteration on the Legendre
//! recurrence, plus an **order-escalating adaptive driver** that re-evaluates the rule
//! at increasing order until two consecutive estimates agree to the requested
//! tolerance.
//!
//! The integrands fed through here are already regularized (the turning-point
//! substitution happens in the action-angle assembler), so plain interior-node rules
//! converge fast. Nodes never touch the interval endpoints, which the singular
//! kernels rely on. A zero-width interval integrates to zero.

use std::f64::consts::PI;

/// Quadrature strategy for the singular integrals.
///
/// Variants
/// --------
/// * `Adaptive` — Escalate the Gauss–Legendre order until converged; accurate, cost
///   varies per integrand.
/// * `FixedOrder` — One Gauss–Legendre evaluation at a caller-chosen order;
///   deterministic cost, slightly reduced accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadratureRule {
    Adaptive,
    FixedOrder,
}

/// Legendre polynomial `P_n` and its derivative at `x`, by the three-term recurrence.
fn legendre_polynomial(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }
    let mut p0 = 1.0;
    let mut p1 = x;
    if n == 1 {
        return (p1, 1.0);
    }
    for k in 2..=n {
        let kf = k as f64;
        let pn = ((2.0 * kf - 1.0) * x * p1 - (kf - 1.0) * p0) / kf;
        p0 = p1;
        p1 = pn;
    }
    // Valide uniquement pour |x| < 1, ce que garantissent les nœuds intérieurs
    let dp = (n as f64) * (x * p1 - p0) / (x * x - 1.0);
    (p1, dp)
}

/// Gauss–Legendre nodes and weights of order `n` on `[-1, 1]`.
///
/// Each positive root of `P_n` is found by Newton iteration from the Chebyshev-like
/// initial guess `cos(π(i + 3/4)/(n + 1/2))` and mirrored onto the negative half;
/// weights follow from `w = 2/((1 - x²)·P_n'(x)²)`.
pub fn gauss_legendre(n: usize) -> (Vec<f64>, Vec<f64>) {
    let m = (n + 1) / 2;
    let mut nodes = vec![0.0; n];
    let mut weights = vec![0.0; n];
    for i in 0..m {
        let mut x = f64::cos(PI * (i as f64 + 0.75) / (n as f64 + 0.5));
        for _ in 0..50 {
            let (p, dp) = legendre_polynomial(n, x);
            let dx = -p / dp;
            x += dx;
            if dx.abs() < 1e-14 {
                break;
            }
        }
        let (_, dp) = legendre_polynomial(n, x);
        let w = 2. / ((1. - x * x) * dp * dp);
        nodes[i] = x;
        nodes[n - 1 - i] = -x;
        weights[i] = w;
        weights[n - 1 - i] = w;
    }
    (nodes, weights)
}

/// Integrate `f` over `[a, b]` with one Gauss–Legendre rule of order `n`.
///
/// A zero-width interval integrates to zero without evaluating `f`: the singular
/// kernels are undefined on their anchor radius.
pub fn fixed_quad<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64, n: usize) -> f64 {
    if a == b {
        return 0.;
    }
    let (nodes, weights) = gauss_legendre(n);
    let half_width = 0.5 * (b - a);
    let center = 0.5 * (a + b);
    let sum: f64 = nodes
        .iter()
        .zip(&weights)
        .map(|(&x, &w)| w * f(center + half_width * x))
        .sum();
    half_width * sum
}

/// Integrate `f` over `[a, b]`, escalating the Gauss–Legendre order from 1 to
/// `max_order` until two consecutive estimates differ by less than
/// `max(tol, rtol·|estimate|)`.
///
/// The last estimate is returned even when the escalation runs out of orders; the
/// regularized kernels converge well before that in practice.
pub fn adaptive_quad<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    tol: f64,
    rtol: f64,
    max_order: usize,
) -> f64 {
    let mut val = f64::INFINITY;
    for n in 1..=max_order {
        let new_val = fixed_quad(f, a, b, n);
        let err = (new_val - val).abs();
        val = new_val;
        if err < tol.max(rtol * val.abs()) {
            break;
        }
    }
    val
}
