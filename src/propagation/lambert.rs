/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use crate::constants::MAX_ITERATIONS;
use crate::elements::Cartesian;
use crate::errors::{ConvergenceSnafu, PhysicsResult};
use crate::frames::Eci;
use crate::math::angles::clamped_acos;
use crate::math::vectors::{RadiusVector, VelocityVector};
use core::f64::consts::TAU;
use hifitime::Duration;
use snafu::ensure;

const TOL: f64 = 1.0e-8;

/// Transfer sense for the two-position solver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrbitDirection {
    Prograde,
    Retrograde,
}

/// Stumpff functions C(z) and S(z).
fn evaluate_stumpff(z: f64) -> (f64, f64) {
    if z > 0.0 {
        let sq = z.sqrt();
        ((1.0 - sq.cos()) / z, (sq - sq.sin()) / (sq * sq * sq))
    } else if z < 0.0 {
        let sq = (-z).sqrt();
        ((1.0 - sq.cosh()) / z, (sq.sinh() - sq) / (sq * sq * sq))
    } else {
        (0.5, 1.0 / 6.0)
    }
}

/// Universal-variable propagation of an initial state over `dt` under pure
/// two-body motion. Newton iteration on the universal anomaly, capped at the
/// shared iteration limit.
pub fn propagate_universal(
    state0: &Cartesian<Eci>,
    dt: Duration,
    mu_km3_s2: f64,
) -> PhysicsResult<Cartesian<Eci>> {
    let r0 = state0.radius_km;
    let v0 = state0.velocity_km_s;

    let rmag0 = r0.norm();
    let vmag0 = v0.norm();
    let dt_s = dt.to_seconds();

    let sqrt_mu = mu_km3_s2.sqrt();
    let term_a = r0.dot(&v0) / sqrt_mu;
    let alpha = 2.0 / rmag0 - vmag0 * vmag0 / mu_km3_s2;

    let mut chi_next = sqrt_mu * dt_s * alpha.abs();
    let mut iterations = 0;
    loop {
        let chi = chi_next;
        let chi_sq = chi * chi;
        let z = chi_sq * alpha;

        let (c_z, s_z) = evaluate_stumpff(z);

        let f = term_a * chi_sq * c_z + (1.0 - alpha * rmag0) * chi * chi_sq * s_z
            + rmag0 * chi
            - sqrt_mu * dt_s;
        let df = term_a * chi * (1.0 - alpha * chi_sq * s_z)
            + (1.0 - alpha * rmag0) * chi_sq * c_z
            + rmag0;

        chi_next = chi - f / df;

        let err = ((chi_next - chi) / chi).abs();
        iterations += 1;

        if err <= TOL {
            let f_lagrange = 1.0 - chi_sq / rmag0 * c_z;
            let g_lagrange = dt_s - chi_sq * chi * s_z / sqrt_mu;

            let rf = r0 * f_lagrange + RadiusVector::from_vector(*v0.as_vector() * g_lagrange);
            let rmag_f = rf.norm();

            let fdot = sqrt_mu / (rmag_f * rmag0) * chi * (z * s_z - 1.0);
            let gdot = 1.0 - chi_sq / rmag_f * c_z;
            let vf = VelocityVector::from_vector(*r0.as_vector() * fdot) + v0 * gdot;

            return Ok(Cartesian::from_vectors(rf, vf));
        }
        ensure!(
            iterations < MAX_ITERATIONS,
            ConvergenceSnafu {
                action: "Lambert universal-variable iteration".to_string(),
                iterations,
            }
        );
    }
}

/// Two-position Lambert solver: the velocities at both ends of a transfer
/// from `r0` to `rf` over `dt`, by Newton iteration on the universal
/// variable z (Vallado algorithm 59).
pub fn solve(
    r0: &RadiusVector<Eci>,
    rf: &RadiusVector<Eci>,
    dt: Duration,
    mu_km3_s2: f64,
    direction: OrbitDirection,
) -> PhysicsResult<(VelocityVector<Eci>, VelocityVector<Eci>)> {
    let rmag0 = r0.norm();
    let rmag_f = rf.norm();
    let sqrt_mu = mu_km3_s2.sqrt();
    let dt_s = dt.to_seconds();

    // Transfer angle, with the quadrant chosen by the orbit sense.
    let mut dtheta = clamped_acos(r0.dot(rf) / (rmag0 * rmag_f));
    if r0.x() * rf.y() - r0.y() * rf.x() >= 0.0 {
        if direction == OrbitDirection::Retrograde {
            dtheta = TAU - dtheta;
        }
    } else if direction == OrbitDirection::Prograde {
        dtheta = TAU - dtheta;
    }

    let a_geom = dtheta.sin() * (rmag0 * rmag_f / (1.0 - dtheta.cos())).sqrt();

    let mut z_next = 0.0;
    let mut iterations = 0;
    loop {
        let z: f64 = z_next;

        let (c_z, s_z) = evaluate_stumpff(z);
        let y = rmag0 + rmag_f + a_geom * (z * s_z - 1.0) / c_z.sqrt();

        let f = (y / c_z).powf(1.5) * s_z + a_geom * y.sqrt() - sqrt_mu * dt_s;
        let df = if z == 0.0 {
            2.0_f64.sqrt() / 40.0 * y.powf(1.5) + a_geom / 8.0 * (y.sqrt() + a_geom * (1.0 / (2.0 * y)).sqrt())
        } else {
            (y / c_z).powf(1.5) * (1.0 / (2.0 * z) * (c_z - 3.0 * s_z / (2.0 * c_z))
                + 3.0 * s_z * s_z / (4.0 * c_z))
                + a_geom / 8.0 * (3.0 * s_z / c_z * y.sqrt() + a_geom * (c_z / y).sqrt())
        };

        z_next = z - f / df;

        let err = if z == 0.0 {
            (z_next - z).abs()
        } else {
            ((z_next - z) / z).abs()
        };
        iterations += 1;

        if err <= TOL {
            let f_lagrange = 1.0 - y / rmag0;
            let g_lagrange = a_geom * y.sqrt() / sqrt_mu;
            let gdot = 1.0 - y / rmag_f;
            let inv_g = 1.0 / g_lagrange;

            let v0 = (*rf - *r0 * f_lagrange) * inv_g;
            let vf = (*rf * gdot - *r0) * inv_g;

            return Ok((
                VelocityVector::from_vector(*v0.as_vector()),
                VelocityVector::from_vector(*vf.as_vector()),
            ));
        }
        ensure!(
            iterations < MAX_ITERATIONS,
            ConvergenceSnafu {
                action: "Lambert two-position iteration".to_string(),
                iterations,
            }
        );
    }
}
