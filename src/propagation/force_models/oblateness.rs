/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::Force;
use crate::elements::Cartesian;
use crate::errors::PhysicsResult;
use crate::frames::{Ecef, Eci};
use crate::math::vectors::AccelVector;
use crate::platforms::Vehicle;
use crate::system::System;
use crate::time::Date;

/// Spherical-harmonic coefficients up to some degree and order, stored
/// unnormalized as consumed by the Legendre recurrence.
#[derive(Clone, Debug, PartialEq)]
pub struct HarmonicCoefficients {
    degree: usize,
    order: usize,
    c: Vec<Vec<f64>>,
    s: Vec<Vec<f64>>,
}

impl HarmonicCoefficients {
    /// Builds from a normalized (n, m, C̄nm, S̄nm) table, the form gravity
    /// field files tabulate. Entries above the requested degree and order
    /// are ignored.
    pub fn from_normalized_table(
        degree: usize,
        order: usize,
        table: &[(usize, usize, f64, f64)],
    ) -> Self {
        let mut coefficients = Self::empty(degree, order);
        for &(n, m, c_bar, s_bar) in table {
            if n > degree || m > order || m > n {
                continue;
            }
            let unnormalize = unnormalization_factor(n, m);
            coefficients.c[n][m] = c_bar * unnormalize;
            coefficients.s[n][m] = s_bar * unnormalize;
        }
        coefficients
    }

    /// Builds a zonal-only field from the central body's J2 and J3, the
    /// default when no coefficient table is supplied.
    pub fn from_zonal(j2: f64, j3: f64) -> Self {
        let mut coefficients = Self::empty(3, 0);
        coefficients.c[2][0] = -j2;
        coefficients.c[3][0] = -j3;
        coefficients
    }

    fn empty(degree: usize, order: usize) -> Self {
        Self {
            degree,
            order,
            c: vec![vec![0.0; degree + 2]; degree + 2],
            s: vec![vec![0.0; degree + 2]; degree + 2],
        }
    }
}

fn coefficient(table: &[Vec<f64>], n: usize, m: usize) -> f64 {
    table
        .get(n)
        .and_then(|row| row.get(m))
        .copied()
        .unwrap_or(0.0)
}

/// Conversion from normalized to unnormalized coefficients:
/// Nnm = sqrt((2 − δ0m)(2n + 1)(n − m)! / (n + m)!)
fn unnormalization_factor(n: usize, m: usize) -> f64 {
    let delta = if m == 0 { 1.0 } else { 2.0 };
    // (n − m)!/(n + m)! as an incremental product to stay in f64 range.
    let mut factorial_ratio = 1.0;
    for k in (n - m + 1)..=(n + m) {
        factorial_ratio /= k as f64;
    }
    (delta * (2.0 * n as f64 + 1.0) * factorial_ratio).sqrt()
}

/// Spherical-harmonic gravity to degree N and order M beyond the central
/// two-body term, via the associated-Legendre recurrence and the Vallado
/// gradient formulation in body-fixed coordinates.
#[derive(Clone, Debug)]
pub struct OblatenessForce {
    degree: usize,
    order: usize,
    coefficients: HarmonicCoefficients,
}

impl OblatenessForce {
    /// Zonal J2/J3 field of the system's central body, truncated to the
    /// requested degree and order.
    pub fn new(sys: &System, degree: usize, order: usize) -> Self {
        let center = sys.get_central_body();
        Self::with_coefficients(
            degree,
            order,
            HarmonicCoefficients::from_zonal(center.j2, center.j3),
        )
    }

    /// Full field from an externally loaded coefficient set.
    pub fn with_coefficients(
        degree: usize,
        order: usize,
        coefficients: HarmonicCoefficients,
    ) -> Self {
        Self {
            degree,
            order,
            coefficients,
        }
    }

    /// Associated Legendre functions P[n][m](sin φ) for all n ≤ degree + 1,
    /// unnormalized, by the standard recurrences.
    fn legendre(&self, sin_phi: f64, cos_phi: f64) -> Vec<Vec<f64>> {
        let size = self.degree + 2;
        let mut p = vec![vec![0.0; size + 1]; size + 1];
        p[0][0] = 1.0;
        if size > 1 {
            p[1][0] = sin_phi;
            p[1][1] = cos_phi;
        }
        for n in 2..=size {
            // Diagonal and sub-diagonal
            p[n][n] = (2.0 * n as f64 - 1.0) * cos_phi * p[n - 1][n - 1];
            p[n][n - 1] = (2.0 * n as f64 - 1.0) * sin_phi * p[n - 1][n - 1];
            // Column recurrence for m < n − 1
            for m in 0..(n - 1) {
                p[n][m] = ((2.0 * n as f64 - 1.0) * sin_phi * p[n - 1][m]
                    - (n + m - 1) as f64 * p[n - 2][m])
                    / ((n - m) as f64);
            }
        }
        p
    }
}

impl Force for OblatenessForce {
    fn name(&self) -> &'static str {
        "oblateness"
    }

    fn compute_force(
        &self,
        date: Date,
        state: &Cartesian<Eci>,
        _vehicle: &Vehicle,
        sys: &System,
    ) -> PhysicsResult<AccelVector<Eci>> {
        let center = sys.get_central_body();
        let mu = center.mu_km3_s2;
        let body_radius_km = center.equatorial_radius_km;

        // Work in the body-fixed frame where the harmonics are defined.
        let r_ecef = Ecef::rotate_into_this_frame(&state.radius_km, date);
        let x = r_ecef.x();
        let y = r_ecef.y();
        let z = r_ecef.z();
        let rmag = r_ecef.norm();
        let r_xy_sq = x * x + y * y;

        let sin_phi = z / rmag;
        let cos_phi = r_xy_sq.sqrt() / rmag;
        let tan_phi = sin_phi / cos_phi.max(1e-300);
        let lambda = y.atan2(x);

        let p = self.legendre(sin_phi, cos_phi);

        // Partial sums of the disturbing potential wrt r, φ, λ.
        let mut du_r = 0.0;
        let mut du_phi = 0.0;
        let mut du_lambda = 0.0;

        let ratio = body_radius_km / rmag;
        let mut ratio_n = ratio * ratio; // (R/r)^n starting at n = 2
        for n in 2..=self.degree {
            for m in 0..=self.order.min(n) {
                let (sin_ml, cos_ml) = (m as f64 * lambda).sin_cos();
                // A requested degree beyond the held coefficients reads zero.
                let c = coefficient(&self.coefficients.c, n, m);
                let s = coefficient(&self.coefficients.s, n, m);
                let trig_cs = c * cos_ml + s * sin_ml;

                du_r += ratio_n * (n + 1) as f64 * p[n][m] * trig_cs;
                du_phi += ratio_n * (p[n][m + 1] - m as f64 * tan_phi * p[n][m]) * trig_cs;
                du_lambda += ratio_n * m as f64 * p[n][m] * (s * cos_ml - c * sin_ml);
            }
            ratio_n *= ratio;
        }

        let du_r = -mu / (rmag * rmag) * du_r;
        let du_phi = mu / rmag * du_phi;
        let du_lambda = mu / rmag * du_lambda;

        // Gradient back to Cartesian body-fixed components (Vallado 8-59).
        // Directly over a pole the φ and λ partials vanish identically, and
        // dividing by x² + y² would manufacture NaNs out of the 0/0.
        let accel_ecef = if r_xy_sq > 1e-12 {
            let common = du_r / rmag - z * du_phi / (rmag * rmag * r_xy_sq.sqrt());
            AccelVector::<Ecef>::new(
                common * x - du_lambda / r_xy_sq * y,
                common * y + du_lambda / r_xy_sq * x,
                du_r / rmag * z + r_xy_sq.sqrt() / (rmag * rmag) * du_phi,
            )
        } else {
            AccelVector::<Ecef>::new(0.0, 0.0, du_r / rmag * z)
        };

        Ok(Ecef::rotate_out_of_this_frame(&accel_ecef, date))
    }
}

#[cfg(test)]
mod ut_oblateness {
    use super::*;
    use crate::elements::OrbitalElements;
    use crate::platforms::Spacecraft;
    use crate::state::State;
    use approx::assert_relative_eq;

    const MU_EARTH: f64 = 398_600.441_8;
    const RE_KM: f64 = 6378.1;
    const J2: f64 = 1_082.63e-6;

    fn vehicle_at(state: Cartesian<Eci>, date: Date) -> Vehicle {
        Vehicle::new(&Spacecraft::new(
            "harmonics",
            State::new(OrbitalElements::Cartesian(state), date),
        ))
    }

    #[test]
    fn test_unnormalization_of_j2() {
        // C̄20 = C20/√5
        assert_relative_eq!(unnormalization_factor(2, 0), 5.0_f64.sqrt());
        let from_table =
            HarmonicCoefficients::from_normalized_table(2, 0, &[(2, 0, -J2 / 5.0_f64.sqrt(), 0.0)]);
        let from_zonal = HarmonicCoefficients::from_zonal(J2, 0.0);
        assert_relative_eq!(from_table.c[2][0], from_zonal.c[2][0], max_relative = 1e-12);
    }

    #[test]
    fn test_j2_equatorial_closed_form() {
        // For a point on the equator, the J2 perturbation is purely radial
        // with magnitude (3/2) J2 µ Re²/r⁴, directed inward.
        let sys = System::earth_moon();
        let date = Date::j2000();
        let r_km = 7000.0;

        // Build an inertial state that lands on the body-fixed x-axis at
        // this date, so the geometry is exactly equatorial.
        let gmst = date.gmst_rad();
        let state = Cartesian::<Eci>::new(
            r_km * gmst.cos(),
            r_km * gmst.sin(),
            0.0,
            0.0,
            0.0,
            0.0,
        );
        let vehicle = vehicle_at(state, date);

        let force = OblatenessForce::new(&sys, 2, 0);
        let accel = force.compute_force(date, &state, &vehicle, &sys).unwrap();

        let expected = 1.5 * J2 * MU_EARTH * RE_KM * RE_KM / r_km.powi(4);
        assert_relative_eq!(accel.norm(), expected, max_relative = 1e-9);
        // Inward: opposite the position vector.
        assert!(accel.dot(&state.radius_km) < 0.0);
    }

    #[test]
    fn test_j2_polar_closed_form() {
        // Over the pole the J2 perturbation is radial with magnitude
        // 3 J2 µ Re²/r⁴, directed outward... i.e. (3/2)·J2·µ·Re²/r⁴·(1−3sin²φ)
        // evaluates to −3 J2 µ Re²/r⁴ radially at φ = 90°.
        let sys = System::earth_moon();
        let date = Date::j2000();
        let r_km = 7000.0;
        let state = Cartesian::<Eci>::new(0.0, 0.0, r_km, 0.0, 0.0, 0.0);
        let vehicle = vehicle_at(state, date);

        let force = OblatenessForce::new(&sys, 2, 0);
        let accel = force.compute_force(date, &state, &vehicle, &sys).unwrap();

        let expected = 3.0 * J2 * MU_EARTH * RE_KM * RE_KM / r_km.powi(4);
        assert_relative_eq!(accel.norm(), expected, max_relative = 1e-6);
        assert!(accel.z() > 0.0);
    }
}
