/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::cartesian::Cartesian;
use super::{ElementSet, ElementSetId};
use crate::frames::InertialFrame;
use crate::math::angles::{between_0_two_pi, clamped_acos};
use crate::math::{Vector3, Vector6};
use core::f64::consts::{PI, TAU};
use core::fmt;
use core::ops::{Add, Div, Mul, Sub};
use log::warn;

/// Magnitudes below this are treated as exactly zero when classifying
/// circular and planar orbits in the conversions.
pub const SINGULARITY_TOL: f64 = 1e-10;

/// Classical Keplerian elements (a, e, i, Ω, ω, ν), angles in radians.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Keplerian {
    pub sma_km: f64,
    pub ecc: f64,
    pub inc_rad: f64,
    pub raan_rad: f64,
    pub aop_rad: f64,
    pub ta_rad: f64,
}

impl Keplerian {
    pub fn new(
        sma_km: f64,
        ecc: f64,
        inc_rad: f64,
        raan_rad: f64,
        aop_rad: f64,
        ta_rad: f64,
    ) -> Self {
        Self {
            sma_km,
            ecc,
            inc_rad,
            raan_rad,
            aop_rad,
            ta_rad,
        }
    }

    /// Semi-latus rectum in km.
    pub fn semilatus_km(&self) -> f64 {
        self.sma_km * (1.0 - self.ecc * self.ecc)
    }

    /// Radius of periapsis in km.
    pub fn periapsis_km(&self) -> f64 {
        self.sma_km * (1.0 - self.ecc)
    }

    /// Radius of apoapsis in km.
    pub fn apoapsis_km(&self) -> f64 {
        self.sma_km * (1.0 + self.ecc)
    }

    /// Orbital period in seconds for a bound orbit about the provided µ.
    pub fn period_s(&self, mu_km3_s2: f64) -> f64 {
        TAU * (self.sma_km.powi(3) / mu_km3_s2).sqrt()
    }

    /// Mean motion in rad/s.
    pub fn mean_motion_rad_s(&self, mu_km3_s2: f64) -> f64 {
        (mu_km3_s2 / self.sma_km.powi(3)).sqrt()
    }

    /// Specific angular momentum magnitude in km²/s.
    pub fn h_km2_s(&self, mu_km3_s2: f64) -> f64 {
        (mu_km3_s2 * self.semilatus_km()).sqrt()
    }

    /// Converts a Cartesian state into Keplerian elements.
    ///
    /// Rounding errors are assumed to be behind any out-of-domain inverse
    /// cosines, near-antipodal angles, and eccentricities within
    /// [SINGULARITY_TOL] of zero: those all collapse to exactly zero so that
    /// the ill-defined companion angles stay put instead of flailing as the
    /// state drifts. Quadrants follow the sign of the orbit normal's z
    /// component, the nodal line, and r·v. No input produces NaN.
    pub fn from_cartesian<F: InertialFrame>(cartesian: &Cartesian<F>, mu_km3_s2: f64) -> Self {
        let r = *cartesian.radius_km.as_vector();
        let v = *cartesian.velocity_km_s.as_vector();

        let rmag = r.norm();
        let vmag = v.norm();

        // Specific relative angular momentum
        let h = r.cross(&v);
        let hmag = h.norm();

        // Nodal line n = ẑ × h
        let n = Vector3::new(-h.y, h.x, 0.0);
        let nmag = n.norm();

        // Semimajor axis
        let sma_km = 1.0 / (2.0 / rmag - vmag * vmag / mu_km3_s2);

        // Eccentricity vector
        let dot_rv = r.dot(&v);
        let evec = ((vmag * vmag - mu_km3_s2 / rmag) * r - dot_rv * v) / mu_km3_s2;
        let mut ecc = evec.norm();
        // A tiny eccentricity makes ω and ν flail as the state drifts; force
        // it to exactly zero and use the circular fallbacks below.
        if ecc < SINGULARITY_TOL {
            ecc = 0.0;
        }

        // Inclination
        let mut inc_rad = clamped_acos(h.z / hmag);
        if inc_rad.is_nan() || (inc_rad - PI).abs() < SINGULARITY_TOL {
            inc_rad = 0.0;
        }

        // Right ascension of the ascending node
        let acos_n = clamped_acos(n.x / nmag);
        let mut raan_rad = if n.y > 0.0 { acos_n } else { TAU - acos_n };
        if nmag == 0.0 || raan_rad.is_nan() || (raan_rad - TAU).abs() < SINGULARITY_TOL {
            raan_rad = 0.0;
        }

        // True anomaly
        let mut ta_rad = if ecc == 0.0 {
            if inc_rad == 0.0 {
                // No eccentricity vector and no nodal line: true longitude
                if v.x <= 0.0 {
                    clamped_acos(r.x / rmag)
                } else {
                    TAU - clamped_acos(r.x / rmag)
                }
            } else {
                // Argument of latitude from the nodal line
                let dot_nr = n.x * r.x + n.y * r.y;
                if r.z >= 0.0 {
                    clamped_acos(dot_nr / (nmag * rmag))
                } else {
                    TAU - clamped_acos(dot_nr / (nmag * rmag))
                }
            }
        } else {
            let dot_er = evec.dot(&r);
            if dot_rv >= 0.0 {
                clamped_acos(dot_er / (ecc * rmag))
            } else {
                TAU - clamped_acos(dot_er / (ecc * rmag))
            }
        };
        if ta_rad.is_nan() || (ta_rad - TAU).abs() < SINGULARITY_TOL {
            ta_rad = 0.0;
        }

        // Argument of periapsis
        let mut aop_rad = if ecc == 0.0 {
            // Ill-defined for a circular orbit
            0.0
        } else if inc_rad == 0.0 {
            // No nodal line: measure from the x axis along the eccentricity
            // vector, direct or supplementary by the orbit normal
            if h.z > 0.0 {
                between_0_two_pi(evec.y.atan2(evec.x))
            } else {
                between_0_two_pi(TAU - evec.y.atan2(evec.x))
            }
        } else {
            let dot_en = evec.x * n.x + evec.y * n.y;
            if evec.z < 0.0 {
                TAU - clamped_acos(dot_en / (ecc * nmag))
            } else {
                clamped_acos(dot_en / (ecc * nmag))
            }
        };
        if aop_rad.is_nan() || (aop_rad - TAU).abs() < SINGULARITY_TOL {
            aop_rad = 0.0;
        }

        Self {
            sma_km,
            ecc,
            inc_rad,
            raan_rad,
            aop_rad,
            ta_rad,
        }
    }

    /// Converts Keplerian elements into a Cartesian state through the
    /// perifocal rotation by ω, i, Ω.
    ///
    /// The algorithm is GMAT's `StateConversionUtil::ComputeKeplToCart`; the
    /// state is defined in Cartesian coordinates as they are always
    /// non-singular, at the cost of rounding errors on the order of 1e-12.
    pub fn to_cartesian<F: InertialFrame>(&self, mu_km3_s2: f64) -> Cartesian<F> {
        if mu_km3_s2.abs() < f64::EPSILON {
            warn!("GM is near zero ({mu_km3_s2} km^3/s^2): expect rounding errors!");
        }

        let p = self.semilatus_km();
        let radius = p / (1.0 + self.ecc * self.ta_rad.cos());

        let (sin_aop_ta, cos_aop_ta) = (self.aop_rad + self.ta_rad).sin_cos();
        let (sin_inc, cos_inc) = self.inc_rad.sin_cos();
        let (sin_raan, cos_raan) = self.raan_rad.sin_cos();
        let (sin_aop, cos_aop) = self.aop_rad.sin_cos();

        let x = radius * (cos_aop_ta * cos_raan - cos_inc * sin_aop_ta * sin_raan);
        let y = radius * (cos_aop_ta * sin_raan + cos_inc * sin_aop_ta * cos_raan);
        let z = radius * sin_aop_ta * sin_inc;

        let sqrt_gm_p = (mu_km3_s2 / p).sqrt();
        let cos_ta_ecc = self.ta_rad.cos() + self.ecc;
        let sin_ta = self.ta_rad.sin();

        let vx = sqrt_gm_p * cos_ta_ecc * (-sin_aop * cos_raan - cos_inc * sin_raan * cos_aop)
            - sqrt_gm_p * sin_ta * (cos_aop * cos_raan - cos_inc * sin_raan * sin_aop);
        let vy = sqrt_gm_p * cos_ta_ecc * (-sin_aop * sin_raan + cos_inc * cos_raan * cos_aop)
            - sqrt_gm_p * sin_ta * (cos_aop * sin_raan + cos_inc * cos_raan * sin_aop);
        let vz = sqrt_gm_p * (cos_ta_ecc * sin_inc * cos_aop - sin_ta * sin_inc * sin_aop);

        Cartesian::new(x, y, z, vx, vy, vz)
    }
}

impl ElementSet for Keplerian {
    const SET_ID: ElementSetId = ElementSetId::Keplerian;
    const ANGLE_COMPONENTS: [bool; 6] = [false, false, true, true, true, true];

    fn to_vector(&self) -> Vector6 {
        Vector6::new(
            self.sma_km,
            self.ecc,
            self.inc_rad,
            self.raan_rad,
            self.aop_rad,
            self.ta_rad,
        )
    }

    fn from_vector(vec: &Vector6) -> Self {
        Self::new(vec[0], vec[1], vec[2], vec[3], vec[4], vec[5])
    }
}

impl Add for Keplerian {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::from_vector(&(self.to_vector() + other.to_vector()))
    }
}

impl Sub for Keplerian {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::from_vector(&(self.to_vector() - other.to_vector()))
    }
}

impl Mul<f64> for Keplerian {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::from_vector(&(self.to_vector() * scalar))
    }
}

impl Div<f64> for Keplerian {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::from_vector(&(self.to_vector() / scalar))
    }
}

impl fmt::Display for Keplerian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sma = {} km\tecc = {}\tinc = {} deg\traan = {} deg\taop = {} deg\tta = {} deg (Keplerian)",
            self.sma_km,
            self.ecc,
            self.inc_rad.to_degrees(),
            self.raan_rad.to_degrees(),
            self.aop_rad.to_degrees(),
            self.ta_rad.to_degrees()
        )
    }
}
