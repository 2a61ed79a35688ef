/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::keplerian::{Keplerian, SINGULARITY_TOL};
use super::{ElementSet, ElementSetId};
use crate::math::angles::between_0_two_pi;
use crate::math::Vector6;
use core::fmt;
use core::ops::{Add, Div, Mul, Sub};

/// Equinoctial elements (p, f, g, h, k, L): non-singular for circular and for
/// equatorial orbits, with
///
/// - f = e·cos(ω + Ω), g = e·sin(ω + Ω)
/// - h = tan(i/2)·cos Ω, k = tan(i/2)·sin Ω
/// - L = Ω + ω + ν (true longitude)
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Equinoctial {
    pub semilatus_km: f64,
    pub f: f64,
    pub g: f64,
    pub h: f64,
    pub k: f64,
    pub true_longitude_rad: f64,
}

impl Equinoctial {
    pub fn new(
        semilatus_km: f64,
        f: f64,
        g: f64,
        h: f64,
        k: f64,
        true_longitude_rad: f64,
    ) -> Self {
        Self {
            semilatus_km,
            f,
            g,
            h,
            k,
            true_longitude_rad,
        }
    }

    /// Direct algebraic transform from Keplerian elements.
    pub fn from_keplerian(elements: &Keplerian) -> Self {
        let long_peri = elements.aop_rad + elements.raan_rad;
        let half_tan_inc = (elements.inc_rad / 2.0).tan();

        Self {
            semilatus_km: elements.semilatus_km(),
            f: elements.ecc * long_peri.cos(),
            g: elements.ecc * long_peri.sin(),
            h: half_tan_inc * elements.raan_rad.cos(),
            k: half_tan_inc * elements.raan_rad.sin(),
            true_longitude_rad: between_0_two_pi(
                elements.raan_rad + elements.aop_rad + elements.ta_rad,
            ),
        }
    }

    /// Direct algebraic transform back to Keplerian elements.
    ///
    /// For a circular orbit the longitude of periapsis is undefined: ω is set
    /// to zero and ν absorbs the full in-plane angle, matching the
    /// degradation contract of the Cartesian conversion.
    pub fn to_keplerian(&self) -> Keplerian {
        let ecc = (self.f * self.f + self.g * self.g).sqrt();
        let sma_km = self.semilatus_km / (1.0 - ecc * ecc);
        let inc_rad = 2.0 * (self.h * self.h + self.k * self.k).sqrt().atan();

        let raan_rad = if self.h.abs() < SINGULARITY_TOL && self.k.abs() < SINGULARITY_TOL {
            0.0
        } else {
            between_0_two_pi(self.k.atan2(self.h))
        };

        let (aop_rad, ta_rad) = if ecc < SINGULARITY_TOL {
            (
                0.0,
                between_0_two_pi(self.true_longitude_rad - raan_rad),
            )
        } else {
            let long_peri = self.g.atan2(self.f);
            (
                between_0_two_pi(long_peri - raan_rad),
                between_0_two_pi(self.true_longitude_rad - long_peri),
            )
        };

        Keplerian::new(sma_km, ecc, inc_rad, raan_rad, aop_rad, ta_rad)
    }
}

impl ElementSet for Equinoctial {
    const SET_ID: ElementSetId = ElementSetId::Equinoctial;
    const ANGLE_COMPONENTS: [bool; 6] = [false, false, false, false, false, true];

    fn to_vector(&self) -> Vector6 {
        Vector6::new(
            self.semilatus_km,
            self.f,
            self.g,
            self.h,
            self.k,
            self.true_longitude_rad,
        )
    }

    fn from_vector(vec: &Vector6) -> Self {
        Self::new(vec[0], vec[1], vec[2], vec[3], vec[4], vec[5])
    }
}

impl Add for Equinoctial {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::from_vector(&(self.to_vector() + other.to_vector()))
    }
}

impl Sub for Equinoctial {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::from_vector(&(self.to_vector() - other.to_vector()))
    }
}

impl Mul<f64> for Equinoctial {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::from_vector(&(self.to_vector() * scalar))
    }
}

impl Div<f64> for Equinoctial {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::from_vector(&(self.to_vector() / scalar))
    }
}

impl fmt::Display for Equinoctial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}, {}, {}] (Equinoctial)",
            self.semilatus_km,
            self.f,
            self.g,
            self.h,
            self.k,
            self.true_longitude_rad
        )
    }
}
