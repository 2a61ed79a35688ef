/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::{ElementSet, ElementSetId};
use crate::frames::{Eci, InertialFrame};
use crate::math::vectors::{RadiusVector, VelocityVector};
use crate::math::{Vector3, Vector6};
use core::fmt;
use core::ops::{Add, Div, Mul, Sub};

/// Cartesian orbital state: position and velocity in an ICRF-aligned
/// inertial frame, conventionally Earth-centered.
///
/// This is the non-singular representation every conversion routes through.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cartesian<F: InertialFrame = Eci> {
    pub radius_km: RadiusVector<F>,
    pub velocity_km_s: VelocityVector<F>,
}

impl<F: InertialFrame> Default for Cartesian<F> {
    fn default() -> Self {
        Self {
            radius_km: RadiusVector::zeros(),
            velocity_km_s: VelocityVector::zeros(),
        }
    }
}

impl<F: InertialFrame> Cartesian<F> {
    /// **Units:** km, km, km, km/s, km/s, km/s
    pub fn new(x_km: f64, y_km: f64, z_km: f64, vx_km_s: f64, vy_km_s: f64, vz_km_s: f64) -> Self {
        Self {
            radius_km: RadiusVector::new(x_km, y_km, z_km),
            velocity_km_s: VelocityVector::new(vx_km_s, vy_km_s, vz_km_s),
        }
    }

    pub fn from_vectors(radius_km: RadiusVector<F>, velocity_km_s: VelocityVector<F>) -> Self {
        Self {
            radius_km,
            velocity_km_s,
        }
    }

    pub fn x_km(&self) -> f64 {
        self.radius_km.x()
    }

    pub fn y_km(&self) -> f64 {
        self.radius_km.y()
    }

    pub fn z_km(&self) -> f64 {
        self.radius_km.z()
    }

    pub fn vx_km_s(&self) -> f64 {
        self.velocity_km_s.x()
    }

    pub fn vy_km_s(&self) -> f64 {
        self.velocity_km_s.y()
    }

    pub fn vz_km_s(&self) -> f64 {
        self.velocity_km_s.z()
    }

    /// Returns the magnitude of the radius vector in km
    pub fn rmag_km(&self) -> f64 {
        self.radius_km.norm()
    }

    /// Returns the magnitude of the velocity vector in km/s
    pub fn vmag_km_s(&self) -> f64 {
        self.velocity_km_s.norm()
    }

    /// Orbital momentum vector in km²/s, as a raw triple.
    pub fn hvec(&self) -> Vector3 {
        self.radius_km.as_vector().cross(self.velocity_km_s.as_vector())
    }

    /// Specific mechanical energy in km²/s².
    pub fn energy_km2_s2(&self, mu_km3_s2: f64) -> f64 {
        self.vmag_km_s().powi(2) / 2.0 - mu_km3_s2 / self.rmag_km()
    }

    /// Relabels the frame parameter; the caller asserts the axes agree.
    pub fn force_frame<F2: InertialFrame>(&self) -> Cartesian<F2> {
        Cartesian {
            radius_km: self.radius_km.force_frame(),
            velocity_km_s: self.velocity_km_s.force_frame(),
        }
    }
}

impl<F: InertialFrame> ElementSet for Cartesian<F> {
    const SET_ID: ElementSetId = ElementSetId::Cartesian;
    const ANGLE_COMPONENTS: [bool; 6] = [false; 6];

    fn to_vector(&self) -> Vector6 {
        Vector6::new(
            self.x_km(),
            self.y_km(),
            self.z_km(),
            self.vx_km_s(),
            self.vy_km_s(),
            self.vz_km_s(),
        )
    }

    fn from_vector(vec: &Vector6) -> Self {
        Self::new(vec[0], vec[1], vec[2], vec[3], vec[4], vec[5])
    }
}

impl<F: InertialFrame> Add for Cartesian<F> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            radius_km: self.radius_km + other.radius_km,
            velocity_km_s: self.velocity_km_s + other.velocity_km_s,
        }
    }
}

impl<F: InertialFrame> Sub for Cartesian<F> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            radius_km: self.radius_km - other.radius_km,
            velocity_km_s: self.velocity_km_s - other.velocity_km_s,
        }
    }
}

impl<F: InertialFrame> Mul<f64> for Cartesian<F> {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            radius_km: self.radius_km * scalar,
            velocity_km_s: self.velocity_km_s * scalar,
        }
    }
}

impl<F: InertialFrame> Div<f64> for Cartesian<F> {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self {
            radius_km: self.radius_km / scalar,
            velocity_km_s: self.velocity_km_s / scalar,
        }
    }
}

impl<F: InertialFrame> fmt::Display for Cartesian<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}] km [{}, {}, {}] km/s (Cartesian, {})",
            self.x_km(),
            self.y_km(),
            self.z_km(),
            self.vx_km_s(),
            self.vy_km_s(),
            self.vz_km_s(),
            F::NAME
        )
    }
}

#[cfg(test)]
mod ut_cartesian {
    use super::*;

    #[test]
    fn test_vector_round_trip() {
        let state = Cartesian::<Eci>::new(7000.0, 10.0, -3.0, 0.1, 7.5, 1.0);
        let back = Cartesian::<Eci>::from_vector(&state.to_vector());
        assert_eq!(state, back);
    }

    #[test]
    fn test_algebra() {
        let a = Cartesian::<Eci>::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let b = a * 2.0;
        assert_eq!(b.x_km(), 2.0);
        assert_eq!((b - a), a);
        assert_eq!((a + a) / 2.0, a);
    }

    #[test]
    fn test_hvec() {
        let state = Cartesian::<Eci>::new(7000.0, 0.0, 0.0, 0.0, 7.5, 0.0);
        let h = state.hvec();
        assert_eq!(h.z, 7000.0 * 7.5);
        assert_eq!(h.x, 0.0);
    }
}
