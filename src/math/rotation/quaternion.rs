/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::Dcm;
use crate::frames::FrameKind;
use crate::math::vectors::{CartesianVector, UnitKind};
use crate::math::Matrix3;
use core::marker::PhantomData;
use core::ops::Mul;
use nalgebra::Vector4;

/// A unit quaternion (Euler parameters) rotating vectors from `From` into
/// `To`: the attitude currency when composing many rotations, with the DCM
/// as the working form for applying them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quaternion<From: FrameKind, To: FrameKind> {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    _from: PhantomData<From>,
    _to: PhantomData<To>,
}

impl<From: FrameKind, To: FrameKind> Quaternion<From, To> {
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self {
            w,
            x,
            y,
            z,
            _from: PhantomData,
            _to: PhantomData,
        }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    pub fn norm(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let norm = self.norm();
        Self::new(self.w / norm, self.x / norm, self.y / norm, self.z / norm)
    }

    /// The inverse rotation, which for a unit quaternion is the conjugate.
    pub fn conjugate(&self) -> Quaternion<To, From> {
        Quaternion::new(self.w, -self.x, -self.y, -self.z)
    }
}

impl<From: FrameKind, Via: FrameKind, To: FrameKind> Mul<Quaternion<From, Via>>
    for Quaternion<Via, To>
{
    type Output = Quaternion<From, To>;

    /// Composition: (Via → To) ∘ (From → Via) = From → To.
    fn mul(self, rhs: Quaternion<From, Via>) -> Self::Output {
        Quaternion::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}

impl<U: UnitKind, From: FrameKind, To: FrameKind> Mul<CartesianVector<U, From>>
    for Quaternion<From, To>
{
    type Output = CartesianVector<U, To>;

    /// Rotation through the equivalent DCM.
    fn mul(self, rhs: CartesianVector<U, From>) -> Self::Output {
        Dcm::from(self) * rhs
    }
}

impl<From: FrameKind, To: FrameKind> core::convert::From<Dcm<From, To>> for Quaternion<From, To> {
    /// Convert from a DCM into its quaternion representation, via the
    /// largest of the four squared Euler parameters (Basilisk's `C2EP`).
    fn from(dcm: Dcm<From, To>) -> Self {
        let c = dcm.rot_mat;
        let tr = c.trace();
        let b_sq = Vector4::new(
            (1.0 + tr) / 4.0,
            (1.0 + 2.0 * c[(0, 0)] - tr) / 4.0,
            (1.0 + 2.0 * c[(1, 1)] - tr) / 4.0,
            (1.0 + 2.0 * c[(2, 2)] - tr) / 4.0,
        );
        let (w, x, y, z) = match b_sq.imax() {
            0 => (
                b_sq[0].sqrt(),
                (c[(1, 2)] - c[(2, 1)]) / 4.0 / b_sq[0].sqrt(),
                (c[(2, 0)] - c[(0, 2)]) / 4.0 / b_sq[0].sqrt(),
                (c[(0, 1)] - c[(1, 0)]) / 4.0 / b_sq[0].sqrt(),
            ),
            1 => {
                let mut x = b_sq[1].sqrt();
                let mut w = (c[(1, 2)] - c[(2, 1)]) / 4.0 / x;
                if w < 0.0 {
                    w = -w;
                    x = -x;
                }
                let y = (c[(0, 1)] + c[(1, 0)]) / 4.0 / x;
                let z = (c[(2, 0)] + c[(0, 2)]) / 4.0 / x;
                (w, x, y, z)
            }
            2 => {
                let mut y = b_sq[2].sqrt();
                let mut w = (c[(2, 0)] - c[(0, 2)]) / 4.0 / y;
                if w < 0.0 {
                    w = -w;
                    y = -y;
                }
                let x = (c[(0, 1)] + c[(1, 0)]) / 4.0 / y;
                let z = (c[(1, 2)] + c[(2, 1)]) / 4.0 / y;
                (w, x, y, z)
            }
            _ => {
                let mut z = b_sq[3].sqrt();
                let mut w = (c[(0, 1)] - c[(1, 0)]) / 4.0 / z;
                if w < 0.0 {
                    z = -z;
                    w = -w;
                }
                let x = (c[(2, 0)] + c[(0, 2)]) / 4.0 / z;
                let y = (c[(1, 2)] + c[(2, 1)]) / 4.0 / z;
                (w, x, y, z)
            }
        };

        Quaternion::new(w, x, y, z)
    }
}

impl<From: FrameKind, To: FrameKind> core::convert::From<Quaternion<From, To>> for Dcm<From, To> {
    /// Returns the direction cosine matrix in terms of the provided Euler
    /// parameters (Basilisk's `EP2C`).
    fn from(q: Quaternion<From, To>) -> Self {
        let q = q.normalize();
        let (q0, q1, q2, q3) = (q.w, q.x, q.y, q.z);
        let mut c = Matrix3::zeros();
        c[(0, 0)] = q0 * q0 + q1 * q1 - q2 * q2 - q3 * q3;
        c[(0, 1)] = 2.0 * (q1 * q2 + q0 * q3);
        c[(0, 2)] = 2.0 * (q1 * q3 - q0 * q2);
        c[(1, 0)] = 2.0 * (q1 * q2 - q0 * q3);
        c[(1, 1)] = q0 * q0 - q1 * q1 + q2 * q2 - q3 * q3;
        c[(1, 2)] = 2.0 * (q2 * q3 + q0 * q1);
        c[(2, 0)] = 2.0 * (q1 * q3 + q0 * q2);
        c[(2, 1)] = 2.0 * (q2 * q3 - q0 * q1);
        c[(2, 2)] = q0 * q0 - q1 * q1 - q2 * q2 + q3 * q3;

        Dcm::from_matrix(c)
    }
}
