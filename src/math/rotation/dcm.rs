/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::DCM_ORTHONORMALITY_TOL;
use crate::frames::FrameKind;
use crate::math::vectors::{CartesianVector, UnitKind, UnitVector};
use crate::math::{Matrix3, Vector3};
use core::fmt;
use core::marker::PhantomData;
use core::ops::Mul;

/// A direction cosine matrix rotating vectors expressed in `From` into their
/// representation in `To`.
///
/// The frame pair lives in the type, so applying a rotation to a vector in the
/// wrong frame, or composing rotations whose inner frames disagree, does not
/// compile. Transposition swaps the type parameters.
#[derive(Copy, Clone, PartialEq)]
pub struct Dcm<From: FrameKind, To: FrameKind> {
    /// The rotation matrix itself
    pub rot_mat: Matrix3,
    _from: PhantomData<From>,
    _to: PhantomData<To>,
}

impl<From: FrameKind, To: FrameKind> Dcm<From, To> {
    pub fn from_matrix(rot_mat: Matrix3) -> Self {
        Self {
            rot_mat,
            _from: PhantomData,
            _to: PhantomData,
        }
    }

    pub fn identity() -> Self {
        Self::from_matrix(Matrix3::identity())
    }

    /// Returns a rotation matrix for a rotation about the X axis.
    ///
    /// # Arguments
    ///
    /// * `angle_rad` - The angle of rotation in radians.
    pub fn r1(angle_rad: f64) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Self::from_matrix(Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c))
    }

    /// Returns a rotation matrix for a rotation about the Y axis.
    pub fn r2(angle_rad: f64) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Self::from_matrix(Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c))
    }

    /// Returns a rotation matrix for a rotation about the Z axis.
    pub fn r3(angle_rad: f64) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Self::from_matrix(Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0))
    }

    /// Builds the rotation whose rows are the target frame's basis vectors
    /// expressed in the source frame.
    pub fn from_rows(
        x_axis: &UnitVector<From>,
        y_axis: &UnitVector<From>,
        z_axis: &UnitVector<From>,
    ) -> Self {
        Self::from_matrix(Matrix3::from_rows(&[
            x_axis.as_vector().transpose(),
            y_axis.as_vector().transpose(),
            z_axis.as_vector().transpose(),
        ]))
    }

    /// Transpose, which is also the inverse of an orthonormal rotation.
    pub fn transpose(&self) -> Dcm<To, From> {
        Dcm::from_matrix(self.rot_mat.transpose())
    }

    /// Checks M Mᵀ against the identity within the provided tolerance.
    pub fn is_orthonormal_within(&self, tol: f64) -> bool {
        ((self.rot_mat * self.rot_mat.transpose()) - Matrix3::identity()).norm() < tol
    }

    pub fn is_orthonormal(&self) -> bool {
        self.is_orthonormal_within(DCM_ORTHONORMALITY_TOL)
    }
}

impl<U: UnitKind, From: FrameKind, To: FrameKind> Mul<CartesianVector<U, From>> for Dcm<From, To> {
    type Output = CartesianVector<U, To>;

    /// Applying the matrix to a vector yields the vector's representation
    /// relative to the rotated coordinate system.
    fn mul(self, rhs: CartesianVector<U, From>) -> Self::Output {
        CartesianVector::from_vector(self.rot_mat * rhs.as_vector())
    }
}

impl<From: FrameKind, Via: FrameKind, To: FrameKind> Mul<Dcm<From, Via>> for Dcm<Via, To> {
    type Output = Dcm<From, To>;

    /// Composition: (Via → To) ∘ (From → Via) = From → To.
    fn mul(self, rhs: Dcm<From, Via>) -> Self::Output {
        Dcm::from_matrix(self.rot_mat * rhs.rot_mat)
    }
}

impl<From: FrameKind, To: FrameKind> Mul<Vector3> for Dcm<From, To> {
    type Output = Vector3;

    /// Raw application for the numeric kernels that bypass the typed layer.
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.rot_mat * rhs
    }
}

impl<From: FrameKind, To: FrameKind> fmt::Debug for Dcm<From, To> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dcm<{} -> {}> {}",
            From::NAME,
            To::NAME,
            self.rot_mat
        )
    }
}

#[cfg(test)]
mod ut_dcm {
    use super::*;
    use crate::frames::{Ecef, Eci, Hci};
    use crate::math::vectors::RadiusVector;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn test_r1() {
        let r1 = Dcm::<Eci, Ecef>::r1(FRAC_PI_2);

        let x = RadiusVector::<Eci>::new(1.0, 0.0, 0.0);
        let y = RadiusVector::<Eci>::new(0.0, 1.0, 0.0);
        let z = RadiusVector::<Eci>::new(0.0, 0.0, 1.0);

        // Rotation of the X vector about X, yields X
        assert!(((r1 * x).as_vector() - Vector3::x()).norm() < f64::EPSILON);
        // Rotation of the Z vector about X by half pi, yields Y
        assert!(((r1 * z).as_vector() - Vector3::y()).norm() < f64::EPSILON);
        // Rotation of the Y vector about X by half pi, yields -Z
        assert!(((r1 * y).as_vector() + Vector3::z()).norm() < f64::EPSILON);
    }

    #[test]
    fn test_r3() {
        let r3 = Dcm::<Eci, Ecef>::r3(FRAC_PI_2);
        let x = RadiusVector::<Eci>::new(1.0, 0.0, 0.0);
        let y = RadiusVector::<Eci>::new(0.0, 1.0, 0.0);

        // Rotation of the X vector about Z by half pi, yields -Y
        assert!(((r3 * x).as_vector() + Vector3::y()).norm() < f64::EPSILON);
        // Rotation of the Y vector about Z by half pi, yields X
        assert!(((r3 * y).as_vector() - Vector3::x()).norm() < f64::EPSILON);

        // Edge case: rotation by 0 yields the original vector
        let r3_zero = Dcm::<Eci, Ecef>::r3(0.0);
        assert!(((r3_zero * x).as_vector() - Vector3::x()).norm() < f64::EPSILON);
    }

    #[test]
    fn test_orthonormality_and_composition() {
        let a = Dcm::<Eci, Ecef>::r3(0.37);
        assert!(a.is_orthonormal());
        assert!((a.transpose() * a).is_orthonormal());

        // Composition with matching inner frame compiles and matches a single
        // rotation by the summed angle.
        let b = Dcm::<Hci, Eci>::r3(0.21);
        let combined = a * b;
        let direct = Dcm::<Hci, Ecef>::r3(0.58);
        assert!((combined.rot_mat - direct.rot_mat).norm() < 1e-14);
    }
}
