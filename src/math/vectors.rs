/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use crate::frames::FrameKind;
use crate::math::Vector3;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Add, Div, Index, Mul, Neg, Sub};

/// Marker for the physical dimension carried by a [CartesianVector].
pub trait UnitKind: Copy + Clone + fmt::Debug + PartialEq + 'static {
    const SYMBOL: &'static str;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Km;
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KmPerSec;
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KmPerSec2;
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Km2PerSec;
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Unitless;

impl UnitKind for Km {
    const SYMBOL: &'static str = "km";
}
impl UnitKind for KmPerSec {
    const SYMBOL: &'static str = "km/s";
}
impl UnitKind for KmPerSec2 {
    const SYMBOL: &'static str = "km/s^2";
}
impl UnitKind for Km2PerSec {
    const SYMBOL: &'static str = "km^2/s";
}
impl UnitKind for Unitless {
    const SYMBOL: &'static str = "";
}

/// Dimension arithmetic for the cross products this library actually forms.
/// Pairings without an impl are dimension errors at compile time.
pub trait CrossDim<Rhs: UnitKind>: UnitKind {
    type Output: UnitKind;
}

impl CrossDim<KmPerSec> for Km {
    type Output = Km2PerSec;
}
impl CrossDim<Km> for KmPerSec {
    type Output = Km2PerSec;
}
impl CrossDim<Unitless> for Unitless {
    type Output = Unitless;
}

/// Three components of dimension U expressed in frame F.
///
/// Mixing frames or dimensions in vector arithmetic does not compile; the
/// storage itself is a plain `Vector3` so the numeric kernels stay on
/// nalgebra.
#[derive(Copy, Clone, PartialEq)]
pub struct CartesianVector<U: UnitKind, F: FrameKind> {
    vec: Vector3,
    _unit: PhantomData<U>,
    _frame: PhantomData<F>,
}

pub type RadiusVector<F> = CartesianVector<Km, F>;
pub type VelocityVector<F> = CartesianVector<KmPerSec, F>;
pub type AccelVector<F> = CartesianVector<KmPerSec2, F>;
pub type UnitVector<F> = CartesianVector<Unitless, F>;

impl<U: UnitKind, F: FrameKind> CartesianVector<U, F> {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_vector(Vector3::new(x, y, z))
    }

    pub fn from_vector(vec: Vector3) -> Self {
        Self {
            vec,
            _unit: PhantomData,
            _frame: PhantomData,
        }
    }

    pub fn zeros() -> Self {
        Self::from_vector(Vector3::zeros())
    }

    pub fn x(&self) -> f64 {
        self.vec.x
    }

    pub fn y(&self) -> f64 {
        self.vec.y
    }

    pub fn z(&self) -> f64 {
        self.vec.z
    }

    /// Borrow of the underlying nalgebra vector.
    pub fn as_vector(&self) -> &Vector3 {
        &self.vec
    }

    /// Euclidean norm, in the vector's own unit.
    pub fn norm(&self) -> f64 {
        self.vec.norm()
    }

    /// Inner product with a vector of any dimension in the same frame. The
    /// scalar is in the product unit of the two operands.
    pub fn dot<U2: UnitKind>(&self, other: &CartesianVector<U2, F>) -> f64 {
        self.vec.dot(&other.vec)
    }

    /// Cross product; the output dimension is the product dimension and only
    /// the pairings with a [CrossDim] impl exist.
    pub fn cross<U2: UnitKind>(
        &self,
        other: &CartesianVector<U2, F>,
    ) -> CartesianVector<<U as CrossDim<U2>>::Output, F>
    where
        U: CrossDim<U2>,
    {
        CartesianVector::from_vector(self.vec.cross(&other.vec))
    }

    /// Unit vector along this vector; the zero vector maps to zero.
    pub fn unit(&self) -> UnitVector<F> {
        let norm = self.norm();
        if norm < f64::EPSILON {
            UnitVector::zeros()
        } else {
            UnitVector::from_vector(self.vec / norm)
        }
    }

    /// Relabels the frame parameter without touching the components.
    ///
    /// This is the deliberate escape hatch for frames that share axes but are
    /// distinct types (e.g. every ICRF-aligned inertial frame). The caller
    /// asserts the axes agree.
    pub fn force_frame<F2: FrameKind>(self) -> CartesianVector<U, F2> {
        CartesianVector::from_vector(self.vec)
    }
}

impl<U: UnitKind, F: FrameKind> Add for CartesianVector<U, F> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_vector(self.vec + rhs.vec)
    }
}

impl<U: UnitKind, F: FrameKind> Sub for CartesianVector<U, F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_vector(self.vec - rhs.vec)
    }
}

impl<U: UnitKind, F: FrameKind> Neg for CartesianVector<U, F> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_vector(-self.vec)
    }
}

impl<U: UnitKind, F: FrameKind> Mul<f64> for CartesianVector<U, F> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::from_vector(self.vec * rhs)
    }
}

impl<U: UnitKind, F: FrameKind> Div<f64> for CartesianVector<U, F> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::from_vector(self.vec / rhs)
    }
}

impl<U: UnitKind, F: FrameKind> Index<usize> for CartesianVector<U, F> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.vec[index]
    }
}

impl<U: UnitKind, F: FrameKind> fmt::Debug for CartesianVector<U, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<U: UnitKind, F: FrameKind> fmt::Display for CartesianVector<U, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {}] {} ({})",
            self.vec.x,
            self.vec.y,
            self.vec.z,
            U::SYMBOL,
            F::NAME
        )
    }
}
