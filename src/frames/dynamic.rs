/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::{Eci, FrameAxes, FrameKind, FrameOrigin};
use crate::errors::PhysicsResult;
use crate::math::rotation::Dcm;
use crate::math::vectors::{CartesianVector, RadiusVector, UnitKind, UnitVector, VelocityVector};
use crate::platforms::Vehicle;
use crate::system::System;
use crate::time::Date;
use core::marker::PhantomData;

/// Radial, along-track, orbit-normal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rtn;

/// Radial, in-track, cross-track.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ric;

/// Local vertical, local horizontal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Lvlh;

/// Velocity, normal, bi-normal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Vnb;

macro_rules! dynamic_frame_kind {
    ($frame:ty, $name:literal, $axes:expr) => {
        impl FrameKind for $frame {
            const NAME: &'static str = $name;

            fn axes() -> FrameAxes {
                $axes
            }

            fn origin() -> FrameOrigin {
                FrameOrigin::Platform
            }
        }
    };
}

dynamic_frame_kind!(Rtn, "RTN", FrameAxes::Rtn);
dynamic_frame_kind!(Ric, "RIC", FrameAxes::Ric);
dynamic_frame_kind!(Lvlh, "LVLH", FrameAxes::Lvlh);
dynamic_frame_kind!(Vnb, "VNB", FrameAxes::Vnb);

/// An axis family whose basis is derived from a platform's instantaneous
/// position and velocity in an inertial frame.
pub trait DynamicAxes: FrameKind {
    /// The orthonormal (x, y, z) triad of this frame expressed in ECI.
    fn triad(
        position: &RadiusVector<Eci>,
        velocity: &VelocityVector<Eci>,
    ) -> (UnitVector<Eci>, UnitVector<Eci>, UnitVector<Eci>);
}

impl DynamicAxes for Rtn {
    fn triad(
        position: &RadiusVector<Eci>,
        velocity: &VelocityVector<Eci>,
    ) -> (UnitVector<Eci>, UnitVector<Eci>, UnitVector<Eci>) {
        let r_hat = position.unit();
        let h_hat = position.cross(velocity).unit();
        (r_hat, h_hat.cross(&r_hat), h_hat)
    }
}

impl DynamicAxes for Ric {
    fn triad(
        position: &RadiusVector<Eci>,
        velocity: &VelocityVector<Eci>,
    ) -> (UnitVector<Eci>, UnitVector<Eci>, UnitVector<Eci>) {
        let r_hat = position.unit();
        let h_hat = position.cross(velocity).unit();
        // In-track: the velocity direction with its radial component removed.
        let in_track = UnitVector::from_vector(crate::math::perpv(
            velocity.as_vector(),
            position.as_vector(),
        ))
        .unit();
        (r_hat, in_track, h_hat)
    }
}

impl DynamicAxes for Lvlh {
    fn triad(
        position: &RadiusVector<Eci>,
        velocity: &VelocityVector<Eci>,
    ) -> (UnitVector<Eci>, UnitVector<Eci>, UnitVector<Eci>) {
        let r_hat = position.unit();
        let h_hat = position.cross(velocity).unit();
        (h_hat.cross(&r_hat), -h_hat, -r_hat)
    }
}

impl DynamicAxes for Vnb {
    fn triad(
        position: &RadiusVector<Eci>,
        velocity: &VelocityVector<Eci>,
    ) -> (UnitVector<Eci>, UnitVector<Eci>, UnitVector<Eci>) {
        let v_hat = velocity.unit();
        let n_hat = position.cross(velocity).unit();
        (v_hat, n_hat, v_hat.cross(&n_hat))
    }
}

/// A dynamic frame instance, valid only at its construction date.
///
/// Build it instantaneously from a position/velocity pair, or from a vehicle
/// whose state is queried at the requested date.
#[derive(Copy, Clone, Debug)]
pub struct DynamicFrame<A: DynamicAxes> {
    position: RadiusVector<Eci>,
    velocity: VelocityVector<Eci>,
    epoch: Date,
    _axes: PhantomData<A>,
}

impl<A: DynamicAxes> DynamicFrame<A> {
    /// Instantaneous frame from the provided inertial state.
    pub fn instantaneous(
        position: RadiusVector<Eci>,
        velocity: VelocityVector<Eci>,
        epoch: Date,
    ) -> Self {
        Self {
            position,
            velocity,
            epoch,
            _axes: PhantomData,
        }
    }

    /// Frame attached to a vehicle, sampled at the requested date.
    pub fn for_vehicle(vehicle: &Vehicle, date: Date, sys: &System) -> PhysicsResult<Self> {
        let position = vehicle.position_at(date, sys)?;
        let velocity = vehicle.velocity_at(date, sys)?;
        Ok(Self::instantaneous(position, velocity, date))
    }

    /// The date this frame realization is valid at.
    pub fn epoch(&self) -> Date {
        self.epoch
    }

    /// Rotation from ECI into this frame at the frame's own epoch.
    pub fn dcm(&self) -> Dcm<Eci, A> {
        let (x_axis, y_axis, z_axis) = A::triad(&self.position, &self.velocity);
        Dcm::from_rows(&x_axis, &y_axis, &z_axis)
    }

    pub fn rotate_into_this_frame<U: UnitKind>(
        &self,
        vec: &CartesianVector<U, Eci>,
    ) -> CartesianVector<U, A> {
        self.dcm() * *vec
    }

    pub fn rotate_out_of_this_frame<U: UnitKind>(
        &self,
        vec: &CartesianVector<U, A>,
    ) -> CartesianVector<U, Eci> {
        self.dcm().transpose() * *vec
    }

    /// Full conversion of a position into this frame: translate to the
    /// platform origin, then rotate.
    pub fn convert_to_this_frame(&self, radius: &RadiusVector<Eci>) -> RadiusVector<A> {
        self.dcm() * (*radius - self.position)
    }

    /// Full conversion of a position out of this frame.
    pub fn convert_from_this_frame(&self, radius: &RadiusVector<A>) -> RadiusVector<Eci> {
        (self.dcm().transpose() * *radius) + self.position
    }
}

#[cfg(test)]
mod ut_dynamic {
    use super::*;

    fn equatorial_state() -> (RadiusVector<Eci>, VelocityVector<Eci>) {
        (
            RadiusVector::new(7000.0, 0.0, 0.0),
            VelocityVector::new(0.0, 7.5, 0.0),
        )
    }

    #[test]
    fn test_rtn_triad() {
        let (r, v) = equatorial_state();
        let frame = DynamicFrame::<Rtn>::instantaneous(r, v, Date::j2000());
        let dcm = frame.dcm();
        assert!(dcm.is_orthonormal());

        // Radial maps to x, along-track to y, normal to z.
        let radial = frame.rotate_into_this_frame(&r.unit());
        assert!((radial.x() - 1.0).abs() < 1e-12);
        let along = frame.rotate_into_this_frame(&v.unit());
        assert!((along.y() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_lvlh_triad() {
        let (r, v) = equatorial_state();
        let frame = DynamicFrame::<Lvlh>::instantaneous(r, v, Date::j2000());
        assert!(frame.dcm().is_orthonormal());
        // Nadir is the +z axis of LVLH.
        let nadir = frame.rotate_into_this_frame(&(-r).unit());
        assert!((nadir.z() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_vnb_triad() {
        let (r, v) = equatorial_state();
        let frame = DynamicFrame::<Vnb>::instantaneous(r, v, Date::j2000());
        assert!(frame.dcm().is_orthonormal());
        let velocity_axis = frame.rotate_into_this_frame(&v.unit());
        assert!((velocity_axis.x() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_convert_round_trip() {
        let (r, v) = equatorial_state();
        let frame = DynamicFrame::<Ric>::instantaneous(r, v, Date::j2000());
        let probe = RadiusVector::<Eci>::new(7100.0, 25.0, -3.0);
        let there = frame.convert_to_this_frame(&probe);
        let back = frame.convert_from_this_frame(&there);
        assert!((back - probe).norm() < 1e-9 * probe.norm());
    }
}
