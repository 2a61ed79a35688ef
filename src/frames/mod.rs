/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

pub mod dynamic;
pub mod geodesy;

pub use dynamic::{DynamicAxes, DynamicFrame, Lvlh, Ric, Rtn, Vnb};

use crate::bodies::BodyId;
use crate::errors::PhysicsResult;
use crate::math::rotation::Dcm;
use crate::math::vectors::{CartesianVector, RadiusVector, UnitKind};
use crate::system::System;
use crate::time::Date;
use core::fmt::Debug;

/// The axis family of a reference frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameAxes {
    /// Axes aligned with the International Celestial Reference Frame.
    Icrf,
    /// Axes aligned with the J2000 mean equator and equinox. At this
    /// library's accuracy level J2000 and ICRF are interchangeable.
    J2000,
    /// Axes rotating with a body.
    BodyFixed,
    /// Radial, along-track, orbit-normal.
    Rtn,
    /// Radial, in-track, cross-track.
    Ric,
    /// Local vertical, local horizontal.
    Lvlh,
    /// Velocity, normal, bi-normal.
    Vnb,
}

impl FrameAxes {
    pub fn is_inertial(&self) -> bool {
        matches!(self, FrameAxes::Icrf | FrameAxes::J2000)
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(
            self,
            FrameAxes::Rtn | FrameAxes::Ric | FrameAxes::Lvlh | FrameAxes::Vnb
        )
    }
}

/// The origin a frame is centered on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameOrigin {
    /// Centered on a celestial body.
    Body(BodyId),
    /// Centered on the platform the frame is derived from (dynamic frames).
    Platform,
}

/// A reference frame identified at the type level by its (origin, axes) pair.
///
/// Frame types parameterize [CartesianVector] and [Dcm], so expressing a
/// vector in the wrong frame is a compile-time error rather than a runtime
/// discovery.
pub trait FrameKind: Copy + Clone + Debug + PartialEq + 'static {
    const NAME: &'static str;

    fn axes() -> FrameAxes;
    fn origin() -> FrameOrigin;
}

/// Marker for ICRF/J2000-aligned frames, whose mutual rotations are the
/// identity and which differ at most by their origin.
pub trait InertialFrame: FrameKind {}

/// Earth-centered inertial, axes along ICRF.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Eci;

/// Earth-centered Earth-fixed, rotating with the Earth.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ecef;

/// Heliocentric inertial, axes along ICRF.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hci;

/// Moon-centered inertial, axes along ICRF.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Lci;

/// J2000 is treated as identical to ICRF at this accuracy level.
pub type Eme2000 = Eci;

impl FrameKind for Eci {
    const NAME: &'static str = "Earth ICRF";

    fn axes() -> FrameAxes {
        FrameAxes::Icrf
    }

    fn origin() -> FrameOrigin {
        FrameOrigin::Body(BodyId::Earth)
    }
}

impl InertialFrame for Eci {}

impl FrameKind for Hci {
    const NAME: &'static str = "Sun ICRF";

    fn axes() -> FrameAxes {
        FrameAxes::Icrf
    }

    fn origin() -> FrameOrigin {
        FrameOrigin::Body(BodyId::Sun)
    }
}

impl InertialFrame for Hci {}

impl FrameKind for Lci {
    const NAME: &'static str = "Moon ICRF";

    fn axes() -> FrameAxes {
        FrameAxes::Icrf
    }

    fn origin() -> FrameOrigin {
        FrameOrigin::Body(BodyId::Moon)
    }
}

impl InertialFrame for Lci {}

impl FrameKind for Ecef {
    const NAME: &'static str = "Earth body-fixed";

    fn axes() -> FrameAxes {
        FrameAxes::BodyFixed
    }

    fn origin() -> FrameOrigin {
        FrameOrigin::Body(BodyId::Earth)
    }
}

impl Ecef {
    /// Rotation from ECI into ECEF at the provided date: a single Z rotation
    /// by GMST. Precession and nutation are out of scope, which leaves this
    /// transformation wrong at the multi-km level; acceptable for the force
    /// and access models built on top of it.
    pub fn dcm_at(date: Date) -> Dcm<Eci, Ecef> {
        Dcm::r3(date.gmst_rad())
    }

    pub fn rotate_into_this_frame<U: UnitKind>(
        vec: &CartesianVector<U, Eci>,
        date: Date,
    ) -> CartesianVector<U, Ecef> {
        Self::dcm_at(date) * *vec
    }

    pub fn rotate_out_of_this_frame<U: UnitKind>(
        vec: &CartesianVector<U, Ecef>,
        date: Date,
    ) -> CartesianVector<U, Eci> {
        Self::dcm_at(date).transpose() * *vec
    }
}

/// Converts a position between two ICRF-aligned frames at the provided date.
///
/// Same origin is the identity; distinct origins translate by the relative
/// position of the two origins out of the System's body geometry. The axes
/// are shared, so no rotation is applied.
pub fn convert_to_frame<A: InertialFrame, B: InertialFrame>(
    radius: &RadiusVector<A>,
    date: Date,
    sys: &System,
) -> PhysicsResult<RadiusVector<B>> {
    let (FrameOrigin::Body(from), FrameOrigin::Body(to)) = (A::origin(), B::origin()) else {
        // Inertial frames are always body-centered.
        unreachable!("inertial frames carry body origins");
    };
    if from == to {
        return Ok(radius.force_frame::<B>());
    }
    // Offset from B's origin to A's origin, ICRF axes.
    let offset = sys.get_relative_position(date, to, from)?;
    Ok(offset.force_frame::<B>() + radius.force_frame::<B>())
}

/// Converts a position from ECEF into any ICRF-aligned frame: rotate out of
/// the body-fixed axes, then translate between origins.
pub fn ecef_to_inertial<B: InertialFrame>(
    radius: &RadiusVector<Ecef>,
    date: Date,
    sys: &System,
) -> PhysicsResult<RadiusVector<B>> {
    let eci = Ecef::rotate_out_of_this_frame(radius, date);
    convert_to_frame::<Eci, B>(&eci, date, sys)
}

/// Converts a position from any ICRF-aligned frame into ECEF: translate to
/// the Earth-centered origin, then rotate into the body-fixed axes.
pub fn inertial_to_ecef<A: InertialFrame>(
    radius: &RadiusVector<A>,
    date: Date,
    sys: &System,
) -> PhysicsResult<RadiusVector<Ecef>> {
    let eci = convert_to_frame::<A, Eci>(radius, date, sys)?;
    Ok(Ecef::rotate_into_this_frame(&eci, date))
}
