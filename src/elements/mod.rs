/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

pub mod cartesian;
pub mod equinoctial;
pub mod keplerian;

pub use cartesian::Cartesian;
pub use equinoctial::Equinoctial;
pub use keplerian::Keplerian;

use crate::errors::{ElementSetMismatchSnafu, PhysicsResult};
use crate::frames::Eci;
use crate::math::angles::{between_0_two_pi, between_pm_pi};
use crate::math::interpolation::linear;
use crate::math::Vector6;
use crate::system::System;
use crate::time::Date;
use core::fmt;
use core::ops::{Add, Div, Mul, Sub};
use hifitime::Duration;
use snafu::ensure;

/// Stable identifier of an orbital-element representation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ElementSetId {
    Cartesian = 0,
    Keplerian = 1,
    Equinoctial = 2,
}

impl fmt::Display for ElementSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementSetId::Cartesian => "Cartesian",
            ElementSetId::Keplerian => "Keplerian",
            ElementSetId::Equinoctial => "Equinoctial",
        };
        write!(f, "{name}")
    }
}

/// Behavior common to the concrete element representations: a stable set id,
/// serialization to a fixed-length numeric vector, and knowledge of which
/// components are angles (for wrap-aware interpolation).
pub trait ElementSet: Copy + Clone + fmt::Debug {
    const SET_ID: ElementSetId;
    const ANGLE_COMPONENTS: [bool; 6];

    fn to_vector(&self) -> Vector6;
    fn from_vector(vec: &Vector6) -> Self;
}

/// The unified orbital-element container: a tagged variant over the three
/// concrete representations.
///
/// Conversions between any two representations are defined, transitively
/// through Cartesian where no direct path exists, and require a [System] for
/// the central µ. Arithmetic and interpolation are total only within a
/// variant; cross-variant combinations fail with
/// [PhysicsError::ElementSetMismatch].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OrbitalElements {
    Cartesian(Cartesian<Eci>),
    Keplerian(Keplerian),
    Equinoctial(Equinoctial),
}

impl OrbitalElements {
    /// Rebuilds a container from its set id and serialized components.
    pub fn from_vector(set: ElementSetId, vec: &Vector6) -> Self {
        match set {
            ElementSetId::Cartesian => Self::Cartesian(Cartesian::from_vector(vec)),
            ElementSetId::Keplerian => Self::Keplerian(Keplerian::from_vector(vec)),
            ElementSetId::Equinoctial => Self::Equinoctial(Equinoctial::from_vector(vec)),
        }
    }

    pub fn set_id(&self) -> ElementSetId {
        match self {
            Self::Cartesian(_) => ElementSetId::Cartesian,
            Self::Keplerian(_) => ElementSetId::Keplerian,
            Self::Equinoctial(_) => ElementSetId::Equinoctial,
        }
    }

    /// Serializes the current variant to its six components.
    pub fn to_vector(&self) -> Vector6 {
        match self {
            Self::Cartesian(elements) => elements.to_vector(),
            Self::Keplerian(elements) => elements.to_vector(),
            Self::Equinoctial(elements) => elements.to_vector(),
        }
    }

    fn angle_components(&self) -> [bool; 6] {
        match self.set_id() {
            ElementSetId::Cartesian => Cartesian::<Eci>::ANGLE_COMPONENTS,
            ElementSetId::Keplerian => Keplerian::ANGLE_COMPONENTS,
            ElementSetId::Equinoctial => Equinoctial::ANGLE_COMPONENTS,
        }
    }

    /// The equivalent Cartesian representation.
    pub fn to_cartesian(&self, sys: &System) -> Cartesian<Eci> {
        let mu = sys.get_mu_km3_s2();
        match self {
            Self::Cartesian(elements) => *elements,
            Self::Keplerian(elements) => elements.to_cartesian(mu),
            Self::Equinoctial(elements) => elements.to_keplerian().to_cartesian(mu),
        }
    }

    /// The equivalent Keplerian representation.
    pub fn to_keplerian(&self, sys: &System) -> Keplerian {
        let mu = sys.get_mu_km3_s2();
        match self {
            Self::Cartesian(elements) => Keplerian::from_cartesian(elements, mu),
            Self::Keplerian(elements) => *elements,
            Self::Equinoctial(elements) => elements.to_keplerian(),
        }
    }

    /// The equivalent equinoctial representation.
    pub fn to_equinoctial(&self, sys: &System) -> Equinoctial {
        let mu = sys.get_mu_km3_s2();
        match self {
            Self::Cartesian(elements) => {
                Equinoctial::from_keplerian(&Keplerian::from_cartesian(elements, mu))
            }
            Self::Keplerian(elements) => Equinoctial::from_keplerian(elements),
            Self::Equinoctial(elements) => *elements,
        }
    }

    /// Returns a container holding the requested variant; a no-op copy when
    /// the variant already matches.
    pub fn in_set(&self, set: ElementSetId, sys: &System) -> Self {
        if self.set_id() == set {
            return *self;
        }
        match set {
            ElementSetId::Cartesian => Self::Cartesian(self.to_cartesian(sys)),
            ElementSetId::Keplerian => Self::Keplerian(self.to_keplerian(sys)),
            ElementSetId::Equinoctial => Self::Equinoctial(self.to_equinoctial(sys)),
        }
    }

    /// Replaces the held variant with the requested one in place.
    pub fn convert_in_place(&mut self, set: ElementSetId, sys: &System) {
        *self = self.in_set(set, sys);
    }

    /// Borrows the concrete Cartesian variant, failing if another is held.
    pub fn as_cartesian(&self) -> PhysicsResult<&Cartesian<Eci>> {
        match self {
            Self::Cartesian(elements) => Ok(elements),
            _ => ElementSetMismatchSnafu {
                expected: ElementSetId::Cartesian,
                got: self.set_id(),
            }
            .fail(),
        }
    }

    /// Borrows the concrete Keplerian variant, failing if another is held.
    pub fn as_keplerian(&self) -> PhysicsResult<&Keplerian> {
        match self {
            Self::Keplerian(elements) => Ok(elements),
            _ => ElementSetMismatchSnafu {
                expected: ElementSetId::Keplerian,
                got: self.set_id(),
            }
            .fail(),
        }
    }

    /// Borrows the concrete equinoctial variant, failing if another is held.
    pub fn as_equinoctial(&self) -> PhysicsResult<&Equinoctial> {
        match self {
            Self::Equinoctial(elements) => Ok(elements),
            _ => ElementSetMismatchSnafu {
                expected: ElementSetId::Equinoctial,
                got: self.set_id(),
            }
            .fail(),
        }
    }

    /// Division by a duration: the natural time-derivative container.
    pub fn div_duration(&self, duration: Duration) -> ElementPartials {
        ElementPartials::new(self.set_id(), self.to_vector() / duration.to_seconds())
    }

    /// Element-wise linear interpolation between this container at
    /// `self_epoch` and `other` at `other_epoch`, evaluated at `target`.
    /// Angular components are unwrapped onto the shortest path before
    /// interpolation and rewrapped into [0, 2π) after. Both containers must
    /// hold the same variant.
    pub fn interpolate(
        &self,
        self_epoch: Date,
        other: &Self,
        other_epoch: Date,
        target: Date,
    ) -> PhysicsResult<Self> {
        ensure!(
            self.set_id() == other.set_id(),
            ElementSetMismatchSnafu {
                expected: self.set_id(),
                got: other.set_id(),
            }
        );

        let x0 = 0.0;
        let x1 = (other_epoch - self_epoch).to_seconds();
        let xt = (target - self_epoch).to_seconds();

        let y0 = self.to_vector();
        let y1 = other.to_vector();
        let angles = self.angle_components();

        let mut interpolated = Vector6::zeros();
        for component in 0..6 {
            interpolated[component] = if angles[component] {
                let delta = between_pm_pi(y1[component] - y0[component]);
                between_0_two_pi(linear(x0, x1, y0[component], y0[component] + delta, xt))
            } else {
                linear(x0, x1, y0[component], y1[component], xt)
            };
        }

        Ok(Self::from_vector(self.set_id(), &interpolated))
    }

    fn ensure_same_set(&self, other: &Self) -> PhysicsResult<()> {
        ensure!(
            self.set_id() == other.set_id(),
            ElementSetMismatchSnafu {
                expected: self.set_id(),
                got: other.set_id(),
            }
        );
        Ok(())
    }
}

impl Add for OrbitalElements {
    type Output = PhysicsResult<OrbitalElements>;

    /// Componentwise sum; fails if the variants differ.
    fn add(self, other: Self) -> Self::Output {
        self.ensure_same_set(&other)?;
        Ok(Self::from_vector(
            self.set_id(),
            &(self.to_vector() + other.to_vector()),
        ))
    }
}

impl Sub for OrbitalElements {
    type Output = PhysicsResult<OrbitalElements>;

    /// Componentwise difference; fails if the variants differ.
    fn sub(self, other: Self) -> Self::Output {
        self.ensure_same_set(&other)?;
        Ok(Self::from_vector(
            self.set_id(),
            &(self.to_vector() - other.to_vector()),
        ))
    }
}

impl Mul<f64> for OrbitalElements {
    type Output = OrbitalElements;

    fn mul(self, scalar: f64) -> OrbitalElements {
        Self::from_vector(self.set_id(), &(self.to_vector() * scalar))
    }
}

impl Div<f64> for OrbitalElements {
    type Output = OrbitalElements;

    fn div(self, scalar: f64) -> OrbitalElements {
        Self::from_vector(self.set_id(), &(self.to_vector() / scalar))
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cartesian(elements) => write!(f, "{elements}"),
            Self::Keplerian(elements) => write!(f, "{elements}"),
            Self::Equinoctial(elements) => write!(f, "{elements}"),
        }
    }
}

/// Time derivatives of one element representation, in per-second rates.
///
/// For the Cartesian variant the components are velocity and acceleration,
/// the natural derivative; for the others they are the raw element rates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ElementPartials {
    set: ElementSetId,
    rates_per_s: Vector6,
}

impl ElementPartials {
    pub fn new(set: ElementSetId, rates_per_s: Vector6) -> Self {
        Self { set, rates_per_s }
    }

    pub fn zeros(set: ElementSetId) -> Self {
        Self::new(set, Vector6::zeros())
    }

    pub fn set_id(&self) -> ElementSetId {
        self.set
    }

    pub fn rates_per_s(&self) -> &Vector6 {
        &self.rates_per_s
    }

    /// Scales the rates over a duration, producing an element delta in the
    /// same variant.
    pub fn over(&self, duration: Duration) -> OrbitalElements {
        OrbitalElements::from_vector(self.set, &(self.rates_per_s * duration.to_seconds()))
    }
}
