/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

mod atmospheric;
mod nbody;
mod oblateness;
mod srp;

pub use atmospheric::AtmosphericForce;
pub use nbody::NBodyForce;
pub use oblateness::{HarmonicCoefficients, OblatenessForce};
pub use srp::SolarRadiationPressure;

use crate::elements::Cartesian;
use crate::errors::PhysicsResult;
use crate::frames::Eci;
use crate::math::vectors::AccelVector;
use crate::platforms::Vehicle;
use crate::system::System;
use crate::time::Date;

/// A perturbing force. Every force returns its contribution as an
/// acceleration in the central body's inertial frame; the two-body term is
/// never a Force, it belongs to the equations of motion directly.
pub trait Force {
    fn name(&self) -> &'static str;

    fn compute_force(
        &self,
        date: Date,
        state: &Cartesian<Eci>,
        vehicle: &Vehicle,
        sys: &System,
    ) -> PhysicsResult<AccelVector<Eci>>;
}

/// An ordered container of forces whose contributions sum.
#[derive(Default)]
pub struct ForceModel {
    forces: Vec<Box<dyn Force>>,
}

impl ForceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F: Force + 'static>(&mut self, force: F) {
        self.forces.push(Box::new(force));
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    /// Sum of all force contributions at the provided state.
    pub fn compute_forces(
        &self,
        date: Date,
        state: &Cartesian<Eci>,
        vehicle: &Vehicle,
        sys: &System,
    ) -> PhysicsResult<AccelVector<Eci>> {
        let mut total = AccelVector::zeros();
        for force in &self.forces {
            total = total + force.compute_force(date, state, vehicle, sys)?;
        }
        Ok(total)
    }
}

impl core::fmt::Debug for ForceModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names: Vec<_> = self.forces.iter().map(|force| force.name()).collect();
        write!(f, "ForceModel {names:?}")
    }
}
