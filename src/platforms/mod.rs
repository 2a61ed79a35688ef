/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

pub mod constellation;
pub mod ground;
pub mod spacecraft;

pub use constellation::{Constellation, Plane, Shell, WalkerDelta};
pub use ground::GroundPoint;
pub use spacecraft::{Payload, PayloadPlatform, Spacecraft, Thruster};

use crate::elements::ElementSetId;
use crate::errors::PhysicsResult;
use crate::frames::Eci;
use crate::math::vectors::{AccelVector, RadiusVector, VelocityVector};
use crate::state::{State, StateHistory};
use crate::system::System;
use crate::time::Date;
use hifitime::TimeUnits;

/// The capability set a concrete platform must expose to be driven by the
/// propagation machinery.
///
/// This is the type-erasure seam: [Vehicle] boxes any implementor behind a
/// vtable, so integrators, forces, and events never name concrete platform
/// types.
pub trait VehicleModel {
    fn name(&self) -> &str;

    /// Stable identifier; identical inputs must produce identical ids.
    fn id(&self) -> u64;

    fn mass_kg(&self) -> f64;

    fn drag_coefficient(&self) -> f64;
    fn lift_coefficient(&self) -> f64;
    fn reflectivity_coefficient(&self) -> f64;

    fn ram_area_m2(&self) -> f64;
    fn solar_area_m2(&self) -> f64;
    fn lift_area_m2(&self) -> f64;

    fn current_state(&self) -> &State;
    fn set_current_state(&mut self, state: State);
    fn initial_state(&self) -> &State;

    /// Total impulsive Δv capacity of attached thrusters, km/s. Platforms
    /// without thrusters report zero.
    fn impulsive_dv_km_s(&self) -> f64 {
        0.0
    }

    fn clone_model(&self) -> Box<dyn VehicleModel>;
}

/// A type-erased vehicle: owns a clone of the wrapped platform plus the
/// state history its propagations produce.
pub struct Vehicle {
    model: Box<dyn VehicleModel>,
    history: Option<StateHistory>,
}

impl Vehicle {
    /// Wraps a clone of the provided platform.
    pub fn new<T: VehicleModel>(model: &T) -> Self {
        Self {
            model: model.clone_model(),
            history: None,
        }
    }

    pub fn name(&self) -> &str {
        self.model.name()
    }

    pub fn id(&self) -> u64 {
        self.model.id()
    }

    pub fn mass_kg(&self) -> f64 {
        self.model.mass_kg()
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.model.drag_coefficient()
    }

    pub fn lift_coefficient(&self) -> f64 {
        self.model.lift_coefficient()
    }

    pub fn reflectivity_coefficient(&self) -> f64 {
        self.model.reflectivity_coefficient()
    }

    pub fn ram_area_m2(&self) -> f64 {
        self.model.ram_area_m2()
    }

    pub fn solar_area_m2(&self) -> f64 {
        self.model.solar_area_m2()
    }

    pub fn lift_area_m2(&self) -> f64 {
        self.model.lift_area_m2()
    }

    pub fn current_state(&self) -> &State {
        self.model.current_state()
    }

    pub fn set_current_state(&mut self, state: State) {
        self.model.set_current_state(state);
    }

    pub fn initial_state(&self) -> &State {
        self.model.initial_state()
    }

    pub fn impulsive_dv_km_s(&self) -> f64 {
        self.model.impulsive_dv_km_s()
    }

    pub fn history(&self) -> Option<&StateHistory> {
        self.history.as_ref()
    }

    pub fn set_history(&mut self, history: StateHistory) {
        self.history = Some(history);
    }

    /// The state at an arbitrary date: the current state when the date
    /// matches its epoch, otherwise interpolated out of the stored history.
    pub fn state_at(&self, date: Date) -> PhysicsResult<State> {
        if self.current_state().epoch() == date {
            return Ok(*self.current_state());
        }
        match &self.history {
            Some(history) => history.state_at(date),
            None => crate::errors::EmptyStateHistorySnafu.fail(),
        }
    }

    /// Inertial position at a date.
    pub fn position_at(&self, date: Date, sys: &System) -> PhysicsResult<RadiusVector<Eci>> {
        Ok(self
            .state_at(date)?
            .in_set(ElementSetId::Cartesian, sys)
            .elements
            .as_cartesian()?
            .radius_km)
    }

    /// Inertial velocity at a date.
    pub fn velocity_at(&self, date: Date, sys: &System) -> PhysicsResult<VelocityVector<Eci>> {
        Ok(self
            .state_at(date)?
            .in_set(ElementSetId::Cartesian, sys)
            .elements
            .as_cartesian()?
            .velocity_km_s)
    }

    /// Inertial acceleration at a date by central differencing of the
    /// velocity, the default required of every platform.
    pub fn acceleration_at(&self, date: Date, sys: &System) -> PhysicsResult<AccelVector<Eci>> {
        let half_step = 1.seconds();
        let before = self.velocity_at(date - half_step, sys)?;
        let after = self.velocity_at(date + half_step, sys)?;
        Ok(AccelVector::from_vector(
            (after - before).as_vector() / (2.0 * half_step.to_seconds()),
        ))
    }
}

impl Clone for Vehicle {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone_model(),
            history: self.history.clone(),
        }
    }
}

impl core::fmt::Debug for Vehicle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Vehicle {{ name: {}, id: {}, state: {} }}",
            self.name(),
            self.id(),
            self.current_state()
        )
    }
}
