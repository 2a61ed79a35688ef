/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::VehicleModel;
use crate::frames::Lvlh;
use crate::math::vectors::{RadiusVector, UnitVector};
use crate::state::State;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A spacecraft bus: mass, the three reference areas and dimensionless
/// coefficients of the force models, and the propagated state.
#[derive(Clone, Debug, PartialEq)]
pub struct Spacecraft {
    name: String,
    id: u64,
    mass_kg: f64,
    drag_coefficient: f64,
    lift_coefficient: f64,
    reflectivity_coefficient: f64,
    ram_area_m2: f64,
    solar_area_m2: f64,
    lift_area_m2: f64,
    initial_state: State,
    state: State,
}

impl Spacecraft {
    /// Builds a spacecraft with the default bus properties: 1000 kg, unit
    /// areas, Cd 2.2, Cl 0.9, Cr 1.1.
    pub fn new(name: &str, initial_state: State) -> Self {
        let mut sc = Self {
            name: name.to_string(),
            id: 0,
            mass_kg: 1000.0,
            drag_coefficient: 2.2,
            lift_coefficient: 0.9,
            reflectivity_coefficient: 1.1,
            ram_area_m2: 1.0,
            solar_area_m2: 1.0,
            lift_area_m2: 1.0,
            initial_state,
            state: initial_state,
        };
        sc.id = sc.generate_id_hash();
        sc
    }

    pub fn with_mass_kg(mut self, mass_kg: f64) -> Self {
        self.mass_kg = mass_kg;
        self
    }

    pub fn with_coefficients(mut self, drag: f64, lift: f64, reflectivity: f64) -> Self {
        self.drag_coefficient = drag;
        self.lift_coefficient = lift;
        self.reflectivity_coefficient = reflectivity;
        self
    }

    pub fn with_areas_m2(mut self, ram: f64, solar: f64, lift: f64) -> Self {
        self.ram_area_m2 = ram;
        self.solar_area_m2 = solar;
        self.lift_area_m2 = lift;
        self
    }

    /// Derives the stable id from the name and the initial state, so the
    /// same vehicle run twice produces identical ids.
    fn generate_id_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.name.hash(&mut hasher);
        (self.initial_state.elements.set_id() as u8).hash(&mut hasher);
        for component in self.initial_state.elements.to_vector().iter() {
            component.to_bits().hash(&mut hasher);
        }
        self.initial_state.epoch().jd_days().to_bits().hash(&mut hasher);
        hasher.finish()
    }
}

impl VehicleModel for Spacecraft {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn mass_kg(&self) -> f64 {
        self.mass_kg
    }

    fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    fn lift_coefficient(&self) -> f64 {
        self.lift_coefficient
    }

    fn reflectivity_coefficient(&self) -> f64 {
        self.reflectivity_coefficient
    }

    fn ram_area_m2(&self) -> f64 {
        self.ram_area_m2
    }

    fn solar_area_m2(&self) -> f64 {
        self.solar_area_m2
    }

    fn lift_area_m2(&self) -> f64 {
        self.lift_area_m2
    }

    fn current_state(&self) -> &State {
        &self.state
    }

    fn set_current_state(&mut self, state: State) {
        self.state = state;
    }

    fn initial_state(&self) -> &State {
        &self.initial_state
    }

    fn clone_model(&self) -> Box<dyn VehicleModel> {
        Box::new(self.clone())
    }
}

/// Equipment mounted on a platform, pointed and placed in the platform's
/// LVLH frame.
pub trait Payload: Clone {
    fn name(&self) -> &str;

    /// Pointing direction in the platform frame.
    fn boresight(&self) -> UnitVector<Lvlh>;

    /// Attachment offset from the platform origin, km in the platform frame.
    fn offset_km(&self) -> RadiusVector<Lvlh>;

    /// Impulsive Δv capacity, km/s; zero for non-propulsive payloads.
    fn impulsive_dv_km_s(&self) -> f64 {
        0.0
    }
}

/// A thruster payload: finite thrust for scheduling, impulsive Δv capacity
/// for the instantaneous burn model.
#[derive(Clone, Debug, PartialEq)]
pub struct Thruster {
    name: String,
    thrust_kn: f64,
    impulsive_dv_km_s: f64,
    boresight: UnitVector<Lvlh>,
    offset_km: RadiusVector<Lvlh>,
}

impl Thruster {
    pub fn new(name: &str, thrust_kn: f64, impulsive_dv_km_s: f64) -> Self {
        Self {
            name: name.to_string(),
            thrust_kn,
            impulsive_dv_km_s,
            // Thrust along the anti-velocity face by default; the burn event
            // applies Δv along the velocity unit vector regardless.
            boresight: UnitVector::new(-1.0, 0.0, 0.0),
            offset_km: RadiusVector::zeros(),
        }
    }

    pub fn thrust_kn(&self) -> f64 {
        self.thrust_kn
    }

    pub fn with_mounting(
        mut self,
        boresight: UnitVector<Lvlh>,
        offset_km: RadiusVector<Lvlh>,
    ) -> Self {
        self.boresight = boresight;
        self.offset_km = offset_km;
        self
    }
}

impl Payload for Thruster {
    fn name(&self) -> &str {
        &self.name
    }

    fn boresight(&self) -> UnitVector<Lvlh> {
        self.boresight
    }

    fn offset_km(&self) -> RadiusVector<Lvlh> {
        self.offset_km
    }

    fn impulsive_dv_km_s(&self) -> f64 {
        self.impulsive_dv_km_s
    }
}

/// A spacecraft carrying an ordered list of payloads.
#[derive(Clone, Debug)]
pub struct PayloadPlatform<P: Payload> {
    bus: Spacecraft,
    payloads: Vec<P>,
}

impl<P: Payload> PayloadPlatform<P> {
    pub fn new(bus: Spacecraft) -> Self {
        Self {
            bus,
            payloads: Vec::new(),
        }
    }

    pub fn attach(&mut self, payload: P) {
        self.payloads.push(payload);
    }

    pub fn payloads(&self) -> &[P] {
        &self.payloads
    }

    pub fn bus(&self) -> &Spacecraft {
        &self.bus
    }
}

impl<P: Payload + 'static> VehicleModel for PayloadPlatform<P> {
    fn name(&self) -> &str {
        self.bus.name()
    }

    fn id(&self) -> u64 {
        self.bus.id()
    }

    fn mass_kg(&self) -> f64 {
        self.bus.mass_kg()
    }

    fn drag_coefficient(&self) -> f64 {
        self.bus.drag_coefficient()
    }

    fn lift_coefficient(&self) -> f64 {
        self.bus.lift_coefficient()
    }

    fn reflectivity_coefficient(&self) -> f64 {
        self.bus.reflectivity_coefficient()
    }

    fn ram_area_m2(&self) -> f64 {
        self.bus.ram_area_m2()
    }

    fn solar_area_m2(&self) -> f64 {
        self.bus.solar_area_m2()
    }

    fn lift_area_m2(&self) -> f64 {
        self.bus.lift_area_m2()
    }

    fn current_state(&self) -> &State {
        self.bus.current_state()
    }

    fn set_current_state(&mut self, state: State) {
        self.bus.set_current_state(state);
    }

    fn initial_state(&self) -> &State {
        self.bus.initial_state()
    }

    fn impulsive_dv_km_s(&self) -> f64 {
        self.payloads
            .iter()
            .map(|payload| payload.impulsive_dv_km_s())
            .sum()
    }

    fn clone_model(&self) -> Box<dyn VehicleModel> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod ut_spacecraft {
    use super::*;
    use crate::elements::{Keplerian, OrbitalElements};
    use crate::time::Date;

    fn sample_state() -> State {
        State::new(
            OrbitalElements::Keplerian(Keplerian::new(7000.0, 0.0, 0.9, 0.0, 0.0, 0.0)),
            Date::j2000(),
        )
    }

    #[test]
    fn test_id_is_stable() {
        let a = Spacecraft::new("bird-1", sample_state());
        let b = Spacecraft::new("bird-1", sample_state());
        assert_eq!(a.id(), b.id());

        let c = Spacecraft::new("bird-2", sample_state());
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn test_defaults() {
        let sc = Spacecraft::new("bird", sample_state());
        assert_eq!(sc.mass_kg(), 1000.0);
        assert_eq!(sc.drag_coefficient(), 2.2);
        assert_eq!(sc.lift_coefficient(), 0.9);
        assert_eq!(sc.reflectivity_coefficient(), 1.1);
        assert_eq!(sc.ram_area_m2(), 1.0);
    }

    #[test]
    fn test_payload_platform_dv_sums() {
        let mut platform = PayloadPlatform::new(Spacecraft::new("tug", sample_state()));
        platform.attach(Thruster::new("main", 10.0, 0.1));
        platform.attach(Thruster::new("trim", 1.0, 0.02));
        assert!((platform.impulsive_dv_km_s() - 0.12).abs() < 1e-15);
        assert_eq!(platform.payloads().len(), 2);
    }
}
