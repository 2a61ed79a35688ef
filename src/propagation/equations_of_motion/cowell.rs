/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::EquationsOfMotion;
use crate::elements::{ElementPartials, ElementSetId};
use crate::errors::PhysicsResult;
use crate::math::Vector6;
use crate::platforms::Vehicle;
use crate::propagation::force_models::ForceModel;
use crate::state::State;
use crate::system::System;

/// Cowell's method: direct Cartesian integration with the two-body term plus
/// every force-model perturbation summed on the right-hand side.
pub struct Cowell<'a> {
    system: &'a System,
    forces: ForceModel,
}

impl<'a> Cowell<'a> {
    pub fn new(system: &'a System, forces: ForceModel) -> Self {
        Self { system, forces }
    }

    pub fn forces(&self) -> &ForceModel {
        &self.forces
    }
}

impl EquationsOfMotion for Cowell<'_> {
    fn expected_set(&self) -> ElementSetId {
        ElementSetId::Cartesian
    }

    fn system(&self) -> &System {
        self.system
    }

    fn evaluate(&self, state: &State, vehicle: &Vehicle) -> PhysicsResult<ElementPartials> {
        let cartesian = state.elements.to_cartesian(self.system);
        let mu = self.system.get_mu_km3_s2();

        let r = cartesian.radius_km;
        let v = cartesian.velocity_km_s;
        let gravity = -mu / r.norm().powi(3);

        let perturbation =
            self.forces
                .compute_forces(state.epoch(), &cartesian, vehicle, self.system)?;

        Ok(ElementPartials::new(
            ElementSetId::Cartesian,
            Vector6::new(
                v.x(),
                v.y(),
                v.z(),
                gravity * r.x() + perturbation.x(),
                gravity * r.y() + perturbation.y(),
                gravity * r.z() + perturbation.z(),
            ),
        ))
    }
}

#[cfg(test)]
mod ut_cowell {
    use super::*;
    use crate::elements::{Cartesian, OrbitalElements};
    use crate::frames::Eci;
    use crate::platforms::Spacecraft;
    use crate::propagation::force_models::OblatenessForce;
    use crate::time::Date;

    #[test]
    fn test_reduces_to_two_body_with_empty_model() {
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        let state = State::new(
            OrbitalElements::Cartesian(Cartesian::<Eci>::new(8000.0, 100.0, 0.0, 0.1, 7.0, 0.5)),
            epoch,
        );
        let vehicle = Vehicle::new(&Spacecraft::new("cw", state));

        let cowell = Cowell::new(&sys, ForceModel::new());
        let two_body = super::super::TwoBody::new(&sys);
        assert_eq!(
            cowell.evaluate(&state, &vehicle).unwrap(),
            two_body.evaluate(&state, &vehicle).unwrap()
        );
    }

    #[test]
    fn test_perturbation_changes_rates() {
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        let state = State::new(
            OrbitalElements::Cartesian(Cartesian::<Eci>::new(7000.0, 0.0, 500.0, 0.0, 7.5, 0.0)),
            epoch,
        );
        let vehicle = Vehicle::new(&Spacecraft::new("cw", state));

        let mut forces = ForceModel::new();
        forces.add(OblatenessForce::new(&sys, 2, 0));
        let cowell = Cowell::new(&sys, forces);
        let two_body = super::super::TwoBody::new(&sys);

        let with_j2 = cowell.evaluate(&state, &vehicle).unwrap();
        let without = two_body.evaluate(&state, &vehicle).unwrap();
        assert_ne!(with_j2, without);
        // Velocity rows are untouched by the perturbation.
        assert_eq!(with_j2.rates_per_s()[0], without.rates_per_s()[0]);
    }
}
