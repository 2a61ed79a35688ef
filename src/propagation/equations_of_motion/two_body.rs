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
use crate::state::State;
use crate::system::System;

/// Pure Keplerian motion: d²r/dt² = −µ r/|r|³, integrated in Cartesian
/// coordinates.
pub struct TwoBody<'a> {
    system: &'a System,
}

impl<'a> TwoBody<'a> {
    pub fn new(system: &'a System) -> Self {
        Self { system }
    }
}

impl EquationsOfMotion for TwoBody<'_> {
    fn expected_set(&self) -> ElementSetId {
        ElementSetId::Cartesian
    }

    fn system(&self) -> &System {
        self.system
    }

    fn evaluate(&self, state: &State, _vehicle: &Vehicle) -> PhysicsResult<ElementPartials> {
        let cartesian = state.elements.to_cartesian(self.system);
        let mu = self.system.get_mu_km3_s2();

        let r = cartesian.radius_km;
        let v = cartesian.velocity_km_s;
        let gravity = -mu / r.norm().powi(3);

        Ok(ElementPartials::new(
            ElementSetId::Cartesian,
            Vector6::new(
                v.x(),
                v.y(),
                v.z(),
                gravity * r.x(),
                gravity * r.y(),
                gravity * r.z(),
            ),
        ))
    }
}
