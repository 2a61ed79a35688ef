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

/// Gauss variation of parameters in the equinoctial elements
/// (p, f, g, h, k, L), driven by the RTN decomposition of the force-model
/// acceleration. Non-singular for circular and equatorial orbits, which is
/// the point of integrating in this set.
pub struct EquinoctialVop<'a> {
    system: &'a System,
    forces: ForceModel,
}

impl<'a> EquinoctialVop<'a> {
    pub fn new(system: &'a System, forces: ForceModel) -> Self {
        Self { system, forces }
    }
}

impl EquationsOfMotion for EquinoctialVop<'_> {
    fn expected_set(&self) -> ElementSetId {
        ElementSetId::Equinoctial
    }

    fn system(&self) -> &System {
        self.system
    }

    fn evaluate(&self, state: &State, vehicle: &Vehicle) -> PhysicsResult<ElementPartials> {
        let elements = state.elements.to_equinoctial(self.system);
        let cartesian = state.elements.to_cartesian(self.system);
        let mu = self.system.get_mu_km3_s2();

        let p = elements.semilatus_km;
        let f = elements.f;
        let g = elements.g;
        let h = elements.h;
        let k = elements.k;
        let big_l = elements.true_longitude_rad;

        let r = cartesian.radius_km;
        let v = cartesian.velocity_km_s;

        // RTN decomposition of the perturbing acceleration.
        let r_hat = r.unit();
        let n_hat = r.cross(&v).unit();
        let t_hat = n_hat.cross(&r_hat);

        let accel = self
            .forces
            .compute_forces(state.epoch(), &cartesian, vehicle, self.system)?;
        let radial = accel.dot(&r_hat);
        let normal = accel.dot(&n_hat);
        let tangential = accel.dot(&t_hat);

        let (sin_l, cos_l) = big_l.sin_cos();

        let term_a = (p / mu).sqrt();
        let term_b = 1.0 + f * cos_l + g * sin_l;
        let s_sq = 1.0 + h * h + k * k;

        let term_c = (h * sin_l - k * cos_l) / term_b;
        let term_d = term_a * s_sq / (2.0 * term_b);

        let dp_dt = 2.0 * p / term_b * term_a * tangential;
        let df_dt = term_a
            * (radial * sin_l + ((term_b + 1.0) * cos_l + f) / term_b * tangential
                - g * term_c * normal);
        let dg_dt = term_a
            * (-radial * cos_l
                + ((term_b + 1.0) * sin_l + g) / term_b * tangential
                + f * term_c * normal);
        let dh_dt = term_d * cos_l * normal;
        let dk_dt = term_d * sin_l * normal;
        let dl_dt = (mu * p).sqrt() * term_b * term_b / (p * p) + term_a * term_c * normal;

        Ok(ElementPartials::new(
            ElementSetId::Equinoctial,
            Vector6::new(dp_dt, df_dt, dg_dt, dh_dt, dk_dt, dl_dt),
        ))
    }
}

#[cfg(test)]
mod ut_equinoctial_vop {
    use super::*;
    use crate::elements::{Equinoctial, Keplerian, OrbitalElements};
    use crate::platforms::Spacecraft;
    use crate::time::Date;
    use approx::assert_relative_eq;

    #[test]
    fn test_unperturbed_true_longitude_rate() {
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        let kep = Keplerian::new(9000.0, 0.1, 0.4, 0.6, 1.1, 0.2);
        let eq = Equinoctial::from_keplerian(&kep);
        let state = State::new(OrbitalElements::Equinoctial(eq), epoch);
        let vehicle = Vehicle::new(&Spacecraft::new("eqv", state));

        let eom = EquinoctialVop::new(&sys, ForceModel::new());
        assert_eq!(eom.expected_set(), ElementSetId::Equinoctial);
        let rates = *eom.evaluate(&state, &vehicle).unwrap().rates_per_s();

        // Shape and orientation are constant without perturbations.
        for component in rates.iter().take(5) {
            assert_relative_eq!(*component, 0.0, epsilon = 1e-12);
        }

        // dL/dt = √(µp)·(1 + f cos L + g sin L)²/p².
        let mu = sys.get_mu_km3_s2();
        let (sin_l, cos_l) = eq.true_longitude_rad.sin_cos();
        let term_b = 1.0 + eq.f * cos_l + eq.g * sin_l;
        let expected = (mu * eq.semilatus_km).sqrt() * term_b * term_b
            / (eq.semilatus_km * eq.semilatus_km);
        assert_relative_eq!(rates[5], expected, max_relative = 1e-12);
    }

    #[test]
    fn test_circular_equatorial_is_regular() {
        // The very geometry that breaks the Keplerian VoP is regular here.
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        let eq = Equinoctial::new(7000.0, 0.0, 0.0, 0.0, 0.0, 0.7);
        let state = State::new(OrbitalElements::Equinoctial(eq), epoch);
        let vehicle = Vehicle::new(&Spacecraft::new("eqv", state));

        let eom = EquinoctialVop::new(&sys, ForceModel::new());
        let rates = *eom.evaluate(&state, &vehicle).unwrap().rates_per_s();
        for component in rates.iter() {
            assert!(!component.is_nan());
        }
        assert!(rates[5] > 0.0);
    }
}
