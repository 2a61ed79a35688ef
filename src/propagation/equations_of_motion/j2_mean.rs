/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::keplerian_vop::VOP_SINGULARITY_CLAMP;
use super::EquationsOfMotion;
use crate::elements::{ElementPartials, ElementSetId};
use crate::errors::PhysicsResult;
use crate::math::Vector6;
use crate::platforms::Vehicle;
use crate::state::State;
use crate::system::System;

/// Secular J2-only variation of parameters in the classical elements: the
/// shape (a, e) is frozen, and only the J2 normal acceleration drives the
/// orientation angles. The force model is implied, not configurable.
pub struct J2MeanVop<'a> {
    system: &'a System,
}

impl<'a> J2MeanVop<'a> {
    pub fn new(system: &'a System) -> Self {
        Self { system }
    }
}

impl EquationsOfMotion for J2MeanVop<'_> {
    fn expected_set(&self) -> ElementSetId {
        ElementSetId::Keplerian
    }

    fn system(&self) -> &System {
        self.system
    }

    fn evaluate(&self, state: &State, _vehicle: &Vehicle) -> PhysicsResult<ElementPartials> {
        let elements = state.elements.to_keplerian(self.system);
        let cartesian = state.elements.to_cartesian(self.system);

        let center = self.system.get_central_body();
        let mu = center.mu_km3_s2;
        let j2 = center.j2;
        let body_radius_km = center.equatorial_radius_km;

        let ecc = elements.ecc.max(VOP_SINGULARITY_CLAMP);
        let inc = elements.inc_rad.max(VOP_SINGULARITY_CLAMP);
        let aop = elements.aop_rad;
        let theta = elements.ta_rad;

        let r = cartesian.radius_km;
        let v = cartesian.velocity_km_s;
        let rmag = r.norm();
        let z = r.z();

        // J2 acceleration, of which only the orbit-normal component drives
        // the mean element rates.
        let term_a = -1.5 * j2 * mu * body_radius_km * body_radius_km / rmag.powi(5);
        let term_b = z * z / (rmag * rmag);
        let accel_oblateness = crate::math::Vector3::new(
            term_a * (1.0 - 5.0 * term_b) * r.x(),
            term_a * (1.0 - 5.0 * term_b) * r.y(),
            term_a * (3.0 - 5.0 * term_b) * z,
        );

        let n_hat = r.cross(&v).unit();
        let normal = accel_oblateness.dot(n_hat.as_vector());

        let h = (mu * elements.sma_km * (1.0 - ecc * ecc)).sqrt();
        let u = aop + theta;

        let dinc_dt = rmag / h * u.cos() * normal;
        let dtheta_dt = h / (rmag * rmag);
        let draan_dt = rmag * u.sin() / (h * inc.sin()) * normal;
        let daop_dt = -draan_dt * inc.cos();

        // A clamped inclination with a vanishing rate is pinned to the plane
        // instead of being allowed to jitter.
        let dinc_dt = if inc == VOP_SINGULARITY_CLAMP && dinc_dt.abs() <= VOP_SINGULARITY_CLAMP {
            0.0
        } else {
            dinc_dt
        };

        Ok(ElementPartials::new(
            ElementSetId::Keplerian,
            Vector6::new(0.0, 0.0, dinc_dt, draan_dt, daop_dt, dtheta_dt),
        ))
    }
}

#[cfg(test)]
mod ut_j2_mean {
    use super::*;
    use crate::elements::{Keplerian, OrbitalElements};
    use crate::platforms::Spacecraft;
    use crate::time::Date;
    use approx::assert_relative_eq;

    #[test]
    fn test_shape_is_frozen() {
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        let kep = Keplerian::new(7178.0, 0.01, 0.9, 0.5, 0.3, 1.0);
        let state = State::new(OrbitalElements::Keplerian(kep), epoch);
        let vehicle = Vehicle::new(&Spacecraft::new("j2m", state));

        let eom = J2MeanVop::new(&sys);
        let rates = *eom.evaluate(&state, &vehicle).unwrap().rates_per_s();
        assert_eq!(rates[0], 0.0);
        assert_eq!(rates[1], 0.0);
        assert!(rates[5] > 0.0);
    }

    #[test]
    fn test_node_regresses_for_prograde_orbit() {
        // A 51.6 deg prograde LEO regresses its node at roughly −5 deg/day;
        // the instantaneous rate must at least have the right sign and order.
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        let kep = Keplerian::new(6778.0, 0.001, 51.6_f64.to_radians(), 0.0, 0.0, 0.7);
        let state = State::new(OrbitalElements::Keplerian(kep), epoch);
        let vehicle = Vehicle::new(&Spacecraft::new("j2m", state));

        let eom = J2MeanVop::new(&sys);
        let rates = *eom.evaluate(&state, &vehicle).unwrap().rates_per_s();
        let draan_deg_day = rates[3].to_degrees() * 86_400.0;
        assert!(draan_deg_day.abs() < 30.0);
        // ν advances at close to the mean motion for the near-circular case.
        let n = kep.mean_motion_rad_s(sys.get_mu_km3_s2());
        assert_relative_eq!(rates[5], n, max_relative = 5e-3);
    }
}
