/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::Force;
use crate::elements::Cartesian;
use crate::errors::PhysicsResult;
use crate::frames::Eci;
use crate::math::vectors::AccelVector;
use crate::platforms::Vehicle;
use crate::system::System;
use crate::time::Date;

/// Third-body gravity from every registered non-central body, with the
/// classic indirect term for the non-inertiality of the central frame:
///
/// a = Σ µ_B [ r_sc→B / |r_sc→B|³ − r_cb→B / |r_cb→B|³ ]
#[derive(Clone, Copy, Debug, Default)]
pub struct NBodyForce;

impl Force for NBodyForce {
    fn name(&self) -> &'static str {
        "n-body"
    }

    fn compute_force(
        &self,
        date: Date,
        state: &Cartesian<Eci>,
        _vehicle: &Vehicle,
        sys: &System,
    ) -> PhysicsResult<AccelVector<Eci>> {
        let central = sys.central_id();
        let mut accel = AccelVector::<Eci>::zeros();

        for body in sys.bodies() {
            if body.id == central {
                continue;
            }

            let r_center_to_body = sys
                .get_relative_position(date, central, body.id)?
                .force_frame::<Eci>();
            let r_vehicle_to_body = r_center_to_body - state.radius_km;

            let direct = body.mu_km3_s2 / r_vehicle_to_body.norm().powi(3);
            let indirect = body.mu_km3_s2 / r_center_to_body.norm().powi(3);

            accel = accel
                + AccelVector::from_vector(
                    r_vehicle_to_body.as_vector() * direct
                        - r_center_to_body.as_vector() * indirect,
                );
        }

        Ok(accel)
    }
}

#[cfg(test)]
mod ut_nbody {
    use super::*;
    use crate::bodies::BodyId;
    use crate::elements::OrbitalElements;
    use crate::platforms::Spacecraft;
    use crate::state::State;

    #[test]
    fn test_lunar_perturbation_magnitude() {
        let sys = System::earth_moon();
        let date = Date::j2000();
        let state = Cartesian::<Eci>::new(42_164.0, 0.0, 0.0, 0.0, 3.0747, 0.0);
        let sat = Spacecraft::new(
            "geo",
            State::new(OrbitalElements::Cartesian(state), date),
        );
        let vehicle = Vehicle::new(&sat);

        let accel = NBodyForce
            .compute_force(date, &state, &vehicle, &sys)
            .unwrap();
        // Lunar tidal acceleration at GEO is on the order of 1e-9 km/s².
        assert!(accel.norm() > 1e-10);
        assert!(accel.norm() < 1e-7);
    }

    #[test]
    fn test_no_auxiliary_bodies_no_force() {
        let sys = System::new(BodyId::Earth, &[]);
        let date = Date::j2000();
        let state = Cartesian::<Eci>::new(7000.0, 0.0, 0.0, 0.0, 7.5, 0.0);
        let sat = Spacecraft::new(
            "leo",
            State::new(OrbitalElements::Cartesian(state), date),
        );
        let vehicle = Vehicle::new(&sat);
        let accel = NBodyForce
            .compute_force(date, &state, &vehicle, &sys)
            .unwrap();
        assert_eq!(accel.norm(), 0.0);
    }
}
