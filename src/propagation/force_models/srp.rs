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
use crate::bodies::BodyId;
use crate::constants::{AU_KM, SRP_PRESSURE_1AU_N_M2, SUN_RADIUS_KM};
use crate::elements::Cartesian;
use crate::errors::PhysicsResult;
use crate::frames::Eci;
use crate::math::angles::{clamped_acos, clamped_asin};
use crate::math::vectors::AccelVector;
use crate::platforms::Vehicle;
use crate::system::System;
use crate::time::Date;

/// Solar radiation pressure with conical umbra/penumbra shadowing (the
/// standard Vallado construction). A Sun-centered system skips the shadow
/// test entirely: there is no occulting central body between the vehicle and
/// its own primary.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolarRadiationPressure;

/// Fraction of sunlight reaching the vehicle per shadow classification.
const LIT: f64 = 1.0;
const PENUMBRA: f64 = 0.5;
const UMBRA: f64 = 0.0;

impl Force for SolarRadiationPressure {
    fn name(&self) -> &'static str {
        "solar radiation pressure"
    }

    fn compute_force(
        &self,
        date: Date,
        state: &Cartesian<Eci>,
        vehicle: &Vehicle,
        sys: &System,
    ) -> PhysicsResult<AccelVector<Eci>> {
        let center = sys.get_central_body();
        let sun_centered = center.id == BodyId::Sun;

        let r = state.radius_km;
        let rmag_km = r.norm();

        // Geometry to the Sun through the body chain.
        let r_center_to_sun = if sun_centered {
            -r
        } else {
            sys.get_relative_position(date, center.id, BodyId::Sun)?
                .force_frame::<Eci>()
        };
        let center_sun_km = r_center_to_sun.norm();

        let r_vehicle_to_sun = if sun_centered {
            -r
        } else {
            r_center_to_sun - r
        };
        let vehicle_sun_km = r_vehicle_to_sun.norm();

        // Base pressure scaled from its 1 AU reference by 1/r².
        let pressure_n_m2 =
            SRP_PRESSURE_1AU_N_M2 * (AU_KM / vehicle_sun_km) * (AU_KM / vehicle_sun_km);

        let mut lit_fraction = LIT;
        if !sun_centered {
            // Angle between the Sun direction and the vehicle direction seen
            // from the central body, against the two cone reference angles.
            let ref_angle =
                clamped_acos(r_center_to_sun.dot(&r) / (center_sun_km * rmag_km));
            let ref_angle_1 = clamped_acos(center.equatorial_radius_km / rmag_km);
            let ref_angle_2 = clamped_acos(center.equatorial_radius_km / center_sun_km);

            if ref_angle_1 + ref_angle_2 <= ref_angle {
                // Behind the body: umbra or penumbra by the shadow cone apex.
                let apex_km = center.equatorial_radius_km * center_sun_km
                    / (SUN_RADIUS_KM - center.equatorial_radius_km);

                let r_apex = crate::math::vectors::RadiusVector::<Eci>::from_vector(
                    -r_center_to_sun.unit().as_vector() * apex_km,
                );
                let apex_mag_km = r_apex.norm();
                let r_apex_to_vehicle = r - r_apex;
                let apex_vehicle_km = r_apex_to_vehicle.norm();

                // Angle at the cone apex between the shadow axis and the
                // vehicle direction.
                let cone_angle = clamped_acos(
                    -r_apex_to_vehicle.dot(&r_apex) / (apex_mag_km * apex_vehicle_km),
                );

                lit_fraction =
                    if cone_angle < clamped_asin(center.equatorial_radius_km / apex_km) {
                        UMBRA
                    } else {
                        PENUMBRA
                    };
            }
        }

        // (P·Cr·A/m) is in m/s²; scale into km/s² and point away from the Sun.
        let accel_mag_km_s2 = pressure_n_m2
            * vehicle.reflectivity_coefficient()
            * vehicle.solar_area_m2()
            / vehicle.mass_kg()
            * lit_fraction
            * 1.0e-3;

        Ok(AccelVector::from_vector(
            -r_vehicle_to_sun.unit().as_vector() * accel_mag_km_s2,
        ))
    }
}
