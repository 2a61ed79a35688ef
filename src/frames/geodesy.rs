/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::Ecef;
use crate::errors::{ConvergenceSnafu, PhysicsResult};
use crate::math::vectors::RadiusVector;
use snafu::ensure;

/// Geodetic coordinates on an oblate body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Geodetic {
    pub latitude_rad: f64,
    pub longitude_rad: f64,
    pub altitude_km: f64,
}

const MAX_ITER: usize = 1_000;
const ERROR_BOUND_KM: f64 = 1.0e-9;

/// Converts a body-fixed position into geodetic latitude, longitude, and
/// altitude by fixed-point iteration on the prime-vertical correction.
pub fn ecef_to_geodetic(
    r_ecef: &RadiusVector<Ecef>,
    equatorial_radius_km: f64,
    polar_radius_km: f64,
) -> PhysicsResult<Geodetic> {
    let x = r_ecef.x();
    let y = r_ecef.y();
    let z = r_ecef.z();

    let flattening = (equatorial_radius_km - polar_radius_km) / equatorial_radius_km;
    let e_sq = (2.0 - flattening) * flattening;

    let mut dz = e_sq * z;
    let mut prime_vertical = 0.0;
    let mut err = 1.0;
    let mut iterations = 0;
    while err > ERROR_BOUND_KM && iterations < MAX_ITER {
        let sin_lat = (z + dz) / (x * x + y * y + (z + dz) * (z + dz)).sqrt();
        prime_vertical = equatorial_radius_km / (1.0 - e_sq * sin_lat * sin_lat).sqrt();
        err = (dz - prime_vertical * e_sq * sin_lat).abs();
        dz = prime_vertical * e_sq * sin_lat;
        iterations += 1;
    }

    ensure!(
        iterations < MAX_ITER,
        ConvergenceSnafu {
            action: "ECEF to geodetic conversion".to_string(),
            iterations,
        }
    );

    let longitude_rad = y.atan2(x);
    let latitude_rad = (z + dz).atan2((x * x + y * y).sqrt());
    let altitude_km =
        ((x * x + y * y + (z + dz) * (z + dz)).sqrt() - prime_vertical).max(0.0);

    Ok(Geodetic {
        latitude_rad,
        longitude_rad,
        altitude_km,
    })
}

/// Converts geodetic coordinates into a body-fixed position, closed form.
pub fn geodetic_to_ecef(
    geodetic: &Geodetic,
    equatorial_radius_km: f64,
    polar_radius_km: f64,
) -> RadiusVector<Ecef> {
    let (sin_lat, cos_lat) = geodetic.latitude_rad.sin_cos();
    let (sin_lon, cos_lon) = geodetic.longitude_rad.sin_cos();

    let flattening = (equatorial_radius_km - polar_radius_km) / equatorial_radius_km;
    let prime_vertical = equatorial_radius_km
        / (1.0 - flattening * (2.0 - flattening) * sin_lat * sin_lat).sqrt();

    RadiusVector::new(
        (prime_vertical + geodetic.altitude_km) * cos_lat * cos_lon,
        (prime_vertical + geodetic.altitude_km) * cos_lat * sin_lon,
        ((1.0 - flattening) * (1.0 - flattening) * prime_vertical + geodetic.altitude_km)
            * sin_lat,
    )
}

#[cfg(test)]
mod ut_geodesy {
    use super::*;

    const EARTH_EQ_KM: f64 = 6378.1;
    const EARTH_POLAR_KM: f64 = 6356.752;

    #[test]
    fn test_equator_round_trip() {
        let geo = Geodetic {
            latitude_rad: 0.0,
            longitude_rad: 0.5,
            altitude_km: 0.0,
        };
        let r = geodetic_to_ecef(&geo, EARTH_EQ_KM, EARTH_POLAR_KM);
        assert!((r.norm() - EARTH_EQ_KM).abs() < 1e-6);

        let back = ecef_to_geodetic(&r, EARTH_EQ_KM, EARTH_POLAR_KM).unwrap();
        assert!((back.latitude_rad - geo.latitude_rad).abs() < 1e-9);
        assert!((back.longitude_rad - geo.longitude_rad).abs() < 1e-9);
        assert!(back.altitude_km.abs() < 1e-6);
    }

    #[test]
    fn test_mid_latitude_round_trip() {
        let geo = Geodetic {
            latitude_rad: 0.7,
            longitude_rad: -2.1,
            altitude_km: 420.0,
        };
        let r = geodetic_to_ecef(&geo, EARTH_EQ_KM, EARTH_POLAR_KM);
        let back = ecef_to_geodetic(&r, EARTH_EQ_KM, EARTH_POLAR_KM).unwrap();
        assert!((back.latitude_rad - geo.latitude_rad).abs() < 1e-8);
        assert!((back.longitude_rad - geo.longitude_rad).abs() < 1e-9);
        assert!((back.altitude_km - geo.altitude_km).abs() < 1e-5);
    }

    #[test]
    fn test_pole() {
        let r = RadiusVector::<Ecef>::new(0.0, 0.0, EARTH_POLAR_KM + 100.0);
        let geo = ecef_to_geodetic(&r, EARTH_EQ_KM, EARTH_POLAR_KM).unwrap();
        assert!((geo.latitude_rad - core::f64::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((geo.altitude_km - 100.0).abs() < 0.5);
    }
}
