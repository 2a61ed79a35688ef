/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use crate::bodies::BodyId;
use crate::frames::geodesy::{geodetic_to_ecef, Geodetic};
use crate::frames::{Ecef, Eci};
use crate::math::vectors::{RadiusVector, UnitVector};
use crate::system::System;
use crate::time::Date;
use crate::errors::PhysicsResult;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A fixed point on a body's surface (or at altitude above it), the geometry
/// provider for horizon-crossing visibility checks.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundPoint {
    id: u64,
    body: BodyId,
    geodetic: Geodetic,
}

impl GroundPoint {
    pub fn new(body: BodyId, latitude_rad: f64, longitude_rad: f64, altitude_km: f64) -> Self {
        let geodetic = Geodetic {
            latitude_rad,
            longitude_rad,
            altitude_km,
        };
        let mut hasher = DefaultHasher::new();
        body.hash(&mut hasher);
        latitude_rad.to_bits().hash(&mut hasher);
        longitude_rad.to_bits().hash(&mut hasher);
        altitude_km.to_bits().hash(&mut hasher);
        Self {
            id: hasher.finish(),
            body,
            geodetic,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn latitude_rad(&self) -> f64 {
        self.geodetic.latitude_rad
    }

    pub fn longitude_rad(&self) -> f64 {
        self.geodetic.longitude_rad
    }

    pub fn altitude_km(&self) -> f64 {
        self.geodetic.altitude_km
    }

    /// Body-fixed position of the point.
    pub fn position_ecef(&self, sys: &System) -> PhysicsResult<RadiusVector<Ecef>> {
        let body = sys.get_body(self.body)?;
        Ok(geodetic_to_ecef(
            &self.geodetic,
            body.equatorial_radius_km,
            body.polar_radius_km,
        ))
    }

    /// Inertial position of the point at a date (Earth only rotates by GMST
    /// in this toolkit, so the point's body must be the Earth for the
    /// rotation to be meaningful).
    pub fn position_eci(&self, date: Date, sys: &System) -> PhysicsResult<RadiusVector<Eci>> {
        let ecef = self.position_ecef(sys)?;
        Ok(Ecef::rotate_out_of_this_frame(&ecef, date))
    }

    /// Zenith (outward surface normal approximated as radial) in inertial
    /// axes at a date.
    pub fn zenith_eci(&self, date: Date, sys: &System) -> PhysicsResult<UnitVector<Eci>> {
        Ok(self.position_eci(date, sys)?.unit())
    }
}

#[cfg(test)]
mod ut_ground {
    use super::*;

    #[test]
    fn test_equatorial_point() {
        let sys = System::earth_moon();
        let gp = GroundPoint::new(BodyId::Earth, 0.0, 0.0, 0.0);
        let r = gp.position_ecef(&sys).unwrap();
        assert!((r.norm() - 6378.1).abs() < 1e-6);
        assert!((r.x() - 6378.1).abs() < 1e-6);

        let zenith = gp.zenith_eci(Date::j2000(), &sys).unwrap();
        assert!((zenith.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_id_stability() {
        let a = GroundPoint::new(BodyId::Earth, 0.4, -1.2, 0.1);
        let b = GroundPoint::new(BodyId::Earth, 0.4, -1.2, 0.1);
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), GroundPoint::new(BodyId::Earth, 0.5, -1.2, 0.1).id());
    }
}
