/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

pub mod catalog;
pub mod ephemeris;

pub use ephemeris::EphemerisTable;

use crate::constants::{DAYS_PER_JULIAN_CENTURY, JD_J2000, MAX_ITERATIONS, SECONDS_PER_DAY};
use crate::elements::Keplerian;
use crate::errors::{ConvergenceSnafu, PhysicsResult};
use crate::frames::Hci;
use crate::math::angles::{between_0_two_pi, between_pm_180};
use crate::math::vectors::{RadiusVector, VelocityVector};
use crate::time::Date;
use core::fmt;
use snafu::ensure;

/// Identifier of a built-in celestial body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BodyId {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Phobos,
    Deimos,
    Jupiter,
    Io,
    Europa,
    Ganymede,
    Callisto,
    Saturn,
    Titan,
    Rhea,
    Iapetus,
    Uranus,
    Titania,
    Oberon,
    Neptune,
    Triton,
}

impl BodyId {
    pub const fn name(&self) -> &'static str {
        match self {
            BodyId::Sun => "Sun",
            BodyId::Mercury => "Mercury",
            BodyId::Venus => "Venus",
            BodyId::Earth => "Earth",
            BodyId::Moon => "Moon",
            BodyId::Mars => "Mars",
            BodyId::Phobos => "Phobos",
            BodyId::Deimos => "Deimos",
            BodyId::Jupiter => "Jupiter",
            BodyId::Io => "Io",
            BodyId::Europa => "Europa",
            BodyId::Ganymede => "Ganymede",
            BodyId::Callisto => "Callisto",
            BodyId::Saturn => "Saturn",
            BodyId::Titan => "Titan",
            BodyId::Rhea => "Rhea",
            BodyId::Iapetus => "Iapetus",
            BodyId::Uranus => "Uranus",
            BodyId::Titania => "Titania",
            BodyId::Oberon => "Oberon",
            BodyId::Neptune => "Neptune",
            BodyId::Triton => "Triton",
        }
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

/// Mean orbital elements at the reference epoch and their secular rates per
/// Julian century, in the JPL approximate-ephemerides convention: semi-major
/// axis, eccentricity, inclination, longitude of ascending node, longitude of
/// perihelion, and mean longitude.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SecularElements {
    pub sma_km: f64,
    pub ecc: f64,
    pub inc_deg: f64,
    pub raan_deg: f64,
    pub long_peri_deg: f64,
    pub mean_long_deg: f64,
    pub sma_km_per_cy: f64,
    pub ecc_per_cy: f64,
    pub inc_deg_per_cy: f64,
    pub raan_deg_per_cy: f64,
    pub long_peri_deg_per_cy: f64,
    pub mean_long_deg_per_cy: f64,
    /// Second-order mean-anomaly correction for the outer planets:
    /// M += b·T² + c·cos(f·T) + s·sin(f·T), all in degrees.
    pub correction: Option<OuterPlanetCorrection>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OuterPlanetCorrection {
    pub b_deg: f64,
    pub c_deg: f64,
    pub s_deg: f64,
    pub f_deg: f64,
}

/// One row of a piecewise-exponential atmosphere table: valid up to
/// `ceiling_km`, referenced at `base_km` with density `rho_kg_m3` and scale
/// height `scale_km`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AtmosphereRow {
    pub ceiling_km: f64,
    pub base_km: f64,
    pub rho_kg_m3: f64,
    pub scale_km: f64,
}

/// A gravitating body: physical record, secular mean elements about its
/// parent, optional atmosphere table, and optional bound ephemeris.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    pub name: &'static str,
    pub id: BodyId,
    pub parent: Option<BodyId>,
    pub kind: BodyKind,
    pub reference_epoch: Date,
    pub mu_km3_s2: f64,
    pub mass_kg: f64,
    pub equatorial_radius_km: f64,
    pub polar_radius_km: f64,
    pub crash_radius_km: f64,
    pub j2: f64,
    pub j3: f64,
    pub axial_tilt_deg: f64,
    pub rotation_rate_deg_day: f64,
    pub sidereal_period_days: f64,
    pub secular: Option<SecularElements>,
    pub atmosphere: Option<&'static [AtmosphereRow]>,
    pub ephemeris: Option<EphemerisTable>,
}

impl CelestialBody {
    /// Body rotation rate in radians per second.
    pub fn rotation_rate_rad_s(&self) -> f64 {
        self.rotation_rate_deg_day.to_radians() / SECONDS_PER_DAY
    }

    /// Keplerian elements of this body about its parent at the requested
    /// date, by linear secular extrapolation of the mean elements, with the
    /// outer-planet correction applied to the mean anomaly when present.
    pub fn orbital_elements_at(&self, date: Date) -> PhysicsResult<Keplerian> {
        let secular = match self.secular {
            Some(secular) => secular,
            // The root body of a chain does not orbit anything.
            None => return Ok(Keplerian::default()),
        };

        let centuries = (date.jd_days() - JD_J2000) / DAYS_PER_JULIAN_CENTURY;

        let sma_km = secular.sma_km + secular.sma_km_per_cy * centuries;
        let ecc = secular.ecc + secular.ecc_per_cy * centuries;
        let inc_deg = secular.inc_deg + secular.inc_deg_per_cy * centuries;
        let raan_deg = secular.raan_deg + secular.raan_deg_per_cy * centuries;
        let long_peri_deg = secular.long_peri_deg + secular.long_peri_deg_per_cy * centuries;
        let mean_long_deg = secular.mean_long_deg + secular.mean_long_deg_per_cy * centuries;

        let aop_deg = long_peri_deg - raan_deg;
        let mut mean_anomaly_deg = mean_long_deg - long_peri_deg;
        if let Some(correction) = secular.correction {
            let ft_rad = (correction.f_deg * centuries).to_radians();
            mean_anomaly_deg += correction.b_deg * centuries * centuries
                + correction.c_deg * ft_rad.cos()
                + correction.s_deg * ft_rad.sin();
        }
        mean_anomaly_deg = between_pm_180(mean_anomaly_deg);

        let ecc_anomaly_rad = solve_kepler(mean_anomaly_deg.to_radians(), ecc)?;
        let true_anomaly_rad = 2.0
            * ((1.0 + ecc).sqrt() * (ecc_anomaly_rad / 2.0).sin())
                .atan2((1.0 - ecc).sqrt() * (ecc_anomaly_rad / 2.0).cos());

        Ok(Keplerian::new(
            sma_km,
            ecc,
            inc_deg.to_radians(),
            between_0_two_pi(raan_deg.to_radians()),
            between_0_two_pi(aop_deg.to_radians()),
            between_0_two_pi(true_anomaly_rad),
        ))
    }

    /// Position and velocity from the bound Chebyshev ephemeris, in the
    /// heliocentric inertial frame. Errors when no ephemeris is bound or the
    /// date is outside coverage.
    pub fn ephemeris_at(
        &self,
        date: Date,
    ) -> PhysicsResult<(RadiusVector<Hci>, VelocityVector<Hci>)> {
        match &self.ephemeris {
            Some(table) => table.evaluate(date),
            None => crate::errors::EphemerisOutOfRangeSnafu {
                mjd_days: date.mjd_days(),
                start_mjd_days: 0.0,
                end_mjd_days: 0.0,
            }
            .fail(),
        }
    }

    /// Binds a Chebyshev ephemeris table to this body.
    pub fn with_ephemeris(mut self, table: EphemerisTable) -> Self {
        self.ephemeris = Some(table);
        self
    }

    /// Atmospheric density at the given altitude, in kg/m³. Bodies without an
    /// atmosphere table return zero. The table row is the first whose ceiling
    /// exceeds the query altitude; density decays exponentially from the
    /// row's base sample with its scale height.
    pub fn atmospheric_density(&self, _date: Date, altitude_km: f64) -> f64 {
        let Some(rows) = self.atmosphere else {
            return 0.0;
        };
        match rows.iter().find(|row| row.ceiling_km > altitude_km) {
            Some(row) => row.rho_kg_m3 * ((row.base_km - altitude_km) / row.scale_km).exp(),
            // Above the last tabulated band the model returns vacuum.
            None => 0.0,
        }
    }
}

/// Newton inversion of Kepler's equation M = E − e·sin E, elliptical branch.
pub fn solve_kepler(mean_anomaly_rad: f64, ecc: f64) -> PhysicsResult<f64> {
    let mut ecc_anomaly = if ecc < 0.8 {
        mean_anomaly_rad
    } else {
        core::f64::consts::PI.copysign(mean_anomaly_rad)
    };
    let mut iterations = 0;
    loop {
        let delta = (ecc_anomaly - ecc * ecc_anomaly.sin() - mean_anomaly_rad)
            / (1.0 - ecc * ecc_anomaly.cos());
        ecc_anomaly -= delta;
        iterations += 1;
        if delta.abs() < 1e-12 {
            return Ok(ecc_anomaly);
        }
        ensure!(
            iterations < MAX_ITERATIONS,
            ConvergenceSnafu {
                action: "Kepler equation inversion".to_string(),
                iterations,
            }
        );
    }
}
