/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

/// One astronomical unit in kilometers (IAU 2012 definition).
pub const AU_KM: f64 = 1.495_978_707e8;

/// Julian date of the J2000 reference epoch (2000-01-01 12:00:00).
pub const JD_J2000: f64 = 2_451_545.0;

/// Offset between Julian date and modified Julian date.
pub const MJD_OFFSET: f64 = 2_400_000.5;

/// Days per Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Earth rotation rate used by the GMST polynomial, in degrees per day of UT.
pub const EARTH_ROTATION_DEG_PER_DAY: f64 = 1.002_737_909_350_795 * 360.0;

/// Mean solar radiation pressure at one astronomical unit, in N/m^2.
pub const SRP_PRESSURE_1AU_N_M2: f64 = 4.556_485_540_406_757e-6;

/// Solar photosphere radius in kilometers, used by the shadow cone construction.
pub const SUN_RADIUS_KM: f64 = 696_000.0;

/// Iteration cap shared by every Newton/fixed-point loop in the crate.
pub const MAX_ITERATIONS: usize = 10_000;
