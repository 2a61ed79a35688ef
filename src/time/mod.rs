/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use crate::constants::{
    DAYS_PER_JULIAN_CENTURY, EARTH_ROTATION_DEG_PER_DAY, JD_J2000, MJD_OFFSET,
};
use crate::errors::{DateParsingSnafu, InvalidIntervalSnafu, PhysicsResult, SystemClockSnafu};
use crate::math::angles::between_0_360;
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::str::FromStr;
use hifitime::efmt::Format;
use hifitime::{Duration, Epoch};
use snafu::ensure;

/// A time point on the Julian-date clock (epoch noon 1 Jan 4713 BC), backed by
/// a hifitime [Epoch].
///
/// All calendar parsing, leap-second bookkeeping, and time-scale conversions
/// are delegated to hifitime; this type adds the astrodynamical accessors
/// (Julian day, modified Julian day, GMST) and the arithmetic contract
/// `Date ± Duration → Date`, `Date − Date → Duration`. Dates are totally
/// ordered by their TAI duration, regardless of the wrapped time scale.
#[derive(Copy, Clone)]
pub struct Date {
    epoch: Epoch,
}

impl PartialEq for Date {
    fn eq(&self, other: &Self) -> bool {
        self.epoch.to_tai_duration() == other.epoch.to_tai_duration()
    }
}

impl Eq for Date {}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.epoch.to_tai_duration().cmp(&other.epoch.to_tai_duration())
    }
}

impl Date {
    /// Builds a date from a hifitime epoch.
    pub const fn from_epoch(epoch: Epoch) -> Self {
        Self { epoch }
    }

    /// The J2000 reference epoch, 2000-01-01 12:00:00 UTC.
    pub fn j2000() -> Self {
        Self::from_epoch(Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0))
    }

    /// Reads the current time from the system clock.
    pub fn now() -> PhysicsResult<Self> {
        match Epoch::now() {
            Ok(epoch) => Ok(Self::from_epoch(epoch)),
            Err(err) => SystemClockSnafu {
                reason: format!("{err}"),
            }
            .fail(),
        }
    }

    /// Parses a calendar string against the provided hifitime format, e.g.
    /// `%Y-%m-%d %H:%M:%S`.
    pub fn from_format_str(calendar_date: &str, format: &str) -> PhysicsResult<Self> {
        let fmt = Format::from_str(format).map_err(|err| {
            DateParsingSnafu {
                input: calendar_date.to_string(),
                reason: format!("invalid format string: {err:?}"),
            }
            .build()
        })?;
        match fmt.parse(calendar_date) {
            Ok(epoch) => Ok(Self::from_epoch(epoch)),
            Err(err) => DateParsingSnafu {
                input: calendar_date.to_string(),
                reason: format!("{err}"),
            }
            .fail(),
        }
    }

    /// Parses an ISO-8601/RFC-3339 style calendar string, e.g.
    /// `2000-01-01T12:00:00 UTC`.
    pub fn from_gregorian_str(calendar_date: &str) -> PhysicsResult<Self> {
        match Epoch::from_gregorian_str(calendar_date) {
            Ok(epoch) => Ok(Self::from_epoch(epoch)),
            Err(err) => DateParsingSnafu {
                input: calendar_date.to_string(),
                reason: format!("{err}"),
            }
            .fail(),
        }
    }

    pub fn from_gregorian_utc(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Self {
        Self::from_epoch(Epoch::from_gregorian_utc_hms(
            year, month, day, hour, minute, second,
        ))
    }

    /// The wrapped hifitime epoch.
    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Julian date, in days of the UTC scale.
    pub fn jd_days(&self) -> f64 {
        self.epoch.to_jde_utc_days()
    }

    /// Modified Julian date, in days of the UTC scale.
    pub fn mjd_days(&self) -> f64 {
        self.jd_days() - MJD_OFFSET
    }

    /// Julian day number: the integral day count of the current Julian day.
    pub fn jdn(&self) -> i64 {
        self.jd_days().floor() as i64
    }

    /// Seconds in the UTC scale.
    pub fn utc_seconds(&self) -> f64 {
        self.epoch.to_utc_seconds()
    }

    /// Seconds in the TAI scale.
    pub fn tai_seconds(&self) -> f64 {
        self.epoch.to_tai_seconds()
    }

    /// Seconds in the GPS scale.
    pub fn gps_seconds(&self) -> f64 {
        self.epoch.to_gpst_seconds()
    }

    /// Seconds of the UNIX system clock.
    pub fn sys_seconds(&self) -> f64 {
        self.epoch.to_unix_seconds()
    }

    /// Julian centuries elapsed since J2000 in the UTC scale.
    pub fn centuries_since_j2000(&self) -> f64 {
        (self.jd_days() - JD_J2000) / DAYS_PER_JULIAN_CENTURY
    }

    /// Greenwich Mean Sidereal Time at this date, in radians within [0, 2π).
    ///
    /// Uses the cubic GMST polynomial at 0h UT of the current day plus the
    /// Earth-rotation advance over the UT fraction of day. Precession and
    /// nutation are deliberately not modeled.
    pub fn gmst_rad(&self) -> f64 {
        let jd = self.jd_days();
        // Julian days begin at noon; back up to the preceding midnight.
        let jd_midnight = (jd + 0.5).floor() - 0.5;
        let ut_fraction_days = jd - jd_midnight;

        let t0 = (jd_midnight - JD_J2000) / DAYS_PER_JULIAN_CENTURY;
        let gmst_midnight_deg =
            100.4606184 + 36000.77005361 * t0 + 3.8793e-4 * t0 * t0 - 2.583e-8 * t0 * t0 * t0;

        let gmst_deg = gmst_midnight_deg + EARTH_ROTATION_DEG_PER_DAY * ut_fraction_days;
        between_0_360(gmst_deg).to_radians()
    }
}

impl Add<Duration> for Date {
    type Output = Date;

    fn add(self, rhs: Duration) -> Date {
        Date::from_epoch(self.epoch + rhs)
    }
}

impl AddAssign<Duration> for Date {
    fn add_assign(&mut self, rhs: Duration) {
        self.epoch = self.epoch + rhs;
    }
}

impl Sub<Duration> for Date {
    type Output = Date;

    fn sub(self, rhs: Duration) -> Date {
        Date::from_epoch(self.epoch - rhs)
    }
}

impl SubAssign<Duration> for Date {
    fn sub_assign(&mut self, rhs: Duration) {
        self.epoch = self.epoch - rhs;
    }
}

impl Sub<Date> for Date {
    type Output = Duration;

    fn sub(self, rhs: Date) -> Duration {
        self.epoch - rhs.epoch
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.epoch)
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.epoch)
    }
}

/// A propagation span expressed as two offsets from a reference epoch, with
/// `start < end`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    start: Duration,
    end: Duration,
}

impl Interval {
    pub fn new(start: Duration, end: Duration) -> PhysicsResult<Self> {
        ensure!(end > start, InvalidIntervalSnafu { start, end });
        Ok(Self { start, end })
    }

    /// Interval starting at the reference epoch itself.
    pub fn until(end: Duration) -> PhysicsResult<Self> {
        Self::new(Duration::ZERO, end)
    }

    pub const fn start(&self) -> Duration {
        self.start
    }

    pub const fn end(&self) -> Duration {
        self.end
    }

    pub fn span(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod ut_time {
    use super::*;
    use approx::assert_relative_eq;
    use hifitime::TimeUnits;

    #[test]
    fn test_jd_accessors() {
        let j2000 = Date::j2000();
        assert_relative_eq!(j2000.jd_days(), JD_J2000, epsilon = 1e-9);
        assert_relative_eq!(j2000.mjd_days(), 51_544.5, epsilon = 1e-9);
        assert_eq!(j2000.jdn(), 2_451_545);
    }

    #[test]
    fn test_arithmetic_round_trip() {
        let epoch = Date::from_gregorian_utc(2023, 3, 1, 0, 0, 0);
        let dt = 3.5.days();
        assert_eq!((epoch + dt) - epoch, dt);
        assert_eq!((epoch + dt) - dt, epoch);
        assert!(epoch < epoch + 1.seconds());
    }

    #[test]
    fn test_parsing() {
        let parsed = Date::from_format_str("2000-01-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(parsed, Date::j2000());
        assert!(Date::from_format_str("not a date", "%Y-%m-%d %H:%M:%S").is_err());
    }

    #[test]
    fn test_gmst_j2000() {
        // Vallado: GMST at the J2000 epoch is 280.4606 deg.
        assert_relative_eq!(Date::j2000().gmst_rad(), 4.894_961, max_relative = 1e-4);
    }

    #[test]
    fn test_gmst_vallado_3_5() {
        // Vallado, Example 3-5: 1992-08-20 12:14:00 UT1 -> GMST 152.578788 deg
        let date = Date::from_gregorian_utc(1992, 8, 20, 12, 14, 0);
        assert_relative_eq!(
            date.gmst_rad().to_degrees(),
            152.578_78,
            max_relative = 1e-4
        );
    }

    #[test]
    fn test_interval() {
        let interval = Interval::until(1.days()).unwrap();
        assert_eq!(interval.span(), 1.days());
        assert!(Interval::new(2.days(), 1.days()).is_err());
    }

    #[test]
    fn test_time_scales_are_offset() {
        let date = Date::j2000();
        // TAI leads UTC by the accumulated leap seconds (32 s at J2000).
        assert_relative_eq!(date.tai_seconds() - date.utc_seconds(), 32.0, epsilon = 1e-6);
        // GPS trails TAI by a constant 19 s.
        assert_relative_eq!(date.tai_seconds() - date.gps_seconds(), 19.0, epsilon = 1e-6);
    }
}
