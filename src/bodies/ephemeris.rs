/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use crate::constants::SECONDS_PER_DAY;
use crate::errors::{EphemerisOutOfRangeSnafu, PhysicsResult};
use crate::frames::Hci;
use crate::math::interpolation::{chebyshev_eval, chebyshev_eval_derivative};
use crate::math::utils::normalize;
use crate::math::vectors::{RadiusVector, VelocityVector};
use crate::time::Date;
use snafu::ensure;

/// Chebyshev-coefficient ephemeris for one body: consecutive windows of
/// `days_per_window` days starting at `start_mjd_days`, each holding one
/// coefficient series per Cartesian axis, in kilometers of heliocentric
/// inertial position.
///
/// The data layout is exactly the `(time_per_coefficient, Vec<[Vec<f64>; 3]>)`
/// pair the loading layer hands over; how the coefficients were produced is
/// outside this crate.
#[derive(Clone, Debug, PartialEq)]
pub struct EphemerisTable {
    start_mjd_days: f64,
    days_per_window: f64,
    coefficients: Vec<[Vec<f64>; 3]>,
}

impl EphemerisTable {
    pub fn new(
        start_mjd_days: f64,
        days_per_window: f64,
        coefficients: Vec<[Vec<f64>; 3]>,
    ) -> Self {
        Self {
            start_mjd_days,
            days_per_window,
            coefficients,
        }
    }

    /// Coverage as (start, end) in modified Julian days.
    pub fn coverage_mjd_days(&self) -> (f64, f64) {
        (
            self.start_mjd_days,
            self.start_mjd_days + self.days_per_window * self.coefficients.len() as f64,
        )
    }

    /// Evaluates position and velocity at the provided date.
    pub fn evaluate(
        &self,
        date: Date,
    ) -> PhysicsResult<(RadiusVector<Hci>, VelocityVector<Hci>)> {
        let mjd = date.mjd_days();
        let (start, end) = self.coverage_mjd_days();
        ensure!(
            !self.coefficients.is_empty() && mjd >= start && mjd <= end,
            EphemerisOutOfRangeSnafu {
                mjd_days: mjd,
                start_mjd_days: start,
                end_mjd_days: end,
            }
        );

        let index = (((mjd - start) / self.days_per_window) as usize)
            .min(self.coefficients.len() - 1);
        let window_start = start + index as f64 * self.days_per_window;
        let x = normalize(mjd, window_start, window_start + self.days_per_window);

        let series = &self.coefficients[index];
        let position = RadiusVector::new(
            chebyshev_eval(&series[0], x),
            chebyshev_eval(&series[1], x),
            chebyshev_eval(&series[2], x),
        );
        // d/dt = d/dx · dx/dt with dx/dt = 2 / window length (per day).
        let per_day = 2.0 / self.days_per_window;
        let velocity = VelocityVector::new(
            chebyshev_eval_derivative(&series[0], x) * per_day / SECONDS_PER_DAY,
            chebyshev_eval_derivative(&series[1], x) * per_day / SECONDS_PER_DAY,
            chebyshev_eval_derivative(&series[2], x) * per_day / SECONDS_PER_DAY,
        );

        Ok((position, velocity))
    }
}

#[cfg(test)]
mod ut_ephemeris {
    use super::*;
    use crate::errors::PhysicsError;
    use approx::assert_relative_eq;

    /// A one-window table encoding x(t) = t_norm in km over a 2-day window.
    fn linear_table(start_mjd: f64) -> EphemerisTable {
        EphemerisTable::new(
            start_mjd,
            2.0,
            vec![[vec![0.0, 1.0], vec![5.0], vec![0.0]]],
        )
    }

    #[test]
    fn test_linear_window() {
        let start = 51_544.0;
        let table = linear_table(start);
        let date = Date::j2000(); // 51544.5 MJD, half a day into the window
        let (pos, vel) = table.evaluate(date).unwrap();
        // x_norm at 0.5 days into a 2-day window is -0.5.
        assert_relative_eq!(pos.x(), -0.5, epsilon = 1e-12);
        assert_relative_eq!(pos.y(), 5.0, epsilon = 1e-12);
        // dx/dt = 1 per normalized unit -> 1 km/day velocity scale.
        assert_relative_eq!(vel.x(), 1.0 / 86_400.0, epsilon = 1e-15);
    }

    #[test]
    fn test_out_of_range() {
        let table = linear_table(10_000.0);
        let err = table.evaluate(Date::j2000()).unwrap_err();
        assert!(matches!(err, PhysicsError::EphemerisOutOfRange { .. }));
    }
}
