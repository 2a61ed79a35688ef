/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

mod tableau;

pub use tableau::ButcherTableau;

use crate::constants::MAX_ITERATIONS;
use crate::elements::OrbitalElements;
use crate::errors::{PhysicsError, PhysicsResult, PropagationError};
use crate::math::Vector6;
use crate::platforms::Vehicle;
use crate::propagation::equations_of_motion::EquationsOfMotion;
use crate::propagation::events::Event;
use crate::state::{State, StateHistory};
use crate::time::{Date, Interval};
use hifitime::{Duration, TimeUnits};
use log::debug;

/// Selectable Butcher tableau.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepMethod {
    /// Classical fourth-order Runge–Kutta (fixed step only).
    Rk4,
    /// Runge–Kutta–Fehlberg 4(5).
    Rkf45,
    /// Runge–Kutta–Fehlberg 7(8).
    Rkf78,
    /// Dormand–Prince 4(5).
    Dop45,
    /// Prince–Dormand 8(7).
    Dop78,
}

impl StepMethod {
    fn tableau(&self) -> &'static ButcherTableau {
        match self {
            StepMethod::Rk4 => &tableau::RK4,
            StepMethod::Rkf45 => &tableau::RKF45,
            StepMethod::Rkf78 => &tableau::RKF78,
            StepMethod::Dop45 => &tableau::DOP45,
            StepMethod::Dop78 => &tableau::DOP78,
        }
    }
}

/// Step-size controller constants.
const SAFETY: f64 = 0.9;
const MIN_SCALE: f64 = 0.1;
const MAX_SCALE: f64 = 5.0;
const REJECT_FLOOR: f64 = 0.1;

/// Adaptive embedded Runge–Kutta integrator over an abstract
/// equations-of-motion function.
///
/// Single-threaded and cooperative: one `propagate` call runs to completion
/// or failure, touching only its own buffers and the target vehicle.
pub struct Integrator {
    method: StepMethod,
    abs_tol: f64,
    rel_tol: f64,
    initial_step: Duration,
    fixed_step: Option<Duration>,
    min_step: Duration,
    max_steps: usize,
    event_tol: Duration,
    func_evals: usize,
}

impl Default for Integrator {
    fn default() -> Self {
        Self {
            method: StepMethod::Rkf78,
            abs_tol: 1.0e-10,
            rel_tol: 1.0e-10,
            initial_step: 60.0.seconds(),
            fixed_step: None,
            min_step: (1.0e-3).seconds(),
            max_steps: 1_000_000,
            event_tol: (1.0e-3).seconds(),
            func_evals: 0,
        }
    }
}

impl Integrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_step_method(&mut self, method: StepMethod) {
        self.method = method;
    }

    pub fn set_abs_tol(&mut self, abs_tol: f64) {
        self.abs_tol = abs_tol;
    }

    pub fn set_rel_tol(&mut self, rel_tol: f64) {
        self.rel_tol = rel_tol;
    }

    pub fn set_initial_step(&mut self, step: Duration) {
        self.initial_step = step;
    }

    /// Enables or disables fixed-step mode; an explicit step overrides the
    /// initial step.
    pub fn switch_fixed_step(&mut self, enabled: bool, step: Option<Duration>) {
        self.fixed_step = if enabled {
            Some(step.unwrap_or(self.initial_step))
        } else {
            None
        };
    }

    /// Floor below which the adaptive controller reports divergence.
    pub fn set_min_step(&mut self, floor: Duration) {
        self.min_step = floor;
    }

    /// Step budget; exhaustion fails with a budget error.
    pub fn set_max_steps(&mut self, max_steps: usize) {
        self.max_steps = max_steps;
    }

    /// Tolerance on located event crossing times.
    pub fn set_event_tol(&mut self, tol: Duration) {
        self.event_tol = tol;
    }

    /// Number of right-hand-side evaluations across all propagations.
    pub fn n_func_evals(&self) -> usize {
        self.func_evals
    }

    /// Advances the vehicle over `epoch + interval`, writing accepted steps
    /// (per the storage flag) and fired events into the returned history.
    ///
    /// On failure the error carries the partial history accumulated so far;
    /// nothing is swallowed.
    pub fn propagate(
        &mut self,
        epoch: Date,
        interval: Interval,
        eom: &dyn EquationsOfMotion,
        vehicle: &mut Vehicle,
        store_history: bool,
        events: &[&dyn Event],
    ) -> Result<StateHistory, PropagationError> {
        let mut history = StateHistory::new();
        match self.propagate_inner(epoch, interval, eom, vehicle, store_history, events, &mut history)
        {
            Ok(()) => {
                vehicle.set_history(history.clone());
                Ok(history)
            }
            Err(kind) => Err(PropagationError {
                kind,
                partial: history,
            }),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn propagate_inner(
        &mut self,
        epoch: Date,
        interval: Interval,
        eom: &dyn EquationsOfMotion,
        vehicle: &mut Vehicle,
        store_history: bool,
        events: &[&dyn Event],
        history: &mut StateHistory,
    ) -> PhysicsResult<()> {
        let sys = eom.system();
        let set = eom.expected_set();
        let tableau = self.method.tableau();
        let adaptive = self.fixed_step.is_none() && tableau.is_embedded();

        let start = epoch + interval.start();
        let end = epoch + interval.end();

        // Convert the vehicle into the EOM's native representation at the
        // interval start.
        let state0 = State::new(
            vehicle.current_state().elements.in_set(set, sys),
            start,
        );
        vehicle.set_current_state(state0);
        history.insert(state0);

        let mut t = start;
        let mut y = state0.elements.to_vector();
        let mut h_s = self
            .fixed_step
            .unwrap_or(self.initial_step)
            .to_seconds()
            .min(interval.span().to_seconds());

        let mut prev_values = Vec::with_capacity(events.len());
        for event in events {
            prev_values.push(event.value(t, vehicle, sys)?);
        }

        let mut steps = 0_usize;
        while (end - t).to_seconds() > 1e-9 {
            steps += 1;
            if steps > self.max_steps {
                return Err(PhysicsError::StepBudgetExceeded {
                    max_steps: self.max_steps,
                });
            }

            // Never overshoot the interval end.
            let h = h_s.min((end - t).to_seconds());

            let k = self.stages(tableau, eom, set, t, &y, h, vehicle)?;
            let y_high = combine(&y, &k, tableau.b_high, h);

            // Embedded error estimate and step-size control.
            if adaptive {
                let y_low = combine(&y, &k, tableau.b_low.unwrap(), h);
                let error = self.error_estimate(&y, &y_high, &y_low);
                let exponent = -1.0 / (tableau.order_low + 1.0);

                if error > 1.0 {
                    let h_new = h * REJECT_FLOOR.max(SAFETY * error.powf(exponent));
                    if h_new < self.min_step.to_seconds() {
                        return Err(PhysicsError::IntegratorDivergence {
                            step_s: h_new,
                            floor_s: self.min_step.to_seconds(),
                        });
                    }
                    h_s = h_new;
                    continue;
                }
                h_s = h * MAX_SCALE.min(MIN_SCALE.max(SAFETY * error.powf(exponent)));
            }

            let t_new = t + h.seconds();
            let candidate = State::new(OrbitalElements::from_vector(set, &y_high), t_new);

            // Body-crash termination against the central body.
            let cartesian = candidate.elements.to_cartesian(sys);
            let center = sys.get_central_body();
            if cartesian.rmag_km() <= center.crash_radius_km {
                vehicle.set_current_state(candidate);
                history.insert(candidate);
                return Err(PhysicsError::BodyCrash {
                    radius_km: cartesian.rmag_km(),
                    crash_radius_km: center.crash_radius_km,
                    body: center.id,
                });
            }

            // Event detection across [t, t_new], before the step commits.
            vehicle.set_current_state(candidate);
            let mut new_values = Vec::with_capacity(events.len());
            for event in events {
                new_values.push(event.value(t_new, vehicle, sys)?);
            }

            let mut earliest: Option<(usize, f64)> = None;
            for (index, event) in events.iter().enumerate() {
                if event.policy().triggers(prev_values[index], new_values[index]) {
                    let crossing_s = self.locate_crossing(
                        *event,
                        vehicle,
                        sys,
                        t,
                        h,
                        &candidate.elements,
                        &OrbitalElements::from_vector(set, &y),
                        prev_values[index],
                    )?;
                    if earliest.map_or(true, |(_, best)| crossing_s < best) {
                        earliest = Some((index, crossing_s));
                    }
                }
            }

            if let Some((index, crossing_s)) = earliest {
                // Integrate accurately to the crossing, fire, and restart
                // the step from there. Later crossings in this step are
                // rediscovered by the restarted stepping.
                let rose = new_values[index] >= prev_values[index];
                let k_star = self.stages(tableau, eom, set, t, &y, crossing_s, vehicle)?;
                let y_star = combine(&y, &k_star, tableau.b_high, crossing_s);
                t = t + crossing_s.seconds();
                let at_event = State::new(OrbitalElements::from_vector(set, &y_star), t);
                vehicle.set_current_state(at_event);

                history.record_event(events[index].name(), t);
                events[index].apply(vehicle, sys)?;

                // The modifier may have rewritten the state; re-read it in
                // the native set.
                let resumed = vehicle.current_state().in_set(set, sys);
                vehicle.set_current_state(resumed);
                y = resumed.elements.to_vector();
                history.insert(resumed);

                prev_values.clear();
                for event in events {
                    prev_values.push(event.value(t, vehicle, sys)?);
                }
                // The integrated state can land a hair on the pre-crossing
                // side of the located zero; pin the fired event to the side
                // it crossed to so the same crossing cannot re-fire.
                if rose {
                    prev_values[index] = prev_values[index].max(f64::MIN_POSITIVE);
                } else {
                    prev_values[index] = prev_values[index].min(-f64::MIN_POSITIVE);
                }
                continue;
            }

            // Commit.
            t = t_new;
            y = y_high;
            prev_values = new_values;
            if store_history {
                history.insert(candidate);
            }
        }

        let final_state = State::new(OrbitalElements::from_vector(set, &y), t);
        vehicle.set_current_state(final_state);
        history.insert(final_state);
        debug!(
            "propagation complete: {} steps, {} function evaluations",
            steps, self.func_evals
        );
        Ok(())
    }

    /// Evaluates the K stage derivatives of one step.
    #[allow(clippy::too_many_arguments)]
    fn stages(
        &mut self,
        tableau: &ButcherTableau,
        eom: &dyn EquationsOfMotion,
        set: crate::elements::ElementSetId,
        t: Date,
        y: &Vector6,
        h_s: f64,
        vehicle: &Vehicle,
    ) -> PhysicsResult<Vec<Vector6>> {
        let mut k: Vec<Vector6> = Vec::with_capacity(tableau.stages());
        for stage in 0..tableau.stages() {
            let mut y_stage = *y;
            if stage > 0 {
                for (column, a) in tableau.a[stage - 1].iter().enumerate() {
                    if *a != 0.0 {
                        y_stage += k[column] * (*a * h_s);
                    }
                }
            }
            let stage_date = t + (tableau.c[stage] * h_s).seconds();
            let stage_state = State::new(OrbitalElements::from_vector(set, &y_stage), stage_date);
            let partials = eom.evaluate(&stage_state, vehicle)?;
            k.push(*partials.rates_per_s());
            self.func_evals += 1;
        }
        Ok(k)
    }

    /// RMS of the embedded error against the mixed absolute/relative scale.
    fn error_estimate(&self, y_prev: &Vector6, y_high: &Vector6, y_low: &Vector6) -> f64 {
        let mut sum_sq = 0.0;
        for component in 0..6 {
            let scale = self.abs_tol
                + self.rel_tol * y_high[component].abs().max(y_prev[component].abs());
            let ratio = (y_high[component] - y_low[component]) / scale;
            sum_sq += ratio * ratio;
        }
        (sum_sq / 6.0).sqrt()
    }

    /// Bisection for the crossing time within (0, h], on the
    /// element-interpolated state, to the configured event tolerance.
    #[allow(clippy::too_many_arguments)]
    fn locate_crossing(
        &self,
        event: &dyn Event,
        vehicle: &mut Vehicle,
        sys: &crate::system::System,
        t: Date,
        h_s: f64,
        elements_after: &OrbitalElements,
        elements_before: &OrbitalElements,
        value_before: f64,
    ) -> PhysicsResult<f64> {
        let restore = *vehicle.current_state();
        let mut lo_s = 0.0;
        let mut hi_s = h_s;
        let mut value_lo = value_before;

        let mut iterations = 0;
        while hi_s - lo_s > self.event_tol.to_seconds() && iterations < MAX_ITERATIONS {
            let mid_s = 0.5 * (lo_s + hi_s);
            let mid_date = t + mid_s.seconds();
            let interpolated = elements_before.interpolate(
                t,
                elements_after,
                t + h_s.seconds(),
                mid_date,
            )?;
            vehicle.set_current_state(State::new(interpolated, mid_date));
            let value_mid = event.value(mid_date, vehicle, sys)?;

            if event.policy().triggers(value_lo, value_mid) {
                hi_s = mid_s;
            } else {
                lo_s = mid_s;
                value_lo = value_mid;
            }
            iterations += 1;
        }
        vehicle.set_current_state(restore);

        if iterations >= MAX_ITERATIONS {
            return crate::errors::ConvergenceSnafu {
                action: format!("root-finding for event `{}`", event.name()),
                iterations,
            }
            .fail();
        }
        Ok(hi_s)
    }
}

/// y + h Σ b_i k_i
fn combine(y: &Vector6, k: &[Vector6], b: &[f64], h_s: f64) -> Vector6 {
    let mut result = *y;
    for (weight, stage) in b.iter().zip(k.iter()) {
        if *weight != 0.0 {
            result += stage * (*weight * h_s);
        }
    }
    result
}

#[cfg(test)]
mod ut_integrator {
    use super::*;
    use crate::elements::{ElementSetId, Keplerian};
    use crate::platforms::Spacecraft;
    use crate::propagation::equations_of_motion::TwoBody;
    use crate::system::System;
    use approx::assert_relative_eq;

    fn leo_vehicle(epoch: Date) -> Vehicle {
        let state = State::new(
            OrbitalElements::Keplerian(Keplerian::new(7000.0, 0.01, 0.6, 0.2, 0.1, 0.0)),
            epoch,
        );
        Vehicle::new(&Spacecraft::new("it", state))
    }

    #[test]
    fn test_fixed_step_two_body_energy() {
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        let mut vehicle = leo_vehicle(epoch);
        let eom = TwoBody::new(&sys);

        let mut integrator = Integrator::new();
        integrator.set_step_method(StepMethod::Rk4);
        integrator.switch_fixed_step(true, Some(10.0.seconds()));

        let interval = Interval::until(3_000.0.seconds()).unwrap();
        let history = integrator
            .propagate(epoch, interval, &eom, &mut vehicle, true, &[])
            .unwrap();

        assert!(history.len() > 100);
        let first = history.first().unwrap().elements.to_cartesian(&sys);
        let last = history.last().unwrap().elements.to_cartesian(&sys);
        let mu = sys.get_mu_km3_s2();
        assert_relative_eq!(
            first.energy_km2_s2(mu),
            last.energy_km2_s2(mu),
            max_relative = 1e-9
        );
        assert!(integrator.n_func_evals() > 0);
    }

    #[test]
    fn test_adaptive_methods_agree() {
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        let eom = TwoBody::new(&sys);
        let interval = Interval::until(5_400.0.seconds()).unwrap();

        let mut finals = Vec::new();
        for method in [StepMethod::Rkf45, StepMethod::Dop45, StepMethod::Rkf78, StepMethod::Dop78]
        {
            let mut vehicle = leo_vehicle(epoch);
            let mut integrator = Integrator::new();
            integrator.set_step_method(method);
            integrator.set_abs_tol(1e-10);
            integrator.set_rel_tol(1e-10);
            let history = integrator
                .propagate(epoch, interval, &eom, &mut vehicle, false, &[])
                .unwrap();
            finals.push(history.last().unwrap().elements.to_cartesian(&sys));
        }

        for pair in finals.windows(2) {
            assert!((pair[0].radius_km - pair[1].radius_km).norm() < 1e-3);
        }
    }

    #[test]
    fn test_history_dates_ascend_and_endpoints_stored() {
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        let mut vehicle = leo_vehicle(epoch);
        let eom = TwoBody::new(&sys);
        let interval = Interval::until(600.0.seconds()).unwrap();

        let mut integrator = Integrator::new();
        let history = integrator
            .propagate(epoch, interval, &eom, &mut vehicle, false, &[])
            .unwrap();

        // Endpoint-only storage still records both ends.
        assert!(history.len() >= 2);
        assert_eq!(*history.dates().next().unwrap(), epoch);
        assert_eq!(
            *history.dates().next_back().unwrap(),
            epoch + 600.0.seconds()
        );
        let dates: Vec<_> = history.dates().collect();
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_state_set_matches_eom() {
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        let mut vehicle = leo_vehicle(epoch);
        let eom = TwoBody::new(&sys);
        let interval = Interval::until(60.0.seconds()).unwrap();

        let mut integrator = Integrator::new();
        integrator
            .propagate(epoch, interval, &eom, &mut vehicle, false, &[])
            .unwrap();
        assert_eq!(
            vehicle.current_state().elements.set_id(),
            ElementSetId::Cartesian
        );
    }

    #[test]
    fn test_crash_detection() {
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        // Suborbital: periapsis far below the surface.
        let state = State::new(
            OrbitalElements::Keplerian(Keplerian::new(7000.0, 0.9, 0.0, 0.0, 0.0, 3.0)),
            epoch,
        );
        let mut vehicle = Vehicle::new(&Spacecraft::new("lawn-dart", state));
        let eom = TwoBody::new(&sys);
        let interval = Interval::until(1.0.days()).unwrap();

        let mut integrator = Integrator::new();
        let err = integrator
            .propagate(epoch, interval, &eom, &mut vehicle, true, &[])
            .unwrap_err();
        assert!(matches!(err.kind, PhysicsError::BodyCrash { .. }));
        assert!(!err.partial.is_empty());
    }

    #[test]
    fn test_step_budget() {
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        let mut vehicle = leo_vehicle(epoch);
        let eom = TwoBody::new(&sys);
        let interval = Interval::until(1.0.days()).unwrap();

        let mut integrator = Integrator::new();
        integrator.switch_fixed_step(true, Some(1.0.seconds()));
        integrator.set_max_steps(10);
        let err = integrator
            .propagate(epoch, interval, &eom, &mut vehicle, false, &[])
            .unwrap_err();
        assert!(matches!(
            err.kind,
            PhysicsError::StepBudgetExceeded { max_steps: 10 }
        ));
    }
}
