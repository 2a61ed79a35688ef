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
use crate::elements::ElementSetId;
use crate::state::StateHistory;
use core::fmt;
use hifitime::Duration;
use snafu::prelude::*;

/// Convenience alias used by every fallible operation of the toolkit.
pub type PhysicsResult<T> = Result<T, PhysicsError>;

#[derive(Clone, Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PhysicsError {
    /// Raised for arithmetic or interpolation between differently-variant element containers.
    #[snafu(display("element set mismatch: expected {expected}, got {got}"))]
    ElementSetMismatch {
        expected: ElementSetId,
        got: ElementSetId,
    },
    /// Raised when an iterative scheme exhausts its iteration cap.
    #[snafu(display("{action} failed to converge after {iterations} iterations"))]
    Convergence { action: String, iterations: usize },
    /// Raised when a date falls outside a body's bound ephemeris coverage.
    #[snafu(display(
        "{mjd_days} MJD is outside the ephemeris coverage [{start_mjd_days}, {end_mjd_days}] MJD"
    ))]
    EphemerisOutOfRange {
        mjd_days: f64,
        start_mjd_days: f64,
        end_mjd_days: f64,
    },
    /// Raised when the adaptive step controller cannot meet tolerances above the step floor.
    #[snafu(display("adaptive step of {step_s} s fell below the floor of {floor_s} s"))]
    IntegratorDivergence { step_s: f64, floor_s: f64 },
    /// Raised when the propagated radius falls within the central body's crash radius.
    #[snafu(display(
        "radius of {radius_km} km is within the {crash_radius_km} km crash radius of {body}"
    ))]
    BodyCrash {
        radius_km: f64,
        crash_radius_km: f64,
        body: BodyId,
    },
    /// Raised on a System lookup for an unregistered body.
    #[snafu(display("{id} is not registered in this system"))]
    MissingBody { id: BodyId },
    /// Raised on a state history query without a stored surrounding pair.
    #[snafu(display("state history query at a date without a stored surrounding pair"))]
    EmptyStateHistory,
    /// Raised when the integrator's step budget runs out before the interval end.
    #[snafu(display("step budget of {max_steps} exhausted before the interval end"))]
    StepBudgetExceeded { max_steps: usize },
    /// Raised if the system clock cannot provide the current time.
    #[snafu(display("system clock is unavailable: {reason}"))]
    SystemClock { reason: String },
    /// Raised when a calendar string cannot be parsed with the requested format.
    #[snafu(display("cannot parse `{input}` as a calendar date: {reason}"))]
    DateParsing { input: String, reason: String },
    /// Raised when an interval's end does not strictly follow its start.
    #[snafu(display("interval end {end} does not follow its start {start}"))]
    InvalidInterval { start: Duration, end: Duration },
    /// Raised when a rise/set list is not an even count of strictly
    /// ascending, unique instants.
    #[snafu(display("invalid rise/set list: {reason}"))]
    InvalidRiseSet { reason: String },
    /// Raised when a Walker-δ layout's total is not a multiple of its plane
    /// count.
    #[snafu(display(
        "Walker layout requires the total of {total} satellites to be a multiple of {planes} planes"
    ))]
    WalkerGeometry { total: usize, planes: usize },
}

/// Error returned by `Integrator::propagate`: the failure kind plus the partial
/// state history accumulated up to the failure.
#[derive(Debug)]
pub struct PropagationError {
    pub kind: PhysicsError,
    pub partial: StateHistory,
}

impl fmt::Display for PropagationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "propagation aborted after {} stored states: {}",
            self.partial.len(),
            self.kind
        )
    }
}

impl std::error::Error for PropagationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<PropagationError> for PhysicsError {
    fn from(err: PropagationError) -> Self {
        err.kind
    }
}
