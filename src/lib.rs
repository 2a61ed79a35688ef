/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

extern crate hifitime;
extern crate log;
extern crate nalgebra;
extern crate snafu;

pub use hifitime::{Duration, Epoch, TimeUnits, Unit};

pub mod access;
pub mod bodies;
pub mod constants;
pub mod elements;
pub mod errors;
pub mod frames;
pub mod math;
pub mod platforms;
pub mod propagation;
pub mod state;
pub mod system;
pub mod time;

pub mod prelude {
    pub use crate::bodies::{BodyId, CelestialBody};
    pub use crate::elements::{Cartesian, ElementSetId, Equinoctial, Keplerian, OrbitalElements};
    pub use crate::errors::{PhysicsError, PhysicsResult, PropagationError};
    pub use crate::frames::{Ecef, Eci, Hci};
    pub use crate::platforms::{Spacecraft, Vehicle};
    pub use crate::propagation::equations_of_motion::EquationsOfMotion;
    pub use crate::propagation::force_models::ForceModel;
    pub use crate::propagation::integrator::{Integrator, StepMethod};
    pub use crate::state::{State, StateHistory};
    pub use crate::system::System;
    pub use crate::time::{Date, Interval};
    pub use hifitime::{Duration, TimeUnits};
}
