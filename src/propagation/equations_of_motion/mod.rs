/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

mod cowell;
mod equinoctial_vop;
mod j2_mean;
mod keplerian_vop;
mod two_body;

pub use cowell::Cowell;
pub use equinoctial_vop::EquinoctialVop;
pub use j2_mean::J2MeanVop;
pub use keplerian_vop::KeplerianVop;
pub use two_body::TwoBody;

use crate::elements::{ElementPartials, ElementSetId};
use crate::errors::PhysicsResult;
use crate::platforms::Vehicle;
use crate::state::State;
use crate::system::System;

/// The right-hand side the integrator advances.
///
/// An implementation declares a native element representation; the integrator
/// converts the vehicle's state into that set before evaluation, and the
/// returned partials' variant always matches it.
pub trait EquationsOfMotion {
    /// The element set this EOM integrates natively.
    fn expected_set(&self) -> ElementSetId;

    /// The gravitational context, borrowed for the duration of a
    /// propagation.
    fn system(&self) -> &System;

    /// Time derivative of the state's elements, in the expected set.
    fn evaluate(&self, state: &State, vehicle: &Vehicle) -> PhysicsResult<ElementPartials>;
}
