/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

pub mod history;

pub use history::StateHistory;

use crate::elements::{ElementSetId, OrbitalElements};
use crate::system::System;
use crate::time::Date;
use core::fmt;

/// Orbital elements pinned to an epoch.
///
/// The gravitational context is not stored here: every conversion takes the
/// [System] explicitly, which keeps states free of self-referential borrows
/// while preserving the rule that systems outlive the states interpreted
/// against them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct State {
    pub elements: OrbitalElements,
    pub epoch: Date,
}

impl State {
    pub fn new(elements: OrbitalElements, epoch: Date) -> Self {
        Self { elements, epoch }
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn epoch(&self) -> Date {
        self.epoch
    }

    /// A copy of this state holding the requested element variant.
    pub fn in_set(&self, set: ElementSetId, sys: &System) -> Self {
        Self {
            elements: self.elements.in_set(set, sys),
            epoch: self.epoch,
        }
    }

    /// Converts the held elements in place.
    pub fn convert_in_place(&mut self, set: ElementSetId, sys: &System) {
        self.elements.convert_in_place(set, sys);
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.elements, self.epoch)
    }
}

#[cfg(test)]
mod ut_state {
    use super::*;
    use crate::elements::Keplerian;

    #[test]
    fn test_in_set() {
        let sys = System::earth_moon();
        let state = State::new(
            OrbitalElements::Keplerian(Keplerian::new(8000.0, 0.01, 0.3, 0.0, 0.0, 1.0)),
            Date::j2000(),
        );
        let cart = state.in_set(ElementSetId::Cartesian, &sys);
        assert_eq!(cart.epoch(), state.epoch());
        assert_eq!(cart.elements.set_id(), ElementSetId::Cartesian);
    }
}
