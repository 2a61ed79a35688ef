/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::State;
use crate::elements::ElementSetId;
use crate::errors::{EmptyStateHistorySnafu, PhysicsResult};
use crate::time::Date;
use snafu::OptionExt;
use std::collections::BTreeMap;

/// Ordered record of a propagation: states keyed by date, in strict
/// ascending order by construction, plus the dates at which each named event
/// fired.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateHistory {
    states: BTreeMap<Date, State>,
    events: BTreeMap<String, Vec<Date>>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) a state at its own epoch.
    pub fn insert(&mut self, state: State) {
        self.states.insert(state.epoch(), state);
    }

    /// The state stored exactly at the provided date.
    pub fn at(&self, date: Date) -> PhysicsResult<&State> {
        self.states.get(&date).context(EmptyStateHistorySnafu)
    }

    /// The stored state nearest to the provided date.
    pub fn nearest(&self, date: Date) -> PhysicsResult<&State> {
        let before = self.states.range(..=date).next_back();
        let after = self.states.range(date..).next();
        match (before, after) {
            (Some((t0, s0)), Some((t1, s1))) => {
                if (date - *t0) <= (*t1 - date) {
                    Ok(s0)
                } else {
                    Ok(s1)
                }
            }
            (Some((_, state)), None) | (None, Some((_, state))) => Ok(state),
            (None, None) => EmptyStateHistorySnafu.fail(),
        }
    }

    /// Linear interpolation at an arbitrary date via the element set's own
    /// interpolate operation; requires a stored state on each side.
    pub fn state_at(&self, date: Date) -> PhysicsResult<State> {
        if let Some(state) = self.states.get(&date) {
            return Ok(*state);
        }
        let (t0, s0) = self
            .states
            .range(..date)
            .next_back()
            .context(EmptyStateHistorySnafu)?;
        let (t1, s1) = self
            .states
            .range(date..)
            .next()
            .context(EmptyStateHistorySnafu)?;
        let elements = s0.elements.interpolate(*t0, &s1.elements, *t1, date)?;
        Ok(State::new(elements, date))
    }

    pub fn first(&self) -> PhysicsResult<&State> {
        self.states
            .values()
            .next()
            .context(EmptyStateHistorySnafu)
    }

    pub fn last(&self) -> PhysicsResult<&State> {
        self.states
            .values()
            .next_back()
            .context(EmptyStateHistorySnafu)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterates over (date, state) pairs in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (&Date, &State)> {
        self.states.iter()
    }

    /// All stored dates in ascending order.
    pub fn dates(&self) -> impl DoubleEndedIterator<Item = &Date> {
        self.states.keys()
    }

    /// Records a firing of the named event.
    pub fn record_event(&mut self, name: &str, date: Date) {
        self.events.entry(name.to_string()).or_default().push(date);
    }

    /// The event-name → firing-dates map.
    pub fn event_times(&self) -> &BTreeMap<String, Vec<Date>> {
        &self.events
    }

    /// Flattens the history into its persisted layout: one (date string,
    /// set id, six components) row per state, sorted by date. The file
    /// encoding itself lives outside the core.
    pub fn rows(&self) -> Vec<(String, ElementSetId, [f64; 6])> {
        self.states
            .iter()
            .map(|(date, state)| {
                let vec = state.elements.to_vector();
                (
                    date.to_string(),
                    state.elements.set_id(),
                    [vec[0], vec[1], vec[2], vec[3], vec[4], vec[5]],
                )
            })
            .collect()
    }
}
