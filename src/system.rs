/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use crate::bodies::{BodyId, CelestialBody};
use crate::elements::Cartesian;
use crate::errors::{MissingBodySnafu, PhysicsResult};
use crate::frames::Hci;
use crate::math::vectors::RadiusVector;
use crate::time::Date;
use snafu::OptionExt;
use std::collections::BTreeMap;

/// The gravitational context of a simulation: a distinguished central body
/// plus auxiliary bodies, all immutable during propagation and shareable
/// across integrators.
///
/// The system answers three questions: the central µ, any registered body's
/// record, and the relative geometry between bodies at a date. Positions are
/// computed in the heliocentric ICRF by chaining each body's motion about its
/// parent (bound ephemerides short-circuit the chain).
#[derive(Clone, Debug)]
pub struct System {
    central: BodyId,
    bodies: BTreeMap<BodyId, CelestialBody>,
}

impl System {
    /// Builds a system from the built-in catalog. The central body is always
    /// registered, whether or not it appears in `auxiliary`.
    pub fn new(central: BodyId, auxiliary: &[BodyId]) -> Self {
        let mut bodies = BTreeMap::new();
        bodies.insert(central, CelestialBody::from_id(central));
        for &id in auxiliary {
            bodies
                .entry(id)
                .or_insert_with(|| CelestialBody::from_id(id));
        }
        Self { central, bodies }
    }

    /// The default Earth-Moon system.
    pub fn earth_moon() -> Self {
        Self::new(BodyId::Earth, &[BodyId::Moon])
    }

    /// Registers (or replaces) a body record, e.g. one with a bound
    /// ephemeris or adjusted constants.
    pub fn with_body(mut self, body: CelestialBody) -> Self {
        self.bodies.insert(body.id, body);
        self
    }

    pub fn central_id(&self) -> BodyId {
        self.central
    }

    pub fn get_central_body(&self) -> &CelestialBody {
        // The constructor guarantees the central body is present.
        self.bodies
            .get(&self.central)
            .expect("central body is always registered")
    }

    /// Gravitational parameter of the central body, in km³/s².
    pub fn get_mu_km3_s2(&self) -> f64 {
        self.get_central_body().mu_km3_s2
    }

    pub fn get_body(&self, id: BodyId) -> PhysicsResult<&CelestialBody> {
        self.bodies.get(&id).context(MissingBodySnafu { id })
    }

    /// Iterates over all registered bodies in stable id order.
    pub fn bodies(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.values()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Position of a body in the heliocentric ICRF at the provided date.
    ///
    /// Walks the parent chain, summing each link's secular Keplerian motion
    /// expressed about its parent; a bound ephemeris provides the
    /// heliocentric position directly and ends the walk. Chain parents that
    /// are not registered in this system are taken from the catalog.
    pub fn heliocentric_position(
        &self,
        date: Date,
        id: BodyId,
    ) -> PhysicsResult<RadiusVector<Hci>> {
        let mut total = RadiusVector::<Hci>::zeros();
        let mut current = self.get_body(id)?.clone();

        loop {
            if current.id == BodyId::Sun {
                return Ok(total);
            }
            if current.ephemeris.is_some() {
                let (position, _velocity) = current.ephemeris_at(date)?;
                return Ok(total + position);
            }

            let parent_id = current
                .parent
                .expect("every non-Sun catalog body has a parent");
            let parent = match self.bodies.get(&parent_id) {
                Some(parent) => parent.clone(),
                None => CelestialBody::from_id(parent_id),
            };

            let elements = current.orbital_elements_at(date)?;
            let link: Cartesian<Hci> = elements.to_cartesian(parent.mu_km3_s2);
            total = total + link.radius_km;

            current = parent;
        }
    }

    /// Relative position from one body to another at the provided date, in
    /// the heliocentric ICRF axes (identical to every ICRF-aligned frame's
    /// axes). Both endpoints must be registered.
    pub fn get_relative_position(
        &self,
        date: Date,
        from: BodyId,
        to: BodyId,
    ) -> PhysicsResult<RadiusVector<Hci>> {
        if from == to {
            return Ok(RadiusVector::zeros());
        }
        Ok(self.heliocentric_position(date, to)? - self.heliocentric_position(date, from)?)
    }
}

impl Default for System {
    fn default() -> Self {
        Self::earth_moon()
    }
}
