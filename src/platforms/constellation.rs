/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::{Spacecraft, Vehicle, VehicleModel};
use crate::elements::{Keplerian, OrbitalElements};
use crate::errors::{PhysicsResult, WalkerGeometrySnafu};
use crate::propagation::equations_of_motion::EquationsOfMotion;
use crate::propagation::integrator::Integrator;
use crate::state::{State, StateHistory};
use crate::time::{Date, Interval};
use core::f64::consts::TAU;
use snafu::ensure;

/// A set of spacecraft sharing an orbital plane.
#[derive(Clone, Debug)]
pub struct Plane {
    id: u64,
    satellites: Vec<Spacecraft>,
}

impl Plane {
    pub fn new(satellites: Vec<Spacecraft>) -> Self {
        let id = combined_id(satellites.iter().map(|sat| sat.id()));
        Self { id, satellites }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn add_spacecraft(&mut self, spacecraft: Spacecraft) {
        self.satellites.push(spacecraft);
        self.id = combined_id(self.satellites.iter().map(|sat| sat.id()));
    }

    pub fn satellites(&self) -> &[Spacecraft] {
        &self.satellites
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }

    /// Propagates every spacecraft in the plane, updating each one's current
    /// state and returning the histories in satellite order.
    pub fn propagate(
        &mut self,
        epoch: Date,
        interval: Interval,
        eom: &dyn EquationsOfMotion,
        integrator: &mut Integrator,
    ) -> PhysicsResult<Vec<StateHistory>> {
        let mut histories = Vec::with_capacity(self.satellites.len());
        for spacecraft in &mut self.satellites {
            let mut vehicle = Vehicle::new(spacecraft);
            let history = integrator
                .propagate(epoch, interval, eom, &mut vehicle, true, &[])
                .map_err(|failure| failure.kind)?;
            spacecraft.set_current_state(*vehicle.current_state());
            histories.push(history);
        }
        Ok(histories)
    }
}

/// Walker-δ layout parameters: i:T/P/F plus the anchor angles and size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WalkerDelta {
    pub total: usize,
    pub planes: usize,
    pub phasing: usize,
    pub anchor_raan_rad: f64,
    pub anchor_ta_rad: f64,
    pub sma_km: f64,
    pub inc_rad: f64,
}

/// A set of planes sharing a size and inclination.
#[derive(Clone, Debug)]
pub struct Shell {
    id: u64,
    planes: Vec<Plane>,
}

impl Shell {
    pub fn new(planes: Vec<Plane>) -> Self {
        let id = combined_id(planes.iter().map(|plane| plane.id()));
        Self { id, planes }
    }

    /// Instantiates a Walker-δ shell: T/P circular spacecraft per plane,
    /// planes spread by ΔΩ = 2π/P, in-plane phasing by Δν = F·2π/T.
    pub fn walker(name: &str, layout: WalkerDelta, epoch: Date) -> PhysicsResult<Self> {
        ensure!(
            layout.planes > 0 && layout.total % layout.planes == 0,
            WalkerGeometrySnafu {
                total: layout.total,
                planes: layout.planes,
            }
        );

        let sats_per_plane = layout.total / layout.planes;
        let delta_raan = TAU / layout.planes as f64;
        let delta_anomaly = layout.phasing as f64 * TAU / layout.total as f64;

        let mut planes = Vec::with_capacity(layout.planes);
        let mut anomaly_index = 0;
        for plane_index in 0..layout.planes {
            let raan = layout.anchor_raan_rad + delta_raan * plane_index as f64;
            let mut satellites = Vec::with_capacity(sats_per_plane);
            for sat_index in 0..sats_per_plane {
                let ta = layout.anchor_ta_rad + delta_anomaly * anomaly_index as f64;
                let elements = Keplerian::new(
                    layout.sma_km,
                    0.0,
                    layout.inc_rad,
                    raan % TAU,
                    0.0,
                    ta % TAU,
                );
                satellites.push(Spacecraft::new(
                    &format!("{name}-p{plane_index}-s{sat_index}"),
                    State::new(OrbitalElements::Keplerian(elements), epoch),
                ));
                anomaly_index += 1;
            }
            planes.push(Plane::new(satellites));
        }

        Ok(Self::new(planes))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn n_planes(&self) -> usize {
        self.planes.len()
    }

    pub fn add_plane(&mut self, plane: Plane) {
        self.planes.push(plane);
        self.id = combined_id(self.planes.iter().map(|plane| plane.id()));
    }

    /// Total spacecraft across all planes.
    pub fn len(&self) -> usize {
        self.planes.iter().map(Plane::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn satellites(&self) -> impl Iterator<Item = &Spacecraft> {
        self.planes.iter().flat_map(|plane| plane.satellites().iter())
    }

    pub fn propagate(
        &mut self,
        epoch: Date,
        interval: Interval,
        eom: &dyn EquationsOfMotion,
        integrator: &mut Integrator,
    ) -> PhysicsResult<Vec<StateHistory>> {
        let mut histories = Vec::with_capacity(self.len());
        for plane in &mut self.planes {
            histories.extend(plane.propagate(epoch, interval, eom, integrator)?);
        }
        Ok(histories)
    }
}

/// A named set of shells.
#[derive(Clone, Debug)]
pub struct Constellation {
    id: u64,
    name: String,
    shells: Vec<Shell>,
}

impl Constellation {
    pub fn new(name: &str, shells: Vec<Shell>) -> Self {
        let id = combined_id(shells.iter().map(|shell| shell.id()));
        Self {
            id,
            name: name.to_string(),
            shells,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shells(&self) -> &[Shell] {
        &self.shells
    }

    pub fn n_shells(&self) -> usize {
        self.shells.len()
    }

    pub fn n_planes(&self) -> usize {
        self.shells.iter().map(Shell::n_planes).sum()
    }

    /// Total spacecraft across all shells.
    pub fn len(&self) -> usize {
        self.shells.iter().map(Shell::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add_shell(&mut self, shell: Shell) {
        self.shells.push(shell);
        self.id = combined_id(self.shells.iter().map(|shell| shell.id()));
    }

    pub fn satellites(&self) -> impl Iterator<Item = &Spacecraft> {
        self.shells.iter().flat_map(Shell::satellites)
    }

    pub fn propagate(
        &mut self,
        epoch: Date,
        interval: Interval,
        eom: &dyn EquationsOfMotion,
        integrator: &mut Integrator,
    ) -> PhysicsResult<Vec<StateHistory>> {
        let mut histories = Vec::with_capacity(self.len());
        for shell in &mut self.shells {
            histories.extend(shell.propagate(epoch, interval, eom, integrator)?);
        }
        Ok(histories)
    }
}

fn combined_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.fold(0, |acc, id| acc ^ id.rotate_left(1))
}
