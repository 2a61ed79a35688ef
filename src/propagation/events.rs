/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use crate::elements::OrbitalElements;
use crate::errors::PhysicsResult;
use crate::platforms::{GroundPoint, Vehicle};
use crate::state::State;
use crate::system::System;
use crate::time::Date;
use core::f64::consts::PI;

/// Which sign changes of the value function fire the event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriggerPolicy {
    /// Any sign change (either side may be exactly zero).
    AnyCrossing,
    /// Negative to positive only.
    Rising,
    /// Positive to negative only.
    Falling,
}

impl TriggerPolicy {
    /// Whether a step whose endpoint values are (before, after) crosses
    /// under this policy.
    pub fn triggers(&self, before: f64, after: f64) -> bool {
        match self {
            TriggerPolicy::AnyCrossing => {
                (before <= 0.0 && after >= 0.0) || (before >= 0.0 && after <= 0.0)
            }
            TriggerPolicy::Rising => before <= 0.0 && after >= 0.0,
            TriggerPolicy::Falling => before >= 0.0 && after <= 0.0,
        }
    }
}

/// A detectable occurrence during propagation: a scalar value function whose
/// zero crossing locates the event, a trigger policy, and a modifier applied
/// to the vehicle when the event fires.
///
/// This is the type-erasure seam for events; the integrator holds them as
/// trait objects and never names concrete event types.
pub trait Event {
    fn name(&self) -> &str;

    fn policy(&self) -> TriggerPolicy {
        TriggerPolicy::AnyCrossing
    }

    /// The scalar whose sign change across a step signals the event. The
    /// vehicle's current state is synchronized to `date` when this is
    /// called.
    fn value(&self, date: Date, vehicle: &Vehicle, sys: &System) -> PhysicsResult<f64>;

    /// Mutation applied to the vehicle at the located crossing.
    fn apply(&self, vehicle: &mut Vehicle, sys: &System) -> PhysicsResult<()>;
}

/// An impulsive burn at apoapsis: the value function is ν − π, rising through
/// zero exactly at apoapsis, and the modifier applies the platform's total
/// impulsive Δv capacity along the velocity unit vector.
#[derive(Clone, Debug, Default)]
pub struct ImpulsiveBurn;

impl Event for ImpulsiveBurn {
    fn name(&self) -> &str {
        "impulsive burn"
    }

    fn policy(&self) -> TriggerPolicy {
        // ν − π also flips sign discontinuously at periapsis; only the
        // rising crossing is the apoapsis.
        TriggerPolicy::Rising
    }

    fn value(&self, date: Date, vehicle: &Vehicle, sys: &System) -> PhysicsResult<f64> {
        let state = vehicle.state_at(date)?;
        let elements = state.elements.to_keplerian(sys);
        Ok(elements.ta_rad - PI)
    }

    fn apply(&self, vehicle: &mut Vehicle, sys: &System) -> PhysicsResult<()> {
        let dv_km_s = vehicle.impulsive_dv_km_s();
        if dv_km_s == 0.0 {
            return Ok(());
        }

        let state = *vehicle.current_state();
        let mut cartesian = state.elements.to_cartesian(sys);
        let v_hat = cartesian.velocity_km_s.unit();
        cartesian.velocity_km_s = cartesian.velocity_km_s
            + crate::math::vectors::VelocityVector::from_vector(*v_hat.as_vector() * dv_km_s);

        vehicle.set_current_state(State::new(
            OrbitalElements::Cartesian(cartesian),
            state.epoch(),
        ));
        Ok(())
    }
}

/// A horizon crossing against a ground point: positive while the vehicle is
/// above the point's horizon plane, negative below. Crossings are reported
/// only; the modifier is a no-op.
#[derive(Clone, Debug)]
pub struct HorizonCrossing {
    name: String,
    ground: GroundPoint,
}

impl HorizonCrossing {
    pub fn new(name: &str, ground: GroundPoint) -> Self {
        Self {
            name: name.to_string(),
            ground,
        }
    }

    pub fn ground(&self) -> &GroundPoint {
        &self.ground
    }
}

impl Event for HorizonCrossing {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self, date: Date, vehicle: &Vehicle, sys: &System) -> PhysicsResult<f64> {
        let r = vehicle.position_at(date, sys)?;
        let zenith = self.ground.zenith_eci(date, sys)?;
        let ground_radius_km = self.ground.position_eci(date, sys)?.norm();
        Ok(r.dot(&zenith) - ground_radius_km)
    }

    fn apply(&self, _vehicle: &mut Vehicle, _sys: &System) -> PhysicsResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod ut_events {
    use super::*;
    use crate::bodies::BodyId;
    use crate::elements::Keplerian;
    use crate::platforms::{PayloadPlatform, Spacecraft, Thruster};

    #[test]
    fn test_trigger_policies() {
        assert!(TriggerPolicy::AnyCrossing.triggers(-1.0, 1.0));
        assert!(TriggerPolicy::AnyCrossing.triggers(1.0, -1.0));
        assert!(TriggerPolicy::AnyCrossing.triggers(0.0, 1.0));
        assert!(!TriggerPolicy::AnyCrossing.triggers(1.0, 2.0));

        assert!(TriggerPolicy::Rising.triggers(-1.0, 1.0));
        assert!(!TriggerPolicy::Rising.triggers(1.0, -1.0));
        assert!(TriggerPolicy::Falling.triggers(1.0, -1.0));
        assert!(!TriggerPolicy::Falling.triggers(-1.0, 1.0));
    }

    #[test]
    fn test_burn_value_sign_around_apoapsis() {
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        let before = State::new(
            OrbitalElements::Keplerian(Keplerian::new(8000.0, 0.1, 0.3, 0.0, 0.0, 3.0)),
            epoch,
        );
        let vehicle = Vehicle::new(&Spacecraft::new("burner", before));
        assert!(ImpulsiveBurn.value(epoch, &vehicle, &sys).unwrap() < 0.0);

        let after = State::new(
            OrbitalElements::Keplerian(Keplerian::new(8000.0, 0.1, 0.3, 0.0, 0.0, 3.3)),
            epoch,
        );
        let vehicle = Vehicle::new(&Spacecraft::new("burner", after));
        assert!(ImpulsiveBurn.value(epoch, &vehicle, &sys).unwrap() > 0.0);
    }

    #[test]
    fn test_burn_raises_speed() {
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        let state = State::new(
            OrbitalElements::Keplerian(Keplerian::new(7000.0, 0.0, 0.4, 0.0, 0.0, PI)),
            epoch,
        );
        let mut platform = PayloadPlatform::new(Spacecraft::new("tug", state));
        platform.attach(Thruster::new("kick", 10.0, 0.1));
        let mut vehicle = Vehicle::new(&platform);

        let v_before = vehicle
            .current_state()
            .elements
            .to_cartesian(&sys)
            .vmag_km_s();
        ImpulsiveBurn.apply(&mut vehicle, &sys).unwrap();
        let v_after = vehicle
            .current_state()
            .elements
            .to_cartesian(&sys)
            .vmag_km_s();
        approx::assert_relative_eq!(v_after - v_before, 0.1, max_relative = 1e-9);

        // Semi-major axis grows with the prograde burn.
        let sma_after = vehicle
            .current_state()
            .elements
            .to_keplerian(&sys)
            .sma_km;
        assert!(sma_after > 7000.0);
    }

    #[test]
    fn test_horizon_value_sign() {
        let sys = System::earth_moon();
        let epoch = Date::j2000();
        let gp = GroundPoint::new(BodyId::Earth, 0.0, 0.0, 0.0);
        let zenith = gp.zenith_eci(epoch, &sys).unwrap();

        // Directly overhead: above the horizon.
        let overhead = state_along(&zenith, 7000.0);
        let vehicle = Vehicle::new(&Spacecraft::new(
            "sat",
            State::new(OrbitalElements::Cartesian(overhead), epoch),
        ));
        let event = HorizonCrossing::new("gs-contact", gp.clone());
        assert!(event.value(epoch, &vehicle, &sys).unwrap() > 0.0);

        // Antipodal: far below the horizon.
        let antipode = state_along(&zenith, -7000.0);
        let vehicle = Vehicle::new(&Spacecraft::new(
            "sat",
            State::new(OrbitalElements::Cartesian(antipode), epoch),
        ));
        assert!(event.value(epoch, &vehicle, &sys).unwrap() < 0.0);
    }

    fn state_along(
        direction: &crate::math::vectors::UnitVector<crate::frames::Eci>,
        scale_km: f64,
    ) -> crate::elements::Cartesian<crate::frames::Eci> {
        crate::elements::Cartesian::new(
            direction.x() * scale_km,
            direction.y() * scale_km,
            direction.z() * scale_km,
            0.0,
            0.0,
            0.0,
        )
    }
}
