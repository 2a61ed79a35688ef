/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use approx::assert_relative_eq;
use osprey::bodies::BodyId;
use osprey::platforms::{GroundPoint, PayloadPlatform, Thruster};
use osprey::prelude::*;
use osprey::propagation::equations_of_motion::TwoBody;
use osprey::propagation::events::{Event, HorizonCrossing, ImpulsiveBurn};

const LEO_SMA_KM: f64 = 7000.0;
const BURN_DV_KM_S: f64 = 0.1;

#[test]
fn impulsive_burn_at_apoapsis() {
    let sys = System::earth_moon();
    let epoch = Date::j2000();

    let state0 = State::new(
        OrbitalElements::Keplerian(Keplerian::new(
            LEO_SMA_KM,
            0.0,
            30.0_f64.to_radians(),
            0.0,
            0.0,
            0.0,
        )),
        epoch,
    );
    let mut platform = PayloadPlatform::new(Spacecraft::new("kicker", state0));
    platform.attach(Thruster::new("apogee motor", 10.0, BURN_DV_KM_S));
    let mut vehicle = Vehicle::new(&platform);

    let eom = TwoBody::new(&sys);
    let period_s = Keplerian::new(LEO_SMA_KM, 0.0, 0.0, 0.0, 0.0, 0.0)
        .period_s(sys.get_mu_km3_s2());

    let mut integrator = Integrator::new();
    // A bounded step keeps every crossing inside a single detection window
    // and the stored states close enough for tight interpolation.
    integrator.switch_fixed_step(true, Some(10.seconds()));
    let burn = ImpulsiveBurn;
    let events: [&dyn Event; 1] = [&burn];
    let interval = Interval::until(period_s.seconds()).unwrap();
    let history = integrator
        .propagate(epoch, interval, &eom, &mut vehicle, true, &events)
        .unwrap();

    // Exactly one firing, recorded in the event map, near the half period.
    let fired = &history.event_times()["impulsive burn"];
    assert_eq!(fired.len(), 1);
    let burn_date = fired[0];
    assert_relative_eq!(
        (burn_date - epoch).to_seconds(),
        period_s / 2.0,
        max_relative = 1e-2
    );
    assert!(history.at(burn_date).is_ok());

    // The burn raised the orbit by the expected amount: at the burn point
    // r = a and the new speed is the circular speed plus the impulse.
    let mu = sys.get_mu_km3_s2();
    let v_new = (mu / LEO_SMA_KM).sqrt() + BURN_DV_KM_S;
    let expected_sma = 1.0 / (2.0 / LEO_SMA_KM - v_new * v_new / mu);

    let final_kep = vehicle.current_state().elements.to_keplerian(&sys);
    assert!(final_kep.sma_km > LEO_SMA_KM);
    assert_relative_eq!(final_kep.sma_km, expected_sma, max_relative = 1e-4);

    // The last stored state before the burn is still on the original orbit.
    let before_date = *history
        .dates()
        .filter(|date| **date < burn_date)
        .last()
        .unwrap();
    let before = history.at(before_date).unwrap().elements.to_keplerian(&sys);
    assert_relative_eq!(before.sma_km, LEO_SMA_KM, max_relative = 1e-6);
}

#[test]
fn horizon_crossings_are_reported_not_applied() {
    let sys = System::earth_moon();
    let epoch = Date::j2000();

    // Equatorial ground point and an equatorial LEO: visibility windows
    // repeat every synodic revolution.
    let ground = GroundPoint::new(BodyId::Earth, 0.0, 0.0, 0.0);
    let state0 = State::new(
        OrbitalElements::Keplerian(Keplerian::new(LEO_SMA_KM, 0.0, 0.0, 0.0, 0.0, 0.0)),
        epoch,
    );
    let mut vehicle = Vehicle::new(&Spacecraft::new("passer", state0));

    let eom = TwoBody::new(&sys);
    let crossing = HorizonCrossing::new("station contact", ground);
    let events: [&dyn Event; 1] = [&crossing];

    let mut integrator = Integrator::new();
    integrator.switch_fixed_step(true, Some(30.seconds()));
    let interval = Interval::until(6.hours()).unwrap();
    let history = integrator
        .propagate(epoch, interval, &eom, &mut vehicle, false, &events)
        .unwrap();

    let crossings = &history.event_times()["station contact"];
    // Several rises and sets over six hours of a ~97 minute ground track.
    assert!(crossings.len() >= 4);
    // Crossings are in ascending order.
    assert!(crossings.windows(2).all(|pair| pair[0] < pair[1]));

    // The modifier is a no-op: the orbit is unchanged.
    let final_kep = vehicle.current_state().elements.to_keplerian(&sys);
    assert_relative_eq!(final_kep.sma_km, LEO_SMA_KM, max_relative = 1e-6);

    // The crossing dates convert into rise/set windows.
    let windows = osprey::access::RiseSetArray::from_crossings(
        crossings,
        epoch,
        false,
        interval.end(),
    );
    assert!(windows.is_ok());
}
