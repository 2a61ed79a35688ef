/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use osprey::bodies::BodyId;
use osprey::frames::{
    convert_to_frame, ecef_to_inertial, inertial_to_ecef, DynamicFrame, Lvlh, Ric, Rtn, Vnb,
};
use osprey::math::vectors::{RadiusVector, VelocityVector};
use osprey::prelude::*;

fn sweep_dates() -> Vec<Date> {
    let epoch = Date::j2000();
    (0..24).map(|hour| epoch + (hour as i64).hours()).collect()
}

#[test]
fn same_frame_conversion_is_exact_identity() {
    let sys = System::earth_moon();
    let date = Date::j2000();
    let v = RadiusVector::<Eci>::new(8123.4, -221.0, 17.9);
    let same = convert_to_frame::<Eci, Eci>(&v, date, &sys).unwrap();
    assert_eq!(same.x(), v.x());
    assert_eq!(same.y(), v.y());
    assert_eq!(same.z(), v.z());
}

#[test]
fn ecef_dcm_is_orthonormal_across_dates() {
    for date in sweep_dates() {
        assert!(Ecef::dcm_at(date).is_orthonormal());
    }
}

#[test]
fn rotation_round_trips_within_tolerance() {
    let v = RadiusVector::<Eci>::new(7000.0, -1500.0, 4200.0);
    for date in sweep_dates() {
        let back = Ecef::rotate_out_of_this_frame(&Ecef::rotate_into_this_frame(&v, date), date);
        assert!((back - v).norm() / v.norm() < 1e-9);
    }
}

#[test]
fn translation_round_trips_within_tolerance() {
    let sys = System::new(BodyId::Earth, &[BodyId::Sun, BodyId::Moon]);
    let v = RadiusVector::<Eci>::new(42_164.0, 11.0, -5.0);
    for date in sweep_dates() {
        let heliocentric = convert_to_frame::<Eci, Hci>(&v, date, &sys).unwrap();
        let back = convert_to_frame::<Hci, Eci>(&heliocentric, date, &sys).unwrap();
        assert!((back - v).norm() / v.norm() < 1e-9);
    }
}

#[test]
fn composite_transformation_round_trips() {
    // ECEF → heliocentric inertial → ECEF exercises rotation, translation,
    // and their composition in §4.3 order.
    let sys = System::new(BodyId::Earth, &[BodyId::Sun]);
    let v = RadiusVector::<Ecef>::new(6378.1, 12.0, 900.0);
    for date in sweep_dates() {
        let heliocentric = ecef_to_inertial::<Hci>(&v, date, &sys).unwrap();
        let back = inertial_to_ecef::<Hci>(&heliocentric, date, &sys).unwrap();
        assert!((back - v).norm() / v.norm() < 1e-9);
    }
}

#[test]
fn dynamic_frames_are_orthonormal_and_invertible() {
    let date = Date::j2000();
    let r = RadiusVector::<Eci>::new(6900.0, 1200.0, -300.0);
    let v = VelocityVector::<Eci>::new(-1.1, 7.2, 0.4);
    let probe = RadiusVector::<Eci>::new(7100.0, 1300.0, -250.0);

    let rtn = DynamicFrame::<Rtn>::instantaneous(r, v, date);
    let ric = DynamicFrame::<Ric>::instantaneous(r, v, date);
    let lvlh = DynamicFrame::<Lvlh>::instantaneous(r, v, date);
    let vnb = DynamicFrame::<Vnb>::instantaneous(r, v, date);

    assert!(rtn.dcm().is_orthonormal());
    assert!(ric.dcm().is_orthonormal());
    assert!(lvlh.dcm().is_orthonormal());
    assert!(vnb.dcm().is_orthonormal());

    {
        let back = rtn.convert_from_this_frame(&rtn.convert_to_this_frame(&probe));
        assert!((back - probe).norm() / probe.norm() < 1e-12);
    }
    {
        let back = ric.convert_from_this_frame(&ric.convert_to_this_frame(&probe));
        assert!((back - probe).norm() / probe.norm() < 1e-12);
    }

    // For a near-circular state the RTN and RIC triads nearly coincide.
    let delta = (rtn.dcm().rot_mat - ric.dcm().rot_mat).norm();
    assert!(delta < 0.05);
}

#[test]
fn relative_position_is_consistent_with_frame_conversion() {
    // Converting the origin of ECI into HCI must land on the Earth's
    // heliocentric position.
    let sys = System::new(BodyId::Earth, &[BodyId::Sun]);
    let date = Date::j2000();

    let origin = RadiusVector::<Eci>::zeros();
    let earth_in_hci = convert_to_frame::<Eci, Hci>(&origin, date, &sys).unwrap();
    let sun_to_earth = sys
        .get_relative_position(date, BodyId::Sun, BodyId::Earth)
        .unwrap();
    assert!((earth_in_hci - sun_to_earth).norm() < 1e-6);
}
