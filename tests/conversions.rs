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
use osprey::prelude::*;
use rstest::rstest;

fn rel_close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
}

#[rstest]
#[case(8000.0, 0.1, 30.0, 45.0, 60.0, 90.0)]
#[case(7000.0, 0.02, 98.7, 120.0, 15.0, 310.0)]
#[case(26_560.0, 0.74, 63.4, 280.0, 270.0, 5.0)]
#[case(42_164.0, 0.0003, 0.05, 75.0, 190.0, 222.0)]
#[case(12_345.6, 0.5, 145.0, 359.0, 181.0, 179.0)]
fn keplerian_cartesian_cycle(
    #[case] sma_km: f64,
    #[case] ecc: f64,
    #[case] inc_deg: f64,
    #[case] raan_deg: f64,
    #[case] aop_deg: f64,
    #[case] ta_deg: f64,
) {
    let sys = System::earth_moon();
    let original = OrbitalElements::Keplerian(Keplerian::new(
        sma_km,
        ecc,
        inc_deg.to_radians(),
        raan_deg.to_radians(),
        aop_deg.to_radians(),
        ta_deg.to_radians(),
    ));

    // Many conversion cycles must stay within one ppm of the start.
    let mut elements = original;
    for _ in 0..50 {
        elements = elements.in_set(ElementSetId::Cartesian, &sys);
        elements = elements.in_set(ElementSetId::Keplerian, &sys);
    }

    let first = original.to_vector();
    let cycled = elements.to_vector();
    for component in 0..6 {
        assert!(
            rel_close(first[component], cycled[component], 1e-6),
            "component {component}: {} vs {}",
            first[component],
            cycled[component]
        );
    }
}

#[rstest]
#[case(9000.0, 0.15, 51.6, 40.0, 80.0, 200.0)]
#[case(7200.0, 0.001, 28.5, 0.0, 0.0, 45.0)]
#[case(20_000.0, 0.3, 116.0, 200.0, 100.0, 300.0)]
fn three_set_transitive_cycle(
    #[case] sma_km: f64,
    #[case] ecc: f64,
    #[case] inc_deg: f64,
    #[case] raan_deg: f64,
    #[case] aop_deg: f64,
    #[case] ta_deg: f64,
) {
    let sys = System::earth_moon();
    let original = OrbitalElements::Keplerian(Keplerian::new(
        sma_km,
        ecc,
        inc_deg.to_radians(),
        raan_deg.to_radians(),
        aop_deg.to_radians(),
        ta_deg.to_radians(),
    ));

    // Keplerian → Equinoctial → Cartesian → Keplerian
    let returned = original
        .in_set(ElementSetId::Equinoctial, &sys)
        .in_set(ElementSetId::Cartesian, &sys)
        .in_set(ElementSetId::Keplerian, &sys);

    let first = original.to_vector();
    let cycled = returned.to_vector();
    for component in 0..6 {
        assert!(
            rel_close(first[component], cycled[component], 1e-6),
            "component {component}: {} vs {}",
            first[component],
            cycled[component]
        );
    }
}

#[test]
fn cartesian_keplerian_round_trip_leo() {
    // r = (7000, 0, 0) km, v = (0, 7.5, 1.0) km/s under Earth µ; out and back
    // within one ppm.
    let sys = System::earth_moon();
    let cart = OrbitalElements::Cartesian(Cartesian::new(7000.0, 0.0, 0.0, 0.0, 7.5, 1.0));

    let back = cart
        .in_set(ElementSetId::Keplerian, &sys)
        .in_set(ElementSetId::Cartesian, &sys);

    let first = cart.to_vector();
    let cycled = back.to_vector();
    for component in 0..6 {
        assert!(
            rel_close(first[component], cycled[component], 1e-6),
            "component {component}: {} vs {}",
            first[component],
            cycled[component]
        );
    }
}

#[test]
fn gmst_at_j2000() {
    assert_relative_eq!(Date::j2000().gmst_rad(), 4.894_96, max_relative = 1e-4);
}

#[test]
fn degenerate_conversions_produce_no_nan() {
    let sys = System::earth_moon();
    for elements in [
        // Circular equatorial
        Keplerian::new(42_164.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        // Circular inclined
        Keplerian::new(7000.0, 0.0, 1.0, 2.0, 0.0, 0.5),
        // Elliptical equatorial
        Keplerian::new(9000.0, 0.2, 0.0, 0.0, 1.0, 2.0),
    ] {
        let cycled = OrbitalElements::Keplerian(elements)
            .in_set(ElementSetId::Cartesian, &sys)
            .in_set(ElementSetId::Keplerian, &sys)
            .to_vector();
        for component in cycled.iter() {
            assert!(!component.is_nan());
        }
    }
}
