/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

//! Built-in body records.
//!
//! Physical constants follow the usual JPL/IAU values; the secular mean
//! elements and their per-century rates are the JPL approximate planetary
//! elements referenced to J2000, with the (b, c, s, f) mean-anomaly
//! corrections for the outer planets. Earth's atmosphere is the US Standard
//! Atmosphere 1976 exponential table (Vallado, table 7-4).

use super::{
    AtmosphereRow, BodyId, BodyKind, CelestialBody, OuterPlanetCorrection, SecularElements,
};
use crate::constants::AU_KM;
use crate::time::Date;

/// US Standard Atmosphere 1976, piecewise-exponential (Vallado, table 7-4).
/// Rows are (ceiling, base altitude, base density kg/m^3, scale height km).
static EARTH_ATMOSPHERE: [AtmosphereRow; 28] = [
    row(25.0, 0.0, 1.225, 7.249),
    row(30.0, 25.0, 3.899e-2, 6.349),
    row(40.0, 30.0, 1.774e-2, 6.682),
    row(50.0, 40.0, 3.972e-3, 7.554),
    row(60.0, 50.0, 1.057e-3, 8.382),
    row(70.0, 60.0, 3.206e-4, 7.714),
    row(80.0, 70.0, 8.770e-5, 6.549),
    row(90.0, 80.0, 1.905e-5, 5.799),
    row(100.0, 90.0, 3.396e-6, 5.382),
    row(110.0, 100.0, 5.297e-7, 5.877),
    row(120.0, 110.0, 9.661e-8, 7.263),
    row(130.0, 120.0, 2.438e-8, 9.473),
    row(140.0, 130.0, 8.484e-9, 12.636),
    row(150.0, 140.0, 3.845e-9, 16.149),
    row(180.0, 150.0, 2.070e-9, 22.523),
    row(200.0, 180.0, 5.464e-10, 29.740),
    row(250.0, 200.0, 2.789e-10, 37.105),
    row(300.0, 250.0, 7.248e-11, 45.546),
    row(350.0, 300.0, 2.418e-11, 53.628),
    row(400.0, 350.0, 9.158e-12, 53.298),
    row(450.0, 400.0, 3.725e-12, 58.515),
    row(500.0, 450.0, 1.585e-12, 60.828),
    row(600.0, 500.0, 6.967e-13, 63.822),
    row(700.0, 600.0, 1.454e-13, 71.835),
    row(800.0, 700.0, 3.614e-14, 88.667),
    row(900.0, 800.0, 1.170e-14, 124.64),
    row(1000.0, 900.0, 5.245e-15, 181.05),
    row(1100.0, 1000.0, 2.019e-15, 268.00),
];

const fn row(ceiling_km: f64, base_km: f64, rho_kg_m3: f64, scale_km: f64) -> AtmosphereRow {
    AtmosphereRow {
        ceiling_km,
        base_km,
        rho_kg_m3,
        scale_km,
    }
}

#[allow(clippy::too_many_arguments)]
const fn secular_au(
    sma_au: f64,
    ecc: f64,
    inc_deg: f64,
    mean_long_deg: f64,
    long_peri_deg: f64,
    raan_deg: f64,
    sma_au_per_cy: f64,
    ecc_per_cy: f64,
    inc_deg_per_cy: f64,
    mean_long_deg_per_cy: f64,
    long_peri_deg_per_cy: f64,
    raan_deg_per_cy: f64,
    correction: Option<OuterPlanetCorrection>,
) -> SecularElements {
    SecularElements {
        sma_km: sma_au * AU_KM,
        ecc,
        inc_deg,
        raan_deg,
        long_peri_deg,
        mean_long_deg,
        sma_km_per_cy: sma_au_per_cy * AU_KM,
        ecc_per_cy,
        inc_deg_per_cy,
        raan_deg_per_cy,
        long_peri_deg_per_cy,
        mean_long_deg_per_cy,
        correction,
    }
}

/// Mean elements of a tidally locked satellite about its parent. Reference
/// phases are zeroed: they are unobservable from the mean-element drift
/// alone, and a bound ephemeris supersedes this path when real geometry
/// matters.
fn satellite_secular(sma_km: f64, ecc: f64, inc_deg: f64, period_days: f64) -> SecularElements {
    let mean_motion_deg_cy = 360.0 / period_days * 36_525.0;
    SecularElements {
        sma_km,
        ecc,
        inc_deg,
        raan_deg: 0.0,
        long_peri_deg: 0.0,
        mean_long_deg: 0.0,
        sma_km_per_cy: 0.0,
        ecc_per_cy: 0.0,
        inc_deg_per_cy: 0.0,
        raan_deg_per_cy: 0.0,
        long_peri_deg_per_cy: 0.0,
        mean_long_deg_per_cy: mean_motion_deg_cy,
        correction: None,
    }
}

/// Record for a tidally locked natural satellite.
#[allow(clippy::too_many_arguments)]
fn satellite(
    name: &'static str,
    id: BodyId,
    parent: BodyId,
    mu_km3_s2: f64,
    mass_kg: f64,
    radius_km: f64,
    sma_km: f64,
    ecc: f64,
    inc_deg: f64,
    period_days: f64,
) -> CelestialBody {
    CelestialBody {
        name,
        id,
        parent: Some(parent),
        kind: BodyKind::Moon,
        reference_epoch: Date::j2000(),
        mu_km3_s2,
        mass_kg,
        equatorial_radius_km: radius_km,
        polar_radius_km: radius_km,
        crash_radius_km: radius_km + 25.0,
        j2: 0.0,
        j3: 0.0,
        axial_tilt_deg: 0.0,
        // Tidally locked: one rotation per orbit.
        rotation_rate_deg_day: 360.0 / period_days,
        sidereal_period_days: period_days,
        secular: Some(satellite_secular(sma_km, ecc, inc_deg, period_days)),
        atmosphere: None,
        ephemeris: None,
    }
}

impl CelestialBody {
    /// Looks up a built-in body record.
    pub fn from_id(id: BodyId) -> Self {
        match id {
            BodyId::Sun => Self::sun(),
            BodyId::Mercury => Self::mercury(),
            BodyId::Venus => Self::venus(),
            BodyId::Earth => Self::earth(),
            BodyId::Moon => Self::moon(),
            BodyId::Mars => Self::mars(),
            BodyId::Phobos => satellite(
                "Phobos",
                BodyId::Phobos,
                BodyId::Mars,
                7.11e-4,
                1.066e16,
                11.1,
                9_376.0,
                0.0151,
                1.093,
                0.318_9,
            ),
            BodyId::Deimos => satellite(
                "Deimos",
                BodyId::Deimos,
                BodyId::Mars,
                9.85e-5,
                1.476e15,
                6.2,
                23_463.0,
                0.000_33,
                0.93,
                1.263,
            ),
            BodyId::Jupiter => Self::jupiter(),
            BodyId::Io => satellite(
                "Io",
                BodyId::Io,
                BodyId::Jupiter,
                5_959.9,
                8.93e22,
                1_821.6,
                421_800.0,
                0.0041,
                0.036,
                1.769_138,
            ),
            BodyId::Europa => satellite(
                "Europa",
                BodyId::Europa,
                BodyId::Jupiter,
                3_202.7,
                4.80e22,
                1_560.8,
                671_100.0,
                0.0094,
                0.466,
                3.551_181,
            ),
            BodyId::Ganymede => satellite(
                "Ganymede",
                BodyId::Ganymede,
                BodyId::Jupiter,
                9_887.8,
                1.481_9e23,
                2_631.2,
                1_070_400.0,
                0.0013,
                0.177,
                7.154_553,
            ),
            BodyId::Callisto => satellite(
                "Callisto",
                BodyId::Callisto,
                BodyId::Jupiter,
                7_179.3,
                1.075_9e23,
                2_410.3,
                1_882_700.0,
                0.0074,
                0.192,
                16.689_017,
            ),
            BodyId::Saturn => Self::saturn(),
            BodyId::Titan => satellite(
                "Titan",
                BodyId::Titan,
                BodyId::Saturn,
                8_978.1,
                1.345_2e23,
                2_574.7,
                1_221_870.0,
                0.0288,
                0.28,
                15.945_421,
            ),
            BodyId::Rhea => satellite(
                "Rhea",
                BodyId::Rhea,
                BodyId::Saturn,
                153.94,
                2.306e21,
                763.8,
                527_108.0,
                0.001_26,
                0.345,
                4.518_212,
            ),
            BodyId::Iapetus => satellite(
                "Iapetus",
                BodyId::Iapetus,
                BodyId::Saturn,
                120.5,
                1.805e21,
                734.5,
                3_560_820.0,
                0.0283,
                15.47,
                79.321_5,
            ),
            BodyId::Uranus => Self::uranus(),
            BodyId::Titania => satellite(
                "Titania",
                BodyId::Titania,
                BodyId::Uranus,
                228.2,
                3.42e21,
                788.9,
                435_910.0,
                0.0011,
                0.34,
                8.706_234,
            ),
            BodyId::Oberon => satellite(
                "Oberon",
                BodyId::Oberon,
                BodyId::Uranus,
                192.4,
                2.88e21,
                761.4,
                583_520.0,
                0.0014,
                0.058,
                13.463_239,
            ),
            BodyId::Neptune => Self::neptune(),
            BodyId::Triton => satellite(
                "Triton",
                BodyId::Triton,
                BodyId::Neptune,
                1_428.0,
                2.14e22,
                1_353.4,
                354_759.0,
                0.000_016,
                // Retrograde orbit.
                156.865,
                5.876_854,
            ),
        }
    }

    pub fn sun() -> Self {
        Self {
            name: "Sun",
            id: BodyId::Sun,
            parent: None,
            kind: BodyKind::Star,
            reference_epoch: Date::j2000(),
            mu_km3_s2: 1.327_124_400_18e11,
            mass_kg: 1.989e30,
            equatorial_radius_km: 696_000.0,
            polar_radius_km: 696_000.0,
            crash_radius_km: 696_100.0,
            j2: 0.0,
            j3: 0.0,
            axial_tilt_deg: 7.25,
            rotation_rate_deg_day: 14.18,
            sidereal_period_days: 25.38,
            secular: None,
            atmosphere: None,
            ephemeris: None,
        }
    }

    pub fn mercury() -> Self {
        Self {
            name: "Mercury",
            id: BodyId::Mercury,
            parent: Some(BodyId::Sun),
            kind: BodyKind::Planet,
            reference_epoch: Date::j2000(),
            mu_km3_s2: 2.2032e4,
            mass_kg: 3.301e23,
            equatorial_radius_km: 2_439.7,
            polar_radius_km: 2_438.3,
            crash_radius_km: 2_539.7,
            j2: 6.0e-5,
            j3: 0.0,
            axial_tilt_deg: 0.034,
            rotation_rate_deg_day: 6.138_5,
            sidereal_period_days: 87.969,
            secular: Some(secular_au(
                0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28,
                48.330_765_93, 0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75,
                0.160_476_89, -0.125_340_81, None,
            )),
            atmosphere: None,
            ephemeris: None,
        }
    }

    pub fn venus() -> Self {
        Self {
            name: "Venus",
            id: BodyId::Venus,
            parent: Some(BodyId::Sun),
            kind: BodyKind::Planet,
            reference_epoch: Date::j2000(),
            mu_km3_s2: 3.248_59e5,
            mass_kg: 4.867e24,
            equatorial_radius_km: 6_051.8,
            polar_radius_km: 6_051.8,
            crash_radius_km: 6_151.8,
            j2: 4.458e-6,
            j3: 0.0,
            axial_tilt_deg: 177.36,
            rotation_rate_deg_day: -1.481_4,
            sidereal_period_days: 224.701,
            secular: Some(secular_au(
                0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18,
                76.679_842_55, 0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29,
                0.002_683_29, -0.277_694_18, None,
            )),
            atmosphere: None,
            ephemeris: None,
        }
    }

    pub fn earth() -> Self {
        Self {
            name: "Earth",
            id: BodyId::Earth,
            parent: Some(BodyId::Sun),
            kind: BodyKind::Planet,
            reference_epoch: Date::j2000(),
            mu_km3_s2: 398_600.441_8,
            mass_kg: 5.97e24,
            equatorial_radius_km: 6_378.1,
            polar_radius_km: 6_356.752,
            crash_radius_km: 6_478.1,
            j2: 1_082.63e-6,
            j3: -2.5323e-6,
            axial_tilt_deg: 23.439_292,
            rotation_rate_deg_day: 360.985_188_744_281_3,
            sidereal_period_days: 365.256,
            secular: Some(secular_au(
                1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0,
                0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0,
                None,
            )),
            atmosphere: Some(&EARTH_ATMOSPHERE),
            ephemeris: None,
        }
    }

    pub fn moon() -> Self {
        Self {
            name: "Moon",
            id: BodyId::Moon,
            parent: Some(BodyId::Earth),
            kind: BodyKind::Moon,
            reference_epoch: Date::j2000(),
            mu_km3_s2: 4_902.800_066,
            mass_kg: 7.342e22,
            equatorial_radius_km: 1_738.1,
            polar_radius_km: 1_736.0,
            crash_radius_km: 1_838.1,
            j2: 202.7e-6,
            j3: 0.0,
            axial_tilt_deg: 6.68,
            rotation_rate_deg_day: 13.176_358,
            sidereal_period_days: 27.321_661,
            // Geocentric mean elements; the dominant secular terms are the
            // node regression and apsidal precession.
            secular: Some(SecularElements {
                sma_km: 384_400.0,
                ecc: 0.055_4,
                inc_deg: 5.16,
                raan_deg: 125.08,
                long_peri_deg: 83.23,
                mean_long_deg: 218.32,
                sma_km_per_cy: 0.0,
                ecc_per_cy: 0.0,
                inc_deg_per_cy: 0.0,
                raan_deg_per_cy: -1_934.14,
                long_peri_deg_per_cy: 4_069.01,
                mean_long_deg_per_cy: 481_267.881,
                correction: None,
            }),
            atmosphere: None,
            ephemeris: None,
        }
    }

    pub fn mars() -> Self {
        Self {
            name: "Mars",
            id: BodyId::Mars,
            parent: Some(BodyId::Sun),
            kind: BodyKind::Planet,
            reference_epoch: Date::j2000(),
            mu_km3_s2: 4.282_837e4,
            mass_kg: 6.417e23,
            equatorial_radius_km: 3_396.2,
            polar_radius_km: 3_376.2,
            crash_radius_km: 3_496.2,
            j2: 1_960.45e-6,
            j3: 3.145e-5,
            axial_tilt_deg: 25.19,
            rotation_rate_deg_day: 350.891_98,
            sidereal_period_days: 686.980,
            secular: Some(secular_au(
                1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59,
                49.559_538_91, 0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99,
                0.444_410_88, -0.292_573_43, None,
            )),
            atmosphere: None,
            ephemeris: None,
        }
    }

    pub fn jupiter() -> Self {
        Self {
            name: "Jupiter",
            id: BodyId::Jupiter,
            parent: Some(BodyId::Sun),
            kind: BodyKind::Planet,
            reference_epoch: Date::j2000(),
            mu_km3_s2: 1.266_865_34e8,
            mass_kg: 1.898e27,
            equatorial_radius_km: 71_492.0,
            polar_radius_km: 66_854.0,
            crash_radius_km: 71_592.0,
            j2: 14_736.0e-6,
            j3: 0.0,
            axial_tilt_deg: 3.13,
            rotation_rate_deg_day: 870.536,
            sidereal_period_days: 4_332.589,
            secular: Some(secular_au(
                5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83,
                100.473_909_09, -0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75,
                0.212_526_68, 0.204_691_06,
                Some(OuterPlanetCorrection {
                    b_deg: -0.000_124_52,
                    c_deg: 0.060_640_60,
                    s_deg: -0.356_354_38,
                    f_deg: 38.351_250_00,
                }),
            )),
            atmosphere: None,
            ephemeris: None,
        }
    }

    pub fn saturn() -> Self {
        Self {
            name: "Saturn",
            id: BodyId::Saturn,
            parent: Some(BodyId::Sun),
            kind: BodyKind::Planet,
            reference_epoch: Date::j2000(),
            mu_km3_s2: 3.793_118_7e7,
            mass_kg: 5.683e26,
            equatorial_radius_km: 60_268.0,
            polar_radius_km: 54_364.0,
            crash_radius_km: 60_368.0,
            j2: 16_298.0e-6,
            j3: 0.0,
            axial_tilt_deg: 26.73,
            rotation_rate_deg_day: 810.793,
            sidereal_period_days: 10_759.22,
            secular: Some(secular_au(
                9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31,
                113.662_424_48, -0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01,
                -0.418_972_16, -0.288_677_94,
                Some(OuterPlanetCorrection {
                    b_deg: 0.000_258_99,
                    c_deg: -0.134_344_69,
                    s_deg: 0.873_201_47,
                    f_deg: 38.351_250_00,
                }),
            )),
            atmosphere: None,
            ephemeris: None,
        }
    }

    pub fn uranus() -> Self {
        Self {
            name: "Uranus",
            id: BodyId::Uranus,
            parent: Some(BodyId::Sun),
            kind: BodyKind::Planet,
            reference_epoch: Date::j2000(),
            mu_km3_s2: 5.793_939e6,
            mass_kg: 8.681e25,
            equatorial_radius_km: 25_559.0,
            polar_radius_km: 24_973.0,
            crash_radius_km: 25_659.0,
            j2: 3_343.43e-6,
            j3: 0.0,
            axial_tilt_deg: 97.77,
            rotation_rate_deg_day: -501.16,
            sidereal_period_days: 30_685.4,
            secular: Some(secular_au(
                19.189_164_64, 0.047_257_44, 0.772_637_83, 313.238_104_51, 170.954_276_30,
                74.016_925_03, -0.001_961_76, -0.000_043_97, -0.002_429_39, 428.482_027_85,
                0.408_052_81, 0.042_405_89,
                Some(OuterPlanetCorrection {
                    b_deg: 0.000_583_31,
                    c_deg: -0.977_318_48,
                    s_deg: 0.176_892_45,
                    f_deg: 7.670_250_00,
                }),
            )),
            atmosphere: None,
            ephemeris: None,
        }
    }

    pub fn neptune() -> Self {
        Self {
            name: "Neptune",
            id: BodyId::Neptune,
            parent: Some(BodyId::Sun),
            kind: BodyKind::Planet,
            reference_epoch: Date::j2000(),
            mu_km3_s2: 6.836_529e6,
            mass_kg: 1.024e26,
            equatorial_radius_km: 24_764.0,
            polar_radius_km: 24_341.0,
            crash_radius_km: 24_864.0,
            j2: 3_411.0e-6,
            j3: 0.0,
            axial_tilt_deg: 28.32,
            rotation_rate_deg_day: 536.31,
            sidereal_period_days: 60_189.0,
            secular: Some(secular_au(
                30.069_922_76, 0.008_590_48, 1.770_043_47, -55.120_029_69, 44.964_762_27,
                131.784_225_74, 0.000_262_91, 0.000_051_05, 0.000_353_72, 218.459_453_25,
                -0.322_414_64, -0.005_086_64,
                Some(OuterPlanetCorrection {
                    b_deg: -0.000_413_48,
                    c_deg: 0.683_463_18,
                    s_deg: -0.101_625_47,
                    f_deg: 7.670_250_00,
                }),
            )),
            atmosphere: None,
            ephemeris: None,
        }
    }
}

#[cfg(test)]
mod ut_catalog {
    use super::*;

    const ALL_BODIES: [BodyId; 22] = [
        BodyId::Sun,
        BodyId::Mercury,
        BodyId::Venus,
        BodyId::Earth,
        BodyId::Moon,
        BodyId::Mars,
        BodyId::Phobos,
        BodyId::Deimos,
        BodyId::Jupiter,
        BodyId::Io,
        BodyId::Europa,
        BodyId::Ganymede,
        BodyId::Callisto,
        BodyId::Saturn,
        BodyId::Titan,
        BodyId::Rhea,
        BodyId::Iapetus,
        BodyId::Uranus,
        BodyId::Titania,
        BodyId::Oberon,
        BodyId::Neptune,
        BodyId::Triton,
    ];

    #[test]
    fn test_catalog_is_complete() {
        for id in ALL_BODIES {
            let body = CelestialBody::from_id(id);
            assert_eq!(body.id, id);
            assert!(body.mu_km3_s2 > 0.0);
            assert!(body.crash_radius_km >= body.equatorial_radius_km);
            if id != BodyId::Sun {
                assert!(body.parent.is_some());
                assert!(body.secular.is_some());
            }
        }
    }

    #[test]
    fn test_parent_chains_reach_sun() {
        for start in ALL_BODIES {
            let mut id = start;
            let mut hops = 0;
            while let Some(parent) = CelestialBody::from_id(id).parent {
                id = parent;
                hops += 1;
                assert!(hops < 5);
            }
            assert_eq!(id, BodyId::Sun);
        }
    }

    #[test]
    fn test_satellite_periods_match_mean_motion() {
        let io = CelestialBody::from_id(BodyId::Io);
        let secular = io.secular.unwrap();
        let n_deg_day = secular.mean_long_deg_per_cy / 36_525.0;
        approx::assert_relative_eq!(360.0 / n_deg_day, io.sidereal_period_days);
    }
}
