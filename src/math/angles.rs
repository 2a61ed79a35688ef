/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use core::f64::consts::{PI, TAU};

/// Wraps the provided angle into [0, 360) degrees.
pub fn between_0_360(angle_deg: f64) -> f64 {
    let mut wrapped = angle_deg % 360.0;
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    wrapped
}

/// Wraps the provided angle into [-180, 180) degrees.
pub fn between_pm_180(angle_deg: f64) -> f64 {
    between_0_360(angle_deg + 180.0) - 180.0
}

/// Wraps the provided angle into [0, 2π) radians.
pub fn between_0_two_pi(angle_rad: f64) -> f64 {
    let mut wrapped = angle_rad % TAU;
    if wrapped < 0.0 {
        wrapped += TAU;
    }
    wrapped
}

/// Wraps the provided angle into [-π, π) radians.
pub fn between_pm_pi(angle_rad: f64) -> f64 {
    between_0_two_pi(angle_rad + PI) - PI
}

/// Inverse cosine clamped into its domain so that rounding noise can never
/// produce a NaN angle.
pub fn clamped_acos(cos_value: f64) -> f64 {
    cos_value.clamp(-1.0, 1.0).acos()
}

/// Inverse sine clamped into its domain.
pub fn clamped_asin(sin_value: f64) -> f64 {
    sin_value.clamp(-1.0, 1.0).asin()
}
