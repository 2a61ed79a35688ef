/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

mod dcm;
mod quaternion;

pub use dcm::Dcm;
pub use quaternion::Quaternion;

/// Orthonormality tolerance every constructed rotation must satisfy.
pub const DCM_ORTHONORMALITY_TOL: f64 = 1e-12;
