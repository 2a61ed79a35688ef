/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use super::EquationsOfMotion;
use crate::elements::{ElementPartials, ElementSetId};
use crate::errors::PhysicsResult;
use crate::math::Vector6;
use crate::platforms::Vehicle;
use crate::propagation::force_models::ForceModel;
use crate::state::State;
use crate::system::System;
use core::sync::atomic::{AtomicBool, Ordering};
use log::warn;

/// Clamp applied to eccentricity and inclination before the Gauss rates are
/// formed; prevents the singular divisions at the cost of accuracy very near
/// the singularity.
pub(crate) const VOP_SINGULARITY_CLAMP: f64 = 1e-10;

/// Gauss variation of parameters in the classical elements (a, e, i, Ω, ω, ν),
/// driven by the RTN decomposition of the force-model acceleration.
pub struct KeplerianVop<'a> {
    system: &'a System,
    forces: ForceModel,
    warn_degenerate: bool,
    warned: AtomicBool,
}

impl<'a> KeplerianVop<'a> {
    pub fn new(system: &'a System, forces: ForceModel, warn_degenerate: bool) -> Self {
        Self {
            system,
            forces,
            warn_degenerate,
            warned: AtomicBool::new(false),
        }
    }

    /// Emits the degenerate-geometry advisory at most once per propagation.
    fn check_degenerate(&self, ecc: f64, inc_rad: f64) {
        if !self.warn_degenerate {
            return;
        }
        if (ecc <= VOP_SINGULARITY_CLAMP || inc_rad <= VOP_SINGULARITY_CLAMP)
            && !self.warned.swap(true, Ordering::Relaxed)
        {
            let title = if ecc <= VOP_SINGULARITY_CLAMP && inc_rad <= VOP_SINGULARITY_CLAMP {
                "eccentricity and inclination"
            } else if ecc <= VOP_SINGULARITY_CLAMP {
                "eccentricity"
            } else {
                "inclination"
            };
            warn!(
                "degenerate case: {title} smaller than {VOP_SINGULARITY_CLAMP}; results may be inaccurate"
            );
        }
    }
}

impl EquationsOfMotion for KeplerianVop<'_> {
    fn expected_set(&self) -> ElementSetId {
        ElementSetId::Keplerian
    }

    fn system(&self) -> &System {
        self.system
    }

    fn evaluate(&self, state: &State, vehicle: &Vehicle) -> PhysicsResult<ElementPartials> {
        let elements = state.elements.to_keplerian(self.system);
        let cartesian = state.elements.to_cartesian(self.system);
        let mu = self.system.get_mu_km3_s2();

        let sma = elements.sma_km;
        let aop = elements.aop_rad;
        let theta = elements.ta_rad;

        self.check_degenerate(elements.ecc, elements.inc_rad);
        let ecc = elements.ecc.max(VOP_SINGULARITY_CLAMP);
        let inc = elements.inc_rad.max(VOP_SINGULARITY_CLAMP);

        let h = (mu * sma * (1.0 - ecc * ecc)).sqrt();

        let r = cartesian.radius_km;
        let v = cartesian.velocity_km_s;
        let rmag = r.norm();

        // RTN decomposition of the perturbing acceleration.
        let r_hat = r.unit();
        let n_hat = r.cross(&v).unit();
        let t_hat = n_hat.cross(&r_hat);

        let accel = self
            .forces
            .compute_forces(state.epoch(), &cartesian, vehicle, self.system)?;
        let radial = accel.dot(&r_hat);
        let normal = accel.dot(&n_hat);
        let tangential = accel.dot(&t_hat);

        // Argument of latitude
        let u = aop + theta;

        let cos_ta = theta.cos();
        let sin_ta = theta.sin();
        let (sin_u, cos_u) = u.sin_cos();

        let h_sq = h * h;
        let h_over_r_sq = h / (rmag * rmag);

        let dh_dt = rmag * tangential;
        let decc_dt = h / mu * sin_ta * radial
            + 1.0 / (mu * h) * ((h_sq + mu * rmag) * cos_ta + mu * ecc * rmag) * tangential;
        let dsma_dt = 2.0 / (mu * (1.0 - ecc * ecc)) * (h * dh_dt + sma * mu * ecc * decc_dt);
        let dinc_dt = rmag / h * cos_u * normal;
        let dtheta_dt = h_over_r_sq
            + (1.0 / (ecc * h))
                * ((h_sq / mu) * cos_ta * radial - (h_sq / mu + rmag) * sin_ta * tangential);
        let draan_dt = rmag * sin_u / (h * inc.sin()) * normal;
        let daop_dt = -dtheta_dt + h_over_r_sq - draan_dt * inc.cos();

        Ok(ElementPartials::new(
            ElementSetId::Keplerian,
            Vector6::new(dsma_dt, decc_dt, dinc_dt, draan_dt, daop_dt, dtheta_dt),
        ))
    }
}
