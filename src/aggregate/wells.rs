//! Well arrays: IWEL, SWEL, XWEL, ZWEL.

use super::groups::record_number;
use super::{
    blank_string, eclipse_string, ensure_stride, ih_count, is_initial, limit_or_unset,
    WindowedArray,
};
use crate::error::{RestartError, Result};
use crate::header::codes;
use crate::header::dimensions::to_i32;
use crate::header::layout::ih;
use crate::types::{
    InjectorType, Rates, Schedule, SimulationState, Well, WellResult, WellType,
};

/// IWEL item positions.
pub mod iwell {
    pub const IHEAD: usize = 0;
    pub const JHEAD: usize = 1;
    /// K of the first open connection
    pub const FIRST_K: usize = 2;
    /// K of the last open connection
    pub const LAST_K: usize = 3;
    pub const NCONN: usize = 4;
    /// One-based IGRP record of the well's group
    pub const GROUP: usize = 5;
    pub const WTYPE: usize = 6;
    pub const ACT_CTRL: usize = 7;
    pub const STATUS: usize = 10;
    pub const XFLOW: usize = 22;
    /// One-based multi-segment well id, 0 for standard wells
    pub const MSW_ID: usize = 70;
    pub const NWSEG: usize = 71;

    pub const LAST: usize = NWSEG;
}

/// SWEL item positions.
pub mod swell {
    pub const ORAT: usize = 0;
    pub const WRAT: usize = 1;
    pub const GRAT: usize = 2;
    pub const LRAT: usize = 3;
    pub const RESV: usize = 4;
    pub const THP: usize = 5;
    pub const BHP: usize = 6;
    pub const DATUM_DEPTH: usize = 9;

    pub const LAST: usize = DATUM_DEPTH;
}

/// XWEL item positions. Injection is written as negative flow.
pub mod xwell {
    pub const OIL_PR: usize = 0;
    pub const WAT_PR: usize = 1;
    pub const GAS_PR: usize = 2;
    pub const LIQ_PR: usize = 3;
    pub const VOID_PR: usize = 4;
    pub const THP: usize = 5;
    pub const BHP: usize = 6;
    pub const WAT_CUT: usize = 7;
    pub const GOR: usize = 8;
    pub const OIL_PR_TOTAL: usize = 18;
    pub const WAT_PR_TOTAL: usize = 19;
    pub const GAS_PR_TOTAL: usize = 20;
    pub const VOID_PR_TOTAL: usize = 21;
    pub const WAT_INJ_TOTAL: usize = 23;
    pub const GAS_INJ_TOTAL: usize = 24;
    pub const VOID_INJ_TOTAL: usize = 25;

    pub const LAST: usize = VOID_INJ_TOTAL;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateWellData {
    iwell: WindowedArray<i32>,
    swell: WindowedArray<f32>,
    xwell: WindowedArray<f64>,
    zwell: WindowedArray<String>,
}

impl AggregateWellData {
    /// Capture declared well data at `lookup_step`, plus dynamic results
    /// when `state` is given.
    pub fn build(
        inte_head: &[i32],
        schedule: &Schedule,
        lookup_step: usize,
        state: Option<&SimulationState>,
    ) -> Result<Self> {
        let nwells = ih_count(inte_head, ih::NWELLS, "NWELLS")?;
        let niwelz = ih_count(inte_head, ih::NIWELZ, "NIWELZ")?;
        let nswelz = ih_count(inte_head, ih::NSWELZ, "NSWELZ")?;
        let nxwelz = ih_count(inte_head, ih::NXWELZ, "NXWELZ")?;
        let nzwelz = ih_count(inte_head, ih::NZWELZ, "NZWELZ")?;

        let mut data = Self {
            iwell: WindowedArray::new(nwells, niwelz, 0),
            swell: WindowedArray::new(nwells, nswelz, 0.0),
            xwell: WindowedArray::new(nwells, nxwelz, 0.0),
            zwell: WindowedArray::new(nwells, nzwelz, blank_string()),
        };
        if is_initial(inte_head) {
            return Ok(data);
        }

        let sched_state = schedule.state(lookup_step)?;
        if sched_state.wells.len() != nwells {
            return Err(RestartError::invalid(format!(
                "INTEHEAD declares {nwells} wells, lookup step {lookup_step} has {}",
                sched_state.wells.len()
            )));
        }
        if nwells == 0 {
            return Ok(data);
        }

        ensure_stride("IWEL", niwelz, iwell::LAST)?;
        ensure_stride("SWEL", nswelz, swell::LAST)?;
        ensure_stride("XWEL", nxwelz, xwell::LAST)?;
        ensure_stride("ZWEL", nzwelz, 0)?;

        let ngmaxz = ih_count(inte_head, ih::NGMAXZ, "NGMAXZ")?;
        let mut msw_id = 0;
        for (index, well) in sched_state.wells.iter().enumerate() {
            if well.is_multi_segment() {
                msw_id += 1;
            }
            let msw = if well.is_multi_segment() { msw_id } else { 0 };

            static_iwell(
                data.iwell.window_mut(index),
                well,
                record_number(sched_state, &well.group, ngmaxz)?,
                msw,
            );
            static_swell(data.swell.window_mut(index), well);
            data.zwell.window_mut(index)[0] = eclipse_string(&well.name)?;

            if let Some(result) = state.and_then(|s| s.well(&well.name)) {
                dynamic_xwell(data.xwell.window_mut(index), well, result);
            }
        }

        Ok(data)
    }

    pub fn iwell(&self) -> &[i32] {
        self.iwell.data()
    }

    pub fn swell(&self) -> &[f32] {
        self.swell.data()
    }

    pub fn xwell(&self) -> &[f64] {
        self.xwell.data()
    }

    pub fn zwell(&self) -> &[String] {
        self.zwell.data()
    }

    pub fn num_wells(&self) -> usize {
        self.iwell.num_windows()
    }
}

fn active_control(well: &Well) -> i32 {
    match well.well_type {
        WellType::Producer => codes::producer_ctrl(well.production.cmode),
        WellType::Injector(injector) => codes::injector_ctrl(injector, well.injection.cmode),
    }
}

fn static_iwell(iwel: &mut [i32], well: &Well, group: i32, msw_id: usize) {
    let mut open = well.connections.iter().filter(|c| c.is_open());

    iwel[iwell::IHEAD] = to_i32(well.head_i);
    iwel[iwell::JHEAD] = to_i32(well.head_j);
    if let Some(first) = open.next() {
        iwel[iwell::FIRST_K] = to_i32(first.k);
        iwel[iwell::LAST_K] = to_i32(open.last().unwrap_or(first).k);
    }
    iwel[iwell::NCONN] = to_i32(well.connections.len());
    iwel[iwell::GROUP] = group;
    iwel[iwell::WTYPE] = codes::well_type(well.well_type);
    iwel[iwell::ACT_CTRL] = active_control(well);
    iwel[iwell::STATUS] = codes::well_status(well.status);
    iwel[iwell::XFLOW] = i32::from(well.allow_cross_flow);
    iwel[iwell::MSW_ID] = to_i32(msw_id);
    iwel[iwell::NWSEG] = to_i32(well.num_segments());
}

fn static_swell(swel: &mut [f32], well: &Well) {
    swel[..=swell::BHP].fill(super::UNLIMITED);

    match well.well_type {
        WellType::Producer => {
            let p = &well.production;
            swel[swell::ORAT] = limit_or_unset(p.oil_rate);
            swel[swell::WRAT] = limit_or_unset(p.water_rate);
            swel[swell::GRAT] = limit_or_unset(p.gas_rate);
            swel[swell::LRAT] = limit_or_unset(p.liquid_rate);
            swel[swell::RESV] = limit_or_unset(p.resv_rate);
            swel[swell::THP] = limit_or_unset(p.thp_limit);
            swel[swell::BHP] = limit_or_unset(p.bhp_limit);
        }
        WellType::Injector(injector) => {
            let i = &well.injection;
            let rate_slot = match injector {
                InjectorType::Oil => Some(swell::ORAT),
                InjectorType::Water => Some(swell::WRAT),
                InjectorType::Gas => Some(swell::GRAT),
                InjectorType::Multi => None,
            };
            if let Some(slot) = rate_slot {
                swel[slot] = limit_or_unset(i.surface_rate);
            }
            swel[swell::RESV] = limit_or_unset(i.resv_rate);
            swel[swell::THP] = limit_or_unset(i.thp_limit);
            swel[swell::BHP] = limit_or_unset(i.bhp_limit);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    {
        swel[swell::DATUM_DEPTH] = well.ref_depth as f32;
    }
}

fn write_rates(xwel: &mut [f64], rates: &Rates, sign: f64) {
    xwel[xwell::OIL_PR] = sign * rates.oil;
    xwel[xwell::WAT_PR] = sign * rates.water;
    xwel[xwell::GAS_PR] = sign * rates.gas;
    xwel[xwell::LIQ_PR] = sign * rates.liquid();
    xwel[xwell::VOID_PR] = sign * rates.reservoir;
}

fn dynamic_xwell(xwel: &mut [f64], well: &Well, result: &WellResult) {
    if well.well_type.is_producer() {
        write_rates(xwel, &result.production, 1.0);
        xwel[xwell::WAT_CUT] = result.production.water_cut();
        xwel[xwell::GOR] = result.production.gas_oil_ratio();
    } else {
        write_rates(xwel, &result.injection, -1.0);
    }

    xwel[xwell::BHP] = result.bhp;
    xwel[xwell::THP] = result.thp;

    let prod = &result.production_total;
    xwel[xwell::OIL_PR_TOTAL] = prod.oil;
    xwel[xwell::WAT_PR_TOTAL] = prod.water;
    xwel[xwell::GAS_PR_TOTAL] = prod.gas;
    xwel[xwell::VOID_PR_TOTAL] = prod.reservoir;

    let inj = &result.injection_total;
    xwel[xwell::WAT_INJ_TOTAL] = inj.water;
    xwel[xwell::GAS_INJ_TOTAL] = inj.gas;
    xwel[xwell::VOID_INJ_TOTAL] = inj.reservoir;
}
