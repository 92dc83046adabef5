//! Group arrays: IGRP, SGRP, XGRP, ZGRP.
//!
//! FIELD is always written to the last record (NGMAXZ - 1). Every other
//! group occupies record `index - 1`, `index` being its position in the
//! schedule's group list (FIELD first).
//!
//! IGRP starts with one slot per possible child, `max(NWGMAX, NGMAXZ - 1)`
//! slots in total, followed by the fixed items in [`igrp`] relative to that
//! offset.

use super::{blank_string, eclipse_string, ensure_stride, ih_count, is_initial, limit_or_unset};
use super::{WindowedArray, UNLIMITED};
use crate::error::{RestartError, Result};
use crate::header::codes;
use crate::header::dimensions::to_i32;
use crate::header::layout::ih;
use crate::types::{
    Group, InjectionPhase, Rates, Schedule, ScheduleState, SimulationState, FIELD_GROUP,
};

/// IGRP items, relative to the end of the children list.
pub mod igrp {
    pub const NCHILD: usize = 0;
    pub const PROD_CTRL: usize = 1;
    pub const WINJ_CTRL: usize = 17;
    pub const GINJ_CTRL: usize = 22;
    /// 0 well group, 1 node group
    pub const GROUP_TYPE: usize = 26;
    pub const LEVEL: usize = 27;
    /// One-based parent record, 0 for FIELD
    pub const PARENT: usize = 28;

    pub const LAST: usize = PARENT;
}

/// SGRP item positions.
pub mod sgrp {
    pub const OIL_TARGET: usize = 6;
    pub const WAT_TARGET: usize = 7;
    pub const GAS_TARGET: usize = 8;
    pub const LIQ_TARGET: usize = 9;
    pub const RESV_TARGET: usize = 10;
    pub const WINJ_SURF: usize = 15;
    pub const WINJ_RESV: usize = 16;
    pub const GINJ_SURF: usize = 20;
    pub const GINJ_RESV: usize = 21;

    pub const LAST: usize = GINJ_RESV;
}

/// XGRP item positions.
pub mod xgrp {
    pub const OIL_PR: usize = 0;
    pub const WAT_PR: usize = 1;
    pub const GAS_PR: usize = 2;
    pub const LIQ_PR: usize = 3;
    pub const VOID_PR: usize = 4;
    pub const WAT_INJ: usize = 5;
    pub const GAS_INJ: usize = 6;
    pub const OIL_PR_TOTAL: usize = 10;
    pub const WAT_PR_TOTAL: usize = 11;
    pub const GAS_PR_TOTAL: usize = 12;
    pub const VOID_PR_TOTAL: usize = 13;
    pub const WAT_INJ_TOTAL: usize = 14;
    pub const GAS_INJ_TOTAL: usize = 15;
    pub const VOID_INJ_TOTAL: usize = 16;

    pub const LAST: usize = VOID_INJ_TOTAL;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateGroupData {
    igroup: WindowedArray<i32>,
    sgroup: WindowedArray<f32>,
    xgroup: WindowedArray<f64>,
    zgroup: WindowedArray<String>,
}

impl AggregateGroupData {
    pub fn build(
        inte_head: &[i32],
        schedule: &Schedule,
        lookup_step: usize,
        state: Option<&SimulationState>,
    ) -> Result<Self> {
        let initial = is_initial(inte_head);
        let ngmaxz = if initial {
            0
        } else {
            ih_count(inte_head, ih::NGMAXZ, "NGMAXZ")?
        };
        let nigrpz = ih_count(inte_head, ih::NIGRPZ, "NIGRPZ")?;
        let nsgrpz = ih_count(inte_head, ih::NSGRPZ, "NSGRPZ")?;
        let nxgrpz = ih_count(inte_head, ih::NXGRPZ, "NXGRPZ")?;
        let nzgrpz = ih_count(inte_head, ih::NZGRPZ, "NZGRPZ")?;

        let mut data = Self {
            igroup: WindowedArray::new(ngmaxz, nigrpz, 0),
            sgroup: WindowedArray::new(ngmaxz, nsgrpz, 0.0),
            xgroup: WindowedArray::new(ngmaxz, nxgrpz, 0.0),
            zgroup: WindowedArray::new(ngmaxz, nzgrpz, blank_string()),
        };
        if initial {
            return Ok(data);
        }

        let sched_state = schedule.state(lookup_step)?;
        if sched_state.groups.len() > ngmaxz {
            return Err(RestartError::invalid(format!(
                "{} groups at lookup step {lookup_step} exceed NGMAXZ = {ngmaxz}",
                sched_state.groups.len()
            )));
        }
        if sched_state.groups.first().map_or(true, |g| !g.is_field()) {
            return Err(RestartError::invalid(
                "Simulation run must include at least FIELD group",
            ));
        }

        let nwgmax = ih_count(inte_head, ih::NWGMAX, "NWGMAX")?;
        let child_slots = nwgmax.max(ngmaxz.saturating_sub(1));
        ensure_stride("IGRP", nigrpz, child_slots + igrp::LAST)?;
        ensure_stride("SGRP", nsgrpz, sgrp::LAST)?;
        ensure_stride("XGRP", nxgrpz, xgrp::LAST)?;
        ensure_stride("ZGRP", nzgrpz, 0)?;

        for (index, group) in sched_state.groups.iter().enumerate() {
            let record = record_index(index, group, ngmaxz);

            static_igroup(
                data.igroup.window_mut(record),
                sched_state,
                group,
                child_slots,
                ngmaxz,
            )?;
            static_sgroup(data.sgroup.window_mut(record), group);
            data.zgroup.window_mut(record)[0] = eclipse_string(&group.name)?;

            if let Some(results) = state {
                dynamic_xgroup(data.xgroup.window_mut(record), sched_state, group, results);
            }
        }

        Ok(data)
    }

    pub fn igroup(&self) -> &[i32] {
        self.igroup.data()
    }

    pub fn sgroup(&self) -> &[f32] {
        self.sgroup.data()
    }

    pub fn xgroup(&self) -> &[f64] {
        self.xgroup.data()
    }

    pub fn zgroup(&self) -> &[String] {
        self.zgroup.data()
    }

    pub fn num_records(&self) -> usize {
        self.igroup.num_windows()
    }
}

fn record_index(index: usize, group: &Group, ngmaxz: usize) -> usize {
    if group.is_field() {
        ngmaxz - 1
    } else {
        index - 1
    }
}

/// One-based record number of a group, as stored in IGRP and IWEL.
pub(crate) fn record_number(state: &ScheduleState, name: &str, ngmaxz: usize) -> Result<i32> {
    if name == FIELD_GROUP {
        return Ok(to_i32(ngmaxz));
    }
    state
        .group_index(name)
        .map(to_i32)
        .ok_or_else(|| RestartError::invalid(format!("unknown group '{name}'")))
}

fn static_igroup(
    igrp_rec: &mut [i32],
    state: &ScheduleState,
    group: &Group,
    child_slots: usize,
    ngmaxz: usize,
) -> Result<()> {
    let wells: Vec<i32> = state
        .wells
        .iter()
        .enumerate()
        .filter(|(_, w)| w.group == group.name)
        .map(|(i, _)| to_i32(i + 1))
        .collect();

    let (children, group_type) = if wells.is_empty() {
        let groups = state
            .child_groups(&group.name)
            .map(|g| record_number(state, &g.name, ngmaxz))
            .collect::<Result<Vec<_>>>()?;
        let group_type = i32::from(!groups.is_empty());
        (groups, group_type)
    } else {
        (wells, 0)
    };

    if children.len() > child_slots {
        return Err(RestartError::invalid(format!(
            "group '{}' has {} children, IGRP holds {child_slots}",
            group.name,
            children.len()
        )));
    }
    igrp_rec[..children.len()].copy_from_slice(&children);

    let items = &mut igrp_rec[child_slots..];
    items[igrp::NCHILD] = to_i32(children.len());
    items[igrp::PROD_CTRL] = group
        .production
        .as_ref()
        .map_or(0, |p| codes::group_production_ctrl(p.cmode));
    items[igrp::WINJ_CTRL] = group
        .injection_for(InjectionPhase::Water)
        .map_or(0, |i| codes::group_injection_ctrl(i.cmode));
    items[igrp::GINJ_CTRL] = group
        .injection_for(InjectionPhase::Gas)
        .map_or(0, |i| codes::group_injection_ctrl(i.cmode));
    items[igrp::GROUP_TYPE] = group_type;
    items[igrp::LEVEL] = to_i32(state.group_level(&group.name));
    items[igrp::PARENT] = match group.parent.as_deref() {
        Some(parent) => record_number(state, parent, ngmaxz)?,
        None => 0,
    };

    Ok(())
}

fn static_sgroup(sgrp_rec: &mut [f32], group: &Group) {
    for slot in [
        sgrp::OIL_TARGET,
        sgrp::WAT_TARGET,
        sgrp::GAS_TARGET,
        sgrp::LIQ_TARGET,
        sgrp::RESV_TARGET,
        sgrp::WINJ_SURF,
        sgrp::WINJ_RESV,
        sgrp::GINJ_SURF,
        sgrp::GINJ_RESV,
    ] {
        sgrp_rec[slot] = UNLIMITED;
    }

    if let Some(p) = &group.production {
        sgrp_rec[sgrp::OIL_TARGET] = limit_or_unset(p.oil_target);
        sgrp_rec[sgrp::WAT_TARGET] = limit_or_unset(p.water_target);
        sgrp_rec[sgrp::GAS_TARGET] = limit_or_unset(p.gas_target);
        sgrp_rec[sgrp::LIQ_TARGET] = limit_or_unset(p.liquid_target);
        sgrp_rec[sgrp::RESV_TARGET] = limit_or_unset(p.resv_target);
    }
    if let Some(i) = group.injection_for(InjectionPhase::Water) {
        sgrp_rec[sgrp::WINJ_SURF] = limit_or_unset(i.surface_target);
        sgrp_rec[sgrp::WINJ_RESV] = limit_or_unset(i.resv_target);
    }
    if let Some(i) = group.injection_for(InjectionPhase::Gas) {
        sgrp_rec[sgrp::GINJ_SURF] = limit_or_unset(i.surface_target);
        sgrp_rec[sgrp::GINJ_RESV] = limit_or_unset(i.resv_target);
    }
}

/// True when `group` is `well_group` or one of its ancestors.
fn is_below(state: &ScheduleState, well_group: &str, group: &str) -> bool {
    let mut current = Some(well_group);
    for _ in 0..=state.groups.len() {
        match current {
            Some(name) if name == group => return true,
            Some(name) => current = state.group(name).and_then(|g| g.parent.as_deref()),
            None => return false,
        }
    }
    false
}

fn dynamic_xgroup(
    xgrp_rec: &mut [f64],
    state: &ScheduleState,
    group: &Group,
    results: &SimulationState,
) {
    let mut production = Rates::default();
    let mut injection = Rates::default();
    let mut production_total = Rates::default();
    let mut injection_total = Rates::default();

    for well in state.wells.iter().filter(|w| is_below(state, &w.group, &group.name)) {
        if let Some(r) = results.well(&well.name) {
            production.accumulate(&r.production);
            injection.accumulate(&r.injection);
            production_total.accumulate(&r.production_total);
            injection_total.accumulate(&r.injection_total);
        }
    }

    xgrp_rec[xgrp::OIL_PR] = production.oil;
    xgrp_rec[xgrp::WAT_PR] = production.water;
    xgrp_rec[xgrp::GAS_PR] = production.gas;
    xgrp_rec[xgrp::LIQ_PR] = production.liquid();
    xgrp_rec[xgrp::VOID_PR] = production.reservoir;
    xgrp_rec[xgrp::WAT_INJ] = injection.water;
    xgrp_rec[xgrp::GAS_INJ] = injection.gas;

    xgrp_rec[xgrp::OIL_PR_TOTAL] = production_total.oil;
    xgrp_rec[xgrp::WAT_PR_TOTAL] = production_total.water;
    xgrp_rec[xgrp::GAS_PR_TOTAL] = production_total.gas;
    xgrp_rec[xgrp::VOID_PR_TOTAL] = production_total.reservoir;
    xgrp_rec[xgrp::WAT_INJ_TOTAL] = injection_total.water;
    xgrp_rec[xgrp::GAS_INJ_TOTAL] = injection_total.gas;
    xgrp_rec[xgrp::VOID_INJ_TOTAL] = injection_total.reservoir;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{create_inte_head, FormatLayout, StepContext};
    use crate::types::{
        EclipseCase, EclipseGrid, GroupProductionCMode, GroupProductionControls, Runspec,
        ScheduleBuilder, Well, WellResult,
    };
    use chrono::{NaiveDate, NaiveDateTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid test date")
    }

    /// FIELD -> PLAT -> {G1: P1, P2; G2: P3}
    fn schedule() -> Schedule {
        ScheduleBuilder::new(date(2000, 1, 1))
            .dates(date(2000, 2, 1), |s| {
                s.add_group("PLAT", FIELD_GROUP);
                s.add_group("G1", "PLAT");
                s.add_group("G2", "PLAT");
                s.add_well(Well::producer("P1", "G1", 1, 1));
                s.add_well(Well::producer("P2", "G1", 2, 1));
                s.add_well(Well::producer("P3", "G2", 3, 1));
                if let Some(g) = s.group_mut("G1") {
                    g.production = Some(GroupProductionControls {
                        cmode: GroupProductionCMode::Orat,
                        oil_target: Some(1500.0),
                        ..GroupProductionControls::default()
                    });
                }
            })
            .build()
    }

    fn inte_head(schedule: &Schedule, report_step: usize) -> Vec<i32> {
        let case = EclipseCase {
            runspec: Runspec::default(),
            grid: EclipseGrid::new(5, 5, 5),
        };
        let layout = FormatLayout::default();
        create_inte_head(&case, schedule, 0.0, 0, StepContext::new(report_step, 1), &layout)
            .unwrap()
            .to_array(&layout)
    }

    #[test]
    fn test_record_layout() {
        let schedule = schedule();
        let ih = inte_head(&schedule, 1);
        assert_eq!(ih[ih::NGMAXZ], 4);
        assert_eq!(ih[ih::NIGRPZ], 100);

        let groups = AggregateGroupData::build(&ih, &schedule, 1, None).unwrap();
        assert_eq!(groups.num_records(), 4);
        assert_eq!(groups.igroup().len(), 4 * 100);
        assert_eq!(groups.sgroup().len(), 4 * 112);
        assert_eq!(groups.xgroup().len(), 4 * 180);
        assert_eq!(groups.zgroup().len(), 4 * 5);

        let names: Vec<&str> = groups.zgroup().iter().step_by(5).map(|s| s.trim_end()).collect();
        assert_eq!(names, ["PLAT", "G1", "G2", "FIELD"]);
    }

    #[test]
    fn test_igroup_children_and_parents() {
        let schedule = schedule();
        let ih = inte_head(&schedule, 1);
        let groups = AggregateGroupData::build(&ih, &schedule, 1, None).unwrap();
        let offset = 3;

        let g1 = &groups.igroup()[100..200];
        assert_eq!(&g1[..offset], &[1, 2, 0]);
        assert_eq!(g1[offset + igrp::NCHILD], 2);
        assert_eq!(g1[offset + igrp::PROD_CTRL], 1);
        assert_eq!(g1[offset + igrp::GROUP_TYPE], 0);
        assert_eq!(g1[offset + igrp::LEVEL], 2);
        assert_eq!(g1[offset + igrp::PARENT], 1, "PLAT is record 1");

        let plat = &groups.igroup()[..100];
        assert_eq!(&plat[..offset], &[2, 3, 0]);
        assert_eq!(plat[offset + igrp::GROUP_TYPE], 1);
        assert_eq!(plat[offset + igrp::PARENT], 4, "FIELD is the last record");

        let field = &groups.igroup()[300..];
        assert_eq!(field[0], 1);
        assert_eq!(field[offset + igrp::NCHILD], 1);
        assert_eq!(field[offset + igrp::LEVEL], 0);
        assert_eq!(field[offset + igrp::PARENT], 0);
    }

    #[test]
    fn test_sgroup_limits() {
        let schedule = schedule();
        let groups = AggregateGroupData::build(&inte_head(&schedule, 1), &schedule, 1, None).unwrap();
        let g1 = &groups.sgroup()[112..224];
        assert!((g1[sgrp::OIL_TARGET] - 1500.0).abs() < 1e-3);
        assert!((g1[sgrp::GAS_TARGET] - UNLIMITED).abs() < 1.0);
    }

    #[test]
    fn test_xgroup_sums_descendant_wells() {
        let schedule = schedule();
        let mut state = SimulationState::default();
        for (name, oil) in [("P1", 10.0), ("P2", 20.0), ("P3", 40.0)] {
            state.wells.insert(
                name.to_string(),
                WellResult {
                    production: Rates { oil, ..Rates::default() },
                    ..WellResult::default()
                },
            );
        }

        let groups =
            AggregateGroupData::build(&inte_head(&schedule, 1), &schedule, 1, Some(&state)).unwrap();
        let oil = |record: usize| groups.xgroup()[record * 180 + xgrp::OIL_PR];
        assert!((oil(0) - 70.0).abs() < 1e-12, "PLAT");
        assert!((oil(1) - 30.0).abs() < 1e-12, "G1");
        assert!((oil(2) - 40.0).abs() < 1e-12, "G2");
        assert!((oil(3) - 70.0).abs() < 1e-12, "FIELD");
    }

    #[test]
    fn test_initial_step_is_empty() {
        let schedule = schedule();
        let groups = AggregateGroupData::build(&inte_head(&schedule, 0), &schedule, 1, None).unwrap();
        assert_eq!(groups.num_records(), 0);
        assert!(groups.igroup().is_empty());
    }
}
