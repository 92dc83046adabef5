//! Dimension resolvers.
//!
//! Each resolver returns the larger of a limit declared in RUNSPEC and the
//! value observed in the schedule at the lookup step, so array sizes never
//! truncate real entities.

use super::layout::FormatLayout;
use super::step::StepContext;
use crate::error::{RestartError, Result};
use crate::types::{Runspec, Schedule};

/// Well table block of INTEHEAD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WellTableDim {
    pub num_wells: i32,
    pub max_perf: i32,
    pub max_well_in_group: i32,
    pub max_group_in_field: i32,
    pub max_wells_in_field: i32,
}

/// NIGRPZ, NSGRPZ, NXGRPZ, NZGRPZ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupArrayDims {
    pub nigrpz: i32,
    pub nsgrpz: i32,
    pub nxgrpz: i32,
    pub nzgrpz: i32,
}

impl GroupArrayDims {
    pub fn as_array(&self) -> [i32; 4] {
        [self.nigrpz, self.nsgrpz, self.nxgrpz, self.nzgrpz]
    }
}

pub(crate) fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Largest connection count of any well at the lookup step.
pub fn max_connections_per_well(schedule: &Schedule, ctx: StepContext) -> Result<i32> {
    ctx.gated(|| {
        let ncwmax = schedule
            .wells(ctx.lookup_step)?
            .iter()
            .map(|w| w.connections.len())
            .max()
            .unwrap_or(0);
        Ok(to_i32(ncwmax))
    })
}

/// Largest number of wells attached directly to any group.
pub fn max_group_size(schedule: &Schedule, ctx: StepContext) -> Result<i32> {
    ctx.gated(|| {
        let state = schedule.state(ctx.lookup_step)?;
        let nwgmax = state
            .groups
            .iter()
            .map(|g| state.group_wells(&g.name).count())
            .max()
            .unwrap_or(0);
        Ok(to_i32(nwgmax))
    })
}

/// Number of non-FIELD groups.
///
/// Not gated: callers decide whether report step 0 needs it.
pub fn num_groups_in_field(schedule: &Schedule, lookup_step: usize) -> Result<i32> {
    let ngroups = schedule.num_groups(lookup_step)?;
    if ngroups < 1 {
        return Err(RestartError::invalid(
            "Simulation run must include at least FIELD group",
        ));
    }
    Ok(to_i32(ngroups - 1))
}

/// Number of wells at the lookup step; 0 at report step 0.
pub fn num_wells(schedule: &Schedule, ctx: StepContext) -> Result<i32> {
    ctx.gated(|| Ok(to_i32(schedule.num_wells(ctx.lookup_step)?)))
}

pub fn well_table_dimensions(
    nwgmax: i32,
    ngmax: i32,
    runspec: &Runspec,
    schedule: &Schedule,
    ctx: StepContext,
) -> Result<WellTableDim> {
    let wd = &runspec.well_dims;

    let num_wells = num_wells(schedule, ctx)?;
    let max_perf = wd
        .max_conn_per_well
        .max(max_connections_per_well(schedule, ctx)?);

    Ok(WellTableDim {
        num_wells,
        max_perf,
        max_well_in_group: wd.max_wells_per_group.max(nwgmax),
        max_group_in_field: wd.max_groups_in_field.max(ngmax),
        max_wells_in_field: if ctx.is_initial() {
            wd.max_wells_in_field
        } else {
            wd.max_wells_in_field.max(num_wells)
        },
    })
}

/// IGRP/SGRP/XGRP/ZGRP record lengths.
///
/// The IGRP record holds one child slot per possible child, so its length
/// grows with the larger of the well-per-group and group-count maxima.
pub fn group_array_dimensions(
    group_size: i32,
    num_groups: i32,
    runspec: &Runspec,
    layout: &FormatLayout,
) -> GroupArrayDims {
    let wd = &runspec.well_dims;

    let nwgmax = group_size.max(wd.max_wells_per_group);
    let ngmax = num_groups.max(wd.max_groups_in_field);

    GroupArrayDims {
        nigrpz: layout.nigrpz_base + nwgmax.max(ngmax),
        nsgrpz: layout.nsgrpz,
        nxgrpz: layout.nxgrpz,
        nzgrpz: layout.nzgrpz,
    }
}
