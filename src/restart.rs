//! Restart step encoder
//!
//! Composes the three headers and every aggregate family for one
//! `(report_step, lookup_step)` pair. INTEHEAD is assembled first; the
//! aggregate builders read their record counts and strides back from it.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{
    AggregateConnectionData, AggregateGroupData, AggregateMswData, AggregateWellData,
};
use crate::config::EncoderConfig;
use crate::error::Result;
use crate::header::{create_doub_head, create_inte_head, create_logi_head, StepContext};
use crate::types::{EclipseCase, Schedule, SimulationState};

// ============================================================================
// Request
// ============================================================================

/// One restart step to encode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RestartRequest {
    pub report_step: usize,
    pub lookup_step: usize,
    /// Elapsed seconds; defaults to the schedule date of `report_step`
    #[serde(default)]
    pub sim_time: Option<f64>,
    #[serde(default)]
    pub num_solver_steps: i32,
    /// Seconds to the next report; defaults to the gap to the next schedule date
    #[serde(default)]
    pub next_time_step: Option<f64>,
}

impl RestartRequest {
    pub fn new(report_step: usize, lookup_step: usize) -> Self {
        Self {
            report_step,
            lookup_step,
            sim_time: None,
            num_solver_steps: 0,
            next_time_step: None,
        }
    }

    /// Report step N written with the schedule state of lookup step N-1.
    pub fn for_report_step(report_step: usize) -> Self {
        let ctx = StepContext::for_report_step(report_step);
        Self::new(ctx.report_step, ctx.lookup_step)
    }

    pub fn with_sim_time(mut self, seconds: f64) -> Self {
        self.sim_time = Some(seconds);
        self
    }

    pub fn with_solver_steps(mut self, steps: i32) -> Self {
        self.num_solver_steps = steps;
        self
    }

    pub fn context(&self) -> StepContext {
        StepContext::new(self.report_step, self.lookup_step)
    }

    fn resolve_sim_time(&self, schedule: &Schedule) -> Result<f64> {
        match self.sim_time {
            Some(t) => Ok(t),
            None => schedule.seconds_elapsed(self.report_step),
        }
    }

    fn resolve_next_time_step(&self, schedule: &Schedule, sim_time: f64) -> f64 {
        if let Some(dt) = self.next_time_step {
            return dt;
        }
        schedule
            .seconds_elapsed(self.report_step + 1)
            .map_or(0.0, |next| (next - sim_time).max(0.0))
    }
}

// ============================================================================
// Encoded Arrays
// ============================================================================

/// Every array written for one restart step, keyed by its record name.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RestartArrays {
    pub report_step: usize,
    pub lookup_step: usize,
    pub intehead: Vec<i32>,
    pub logihead: Vec<bool>,
    pub doubhead: Vec<f64>,
    pub iwel: Vec<i32>,
    pub swel: Vec<f32>,
    pub xwel: Vec<f64>,
    pub zwel: Vec<String>,
    pub igrp: Vec<i32>,
    pub sgrp: Vec<f32>,
    pub xgrp: Vec<f64>,
    pub zgrp: Vec<String>,
    pub icon: Vec<i32>,
    pub scon: Vec<f32>,
    pub xcon: Vec<f64>,
    pub iseg: Vec<i32>,
    pub rseg: Vec<f64>,
    pub ilbs: Vec<i32>,
    pub ilbr: Vec<i32>,
}

impl RestartArrays {
    /// Array names in the order they are written.
    pub const NAMES: [&'static str; 18] = [
        "INTEHEAD", "LOGIHEAD", "DOUBHEAD", "IWEL", "SWEL", "XWEL", "ZWEL", "IGRP", "SGRP",
        "XGRP", "ZGRP", "ICON", "SCON", "XCON", "ISEG", "RSEG", "ILBS", "ILBR",
    ];

    /// Case-insensitive match against [`Self::NAMES`].
    pub fn is_known_array(name: &str) -> bool {
        Self::NAMES.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode headers and aggregates for a single restart step.
pub fn encode_restart_step(
    case: &EclipseCase,
    schedule: &Schedule,
    state: Option<&SimulationState>,
    request: &RestartRequest,
    config: &EncoderConfig,
) -> Result<RestartArrays> {
    let _span = tracing::debug_span!(
        "encode_restart_step",
        report_step = request.report_step,
        lookup_step = request.lookup_step,
    )
    .entered();

    let layout = config.layout();
    let ctx = request.context();
    let lookup_step = request.lookup_step;
    let sim_time = request.resolve_sim_time(schedule)?;
    let next_time_step = request.resolve_next_time_step(schedule, sim_time);

    let inte_head = create_inte_head(
        case,
        schedule,
        sim_time,
        request.num_solver_steps,
        ctx,
        &layout,
    )?;
    let intehead = inte_head.to_array(&layout);

    let logihead = create_logi_head(&case.runspec).to_array(&layout);

    let tuning = &schedule.state(lookup_step)?.tuning;
    let doubhead = create_doub_head(
        &case.runspec,
        tuning,
        schedule.start,
        sim_time,
        next_time_step,
    )
    .to_array(&layout);

    let state = if config.aggregates.dynamic_results {
        state
    } else {
        None
    };

    let mut arrays = RestartArrays {
        report_step: request.report_step,
        lookup_step,
        intehead,
        logihead,
        doubhead,
        ..RestartArrays::default()
    };

    if config.aggregates.wells {
        let wells = AggregateWellData::build(&arrays.intehead, schedule, lookup_step, state)?;
        arrays.iwel = wells.iwell().to_vec();
        arrays.swel = wells.swell().to_vec();
        arrays.xwel = wells.xwell().to_vec();
        arrays.zwel = wells.zwell().to_vec();
    }

    if config.aggregates.groups {
        let groups = AggregateGroupData::build(&arrays.intehead, schedule, lookup_step, state)?;
        arrays.igrp = groups.igroup().to_vec();
        arrays.sgrp = groups.sgroup().to_vec();
        arrays.xgrp = groups.xgroup().to_vec();
        arrays.zgrp = groups.zgroup().to_vec();
    }

    if config.aggregates.connections {
        let conns = AggregateConnectionData::build(&arrays.intehead, schedule, lookup_step, state)?;
        arrays.icon = conns.icon().to_vec();
        arrays.scon = conns.scon().to_vec();
        arrays.xcon = conns.xcon().to_vec();
    }

    if config.aggregates.segments {
        let msw = AggregateMswData::build(&arrays.intehead, schedule, lookup_step)?;
        arrays.iseg = msw.iseg().to_vec();
        arrays.rseg = msw.rseg().to_vec();
        arrays.ilbs = msw.ilbs().to_vec();
        arrays.ilbr = msw.ilbr().to_vec();
    }

    debug!(
        wells = inte_head.well_table.num_wells,
        groups = inte_head.num_groups,
        iwel = arrays.iwel.len(),
        igrp = arrays.igrp.len(),
        icon = arrays.icon.len(),
        iseg = arrays.iseg.len(),
        "Encoded restart step"
    );

    Ok(arrays)
}

/// Encode several restart steps over the same case and schedule.
///
/// Results come back in request order. The first failing step aborts the
/// series.
pub fn encode_series(
    case: &EclipseCase,
    schedule: &Schedule,
    steps: &[(RestartRequest, Option<&SimulationState>)],
    config: &EncoderConfig,
) -> Result<Vec<RestartArrays>> {
    debug!(steps = steps.len(), parallel = config.series.parallel, "Encoding restart series");

    let encode =
        |(request, state): &(RestartRequest, Option<&SimulationState>)| {
            encode_restart_step(case, schedule, *state, request, config)
        };

    if config.series.parallel {
        steps.par_iter().map(encode).collect()
    } else {
        steps.iter().map(encode).collect()
    }
}
