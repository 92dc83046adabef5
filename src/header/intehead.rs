//! INTEHEAD: the integer header.
//!
//! [`create_inte_head`] resolves every dimension and builds every field
//! record into a typed [`InteHead`]; [`InteHead::to_array`] is the only place
//! the record meets the positional layout.

use tracing::debug;

use super::calendar::{simulation_time_point, TimePoint};
use super::dimensions::{
    group_array_dimensions, max_group_size, num_groups_in_field, to_i32, well_table_dimensions,
    GroupArrayDims, WellTableDim,
};
use super::fields::{
    action_params, active_phases, group_control_index, guide_rate_nominated_phase, region_dims,
    tuning_params, udq_params, well_segment_dims, whistctl_mode, ActionParam,
    GuideRateNominatedPhase, Phases, RegDims, StepParam, TuningPar, UdqParam, WellSegDims,
};
use super::layout::{ih, FormatLayout};
use super::step::StepContext;
use crate::error::Result;
use crate::types::{EclipseCase, Schedule};

/// Typed INTEHEAD contents for one report step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteHead {
    pub unit: i32,
    pub nxyz: [i32; 3],
    pub num_active: i32,
    pub phases: Phases,
    pub well_table: WellTableDim,
    /// Non-FIELD groups (NGRP)
    pub num_groups: i32,
    pub group_dims: GroupArrayDims,
    pub group_control: i32,
    pub nominated_phase: GuideRateNominatedPhase,
    pub time: TimePoint,
    pub step: StepParam,
    pub whistctl_mode: i32,
    pub tuning: TuningPar,
    pub regions: RegDims,
    pub actions: ActionParam,
    pub segments: WellSegDims,
    pub udq: UdqParam,
}

impl InteHead {
    /// Flatten into the positional INTEHEAD of `layout`. Unnamed slots are 0.
    pub fn to_array(&self, layout: &FormatLayout) -> Vec<i32> {
        let mut v = vec![0; layout.intehead_len];

        v[ih::VERSION] = layout.version_marker;
        v[ih::UNIT] = self.unit;
        v[ih::NX] = self.nxyz[0];
        v[ih::NY] = self.nxyz[1];
        v[ih::NZ] = self.nxyz[2];
        v[ih::NACTIV] = self.num_active;
        v[ih::PHASE] = self.phases.indicator();

        // Well table
        let wt = &self.well_table;
        v[ih::NWELLS] = wt.num_wells;
        v[ih::NCWMAX] = wt.max_perf;
        v[ih::NGRP] = self.num_groups;
        v[ih::NWGMAX] = wt.max_well_in_group;
        v[ih::NGMAXZ] = wt.max_group_in_field + 1;
        v[ih::NWMAXZ] = wt.max_wells_in_field;

        // Per-entity strides
        let [niwelz, nswelz, nxwelz, nzwelz] = layout.nwelz;
        v[ih::NIWELZ] = niwelz;
        v[ih::NSWELZ] = nswelz;
        v[ih::NXWELZ] = nxwelz;
        v[ih::NZWELZ] = nzwelz;

        let [niconz, nsconz, nxconz] = layout.nconz;
        v[ih::NICONZ] = niconz;
        v[ih::NSCONZ] = nsconz;
        v[ih::NXCONZ] = nxconz;

        v[ih::NIGRPZ] = self.group_dims.nigrpz;
        v[ih::NSGRPZ] = self.group_dims.nsgrpz;
        v[ih::NXGRPZ] = self.group_dims.nxgrpz;
        v[ih::NZGRPZ] = self.group_dims.nzgrpz;

        let aquifer_slots = [
            ih::NCAMAX,
            ih::NIAAQZ,
            ih::NSAAQZ,
            ih::NXAAQZ,
            ih::NICAQZ,
            ih::NSCAQZ,
            ih::NACAQZ,
        ];
        for (slot, value) in aquifer_slots.into_iter().zip(layout.naaqz) {
            v[slot] = value;
        }

        v[ih::NGCTRL] = self.group_control;
        v[ih::NGRNPH] = self.nominated_phase.nominated_phase;

        // Calendar
        v[ih::DAY] = self.time.day;
        v[ih::MONTH] = self.time.month;
        v[ih::YEAR] = self.time.year;
        v[ih::IHOURZ] = self.time.hour;
        v[ih::IMINTS] = self.time.minute;
        v[ih::ISECND] = self.time.isecnd();

        v[ih::NUM_SOLVER_STEPS] = self.step.num_solver_steps;
        v[ih::REPORT_STEP] = self.step.report_step;
        v[ih::WHISTC] = self.whistctl_mode;

        v[ih::NEWTMX] = self.tuning.newtmx;
        v[ih::NEWTMN] = self.tuning.newtmn;
        v[ih::LITMAX] = self.tuning.litmax;
        v[ih::LITMIN] = self.tuning.litmin;
        v[ih::MXWSIT] = self.tuning.mxwsit;
        v[ih::MXWPIT] = self.tuning.mxwpit;

        v[ih::NTFIP] = self.regions.ntfip;
        v[ih::NMFIPR] = self.regions.nmfipr;
        v[ih::NRFREG] = self.regions.nrfreg;
        v[ih::NTFREG] = self.regions.ntfreg;
        v[ih::NPLMIX] = self.regions.nplmix;

        v[ih::IPROG] = layout.program_id;

        // ACTIONX
        v[ih::NOOFACTIONS] = self.actions.num_actions;
        v[ih::MAXNOLINES] = self.actions.max_lines_per_action;
        v[ih::MAXNOSTRPRLINE] = self.actions.max_words_per_line();
        v[ih::MAXCONDPRACT] = self.actions.max_conditions_per_action;
        for &(slot, value) in layout.udq_actionx_constants {
            v[slot] = value;
        }

        // Multi-segment wells
        v[ih::NSEGWL] = self.segments.nsegwl;
        v[ih::NSWLMX] = self.segments.nswlmx;
        v[ih::NSEGMX] = self.segments.nsegmx;
        v[ih::NLBRMX] = self.segments.nlbrmx;
        v[ih::NISEGZ] = self.segments.nisegz;
        v[ih::NRSEGZ] = self.segments.nrsegz;
        v[ih::NILBRZ] = self.segments.nilbrz;

        // UDQ
        v[ih::NO_WELL_UDQS] = self.udq.num_well_udqs;
        v[ih::NO_GROUP_UDQS] = self.udq.num_group_udqs;
        v[ih::NO_FIELD_UDQS] = self.udq.num_field_udqs;
        v[ih::UDQPAR_1] = self.udq.random_seed;
        v[ih::NO_IUADS] = self.udq.num_iuads;
        v[ih::NO_IUAPS] = self.udq.num_iuaps;

        v
    }
}

/// Build the INTEHEAD record for `(report_step, lookup_step)`.
///
/// `sim_time` is the elapsed time in seconds since simulation start at which
/// the restart is written.
pub fn create_inte_head(
    case: &EclipseCase,
    schedule: &Schedule,
    sim_time: f64,
    num_solver_steps: i32,
    ctx: StepContext,
    layout: &FormatLayout,
) -> Result<InteHead> {
    let runspec = &case.runspec;
    let grid = &case.grid;
    let state = schedule.state(ctx.lookup_step)?;

    let nwgmax = max_group_size(schedule, ctx)?;
    let ngmax = ctx.gated(|| num_groups_in_field(schedule, ctx.lookup_step))?;

    let [nx, ny, nz] = grid.nxyz();
    let head = InteHead {
        unit: runspec.unit_system.ecl_code(),
        nxyz: [to_i32(nx), to_i32(ny), to_i32(nz)],
        num_active: to_i32(grid.num_active()),
        phases: active_phases(runspec),
        well_table: well_table_dimensions(nwgmax, ngmax, runspec, schedule, ctx)?,
        num_groups: ngmax,
        group_dims: group_array_dimensions(nwgmax, ngmax, runspec, layout),
        group_control: group_control_index(schedule, ctx)?,
        nominated_phase: guide_rate_nominated_phase(schedule, ctx)?,
        time: simulation_time_point(schedule.start, sim_time)?,
        step: StepParam {
            num_solver_steps,
            report_step: to_i32(ctx.report_step),
        },
        whistctl_mode: whistctl_mode(schedule, ctx)?,
        tuning: tuning_params(&state.tuning),
        regions: region_dims(runspec),
        actions: action_params(runspec, &state.actions, ctx),
        segments: well_segment_dims(runspec, schedule, ctx, layout)?,
        udq: udq_params(runspec, schedule, ctx)?,
    };

    debug!(
        report_step = ctx.report_step,
        lookup_step = ctx.lookup_step,
        nwells = head.well_table.num_wells,
        ngroups = head.num_groups,
        ncwmax = head.well_table.max_perf,
        "INTEHEAD assembled"
    );

    Ok(head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Connection, EclipseGrid, GuideRateModel, GuideRateTarget, PhaseSet, Runspec,
        ScheduleBuilder, Segment, SegmentSet, UdqInput, Well,
    };
    use chrono::{NaiveDate, NaiveDateTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid test date")
    }

    fn case() -> EclipseCase {
        EclipseCase {
            runspec: Runspec {
                phases: PhaseSet::three_phase(),
                ..Runspec::default()
            },
            grid: EclipseGrid::new(10, 5, 3),
        }
    }

    fn schedule() -> Schedule {
        ScheduleBuilder::new(date(2000, 1, 1))
            .dates(date(2000, 1, 11), |s| {
                let mut w = Well::producer("P1", "G1", 1, 1);
                w.add_connection(Connection::new(1, 1, 1));
                w.add_connection(Connection::new(1, 1, 2));
                s.add_well(w);
                s.udq.input.push(UdqInput::new("WUBHP"));
                s.guide_rate.model = Some(GuideRateModel {
                    target: GuideRateTarget::Gas,
                    allow_increase: false,
                });
            })
            .build()
    }

    #[test]
    fn test_array_length_and_fixed_markers() {
        let layout = FormatLayout::default();
        let head = create_inte_head(&case(), &schedule(), 0.0, 0, StepContext::new(0, 0), &layout)
            .unwrap();
        let v = head.to_array(&layout);

        assert_eq!(v.len(), 411);
        assert_eq!(v[ih::VERSION], 201_802);
        assert_eq!(v[ih::IPROG], 100);
        assert_eq!(&v[ih::NIWELZ..=ih::NZWELZ], &[155, 122, 130, 3]);
        assert_eq!(&v[ih::NICONZ..=ih::NXCONZ], &[25, 41, 58]);
        assert_eq!(&v[ih::NCAMAX..=ih::NACAQZ], &[1, 18, 24, 10, 7, 2, 4]);
        assert_eq!(v[159], 4);
        assert_eq!(v[248], 13);
    }

    #[test]
    fn test_initial_step_has_no_entities() {
        let layout = FormatLayout::default();
        let head = create_inte_head(&case(), &schedule(), 0.0, 0, StepContext::new(0, 1), &layout)
            .unwrap();
        let v = head.to_array(&layout);

        assert_eq!(v[ih::NWELLS], 0);
        assert_eq!(v[ih::NCWMAX], 0);
        assert_eq!(v[ih::NGRP], 0);
        assert_eq!(v[ih::NGMAXZ], 1);
        assert_eq!(v[ih::NGRNPH], 0);
        assert_eq!(v[ih::NO_WELL_UDQS], 0);
        assert_eq!(v[ih::UDQPAR_1], 0);
        assert_eq!(v[ih::NIGRPZ], 97);
    }

    #[test]
    fn test_initial_step_ignores_multi_segment_wells() {
        let layout = FormatLayout::default();
        let schedule = ScheduleBuilder::new(date(2000, 1, 1))
            .dates(date(2000, 1, 11), |s| {
                let mut w = Well::producer("MSW", "G1", 1, 1);
                w.segments = Some(SegmentSet {
                    segments: vec![Segment {
                        number: 1,
                        branch: 1,
                        outlet: 0,
                        total_length: 0.0,
                        depth: 1000.0,
                        diameter: 0.1,
                        roughness: 1.0e-5,
                        volume: None,
                    }],
                });
                s.add_well(w);
            })
            .build();

        let initial =
            create_inte_head(&case(), &schedule, 0.0, 0, StepContext::new(0, 1), &layout).unwrap();
        let v = initial.to_array(&layout);
        assert_eq!((v[ih::NWELLS], v[ih::NSEGWL]), (0, 0));

        let later =
            create_inte_head(&case(), &schedule, 0.0, 0, StepContext::new(1, 1), &layout).unwrap();
        let v = later.to_array(&layout);
        assert_eq!((v[ih::NWELLS], v[ih::NSEGWL]), (1, 1));
    }

    #[test]
    fn test_later_step_reflects_schedule() {
        let layout = FormatLayout::default();
        let schedule = schedule();
        let elapsed = schedule.seconds_elapsed(1).unwrap();
        let head =
            create_inte_head(&case(), &schedule, elapsed, 5, StepContext::new(1, 1), &layout)
                .unwrap();
        let v = head.to_array(&layout);

        assert_eq!(&v[ih::NX..=ih::NACTIV], &[10, 5, 3, 150]);
        assert_eq!(v[ih::UNIT], 1);
        assert_eq!(v[ih::PHASE], 7);
        assert_eq!(v[ih::NWELLS], 1);
        assert_eq!(v[ih::NCWMAX], 2);
        assert_eq!(v[ih::NGRP], 1);
        assert_eq!(v[ih::NWGMAX], 1);
        assert_eq!(v[ih::NGMAXZ], 2);
        assert_eq!(v[ih::NIGRPZ], 98);
        assert_eq!(v[ih::NGRNPH], -3);
        assert_eq!(v[ih::NO_WELL_UDQS], 1);
        assert_eq!(v[ih::UDQPAR_1], 1);
        assert_eq!((v[ih::DAY], v[ih::MONTH], v[ih::YEAR]), (11, 1, 2000));
        assert_eq!(v[ih::NUM_SOLVER_STEPS], 5);
        assert_eq!(v[ih::REPORT_STEP], 1);
        assert_eq!(v[ih::NEWTMX], 12);
        assert_eq!(v[ih::LITMAX], 25);
        assert_eq!(v[ih::MAXNOSTRPRLINE], 10, "80 characters in 8-character words");
    }

    #[test]
    fn test_repeated_build_is_identical() {
        let layout = FormatLayout::default();
        let schedule = schedule();
        let ctx = StepContext::new(1, 1);
        let a = create_inte_head(&case(), &schedule, 864_000.0, 3, ctx, &layout).unwrap();
        let b = create_inte_head(&case(), &schedule, 864_000.0, 3, ctx, &layout).unwrap();
        assert_eq!(a.to_array(&layout), b.to_array(&layout));
    }
}
