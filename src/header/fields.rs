//! Header field builders: schedule/runspec snapshot → typed header record.

use super::codes;
use super::dimensions::to_i32;
use super::layout::FormatLayout;
use super::step::StepContext;
use crate::error::Result;
use crate::types::{Actions, Phase, Runspec, Schedule, Tuning, UdqVarType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Phases {
    pub oil: bool,
    pub water: bool,
    pub gas: bool,
}

impl Phases {
    /// INTEHEAD PHASE indicator: oil 1, water 2, gas 4, summed.
    pub fn indicator(&self) -> i32 {
        i32::from(self.oil) + 2 * i32::from(self.water) + 4 * i32::from(self.gas)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TuningPar {
    pub newtmx: i32,
    pub newtmn: i32,
    pub litmax: i32,
    pub litmin: i32,
    pub mxwsit: i32,
    pub mxwpit: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UdqParam {
    pub random_seed: i32,
    pub num_well_udqs: i32,
    pub num_group_udqs: i32,
    pub num_field_udqs: i32,
    pub num_iuads: i32,
    pub num_iuaps: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionParam {
    pub num_actions: i32,
    pub max_lines_per_action: i32,
    pub max_conditions_per_action: i32,
    pub max_characters_per_line: i32,
}

impl ActionParam {
    /// Line width as a count of 8-character words, rounded up.
    pub fn max_words_per_line(&self) -> i32 {
        (self.max_characters_per_line + 7) / 8
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WellSegDims {
    pub nsegwl: i32,
    pub nswlmx: i32,
    pub nsegmx: i32,
    pub nlbrmx: i32,
    pub nisegz: i32,
    pub nrsegz: i32,
    pub nilbrz: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegDims {
    pub ntfip: i32,
    pub nmfipr: i32,
    pub nrfreg: i32,
    pub ntfreg: i32,
    pub nplmix: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuideRateNominatedPhase {
    pub nominated_phase: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepParam {
    pub num_solver_steps: i32,
    pub report_step: i32,
}

// ============================================================================
// Builders
// ============================================================================

pub fn active_phases(runspec: &Runspec) -> Phases {
    let phases = &runspec.phases;
    Phases {
        oil: phases.active(Phase::Oil),
        water: phases.active(Phase::Water),
        gas: phases.active(Phase::Gas),
    }
}

/// Iteration limits at the lookup step. Tuning always exists, so no step-0 rule.
pub fn tuning_params(tuning: &Tuning) -> TuningPar {
    TuningPar {
        newtmx: tuning.newtmx,
        newtmn: tuning.newtmn,
        litmax: tuning.litmax,
        litmin: tuning.litmin,
        mxwsit: tuning.mxwsit,
        mxwpit: tuning.mxwpit,
    }
}

pub fn udq_params(runspec: &Runspec, schedule: &Schedule, ctx: StepContext) -> Result<UdqParam> {
    ctx.gated(|| {
        let udq = &schedule.state(ctx.lookup_step)?.udq;
        Ok(UdqParam {
            random_seed: runspec.udq_params.rand_seed,
            num_well_udqs: to_i32(udq.count(UdqVarType::WellVar)),
            num_group_udqs: to_i32(udq.count(UdqVarType::GroupVar)),
            num_field_udqs: to_i32(udq.count(UdqVarType::FieldVar)),
            num_iuads: to_i32(udq.active.iuad_size),
            num_iuaps: to_i32(udq.active.iuap_size),
        })
    })
}

pub fn action_params(runspec: &Runspec, actions: &Actions, ctx: StepContext) -> ActionParam {
    if ctx.is_initial() {
        return ActionParam::default();
    }
    ActionParam {
        num_actions: to_i32(actions.len()),
        max_lines_per_action: to_i32(actions.max_input_lines()),
        max_conditions_per_action: runspec.action_dims.max_conditions,
        max_characters_per_line: runspec.action_dims.max_characters,
    }
}

/// Multi-segment wells at the lookup step; 0 at report step 0.
pub fn num_multi_segment_wells(schedule: &Schedule, ctx: StepContext) -> Result<i32> {
    ctx.gated(|| {
        let count = schedule
            .wells(ctx.lookup_step)?
            .iter()
            .filter(|w| w.is_multi_segment())
            .count();
        Ok(to_i32(count))
    })
}

pub fn well_segment_dims(
    runspec: &Runspec,
    schedule: &Schedule,
    ctx: StepContext,
    layout: &FormatLayout,
) -> Result<WellSegDims> {
    let wsd = &runspec.segment_dims;
    Ok(WellSegDims {
        nsegwl: num_multi_segment_wells(schedule, ctx)?,
        nswlmx: wsd.max_segmented_wells,
        nsegmx: wsd.max_segments_per_well,
        nlbrmx: wsd.max_lateral_branches_per_well,
        nisegz: layout.nisegz,
        nrsegz: layout.nrsegz,
        nilbrz: layout.nilbrz,
    })
}

pub fn region_dims(runspec: &Runspec) -> RegDims {
    let rd = &runspec.region_dims;
    RegDims {
        ntfip: rd.num_fip_regions,
        nmfipr: rd.nmfipr,
        nrfreg: rd.nrfreg,
        ntfreg: rd.ntfreg,
        nplmix: rd.nplmix,
    }
}

/// Guide-rate nominated phase; negative when the model disallows increases.
pub fn guide_rate_nominated_phase(
    schedule: &Schedule,
    ctx: StepContext,
) -> Result<GuideRateNominatedPhase> {
    ctx.gated(|| {
        let config = &schedule.state(ctx.lookup_step)?.guide_rate;
        let nominated_phase = config.model.map_or(0, |model| {
            let code = codes::nominated_phase(model.target);
            if model.allow_increase {
                code
            } else {
                -code
            }
        });
        Ok(GuideRateNominatedPhase { nominated_phase })
    })
}

pub fn whistctl_mode(schedule: &Schedule, ctx: StepContext) -> Result<i32> {
    ctx.gated(|| {
        let mode = schedule.state(ctx.lookup_step)?.whistctl_mode;
        Ok(codes::whistctl_mode(mode))
    })
}

/// Group control index: 1 once a production group is seen, 2 once an
/// injection group is seen, evaluated group by group in order. A later
/// group overwrites an earlier code, so a field with both kinds reports
/// whichever kind the last classified group has (injection wins within one
/// group).
pub fn group_control_index(schedule: &Schedule, ctx: StepContext) -> Result<i32> {
    ctx.gated(|| {
        let mut gctrl = 0;
        for group in schedule.groups(ctx.lookup_step)? {
            if group.is_production_group() {
                gctrl = 1;
            }
            if group.is_injection_group() {
                gctrl = 2;
            }
        }
        Ok(gctrl)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Action, GroupInjectionControls, GroupProductionControls, GuideRateModel, GuideRateTarget,
        InjectionPhase, ProducerCMode, ScheduleBuilder, SegmentSet, Segment, UdqActive, UdqInput,
        Well,
    };
    use chrono::{NaiveDate, NaiveDateTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid test date")
    }

    fn schedule_with(apply: impl FnOnce(&mut crate::types::ScheduleState)) -> Schedule {
        ScheduleBuilder::new(date(2000, 1, 1))
            .dates(date(2000, 2, 1), apply)
            .build()
    }

    #[test]
    fn test_phase_indicator() {
        assert_eq!(Phases { oil: true, water: true, gas: true }.indicator(), 7);
        assert_eq!(Phases { oil: true, water: false, gas: true }.indicator(), 5);
        assert_eq!(Phases { oil: false, water: true, gas: false }.indicator(), 2);
    }

    #[test]
    fn test_udq_params_counts_by_type() {
        let schedule = schedule_with(|s| {
            s.udq.input = vec![
                UdqInput::new("WUOPRL"),
                UdqInput::new("WUWCT"),
                UdqInput::new("GUOPRU"),
                UdqInput::new("FULPR"),
            ];
            s.udq.active = UdqActive { iuad_size: 3, iuap_size: 2 };
        });
        let runspec = Runspec::default();

        let p = udq_params(&runspec, &schedule, StepContext::new(1, 1)).unwrap();
        assert_eq!(
            p,
            UdqParam {
                random_seed: 1,
                num_well_udqs: 2,
                num_group_udqs: 1,
                num_field_udqs: 1,
                num_iuads: 3,
                num_iuaps: 2,
            }
        );

        let initial = udq_params(&runspec, &schedule, StepContext::new(0, 1)).unwrap();
        assert_eq!(initial, UdqParam::default());
    }

    #[test]
    fn test_action_params() {
        let actions = Actions {
            actions: vec![
                Action { name: "A".into(), input_lines: 4, conditions: 1 },
                Action { name: "B".into(), input_lines: 9, conditions: 2 },
            ],
        };
        let runspec = Runspec::default();
        let p = action_params(&runspec, &actions, StepContext::new(3, 2));
        assert_eq!(p.num_actions, 2);
        assert_eq!(p.max_lines_per_action, 9);
        assert_eq!(p.max_conditions_per_action, 3);
        assert_eq!(p.max_characters_per_line, 80);
        assert_eq!(p.max_words_per_line(), 10);

        assert_eq!(action_params(&runspec, &actions, StepContext::new(0, 0)), ActionParam::default());

        let mut wide = Runspec::default();
        wide.action_dims.max_characters = 81;
        assert_eq!(action_params(&wide, &actions, StepContext::new(1, 1)).max_words_per_line(), 11);
    }

    #[test]
    fn test_guide_rate_sign_follows_allow_increase() {
        for (target, code) in [(GuideRateTarget::Oil, 1), (GuideRateTarget::Comb, 9)] {
            for allow_increase in [true, false] {
                let schedule = schedule_with(|s| {
                    s.guide_rate.model = Some(GuideRateModel { target, allow_increase });
                });
                let phase = guide_rate_nominated_phase(&schedule, StepContext::new(1, 1)).unwrap();
                let expected = if allow_increase { code } else { -code };
                assert_eq!(phase.nominated_phase, expected);
            }
        }
    }

    #[test]
    fn test_guide_rate_without_model_is_zero() {
        let schedule = schedule_with(|_| {});
        let phase = guide_rate_nominated_phase(&schedule, StepContext::new(1, 1)).unwrap();
        assert_eq!(phase.nominated_phase, 0);
    }

    #[test]
    fn test_whistctl_zero_at_step_zero() {
        let schedule = schedule_with(|s| s.whistctl_mode = ProducerCMode::Bhp);
        assert_eq!(whistctl_mode(&schedule, StepContext::new(1, 1)).unwrap(), 7);
        assert_eq!(whistctl_mode(&schedule, StepContext::new(0, 1)).unwrap(), 0);
    }

    #[test]
    fn test_group_control_last_group_wins() {
        let schedule = schedule_with(|s| {
            s.add_group("INJ", "FIELD");
            s.add_group("PROD", "FIELD");
            if let Some(g) = s.group_mut("INJ") {
                g.injection.push(GroupInjectionControls {
                    phase: InjectionPhase::Water,
                    cmode: crate::types::GroupInjectionCMode::Rate,
                    surface_target: Some(1000.0),
                    resv_target: None,
                });
            }
            if let Some(g) = s.group_mut("PROD") {
                g.production = Some(GroupProductionControls::default());
            }
        });
        // INJ comes first, PROD overwrites it.
        assert_eq!(group_control_index(&schedule, StepContext::new(1, 1)).unwrap(), 1);
        assert_eq!(group_control_index(&schedule, StepContext::new(0, 1)).unwrap(), 0);
    }

    #[test]
    fn test_group_control_injection_overwrites_production() {
        let schedule = schedule_with(|s| {
            s.add_group("PROD", "FIELD");
            s.add_group("INJ", "FIELD");
            if let Some(g) = s.group_mut("PROD") {
                g.production = Some(GroupProductionControls::default());
            }
            if let Some(g) = s.group_mut("INJ") {
                g.injection.push(GroupInjectionControls {
                    phase: InjectionPhase::Gas,
                    cmode: crate::types::GroupInjectionCMode::Rate,
                    surface_target: None,
                    resv_target: None,
                });
            }
        });
        assert_eq!(group_control_index(&schedule, StepContext::new(1, 1)).unwrap(), 2);
    }

    #[test]
    fn test_multi_segment_count_zero_at_initial_step() {
        let schedule = schedule_with(|s| {
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
            s.add_well(Well::producer("STD", "G1", 2, 2));
        });
        assert_eq!(num_multi_segment_wells(&schedule, StepContext::new(1, 1)).unwrap(), 1);
        assert_eq!(num_multi_segment_wells(&schedule, StepContext::new(0, 1)).unwrap(), 0);
        assert_eq!(num_multi_segment_wells(&schedule, StepContext::new(0, 0)).unwrap(), 0);
    }
}
