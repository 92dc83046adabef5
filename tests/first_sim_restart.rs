//! End-to-end restart encoding of the FIRST_SIM reference deck
//!
//! Wells appear at DATES 10 OKT 2008 (lookup step 1); OP_2 is perforated
//! through layers 3-9 at lookup step 3, which drives NCWMAX to 8. OP_5 and
//! OP_6 arrive late in 2014 and OP_3 is shut in between.

use chrono::{NaiveDate, NaiveDateTime};

use rst_encoder::aggregate::wells::iwell;
use rst_encoder::header::layout::{dh, ih};
use rst_encoder::restart::{encode_restart_step, encode_series, RestartArrays, RestartRequest};
use rst_encoder::types::{
    Connection, ConnectionDirection, ConnectionState, EclipseCase, EclipseGrid, InjectorCMode,
    InjectorType, PhaseSet, ProducerCMode, Runspec, RunspecSwitches, Schedule, ScheduleBuilder,
    Well, WellStatus, WellType,
};
use rst_encoder::EncoderConfig;

// ============================================================================
// Deck
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid test date")
}

fn compdat(k: usize, cf: f64, state: ConnectionState) -> Connection {
    let mut c = Connection::new(9, 9, k).with_state(state);
    c.direction = ConnectionDirection::X;
    c.cf = cf;
    c.diameter = 0.311;
    c.kh = 3047.839;
    c
}

fn oil_producer(name: &str) -> Well {
    let mut w = Well::producer(name, "OP", 9, 9);
    w.production.cmode = ProducerCMode::Orat;
    w.production.oil_rate = Some(20_000.0);
    w.production.bhp_limit = Some(1000.0);
    w
}

fn perforated_producer(name: &str) -> Well {
    let mut w = oil_producer(name);
    for k in 3..=9 {
        w.add_connection(compdat(k, 32.948, ConnectionState::Open));
    }
    w
}

fn set_injector(well: &mut Well, phase: InjectorType) {
    well.well_type = WellType::Injector(phase);
    well.injection.cmode = InjectorCMode::Rate;
    well.injection.surface_rate = Some(100.0);
    well.injection.resv_rate = Some(200.0);
    well.injection.bhp_limit = Some(400.0);
}

fn first_sim_case() -> EclipseCase {
    EclipseCase {
        runspec: Runspec {
            phases: PhaseSet::three_phase(),
            switches: RunspecSwitches {
                dissolved_gas: true,
                vaporized_oil: true,
                ..RunspecSwitches::default()
            },
            ..Runspec::default()
        },
        grid: EclipseGrid::new(10, 10, 10),
    }
}

fn first_sim_schedule() -> Schedule {
    ScheduleBuilder::new(date(1979, 11, 1))
        // 1
        .dates(date(2008, 10, 10), |s| {
            let mut op1 = oil_producer("OP_1");
            op1.add_connection(compdat(1, 32.948, ConnectionState::Open));
            op1.add_connection(compdat(3, 32.948, ConnectionState::Open));
            s.add_well(op1);

            let mut op2 = oil_producer("OP_2");
            op2.add_connection(compdat(2, 46.825, ConnectionState::Open));
            set_injector(&mut op2, InjectorType::Gas);
            s.add_well(op2);
        })
        // 2
        .dates(date(2011, 1, 20), |s| {
            let mut op3 = oil_producer("OP_3");
            op3.add_connection(compdat(1, 32.948, ConnectionState::Open));
            s.add_well(op3);
            if let Some(op2) = s.well_mut("OP_2") {
                set_injector(op2, InjectorType::Water);
            }
        })
        // 3
        .dates(date(2013, 6, 15), |s| {
            if let Some(op2) = s.well_mut("OP_2") {
                for k in 3..=9 {
                    op2.add_connection(compdat(k, 32.948, ConnectionState::Open));
                }
            }
            if let Some(op1) = s.well_mut("OP_1") {
                op1.add_connection(compdat(7, 32.948, ConnectionState::Shut));
            }
        })
        // 4
        .dates(date(2014, 4, 22), |s| {
            let mut op4 = oil_producer("OP_4");
            for k in 3..=9 {
                op4.add_connection(compdat(k, 32.948, ConnectionState::Open));
            }
            s.add_well(op4);
            if let Some(op3) = s.well_mut("OP_3") {
                for k in 3..=9 {
                    op3.add_connection(compdat(k, 32.948, ConnectionState::Open));
                }
            }
        })
        // 5
        .dates(date(2014, 8, 30), |s| s.add_well(perforated_producer("OP_5")))
        // 6
        .dates(date(2014, 9, 15), |s| {
            if let Some(op3) = s.well_mut("OP_3") {
                op3.status = WellStatus::Shut;
            }
        })
        // 7
        .dates(date(2014, 10, 9), |s| s.add_well(perforated_producer("OP_6")))
        // 8
        .tstep(10, |_| {})
        .build()
}

fn encode(report_step: usize) -> RestartArrays {
    encode_restart_step(
        &first_sim_case(),
        &first_sim_schedule(),
        None,
        &RestartRequest::for_report_step(report_step),
        &EncoderConfig::default(),
    )
    .expect("FIRST_SIM step encodes")
}

// ============================================================================
// Lookup step 1
// ============================================================================

#[test]
fn lookup_step_one_dimensions() {
    let arrays = encode(2);
    let v = &arrays.intehead;

    assert_eq!(arrays.lookup_step, 1);
    assert_eq!(v[ih::NWELLS], 2);
    assert_eq!(v[ih::NCWMAX], 2);
    assert_eq!(v[ih::NGRP], 1);
    assert_eq!(v[ih::NWGMAX], 2);
    assert_eq!(v[ih::NGMAXZ], 2, "OP plus FIELD");
    assert_eq!(v[ih::NIGRPZ], 97 + 2);
    assert_eq!(v[ih::PHASE], 7);
    assert_eq!((v[ih::NX], v[ih::NY], v[ih::NZ]), (10, 10, 10));
    assert_eq!((v[ih::DAY], v[ih::MONTH], v[ih::YEAR]), (20, 1, 2011));
}

#[test]
fn lookup_step_one_ignores_later_wells() {
    let schedule = first_sim_schedule();
    assert_eq!(schedule.num_wells(schedule.len() - 1).unwrap(), 6);

    let v = encode(2).intehead;
    assert_eq!(v[ih::NWELLS], 2);
    assert_eq!(v[ih::NGRP], 1);
}

#[test]
fn lookup_step_one_aggregate_sizes() {
    let arrays = encode(2);
    assert_eq!(arrays.iwel.len(), 2 * 155);
    assert_eq!(arrays.swel.len(), 2 * 122);
    assert_eq!(arrays.xwel.len(), 2 * 130);
    assert_eq!(arrays.zwel.len(), 2 * 3);
    assert_eq!(arrays.igrp.len(), 2 * 99);
    assert_eq!(arrays.sgrp.len(), 2 * 112);
    assert_eq!(arrays.icon.len(), 2 * 2 * 25);
    assert!(arrays.iseg.is_empty(), "no multi-segment wells");
}

#[test]
fn lookup_step_one_well_records() {
    let arrays = encode(2);
    let op1 = &arrays.iwel[..155];
    let op2 = &arrays.iwel[155..310];

    assert_eq!(arrays.zwel[0], "OP_1    ");
    assert_eq!(arrays.zwel[3], "OP_2    ");

    assert_eq!((op1[iwell::IHEAD], op1[iwell::JHEAD]), (9, 9));
    assert_eq!((op1[iwell::FIRST_K], op1[iwell::LAST_K]), (1, 3));
    assert_eq!(op1[iwell::NCONN], 2);
    assert_eq!(op1[iwell::GROUP], 1, "OP is the first non-FIELD group");
    assert_eq!(op1[iwell::WTYPE], 1);

    assert_eq!(op2[iwell::WTYPE], 4, "gas injector");
    assert_eq!(op2[iwell::ACT_CTRL], 3);
}

#[test]
fn lookup_step_one_group_records() {
    let arrays = encode(2);
    assert_eq!(arrays.zgrp[0], "OP      ");
    assert_eq!(arrays.zgrp[5], "FIELD   ", "FIELD is the last record");
}

// ============================================================================
// Lookup step 3
// ============================================================================

#[test]
fn lookup_step_three_dimensions() {
    let arrays = encode(4);
    let v = &arrays.intehead;
    assert_eq!(v[ih::NWELLS], 3);
    assert_eq!(v[ih::NCWMAX], 8);
    assert_eq!(v[ih::NWGMAX], 3);
    assert_eq!(arrays.icon.len(), 3 * 8 * 25);
}

#[test]
fn lookup_step_three_shut_connection_not_in_open_range() {
    let arrays = encode(4);
    let op1 = &arrays.iwel[..155];
    assert_eq!(op1[iwell::NCONN], 3);
    assert_eq!(op1[iwell::LAST_K], 3, "shut layer 7 is ignored");

    let op2 = &arrays.iwel[155..310];
    assert_eq!(op2[iwell::WTYPE], 3, "switched to water injection");
    assert_eq!((op2[iwell::FIRST_K], op2[iwell::LAST_K]), (2, 9));
}

// ============================================================================
// Late steps
// ============================================================================

#[test]
fn op_3_open_before_shut_date() {
    let arrays = encode(6);
    assert_eq!(arrays.intehead[ih::NWELLS], 5);
    let op3 = &arrays.iwel[310..465];
    assert_eq!(arrays.zwel[6], "OP_3    ");
    assert_eq!(op3[iwell::STATUS], 1);
    assert_eq!(op3[iwell::NCONN], 8);
}

#[test]
fn lookup_step_seven_has_all_wells_and_op_3_shut() {
    let arrays = encode(8);
    let v = &arrays.intehead;
    assert_eq!(arrays.lookup_step, 7);
    assert_eq!(v[ih::NWELLS], 6);
    assert_eq!(v[ih::NCWMAX], 8);
    assert_eq!(v[ih::NGRP], 1);
    assert_eq!(v[ih::NWGMAX], 6);
    assert_eq!(arrays.iwel.len(), 6 * 155);
    assert_eq!(arrays.icon.len(), 6 * 8 * 25);
    assert_eq!(arrays.zwel[15], "OP_6    ");

    let op3 = &arrays.iwel[310..465];
    assert_eq!(op3[iwell::STATUS], -1000, "shut at 15 SEP 2014");
}

// ============================================================================
// Whole run
// ============================================================================

#[test]
fn report_step_zero_is_initial() {
    let arrays = encode(0);
    let v = &arrays.intehead;
    assert_eq!(v[ih::NWELLS], 0);
    assert_eq!(v[ih::NGRP], 0);
    assert_eq!(v[ih::REPORT_STEP], 0);
    assert!(arrays.iwel.is_empty() && arrays.igrp.is_empty() && arrays.icon.is_empty());
    assert_eq!(arrays.logihead.len(), 121);
    assert!(arrays.logihead[0] && arrays.logihead[1], "DISGAS and VAPOIL");
}

#[test]
fn doubhead_times_follow_schedule() {
    let arrays = encode(2);
    let days = (date(2011, 1, 20) - date(1979, 11, 1)).num_days() as f64;
    let next = (date(2013, 6, 15) - date(2011, 1, 20)).num_days() as f64;
    assert!((arrays.doubhead[dh::SIM_TIME] - days).abs() < 1e-9);
    assert!((arrays.doubhead[dh::NEXT_TSTEP] - next).abs() < 1e-9);
}

#[test]
fn series_matches_single_step_encoding() {
    let case = first_sim_case();
    let schedule = first_sim_schedule();
    let steps: Vec<_> = (0..schedule.len())
        .map(|n| (RestartRequest::for_report_step(n), None))
        .collect();

    let parallel = encode_series(&case, &schedule, &steps, &EncoderConfig::default()).unwrap();

    let mut sequential_config = EncoderConfig::default();
    sequential_config.series.parallel = false;
    let sequential = encode_series(&case, &schedule, &steps, &sequential_config).unwrap();

    assert_eq!(parallel, sequential);
    assert_eq!(parallel.len(), schedule.len());
    assert_eq!(parallel[2], encode(2));
}

#[test]
fn lookup_step_past_schedule_is_invalid() {
    let err = encode_restart_step(
        &first_sim_case(),
        &first_sim_schedule(),
        None,
        &RestartRequest::new(5, 9).with_sim_time(0.0),
        &EncoderConfig::default(),
    )
    .unwrap_err();
    assert!(err.is_invalid_argument());
}
