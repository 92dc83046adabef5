//! DOUBHEAD: elapsed time, TUNING reals and UDQ parameters.

use super::calendar::serial_days;
use super::layout::{dh, FormatLayout};
use crate::types::{Runspec, Tuning, UdqParams};

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubHead {
    /// Elapsed time in days
    pub sim_time_days: f64,
    /// Next time step in days
    pub next_step_days: f64,
    /// Start date as a serial day number
    pub start_date: f64,
    pub tuning: Tuning,
    pub udq: UdqParams,
}

impl DoubHead {
    pub fn to_array(&self, layout: &FormatLayout) -> Vec<f64> {
        let mut v = vec![0.0; layout.doubhead_len];
        let t = &self.tuning;

        v[dh::SIM_TIME] = self.sim_time_days;

        v[dh::TSINIT] = t.tsinit;
        v[dh::TSMAXZ] = t.tsmaxz;
        v[dh::TSMINZ] = t.tsminz;
        v[dh::TSMCHP] = t.tsmchp;
        v[dh::TSFMAX] = t.tsfmax;
        v[dh::TSFMIN] = t.tsfmin;
        v[dh::TSFCNV] = t.tsfcnv;
        v[dh::TFDIFF] = t.tfdiff;
        v[dh::THRUPT] = t.thrupt;

        v[dh::TRGTTE] = t.trgtte;
        v[dh::TRGCNV] = t.trgcnv;
        v[dh::TRGMBE] = t.trgmbe;
        v[dh::TRGLCV] = t.trglcv;
        v[dh::XXXTTE] = t.xxxtte;
        v[dh::XXXCNV] = t.xxxcnv;
        v[dh::XXXMBE] = t.xxxmbe;
        v[dh::XXXLCV] = t.xxxlcv;
        v[dh::XXXWFL] = t.xxxwfl;
        v[dh::TRGFIP] = t.trgfip;
        v[dh::TRGSFT] = t.trgsft;
        v[dh::THIONX] = t.thionx;
        v[dh::TRWGHT] = t.trwght;
        v[dh::DDPLIM] = t.ddplim;
        v[dh::DDSLIM] = t.ddslim;

        v[dh::NEXT_TSTEP] = self.next_step_days;
        v[dh::START_DATE] = self.start_date;

        v[dh::UDQ_RANGE] = self.udq.range;
        v[dh::UDQ_UNDEFINED] = self.udq.undefined_value;
        v[dh::UDQ_EPSILON] = self.udq.cmp_epsilon;
        v
    }
}

/// `sim_time` and `next_time_step` are in seconds.
pub fn create_doub_head(
    runspec: &Runspec,
    tuning: &Tuning,
    start: chrono::NaiveDateTime,
    sim_time: f64,
    next_time_step: f64,
) -> DoubHead {
    DoubHead {
        sim_time_days: sim_time / SECONDS_PER_DAY,
        next_step_days: next_time_step / SECONDS_PER_DAY,
        start_date: serial_days(start),
        tuning: *tuning,
        udq: runspec.udq_params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_time_in_days_and_tuning_slots() {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid test date");
        let runspec = Runspec::default();
        let head = create_doub_head(&runspec, &Tuning::default(), start, 3.0 * 86_400.0, 43_200.0);
        let v = head.to_array(&FormatLayout::default());

        assert_eq!(v.len(), 229);
        assert!((v[dh::SIM_TIME] - 3.0).abs() < 1e-12);
        assert!((v[dh::NEXT_TSTEP] - 0.5).abs() < 1e-12);
        assert!((v[dh::START_DATE] - 36_526.0).abs() < 1e-9);
        assert!((v[dh::TSMAXZ] - 365.0).abs() < 1e-12);
        assert!((v[dh::UDQ_RANGE] - 1.0e20).abs() < 1.0);
        assert!((v[dh::UDQ_EPSILON] - 1.0e-4).abs() < 1e-12);
    }
}
