//! Multi-segment well arrays: ISEG, RSEG, ILBS, ILBR.
//!
//! Arrays are sized by the declared WSEGDIMS maxima and indexed by
//! multi-segment well id (1-based in IWEL, in well order). Segment `n` of a
//! well sits in record `n - 1` of that well's block; branch `b` in ILBR
//! record `b - 1`; lateral branch `b >= 2` in ILBS slot `b - 2`.

use std::collections::BTreeSet;
use std::f64::consts::PI;

use super::{ensure_stride, ih_count, is_initial, WindowedArray};
use crate::error::{RestartError, Result};
use crate::header::dimensions::to_i32;
use crate::header::layout::ih;
use crate::types::{Schedule, Segment, SegmentSet, Well};

/// ISEG item positions.
pub mod iseg {
    /// One-based position in processing order (inflows before outlets)
    pub const SEG_ORDER: usize = 0;
    pub const OUTLET: usize = 1;
    /// Inflow segment on the same branch, 0 at the branch end
    pub const BRANCH_INFLOW: usize = 2;
    pub const BRANCH: usize = 3;
    pub const NUM_INFLOWS: usize = 4;

    pub const LAST: usize = NUM_INFLOWS;
}

/// RSEG item positions.
pub mod rseg {
    pub const LENGTH: usize = 0;
    pub const TOTAL_LENGTH: usize = 1;
    pub const DIAMETER: usize = 2;
    pub const ROUGHNESS: usize = 3;
    pub const AREA: usize = 4;
    pub const VOLUME: usize = 5;
    pub const DEPTH_CHANGE: usize = 6;
    pub const DEPTH: usize = 7;

    pub const LAST: usize = DEPTH;
}

/// ILBR item positions.
pub mod ilbr {
    pub const OUTLET: usize = 0;
    pub const NUM_SEGMENTS: usize = 1;
    pub const FIRST_SEGMENT: usize = 2;
    pub const LAST_SEGMENT: usize = 3;

    pub const LAST: usize = LAST_SEGMENT;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateMswData {
    iseg: WindowedArray<i32>,
    rseg: WindowedArray<f64>,
    ilbs: WindowedArray<i32>,
    ilbr: WindowedArray<i32>,
}

struct MswDims {
    nswlmx: usize,
    nsegmx: usize,
    nlbrmx: usize,
}

impl AggregateMswData {
    pub fn build(inte_head: &[i32], schedule: &Schedule, lookup_step: usize) -> Result<Self> {
        let initial = is_initial(inte_head);
        let nswlmx = if initial {
            0
        } else {
            ih_count(inte_head, ih::NSWLMX, "NSWLMX")?
        };
        let nsegmx = ih_count(inte_head, ih::NSEGMX, "NSEGMX")?;
        let nlbrmx = ih_count(inte_head, ih::NLBRMX, "NLBRMX")?;
        let nisegz = ih_count(inte_head, ih::NISEGZ, "NISEGZ")?;
        let nrsegz = ih_count(inte_head, ih::NRSEGZ, "NRSEGZ")?;
        let nilbrz = ih_count(inte_head, ih::NILBRZ, "NILBRZ")?;

        let mut data = Self {
            iseg: WindowedArray::new(nswlmx * nsegmx, nisegz, 0),
            rseg: WindowedArray::new(nswlmx * nsegmx, nrsegz, 0.0),
            ilbs: WindowedArray::new(nswlmx, nlbrmx, 0),
            ilbr: WindowedArray::new(nswlmx * nlbrmx, nilbrz, 0),
        };
        if initial {
            return Ok(data);
        }

        let msw_wells: Vec<&Well> = schedule
            .wells(lookup_step)?
            .iter()
            .filter(|w| w.is_multi_segment())
            .collect();
        if msw_wells.len() > nswlmx {
            return Err(RestartError::invalid(format!(
                "{} multi-segment wells exceed declared maximum {nswlmx}",
                msw_wells.len()
            )));
        }
        if msw_wells.is_empty() {
            return Ok(data);
        }

        ensure_stride("ISEG", nisegz, iseg::LAST)?;
        ensure_stride("RSEG", nrsegz, rseg::LAST)?;
        ensure_stride("ILBR", nilbrz, ilbr::LAST)?;

        let dims = MswDims { nswlmx, nsegmx, nlbrmx };
        for (msw_index, well) in msw_wells.into_iter().enumerate() {
            if let Some(set) = &well.segments {
                data.capture_well(msw_index, &well.name, set, &dims)?;
            }
        }

        Ok(data)
    }

    fn capture_well(
        &mut self,
        msw_index: usize,
        name: &str,
        set: &SegmentSet,
        dims: &MswDims,
    ) -> Result<()> {
        for seg in &set.segments {
            if seg.number == 0 || seg.number > dims.nsegmx {
                return Err(RestartError::invalid(format!(
                    "well '{name}' segment {} outside 1..={}",
                    seg.number, dims.nsegmx
                )));
            }
            if seg.branch == 0 || seg.branch > dims.nlbrmx {
                return Err(RestartError::invalid(format!(
                    "well '{name}' branch {} outside 1..={}",
                    seg.branch, dims.nlbrmx
                )));
            }
        }

        let order = processing_order(set);
        let seg_base = msw_index * dims.nsegmx;

        for seg in &set.segments {
            let inflows = set.inflows(seg.number);
            let record = seg_base + seg.number - 1;

            let iseg_rec = self.iseg.window_mut(record);
            iseg_rec[iseg::SEG_ORDER] = order
                .iter()
                .position(|&n| n == seg.number)
                .map_or(0, |p| to_i32(p + 1));
            iseg_rec[iseg::OUTLET] = to_i32(seg.outlet);
            iseg_rec[iseg::BRANCH_INFLOW] = inflows
                .iter()
                .find(|s| s.branch == seg.branch)
                .map_or(0, |s| to_i32(s.number));
            iseg_rec[iseg::BRANCH] = to_i32(seg.branch);
            iseg_rec[iseg::NUM_INFLOWS] = to_i32(inflows.len());

            rseg_record(self.rseg.window_mut(record), seg, set.get(seg.outlet));
        }

        for branch in set.branches() {
            let members: Vec<&Segment> =
                set.segments.iter().filter(|s| s.branch == branch).collect();
            let first = members.iter().map(|s| s.number).min().unwrap_or(0);
            let last = members.iter().map(|s| s.number).max().unwrap_or(0);
            let outlet = set.get(first).map_or(0, |s| s.outlet);

            let ilbr_rec = self.ilbr.window_mut(msw_index * dims.nlbrmx + branch - 1);
            ilbr_rec[ilbr::OUTLET] = to_i32(outlet);
            ilbr_rec[ilbr::NUM_SEGMENTS] = to_i32(members.len());
            ilbr_rec[ilbr::FIRST_SEGMENT] = to_i32(first);
            ilbr_rec[ilbr::LAST_SEGMENT] = to_i32(last);

            if branch >= 2 {
                self.ilbs.window_mut(msw_index)[branch - 2] = to_i32(first);
            }
        }

        Ok(())
    }

    pub fn iseg(&self) -> &[i32] {
        self.iseg.data()
    }

    pub fn rseg(&self) -> &[f64] {
        self.rseg.data()
    }

    pub fn ilbs(&self) -> &[i32] {
        self.ilbs.data()
    }

    pub fn ilbr(&self) -> &[i32] {
        self.ilbr.data()
    }
}

/// Segment numbers in post-order from the top segment: every segment comes
/// after all segments flowing into it. Inflows are visited in ascending
/// segment order.
fn processing_order(set: &SegmentSet) -> Vec<usize> {
    let mut order = Vec::with_capacity(set.len());
    let mut seen = BTreeSet::new();

    let tops = set.segments.iter().filter(|s| s.outlet == 0).map(|s| s.number);
    for top in tops {
        let mut stack = vec![(top, false)];
        while let Some((number, expanded)) = stack.pop() {
            if expanded {
                order.push(number);
                continue;
            }
            if !seen.insert(number) {
                continue;
            }
            stack.push((number, true));
            for inflow in set.inflows(number).iter().rev() {
                stack.push((inflow.number, false));
            }
        }
    }
    order
}

fn rseg_record(rseg_rec: &mut [f64], seg: &Segment, outlet: Option<&Segment>) {
    let length = seg.total_length - outlet.map_or(0.0, |o| o.total_length);
    let area = PI * seg.diameter * seg.diameter / 4.0;

    rseg_rec[rseg::LENGTH] = length;
    rseg_rec[rseg::TOTAL_LENGTH] = seg.total_length;
    rseg_rec[rseg::DIAMETER] = seg.diameter;
    rseg_rec[rseg::ROUGHNESS] = seg.roughness;
    rseg_rec[rseg::AREA] = area;
    rseg_rec[rseg::VOLUME] = seg.volume.unwrap_or(area * length);
    rseg_rec[rseg::DEPTH_CHANGE] = outlet.map_or(0.0, |o| seg.depth - o.depth);
    rseg_rec[rseg::DEPTH] = seg.depth;
}
