//! Connection arrays: ICON, SCON, XCON.
//!
//! Each well owns NCWMAX consecutive connection records, whether or not it
//! uses them all.

use super::{ensure_stride, ih_count, is_initial, WindowedArray};
use crate::error::{RestartError, Result};
use crate::header::codes;
use crate::header::dimensions::to_i32;
use crate::header::layout::ih;
use crate::types::{Connection, ConnectionResult, Schedule, SimulationState};

/// ICON item positions.
pub mod icon {
    /// One-based position within the well
    pub const SEQ_INDEX: usize = 0;
    pub const I: usize = 1;
    pub const J: usize = 2;
    pub const K: usize = 3;
    pub const STATUS: usize = 5;
    pub const SAT_TABLE: usize = 6;
    pub const COMPLNUM: usize = 12;
    pub const DIRECTION: usize = 13;
    pub const SEGMENT: usize = 14;

    pub const LAST: usize = SEGMENT;
}

/// SCON item positions.
pub mod scon {
    pub const CONN_TRANS: usize = 0;
    pub const DEPTH: usize = 1;
    pub const DIAMETER: usize = 2;
    pub const EFF_KH: usize = 3;
    pub const SKIN: usize = 4;
    pub const SEG_DIST_START: usize = 10;
    pub const SEG_DIST_END: usize = 11;

    pub const LAST: usize = SEG_DIST_END;
}

/// XCON item positions.
pub mod xcon {
    pub const OIL_RATE: usize = 0;
    pub const WATER_RATE: usize = 1;
    pub const GAS_RATE: usize = 2;
    pub const PRESSURE: usize = 34;

    pub const LAST: usize = PRESSURE;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateConnectionData {
    icon: WindowedArray<i32>,
    scon: WindowedArray<f32>,
    xcon: WindowedArray<f64>,
}

impl AggregateConnectionData {
    pub fn build(
        inte_head: &[i32],
        schedule: &Schedule,
        lookup_step: usize,
        state: Option<&SimulationState>,
    ) -> Result<Self> {
        let nwells = ih_count(inte_head, ih::NWELLS, "NWELLS")?;
        let ncwmax = ih_count(inte_head, ih::NCWMAX, "NCWMAX")?;
        let niconz = ih_count(inte_head, ih::NICONZ, "NICONZ")?;
        let nsconz = ih_count(inte_head, ih::NSCONZ, "NSCONZ")?;
        let nxconz = ih_count(inte_head, ih::NXCONZ, "NXCONZ")?;

        let records = nwells * ncwmax;
        let mut data = Self {
            icon: WindowedArray::new(records, niconz, 0),
            scon: WindowedArray::new(records, nsconz, 0.0),
            xcon: WindowedArray::new(records, nxconz, 0.0),
        };
        if is_initial(inte_head) || records == 0 {
            return Ok(data);
        }

        ensure_stride("ICON", niconz, icon::LAST)?;
        ensure_stride("SCON", nsconz, scon::LAST)?;
        ensure_stride("XCON", nxconz, xcon::LAST)?;

        let wells = schedule.wells(lookup_step)?;
        if wells.len() != nwells {
            return Err(RestartError::invalid(format!(
                "INTEHEAD declares {nwells} wells, lookup step {lookup_step} has {}",
                wells.len()
            )));
        }

        for (well_index, well) in wells.iter().enumerate() {
            if well.connections.len() > ncwmax {
                return Err(RestartError::invalid(format!(
                    "well '{}' has {} connections, NCWMAX is {ncwmax}",
                    well.name,
                    well.connections.len()
                )));
            }

            let results = state
                .and_then(|s| s.well(&well.name))
                .map(|r| r.connections.as_slice());

            for (conn_index, conn) in well.connections.iter().enumerate() {
                let record = well_index * ncwmax + conn_index;
                static_icon(data.icon.window_mut(record), conn, conn_index);
                static_scon(data.scon.window_mut(record), conn);

                if let Some(result) = results.and_then(|r| r.get(conn_index)) {
                    dynamic_xcon(data.xcon.window_mut(record), result);
                }
            }
        }

        Ok(data)
    }

    pub fn icon(&self) -> &[i32] {
        self.icon.data()
    }

    pub fn scon(&self) -> &[f32] {
        self.scon.data()
    }

    pub fn xcon(&self) -> &[f64] {
        self.xcon.data()
    }
}

fn static_icon(icon_rec: &mut [i32], conn: &Connection, conn_index: usize) {
    icon_rec[icon::SEQ_INDEX] = to_i32(conn_index + 1);
    icon_rec[icon::I] = to_i32(conn.i);
    icon_rec[icon::J] = to_i32(conn.j);
    icon_rec[icon::K] = to_i32(conn.k);
    icon_rec[icon::STATUS] = codes::connection_status(conn.state);
    icon_rec[icon::SAT_TABLE] = conn.sat_table;
    icon_rec[icon::COMPLNUM] = conn.complnum;
    icon_rec[icon::DIRECTION] = codes::connection_direction(conn.direction);
    icon_rec[icon::SEGMENT] = conn.segment.map_or(0, to_i32);
}

#[allow(clippy::cast_possible_truncation)]
fn static_scon(scon_rec: &mut [f32], conn: &Connection) {
    scon_rec[scon::CONN_TRANS] = conn.cf as f32;
    scon_rec[scon::DEPTH] = conn.depth as f32;
    scon_rec[scon::DIAMETER] = conn.diameter as f32;
    scon_rec[scon::EFF_KH] = conn.kh as f32;
    scon_rec[scon::SKIN] = conn.skin as f32;
    scon_rec[scon::SEG_DIST_START] = conn.seg_dist_start as f32;
    scon_rec[scon::SEG_DIST_END] = conn.seg_dist_end as f32;
}

fn dynamic_xcon(xcon_rec: &mut [f64], result: &ConnectionResult) {
    xcon_rec[xcon::OIL_RATE] = result.rates.oil;
    xcon_rec[xcon::WATER_RATE] = result.rates.water;
    xcon_rec[xcon::GAS_RATE] = result.rates.gas;
    xcon_rec[xcon::PRESSURE] = result.pressure;
}
