//! Positional layout of the restart header arrays.
//!
//! The restart format is not self-describing: every consumer locates a value
//! by its index alone. All positions and per-record strides live here, keyed
//! by [`FormatVersion`]; nothing else in the crate hardcodes an offset.

use serde::{Deserialize, Serialize};

/// Target restart-format version.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum FormatVersion {
    /// ECLIPSE 100, 2017.02 layout
    #[default]
    #[serde(rename = "2017.02")]
    Eclipse2017_02,
}

impl std::fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatVersion::Eclipse2017_02 => write!(f, "2017.02"),
        }
    }
}

impl FormatVersion {
    pub fn layout(self) -> FormatLayout {
        match self {
            FormatVersion::Eclipse2017_02 => FormatLayout::ECLIPSE_2017_02,
        }
    }
}

/// Per-version constants: array lengths, per-record strides and the
/// fixed values written verbatim into INTEHEAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatLayout {
    pub version: FormatVersion,
    pub intehead_len: usize,
    pub logihead_len: usize,
    pub doubhead_len: usize,
    /// INTEHEAD VERSION marker
    pub version_marker: i32,
    /// INTEHEAD IPROG (100 = ECLIPSE 100)
    pub program_id: i32,
    /// Entries per well in IWEL/SWEL/XWEL/ZWEL.
    ///
    /// Determined experimentally against reference cases.
    pub nwelz: [i32; 4],
    /// Entries per connection in ICON/SCON/XCON
    pub nconz: [i32; 3],
    /// IGRP base length; the children list is added on top
    pub nigrpz_base: i32,
    pub nsgrpz: i32,
    pub nxgrpz: i32,
    pub nzgrpz: i32,
    /// NCAMAX, NIAAQZ, NSAAQZ, NXAAQZ, NICAQZ, NSCAQZ, NACAQZ
    pub naaqz: [i32; 7],
    /// Entries per segment in ISEG
    pub nisegz: i32,
    /// Entries per segment in RSEG
    pub nrsegz: i32,
    /// Entries per branch in ILBR
    pub nilbrz: i32,
    /// Fixed UDQ/ACTIONX structural values as (INTEHEAD index, value)
    pub udq_actionx_constants: &'static [(usize, i32)],
}

impl FormatLayout {
    pub const ECLIPSE_2017_02: FormatLayout = FormatLayout {
        version: FormatVersion::Eclipse2017_02,
        intehead_len: 411,
        logihead_len: 121,
        doubhead_len: 229,
        version_marker: 201_802,
        program_id: 100,
        nwelz: [155, 122, 130, 3],
        nconz: [25, 41, 58],
        nigrpz_base: 97,
        nsgrpz: 112,
        nxgrpz: 180,
        nzgrpz: 5,
        naaqz: [1, 18, 24, 10, 7, 2, 4],
        nisegz: 22,
        nrsegz: 146,
        nilbrz: 10,
        udq_actionx_constants: &[
            (159, 4),
            (160, 5),
            (161, 9),
            (246, 26),
            (247, 16),
            (248, 13),
        ],
    };
}

impl Default for FormatLayout {
    fn default() -> Self {
        FormatVersion::default().layout()
    }
}

/// INTEHEAD item positions (zero-based).
pub mod ih {
    pub const VERSION: usize = 1;
    pub const UNIT: usize = 2;
    pub const NX: usize = 8;
    pub const NY: usize = 9;
    pub const NZ: usize = 10;
    pub const NACTIV: usize = 11;
    /// 1 oil, 2 water, 4 gas; summed
    pub const PHASE: usize = 14;
    pub const NWELLS: usize = 16;
    pub const NCWMAX: usize = 17;
    pub const NGRP: usize = 18;
    pub const NWGMAX: usize = 19;
    /// Maximum groups in field, FIELD included
    pub const NGMAXZ: usize = 20;
    pub const NIWELZ: usize = 24;
    pub const NSWELZ: usize = 25;
    pub const NXWELZ: usize = 26;
    pub const NZWELZ: usize = 27;
    pub const NICONZ: usize = 32;
    pub const NSCONZ: usize = 33;
    pub const NXCONZ: usize = 34;
    pub const NIGRPZ: usize = 36;
    pub const NSGRPZ: usize = 37;
    pub const NXGRPZ: usize = 38;
    pub const NZGRPZ: usize = 39;
    pub const NCAMAX: usize = 41;
    pub const NIAAQZ: usize = 42;
    pub const NSAAQZ: usize = 43;
    pub const NXAAQZ: usize = 44;
    pub const NICAQZ: usize = 45;
    pub const NSCAQZ: usize = 46;
    pub const NACAQZ: usize = 47;
    /// Group control in use: 1 production, 2 injection
    pub const NGCTRL: usize = 48;
    /// Guide-rate nominated phase
    pub const NGRNPH: usize = 58;
    pub const DAY: usize = 64;
    pub const MONTH: usize = 65;
    pub const YEAR: usize = 66;
    pub const NUM_SOLVER_STEPS: usize = 67;
    pub const REPORT_STEP: usize = 68;
    /// WHISTCTL control mode
    pub const WHISTC: usize = 71;
    pub const NEWTMX: usize = 80;
    pub const NEWTMN: usize = 81;
    pub const LITMAX: usize = 82;
    pub const LITMIN: usize = 83;
    pub const MXWSIT: usize = 86;
    pub const MXWPIT: usize = 87;
    pub const NTFIP: usize = 89;
    pub const IPROG: usize = 94;
    pub const NMFIPR: usize = 99;
    pub const NRFREG: usize = 100;
    pub const NTFREG: usize = 101;
    pub const NPLMIX: usize = 102;
    pub const NOOFACTIONS: usize = 156;
    pub const MAXNOLINES: usize = 157;
    /// 8-character words per ACTIONX line
    pub const MAXNOSTRPRLINE: usize = 158;
    pub const NWMAXZ: usize = 163;
    /// Number of multi-segment wells defined
    pub const NSEGWL: usize = 174;
    pub const NSWLMX: usize = 175;
    pub const NSEGMX: usize = 176;
    pub const NLBRMX: usize = 177;
    pub const NISEGZ: usize = 178;
    pub const NRSEGZ: usize = 179;
    pub const NILBRZ: usize = 180;
    pub const NO_WELL_UDQS: usize = 182;
    pub const NO_GROUP_UDQS: usize = 183;
    pub const NO_FIELD_UDQS: usize = 184;
    pub const IHOURZ: usize = 206;
    pub const IMINTS: usize = 207;
    pub const MAXCONDPRACT: usize = 245;
    /// UDQPARAM random seed
    pub const UDQPAR_1: usize = 267;
    pub const NO_IUADS: usize = 290;
    pub const NO_IUAPS: usize = 291;
    /// Seconds of the report time in microseconds
    pub const ISECND: usize = 410;
}

/// LOGIHEAD item positions.
pub mod lh {
    pub const IS_LIVE_OIL: usize = 0;
    pub const IS_WET_GAS: usize = 1;
    pub const DIR_KR: usize = 2;
    pub const E300_RADIAL: usize = 3;
    pub const E100_RADIAL: usize = 4;
    pub const HYSTERESIS: usize = 6;
    pub const END_SCALE: usize = 14;
    pub const DIR_EPS: usize = 15;
    pub const REV_EPS: usize = 16;
    pub const ALT_EPS: usize = 17;
    pub const CONST_CO: usize = 38;
    pub const HAS_MSW: usize = 75;
    pub const NETWORK: usize = 77;
}

/// DOUBHEAD item positions.
pub mod dh {
    /// Elapsed simulation time in days
    pub const SIM_TIME: usize = 0;
    pub const TSINIT: usize = 1;
    pub const TSMAXZ: usize = 2;
    pub const TSMINZ: usize = 3;
    pub const TSMCHP: usize = 4;
    pub const TSFMAX: usize = 5;
    pub const TSFMIN: usize = 6;
    pub const TSFCNV: usize = 7;
    pub const TRGTTE: usize = 8;
    pub const TRGCNV: usize = 9;
    pub const TRGMBE: usize = 10;
    pub const TRGLCV: usize = 11;
    pub const TFDIFF: usize = 12;
    pub const THRUPT: usize = 13;
    pub const XXXTTE: usize = 16;
    pub const XXXCNV: usize = 17;
    pub const XXXMBE: usize = 18;
    pub const XXXLCV: usize = 19;
    pub const XXXWFL: usize = 20;
    pub const TRGFIP: usize = 21;
    pub const TRGSFT: usize = 22;
    pub const THIONX: usize = 23;
    pub const TRWGHT: usize = 24;
    pub const DDPLIM: usize = 25;
    pub const DDSLIM: usize = 26;
    /// Length of the next time step in days
    pub const NEXT_TSTEP: usize = 160;
    /// Simulation start as days since 1899-12-30
    pub const START_DATE: usize = 161;
    pub const UDQ_RANGE: usize = 212;
    pub const UDQ_UNDEFINED: usize = 213;
    pub const UDQ_EPSILON: usize = 214;
}
