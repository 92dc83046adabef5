//! Well, connection and segment types

use serde::{Deserialize, Serialize};

// ============================================================================
// Well Classification
// ============================================================================

/// Injected phase for injection wells
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InjectorType {
    Oil,
    Water,
    Gas,
    Multi,
}

/// Producer or injector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum WellType {
    #[default]
    Producer,
    Injector(InjectorType),
}

impl WellType {
    pub fn is_producer(&self) -> bool {
        matches!(self, WellType::Producer)
    }

    pub fn is_injector(&self) -> bool {
        matches!(self, WellType::Injector(_))
    }
}

/// Operating status as set by WCONPROD/WCONINJE/WELOPEN
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum WellStatus {
    #[default]
    Open,
    Stop,
    Shut,
    Auto,
}

impl std::fmt::Display for WellStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WellStatus::Open => write!(f, "OPEN"),
            WellStatus::Stop => write!(f, "STOP"),
            WellStatus::Shut => write!(f, "SHUT"),
            WellStatus::Auto => write!(f, "AUTO"),
        }
    }
}

/// Producer control mode.
///
/// Also used for the global WHISTCTL mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ProducerCMode {
    #[default]
    None,
    Orat,
    Wrat,
    Grat,
    Lrat,
    Crat,
    Resv,
    Bhp,
    Thp,
    Grup,
}

/// Injector control mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum InjectorCMode {
    #[default]
    Rate,
    Resv,
    Bhp,
    Thp,
    Grup,
}

// ============================================================================
// Controls
// ============================================================================

/// WCONPROD-style production controls. `None` limits are undefined.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductionControls {
    #[serde(default)]
    pub cmode: ProducerCMode,
    #[serde(default)]
    pub oil_rate: Option<f64>,
    #[serde(default)]
    pub water_rate: Option<f64>,
    #[serde(default)]
    pub gas_rate: Option<f64>,
    #[serde(default)]
    pub liquid_rate: Option<f64>,
    #[serde(default)]
    pub resv_rate: Option<f64>,
    #[serde(default)]
    pub bhp_limit: Option<f64>,
    #[serde(default)]
    pub thp_limit: Option<f64>,
}

/// WCONINJE-style injection controls
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InjectionControls {
    #[serde(default)]
    pub cmode: InjectorCMode,
    #[serde(default)]
    pub surface_rate: Option<f64>,
    #[serde(default)]
    pub resv_rate: Option<f64>,
    #[serde(default)]
    pub bhp_limit: Option<f64>,
    #[serde(default)]
    pub thp_limit: Option<f64>,
}

// ============================================================================
// Connections
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    #[default]
    Open,
    Shut,
    Auto,
}

/// Penetration direction of a connection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ConnectionDirection {
    X,
    Y,
    #[default]
    Z,
}

/// A single well/grid-cell connection (COMPDAT record).
///
/// Cell indices are 1-based, as in the deck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Connection {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    #[serde(default)]
    pub state: ConnectionState,
    #[serde(default)]
    pub direction: ConnectionDirection,
    /// Connection transmissibility factor
    #[serde(default)]
    pub cf: f64,
    #[serde(default)]
    pub diameter: f64,
    #[serde(default)]
    pub kh: f64,
    #[serde(default)]
    pub skin: f64,
    /// Cell centre depth
    #[serde(default)]
    pub depth: f64,
    /// Saturation table number (0 = grid default)
    #[serde(default)]
    pub sat_table: i32,
    /// Completion number (COMPLUMP); 0 means "same as sequence index"
    #[serde(default)]
    pub complnum: i32,
    /// Segment this connection feeds (multi-segment wells only)
    #[serde(default)]
    pub segment: Option<usize>,
    #[serde(default)]
    pub seg_dist_start: f64,
    #[serde(default)]
    pub seg_dist_end: f64,
}

impl Connection {
    /// Open Z-direction connection in cell (i, j, k) with zeroed properties.
    pub fn new(i: usize, j: usize, k: usize) -> Self {
        Self {
            i,
            j,
            k,
            state: ConnectionState::Open,
            direction: ConnectionDirection::Z,
            cf: 0.0,
            diameter: 0.0,
            kh: 0.0,
            skin: 0.0,
            depth: 0.0,
            sat_table: 0,
            complnum: 0,
            segment: None,
            seg_dist_start: 0.0,
            seg_dist_end: 0.0,
        }
    }

    pub fn with_state(mut self, state: ConnectionState) -> Self {
        self.state = state;
        self
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }
}

// ============================================================================
// Segments
// ============================================================================

/// One WELSEGS segment. Lengths and depths are absolute (cumulative from
/// the top of the well), matching the `ABS` convention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub number: usize,
    pub branch: usize,
    /// Outlet segment number; 0 for the top segment
    pub outlet: usize,
    pub total_length: f64,
    pub depth: f64,
    #[serde(default)]
    pub diameter: f64,
    #[serde(default)]
    pub roughness: f64,
    /// Explicit segment volume; derived from area and length when absent
    #[serde(default)]
    pub volume: Option<f64>,
}

/// Ordered segments of a multi-segment well. Segment 1 is the top segment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SegmentSet {
    pub segments: Vec<Segment>,
}

impl SegmentSet {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, number: usize) -> Option<&Segment> {
        self.segments.iter().find(|s| s.number == number)
    }

    /// Segments whose outlet is `number`, ascending by segment number.
    pub fn inflows(&self, number: usize) -> Vec<&Segment> {
        let mut inflow: Vec<&Segment> =
            self.segments.iter().filter(|s| s.outlet == number && s.number != number).collect();
        inflow.sort_by_key(|s| s.number);
        inflow
    }

    /// Distinct branch numbers, ascending.
    pub fn branches(&self) -> Vec<usize> {
        let mut branches: Vec<usize> = self.segments.iter().map(|s| s.branch).collect();
        branches.sort_unstable();
        branches.dedup();
        branches
    }
}

// ============================================================================
// Well
// ============================================================================

/// A well as it exists at one lookup step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Well {
    pub name: String,
    pub group: String,
    /// Wellhead I location (1-based)
    pub head_i: usize,
    /// Wellhead J location (1-based)
    pub head_j: usize,
    /// BHP reference depth
    #[serde(default)]
    pub ref_depth: f64,
    #[serde(default)]
    pub well_type: WellType,
    #[serde(default)]
    pub status: WellStatus,
    #[serde(default)]
    pub production: ProductionControls,
    #[serde(default)]
    pub injection: InjectionControls,
    #[serde(default = "default_allow_cross_flow")]
    pub allow_cross_flow: bool,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub segments: Option<SegmentSet>,
}

fn default_allow_cross_flow() -> bool {
    true
}

impl Well {
    /// New open producer in `group` with its head at (i, j).
    pub fn producer(name: &str, group: &str, head_i: usize, head_j: usize) -> Self {
        Self {
            name: name.to_string(),
            group: group.to_string(),
            head_i,
            head_j,
            ref_depth: 0.0,
            well_type: WellType::Producer,
            status: WellStatus::Open,
            production: ProductionControls::default(),
            injection: InjectionControls::default(),
            allow_cross_flow: default_allow_cross_flow(),
            connections: Vec::new(),
            segments: None,
        }
    }

    pub fn is_multi_segment(&self) -> bool {
        self.segments.as_ref().is_some_and(|s| !s.is_empty())
    }

    pub fn num_segments(&self) -> usize {
        self.segments.as_ref().map_or(0, SegmentSet::len)
    }

    /// Add a connection, replacing an existing one in the same cell.
    pub fn add_connection(&mut self, conn: Connection) {
        if let Some(existing) = self
            .connections
            .iter_mut()
            .find(|c| (c.i, c.j, c.k) == (conn.i, conn.j, conn.k))
        {
            *existing = conn;
        } else {
            self.connections.push(conn);
        }
    }
}
