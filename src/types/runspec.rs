//! Run specification: phases, declared dimensions, unit convention and the
//! RUNSPEC switches reported in LOGIHEAD.

use serde::{Deserialize, Serialize};

/// Deck unit convention. Discriminants are the INTEHEAD `UNIT` codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    #[default]
    Metric = 1,
    Field = 2,
    Lab = 3,
    PvtM = 4,
}

impl UnitSystem {
    pub fn ecl_code(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Phase {
    Oil,
    Water,
    Gas,
}

/// Set of active phases (OIL/WATER/GAS keywords).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseSet {
    #[serde(default)]
    pub oil: bool,
    #[serde(default)]
    pub water: bool,
    #[serde(default)]
    pub gas: bool,
}

impl PhaseSet {
    pub fn three_phase() -> Self {
        Self { oil: true, water: true, gas: true }
    }

    pub fn active(&self, phase: Phase) -> bool {
        match phase {
            Phase::Oil => self.oil,
            Phase::Water => self.water,
            Phase::Gas => self.gas,
        }
    }
}

/// WELLDIMS
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WellDims {
    #[serde(default)]
    pub max_wells_in_field: i32,
    #[serde(default)]
    pub max_conn_per_well: i32,
    #[serde(default)]
    pub max_groups_in_field: i32,
    #[serde(default)]
    pub max_wells_per_group: i32,
}

/// WSEGDIMS
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WellSegmentDims {
    #[serde(default)]
    pub max_segmented_wells: i32,
    #[serde(default = "default_max_segments_per_well")]
    pub max_segments_per_well: i32,
    #[serde(default = "default_max_lateral_branches")]
    pub max_lateral_branches_per_well: i32,
}

fn default_max_segments_per_well() -> i32 { 1 }
fn default_max_lateral_branches() -> i32 { 1 }

impl Default for WellSegmentDims {
    fn default() -> Self {
        Self {
            max_segmented_wells: 0,
            max_segments_per_well: default_max_segments_per_well(),
            max_lateral_branches_per_well: default_max_lateral_branches(),
        }
    }
}

/// ACTDIMS
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionDims {
    #[serde(default = "default_max_keywords")]
    pub max_keywords: i32,
    #[serde(default = "default_max_line_count")]
    pub max_line_count: i32,
    #[serde(default = "default_max_characters")]
    pub max_characters: i32,
    #[serde(default = "default_max_conditions")]
    pub max_conditions: i32,
}

fn default_max_keywords() -> i32 { 2 }
fn default_max_line_count() -> i32 { 50 }
fn default_max_characters() -> i32 { 80 }
fn default_max_conditions() -> i32 { 3 }

impl Default for ActionDims {
    fn default() -> Self {
        Self {
            max_keywords: default_max_keywords(),
            max_line_count: default_max_line_count(),
            max_characters: default_max_characters(),
            max_conditions: default_max_conditions(),
        }
    }
}

/// UDQPARAM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UdqParams {
    #[serde(default = "default_rand_seed")]
    pub rand_seed: i32,
    #[serde(default = "default_udq_range")]
    pub range: f64,
    #[serde(default)]
    pub undefined_value: f64,
    #[serde(default = "default_cmp_epsilon")]
    pub cmp_epsilon: f64,
}

fn default_rand_seed() -> i32 { 1 }
fn default_udq_range() -> f64 { 1.0e20 }
fn default_cmp_epsilon() -> f64 { 1.0e-4 }

impl Default for UdqParams {
    fn default() -> Self {
        Self {
            rand_seed: default_rand_seed(),
            range: default_udq_range(),
            undefined_value: 0.0,
            cmp_epsilon: default_cmp_epsilon(),
        }
    }
}

/// REGDIMS plus the FIP region count from TABDIMS
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegionDims {
    #[serde(default = "default_ntfip")]
    pub num_fip_regions: i32,
    #[serde(default = "default_nmfipr")]
    pub nmfipr: i32,
    #[serde(default)]
    pub nrfreg: i32,
    #[serde(default)]
    pub ntfreg: i32,
    #[serde(default)]
    pub nplmix: i32,
}

fn default_ntfip() -> i32 { 1 }
fn default_nmfipr() -> i32 { 1 }

impl Default for RegionDims {
    fn default() -> Self {
        Self {
            num_fip_regions: default_ntfip(),
            nmfipr: default_nmfipr(),
            nrfreg: 0,
            ntfreg: 0,
            nplmix: 0,
        }
    }
}

/// RUNSPEC switches that only surface in LOGIHEAD.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunspecSwitches {
    /// DISGAS
    #[serde(default)]
    pub dissolved_gas: bool,
    /// VAPOIL
    #[serde(default)]
    pub vaporized_oil: bool,
    #[serde(default)]
    pub directional_relperm: bool,
    #[serde(default)]
    pub e300_radial: bool,
    #[serde(default)]
    pub e100_radial: bool,
    #[serde(default)]
    pub hysteresis: bool,
    #[serde(default)]
    pub endpoint_scaling: bool,
    #[serde(default)]
    pub directional_eps: bool,
    #[serde(default)]
    pub reversible_eps: bool,
    #[serde(default)]
    pub alternative_eps: bool,
    /// PVCDO instead of PVDO/PVTO
    #[serde(default)]
    pub constant_compressibility_oil: bool,
    #[serde(default)]
    pub network: bool,
}

/// Everything from RUNSPEC the encoder needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Runspec {
    #[serde(default)]
    pub phases: PhaseSet,
    #[serde(default)]
    pub unit_system: UnitSystem,
    #[serde(default)]
    pub well_dims: WellDims,
    #[serde(default)]
    pub segment_dims: WellSegmentDims,
    #[serde(default)]
    pub action_dims: ActionDims,
    #[serde(default)]
    pub udq_params: UdqParams,
    #[serde(default)]
    pub region_dims: RegionDims,
    #[serde(default)]
    pub switches: RunspecSwitches,
}
