//! UDQ and ACTIONX configuration as seen by the header encoder.
//!
//! Only the parts that size or count header fields are modelled; UDQ
//! expressions and action conditions stay with the schedule owner.

use serde::{Deserialize, Serialize};

/// Variable class of a UDQ, derived from the first letter of its name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UdqVarType {
    None,
    Scalar,
    ConnectionVar,
    FieldVar,
    RegionVar,
    SegmentVar,
    AquiferVar,
    BlockVar,
    WellVar,
    GroupVar,
}

impl UdqVarType {
    /// Classify a UDQ keyword by its leading letter (`WUxxx`, `GUxxx`, `FUxxx`, …).
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.chars().next() {
            Some('W') => UdqVarType::WellVar,
            Some('G') => UdqVarType::GroupVar,
            Some('F') => UdqVarType::FieldVar,
            Some('C') => UdqVarType::ConnectionVar,
            Some('R') => UdqVarType::RegionVar,
            Some('S') => UdqVarType::SegmentVar,
            Some('A') => UdqVarType::AquiferVar,
            Some('B') => UdqVarType::BlockVar,
            _ => UdqVarType::None,
        }
    }
}

/// One DEFINE/ASSIGN input line of the UDQ keyword.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UdqInput {
    pub keyword: String,
    pub var_type: UdqVarType,
    #[serde(default)]
    pub unit: Option<String>,
}

impl UdqInput {
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            var_type: UdqVarType::from_keyword(keyword),
            unit: None,
        }
    }
}

/// UDQs currently used as well/group control limits (IUAD/IUAP records).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UdqActive {
    /// Number of IUAD records
    #[serde(default)]
    pub iuad_size: usize,
    /// Number of IUAP records
    #[serde(default)]
    pub iuap_size: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UdqConfig {
    #[serde(default)]
    pub input: Vec<UdqInput>,
    #[serde(default)]
    pub active: UdqActive,
}

impl UdqConfig {
    /// Number of UDQ inputs of the given variable class.
    pub fn count(&self, var_type: UdqVarType) -> usize {
        self.input.iter().filter(|i| i.var_type == var_type).count()
    }
}

/// One ACTIONX block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Action {
    pub name: String,
    /// Number of input lines in the block, including ACTIONX and ENDACTIO
    pub input_lines: usize,
    #[serde(default)]
    pub conditions: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Actions {
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Actions {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Largest input-line count over all actions, 0 when there are none.
    pub fn max_input_lines(&self) -> usize {
        self.actions.iter().map(|a| a.input_lines).max().unwrap_or(0)
    }
}
