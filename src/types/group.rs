//! Group hierarchy types

use serde::{Deserialize, Serialize};

/// Name of the root group that every schedule must contain.
pub const FIELD_GROUP: &str = "FIELD";

/// GCONPROD control mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum GroupProductionCMode {
    #[default]
    None,
    Orat,
    Wrat,
    Grat,
    Lrat,
    Crat,
    Resv,
    Prbl,
    Fld,
}

/// GCONINJE control mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum GroupInjectionCMode {
    #[default]
    None,
    Rate,
    Resv,
    Rein,
    Vrep,
    Fld,
}

/// Phase a GCONINJE record applies to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InjectionPhase {
    Water,
    Gas,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GroupProductionControls {
    #[serde(default)]
    pub cmode: GroupProductionCMode,
    #[serde(default)]
    pub oil_target: Option<f64>,
    #[serde(default)]
    pub water_target: Option<f64>,
    #[serde(default)]
    pub gas_target: Option<f64>,
    #[serde(default)]
    pub liquid_target: Option<f64>,
    #[serde(default)]
    pub resv_target: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupInjectionControls {
    pub phase: InjectionPhase,
    #[serde(default)]
    pub cmode: GroupInjectionCMode,
    #[serde(default)]
    pub surface_target: Option<f64>,
    #[serde(default)]
    pub resv_target: Option<f64>,
}

/// A group at one lookup step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub name: String,
    /// Parent group; `None` only for FIELD
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub production: Option<GroupProductionControls>,
    #[serde(default)]
    pub injection: Vec<GroupInjectionControls>,
}

impl Group {
    pub fn field() -> Self {
        Self {
            name: FIELD_GROUP.to_string(),
            parent: None,
            production: None,
            injection: Vec::new(),
        }
    }

    /// New group placed under `parent`.
    pub fn new(name: &str, parent: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: Some(parent.to_string()),
            production: None,
            injection: Vec::new(),
        }
    }

    pub fn is_field(&self) -> bool {
        self.name == FIELD_GROUP
    }

    pub fn is_production_group(&self) -> bool {
        self.production.is_some()
    }

    pub fn is_injection_group(&self) -> bool {
        !self.injection.is_empty()
    }

    pub fn injection_for(&self, phase: InjectionPhase) -> Option<&GroupInjectionControls> {
        self.injection.iter().find(|c| c.phase == phase)
    }
}
