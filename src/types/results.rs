//! Dynamic simulator results written to the XWEL/XGRP/XCON arrays

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Surface and reservoir rates (or cumulatives) for one entity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Rates {
    #[serde(default)]
    pub oil: f64,
    #[serde(default)]
    pub water: f64,
    #[serde(default)]
    pub gas: f64,
    #[serde(default)]
    pub reservoir: f64,
}

impl Rates {
    pub fn liquid(&self) -> f64 {
        self.oil + self.water
    }

    /// Water cut; 0 when there is no liquid.
    pub fn water_cut(&self) -> f64 {
        let liquid = self.liquid();
        if liquid > 0.0 {
            self.water / liquid
        } else {
            0.0
        }
    }

    /// Gas-oil ratio; 0 when there is no oil.
    pub fn gas_oil_ratio(&self) -> f64 {
        if self.oil > 0.0 {
            self.gas / self.oil
        } else {
            0.0
        }
    }

    pub fn accumulate(&mut self, other: &Rates) {
        self.oil += other.oil;
        self.water += other.water;
        self.gas += other.gas;
        self.reservoir += other.reservoir;
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ConnectionResult {
    /// Production positive, injection negative
    #[serde(default)]
    pub rates: Rates,
    #[serde(default)]
    pub pressure: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WellResult {
    #[serde(default)]
    pub production: Rates,
    #[serde(default)]
    pub injection: Rates,
    #[serde(default)]
    pub production_total: Rates,
    #[serde(default)]
    pub injection_total: Rates,
    #[serde(default)]
    pub bhp: f64,
    #[serde(default)]
    pub thp: f64,
    /// Indexed like the well's connection list
    #[serde(default)]
    pub connections: Vec<ConnectionResult>,
}

/// Simulator state at the report step being written, keyed by well name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SimulationState {
    #[serde(default)]
    pub wells: BTreeMap<String, WellResult>,
}

impl SimulationState {
    pub fn well(&self, name: &str) -> Option<&WellResult> {
        self.wells.get(name)
    }
}
