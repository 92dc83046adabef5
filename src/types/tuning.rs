//! TUNING keyword values

use serde::{Deserialize, Serialize};

/// Time-step and convergence controls. Defaults are the simulator's
/// built-in TUNING defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Tuning {
    // Record 1: time stepping
    #[serde(default = "default_tsinit")]
    pub tsinit: f64,
    #[serde(default = "default_tsmaxz")]
    pub tsmaxz: f64,
    #[serde(default = "default_tsminz")]
    pub tsminz: f64,
    #[serde(default = "default_tsmchp")]
    pub tsmchp: f64,
    #[serde(default = "default_tsfmax")]
    pub tsfmax: f64,
    #[serde(default = "default_tsfmin")]
    pub tsfmin: f64,
    #[serde(default = "default_tsfcnv")]
    pub tsfcnv: f64,
    #[serde(default = "default_tfdiff")]
    pub tfdiff: f64,
    #[serde(default = "default_thrupt")]
    pub thrupt: f64,

    // Record 2: convergence targets
    #[serde(default = "default_trgtte")]
    pub trgtte: f64,
    #[serde(default = "default_trgcnv")]
    pub trgcnv: f64,
    #[serde(default = "default_trgmbe")]
    pub trgmbe: f64,
    #[serde(default = "default_trglcv")]
    pub trglcv: f64,
    #[serde(default = "default_xxxtte")]
    pub xxxtte: f64,
    #[serde(default = "default_xxxcnv")]
    pub xxxcnv: f64,
    #[serde(default = "default_xxxmbe")]
    pub xxxmbe: f64,
    #[serde(default = "default_xxxlcv")]
    pub xxxlcv: f64,
    #[serde(default = "default_xxxwfl")]
    pub xxxwfl: f64,
    #[serde(default = "default_trgfip")]
    pub trgfip: f64,
    #[serde(default = "default_trgsft")]
    pub trgsft: f64,
    #[serde(default = "default_thionx")]
    pub thionx: f64,
    #[serde(default = "default_trwght")]
    pub trwght: f64,

    // Record 3: iteration limits
    #[serde(default = "default_newtmx")]
    pub newtmx: i32,
    #[serde(default = "default_newtmn")]
    pub newtmn: i32,
    #[serde(default = "default_litmax")]
    pub litmax: i32,
    #[serde(default = "default_litmin")]
    pub litmin: i32,
    #[serde(default = "default_mxwsit")]
    pub mxwsit: i32,
    #[serde(default = "default_mxwpit")]
    pub mxwpit: i32,
    #[serde(default = "default_ddplim")]
    pub ddplim: f64,
    #[serde(default = "default_ddslim")]
    pub ddslim: f64,
}

fn default_tsinit() -> f64 { 1.0 }
fn default_tsmaxz() -> f64 { 365.0 }
fn default_tsminz() -> f64 { 0.1 }
fn default_tsmchp() -> f64 { 0.15 }
fn default_tsfmax() -> f64 { 3.0 }
fn default_tsfmin() -> f64 { 0.3 }
fn default_tsfcnv() -> f64 { 0.1 }
fn default_tfdiff() -> f64 { 1.25 }
fn default_thrupt() -> f64 { 1.0e20 }
fn default_trgtte() -> f64 { 0.1 }
fn default_trgcnv() -> f64 { 0.001 }
fn default_trgmbe() -> f64 { 1.0e-7 }
fn default_trglcv() -> f64 { 0.0001 }
fn default_xxxtte() -> f64 { 10.0 }
fn default_xxxcnv() -> f64 { 0.01 }
fn default_xxxmbe() -> f64 { 1.0e-6 }
fn default_xxxlcv() -> f64 { 0.001 }
fn default_xxxwfl() -> f64 { 0.001 }
fn default_trgfip() -> f64 { 0.025 }
fn default_trgsft() -> f64 { 1.0e20 }
fn default_thionx() -> f64 { 0.01 }
fn default_trwght() -> f64 { 1.0 }
fn default_newtmx() -> i32 { 12 }
fn default_newtmn() -> i32 { 1 }
fn default_litmax() -> i32 { 25 }
fn default_litmin() -> i32 { 1 }
fn default_mxwsit() -> i32 { 8 }
fn default_mxwpit() -> i32 { 8 }
fn default_ddplim() -> f64 { 1.0e6 }
fn default_ddslim() -> f64 { 1.0e6 }

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tsinit: default_tsinit(),
            tsmaxz: default_tsmaxz(),
            tsminz: default_tsminz(),
            tsmchp: default_tsmchp(),
            tsfmax: default_tsfmax(),
            tsfmin: default_tsfmin(),
            tsfcnv: default_tsfcnv(),
            tfdiff: default_tfdiff(),
            thrupt: default_thrupt(),
            trgtte: default_trgtte(),
            trgcnv: default_trgcnv(),
            trgmbe: default_trgmbe(),
            trglcv: default_trglcv(),
            xxxtte: default_xxxtte(),
            xxxcnv: default_xxxcnv(),
            xxxmbe: default_xxxmbe(),
            xxxlcv: default_xxxlcv(),
            xxxwfl: default_xxxwfl(),
            trgfip: default_trgfip(),
            trgsft: default_trgsft(),
            thionx: default_thionx(),
            trwght: default_trwght(),
            newtmx: default_newtmx(),
            newtmn: default_newtmn(),
            litmax: default_litmax(),
            litmin: default_litmin(),
            mxwsit: default_mxwsit(),
            mxwpit: default_mxwpit(),
            ddplim: default_ddplim(),
            ddslim: default_ddslim(),
        }
    }
}
