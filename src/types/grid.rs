//! Grid summary needed for the header

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EclipseGrid {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    /// Number of active cells; all cells when absent
    #[serde(default)]
    pub num_active: Option<usize>,
}

impl EclipseGrid {
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz, num_active: None }
    }

    pub fn nxyz(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    pub fn cartesian_size(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    pub fn num_active(&self) -> usize {
        self.num_active.unwrap_or_else(|| self.cartesian_size())
    }
}
