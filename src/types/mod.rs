//! Input model for the restart encoder
//!
//! Read-only snapshots handed over by the schedule owner:
//! - Runspec: phases, declared dimensions, unit convention
//! - EclipseGrid: cell counts
//! - Schedule: per-lookup-step wells, groups, UDQ/ACTIONX, tuning, guide rates
//! - SimulationState: dynamic well and connection results
//!
//! All types are serde-serialisable so a case can be loaded from JSON/TOML.

mod grid;
mod group;
mod results;
mod runspec;
mod schedule;
mod tuning;
mod udq;
mod well;

pub use grid::*;
pub use group::*;
pub use results::*;
pub use runspec::*;
pub use schedule::*;
pub use tuning::*;
pub use udq::*;
pub use well::*;

use serde::{Deserialize, Serialize};

/// Static parts of a simulation case: RUNSPEC and grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EclipseCase {
    #[serde(default)]
    pub runspec: Runspec,
    pub grid: EclipseGrid,
}
