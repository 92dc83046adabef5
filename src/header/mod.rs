//! Restart header encoding (INTEHEAD, LOGIHEAD, DOUBHEAD)
//!
//! Dimension resolvers and field builders produce typed records; the
//! assemblers flatten them through the version's [`FormatLayout`].

pub mod calendar;
pub mod codes;
pub mod dimensions;
pub mod doubhead;
pub mod fields;
pub mod intehead;
pub mod layout;
pub mod logihead;
pub mod step;

pub use calendar::{simulation_time_point, TimePoint};
pub use dimensions::{GroupArrayDims, WellTableDim};
pub use doubhead::{create_doub_head, DoubHead};
pub use intehead::{create_inte_head, InteHead};
pub use layout::{FormatLayout, FormatVersion};
pub use logihead::{create_logi_head, LogiHead};
pub use step::StepContext;
