//! rst-encoder: restart-file header and aggregate-array encoding
//!
//! Turns a simulation case, its schedule and (optionally) simulator results
//! into the positional integer, logical, double and string arrays of an
//! ECLIPSE-style unified restart file.
//!
//! ## Layout
//!
//! - **header**: INTEHEAD, LOGIHEAD and DOUBHEAD from dimension resolvers and field builders
//! - **aggregate**: per-well, per-group, per-connection and per-segment records
//! - **restart**: one-call encoding of a report step, or a series in parallel
//! - **config**: TOML encoder configuration with unknown-key warnings
//! - **types**: serde input model (runspec, grid, schedule, results)

pub mod aggregate;
pub mod config;
pub mod error;
pub mod header;
pub mod restart;
pub mod types;

pub use config::EncoderConfig;
pub use error::{RestartError, Result};
pub use header::{
    create_doub_head, create_inte_head, create_logi_head, FormatLayout, FormatVersion,
    StepContext,
};
pub use restart::{encode_restart_step, encode_series, RestartArrays, RestartRequest};
