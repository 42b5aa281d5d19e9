//! Parameter-sweep primitives for GAMETES cluster batches.
//!
//! This crate owns the deterministic part of a sweep: expanding the configured
//! axes into combinations, deriving storage paths and job names, rendering the
//! GAMETES command line and the PBS submission script, and the idempotent
//! materialize-then-submit step. Process integration (argument parsing, the
//! actual submission command, logging setup) lives in `gametes_sweep_cluster`.

pub mod combination;
pub mod command;
pub mod config;
pub mod enumerator;
pub mod error;
pub mod job;
pub mod materializer;
pub mod naming;
pub mod script;
pub mod submission;

pub use combination::{ParameterCombination, PhenotypeParameter};
pub use config::{DatasetType, RunOptions, SweepAxis};
pub use enumerator::{run_sweep, SweepLeaf, SweepPlan, SweepReport};
pub use error::{ConfigError, MaterializeError, SweepError};
pub use job::JobDescriptor;
pub use materializer::{JobOutcome, Materializer};
pub use naming::PathSegments;
pub use submission::JobSubmitter;
