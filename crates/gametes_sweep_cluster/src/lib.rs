//! Cluster-facing runtime for GAMETES parameter sweeps.
//!
//! This crate owns process integration: the command-line surface, the
//! submission command adapter, and logging setup. Sweep semantics live in
//! `gametes_sweep_core`.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod logging;
