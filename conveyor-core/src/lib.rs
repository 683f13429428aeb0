//! Conveyor Core
//!
//! Core types for the Conveyor batch-job orchestration pipeline.
//!
//! This crate contains:
//! - Domain types: the entities the pipeline observes (JobRun, RunStatus)
//! - DTOs: wire envelopes for talking to the batch service

pub mod domain;
pub mod dto;
