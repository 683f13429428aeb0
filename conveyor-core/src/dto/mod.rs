//! Data Transfer Objects for the batch service API
//!
//! Wire envelopes the service wraps around domain entities. Kept separate
//! from the domain so endpoint payload changes stay out of the core types.

pub mod run;
