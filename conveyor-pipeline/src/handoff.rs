//! Inter-step handoff channel
//!
//! A string-keyed channel scoped to one pipeline execution, standing in for
//! the value-passing mechanism an external scheduler would provide. The
//! resolver writes the run id here; the monitor reads it back.
//!
//! Writes are once-only: a second write under the same key is a step bug
//! and fails loudly. Reads do not consume, so a retried downstream step can
//! read the value again.

use std::collections::HashMap;

use crate::error::{Result, StepError};

/// Per-execution key-value channel between steps
#[derive(Debug, Default)]
pub struct Handoff {
    values: HashMap<String, String>,
}

impl Handoff {
    /// Creates an empty channel for a fresh pipeline execution
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a value under `key`, failing if the key was already written
    pub fn insert(&mut self, key: &str, value: String) -> Result<()> {
        if self.values.contains_key(key) {
            return Err(StepError::Handoff(format!(
                "key '{}' was already written this execution",
                key
            )));
        }
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    /// Reads the value published under `key`, failing if no upstream step
    /// wrote it
    pub fn get(&self, key: &str) -> Result<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| StepError::Handoff(format!("no value written under key '{}'", key)))
    }
}
