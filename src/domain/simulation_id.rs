//! Identifier attached to every simulation request before dispatch.
//!
//! [`SimulationId`] wraps a random [`uuid::Uuid`] (v4) and renders it in
//! the compact hyphen-less form the simulation tool expects: 32 lowercase
//! hexadecimal characters.

use std::fmt;

use serde::{Serialize, Serializer};

/// Unique identifier for one simulation run.
///
/// Generated by the gateway for each `simulation` request, overwriting
/// any `id` the client supplied. Never reused across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimulationId(uuid::Uuid);

impl SimulationId {
    /// Creates a new random `SimulationId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for SimulationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SimulationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl Serialize for SimulationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<SimulationId> for serde_json::Value {
    fn from(id: SimulationId) -> Self {
        Self::String(id.to_string())
    }
}
