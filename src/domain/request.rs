//! Inbound request classification.
//!
//! A websocket frame is parsed as JSON, its `type` field is matched
//! against the closed set of [`RequestKind`]s, and the result is a
//! [`Dispatch`] describing which tool to run and what to feed it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::SimulationId;
use crate::error::GatewayError;

/// Request kinds the gateway knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Generate a randomized arena layout. Takes no input.
    Randomization,
    /// Run a simulation. The request, tagged with a fresh id, goes to stdin.
    Simulation,
}

impl RequestKind {
    /// Every known kind, in declaration order.
    pub const ALL: [Self; 2] = [Self::Randomization, Self::Simulation];

    /// Wire name carried in the `type` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Randomization => "randomization",
            Self::Simulation => "simulation",
        }
    }

    /// Looks up a kind by its wire name.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Whether the tool for this kind reads the request from stdin.
    #[must_use]
    pub const fn takes_stdin(self) -> bool {
        match self {
            Self::Randomization => false,
            Self::Simulation => true,
        }
    }
}

/// A classified request, ready to hand to the process runner.
#[derive(Debug, Clone)]
pub struct Dispatch {
    /// Which tool to invoke.
    pub kind: RequestKind,
    /// Text written to the child's stdin, if any.
    pub stdin: Option<String>,
    /// Identifier assigned to a simulation request.
    pub simulation_id: Option<SimulationId>,
}

impl Dispatch {
    /// Parses and classifies one inbound frame.
    ///
    /// For simulation requests the `id` field is overwritten in place with
    /// a fresh [`SimulationId`] before the object is re-serialized.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MalformedRequest`] if `text` is not JSON, and
    /// [`GatewayError::UnrecognizedRequestType`] if the document is not an
    /// object or its `type` is missing or unknown.
    pub fn from_frame(text: &str) -> Result<Self, GatewayError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(mut request) = value else {
            return Err(GatewayError::UnrecognizedRequestType(None));
        };

        match classify(&request)? {
            RequestKind::Randomization => Ok(Self {
                kind: RequestKind::Randomization,
                stdin: None,
                simulation_id: None,
            }),
            RequestKind::Simulation => {
                let id = SimulationId::new();
                request.insert("id".to_string(), id.into());
                let payload = serde_json::to_string(&request)
                    .map_err(|e| GatewayError::Internal(e.to_string()))?;
                Ok(Self {
                    kind: RequestKind::Simulation,
                    stdin: Some(payload),
                    simulation_id: Some(id),
                })
            }
        }
    }
}

/// Reads the `type` field of a request object.
fn classify(request: &Map<String, Value>) -> Result<RequestKind, GatewayError> {
    match request.get("type") {
        Some(Value::String(name)) => RequestKind::from_wire(name)
            .ok_or_else(|| GatewayError::UnrecognizedRequestType(Some(format!("{name:?}")))),
        Some(other) => Err(GatewayError::UnrecognizedRequestType(Some(other.to_string()))),
        None => Err(GatewayError::UnrecognizedRequestType(None)),
    }
}
