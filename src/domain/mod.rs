//! Domain layer: request classification, identifiers, and command specs.
//!
//! Everything here is request-scoped and pure; nothing touches the
//! network or spawns processes.

pub mod command;
pub mod request;
pub mod simulation_id;

pub use command::CommandSpec;
pub use request::{Dispatch, RequestKind};
pub use simulation_id::SimulationId;
