//! Service layer: request dispatch and subprocess execution.
//!
//! [`DispatchService`] classifies each inbound frame and hands the chosen
//! command to the [`ProcessRunner`], which runs it to completion.

pub mod dispatch_service;
pub mod process_runner;

pub use dispatch_service::DispatchService;
pub use process_runner::{ProcessOutput, ProcessRunner};
