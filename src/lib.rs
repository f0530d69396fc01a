//! SCAN-style elevator dispatch and scheduling.
//!
//! Hall calls go through an [`dispatcher::ExternalDispatcher`] and its
//! [`dispatcher::DispatchStrategy`]; cabin presses go through a
//! [`dispatcher::CabinDispatcher`]. Both land in an
//! [`elevator::ElevatorController`], which stages requests behind the current
//! sweep and drives its car stop by stop.

pub mod building;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod elevator;
pub mod shared;
