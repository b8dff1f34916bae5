//! Backend implementations of the [`Logger`](crate::logger::Logger)
//! contract.
//!
//! - `memory`: inspectable reference backend, also the test double
//! - `noop`: discards everything
//! - `tracing`: adapter over the `tracing` ecosystem
//! - `logcrate`: adapter over the `log` crate macros

pub mod logcrate;
pub mod memory;
pub mod noop;
pub mod tracing;
