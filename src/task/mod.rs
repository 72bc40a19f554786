//! Task lifecycle and workload management.
//!
//! Tasks move through a fixed status lifecycle, can be assigned to users,
//! and feed team-level figures such as workload balance and velocity. The
//! module is split in two layers:
//!
//! - Domain types in [`domain`]: the task entity and its state machine
//! - Services in [`services`]: the in-memory directory and its analytics

pub mod domain;
pub mod services;
