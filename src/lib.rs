//! Taskboard: task lifecycle tracking and workload analytics.
//!
//! This crate provides an in-memory directory of work items that follow a
//! validated status lifecycle, together with the derived team metrics
//! (status breakdowns, overdue detection, workload distribution,
//! auto-assignment, and velocity).
//!
//! # Modules
//!
//! - [`task`]: task domain model, directory service, and analytics

pub mod task;
