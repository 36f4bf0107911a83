//! Application Layer - workflow coordination
//!
//! The orchestrator drives one account's pass; the scheduler loops the
//! whole account list forever with timed gaps and per-cycle reloads.

pub mod orchestrator;
pub mod scheduler;

pub use orchestrator::{AccountOrchestrator, AccountReport, PassOutcome};
pub use scheduler::{format_hms, CycleScheduler, SchedulerConfig};
