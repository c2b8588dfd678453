//! Background Tasks Module
//!
//! # Tasks
//! - Sweep: drops expired cache entries and idle rate-limit keys so a
//!   long-running process does not accumulate state nobody reads again

mod sweep;

pub use sweep::spawn_sweep_task;
