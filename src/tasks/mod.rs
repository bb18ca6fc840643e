//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Cleanup: Sweeps expired years out of the lookup cache

mod cleanup;

pub use cleanup::spawn_cleanup_task;
