//! Domain layer: entities, local state and background propagation.
//!
//! # Architecture
//!
//! - [`entities`] - Records and operation results
//! - [`repositories`] - Durable store contract
//! - [`state_store`] - Process-local record set behind one `RwLock`
//! - [`propagation_job`] - Fire-and-forget writes to the external tiers
//! - [`propagation_worker`] - Bounded, supervised pool that runs those writes
//!
//! # Propagation Flow
//!
//! 1. A service mutates [`state_store::StateStore`] synchronously
//! 2. It submits a [`propagation_job::PropagationJob`] without waiting
//! 3. [`propagation_worker::PropagationQueue`] runs the job under a deadline
//! 4. Failures are logged and counted, never retried

pub mod entities;
pub mod propagation_job;
pub mod propagation_worker;
pub mod repositories;
pub mod state_store;
