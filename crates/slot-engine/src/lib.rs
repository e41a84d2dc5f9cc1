//! # slot-engine
//!
//! Appointment-slot availability for professional booking calendars.
//!
//! Given a date, a service, and optionally a professional, the engine computes
//! the start times at which a new appointment of the service's duration fits
//! inside a professional's working hours without overlapping a break or an
//! existing appointment. Records come from any [`AvailabilityStore`]; the
//! engine only reads them.
//!
//! ## Modules
//!
//! - [`working`] — weekly schedule rows → concrete working intervals for a date
//! - [`blocking`] — breaks and appointments → blocking intervals for a date
//! - [`slots`] — fixed-step slot generation over a working interval
//! - [`engine`] — single- and multi-professional availability
//! - [`store`] — the repository trait and an in-memory implementation
//! - [`model`] — records, intervals, and slots
//! - [`config`] — engine tunables
//! - [`error`] — Error types

pub mod blocking;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod slots;
pub mod store;
pub mod working;

pub use config::EngineConfig;
pub use engine::{compute_available_slots, AvailabilityEngine};
pub use error::{SlotError, StoreError};
pub use model::{Interval, Slot, SlotAssignment};
pub use slots::{generate_slots, split_by_period, DayPeriods};
pub use store::{AvailabilityStore, InMemoryStore};
