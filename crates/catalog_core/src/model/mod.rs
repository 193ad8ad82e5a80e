//! Domain model for catalog records.
//!
//! # Responsibility
//! - Define the data shapes exchanged between repositories and callers.
//!
//! # Invariants
//! - Records are plain values; nothing here touches storage.

pub mod category;
