//! Radius search over persisted circles.
//!
//! # Responsibility
//! - Parse and validate raw search parameters.
//! - Select circles fully contained in a query disk.
//!
//! # Invariants
//! - Containment is inclusive at the disk boundary.
//! - Results carry no ordering guarantee; an empty result is not an error.

pub mod disk;
