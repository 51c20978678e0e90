//! Core types for xcpatch
//!
//! This crate defines the foundational types used throughout the workspace:
//! - ObjectId: 24-character hex identifier of a manifest object
//! - IdGenerator: pluggable source of fresh identifiers
//! - IdAllocator: collision-free allocation against a manifest
//! - Limits: size and depth bounds
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod id_gen;
pub mod limits;
pub mod object_id;

pub use error::{Error, Result};
pub use id_gen::{IdAllocator, IdGenerator, RandomIds, SeededIds, SequentialIds};
pub use limits::{LimitError, Limits};
pub use object_id::{is_object_id, ObjectId, OBJECT_ID_LEN};
