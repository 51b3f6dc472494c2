//! Core domain model for visage.
//!
//! This crate defines the embedding and identity-record types, the
//! gallery invariants, the durable gallery store, and the shared error
//! taxonomy.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod store;

pub use error::{Error, Result};
pub use model::{Embedding, Gallery, IdentityRecord, MatchDecision};
pub use store::GalleryStore;
