//! Enrollment and recognition service for visage.
//!
//! Wires the embedding provider client, the gallery store, and the
//! similarity engine into the two service operations: enroll a labelled
//! photo, recognize an unknown photo against the gallery.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod provider;
pub mod service;

pub use config::Config;
pub use error::{MatchError, MatchResult};
pub use provider::{EmbeddingProvider, HttpEmbeddingProvider};
pub use service::Matcher;
