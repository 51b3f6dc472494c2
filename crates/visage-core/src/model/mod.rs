pub mod embedding;
pub mod gallery;
pub mod record;

pub use embedding::Embedding;
pub use gallery::Gallery;
pub use record::{IdentityRecord, MatchDecision};
