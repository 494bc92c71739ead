//! Domain layer for VoiceRelay
//!
//! Contains the provider catalog, the conversation turn, pipeline states and the
//! conversation log. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
