//! Data Transfer Objects for the emulator's REST surface.
//!
//! Record bodies are untyped JSON; only query strings and system
//! responses have a fixed shape.

pub mod query_dto;

pub use query_dto::*;
