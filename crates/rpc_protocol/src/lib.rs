//! JSON API definitions for the meeting engine.
//!
//! This crate defines the transfer objects exchanged between the server and
//! its clients. Entities are projected flat: related objects appear as ID
//! lists rather than nested graphs.

mod error;
mod types;

pub mod requests;
pub mod responses;

pub use error::*;
pub use types::*;
