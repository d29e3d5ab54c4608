//! Core entity definitions for the meeting engine.
//!
//! This crate defines the data types shared across the workspace: users and
//! their personal info, tags, and events, together with the inputs used to
//! create or update them and the validation rules those inputs obey.

mod event;
mod tag;
mod user;
mod validation;

pub use event::*;
pub use tag::*;
pub use user::*;
pub use validation::*;
