//! Relational storage for the meeting engine.
//!
//! This crate owns the SQLite schema and the queries over it. Every query
//! runs inside a [`UnitOfWork`] obtained from [`Database::begin`] or
//! [`Database::begin_read_only`]; relations are loaded and deleted through
//! explicit calls rather than by the database cascading on its own.

mod database;
mod error;
mod rows;
mod unit_of_work;

pub mod events;
pub mod subscriptions;
pub mod tags;
pub mod users;

pub use database::*;
pub use error::*;
pub use events::EventFilter;
pub use unit_of_work::*;
