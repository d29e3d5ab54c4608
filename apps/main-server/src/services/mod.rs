//! Domain services.
//!
//! Every operation takes the [`meeting_store::UnitOfWork`] it runs in; the
//! caller decides whether it is read-only and when it commits.

pub mod activity_sweeper;
pub mod events;
pub mod tags;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

pub use activity_sweeper::ActivitySweeper;
