//! Roster pipeline: load, derive, query, aggregate.

pub mod aggregate;
pub mod derivation;
pub mod query;
pub mod service;
pub mod view;

pub use service::RosterService;
pub use view::RosterView;
