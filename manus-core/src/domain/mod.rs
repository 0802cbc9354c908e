//! Core domain types
//!
//! These types describe what the client knows about a remote task: the handle
//! returned on creation, the status fetched while polling, and the final
//! outcome of a polling session.

pub mod poll;
pub mod task;
