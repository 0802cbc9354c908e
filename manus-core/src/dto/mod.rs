//! Data Transfer Objects for the gateway API
//!
//! Request bodies and query parameters sent to the task gateway. Responses are
//! kept as loosely-typed JSON since the gateway does not commit to a schema.

pub mod task;
