//! Request-scoped data structures for the upload flow.

pub mod uploads;
