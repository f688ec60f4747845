//! Common types shared across the API boundary.

pub mod response;
