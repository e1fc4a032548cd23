//! Domain logic shared by the catalog store and the HTTP service.
//!
//! Has no I/O: environment resolution, input validation, statistics math,
//! search helpers, upload rules and the seed catalog.

pub mod catalog;
pub mod environment;
pub mod error;
pub mod search;
pub mod seed;
pub mod stats;
pub mod types;
pub mod upload;
