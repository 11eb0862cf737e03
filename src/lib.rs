//! # Logsieve
//!
//! An HTTP service that streams every chat-log line written by one author
//! out of a directory of log files, decompressing `.gz` files on the fly
//! and holding only a single in-flight chunk in memory at a time.
//!
//! ## Modules
//!
//! - `config` - Server configuration built once at startup
//! - `corpus` - Ordered enumeration of the log directory
//! - `decompress` - Transparent streaming gzip decompression
//! - `error` - Error taxonomy for the service
//! - `filter` - Fixed-offset author predicate and chunked line filtering
//! - `pump` - Sequential per-file pipeline feeding one response body
//! - `server` - The axum HTTP surface

pub mod config;
pub mod corpus;
pub mod decompress;
pub mod error;
pub mod filter;
pub mod pump;
pub mod server;

pub use error::Error;
