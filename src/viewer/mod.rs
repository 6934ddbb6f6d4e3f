//! The log access surface
//!
//! Lists and displays the daily files the facility produces, over HTTP
//! endpoints gated by Basic Auth. Reads are unsynchronized with the writer:
//! a partial trailing line in a file under active append is expected.

mod auth;
mod files;
mod render;
mod server;

pub use auth::Credentials;
pub use files::{list_log_files, read_log_file, FileAccessError, LOG_EXTENSION};
pub use server::{router, start, ServerHandle};
