//! LogLens - self-hosted log collector and viewer
//!
//! Applications write leveled entries through the [`facility`] module; the
//! entries land in date-partitioned append-only files, and the [`viewer`]
//! module serves them over a password-protected HTTP endpoint.

pub mod config;
pub mod facility;
pub mod viewer;
