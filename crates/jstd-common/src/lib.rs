//! Common types for the jstd test-runner toolchain.
//!
//! This crate provides the foundational types shared by the resolver and
//! config-emitter crates:
//! - Canonical source-file identity (`FileId`)

pub mod file_id;
pub use file_id::FileId;
